use crate::model::{CartCustomization, CartItem, CustomizationKey, NewCartItem};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A saved line list that cannot be turned back into a [`Cart`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InvalidLines {
    #[error("Invalid quantity 0 for item {0}")]
    ZeroQuantity(String),
}

/// Ordered collection of cart lines.
///
/// Invariant: no two lines share the same item id and customization id set,
/// and every line has a quantity of at least 1. Lines keep the order in which
/// they were first added.
///
/// Serializes as a plain list of lines. Deserializing goes through
/// its `TryFrom<Vec<CartItem>>` impl, so duplicate lines merge and zero-quantity lines are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    lines: Vec<CartItem>,
}

impl TryFrom<Vec<CartItem>> for Cart {
    type Error = InvalidLines;

    /// Rebuilds a cart line by line, merging lines that address the same item.
    fn try_from(lines: Vec<CartItem>) -> Result<Self, Self::Error> {
        let mut cart = Cart::new();
        for line in lines {
            if line.quantity == 0 {
                return Err(InvalidLines::ZeroQuantity(line.id));
            }
            let item = NewCartItem::new(line.id, line.name, line.price, line.image_url);
            cart.add_many(item, line.customizations, line.quantity);
        }
        Ok(cart)
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: &str, key: &CustomizationKey) -> Option<usize> {
        self.lines.iter().position(|line| line.matches(id, key))
    }

    /// Adds one unit of `item` configured with `customizations`.
    ///
    /// A matching line has its quantity bumped and keeps its original
    /// customization list; otherwise a new line is appended. Returns the
    /// line's quantity after the call.
    pub fn add(&mut self, item: NewCartItem, customizations: Vec<CartCustomization>) -> u32 {
        self.add_many(item, customizations, 1)
    }

    /// Same as calling [`Cart::add`] `count` times. Returns the line's
    /// quantity afterwards, or 0 when `count` is 0 and no line exists.
    /// Quantities saturate at `u32::MAX`.
    pub fn add_many(
        &mut self,
        item: NewCartItem,
        customizations: Vec<CartCustomization>,
        count: u32,
    ) -> u32 {
        let key = CustomizationKey::of(&customizations);
        match self.position(&item.id, &key) {
            Some(idx) => {
                let line = &mut self.lines[idx];
                line.quantity = line.quantity.saturating_add(count);
                line.quantity
            }
            None if count == 0 => 0,
            None => {
                let mut line = CartItem::from_new(item, customizations);
                line.quantity = count;
                self.lines.push(line);
                count
            }
        }
    }

    /// Takes one unit off the matching line, dropping the line when it reaches zero.
    ///
    /// Returns the remaining quantity (0 once the line is gone), or `None`
    /// when nothing matched and the cart is untouched.
    pub fn remove(&mut self, id: &str, customizations: &[CartCustomization]) -> Option<u32> {
        let idx = self.position(id, &CustomizationKey::of(customizations))?;
        let line = &mut self.lines[idx];
        if line.quantity > 1 {
            line.quantity -= 1;
            Some(line.quantity)
        } else {
            self.lines.remove(idx);
            Some(0)
        }
    }

    /// Adds one unit to an existing line. Unknown lines are left alone.
    pub fn increase(&mut self, id: &str, customizations: &[CartCustomization]) -> Option<u32> {
        let idx = self.position(id, &CustomizationKey::of(customizations))?;
        let line = &mut self.lines[idx];
        line.quantity = line.quantity.saturating_add(1);
        Some(line.quantity)
    }

    pub fn decrease(&mut self, id: &str, customizations: &[CartCustomization]) -> Option<u32> {
        self.remove(id, customizations)
    }

    /// Deletes the matching line whatever its quantity.
    pub fn remove_line(
        &mut self,
        id: &str,
        customizations: &[CartCustomization],
    ) -> Option<CartItem> {
        let idx = self.position(id, &CustomizationKey::of(customizations))?;
        Some(self.lines.remove(idx))
    }

    /// Empties the cart and returns the number of lines dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.lines.len();
        self.lines.clear();
        dropped
    }

    pub fn line(&self, id: &str, customizations: &[CartCustomization]) -> Option<&CartItem> {
        let key = CustomizationKey::of(customizations);
        self.lines.iter().find(|line| line.matches(id, &key))
    }

    pub fn items(&self) -> &[CartItem] {
        &self.lines
    }

    pub fn into_items(self) -> Vec<CartItem> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_items(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |total, line| total.saturating_add(line.quantity))
    }

    /// Sum of every line's `(unit price + customization prices) * quantity`, unrounded.
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(CartItem::line_total).sum()
    }
}
