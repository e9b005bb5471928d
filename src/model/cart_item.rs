use super::customization::{CartCustomization, CustomizationKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A candidate item handed to the cart by a menu screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCartItem {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub image_url: String,
}

impl NewCartItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image_url: image_url.into(),
        }
    }
}

/// One line of the cart: a menu item in a particular configuration.
///
/// Lines are identified by `(id, set of customization ids)`; see [`CartItem::matches`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub image_url: String,
    pub quantity: u32,
    pub customizations: Vec<CartCustomization>,
}

impl CartItem {
    pub(crate) fn from_new(item: NewCartItem, customizations: Vec<CartCustomization>) -> Self {
        Self {
            id: item.id,
            name: item.name,
            price: item.price,
            image_url: item.image_url,
            quantity: 1,
            customizations,
        }
    }

    pub fn key(&self) -> CustomizationKey {
        CustomizationKey::of(&self.customizations)
    }

    /// Whether this line is the one addressed by `id` and `key`.
    pub fn matches(&self, id: &str, key: &CustomizationKey) -> bool {
        self.id == id && self.key() == *key
    }

    /// Price of a single unit including every customization.
    pub fn unit_total(&self) -> Decimal {
        self.price + self.customizations.iter().map(|c| c.price).sum::<Decimal>()
    }

    pub fn line_total(&self) -> Decimal {
        self.unit_total() * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_includes_customizations() {
        let item = CartItem {
            id: "burger".into(),
            name: "Burger".into(),
            price: Decimal::new(500, 2),
            image_url: String::new(),
            quantity: 3,
            customizations: vec![
                CartCustomization::topping("cheese", "Cheese", Decimal::new(50, 2)),
                CartCustomization::side("fries", "Fries", Decimal::new(200, 2)),
            ],
        };

        assert_eq!(item.unit_total(), Decimal::new(750, 2));
        assert_eq!(item.line_total(), Decimal::new(2250, 2));
    }
}
