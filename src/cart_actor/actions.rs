//! Actions that can be performed on an actor-hosted [`Cart`](crate::cart::Cart).
//!
//! Lines are always addressed by item id plus customization list; the list is
//! compared as a set of customization ids.

use crate::model::{CartCustomization, CartItem, NewCartItem};
use rust_decimal::Decimal;

/// Operations on a cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Adds `count` units of the item, merging into a matching line.
    Add {
        item: NewCartItem,
        customizations: Vec<CartCustomization>,
        count: u32,
    },
    /// Takes one unit off a line; the line goes away at zero.
    Remove {
        id: String,
        customizations: Vec<CartCustomization>,
    },
    Increase {
        id: String,
        customizations: Vec<CartCustomization>,
    },
    Decrease {
        id: String,
        customizations: Vec<CartCustomization>,
    },
    /// Deletes a line whatever its quantity.
    RemoveLine {
        id: String,
        customizations: Vec<CartCustomization>,
    },
    Clear,
    /// Reads item count and price without changing anything.
    Totals,
}

/// Item count and unrounded price of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    pub items: u32,
    pub price: Decimal,
}

/// Results from [`CartAction`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum CartActionResult {
    /// Quantity of the line after `Add`.
    Quantity(u32),
    /// Quantity left after `Remove`, `Increase` or `Decrease`; `None` when no line matched.
    Remaining(Option<u32>),
    /// The line deleted by `RemoveLine`, if any.
    Removed(Option<CartItem>),
    /// Number of lines dropped by `Clear`.
    Cleared(usize),
    Totals(CartTotals),
}
