//! Plain data carried through the cart: catalog records, customizations and cart lines.

pub mod cart_item;
pub mod customization;
pub mod menu;
pub mod money;

pub use cart_item::*;
pub use customization::*;
pub use menu::*;
pub use money::*;
