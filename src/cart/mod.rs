//! Client-side cart aggregation.
//!
//! [`Cart`] holds the lines and implements the matching rules; [`CartStore`]
//! wraps it with synchronous change observers for direct use from UI code.
//! For a cart shared between tasks see [`crate::cart_actor`].

mod lines;
mod store;

pub use lines::{Cart, InvalidLines};
pub use store::{CartObserver, CartStore};
