//! # Food Cart
//!
//! > **Client-side shopping cart for a food-ordering app.**
//!
//! Screens add menu items with optional toppings and sides, adjust quantities,
//! show the running totals and clear the cart after checkout. Menu data comes
//! from an external catalog; this crate only aggregates what the user picked.
//!
//! ## Line matching
//!
//! A cart line is identified by the menu item id together with the *set* of
//! customization ids. Adding the same burger with `[cheese, onions]` and then
//! with `[onions, cheese]` bumps one line to quantity 2; the same burger with no
//! toppings is a separate line. Removing takes one unit off and drops the line
//! at zero; removing something that is not in the cart does nothing.
//!
//! Totals are `Σ (unit price + customization prices) × quantity`, computed in
//! [`rust_decimal::Decimal`] and only rounded by [`model::format_price`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`])
//! - Catalog records ([`MenuItem`](model::MenuItem)), customizations and cart lines.
//!
//! ### 2. The Cart ([`cart`])
//! - [`Cart`](cart::Cart): the lines and all matching/total logic, no I/O.
//! - [`CartStore`](cart::CartStore): a `Cart` with synchronous observers, for a
//!   single-threaded UI that owns the store directly.
//!
//! ### 3. The Engine ([`framework`])
//! - Generic [`ResourceActor`](framework::ResourceActor): one Tokio task owns the
//!   state and processes requests in order, publishing a snapshot on a `watch`
//!   channel after every change.
//!
//! ### 4. The Interface ([`clients`], [`cart_actor`])
//! - [`CartClient`](clients::CartClient) wraps the generic client with cart
//!   operations and [`CartError`](cart_actor::CartError).
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`])
//! - [`CartSystem`](lifecycle::CartSystem) starts and stops the actor;
//!   [`CartConfig`](config::CartConfig) reads its settings from the environment.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod cart;
pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
