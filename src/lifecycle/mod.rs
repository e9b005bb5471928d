//! # System Lifecycle
//!
//! Starting and stopping the cart actor, plus tracing setup.
//!
//! [`CartSystem::new`] creates the actor, spawns its loop on the current runtime
//! and keeps the join handle; [`CartSystem::shutdown`] drops the system's
//! client, which closes the channel once no other clone is alive, and waits for
//! the loop to exit.

mod cart_system;
pub mod tracing;

pub use cart_system::CartSystem;
