//! Generic single-owner actor framework.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that resource types implement to be hosted by an actor
//! - [`ResourceActor`] - Task that owns the entities and processes requests in order
//! - [`ResourceClient`] - Cloneable, type-safe handle for sending requests
//! - [`FrameworkError`] - Transport-level errors
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod core;
pub mod mock;

pub use self::core::*;
