//! Cart hosted in a [`ResourceActor`] so that several tasks can share it.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::CartCreate;
pub use error::*;

use crate::cart::Cart;
use crate::clients::CartClient;
use crate::framework::ResourceActor;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Creates a new Cart actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Cart>, CartClient) {
    let cart_id_counter = Arc::new(AtomicU64::new(1));
    let next_cart_id = move || {
        let id = cart_id_counter.fetch_add(1, Ordering::SeqCst);
        format!("cart_{}", id)
    };

    let (actor, generic_client) = ResourceActor::new(buffer_size, next_cart_id);
    let client = CartClient::new(generic_client);

    (actor, client)
}
