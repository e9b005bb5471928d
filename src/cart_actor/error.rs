//! Error types for the Cart actor.

use thiserror::Error;

/// Errors that can occur while talking to an actor-hosted cart.
///
/// Cart operations themselves never fail; these cover addressing and transport.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// No cart with this id is open.
    #[error("Cart not found: {0}")]
    NotFound(String),

    /// A snapshot handed to `open_cart` could not be restored.
    #[error("Invalid cart snapshot: {0}")]
    InvalidSnapshot(String),

    /// The actor replied with a result that does not belong to the request.
    #[error("Unexpected cart action result: {0}")]
    UnexpectedResult(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunicationError(msg)
    }
}
