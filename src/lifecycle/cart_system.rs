use crate::clients::CartClient;
use crate::config::CartConfig;
use tracing::{error, info};

/// Owns the running cart actor and hands out its client.
///
/// # Example
///
/// ```ignore
/// let system = CartSystem::new(CartConfig::from_env()?);
/// let cart_id = system.cart_client.open_cart().await?;
/// system.cart_client.add_item(&cart_id, item, vec![]).await?;
/// system.shutdown().await?;
/// ```
pub struct CartSystem {
    /// Client for interacting with the Cart actor. Clone it for every screen or task.
    pub cart_client: CartClient,

    config: CartConfig,
    handle: tokio::task::JoinHandle<()>,
}

impl CartSystem {
    /// Spawns the cart actor on the current Tokio runtime.
    pub fn new(config: CartConfig) -> Self {
        let (cart_actor, cart_client) = crate::cart_actor::new(config.buffer_size);

        // Carts have no dependencies (Context = ())
        let handle = tokio::spawn(cart_actor.run(()));
        info!(buffer_size = config.buffer_size, "Cart system started");

        Self {
            cart_client,
            config,
            handle,
        }
    }

    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// Drops the system's client and waits for the actor to drain and exit.
    ///
    /// The actor only stops once *every* `CartClient` clone is gone; clones
    /// still held elsewhere keep it alive and make this call wait.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down cart system...");

        drop(self.cart_client);

        if let Err(e) = self.handle.await {
            error!("Cart actor task failed: {:?}", e);
            return Err(format!("Cart actor task failed: {:?}", e));
        }

        info!("Cart system shutdown complete.");
        Ok(())
    }
}
