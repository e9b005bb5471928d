//! [`ActorEntity`] implementation for [`Cart`].
//!
//! Every action maps onto one [`Cart`] method, so an actor-hosted cart behaves
//! exactly like a local one; the actor only adds ordering and snapshots.

use super::actions::{CartAction, CartActionResult, CartTotals};
use crate::cart::Cart;
use crate::framework::ActorEntity;
use crate::model::CartItem;
use async_trait::async_trait;
use tracing::debug;

/// Payload for opening a cart.
///
/// `lines` restores a previously saved snapshot; leave it empty for a fresh cart.
#[derive(Debug, Clone, Default)]
pub struct CartCreate {
    pub lines: Vec<CartItem>,
}

#[async_trait]
impl ActorEntity for Cart {
    type Id = String;
    type CreateParams = CartCreate;
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Context = ();

    /// Duplicate lines in a snapshot merge; zero quantities are rejected.
    fn from_create_params(_id: String, params: CartCreate) -> Result<Self, String> {
        Cart::try_from(params.lines).map_err(|e| e.to_string())
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        _ctx: &Self::Context,
    ) -> Result<CartActionResult, String> {
        let result = match action {
            CartAction::Add {
                item,
                customizations,
                count,
            } => {
                let item_id = item.id.clone();
                let quantity = self.add_many(item, customizations, count);
                debug!(%item_id, quantity, "Added");
                CartActionResult::Quantity(quantity)
            }
            CartAction::Remove { id, customizations } => {
                CartActionResult::Remaining(self.remove(&id, &customizations))
            }
            CartAction::Increase { id, customizations } => {
                CartActionResult::Remaining(self.increase(&id, &customizations))
            }
            CartAction::Decrease { id, customizations } => {
                CartActionResult::Remaining(self.decrease(&id, &customizations))
            }
            CartAction::RemoveLine { id, customizations } => {
                CartActionResult::Removed(self.remove_line(&id, &customizations))
            }
            CartAction::Clear => CartActionResult::Cleared(self.clear()),
            CartAction::Totals => CartActionResult::Totals(CartTotals {
                items: self.total_items(),
                price: self.total_price(),
            }),
        };
        debug!(lines = self.len(), items = self.total_items(), "Cart state");
        Ok(result)
    }
}
