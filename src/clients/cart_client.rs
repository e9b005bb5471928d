use crate::cart::Cart;
use crate::cart_actor::{CartAction, CartActionResult, CartCreate, CartError, CartTotals};
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{CartCustomization, CartItem, NewCartItem};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor.
///
/// Cheap to clone; every clone talks to the same actor, which applies
/// requests one at a time in the order they arrive.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => CartError::NotFound(id),
            other => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }

    async fn act(&self, cart_id: &str, action: CartAction) -> Result<CartActionResult, CartError> {
        self.inner
            .perform_action(cart_id.to_string(), action)
            .await
            .map_err(Self::map_error)
    }

    /// Opens an empty cart and returns its id.
    #[instrument(skip(self))]
    pub async fn open_cart(&self) -> Result<String, CartError> {
        debug!("Sending request");
        self.inner
            .create(CartCreate::default())
            .await
            .map_err(Self::map_error)
    }

    /// Opens a cart pre-filled from a saved snapshot.
    #[instrument(skip(self, lines), fields(line_count = lines.len()))]
    pub async fn restore_cart(&self, lines: Vec<CartItem>) -> Result<String, CartError> {
        debug!("Sending request");
        self.inner
            .create(CartCreate { lines })
            .await
            .map_err(|e| match e {
                FrameworkError::Custom(msg) => CartError::InvalidSnapshot(msg),
                other => Self::map_error(other),
            })
    }

    /// Adds one unit; returns the line's new quantity.
    pub async fn add_item(
        &self,
        cart_id: &str,
        item: NewCartItem,
        customizations: Vec<CartCustomization>,
    ) -> Result<u32, CartError> {
        self.add_items(cart_id, item, customizations, 1).await
    }

    #[instrument(skip(self, item, customizations), fields(item_id = %item.id))]
    pub async fn add_items(
        &self,
        cart_id: &str,
        item: NewCartItem,
        customizations: Vec<CartCustomization>,
        count: u32,
    ) -> Result<u32, CartError> {
        debug!("Sending request");
        let action = CartAction::Add {
            item,
            customizations,
            count,
        };
        match self.act(cart_id, action).await? {
            CartActionResult::Quantity(quantity) => Ok(quantity),
            other => Err(CartError::UnexpectedResult(format!("{other:?}"))),
        }
    }

    /// Takes one unit off a line. `Ok(None)` means no line matched.
    #[instrument(skip(self, customizations))]
    pub async fn remove_item(
        &self,
        cart_id: &str,
        item_id: &str,
        customizations: Vec<CartCustomization>,
    ) -> Result<Option<u32>, CartError> {
        debug!("Sending request");
        let action = CartAction::Remove {
            id: item_id.to_string(),
            customizations,
        };
        self.remaining(cart_id, action).await
    }

    #[instrument(skip(self, customizations))]
    pub async fn increase_quantity(
        &self,
        cart_id: &str,
        item_id: &str,
        customizations: Vec<CartCustomization>,
    ) -> Result<Option<u32>, CartError> {
        debug!("Sending request");
        let action = CartAction::Increase {
            id: item_id.to_string(),
            customizations,
        };
        self.remaining(cart_id, action).await
    }

    #[instrument(skip(self, customizations))]
    pub async fn decrease_quantity(
        &self,
        cart_id: &str,
        item_id: &str,
        customizations: Vec<CartCustomization>,
    ) -> Result<Option<u32>, CartError> {
        debug!("Sending request");
        let action = CartAction::Decrease {
            id: item_id.to_string(),
            customizations,
        };
        self.remaining(cart_id, action).await
    }

    async fn remaining(&self, cart_id: &str, action: CartAction) -> Result<Option<u32>, CartError> {
        match self.act(cart_id, action).await? {
            CartActionResult::Remaining(quantity) => Ok(quantity),
            other => Err(CartError::UnexpectedResult(format!("{other:?}"))),
        }
    }

    /// Deletes a whole line and returns it.
    #[instrument(skip(self, customizations))]
    pub async fn remove_line(
        &self,
        cart_id: &str,
        item_id: &str,
        customizations: Vec<CartCustomization>,
    ) -> Result<Option<CartItem>, CartError> {
        debug!("Sending request");
        let action = CartAction::RemoveLine {
            id: item_id.to_string(),
            customizations,
        };
        match self.act(cart_id, action).await? {
            CartActionResult::Removed(line) => Ok(line),
            other => Err(CartError::UnexpectedResult(format!("{other:?}"))),
        }
    }

    /// Empties the cart, e.g. after a successful checkout.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self, cart_id: &str) -> Result<usize, CartError> {
        debug!("Sending request");
        match self.act(cart_id, CartAction::Clear).await? {
            CartActionResult::Cleared(dropped) => Ok(dropped),
            other => Err(CartError::UnexpectedResult(format!("{other:?}"))),
        }
    }

    /// Item count and price read in a single request.
    #[instrument(skip(self))]
    pub async fn totals(&self, cart_id: &str) -> Result<CartTotals, CartError> {
        debug!("Sending request");
        match self.act(cart_id, CartAction::Totals).await? {
            CartActionResult::Totals(totals) => Ok(totals),
            other => Err(CartError::UnexpectedResult(format!("{other:?}"))),
        }
    }

    pub async fn total_items(&self, cart_id: &str) -> Result<u32, CartError> {
        Ok(self.totals(cart_id).await?.items)
    }

    pub async fn total_price(&self, cart_id: &str) -> Result<Decimal, CartError> {
        Ok(self.totals(cart_id).await?.price)
    }

    /// Current lines of the cart, in insertion order.
    pub async fn items(&self, cart_id: &str) -> Result<Vec<CartItem>, CartError> {
        self.get(cart_id.to_string())
            .await?
            .map(Cart::into_items)
            .ok_or_else(|| CartError::NotFound(cart_id.to_string()))
    }

    /// Subscribes to snapshots published after every change to the cart.
    ///
    /// The receiver closes when the cart is closed or the actor shuts down.
    #[instrument(skip(self))]
    pub async fn watch(&self, cart_id: &str) -> Result<watch::Receiver<Cart>, CartError> {
        debug!("Sending request");
        self.inner
            .watch(cart_id.to_string())
            .await
            .map_err(Self::map_error)
    }

    /// Drops the cart and closes its watchers.
    pub async fn close_cart(&self, cart_id: &str) -> Result<(), CartError> {
        self.delete(cart_id.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, expect_create, expect_get, MockClient};

    fn burger() -> NewCartItem {
        NewCartItem::new("burger", "Burger", Decimal::new(500, 2), "burger.png")
    }

    #[tokio::test]
    async fn add_items_sends_add_action() {
        let (inner, mut receiver) = create_mock_client::<Cart>(10);
        let client = CartClient::new(inner);

        let task = tokio::spawn(async move { client.add_items("cart_1", burger(), vec![], 3).await });

        let (id, action, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        assert_eq!(id, "cart_1");
        assert_eq!(
            action,
            CartAction::Add {
                item: burger(),
                customizations: vec![],
                count: 3,
            }
        );
        responder.send(Ok(CartActionResult::Quantity(3))).unwrap();

        assert_eq!(task.await.unwrap(), Ok(3));
    }

    #[tokio::test]
    async fn restore_cart_sends_snapshot_lines() {
        let (inner, mut receiver) = create_mock_client::<Cart>(10);
        let client = CartClient::new(inner);

        let mut saved = Cart::new();
        saved.add_many(burger(), vec![], 2);
        let lines = saved.into_items();
        let sent = lines.clone();

        let task = tokio::spawn(async move { client.restore_cart(sent).await });

        let (params, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(params.lines, lines);
        responder
            .send(Err(FrameworkError::Custom("Invalid quantity 0 for item burger".into())))
            .unwrap();

        assert!(matches!(task.await.unwrap(), Err(CartError::InvalidSnapshot(_))));
    }

    #[tokio::test]
    async fn items_returns_lines_of_fetched_cart() {
        let (inner, mut receiver) = create_mock_client::<Cart>(10);
        let client = CartClient::new(inner);

        let task = tokio::spawn(async move { client.items("cart_3").await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, "cart_3");
        let mut cart = Cart::new();
        cart.add(burger(), vec![]);
        responder.send(Ok(Some(cart))).unwrap();

        let items = task.await.unwrap().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "burger");
    }

    #[tokio::test]
    async fn not_found_maps_to_cart_error() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_action("cart_9".to_string())
            .return_err(FrameworkError::NotFound("cart_9".into()));
        let client = CartClient::new(mock.client());

        let result = client.clear_cart("cart_9").await;
        assert_eq!(result, Err(CartError::NotFound("cart_9".into())));
        mock.verify();
    }

    #[tokio::test]
    async fn mismatched_result_is_reported() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_action("cart_1".to_string())
            .return_ok(CartActionResult::Cleared(0));
        let client = CartClient::new(mock.client());

        let result = client.totals("cart_1").await;
        assert!(matches!(result, Err(CartError::UnexpectedResult(_))));
        mock.verify();
    }

    #[tokio::test]
    async fn items_of_missing_cart_is_not_found() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_get("cart_2".to_string()).return_ok(None);
        let client = CartClient::new(mock.client());

        assert_eq!(client.items("cart_2").await, Err(CartError::NotFound("cart_2".into())));
        mock.verify();
    }

    #[tokio::test]
    async fn closed_actor_is_a_communication_error() {
        let (inner, receiver) = create_mock_client::<Cart>(1);
        drop(receiver);
        let client = CartClient::new(inner);

        let result = client.open_cart().await;
        assert!(matches!(result, Err(CartError::ActorCommunicationError(_))));
    }
}
