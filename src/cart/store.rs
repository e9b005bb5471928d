use super::lines::Cart;
use crate::model::{CartCustomization, CartItem, NewCartItem};
use rust_decimal::Decimal;
use tracing::trace;

/// Callback invoked with the current lines after every change.
pub type CartObserver = Box<dyn FnMut(&[CartItem]) + Send>;

/// A [`Cart`] plus the observers that want to hear about its changes.
///
/// This is the object screens hold (or receive through their context) in a
/// single-threaded UI. Observers run synchronously, in registration order,
/// before the mutating call returns. Calls that leave the cart unchanged do
/// not notify.
#[derive(Default)]
pub struct CartStore {
    cart: Cart,
    observers: Vec<CartObserver>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&[CartItem]) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self) {
        trace!(lines = self.cart.len(), observers = self.observers.len(), "Cart changed");
        let items = self.cart.items();
        for observer in &mut self.observers {
            observer(items);
        }
    }

    pub fn add(&mut self, item: NewCartItem, customizations: Vec<CartCustomization>) -> u32 {
        let quantity = self.cart.add(item, customizations);
        self.notify();
        quantity
    }

    pub fn add_many(
        &mut self,
        item: NewCartItem,
        customizations: Vec<CartCustomization>,
        count: u32,
    ) -> u32 {
        if count == 0 {
            return self
                .cart
                .line(&item.id, &customizations)
                .map_or(0, |line| line.quantity);
        }
        let quantity = self.cart.add_many(item, customizations, count);
        self.notify();
        quantity
    }

    pub fn remove(&mut self, id: &str, customizations: &[CartCustomization]) -> Option<u32> {
        let remaining = self.cart.remove(id, customizations)?;
        self.notify();
        Some(remaining)
    }

    pub fn increase(&mut self, id: &str, customizations: &[CartCustomization]) -> Option<u32> {
        let quantity = self.cart.increase(id, customizations)?;
        self.notify();
        Some(quantity)
    }

    pub fn decrease(&mut self, id: &str, customizations: &[CartCustomization]) -> Option<u32> {
        self.remove(id, customizations)
    }

    pub fn remove_line(
        &mut self,
        id: &str,
        customizations: &[CartCustomization],
    ) -> Option<CartItem> {
        let removed = self.cart.remove_line(id, customizations)?;
        self.notify();
        Some(removed)
    }

    pub fn clear(&mut self) -> usize {
        let dropped = self.cart.clear();
        if dropped > 0 {
            self.notify();
        }
        dropped
    }

    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    pub fn total_items(&self) -> u32 {
        self.cart.total_items()
    }

    pub fn total_price(&self) -> Decimal {
        self.cart.total_price()
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("observers", &self.observers.len())
            .finish()
    }
}
