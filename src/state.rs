use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    dto::cart::CartTotals,
    models::{Cart, DeliveryMethod},
    services::totals,
};

/// Everything the storefront knows about the shopper's basket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    pub cart: Option<Cart>,
    pub delivery: Option<DeliveryMethod>,
}

impl CartState {
    pub fn item_count(&self) -> u32 {
        totals::item_count(self.cart.as_ref())
    }

    pub fn totals(&self) -> Option<CartTotals> {
        totals::compute_totals(self.cart.as_ref(), self.delivery.as_ref())
    }
}

/// Observable holder for [`CartState`].
///
/// Every write notifies all receivers handed out by [`CartStore::subscribe`];
/// derived values are computed from the snapshot a receiver borrows.
#[derive(Clone)]
pub struct CartStore {
    tx: Arc<watch::Sender<CartState>>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(CartState::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> CartState {
        self.tx.borrow().clone()
    }

    pub fn cart(&self) -> Option<Cart> {
        self.tx.borrow().cart.clone()
    }

    pub fn delivery(&self) -> Option<DeliveryMethod> {
        self.tx.borrow().delivery.clone()
    }

    pub fn item_count(&self) -> u32 {
        self.tx.borrow().item_count()
    }

    pub fn totals(&self) -> Option<CartTotals> {
        self.tx.borrow().totals()
    }

    pub fn set_cart(&self, cart: Option<Cart>) {
        self.tx.send_modify(|state| state.cart = cart);
    }

    pub fn set_delivery(&self, delivery: Option<DeliveryMethod>) {
        self.tx.send_modify(|state| state.delivery = delivery);
    }

    /// Drops both the cart and the delivery selection in one notification.
    pub fn clear(&self) {
        self.tx.send_replace(CartState::default());
    }
}
