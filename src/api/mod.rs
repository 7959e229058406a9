//! Remote collaborators of the cart: the basket store and the payment service.

use async_trait::async_trait;

use crate::{
    error::CartResult,
    models::{Cart, Coupon},
};

pub mod http;

pub use http::HttpBasketClient;

/// Remote basket store. Every cart mutation is pushed through [`BasketApi::set_basket`].
#[async_trait]
pub trait BasketApi: Send + Sync {
    /// Fails with `CartError::NotFound` when no basket has that id.
    async fn get_basket(&self, id: &str) -> CartResult<Cart>;

    /// Stores the full cart and returns the server's (possibly normalized) copy.
    async fn set_basket(&self, cart: &Cart) -> CartResult<Cart>;

    async fn delete_basket(&self, id: &str) -> CartResult<()>;

    async fn get_coupon(&self, code: &str) -> CartResult<Coupon>;
}

/// Payment service hook, fired when a coupon change lands during checkout.
#[async_trait]
pub trait PaymentIntents: Send + Sync {
    async fn create_or_update_payment_intent(&self, cart: &Cart) -> CartResult<()>;
}
