use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    api::{BasketApi, PaymentIntents},
    dto::cart::{CartSummary, CartTotals},
    error::{CartError, CartResult},
    models::{Cart, CartItem, Coupon, DeliveryMethod, Product},
    services::image_service::ImageResolver,
    state::{CartState, CartStore},
    storage::{CART_ID_KEY, KeyValueStore},
};

/// Where a coupon change originates; payment intents are refreshed only
/// while the shopper is checking out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckoutContext {
    #[default]
    Browsing,
    Checkout,
}

/// Source of truth for the shopper's cart and delivery selection.
///
/// Mutations work on a copy of the current cart. Local state only changes once
/// the basket API has accepted the copy, and it then holds the server's answer.
pub struct CartService {
    api: Arc<dyn BasketApi>,
    storage: Arc<dyn KeyValueStore>,
    images: ImageResolver,
    payments: Option<Arc<dyn PaymentIntents>>,
    store: CartStore,
}

impl CartService {
    pub fn new(
        api: Arc<dyn BasketApi>,
        storage: Arc<dyn KeyValueStore>,
        images: ImageResolver,
    ) -> Self {
        Self {
            api,
            storage,
            images,
            payments: None,
            store: CartStore::new(),
        }
    }

    pub fn with_payments(mut self, payments: Arc<dyn PaymentIntents>) -> Self {
        self.payments = Some(payments);
        self
    }

    pub fn store(&self) -> &CartStore {
        &self.store
    }

    pub fn images(&self) -> &ImageResolver {
        &self.images
    }

    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.store.subscribe()
    }

    pub fn cart(&self) -> Option<Cart> {
        self.store.cart()
    }

    pub fn selected_delivery(&self) -> Option<DeliveryMethod> {
        self.store.delivery()
    }

    pub fn select_delivery(&self, delivery: Option<DeliveryMethod>) {
        self.store.set_delivery(delivery);
    }

    pub fn item_count(&self) -> u32 {
        self.store.item_count()
    }

    pub fn totals(&self) -> Option<CartTotals> {
        self.store.totals()
    }

    pub fn summary(&self) -> CartSummary {
        let state = self.store.snapshot();
        CartSummary {
            cart_id: state.cart.as_ref().map(|c| c.id.clone()),
            item_count: state.item_count(),
            totals: state.totals(),
        }
    }

    pub fn quantity_in_cart(&self, product_id: i32) -> u32 {
        self.store
            .cart()
            .and_then(|c| c.item(product_id).map(|i| i.quantity))
            .unwrap_or(0)
    }

    /// Restores the cart whose id was persisted by a previous session.
    ///
    /// Any failure is absorbed: the stored id is dropped and the store stays empty.
    pub async fn init(&self) -> Option<Cart> {
        let id = match self.storage.get(CART_ID_KEY) {
            Ok(id) => id?,
            Err(err) => {
                tracing::warn!(error = %err, "reading stored cart id failed");
                return None;
            }
        };

        self.load(&id).await.ok()
    }

    /// Fetches cart `id` and makes it the current cart. On failure the current
    /// cart and the stored id are both cleared and the error is returned.
    pub async fn load(&self, id: &str) -> CartResult<Cart> {
        match self.api.get_basket(id).await {
            Ok(cart) => {
                tracing::debug!(cart_id = %cart.id, items = cart.items.len(), "cart loaded");
                self.store.set_cart(Some(cart.clone()));
                Ok(cart)
            }
            Err(err) => {
                tracing::warn!(cart_id = %id, error = %err, "loading cart failed, clearing stored id");
                self.store.set_cart(None);
                self.forget_cart_id();
                Err(err)
            }
        }
    }

    /// Pushes `cart` to the basket API and adopts the returned copy locally.
    pub async fn save(&self, cart: &Cart) -> CartResult<Cart> {
        let saved = self.api.set_basket(cart).await.inspect_err(|err| {
            tracing::warn!(cart_id = %cart.id, error = %err, "saving cart failed");
        })?;
        tracing::debug!(cart_id = %saved.id, items = saved.items.len(), "cart saved");
        self.store.set_cart(Some(saved.clone()));
        Ok(saved)
    }

    pub async fn add_item(&self, product: &Product, quantity: u32) -> CartResult<Cart> {
        if quantity == 0 {
            return Err(CartError::BadRequest(
                "quantity must be greater than 0".to_string(),
            ));
        }

        let mut draft = match self.store.cart() {
            Some(cart) => cart,
            None => self.create_cart()?,
        };

        let picture_url = self.images.image_url(product.picture_url.as_deref());
        draft.add_item(CartItem::from_product(product, picture_url, quantity))?;

        tracing::debug!(cart_id = %draft.id, product_id = product.id, quantity, "adding item");
        self.save(&draft).await
    }

    /// Takes `quantity` off a line, dropping it at zero. Returns `None` when
    /// there is no cart; a missing line leaves the cart untouched.
    pub async fn remove_item(&self, product_id: i32, quantity: u32) -> CartResult<Option<Cart>> {
        if quantity == 0 {
            return Err(CartError::BadRequest(
                "quantity must be greater than 0".to_string(),
            ));
        }

        let Some(mut draft) = self.store.cart() else {
            return Ok(None);
        };
        if !draft.remove_quantity(product_id, quantity) {
            return Ok(Some(draft));
        }

        tracing::debug!(cart_id = %draft.id, product_id, quantity, "removing item");
        self.save(&draft).await.map(Some)
    }

    pub async fn remove_item_completely(&self, product_id: i32) -> CartResult<Option<Cart>> {
        let Some(mut draft) = self.store.cart() else {
            return Ok(None);
        };
        if !draft.remove_line(product_id) {
            return Ok(Some(draft));
        }

        tracing::debug!(cart_id = %draft.id, product_id, "removing line");
        self.save(&draft).await.map(Some)
    }

    /// Moves the quantity held for `product` to `desired`; 0 removes the line.
    pub async fn set_item_quantity(
        &self,
        product: &Product,
        desired: u32,
    ) -> CartResult<Option<Cart>> {
        let current = self.quantity_in_cart(product.id);
        if desired > current {
            self.add_item(product, desired - current).await.map(Some)
        } else if desired < current {
            self.remove_item(product.id, current - desired).await
        } else {
            Ok(self.store.cart())
        }
    }

    /// Looks up a coupon. The cart is left alone; see [`CartService::redeem_coupon`].
    pub async fn apply_coupon(&self, code: &str) -> CartResult<Coupon> {
        self.api.get_coupon(code).await.inspect_err(|err| {
            tracing::info!(code = %code, error = %err, "coupon lookup failed");
        })
    }

    /// Looks up `code`, attaches it to the cart and saves. A blank code or an
    /// absent cart is a no-op.
    pub async fn redeem_coupon(
        &self,
        code: &str,
        context: CheckoutContext,
    ) -> CartResult<Option<Cart>> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(self.store.cart());
        }

        let coupon = self.apply_coupon(code).await?;
        let Some(mut draft) = self.store.cart() else {
            return Ok(None);
        };
        draft.coupon = Some(coupon);

        let saved = self.save(&draft).await?;
        self.refresh_payment_intent(&saved, context).await;
        Ok(Some(saved))
    }

    pub async fn remove_coupon(&self, context: CheckoutContext) -> CartResult<Option<Cart>> {
        let Some(mut draft) = self.store.cart() else {
            return Ok(None);
        };
        draft.coupon = None;

        let saved = self.save(&draft).await?;
        self.refresh_payment_intent(&saved, context).await;
        Ok(Some(saved))
    }

    /// Deletes the remote basket, then clears local state and the stored id.
    /// Local state is kept when the remote delete fails.
    pub async fn delete_cart(&self) -> CartResult<()> {
        let Some(cart) = self.store.cart() else {
            return Ok(());
        };

        self.api.delete_basket(&cart.id).await?;
        tracing::info!(cart_id = %cart.id, "cart deleted");
        self.delete_local_cart();
        Ok(())
    }

    /// Clears local state and the stored id without calling the basket API.
    pub fn delete_local_cart(&self) {
        self.store.clear();
        self.forget_cart_id();
    }

    fn create_cart(&self) -> CartResult<Cart> {
        let cart = Cart::new();
        self.storage.set(CART_ID_KEY, &cart.id)?;
        tracing::info!(cart_id = %cart.id, "cart created");
        Ok(cart)
    }

    fn forget_cart_id(&self) {
        if let Err(err) = self.storage.remove(CART_ID_KEY) {
            tracing::warn!(error = %err, "clearing stored cart id failed");
        }
    }

    async fn refresh_payment_intent(&self, cart: &Cart, context: CheckoutContext) {
        if context != CheckoutContext::Checkout {
            return;
        }
        let Some(payments) = &self.payments else {
            return;
        };
        if let Err(err) = payments.create_or_update_payment_intent(cart).await {
            tracing::warn!(cart_id = %cart.id, error = %err, "payment intent update failed");
        }
    }
}
