#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use dashmap::DashMap;
use rust_decimal::Decimal;

use storefront_cart::{
    api::{BasketApi, PaymentIntents},
    error::{CartError, CartResult},
    models::{Cart, Coupon, DeliveryMethod, Product},
    services::{cart_service::CartService, image_service::ImageResolver},
    storage::MemoryStore,
};

/// In-memory basket API. Prices listed in `reprice` are rewritten on save,
/// standing in for server-side normalization.
#[derive(Default)]
pub struct FakeBasket {
    pub baskets: DashMap<String, Cart>,
    pub coupons: DashMap<String, Coupon>,
    pub reprice: DashMap<i32, Decimal>,
    pub fail_saves: AtomicBool,
    pub fail_deletes: AtomicBool,
    pub saves: AtomicUsize,
}

impl FakeBasket {
    pub fn with_coupon(self, coupon: Coupon) -> Self {
        self.coupons.insert(coupon.code.clone(), coupon);
        self
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BasketApi for FakeBasket {
    async fn get_basket(&self, id: &str) -> CartResult<Cart> {
        self.baskets
            .get(id)
            .map(|c| c.value().clone())
            .ok_or(CartError::NotFound)
    }

    async fn set_basket(&self, cart: &Cart) -> CartResult<Cart> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(CartError::Remote {
                status: 500,
                message: "basket store unavailable".into(),
            });
        }
        self.saves.fetch_add(1, Ordering::SeqCst);

        let mut stored = cart.clone();
        for item in &mut stored.items {
            if let Some(price) = self.reprice.get(&item.product_id) {
                item.price = *price;
            }
        }
        self.baskets.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn delete_basket(&self, id: &str) -> CartResult<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(CartError::Remote {
                status: 500,
                message: "delete failed".into(),
            });
        }
        self.baskets.remove(id).map(|_| ()).ok_or(CartError::NotFound)
    }

    async fn get_coupon(&self, code: &str) -> CartResult<Coupon> {
        self.coupons
            .get(code)
            .map(|c| c.value().clone())
            .ok_or(CartError::NotFound)
    }
}

#[derive(Default)]
pub struct RecordingPayments {
    pub carts: Mutex<Vec<Cart>>,
}

impl RecordingPayments {
    pub fn calls(&self) -> usize {
        self.carts.lock().unwrap().len()
    }
}

#[async_trait]
impl PaymentIntents for RecordingPayments {
    async fn create_or_update_payment_intent(&self, cart: &Cart) -> CartResult<()> {
        self.carts.lock().unwrap().push(cart.clone());
        Ok(())
    }
}

pub struct Harness {
    pub api: Arc<FakeBasket>,
    pub storage: Arc<MemoryStore>,
    pub payments: Arc<RecordingPayments>,
    pub service: CartService,
}

pub fn harness(api: FakeBasket) -> Harness {
    harness_with_storage(api, Arc::new(MemoryStore::new()))
}

pub fn harness_with_storage(api: FakeBasket, storage: Arc<MemoryStore>) -> Harness {
    let api = Arc::new(api);
    let payments = Arc::new(RecordingPayments::default());
    let service = CartService::new(
        api.clone(),
        storage.clone(),
        ImageResolver::new("https://shop.example.com"),
    )
    .with_payments(payments.clone());

    Harness {
        api,
        storage,
        payments,
        service,
    }
}

pub fn product(id: i32, price: Decimal) -> Product {
    Product {
        id,
        name: format!("Product {id}"),
        description: Some("Test product".into()),
        price,
        picture_url: Some(format!("/images/products/{id}.png")),
        product_type: "Boots".into(),
        brand: "Angular".into(),
        quantity_in_stock: Some(100),
    }
}

pub fn delivery(price: Decimal) -> DeliveryMethod {
    DeliveryMethod {
        id: 1,
        short_name: "UPS1".into(),
        delivery_time: "1-2 Days".into(),
        description: "Fastest delivery time".into(),
        price,
    }
}

pub fn percent_coupon(code: &str, percent: Decimal) -> Coupon {
    Coupon {
        code: code.into(),
        amount_off: None,
        percent_off: Some(percent),
    }
}

pub fn amount_coupon(code: &str, amount: Decimal) -> Coupon {
    Coupon {
        code: code.into(),
        amount_off: Some(amount),
        percent_off: None,
    }
}
