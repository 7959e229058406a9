use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CartError, CartResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub picture_url: Option<String>,
    #[serde(rename = "type")]
    pub product_type: String,
    pub brand: String,
    #[serde(default)]
    pub quantity_in_stock: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: i32,
    pub product_name: String,
    pub price: Decimal,
    pub picture_url: String,
    pub brand: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub quantity: u32,
}

impl CartItem {
    /// Builds a line for `product`; `picture_url` is expected to be resolved already.
    pub fn from_product(product: &Product, picture_url: String, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            product_name: product.name.clone(),
            price: product.price,
            picture_url,
            brand: product.brand.clone(),
            item_type: product.product_type.clone(),
            quantity,
        }
    }

    /// `None` when price times quantity overflows.
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_off: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_off: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: String,
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon: Option<Coupon>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Creates an empty cart with a freshly generated id.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().simple().to_string())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            items: Vec::new(),
            coupon: None,
        }
    }

    pub fn item(&self, product_id: i32) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    pub fn item_mut(&mut self, product_id: i32) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|i| i.product_id == product_id)
    }

    /// Adds `quantity` of `item.product_id`, merging into an existing line.
    /// A merge that would overflow the line quantity is rejected.
    pub fn add_item(&mut self, item: CartItem) -> CartResult<()> {
        if let Some(existing) = self.item_mut(item.product_id) {
            existing.quantity = existing
                .quantity
                .checked_add(item.quantity)
                .ok_or_else(|| {
                    CartError::BadRequest(format!(
                        "quantity for product {} is too large",
                        item.product_id
                    ))
                })?;
        } else {
            self.items.push(item);
        }
        Ok(())
    }

    /// Decrements a line by `quantity`; the line is dropped once it reaches zero.
    /// Returns `false` when no line matches `product_id`.
    pub fn remove_quantity(&mut self, product_id: i32, quantity: u32) -> bool {
        let Some(item) = self.item_mut(product_id) else {
            return false;
        };
        item.quantity = item.quantity.saturating_sub(quantity);
        if item.quantity == 0 {
            self.items.retain(|i| i.product_id != product_id);
        }
        true
    }

    pub fn remove_line(&mut self, product_id: i32) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() != before
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryMethod {
    pub id: i32,
    pub short_name: String,
    #[serde(default)]
    pub delivery_time: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(product_id: i32, quantity: u32) -> CartItem {
        CartItem {
            product_id,
            product_name: format!("Product {product_id}"),
            price: Decimal::from(10),
            picture_url: String::new(),
            brand: "Brand".into(),
            item_type: "Boots".into(),
            quantity,
        }
    }

    #[test]
    fn add_item_merges_existing_line() {
        let mut cart = Cart::with_id("c1");
        cart.add_item(item(1, 2)).unwrap();
        cart.add_item(item(2, 1)).unwrap();
        cart.add_item(item(1, 3)).unwrap();

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.item(1).map(|i| i.quantity), Some(5));
        assert_eq!(cart.items[0].product_id, 1, "insertion order is kept");
    }

    #[test]
    fn add_item_rejects_quantity_overflow() {
        let mut cart = Cart::with_id("c1");
        cart.add_item(item(1, u32::MAX)).unwrap();

        let err = cart.add_item(item(1, 1)).unwrap_err();
        assert!(matches!(err, CartError::BadRequest(_)));
        assert_eq!(cart.item(1).map(|i| i.quantity), Some(u32::MAX));
    }

    #[test]
    fn line_total_reports_overflow() {
        let mut line = item(1, 2);
        line.price = Decimal::MAX;
        assert_eq!(line.line_total(), None);

        line.price = Decimal::from(10);
        assert_eq!(line.line_total(), Some(Decimal::from(20)));
    }

    #[test]
    fn remove_quantity_drops_line_at_zero() {
        let mut cart = Cart::with_id("c1");
        cart.add_item(item(1, 3)).unwrap();

        assert!(cart.remove_quantity(1, 1));
        assert_eq!(cart.item(1).map(|i| i.quantity), Some(2));

        assert!(cart.remove_quantity(1, 5));
        assert!(cart.item(1).is_none());
        assert!(!cart.remove_quantity(1, 1));
    }

    #[test]
    fn cart_uses_wire_field_names() {
        let mut cart = Cart::with_id("abc");
        cart.add_item(item(7, 1)).unwrap();

        let value = serde_json::to_value(&cart).unwrap();
        assert_eq!(value["items"][0]["productId"], 7);
        assert_eq!(value["items"][0]["type"], "Boots");
        assert_eq!(value["items"][0]["price"], json!(10.0));
        assert!(value.get("coupon").is_none());

        let parsed: Cart = serde_json::from_value(json!({
            "id": "abc",
            "items": [{
                "productId": 7,
                "productName": "Product 7",
                "price": 19.99,
                "pictureUrl": "",
                "brand": "Brand",
                "type": "Boots",
                "quantity": 1
            }],
            "coupon": { "code": "SAVE10", "percentOff": 10 }
        }))
        .unwrap();
        assert_eq!(parsed.items[0].price, Decimal::new(1999, 2));
        assert_eq!(
            parsed.coupon.and_then(|c| c.percent_off),
            Some(Decimal::from(10))
        );
    }
}
