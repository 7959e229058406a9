use rust_decimal::Decimal;
use serde::Serialize;

/// Monetary breakdown derived from a cart and the selected delivery method.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub cart_id: Option<String>,
    pub item_count: u32,
    pub totals: Option<CartTotals>,
}
