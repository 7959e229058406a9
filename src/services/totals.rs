//! Pure pricing rules for a cart and its selected delivery method.

use rust_decimal::Decimal;

use crate::{
    dto::cart::CartTotals,
    models::{Cart, Coupon, DeliveryMethod},
};

/// Sum of all line quantities; 0 when there is no cart. Saturates at `u32::MAX`.
pub fn item_count(cart: Option<&Cart>) -> u32 {
    cart.map(|c| {
        c.items
            .iter()
            .fold(0u32, |count, i| count.saturating_add(i.quantity))
    })
    .unwrap_or(0)
}

/// `None` when a line total or the running sum overflows.
pub fn subtotal(cart: &Cart) -> Option<Decimal> {
    cart.items
        .iter()
        .try_fold(Decimal::ZERO, |sum, i| sum.checked_add(i.line_total()?))
}

/// A zero `amount_off` counts as unset, so a coupon carrying both fields
/// falls through to `percent_off`. `None` on overflow.
pub fn discount(coupon: Option<&Coupon>, subtotal: Decimal) -> Option<Decimal> {
    let Some(coupon) = coupon else {
        return Some(Decimal::ZERO);
    };

    if let Some(amount) = coupon.amount_off.filter(|a| !a.is_zero()) {
        return Some(amount);
    }

    match coupon.percent_off.filter(|p| !p.is_zero()) {
        Some(percent) => subtotal.checked_mul(percent.checked_div(Decimal::ONE_HUNDRED)?),
        None => Some(Decimal::ZERO),
    }
}

/// Returns `None` when there is no cart, or when the amounts overflow. The
/// total is not clamped: a discount larger than the subtotal yields a
/// negative total.
pub fn compute_totals(cart: Option<&Cart>, delivery: Option<&DeliveryMethod>) -> Option<CartTotals> {
    let cart = cart?;
    let Some(subtotal) = subtotal(cart) else {
        tracing::warn!(cart_id = %cart.id, "cart subtotal overflows");
        return None;
    };
    let discount = discount(cart.coupon.as_ref(), subtotal)?;
    let shipping = delivery.map(|d| d.price).unwrap_or(Decimal::ZERO);
    let total = subtotal.checked_add(shipping)?.checked_sub(discount)?;

    Some(CartTotals {
        subtotal,
        shipping,
        discount,
        total,
    })
}
