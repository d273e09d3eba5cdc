//! Order total computation.

use crate::LineItemDetail;

/// Sums `unit_price * quantity` across the given line items.
///
/// Returns `0.0` for an order without line items. The sum is a single
/// linear pass with no rounding beyond `f64` arithmetic.
///
/// # Examples
///
/// ```
/// use commerce_core::{LineItemDetail, order_total};
///
/// let items = vec![
///     LineItemDetail {
///         line_item_id: 1,
///         product_id: 1,
///         product_name: "Bolt".into(),
///         unit_price: 10.0,
///         quantity: 2,
///     },
///     LineItemDetail {
///         line_item_id: 2,
///         product_id: 2,
///         product_name: "Nut".into(),
///         unit_price: 5.5,
///         quantity: 1,
///     },
/// ];
/// assert_eq!(order_total(&items), 25.5);
/// assert_eq!(order_total(&[]), 0.0);
/// ```
pub fn order_total(items: &[LineItemDetail]) -> f64 {
    items.iter().map(LineItemDetail::subtotal).sum()
}
