//! Core record types and shared primitives for the commerce store.
//!
//! This crate defines the data model shared by the storage layer and the
//! command interface:
//!
//! - [`User`], [`Product`], [`Order`], [`OrderLineItem`]: the four
//!   persisted records.
//! - [`UserUpdate`]: a partial update for a user.
//! - [`LineItemDetail`] and [`OrderSummary`]: read-side views joining line
//!   items with their products.
//!
//! [`order_total`] computes the price of an order from its line items, and
//! the `parse_*` functions coerce textual arguments into typed values,
//! failing with [`ValidationError`].
//!
//! # Example
//!
//! ```
//! use commerce_core::*;
//!
//! let order = Order { id: 1, user_id: 1 };
//! let items = vec![LineItemDetail {
//!     line_item_id: 1,
//!     product_id: 1,
//!     product_name: "Widget".into(),
//!     unit_price: 2.0,
//!     quantity: parse_quantity("3").unwrap(),
//! }];
//!
//! let summary = OrderSummary::new(order, items);
//! assert_eq!(summary.total, 6.0);
//! ```

mod total;
mod types;
mod validate;

pub use total::order_total;
pub use types::*;
pub use validate::{ValidationError, parse_id, parse_price, parse_quantity};
