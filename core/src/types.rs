//! Record type definitions for the commerce data model.
//!
//! This module defines the four persisted records ([`User`], [`Product`],
//! [`Order`], [`OrderLineItem`]) together with the input and view types the
//! storage layer and command interface exchange. The types are designed for
//! serialization with [`serde`] so they can be printed as JSON or YAML.

use serde::{Deserialize, Serialize};

/// A registered customer.
///
/// `username` and `email` are each unique across all users; the storage
/// layer rejects duplicates with a constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Auto-assigned row id.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Stored as given; no hashing is applied.
    pub password: String,
}

/// Partial update for a [`User`].
///
/// Fields set to `None` are left untouched. Empty strings are treated the
/// same as `None`, which lets the interactive menu use a blank line to mean
/// "keep the current value".
///
/// # Examples
///
/// ```
/// use commerce_core::UserUpdate;
///
/// let update = UserUpdate::password("s3cret");
/// assert_eq!(update.password.as_deref(), Some("s3cret"));
/// assert!(update.username.is_none());
///
/// let blank = UserUpdate {
///     username: Some(String::new()),
///     ..UserUpdate::default()
/// };
/// assert!(blank.normalized().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UserUpdate {
    /// Creates an update that only changes the password.
    pub fn password(password: impl Into<String>) -> Self {
        Self {
            password: Some(password.into()),
            ..Self::default()
        }
    }

    /// Returns a copy with empty strings collapsed to `None`.
    pub fn normalized(&self) -> Self {
        fn keep(value: &Option<String>) -> Option<String> {
            value.as_ref().filter(|v| !v.is_empty()).cloned()
        }
        Self {
            username: keep(&self.username),
            email: keep(&self.email),
            password: keep(&self.password),
        }
    }

    /// Returns `true` if no field would be changed.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password.is_none()
    }
}

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Auto-assigned row id.
    pub id: i64,
    pub name: String,
    /// Unit price, non-negative.
    pub price: f64,
}

/// An order placed by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Auto-assigned row id.
    pub id: i64,
    /// Id of the owning [`User`]. May dangle after the user is deleted.
    pub user_id: i64,
}

/// A (product, quantity) pairing attached to one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    /// Auto-assigned row id.
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    /// Always positive.
    pub quantity: i64,
}

/// A line item joined with the product it references.
///
/// # Examples
///
/// ```
/// use commerce_core::LineItemDetail;
///
/// let item = LineItemDetail {
///     line_item_id: 1,
///     product_id: 7,
///     product_name: "Widget".into(),
///     unit_price: 2.5,
///     quantity: 4,
/// };
/// assert_eq!(item.subtotal(), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemDetail {
    pub line_item_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub unit_price: f64,
    pub quantity: i64,
}

impl LineItemDetail {
    /// Returns `unit_price * quantity`.
    pub fn subtotal(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// An order together with its resolved line items and total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order: Order,
    pub items: Vec<LineItemDetail>,
    pub total: f64,
}

impl OrderSummary {
    /// Builds a summary, computing the total from `items`.
    pub fn new(order: Order, items: Vec<LineItemDetail>) -> Self {
        let total = crate::order_total(&items);
        Self { order, items, total }
    }
}
