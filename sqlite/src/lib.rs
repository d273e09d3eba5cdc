//! SQLite storage backend for the commerce store.
//!
//! This crate persists users, products, orders, and order line items in a
//! single SQLite file and exposes the repository operations over them.
//!
//! # Architecture
//!
//! - **`schema`**: table definitions, created on open if absent
//! - **`convert`**: SQL row → record conversions
//! - **`store`**: [`Store`], the owned connection handle
//! - **`users`**, **`products`**, **`orders`**: repository operations
//!
//! # Quick start
//!
//! ```
//! use commerce_sqlite::Store;
//!
//! let mut store = Store::open_in_memory().unwrap();
//! let alice = store.create_user("alice", "a@x.com", "pw1").unwrap();
//! let widget = store.create_product("Widget", 2.5).unwrap();
//! let order = store.create_order(&alice).unwrap();
//! store.add_product_to_order(order.id, widget.id, 4).unwrap();
//!
//! assert_eq!(store.calculate_order_total(order.id).unwrap(), 10.0);
//! ```
//!
//! # Referential integrity
//!
//! Inserts check that referenced users, orders, and products exist and fail
//! with [`StoreError::NotFound`] otherwise. Deleting a user does not cascade:
//! that user's orders remain and keep the dangling `user_id`.

mod convert;
mod error;
mod orders;
mod products;
pub mod schema;
mod store;
mod users;

pub use error::{Result, StoreError};
pub use store::Store;
