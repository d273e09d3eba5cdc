//! Conversion between SQLite rows and record types.
//!
//! Each `*_from_row` function expects the columns in the order given by the
//! matching `*_COLUMNS` constant, so queries select through those constants
//! rather than `*`.

use commerce_core::{LineItemDetail, Order, OrderLineItem, Product, User};
use rusqlite::{Connection, Row, params};

use crate::error::Result;

pub(crate) const USER_COLUMNS: &str = "id, username, email, password";
pub(crate) const PRODUCT_COLUMNS: &str = "id, name, price";
pub(crate) const ORDER_COLUMNS: &str = "id, user_id";
pub(crate) const LINE_ITEM_COLUMNS: &str = "id, order_id, product_id, quantity";

pub(crate) fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
    })
}

pub(crate) fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        price: row.get(2)?,
    })
}

pub(crate) fn order_from_row(row: &Row<'_>) -> rusqlite::Result<Order> {
    Ok(Order {
        id: row.get(0)?,
        user_id: row.get(1)?,
    })
}

pub(crate) fn line_item_from_row(row: &Row<'_>) -> rusqlite::Result<OrderLineItem> {
    Ok(OrderLineItem {
        id: row.get(0)?,
        order_id: row.get(1)?,
        product_id: row.get(2)?,
        quantity: row.get(3)?,
    })
}

/// Joined line item/product query, filtered by order id.
pub(crate) const LINE_ITEM_DETAIL_QUERY: &str = "\
    SELECT li.id, li.product_id, p.name, p.price, li.quantity \
    FROM order_line_items li \
    JOIN products p ON p.id = li.product_id \
    WHERE li.order_id = ?1 \
    ORDER BY li.id";

pub(crate) fn line_item_detail_from_row(row: &Row<'_>) -> rusqlite::Result<LineItemDetail> {
    Ok(LineItemDetail {
        line_item_id: row.get(0)?,
        product_id: row.get(1)?,
        product_name: row.get(2)?,
        unit_price: row.get(3)?,
        quantity: row.get(4)?,
    })
}

/// Returns whether `table` holds a row with the given id.
///
/// `table` is always one of the fixed names in [`crate::schema::TABLES`].
pub(crate) fn row_exists(conn: &Connection, table: &str, id: i64) -> Result<bool> {
    let exists = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1)"),
        params![id],
        |row| row.get::<_, bool>(0),
    )?;
    Ok(exists)
}
