//! Order and line item repository operations.

use commerce_core::{LineItemDetail, Order, OrderLineItem, OrderSummary, User, order_total};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info};

use crate::convert::{
    LINE_ITEM_COLUMNS, LINE_ITEM_DETAIL_QUERY, ORDER_COLUMNS, line_item_detail_from_row,
    line_item_from_row, order_from_row, row_exists,
};
use crate::error::{Result, StoreError};
use crate::store::Store;

fn require(conn: &Connection, table: &str, entity: &'static str, id: i64) -> Result<()> {
    if row_exists(conn, table, id)? {
        Ok(())
    } else {
        Err(StoreError::not_found(entity, id))
    }
}

fn insert_order(conn: &Connection, user_id: i64) -> Result<Order> {
    conn.execute("INSERT INTO orders (user_id) VALUES (?1)", params![user_id])?;
    Ok(Order {
        id: conn.last_insert_rowid(),
        user_id,
    })
}

fn insert_line_item(
    conn: &Connection,
    order_id: i64,
    product_id: i64,
    quantity: i64,
) -> Result<OrderLineItem> {
    conn.execute(
        "INSERT INTO order_line_items (order_id, product_id, quantity) VALUES (?1, ?2, ?3)",
        params![order_id, product_id, quantity],
    )?;
    Ok(OrderLineItem {
        id: conn.last_insert_rowid(),
        order_id,
        product_id,
        quantity,
    })
}

fn load_items(conn: &Connection, order_id: i64) -> Result<Vec<LineItemDetail>> {
    let mut stmt = conn.prepare(LINE_ITEM_DETAIL_QUERY)?;
    let items = stmt
        .query_map(params![order_id], line_item_detail_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(items)
}

impl Store {
    /// Creates an empty order for an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the user does not exist.
    pub fn create_order(&mut self, user: &User) -> Result<Order> {
        let tx = self.conn.transaction()?;
        require(&tx, "users", "user", user.id)?;
        let order = insert_order(&tx, user.id)?;
        tx.commit()?;

        info!(order_id = order.id, user_id = user.id, "created order");
        Ok(order)
    }

    /// Creates an order holding a single line item.
    ///
    /// The order and its line item are written in one transaction, so
    /// nothing is stored when the user or product is missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the user or product does not
    /// exist, or [`StoreError::ConstraintViolation`] if `quantity` is not
    /// positive.
    pub fn place_order(
        &mut self,
        user_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> Result<(Order, OrderLineItem)> {
        let tx = self.conn.transaction()?;
        require(&tx, "users", "user", user_id)?;
        require(&tx, "products", "product", product_id)?;
        let order = insert_order(&tx, user_id)?;
        let item = insert_line_item(&tx, order.id, product_id, quantity)?;
        tx.commit()?;

        info!(order_id = order.id, user_id, product_id, quantity, "placed order");
        Ok((order, item))
    }

    /// Attaches `quantity` units of a product to an existing order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the order or product does not
    /// exist; no line item is written in that case.
    pub fn add_product_to_order(
        &mut self,
        order_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> Result<OrderLineItem> {
        let tx = self.conn.transaction()?;
        require(&tx, "orders", "order", order_id)?;
        require(&tx, "products", "product", product_id)?;
        let item = insert_line_item(&tx, order_id, product_id, quantity)?;
        tx.commit()?;

        info!(
            line_item_id = item.id,
            order_id, product_id, quantity, "added product to order"
        );
        Ok(item)
    }

    /// Loads an order by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no order has this id.
    pub fn get_order(&self, id: i64) -> Result<Order> {
        debug!(order_id = id, "loading order");
        self.conn
            .query_row(
                &format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"),
                params![id],
                order_from_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::not_found("order", id))
    }

    /// Returns every order, ordered by id.
    ///
    /// Orders whose user was deleted are included.
    pub fn list_orders(&self) -> Result<Vec<Order>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY id"))?;
        let orders = stmt
            .query_map([], order_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(orders)
    }

    /// Returns the raw line item rows of an order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the order does not exist.
    pub fn line_items(&self, order_id: i64) -> Result<Vec<OrderLineItem>> {
        require(&self.conn, "orders", "order", order_id)?;
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {LINE_ITEM_COLUMNS} FROM order_line_items WHERE order_id = ?1 ORDER BY id"
        ))?;
        let items = stmt
            .query_map(params![order_id], line_item_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Returns an order's line items joined with their products.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the order does not exist.
    pub fn order_items(&self, order_id: i64) -> Result<Vec<LineItemDetail>> {
        require(&self.conn, "orders", "order", order_id)?;
        load_items(&self.conn, order_id)
    }

    /// Sums `price * quantity` over the order's line items.
    ///
    /// Returns `0.0` for an order without line items.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the order does not exist.
    pub fn calculate_order_total(&self, order_id: i64) -> Result<f64> {
        let items = self.order_items(order_id)?;
        let total = order_total(&items);
        debug!(order_id, items = items.len(), total, "calculated order total");
        Ok(total)
    }

    /// Loads an order with its line items and total.
    pub fn order_summary(&self, order_id: i64) -> Result<OrderSummary> {
        let order = self.get_order(order_id)?;
        let items = load_items(&self.conn, order.id)?;
        Ok(OrderSummary::new(order, items))
    }

    /// Loads every order with its line items and total.
    pub fn list_order_summaries(&self) -> Result<Vec<OrderSummary>> {
        let orders = self.list_orders()?;
        let mut summaries = Vec::with_capacity(orders.len());
        for order in orders {
            let items = load_items(&self.conn, order.id)?;
            summaries.push(OrderSummary::new(order, items));
        }
        Ok(summaries)
    }
}
