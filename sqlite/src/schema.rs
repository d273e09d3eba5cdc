//! Table definitions for the commerce store.
//!
//! The schema consists of 4 tables:
//!
//! - `users`: customers, unique on `username` and on `email`
//! - `products`: catalogue entries with a non-negative `price`
//! - `orders`: one row per order, owned by a user
//! - `order_line_items`: (product, quantity) pairs attached to an order
//!
//! Foreign keys are declared but SQLite's enforcement is left off.
//! The repository checks references itself so that a missing record surfaces
//! as [`StoreError::NotFound`](crate::StoreError::NotFound), and deleting a
//! user leaves that user's orders in place.

use rusqlite::Connection;
use tracing::debug;

use crate::error::{Result, StoreError};

/// Names of every table, in creation order.
pub const TABLES: [&str; 4] = ["users", "products", "orders", "order_line_items"];

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    price REAL NOT NULL CHECK (price >= 0)
);

CREATE TABLE IF NOT EXISTS orders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id)
);

CREATE TABLE IF NOT EXISTS order_line_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id INTEGER NOT NULL,
    product_id INTEGER NOT NULL,
    quantity INTEGER NOT NULL CHECK (quantity > 0),
    FOREIGN KEY (order_id) REFERENCES orders(id),
    FOREIGN KEY (product_id) REFERENCES products(id)
);

CREATE INDEX IF NOT EXISTS idx_orders_user ON orders(user_id);
CREATE INDEX IF NOT EXISTS idx_order_line_items_order ON order_line_items(order_id);
CREATE INDEX IF NOT EXISTS idx_order_line_items_product ON order_line_items(product_id);
"#;

/// Creates all tables and indexes that do not exist yet.
///
/// Uses `CREATE TABLE IF NOT EXISTS` so it is safe to call on every start.
/// Executes within a transaction for atomicity.
///
/// # Errors
///
/// Returns [`StoreError::MigrationError`] if the script fails.
pub fn ensure_schema(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)
        .map_err(|e| StoreError::MigrationError(format!("failed to create tables: {e}")))?;
    tx.commit()?;
    debug!("schema ensured");
    Ok(())
}

/// Checks whether all four tables are present.
pub fn tables_exist(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1")?;
    for table in TABLES {
        let count: i64 = stmt.query_row([table], |row| row.get(0))?;
        if count == 0 {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_sql_contains_tables() {
        for table in TABLES {
            assert!(SCHEMA_SQL.contains(&format!("CREATE TABLE IF NOT EXISTS {table}")));
        }
    }

    #[test]
    fn test_tables_missing_on_empty_database() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(!tables_exist(&conn).unwrap());
    }

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        ensure_schema(&mut conn).unwrap();
        ensure_schema(&mut conn).unwrap();
        assert!(tables_exist(&conn).unwrap());
    }

    #[test]
    fn test_check_constraints_reject_bad_rows() {
        let mut conn = Connection::open_in_memory().unwrap();
        ensure_schema(&mut conn).unwrap();

        assert!(
            conn.execute("INSERT INTO products (name, price) VALUES ('x', -1.0)", [])
                .is_err()
        );
        assert!(
            conn.execute(
                "INSERT INTO order_line_items (order_id, product_id, quantity) VALUES (1, 1, 0)",
                [],
            )
            .is_err()
        );
    }

    #[test]
    fn test_foreign_keys_not_enforced() {
        let mut conn = Connection::open_in_memory().unwrap();
        ensure_schema(&mut conn).unwrap();

        // Dangling user ids are representable; the repository guards inserts.
        assert!(
            conn.execute("INSERT INTO orders (user_id) VALUES (999)", [])
                .is_ok()
        );
    }
}
