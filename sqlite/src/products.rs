//! Product repository operations.

use commerce_core::Product;
use rusqlite::{OptionalExtension, params};
use tracing::{debug, info};

use crate::convert::{PRODUCT_COLUMNS, product_from_row};
use crate::error::{Result, StoreError};
use crate::store::Store;

impl Store {
    /// Inserts a new product.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ConstraintViolation`] if `price` is negative.
    pub fn create_product(&mut self, name: &str, price: f64) -> Result<Product> {
        // SQLite stores `-0.0` as `0.0`; return what was stored.
        let price = price + 0.0;
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO products (name, price) VALUES (?1, ?2)",
            params![name, price],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        info!(product_id = id, name, price, "created product");
        Ok(Product {
            id,
            name: name.to_string(),
            price,
        })
    }

    /// Loads a product by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no product has this id.
    pub fn get_product(&self, id: i64) -> Result<Product> {
        debug!(product_id = id, "loading product");
        self.conn
            .query_row(
                &format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"),
                params![id],
                product_from_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::not_found("product", id))
    }

    /// Returns every product, ordered by id.
    pub fn list_products(&self) -> Result<Vec<Product>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"))?;
        let products = stmt
            .query_map([], product_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(products)
    }
}
