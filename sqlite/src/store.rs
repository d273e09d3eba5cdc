//! The owned storage handle.
//!
//! [`Store`] wraps the one SQLite connection a process uses. It is opened
//! once, ensures the tables exist, and is released when dropped. The
//! repository operations live in `impl Store` blocks in the `users`,
//! `products`, and `orders` modules.

use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::error::Result;
use crate::schema::ensure_schema;

/// Handle to the commerce database.
///
/// Every write operation takes `&mut self`, runs in its own transaction,
/// and commits before returning, so callers never observe a partial write.
///
/// # Examples
///
/// ```
/// use commerce_sqlite::Store;
///
/// let mut store = Store::open_in_memory().unwrap();
/// let user = store.create_user("alice", "a@x.com", "pw1").unwrap();
/// let found = store.get_user_by_username("alice").unwrap();
/// assert_eq!(found, user);
/// ```
pub struct Store {
    pub(crate) conn: Connection,
}

impl Store {
    /// Opens (or creates) the database file at `path` and ensures the schema.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DatabaseError`](crate::StoreError::DatabaseError)
    /// if the file cannot be opened, or
    /// [`StoreError::MigrationError`](crate::StoreError::MigrationError) if the
    /// tables cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening database");
        Self::from_connection(Connection::open(path)?)
    }

    /// Opens a private in-memory database with the schema in place.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Takes ownership of an existing connection and ensures the schema.
    ///
    /// Foreign-key enforcement is switched off on the connection; references
    /// are checked by the repository operations instead.
    pub fn from_connection(mut conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = OFF;")?;
        ensure_schema(&mut conn)?;
        Ok(Self { conn })
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tables_exist;

    #[test]
    fn test_open_in_memory_creates_tables() {
        let store = Store::open_in_memory().unwrap();
        assert!(tables_exist(store.connection()).unwrap());
    }

    #[test]
    fn test_from_connection_disables_foreign_keys() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        let store = Store::from_connection(conn).unwrap();
        let enabled: i64 = store
            .connection()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 0);
    }
}
