//! Error types for storage operations.
//!
//! Provides a unified error type covering database access, constraint
//! violations, missing records, and schema creation.

use rusqlite::ErrorCode;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite database operation failure.
    #[error("database error: {0}")]
    DatabaseError(rusqlite::Error),

    /// A write would break a uniqueness or check constraint.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// A lookup by id or username matched no record.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// Kind of record that was looked up (`user`, `product`, `order`).
        entity: &'static str,
        /// The id or username that failed to resolve.
        key: String,
    },

    /// The tables could not be created.
    #[error("migration error: {0}")]
    MigrationError(String),
}

impl StoreError {
    pub(crate) fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Returns `true` for [`StoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` for [`StoreError::ConstraintViolation`].
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ref failure, ref message)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                Self::ConstraintViolation(
                    message.clone().unwrap_or_else(|| failure.to_string()),
                )
            }
            other => Self::DatabaseError(other),
        }
    }
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
