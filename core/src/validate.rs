//! Coercion of textual command arguments into typed values.
//!
//! Both command interfaces receive ids, prices, and quantities as text.
//! These parsers turn them into typed values up front so that a malformed
//! argument is reported before any storage call runs.
//!
//! # Examples
//!
//! ```
//! use commerce_core::*;
//!
//! assert_eq!(parse_id("42").unwrap(), 42);
//! assert_eq!(parse_price(" 9.99 ").unwrap(), 9.99);
//! assert_eq!(parse_quantity("3").unwrap(), 3);
//!
//! assert!(matches!(parse_price("abc"), Err(ValidationError::InvalidPrice(_))));
//! assert!(matches!(parse_quantity("0"), Err(ValidationError::NonPositiveQuantity(0))));
//! ```

use thiserror::Error;

/// Argument coercion errors.
///
/// Each variant carries the offending input so the `Display` impl can
/// echo it back to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Text is not a base-10 integer.
    #[error("invalid integer: '{0}'")]
    InvalidInteger(String),
    /// Text is not a finite decimal number.
    #[error("invalid price: '{0}'")]
    InvalidPrice(String),
    /// Price parsed but is below zero.
    #[error("price cannot be negative: {0}")]
    NegativePrice(f64),
    /// Quantity parsed but is zero or negative.
    #[error("quantity must be positive: {0}")]
    NonPositiveQuantity(i64),
    /// Record id parsed but is zero or negative.
    #[error("id must be positive: {0}")]
    NonPositiveId(i64),
}

fn parse_integer(raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidInteger(trimmed.to_string()))
}

/// Parses a record id. Ids are SQLite rowids and therefore positive.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidInteger`] for non-numeric input and
/// [`ValidationError::NonPositiveId`] for zero or negative values.
pub fn parse_id(raw: &str) -> Result<i64, ValidationError> {
    let id = parse_integer(raw)?;
    if id <= 0 {
        return Err(ValidationError::NonPositiveId(id));
    }
    Ok(id)
}

/// Parses a line item quantity.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidInteger`] for non-numeric input and
/// [`ValidationError::NonPositiveQuantity`] for zero or negative values.
pub fn parse_quantity(raw: &str) -> Result<i64, ValidationError> {
    let quantity = parse_integer(raw)?;
    if quantity <= 0 {
        return Err(ValidationError::NonPositiveQuantity(quantity));
    }
    Ok(quantity)
}

/// Parses a product price.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPrice`] for non-numeric, infinite, or
/// NaN input and [`ValidationError::NegativePrice`] for values below zero.
pub fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    let price = trimmed
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .ok_or_else(|| ValidationError::InvalidPrice(trimmed.to_string()))?;
    if price < 0.0 {
        return Err(ValidationError::NegativePrice(price));
    }
    // Collapses `-0.0` to `0.0`.
    Ok(price + 0.0)
}
