//! # Validation Module
//!
//! Input validation utilities for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractors (axum)                                       │
//! │  └── Type validation (JSON deserialization, path ids)                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Product name / price rules                                        │
//! │  ├── Search term rules                                                 │
//! │  └── Pagination parsing (start / count)                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK (price_cents >= 0)                               │
//! │  └── PRIMARY KEY (cart_id, product_id)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_product_name, Pagination};
//!
//! validate_product_name("Green Tea").unwrap();
//!
//! let page = Pagination::parse(None, Some("25")).unwrap();
//! assert_eq!((page.offset, page.limit), (0, 25));
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::ProductInput;
use crate::{DEFAULT_PAGE_SIZE, MAX_PRICE_CENTS, MAX_PRODUCT_NAME_LEN, MAX_SEARCH_QUERY_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Product Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative; zero is allowed (free items)
/// - At most [`MAX_PRICE_CENTS`]
///
/// ## Example
/// ```rust
/// use storefront_core::money::Money;
/// use storefront_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// assert!(validate_price(Money::from_cents(i64::MAX)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates the name and price of a product about to be written.
pub fn validate_product_input(input: &ProductInput) -> ValidationResult<()> {
    validate_product_name(&input.name)?;
    validate_price(input.price)
}

/// Validates a search term.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 100 characters
///
/// ## Returns
/// The trimmed search term.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.is_empty() {
        return Err(ValidationError::Required {
            field: "q".to_string(),
        });
    }

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "q".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Pagination
// =============================================================================

/// Offset/limit window for product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Creates a window from already-typed values.
    pub fn new(offset: u32, limit: u32) -> Self {
        Pagination { offset, limit }
    }

    /// Parses raw `start` / `count` query values.
    ///
    /// ## Rules
    /// - Omitted (or blank) `start` → 0, omitted `count` → 10
    /// - Supplied values must parse as non-negative integers
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::validation::Pagination;
    ///
    /// assert_eq!(Pagination::parse(None, None).unwrap(), Pagination::new(0, 10));
    /// assert_eq!(Pagination::parse(Some("10"), Some("5")).unwrap(), Pagination::new(10, 5));
    /// assert!(Pagination::parse(Some("-1"), None).is_err());
    /// assert!(Pagination::parse(None, Some("ten")).is_err());
    /// ```
    pub fn parse(start: Option<&str>, count: Option<&str>) -> ValidationResult<Self> {
        let defaults = Pagination::default();

        Ok(Pagination {
            offset: parse_non_negative("start", start)?.unwrap_or(defaults.offset),
            limit: parse_non_negative("count", count)?.unwrap_or(defaults.limit),
        })
    }
}

fn parse_non_negative(field: &str, raw: Option<&str>) -> ValidationResult<Option<u32>> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };

    raw.parse::<u32>()
        .map(Some)
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a non-negative integer".to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Green Tea 500g").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(200)).is_ok());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_cents(0)).is_ok());
        assert!(validate_price(Money::from_cents(999)).is_ok());
        assert!(validate_price(Money::from_cents(-1)).is_err());
        assert!(validate_price(Money::from_cents(MAX_PRICE_CENTS)).is_ok());
        assert!(validate_price(Money::from_cents(MAX_PRICE_CENTS + 1)).is_err());
        assert!(validate_price(Money::from_cents(6_000_000_000_000_000_000)).is_err());
    }

    #[test]
    fn test_validate_product_input() {
        assert!(validate_product_input(&ProductInput::new("Mug", Money::from_cents(1200))).is_ok());
        assert!(validate_product_input(&ProductInput::new("", Money::from_cents(1200))).is_err());
        assert!(validate_product_input(&ProductInput::new("Mug", Money::from_cents(-5))).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  tea ").unwrap(), "tea");
        assert!(validate_search_query("").is_err());
        assert!(validate_search_query("   ").is_err());
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }

    #[test]
    fn test_pagination_defaults() {
        assert_eq!(Pagination::parse(None, None).unwrap(), Pagination::new(0, 10));
        assert_eq!(Pagination::parse(Some(""), Some(" ")).unwrap(), Pagination::default());
    }

    #[test]
    fn test_pagination_parses_supplied_values() {
        assert_eq!(
            Pagination::parse(Some("10"), Some("10")).unwrap(),
            Pagination::new(10, 10)
        );
        assert_eq!(Pagination::parse(Some("0"), Some("0")).unwrap(), Pagination::new(0, 0));
    }

    #[test]
    fn test_pagination_rejects_bad_values() {
        let err = Pagination::parse(Some("abc"), None).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { ref field, .. } if field == "start"));

        let err = Pagination::parse(None, Some("-3")).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { ref field, .. } if field == "count"));

        assert!(Pagination::parse(Some("1.5"), None).is_err());
    }
}
