//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Domain rule violations                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront-db errors (separate crate)                                 │
//! │  └── DbError          - Database failures, wraps CoreError             │
//! │                                                                         │
//! │  storefront-api errors (in app)                                        │
//! │  └── ApiError         - What HTTP clients see (status + JSON)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Mutation attempted on a finalized cart.
    ///
    /// ## When This Occurs
    /// - Adding, removing or clearing products after checkout
    /// - Checking out the same cart twice
    #[error("Cart {cart_id} is already checked out")]
    CartCheckedOut { cart_id: i64 },

    /// The cart's prices add up to more than a `Money` can hold.
    ///
    /// Only reachable for prices written outside the validated paths.
    #[error("Cart {cart_id} subtotal is too large")]
    SubtotalOverflow { cart_id: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any SQL runs, so a bad request never half-applies.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. a non-numeric page offset).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
