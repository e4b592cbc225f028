//! # storefront-core: Pure Domain Logic for the Storefront
//!
//! This crate holds the catalog and cart domain as plain data and pure
//! functions. Nothing here touches the database or the network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 storefront-api (axum HTTP)                      │   │
//! │  │   /products  /product/{id}  /cart  /cart/{id}/checkout          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                storefront-db (SQLite stores)                    │   │
//! │  │         ProductRepository • CartRepository • migrations         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ checkout  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ subtotal  │  │ name/price│  │   │
//! │  │   │   Cart    │  │  decimal  │  │  summary  │  │ paging    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Cart, CartStatus)
//! - [`money`] - Money type with checked integer arithmetic
//! - [`checkout`] - Subtotal computation and the checkout summary
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation and pagination parsing
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::money::Money;
//!
//! let a = Money::from_cents(999);
//! let b = Money::from_cents(500);
//! let subtotal = Money::checked_sum([a, b]).unwrap();
//!
//! assert_eq!(subtotal.cents(), 1499);
//! assert_eq!(subtotal.to_string(), "$14.99");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::CheckoutSummary;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
pub use validation::Pagination;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Page size used by product listing when the caller omits `count`.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Highest accepted unit price, in cents ($100,000,000.00).
///
/// Keeps any realistic cart subtotal far inside i64.
pub const MAX_PRICE_CENTS: i64 = 10_000_000_000;

/// Maximum length of a product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Maximum length of a product search term.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;
