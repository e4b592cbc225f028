//! # storefront-db: Database Layer for the Storefront
//!
//! SQLite persistence for the catalog and carts, built on sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  HTTP request (PUT /cart)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  storefront-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ ProductRepo   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ CartRepo      │    │ 001_catalog  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ./storefront.db  (or :memory: in tests)                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Product and cart repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./storefront.db")).await?;
//!
//! let cart = db.carts().get_or_create(None).await?;
//! let cart = db.carts().add_products(cart.id, &inputs).await?;
//! let summary = db.carts().checkout(cart.id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::cart::CartRepository;
pub use repository::product::ProductRepository;
