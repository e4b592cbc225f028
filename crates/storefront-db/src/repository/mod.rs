//! # Repository Module
//!
//! Database repository implementations for the storefront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layout                                    │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.carts().add_products(cart_id, &inputs)                     │
//! │       ▼                                                                 │
//! │  CartRepository ────────────uses────────────► product helpers          │
//! │  ├── get_or_create / get_cart / create        ├── insert_or_get_in     │
//! │  ├── add_products / remove_products / clear   └── fetch_by_ids_in      │
//! │  └── checkout                                                          │
//! │                                                                         │
//! │  ProductRepository                                                     │
//! │  ├── create / get_by_id / update / delete                              │
//! │  ├── list / search / count                                             │
//! │  └── get_by_id_list / insert_or_get                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Catalog CRUD and search
//! - [`CartRepository`](cart::CartRepository) - Carts, links and checkout

//!
//! ## Write Transactions
//! Transactions that may write start with [`begin_write`], so they hold
//! SQLite's write lock from the first statement and concurrent writers
//! queue on the busy timeout instead of failing mid-transaction.

use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::error::DbResult;

pub mod cart;
pub mod product;

/// Ids bound per `IN (...)` statement; SQLite caps bound parameters.
pub(crate) const ID_CHUNK_SIZE: usize = 500;

/// Starts a transaction that holds the write lock from the start.
pub(crate) async fn begin_write(pool: &SqlitePool) -> DbResult<Transaction<'static, Sqlite>> {
    Ok(pool.begin_with("BEGIN IMMEDIATE").await?)
}
