//! # Database Migrations
//!
//! Embedded SQL migrations for the storefront schema.
//!
//! ## Schema
//! ```text
//! ┌──────────────────────┐        ┌────────────────────────┐
//! │       products       │        │         carts          │
//! │  id          PK      │        │  id             PK     │
//! │  name        TEXT    │        │  created_timestamp     │
//! │  price_cents INTEGER │        │  modification_timestamp│
//! └──────────┬───────────┘        │  checked_out    BOOL   │
//!            │                    └───────────┬────────────┘
//!            │      ┌──────────────────────┐  │
//!            └─────►│    cart_products     │◄─┘ ON DELETE CASCADE
//!                   │  cart_id    ─┐ PK    │
//!                   │  product_id ─┘       │
//!                   └──────────────────────┘
//! ```
//!
//! `cart_products.product_id` has no foreign key: deleting a product
//! leaves its links behind and cart hydration skips them.
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNN_description.sql`
//! 3. **NEVER** modify existing migrations - always add new ones

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
///
/// ## Safety
/// - Idempotent: safe to run multiple times
/// - Transactional: each migration runs in a transaction
/// - Ordered: migrations run in filename order (001, 002, ...)
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns `(total_migrations, applied_migrations)`.
///
/// Used by the seed binary to report schema state.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((total, applied as usize))
}
