//! # Cart Repository
//!
//! Database operations for carts, their product links and checkout.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Lifecycle                                    │
//! │                                                                         │
//! │  1. CREATE                                                             │
//! │     └── create() / get_or_create() → Cart { checked_out: false }       │
//! │     └── add_to_cart(None, ..)      → create + add, one transaction     │
//! │                                                                         │
//! │  2. MUTATE (only while open)                                           │
//! │     └── add_products()    → insert-or-get, link, touch                 │
//! │     └── remove_products() → unlink from THIS cart, touch               │
//! │     └── clear()           → unlink everything, touch                   │
//! │                                                                         │
//! │  3. CHECKOUT                                                           │
//! │     └── checkout() → CheckoutSummary, Cart { checked_out: true }       │
//! │                                                                         │
//! │  Any mutation after step 3 fails with CoreError::CartCheckedOut.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Transactions
//! Every public operation runs in a single transaction. Inside it, all
//! statements go through the transaction's connection, never the pool:
//! an in-memory database has exactly one connection. Operations that may
//! write open it with [`begin_write`], so concurrent carts wait for the
//! write lock instead of failing on a stale read.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::product::{fetch_by_ids_in, insert_or_get_in};
use crate::repository::{begin_write, ID_CHUNK_SIZE};
use storefront_core::{Cart, CheckoutSummary, ProductInput};

/// Repository for cart database operations.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    /// Creates a new CartRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// Loads an existing cart, or creates a fresh one.
    ///
    /// ## Behavior
    /// - `None` always creates a new empty cart
    /// - `Some(id)` loads that cart; if it doesn't exist a new one is created
    /// - Any other failure (e.g. the database is down) is returned as-is
    pub async fn get_or_create(&self, cart_id: Option<i64>) -> DbResult<Cart> {
        let mut tx = begin_write(&self.pool).await?;

        let cart = get_or_create_in(&mut *tx, cart_id).await?;

        tx.commit().await?;
        Ok(cart)
    }

    /// Adds products to a named cart, or to a new one.
    ///
    /// `get_or_create` followed by `add_products`, in one transaction: if
    /// the add is refused, a cart created for it is rolled back too.
    ///
    /// ## Errors
    /// * `DbError::Domain(CartCheckedOut)` - The named cart is checked out
    /// * `DbError::Domain(Validation)` - A product had to be inserted and is invalid
    pub async fn add_to_cart(
        &self,
        cart_id: Option<i64>,
        products: &[ProductInput],
    ) -> DbResult<Cart> {
        let mut tx = begin_write(&self.pool).await?;

        let cart = get_or_create_in(&mut *tx, cart_id).await?;
        let cart = add_in(&mut *tx, cart, products).await?;

        tx.commit().await?;
        Ok(cart)
    }

    /// Gets a cart with its products.
    ///
    /// ## Returns
    /// * `Ok(Cart)` - Products ordered by id; links to deleted products are skipped
    /// * `Err(DbError::NotFound)` - No cart with that id
    pub async fn get_cart(&self, cart_id: i64) -> DbResult<Cart> {
        let mut tx = self.pool.begin().await?;

        let cart = load_in(&mut *tx, cart_id).await?;

        tx.commit().await?;
        Ok(cart)
    }

    /// Creates an open cart linked to the given product ids.
    ///
    /// Ids are linked as given, without insert-or-get.
    pub async fn create(&self, product_ids: &[i64]) -> DbResult<Cart> {
        let mut tx = begin_write(&self.pool).await?;

        let cart = create_in(&mut *tx, product_ids).await?;

        tx.commit().await?;
        Ok(cart)
    }

    /// Adds products to an open cart.
    ///
    /// ## What This Does
    /// 1. Resolves each input through insert-or-get
    /// 2. Links the resolved ids (already linked ids are ignored)
    /// 3. Bumps `modification_timestamp`
    /// 4. Returns the cart as now stored
    ///
    /// An empty `products` list changes nothing and returns the cart.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - Unknown cart
    /// * `DbError::Domain(CartCheckedOut)` - Cart already checked out
    pub async fn add_products(&self, cart_id: i64, products: &[ProductInput]) -> DbResult<Cart> {
        let mut tx = begin_write(&self.pool).await?;

        let cart = load_in(&mut *tx, cart_id).await?;
        let cart = add_in(&mut *tx, cart, products).await?;

        tx.commit().await?;
        Ok(cart)
    }

    /// Unlinks products from this cart only.
    ///
    /// Other carts holding the same products are untouched. Ids that are
    /// not linked are ignored.
    pub async fn remove_products(&self, cart_id: i64, product_ids: &[i64]) -> DbResult<Cart> {
        let mut tx = begin_write(&self.pool).await?;

        let mut cart = load_in(&mut *tx, cart_id).await?;
        cart.ensure_open()?;

        if product_ids.is_empty() {
            tx.commit().await?;
            return Ok(cart);
        }

        debug!(cart_id = cart_id, count = product_ids.len(), "Removing products from cart");

        let mut removed = 0;
        for chunk in product_ids.chunks(ID_CHUNK_SIZE) {
            let mut builder: QueryBuilder<Sqlite> =
                QueryBuilder::new("DELETE FROM cart_products WHERE cart_id = ");
            builder.push_bind(cart_id);
            builder.push(" AND product_id IN (");
            let mut separated = builder.separated(", ");
            for id in chunk {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");

            removed += builder.build().execute(&mut *tx).await?.rows_affected();
        }
        debug!(removed = removed, "Cart links removed");

        cart.products.retain(|p| !product_ids.contains(&p.id));
        persist_in(&mut *tx, &cart).await?;

        let cart = load_in(&mut *tx, cart_id).await?;
        tx.commit().await?;

        Ok(cart)
    }

    /// Removes every product from an open cart. The cart itself is kept.
    pub async fn clear(&self, cart_id: i64) -> DbResult<Cart> {
        let mut tx = begin_write(&self.pool).await?;

        let mut cart = load_in(&mut *tx, cart_id).await?;
        cart.ensure_open()?;

        debug!(cart_id = cart_id, "Clearing cart");

        sqlx::query("DELETE FROM cart_products WHERE cart_id = ?1")
            .bind(cart_id)
            .execute(&mut *tx)
            .await?;

        cart.products.clear();
        persist_in(&mut *tx, &cart).await?;

        let cart = load_in(&mut *tx, cart_id).await?;
        tx.commit().await?;

        Ok(cart)
    }

    /// Checks out an open cart.
    ///
    /// ## What This Does
    /// 1. Loads the cart with its current products
    /// 2. Builds the summary (refuses a checked-out cart)
    /// 3. Marks the cart checked out and persists it
    ///
    /// All three steps commit together; a failure leaves the cart open.
    pub async fn checkout(&self, cart_id: i64) -> DbResult<CheckoutSummary> {
        let mut tx = begin_write(&self.pool).await?;

        let mut cart = load_in(&mut *tx, cart_id).await?;
        let summary = CheckoutSummary::from_cart(&cart)?;

        cart.checked_out = true;
        persist_in(&mut *tx, &cart).await?;

        tx.commit().await?;

        info!(
            cart_id = cart_id,
            products = summary.products.len(),
            subtotal = %summary.subtotal,
            "Cart checked out"
        );

        Ok(summary)
    }
}

// =============================================================================
// Connection-level helpers
// =============================================================================

async fn get_or_create_in(conn: &mut SqliteConnection, cart_id: Option<i64>) -> DbResult<Cart> {
    match cart_id {
        None => create_in(conn, &[]).await,
        Some(id) => match load_in(&mut *conn, id).await {
            Ok(cart) => Ok(cart),
            Err(err) if err.is_not_found() => {
                debug!(cart_id = id, "Cart not found, creating a new one");
                create_in(conn, &[]).await
            }
            Err(err) => Err(err),
        },
    }
}

/// Resolves `products`, links them to the open `cart` and reloads it.
async fn add_in(
    conn: &mut SqliteConnection,
    cart: Cart,
    products: &[ProductInput],
) -> DbResult<Cart> {
    cart.ensure_open()?;

    if products.is_empty() {
        return Ok(cart);
    }

    debug!(cart_id = cart.id, count = products.len(), "Adding products to cart");

    let resolved = insert_or_get_in(&mut *conn, products).await?;
    let ids: Vec<i64> = resolved.iter().map(|p| p.id).collect();

    link_in(&mut *conn, cart.id, &ids).await?;
    persist_in(&mut *conn, &cart).await?;

    load_in(conn, cart.id).await
}

async fn load_in(conn: &mut SqliteConnection, cart_id: i64) -> DbResult<Cart> {
    let mut cart = sqlx::query_as::<_, Cart>(
        r#"
        SELECT id, created_timestamp, modification_timestamp, checked_out
        FROM carts
        WHERE id = ?1
        "#,
    )
    .bind(cart_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| DbError::not_found("Cart", cart_id))?;

    let product_ids: Vec<i64> = sqlx::query_scalar(
        "SELECT product_id FROM cart_products WHERE cart_id = ?1 ORDER BY product_id",
    )
    .bind(cart_id)
    .fetch_all(&mut *conn)
    .await?;

    cart.products = fetch_by_ids_in(conn, &product_ids).await?;

    Ok(cart)
}

async fn create_in(conn: &mut SqliteConnection, product_ids: &[i64]) -> DbResult<Cart> {
    let now = Utc::now();

    let cart_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO carts (created_timestamp, modification_timestamp, checked_out)
        VALUES (?1, ?1, 0)
        RETURNING id
        "#,
    )
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;

    link_in(conn, cart_id, product_ids).await?;

    info!(cart_id = cart_id, products = product_ids.len(), "Cart created");

    load_in(conn, cart_id).await
}

/// Links products to a cart; pairs that already exist are skipped.
async fn link_in(conn: &mut SqliteConnection, cart_id: i64, product_ids: &[i64]) -> DbResult<()> {
    for product_id in product_ids {
        sqlx::query("INSERT OR IGNORE INTO cart_products (cart_id, product_id) VALUES (?1, ?2)")
            .bind(cart_id)
            .bind(product_id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

/// Writes the cart row back and re-links its current products.
async fn persist_in(conn: &mut SqliteConnection, cart: &Cart) -> DbResult<()> {
    let result = sqlx::query(
        "UPDATE carts SET checked_out = ?2, modification_timestamp = ?3 WHERE id = ?1",
    )
    .bind(cart.id)
    .bind(cart.checked_out)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Cart", cart.id));
    }

    link_in(conn, cart.id, &cart.product_ids()).await
}

// =============================================================================
// Unit Tests
// =============================================================================
