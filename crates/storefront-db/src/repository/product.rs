//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Key Operations
//! - CRUD by id
//! - Paged listing and substring search
//! - Bulk lookup by id list
//! - Insert-or-get, used when clients reference products into a cart
//!
//! ## Insert-or-Get
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                How a referenced product is resolved                     │
//! │                                                                         │
//! │  ProductInput { id: Some(3), name: "Tea", price: 9.99 }                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT ... WHERE id = 3 OR (name = 'Tea' AND price_cents = 999)       │
//! │       │                                                                 │
//! │       ├── row found     → reuse it (an id match wins over name+price)  │
//! │       │                                                                 │
//! │       └── no row        → validate, INSERT, use the generated id       │
//! │                           (a client-sent id is never written)          │
//! │                                                                         │
//! │  ProductInput { id: Some(3) } alone is enough to reference product 3.  │
//! │                                                                         │
//! │  Output order == input order; duplicates in the input resolve to the   │
//! │  same product.                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Connection-level helpers
//! The cart repository resolves products inside its own transaction. Those
//! paths use the `*_in` helpers below, which run on a borrowed connection
//! instead of the pool.

use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::{begin_write, ID_CHUNK_SIZE};
use storefront_core::validation::{validate_product_input, validate_search_query};
use storefront_core::{Pagination, Product, ProductInput};

/// Column list for every product read.
const PRODUCT_COLUMNS: &str = "id, name, price_cents";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let tea = repo.create(&ProductInput::new("Tea", Money::from_cents(999))).await?;
/// let page = repo.list(Pagination::default()).await?;
/// let hits = repo.search("Te").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product with a generated id.
    ///
    /// ## Arguments
    /// * `input` - Name and price; any client-sent id is ignored
    ///
    /// ## Returns
    /// * `Ok(Product)` - The stored product, id included
    /// * `Err(DbError::Domain)` - Empty name or negative price
    pub async fn create(&self, input: &ProductInput) -> DbResult<Product> {
        validate_product_input(input)?;

        debug!(name = %input.name, price = %input.price, "Inserting product");

        let product = insert_in_pool(&self.pool, input).await?;

        debug!(id = product.id, "Product created");
        Ok(product)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Product found
    /// * `Err(DbError::NotFound)` - No product with that id
    pub async fn get_by_id(&self, id: i64) -> DbResult<Product> {
        let sql = format!("SELECT {} FROM products WHERE id = ?1", PRODUCT_COLUMNS);

        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Overwrites name and price of an existing product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The product as stored after the update
    /// * `Err(DbError::NotFound)` - No product with that id
    pub async fn update(&self, id: i64, input: &ProductInput) -> DbResult<Product> {
        validate_product_input(input)?;

        debug!(id = id, name = %input.name, price = %input.price, "Updating product");

        let sql = format!(
            "UPDATE products SET name = ?2, price_cents = ?3 WHERE id = ?1 RETURNING {}",
            PRODUCT_COLUMNS
        );

        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(input.price)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Deletes a product.
    ///
    /// Cart links to the product are left in place; carts simply stop
    /// showing it.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No product with that id
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Lists one page of products, ordered by id.
    ///
    /// An offset past the end yields an empty page.
    pub async fn list(&self, page: Pagination) -> DbResult<Vec<Product>> {
        debug!(offset = page.offset, limit = page.limit, "Listing products");

        let sql = format!(
            "SELECT {} FROM products ORDER BY id LIMIT ?1 OFFSET ?2",
            PRODUCT_COLUMNS
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(i64::from(page.limit))
            .bind(i64::from(page.offset))
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Finds products whose name contains `query`.
    ///
    /// ## Matching
    /// - Case-sensitive substring match on the name
    /// - The term is trimmed; empty or over-long terms are rejected
    /// - Results ordered by id
    pub async fn search(&self, query: &str) -> DbResult<Vec<Product>> {
        let term = validate_search_query(query)?;

        debug!(query = %term, "Searching products");

        // instr() is a plain substring test; LIKE would need escaping of % and _
        let sql = format!(
            "SELECT {} FROM products WHERE instr(name, ?1) > 0 ORDER BY id",
            PRODUCT_COLUMNS
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(&term)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Fetches every existing product among `ids`, ordered by id.
    ///
    /// Unknown ids are skipped. An empty list returns an empty vec without
    /// querying; long lists are fetched in chunks.
    pub async fn get_by_id_list(&self, ids: &[i64]) -> DbResult<Vec<Product>> {
        let mut conn = self.pool.acquire().await?;
        fetch_by_ids_in(&mut *conn, ids).await
    }

    /// Resolves each input to an existing or newly inserted product.
    ///
    /// Runs in one transaction: either every input resolves or nothing
    /// is inserted.
    pub async fn insert_or_get(&self, inputs: &[ProductInput]) -> DbResult<Vec<Product>> {
        let mut tx = begin_write(&self.pool).await?;

        let products = insert_or_get_in(&mut *tx, inputs).await?;

        tx.commit().await?;
        Ok(products)
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Connection-level helpers
// =============================================================================

async fn insert_in_pool(pool: &SqlitePool, input: &ProductInput) -> DbResult<Product> {
    let mut conn = pool.acquire().await?;
    insert_in(&mut *conn, input).await
}

async fn insert_in(conn: &mut SqliteConnection, input: &ProductInput) -> DbResult<Product> {
    let sql = format!(
        "INSERT INTO products (name, price_cents) VALUES (?1, ?2) RETURNING {}",
        PRODUCT_COLUMNS
    );

    let product = sqlx::query_as::<_, Product>(&sql)
        .bind(&input.name)
        .bind(input.price)
        .fetch_one(&mut *conn)
        .await?;

    Ok(product)
}

/// Bulk lookup on a borrowed connection.
///
/// Ids are bound in chunks of [`ID_CHUNK_SIZE`] to stay under SQLite's
/// bound-parameter limit.
pub(crate) async fn fetch_by_ids_in(
    conn: &mut SqliteConnection,
    ids: &[i64],
) -> DbResult<Vec<Product>> {
    let mut products = Vec::new();

    for chunk in ids.chunks(ID_CHUNK_SIZE) {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {} FROM products WHERE id IN (", PRODUCT_COLUMNS));

        let mut separated = builder.separated(", ");
        for id in chunk {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let rows = builder
            .build_query_as::<Product>()
            .fetch_all(&mut *conn)
            .await?;
        products.extend(rows);
    }

    products.sort_by_key(|p| p.id);
    products.dedup_by_key(|p| p.id);

    Ok(products)
}

/// Insert-or-get on a borrowed connection.
///
/// ## Passes
/// 1. Look every input up by id, or by name + price
/// 2. Validate the inputs nothing matched; these are the ones to insert
/// 3. Insert them, reusing a row inserted earlier in the same batch when
///    it matches
///
/// Nothing is written before pass 2 succeeds, so a bad input never leaves
/// earlier inserts behind. Inputs that match an existing row are not
/// validated: `{"id": 3}` is a valid reference to product 3.
pub(crate) async fn insert_or_get_in(
    conn: &mut SqliteConnection,
    inputs: &[ProductInput],
) -> DbResult<Vec<Product>> {
    let lookup = format!(
        "SELECT {} FROM products \
         WHERE id = ?1 OR (name = ?2 AND price_cents = ?3) \
         ORDER BY (id = ?1) DESC, id \
         LIMIT 1",
        PRODUCT_COLUMNS
    );

    let mut found = Vec::with_capacity(inputs.len());
    for input in inputs {
        let existing = sqlx::query_as::<_, Product>(&lookup)
            .bind(input.id)
            .bind(&input.name)
            .bind(input.price)
            .fetch_optional(&mut *conn)
            .await?;
        found.push(existing);
    }

    for (input, existing) in inputs.iter().zip(&found) {
        if existing.is_none() {
            validate_product_input(input)?;
        }
    }

    let mut inserted: Vec<Product> = Vec::new();
    let mut resolved = Vec::with_capacity(inputs.len());

    for (input, existing) in inputs.iter().zip(found) {
        let product = match existing {
            Some(product) => product,
            None => match inserted.iter().find(|p| p.matches(input)) {
                Some(product) => product.clone(),
                None => {
                    let product = insert_in(conn, input).await?;
                    debug!(id = product.id, name = %product.name, "Inserted referenced product");
                    inserted.push(product.clone());
                    product
                }
            },
        };

        resolved.push(product);
    }

    Ok(resolved)
}

// =============================================================================
// Unit Tests
// =============================================================================
