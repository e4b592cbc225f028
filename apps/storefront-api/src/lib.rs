//! # Storefront API
//!
//! JSON/HTTP front for the product catalog and shopping carts.
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Storefront Routes                              │
//! │                                                                         │
//! │  GET    /health                   liveness + database check            │
//! │                                                                         │
//! │  GET    /products?start=&count=   page through the catalog             │
//! │  POST   /product                  create                               │
//! │  GET    /product/search?q=        substring search on name             │
//! │  GET    /product/{id}             read                                 │
//! │  PUT    /product/{id}             overwrite name + price               │
//! │  DELETE /product/{id}             delete                               │
//! │                                                                         │
//! │  PUT    /cart                     get-or-create cart, add products     │
//! │  GET    /cart/{id}                read cart                            │
//! │  DELETE /cart/{id}/products       unlink products from this cart       │
//! │  DELETE /cart/{id}                clear cart                           │
//! │  GET    /cart/{id}/checkout       finalize, return subtotal            │
//! │                                                                         │
//! │  Shared state: AppState { db: Database }  (cloned per request)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config::ApiConfig`] for the `STOREFRONT_*` environment variables.

pub mod config;
pub mod error;
pub mod handlers;

use axum::routing::{delete, get, post, put};
use axum::Router;
use storefront_db::Database;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}

/// Builds the application router over `db`.
pub fn router(db: Database) -> Router {
    use handlers::{carts, health, products};

    Router::new()
        .route("/health", get(health::health))
        .route("/products", get(products::list_products))
        .route("/product", post(products::create_product))
        .route("/product/search", get(products::search_products))
        .route(
            "/product/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/cart", put(carts::add_to_cart))
        .route("/cart/{id}", get(carts::get_cart).delete(carts::clear_cart))
        .route("/cart/{id}/products", delete(carts::remove_from_cart))
        .route("/cart/{id}/checkout", get(carts::checkout))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(db))
}
