//! Product catalog handlers.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use storefront_core::{Money, Pagination, Product, ProductInput};
use tracing::{debug, info};

use crate::error::ApiResult;
use crate::AppState;

/// Raw paging parameters; parsed by [`Pagination::parse`] so bad values
/// get a field-specific message.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub start: Option<String>,
    pub count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Body of `POST /product` and `PUT /product/{id}`.
///
/// Both fields are required here, unlike cart entries which may name a
/// product by id alone. A client-sent `id` is ignored.
#[derive(Debug, Deserialize)]
pub struct ProductBody {
    pub name: String,

    #[serde(with = "storefront_core::money::decimal")]
    pub price: Money,
}

impl From<ProductBody> for ProductInput {
    fn from(body: ProductBody) -> Self {
        ProductInput::new(body.name, body.price)
    }
}

/// `GET /products?start=&count=`
pub async fn list_products(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Product>>> {
    let Query(params) = params?;
    let page = Pagination::parse(params.start.as_deref(), params.count.as_deref())?;

    let products = state.db.products().list(page).await?;
    Ok(Json(products))
}

/// `POST /product`
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let Json(body) = payload?;
    let input = ProductInput::from(body);

    let product = state.db.products().create(&input).await?;
    info!(id = product.id, name = %product.name, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// `GET /product/search?q=`
pub async fn search_products(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Product>>> {
    let Query(params) = params?;
    let query = params.q.unwrap_or_default();

    let products = state.db.products().search(&query).await?;
    debug!(query = %query, count = products.len(), "Search served");

    Ok(Json(products))
}

/// `GET /product/{id}`
pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = id?;

    Ok(Json(state.db.products().get_by_id(id).await?))
}

/// `PUT /product/{id}`: the body's own id, if any, is ignored.
pub async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ProductBody>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = id?;
    let Json(body) = payload?;
    let input = ProductInput::from(body);

    let product = state.db.products().update(id, &input).await?;
    Ok(Json(product))
}

/// `DELETE /product/{id}`
pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Value>> {
    let Path(id) = id?;

    state.db.products().delete(id).await?;
    info!(id = id, "Product deleted");

    Ok(Json(json!({ "result": "success" })))
}
