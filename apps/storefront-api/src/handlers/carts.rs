//! Cart and checkout handlers.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use storefront_core::{Cart, CheckoutSummary, ProductInput};

use crate::error::ApiResult;
use crate::AppState;

/// Body of `PUT /cart`.
#[derive(Debug, Default, Deserialize)]
pub struct AddToCartRequest {
    /// Cart to add to; absent or `0` starts a new cart.
    #[serde(default)]
    pub cart_id: Option<i64>,

    #[serde(default)]
    pub products: Vec<ProductInput>,
}

impl AddToCartRequest {
    /// The cart id to look up, if the client named one.
    fn target_cart(&self) -> Option<i64> {
        self.cart_id.filter(|id| *id != 0)
    }
}

/// Body of `DELETE /cart/{id}/products`.
#[derive(Debug, Default, Deserialize)]
pub struct RemoveProductsRequest {
    #[serde(default)]
    pub product_ids: Vec<i64>,
}

/// `PUT /cart`: loads (or creates) the cart and adds the products, in one
/// transaction.
///
/// Unknown cart ids get a fresh cart rather than a 404. A rejected request
/// leaves no new cart behind.
pub async fn add_to_cart(
    State(state): State<AppState>,
    payload: Result<Json<AddToCartRequest>, JsonRejection>,
) -> ApiResult<Json<Cart>> {
    let Json(request) = payload?;

    let cart = state
        .db
        .carts()
        .add_to_cart(request.target_cart(), &request.products)
        .await?;

    Ok(Json(cart))
}

/// `GET /cart/{id}`
pub async fn get_cart(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Cart>> {
    let Path(id) = id?;

    Ok(Json(state.db.carts().get_cart(id).await?))
}

/// `DELETE /cart/{id}/products`
pub async fn remove_from_cart(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<RemoveProductsRequest>, JsonRejection>,
) -> ApiResult<Json<Cart>> {
    let Path(id) = id?;
    let Json(request) = payload?;

    let cart = state
        .db
        .carts()
        .remove_products(id, &request.product_ids)
        .await?;

    Ok(Json(cart))
}

/// `DELETE /cart/{id}`: removes every product; the cart stays.
pub async fn clear_cart(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Cart>> {
    let Path(id) = id?;

    Ok(Json(state.db.carts().clear(id).await?))
}

/// `GET /cart/{id}/checkout`
pub async fn checkout(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<CheckoutSummary>> {
    let Path(id) = id?;

    Ok(Json(state.db.carts().checkout(id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_or_missing_cart_id_means_new_cart() {
        let request: AddToCartRequest = serde_json::from_str(r#"{"products":[]}"#).unwrap();
        assert_eq!(request.target_cart(), None);

        let request: AddToCartRequest =
            serde_json::from_str(r#"{"cart_id":0,"products":[]}"#).unwrap();
        assert_eq!(request.target_cart(), None);

        let request: AddToCartRequest = serde_json::from_str(r#"{"cart_id":7}"#).unwrap();
        assert_eq!(request.target_cart(), Some(7));
        assert!(request.products.is_empty());
    }

    #[test]
    fn test_products_may_be_referenced_by_id() {
        let request: AddToCartRequest =
            serde_json::from_str(r#"{"products":[{"id":3},{"name":"Tea","price":2}]}"#).unwrap();

        assert_eq!(request.products[0].id, Some(3));
        assert_eq!(request.products[1].id, None);
        assert_eq!(request.products[1].price.cents(), 200);
    }
}
