//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────────┐                      │
//! │  │    Product      │   │          Cart           │                      │
//! │  │  ─────────────  │   │  ─────────────────────  │                      │
//! │  │  id (i64)       │◄──│  products: Vec<Product> │  (via cart_products) │
//! │  │  name           │   │  id (i64)               │                      │
//! │  │  price (Money)  │   │  created_timestamp      │                      │
//! │  └─────────────────┘   │  modification_timestamp │                      │
//! │                        │  checked_out            │                      │
//! │  ┌─────────────────┐   └─────────────────────────┘                      │
//! │  │  ProductInput   │                                                    │
//! │  │  id: Option     │   ┌─────────────────┐                              │
//! │  │  name, price    │   │   CartStatus    │                              │
//! │  └─────────────────┘   │  Open           │                              │
//! │                        │  CheckedOut     │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Product Identity
//! A product is "the same product" when its id matches, OR when both its
//! name and its price match. Insert-or-get in the product store relies on
//! this rule to deduplicate products referenced into carts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Generated identifier.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Unit price, a decimal number on the wire.
    #[serde(with = "crate::money::decimal")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "price_cents"))]
    #[ts(type = "number")]
    pub price: Money,
}

impl Product {
    /// Checks whether `input` identifies this product (id, or name + price).
    ///
    /// Insert-or-get uses this to reuse rows inserted earlier in a batch.
    pub fn matches(&self, input: &ProductInput) -> bool {
        input.id == Some(self.id) || (self.name == input.name && self.price == input.price)
    }
}

// =============================================================================
// Product Input
// =============================================================================

/// A product as sent by a client: the id is optional.
///
/// ## Where It Is Used
/// - `PUT /cart` product lists, resolved through insert-or-get
/// - Catalog writes, built from a `{name, price}` body (id ignored)
///
/// ## Id-Only References
/// A cart entry may name just an existing product: `{"id": 3}`. Name and
/// price then default to empty and zero; they are only validated if the
/// entry has to be inserted as a new product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub id: Option<i64>,

    #[serde(default)]
    pub name: String,

    #[serde(default, with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub price: Money,
}

impl ProductInput {
    /// Creates an input with no id (identity by name + price only).
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        ProductInput {
            id: None,
            name: name.into(),
            price,
        }
    }

    /// Sets the id used for identity matching.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

// =============================================================================
// Cart Status
// =============================================================================

/// Lifecycle state of a cart.
///
/// ```text
///   ┌────────┐   checkout()   ┌────────────┐
///   │  Open  │ ─────────────► │ CheckedOut │  (terminal)
///   └────────┘                └────────────┘
///   add / remove / clear
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CartStatus {
    /// Products can be added, removed and cleared.
    Open,
    /// Finalized; no further mutation.
    CheckedOut,
}

// =============================================================================
// Cart
// =============================================================================

/// A shopping cart with its hydrated product set.
///
/// The product set is unordered; stores return it ordered by product id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Cart {
    pub id: i64,

    #[ts(as = "String")]
    pub created_timestamp: DateTime<Utc>,

    #[ts(as = "String")]
    pub modification_timestamp: DateTime<Utc>,

    pub checked_out: bool,

    /// Linked products, loaded separately from `cart_products`.
    #[serde(rename = "Products", default)]
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub products: Vec<Product>,
}

impl Cart {
    /// Returns the lifecycle state.
    #[inline]
    pub fn status(&self) -> CartStatus {
        if self.checked_out {
            CartStatus::CheckedOut
        } else {
            CartStatus::Open
        }
    }

    /// Checks if the cart still accepts mutations.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.status() == CartStatus::Open
    }

    /// Fails with `CartCheckedOut` unless the cart is open.
    ///
    /// Every mutating store operation calls this first.
    pub fn ensure_open(&self) -> CoreResult<()> {
        match self.status() {
            CartStatus::Open => Ok(()),
            CartStatus::CheckedOut => Err(CoreError::CartCheckedOut { cart_id: self.id }),
        }
    }

    /// Ids of the linked products.
    pub fn product_ids(&self) -> Vec<i64> {
        self.products.iter().map(|p| p.id).collect()
    }

    /// Checks if a product is linked to this cart.
    pub fn contains_product(&self, product_id: i64) -> bool {
        self.products.iter().any(|p| p.id == product_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, cents: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            price: Money::from_cents(cents),
        }
    }

    fn cart(checked_out: bool, products: Vec<Product>) -> Cart {
        let now = Utc::now();
        Cart {
            id: 1,
            created_timestamp: now,
            modification_timestamp: now,
            checked_out,
            products,
        }
    }

    #[test]
    fn test_product_identity_rule() {
        let p = product(3, "Espresso", 250);

        assert!(p.matches(&ProductInput::new("Other", Money::from_cents(1)).with_id(3)));
        assert!(p.matches(&ProductInput::new("Espresso", Money::from_cents(250))));
        assert!(!p.matches(&ProductInput::new("Espresso", Money::from_cents(251))));
        assert!(!p.matches(&ProductInput::new("espresso", Money::from_cents(250))));
    }

    #[test]
    fn test_product_json_shape() {
        let json = serde_json::to_value(product(1, "Tea", 999)).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "name": "Tea", "price": 9.99}));
    }

    #[test]
    fn test_product_input_id_is_optional() {
        let input: ProductInput = serde_json::from_str(r#"{"name":"Tea","price":5}"#).unwrap();
        assert_eq!(input.id, None);
        assert_eq!(input.price.cents(), 500);

        let input: ProductInput =
            serde_json::from_str(r#"{"id":4,"name":"Tea","price":5.5}"#).unwrap();
        assert_eq!(input.id, Some(4));
        assert_eq!(input.price.cents(), 550);
    }

    #[test]
    fn test_cart_status_and_guard() {
        let open = cart(false, vec![]);
        assert_eq!(open.status(), CartStatus::Open);
        assert!(open.ensure_open().is_ok());

        let done = cart(true, vec![]);
        assert_eq!(done.status(), CartStatus::CheckedOut);
        assert!(matches!(
            done.ensure_open(),
            Err(CoreError::CartCheckedOut { cart_id: 1 })
        ));
    }

    #[test]
    fn test_cart_json_uses_capitalized_products_key() {
        let c = cart(false, vec![product(2, "Mug", 1200)]);
        let json = serde_json::to_value(&c).unwrap();

        assert_eq!(json["checked_out"], false);
        assert_eq!(json["Products"][0]["price"], 12.0);
        assert!(json.get("created_timestamp").is_some());
        assert!(json.get("modification_timestamp").is_some());
        assert!(json.get("products").is_none());
    }

    #[test]
    fn test_cart_product_helpers() {
        let c = cart(false, vec![product(2, "Mug", 1200), product(5, "Lid", 100)]);
        assert_eq!(c.product_ids(), vec![2, 5]);
        assert!(c.contains_product(5));
        assert!(!c.contains_product(3));
    }

    #[test]
    fn test_product_input_by_id_only() {
        let input: ProductInput = serde_json::from_str(r#"{"id":1}"#).unwrap();
        assert_eq!(input.id, Some(1));
        assert_eq!(input.name, "");
        assert!(input.price.is_zero());
    }
}
