//! # Checkout
//!
//! Pure part of the checkout workflow: the subtotal rule and the summary
//! returned to clients.
//!
//! ## Workflow Split
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartRepository::checkout (storefront-db, one transaction)              │
//! │       │                                                                 │
//! │       ├── load cart + products                                         │
//! │       │                                                                 │
//! │       ├── CheckoutSummary::from_cart(&cart)  ◄── THIS MODULE           │
//! │       │      ├── cart.ensure_open()?                                   │
//! │       │      └── subtotal = Σ product.price (checked)                  │
//! │       │                                                                 │
//! │       ├── checked_out = true, persist                                  │
//! │       └── commit                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The subtotal is the plain sum of linked product prices at call time.
//! No tax, discount, currency conversion or rounding rules apply.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Cart, Product};

impl Cart {
    /// Sum of the prices of the linked products.
    ///
    /// ## Errors
    /// `CoreError::SubtotalOverflow` if the sum does not fit in `Money`.
    pub fn subtotal(&self) -> CoreResult<Money> {
        Money::checked_sum(self.products.iter().map(|p| p.price))
            .ok_or(CoreError::SubtotalOverflow { cart_id: self.id })
    }
}

/// Result of checking out a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutSummary {
    pub products: Vec<Product>,

    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub subtotal: Money,
}

impl CheckoutSummary {
    /// Builds the summary for an open cart.
    ///
    /// ## Errors
    /// - `CoreError::CartCheckedOut` if the cart was already finalized
    /// - `CoreError::SubtotalOverflow` if the prices cannot be summed
    pub fn from_cart(cart: &Cart) -> CoreResult<Self> {
        cart.ensure_open()?;
        let subtotal = cart.subtotal()?;

        Ok(CheckoutSummary {
            products: cart.products.clone(),
            subtotal,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn cart_with_prices(checked_out: bool, prices: &[i64]) -> Cart {
        let now = Utc::now();
        Cart {
            id: 9,
            created_timestamp: now,
            modification_timestamp: now,
            checked_out,
            products: prices
                .iter()
                .enumerate()
                .map(|(i, cents)| Product {
                    id: i as i64 + 1,
                    name: format!("item-{}", i),
                    price: Money::from_cents(*cents),
                })
                .collect(),
        }
    }

    #[test]
    fn test_subtotal_is_plain_sum() {
        let cart = cart_with_prices(false, &[999, 500]);
        assert_eq!(cart.subtotal().unwrap().cents(), 1499);
    }

    #[test]
    fn test_overflowing_subtotal_is_an_error() {
        let cart = cart_with_prices(false, &[6_000_000_000_000_000_000, 6_000_000_000_000_000_000]);

        assert!(matches!(
            cart.subtotal(),
            Err(CoreError::SubtotalOverflow { cart_id: 9 })
        ));
        assert!(matches!(
            CheckoutSummary::from_cart(&cart),
            Err(CoreError::SubtotalOverflow { cart_id: 9 })
        ));
    }

    #[test]
    fn test_empty_cart_subtotal_is_zero() {
        let cart = cart_with_prices(false, &[]);
        let summary = CheckoutSummary::from_cart(&cart).unwrap();

        assert!(summary.subtotal.is_zero());
        assert!(summary.products.is_empty());
    }

    #[test]
    fn test_summary_keeps_products() {
        let cart = cart_with_prices(false, &[100, 200, 300]);
        let summary = CheckoutSummary::from_cart(&cart).unwrap();

        assert_eq!(summary.products, cart.products);
        assert_eq!(summary.subtotal.cents(), 600);
    }

    #[test]
    fn test_checked_out_cart_is_refused() {
        let cart = cart_with_prices(true, &[100]);
        let err = CheckoutSummary::from_cart(&cart).unwrap_err();

        assert!(matches!(err, CoreError::CartCheckedOut { cart_id: 9 }));
    }

    #[test]
    fn test_summary_json_shape() {
        let cart = cart_with_prices(false, &[999, 500]);
        let summary = CheckoutSummary::from_cart(&cart).unwrap();
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["subtotal"], 14.99);
        assert_eq!(json["products"].as_array().map(Vec::len), Some(2));
    }
}
