//! Request handlers, one module per resource.
//!
//! Handlers stay thin: parse the request, call one repository operation,
//! wrap the result in JSON. Every failure leaves through [`ApiError`].
//!
//! [`ApiError`]: crate::error::ApiError

pub mod carts;
pub mod health;
pub mod products;
