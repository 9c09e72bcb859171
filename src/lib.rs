//! Storefront Cart
//!
//! Client-side shopping cart for the storefront: aggregates selected products
//! into line items, keeps totals, persists itself to a key/value store and
//! hands its contents to checkout.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod items;
pub mod logging;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod storage;
pub mod summary;
