//! Storefront Cart prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::Cart,
    catalog::{Catalog, CatalogError},
    checkout::{
        CheckoutError, HttpOrderClient, OrderClient, OrderClientError, OrderLine, OrderRequest,
        PlacedOrder, checkout,
    },
    items::{LineItem, StockShortfall},
    pricing::TotalPriceError,
    products::{Product, ProductId},
    storage::{
        CartStorage, DEFAULT_STORAGE_KEY, FileStorage, MemoryStorage, PersistError, StorageError,
    },
    summary::{SummaryError, write_summary},
};
