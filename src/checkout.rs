//! Checkout
//!
//! Turns the cart into an order request, submits it through an [`OrderClient`]
//! and clears the cart once the order is placed.

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{Span, info};

use crate::{
    cart::Cart,
    items::{LineItem, StockShortfall},
    products::ProductId,
    storage::CartStorage,
};

pub mod http;

pub use http::HttpOrderClient;

/// One product and quantity in an order request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Product being ordered
    pub product_id: ProductId,

    /// Units ordered
    pub quantity: u32,
}

/// Order creation request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Ordered lines
    pub items: Vec<OrderLine>,
}

impl OrderRequest {
    /// Build a request from cart line items.
    pub fn from_items(items: &[LineItem]) -> Self {
        Self {
            items: items
                .iter()
                .map(|item| OrderLine {
                    product_id: item.id().clone(),
                    quantity: item.quantity().get(),
                })
                .collect(),
        }
    }
}

/// An order accepted by the order service.
///
/// The service answers with the created order object; fields not listed here
/// are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedOrder {
    /// Order identifier
    pub id: String,

    /// Order status as reported by the service
    #[serde(default)]
    pub status: Option<String>,

    /// Order total as computed by the service, sent as a decimal string
    #[serde(default)]
    pub total: Option<String>,
}

/// Errors returned by an order client.
#[derive(Debug, Error)]
pub enum OrderClientError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service rejected the credentials.
    #[error("order service rejected credentials")]
    Unauthorized,

    /// The service returned a non-success status.
    #[error("order service returned status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        body: String,
    },
}

/// Checkout errors
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// One or more lines exceed the product's stock.
    #[error("{} line(s) exceed available stock", .0.len())]
    InsufficientStock(SmallVec<[StockShortfall; 4]>),

    /// The order service failed.
    #[error("failed to place order")]
    Client(#[from] OrderClientError),
}

/// Remote service that places orders.
#[automock]
#[async_trait]
pub trait OrderClient: Send + Sync {
    /// Submit an order request.
    async fn create_order(&self, order: &OrderRequest) -> Result<PlacedOrder, OrderClientError>;
}

/// Place an order for the cart's contents and clear the cart on success.
///
/// The cart is left untouched if validation or submission fails, so the
/// shopper can retry.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`]: the cart has no lines.
/// - [`CheckoutError::InsufficientStock`]: some lines exceed tracked stock.
/// - [`CheckoutError::Client`]: the order service failed.
#[tracing::instrument(
    name = "checkout.place_order",
    skip(cart, client),
    fields(
        lines = cart.len(),
        item_count = cart.total_item_count(),
        total_amount = cart.total_amount(),
        order_id = tracing::field::Empty
    ),
    err
)]
pub async fn checkout<S, C>(cart: &mut Cart<S>, client: &C) -> Result<PlacedOrder, CheckoutError>
where
    S: CartStorage,
    C: OrderClient + ?Sized,
{
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let shortfalls = cart.stock_shortfalls();

    if !shortfalls.is_empty() {
        return Err(CheckoutError::InsufficientStock(shortfalls));
    }

    let request = OrderRequest::from_items(cart.items());
    let order = client.create_order(&request).await?;

    Span::current().record("order_id", tracing::field::display(&order.id));

    cart.clear();

    info!(order_id = %order.id, "placed order");

    Ok(order)
}
