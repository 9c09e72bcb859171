use std::io::{self, Write};

use clap::Args;
use storefront_cart::{
    cart::Cart,
    checkout::{CheckoutError, HttpOrderClient, OrderClient, checkout},
    config::OrderApiConfig,
    storage::{CartStorage, FileStorage},
};
use tracing::warn;

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    #[command(flatten)]
    api: OrderApiConfig,
}

pub(crate) async fn run(cart: &mut Cart<FileStorage>, args: CheckoutArgs) -> Result<(), String> {
    let mut client = HttpOrderClient::new(args.api.api_url);

    if let Some(token) = args.api.api_token {
        client = client.with_token(token);
    }

    place_order(cart, &client, io::stdout()).await
}

/// Submit the cart and report the placed order.
///
/// Once the service has accepted the order the command succeeds, even if the
/// emptied cart cannot be saved; the stored record is deleted instead, and if
/// that fails too a warning names the key still holding the ordered lines.
async fn place_order<S, C>(cart: &mut Cart<S>, client: &C, mut out: impl Write) -> Result<(), String>
where
    S: CartStorage,
    C: OrderClient + ?Sized,
{
    let order = checkout(cart, client).await.map_err(|error| match error {
        CheckoutError::InsufficientStock(shortfalls) => shortfalls
            .iter()
            .map(|s| {
                format!(
                    "{}: {} in cart, {} in stock",
                    s.product_id, s.requested, s.available
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
        CheckoutError::Client(source) => format!("failed to place order: {source}"),
        CheckoutError::EmptyCart => "cart is empty".to_string(),
    })?;

    let mut lines = vec![format!("placed order {}", order.id)];

    if let Some(status) = &order.status {
        lines.push(format!("status: {status}"));
    }

    if let Some(total) = &order.total {
        lines.push(format!("total: {total}"));
    }

    if !cart.is_persisted()
        && let Err(error) = cart.flush()
        && let Err(remove_error) = cart.remove_record()
    {
        warn!(key = cart.key(), %error, %remove_error, "ordered lines remain in storage");

        lines.push(format!(
            "warning: cart under key {} could not be emptied ({error}); clear it before checking out again",
            cart.key()
        ));
    }

    for line in lines {
        writeln!(out, "{line}").map_err(|error| format!("failed to write output: {error}"))?;
    }

    Ok(())
}
