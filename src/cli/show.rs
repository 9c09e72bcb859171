use std::io;

use storefront_cart::{cart::Cart, config::CartConfig, storage::FileStorage, summary::write_summary};

pub(crate) fn run(config: &CartConfig, cart: &Cart<FileStorage>) -> Result<(), String> {
    let currency = config.currency().map_err(|error| error.to_string())?;

    write_summary(io::stdout().lock(), cart.items(), currency)
        .map_err(|error| format!("failed to show cart: {error}"))
}
