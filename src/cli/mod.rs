use std::io::{self, Write};

use clap::{Parser, Subcommand};
use storefront_cart::{
    cart::Cart,
    config::{CartConfig, LoggingConfig},
    storage::FileStorage,
};

mod checkout;
mod items;
mod show;

#[derive(Debug, Parser)]
#[command(name = "cart", about = "Storefront cart", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    cart: CartConfig,

    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Add one unit of a catalog product
    Add(items::AddArgs),
    /// Remove a product's line
    Remove(items::RemoveArgs),
    /// Set the quantity of a product's line; 0 removes it
    SetQuantity(items::SetQuantityArgs),
    /// Empty the cart
    Clear,
    /// Show cart contents and totals
    Show,
    /// Place an order for the cart's contents
    Checkout(checkout::CheckoutArgs),
}

impl Cli {
    pub(crate) fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        let mut cart = open_cart(&self.cart);

        match self.command {
            Commands::Add(args) => items::add(&self.cart, &mut cart, &args),
            Commands::Remove(args) => items::remove(&mut cart, &args),
            Commands::SetQuantity(args) => items::set_quantity(&mut cart, &args),
            Commands::Clear => items::clear(&mut cart),
            Commands::Show => show::run(&self.cart, &cart),
            Commands::Checkout(args) => checkout::run(&mut cart, args).await,
        }
    }
}

fn open_cart(config: &CartConfig) -> Cart<FileStorage> {
    Cart::load_with_key(config.storage(), config.storage_key.clone())
}

/// Report the save error if the last automatic save failed.
fn ensure_saved(cart: &mut Cart<FileStorage>) -> Result<(), String> {
    if cart.is_persisted() {
        return Ok(());
    }

    cart.flush()
        .map_err(|error| format!("failed to save cart: {error}"))
}

fn print_line(line: &str) -> Result<(), String> {
    writeln!(io::stdout().lock(), "{line}")
        .map_err(|error| format!("failed to write output: {error}"))
}
