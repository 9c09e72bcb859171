//! Storefront cart CLI

use std::process;

use clap::Parser;

mod cli;

#[tokio::main]
pub async fn main() {
    // Load .env file if present (ignore if missing)
    _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = storefront_cart::logging::init(cli.logging()) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, must use eprintln"
        )]
        {
            eprintln!("failed to initialise logging: {error}");
        }
    }

    if let Err(error) = cli.run().await {
        #[expect(clippy::print_stderr, reason = "reporting a fatal CLI error")]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }
}
