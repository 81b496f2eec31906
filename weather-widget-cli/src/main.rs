//! Binary crate for the `weather-widget` terminal host.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration and the widget menu loop
//! - Rendering the widget view in the terminal

use clap::Parser;

mod cli;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
