//! tokentint CLI — token-list logo color enrichment.
//!
//! Downloads each token's logo, derives average and dominant colors, and
//! rewrites the token list plus a static HTML preview.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
