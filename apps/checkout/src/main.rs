//! `checkout` binary entry point.

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::info;

use cartwise_checkout::cli::{self, Cli, Context};
use cartwise_checkout::config::CheckoutConfig;
use cartwise_checkout::init_tracing;
use cartwise_checkout::state::CatalogState;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CheckoutConfig::load(cli.config.clone()).context("Failed to load configuration")?;
    init_tracing(&config.logging.filter);

    let catalog = CatalogState::load(&config.catalog).context("Failed to load promotion catalog")?;
    let ctx = Context::new(config, catalog)?;
    info!(
        items = ctx.catalog.items().len(),
        points = %ctx.points,
        "Checkout ready"
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    cli::run(cli.command, &ctx, &mut stdin.lock(), &mut out)
}
