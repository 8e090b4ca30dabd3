//! Command-line interface for trade-desk

use clap::Parser;
use tracing::info;

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = desk_utils::Config::from_env();
    desk_utils::init_tracing_with(cli.log_format.unwrap_or(config.log_format));

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        "{} starting",
        config.app_name
    );

    cli::run(cli).await
}
