//! PhoneFinder - phone search and assistant chat client
//!
#![doc = "Main entry point for the PhoneFinder CLI."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use phonefinder::cli::{Cli, Commands};
use phonefinder::commands;
use phonefinder::config::{Config, LoggingConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    init_tracing(&config.logging, cli.verbose);

    // Validate configuration
    config.validate()?;

    match cli.command {
        Commands::Brands => commands::catalog::list_brands(&config).await,
        Commands::PriceRange => commands::catalog::show_price_range(&config).await,
        Commands::Search { filters, html } => {
            tracing::debug!(?filters, "Running search");
            commands::search::search(&config, &filters, html).await
        }
        Commands::Select { index, filters } => {
            tracing::debug!(index, ?filters, "Running select");
            commands::search::select(&config, &filters, index).await
        }
        Commands::Details { html } => commands::details::show_details(&config, html),
        Commands::Chat => commands::chat::run_chat(config).await,
    }
}

/// Initialize tracing
///
/// `RUST_LOG` wins over the configured level; `--verbose` raises the
/// default to debug.
fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let default_directive = if verbose {
        "phonefinder=debug".to_string()
    } else {
        logging.level.clone()
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let registry = tracing_subscriber::registry().with(env_filter);
    if logging.json_format {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
