//! WorkHub CLI entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use workhub_core::config::{AppConfig, logging::LoggingConfig};

mod commands;
mod render;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let logging = AppConfig::load(&cli.env)
        .map(|config| config.logging)
        .unwrap_or_default();
    init_tracing(&logging);

    if let Err(e) = cli.execute().await {
        render::failure(&e.to_string());
        std::process::exit(1);
    }
}

/// Initialize tracing output per the logging configuration.
///
/// `RUST_LOG` overrides the configured level when set.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.clone()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
