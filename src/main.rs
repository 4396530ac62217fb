use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use stackstats::application::{StatsConfig, StatsService};
use stackstats::infrastructure::client::StackExchangeClient;
use stackstats::presentation::cli::Cli;
use stackstats::presentation::output::render;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before clap parses env vars)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if cli.enable_logging {
        init_tracing();
    }

    // Dates are checked before any request is made
    let window = cli.window().context("Invalid input data")?;

    let config = StatsConfig::default().with_overrides(cli.overrides());
    let client = StackExchangeClient::from_url(&config.url, config.timeout)?;
    let service = StatsService::new(Arc::new(client), config);

    let report = tokio::select! {
        result = service.compute(window) => result?,
        _ = tokio::signal::ctrl_c() => {
            println!("Interrupted");
            return Ok(());
        }
    };

    println!("{}", render(&report, cli.output_format)?);
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("RUST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let use_ansi = std::io::stderr().is_terminal();

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_ansi(use_ansi)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
