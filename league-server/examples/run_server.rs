//! Standalone league server without the CLI
//!
//! Run with: cargo run -p league-server --example run_server
//!
//! `LEAGUE_PORT` and `LEAGUE_TIMEOUT_SECS` override the defaults;
//! `RUST_LOG` controls verbosity.

use league_server::{run_server, ServerConfig};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> anyhow::Result<T> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("{} is not valid: {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("league_server=debug")),
        )
        .init();

    let defaults = ServerConfig::default();
    let config = ServerConfig {
        port: env_or("LEAGUE_PORT", defaults.port)?,
        search_timeout: Duration::from_secs(env_or(
            "LEAGUE_TIMEOUT_SECS",
            defaults.search_timeout.as_secs(),
        )?),
        ..defaults
    };

    tracing::info!(
        "POST a league to http://localhost:{}/api/schedule (searches capped at {:?})",
        config.port,
        config.search_timeout
    );

    run_server(config).await
}
