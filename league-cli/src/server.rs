//! Server command - start the HTTP server
//!
//! Argument checks happen here; serving is left to `league_server`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::Args;

use league_server::{run_server, ServerConfig};

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "8003")]
    pub port: u16,

    /// Directory containing static files for the front end
    #[arg(long, default_value = "web")]
    pub static_dir: PathBuf,

    /// Cancel searches running longer than this many seconds
    #[arg(long, default_value = "60")]
    pub timeout_secs: u64,
}

pub fn run(args: ServerArgs) -> Result<()> {
    let config = configure_server(&args)?;

    tracing::info!("Starting league server on port {}", config.port);

    start_server(config)
}

fn configure_server(args: &ServerArgs) -> Result<ServerConfig> {
    validate_static_dir(&args.static_dir)?;
    if args.timeout_secs == 0 {
        anyhow::bail!("--timeout-secs must be at least 1");
    }

    Ok(ServerConfig {
        port: args.port,
        static_dir: args.static_dir.to_string_lossy().to_string(),
        search_timeout: Duration::from_secs(args.timeout_secs),
    })
}

/// Blocks until the server exits
fn start_server(config: ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async { run_server(config).await })
}

/// A missing directory only warns; a file in its place is an error
fn validate_static_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        tracing::warn!(
            "Static directory does not exist: {}. Server will start but may not serve files.",
            path.display()
        );
    } else if !path.is_dir() {
        anyhow::bail!(
            "Static path exists but is not a directory: {}",
            path.display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_server_defaults() {
        let args = ServerArgs {
            port: 8003,
            static_dir: PathBuf::from("test_static"),
            timeout_secs: 60,
        };

        let config = configure_server(&args).unwrap();
        assert_eq!(config.port, 8003);
        assert_eq!(config.static_dir, "test_static");
        assert_eq!(config.search_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let args = ServerArgs {
            port: 8003,
            static_dir: PathBuf::from("test_static"),
            timeout_secs: 0,
        };
        assert!(configure_server(&args).is_err());
    }

    #[test]
    fn test_static_path_must_be_directory() {
        let file = std::env::temp_dir().join(format!("league-static-{}", std::process::id()));
        std::fs::write(&file, "not a dir").unwrap();
        let result = validate_static_dir(&file);
        let _ = std::fs::remove_file(&file);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_static_dir_nonexistent() {
        // Should not error, just warn
        let result = validate_static_dir(Path::new("/nonexistent/path"));
        assert!(result.is_ok());
    }
}
