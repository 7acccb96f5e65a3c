//! League CLI - Command-line interface
//!
//! Commands:
//! - generate: Search for a schedule for a league file
//! - check: Availability pre-check without searching
//! - new: Write a starter league file
//! - serve: Start the HTTP server

mod check;
mod export;
mod generate;
mod logging;
mod new_cmd;
mod render;
mod server;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "league")]
#[command(about = "Round-robin league schedule generator")]
struct Cli {
    /// Verbose logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a schedule
    Generate(generate::GenerateArgs),
    /// Check availability without searching
    Check(check::CheckArgs),
    /// Write a starter league file
    New(new_cmd::NewArgs),
    /// Start the HTTP server
    Serve(server::ServerArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    match cli.command {
        Commands::Generate(args) => generate::run(args),
        Commands::Check(args) => check::run(args),
        Commands::New(args) => new_cmd::run(args),
        Commands::Serve(args) => server::run(args),
    }
}
