//! Check command - availability pre-check without searching
//!
//! - Level 1: run() - orchestration
//! - Level 2: evaluate(), report

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use league_core::{AvailabilityCheck, LeagueFile};

use crate::render;

#[derive(Args)]
pub struct CheckArgs {
    /// League JSON file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run check command. Warnings are reported, not treated as failure.
pub fn run(args: CheckArgs) -> Result<()> {
    let league = LeagueFile::load(&args.file)?;
    let check = evaluate(&league)?;

    if check.is_clear() {
        tracing::info!("No availability problems in {}", args.file.display());
    } else {
        tracing::warn!("{} availability warning(s)", check.warnings.len());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&check)?);
    } else {
        print!("{}", render::availability_report(&league.config, &check));
    }

    Ok(())
}

fn evaluate(league: &LeagueFile) -> Result<AvailabilityCheck> {
    league.config.validate()?;
    let unavailable = league.resolve()?;
    Ok(AvailabilityCheck::evaluate(&league.config, &unavailable)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_resolves_names() {
        let league = LeagueFile::example(5, 4, 2)
            .with_unavailable("Team 3", 0)
            .with_unavailable("Team 3", 4);
        let check = evaluate(&league).unwrap();
        assert_eq!(check.unavailable_weeks[2], 2);
        assert!(!check.is_clear());
    }

    #[test]
    fn test_evaluate_rejects_unknown_team() {
        let league = LeagueFile::example(4, 3, 2).with_unavailable("Team 9", 0);
        let err = evaluate(&league).unwrap_err();
        assert!(err.to_string().contains("Team 9"));
    }
}
