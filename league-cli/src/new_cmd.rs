//! New command - write a starter league file

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use league_core::LeagueFile;

#[derive(Args)]
pub struct NewArgs {
    /// Where to write the league file
    #[arg(value_name = "OUT")]
    pub out: PathBuf,

    /// Number of teams
    #[arg(long, default_value = "10")]
    pub teams: usize,

    /// Games each team plays
    #[arg(long, default_value = "8")]
    pub games_per_team: usize,

    /// Maximum games in a week
    #[arg(long, default_value = "4")]
    pub games_per_week: usize,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: NewArgs) -> Result<()> {
    if args.out.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            args.out.display()
        );
    }

    let league = LeagueFile::example(args.teams, args.games_per_team, args.games_per_week);
    league.config.validate()?;
    league.save(&args.out)?;

    tracing::info!(
        "Wrote {} with {} teams over {} weeks",
        args.out.display(),
        league.config.num_teams(),
        league.config.weeks()
    );
    Ok(())
}
