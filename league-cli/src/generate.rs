//! Generate command - search for a schedule for a league file
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_league(), run_search(), report_outcome()
//! - Level 3: spinner, deadline watch
//! - Level 4: formatting utilities

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use league_core::{generate_from_file, CancelToken, LeagueFile, Outcome};

use crate::{export, render};

/// How often the main thread wakes to tick the spinner and check the deadline
const POLL_INTERVAL: Duration = Duration::from_millis(100);

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct GenerateArgs {
    /// League JSON file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Cancel the search after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Output the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Also write the schedule as CSV
    #[arg(long, value_name = "OUT")]
    pub csv: Option<PathBuf>,

    /// Hide the progress spinner
    #[arg(long)]
    pub no_progress: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run generate command
///
/// This function reads like a table of contents:
/// 1. Load the league file
/// 2. Search on a worker thread, cancelling at the deadline
/// 3. Report the outcome (and export CSV on success)
pub fn run(args: GenerateArgs) -> Result<()> {
    let league = load_league(&args)?;

    tracing::info!(
        "Scheduling {} teams: {} games each, {} per week, {} weeks",
        league.config.num_teams(),
        league.config.games_per_team,
        league.config.games_per_week,
        league.config.weeks()
    );

    let timeout = args.timeout_secs.map(Duration::from_secs);
    let outcome = run_search(&league, timeout, !args.no_progress, CancelToken::new())?;

    report_outcome(&league, &outcome, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_league(args: &GenerateArgs) -> Result<LeagueFile> {
    let league = LeagueFile::load(&args.file)?;
    league.config.validate()?;
    league.resolve()?;
    Ok(league)
}

/// Run the search on a worker thread while this thread draws the spinner.
/// `cancel` is raised here once `timeout` elapses.
fn run_search(
    league: &LeagueFile,
    timeout: Option<Duration>,
    progress: bool,
    cancel: CancelToken,
) -> Result<Outcome> {
    let spinner = create_spinner(progress)?;
    let started = Instant::now();

    let worker = {
        let league = league.clone();
        let cancel = cancel.clone();
        thread::spawn(move || generate_from_file(&league, &cancel))
    };

    while !worker.is_finished() {
        if deadline_passed(started, timeout) && !cancel.is_cancelled() {
            tracing::warn!("Search exceeded {:?}, cancelling", started.elapsed());
            spinner.set_message("cancelling");
            cancel.cancel();
        }
        thread::sleep(POLL_INTERVAL);
    }
    spinner.finish_and_clear();

    let outcome = worker
        .join()
        .map_err(|_| anyhow!("schedule search thread panicked"))??;

    tracing::debug!("Search finished in {:.2?}", started.elapsed());
    Ok(outcome)
}

/// Print the outcome; infeasible and cancelled searches become errors.
fn report_outcome(league: &LeagueFile, outcome: &Outcome, args: &GenerateArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.to_report())?);
    }

    match outcome {
        Outcome::Scheduled(generated) => {
            if !args.json {
                print!("{}", render::fixtures_table(&generated.fixtures));
            }
            tracing::info!("Search: {}", render::stats_line(&generated.stats));
            if let Some(path) = &args.csv {
                export::write_schedule_csv(path, league, &generated.fixtures)?;
            }
            Ok(())
        }
        Outcome::Infeasible(report) => {
            if let Some(prune) = report.root_prune {
                tracing::info!("Rejected before placing any game ({:?} bound)", prune);
            }
            tracing::info!("Search: {}", render::stats_line(&report.stats));
            Err(anyhow!(report.message))
        }
        Outcome::Cancelled => Err(anyhow!(league_core::format::CANCELLED_MESSAGE)),
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn create_spinner(visible: bool) -> Result<ProgressBar> {
    if !visible {
        return Ok(ProgressBar::hidden());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")?);
    spinner.set_message("searching");
    spinner.enable_steady_tick(POLL_INTERVAL);
    Ok(spinner)
}

fn deadline_passed(started: Instant, timeout: Option<Duration>) -> bool {
    timeout.is_some_and(|limit| started.elapsed() >= limit)
}

// ============================================================================
// TESTS
// ============================================================================
