//! Schedule generation entry points
//!
//! - Level 1: generate_schedule / generate_from_file (orchestration)
//! - Level 2: compile constraints, search, format

use crate::cancel::CancelToken;
use crate::constraints::ConstraintTables;
use crate::error::ConfigError;
use crate::format::{format_schedule, GeneratedSchedule, InfeasibleReport, Outcome};
use crate::league::{LeagueConfig, LeagueFile, Unavailability};
use crate::search::{Search, SearchOutcome};

/// Generate a schedule for `config` with team-indexed unavailability.
///
/// Invalid configuration is an error; an infeasible or cancelled search is
/// a normal `Outcome`.
pub fn generate_schedule(
    config: &LeagueConfig,
    unavailable: &Unavailability,
    cancel: &CancelToken,
) -> Result<Outcome, ConfigError> {
    config.validate()?;
    config.check_team_indices(unavailable)?;

    let weeks = config.weeks();
    tracing::debug!(
        "There will be {} weeks, and {} byes for each team",
        weeks,
        config.byes_per_team()
    );

    let tables = ConstraintTables::compile(
        config.num_teams(),
        unavailable,
        config.games_per_week,
        weeks,
    );

    let (result, stats) = Search::new(&tables, config.games_per_team, cancel).run();

    let outcome = match result {
        SearchOutcome::Found(schedule) => {
            debug_assert_eq!(schedule.verify(config, &tables), Ok(()));
            let fixtures = format_schedule(&schedule, &config.team_names);
            Outcome::Scheduled(GeneratedSchedule {
                schedule,
                fixtures,
                stats,
            })
        }
        SearchOutcome::Exhausted => Outcome::Infeasible(InfeasibleReport::new(stats)),
        SearchOutcome::Cancelled => Outcome::Cancelled,
    };

    Ok(outcome)
}

/// Generate a schedule from a league file (unavailability keyed by name).
pub fn generate_from_file(league: &LeagueFile, cancel: &CancelToken) -> Result<Outcome, ConfigError> {
    league.config.validate()?;
    let unavailable = league.resolve()?;
    generate_schedule(&league.config, &unavailable, cancel)
}

// ============================================================================
// TESTS
// ============================================================================
