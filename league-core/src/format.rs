//! Result formatting - team indices back to names, and the report shape
//! handed to callers

use serde::{Deserialize, Serialize};

use crate::schedule::Schedule;
use crate::search::{Prune, SearchStats};

/// Fixed message for a search that exhausted every branch
pub const INFEASIBLE_MESSAGE: &str = "no valid schedule exists under the given constraints";

/// Fixed message for a search stopped by its caller
pub const CANCELLED_MESSAGE: &str = "schedule generation cancelled";

// ============================================================================
// NAMED FIXTURES
// ============================================================================

/// One week of a schedule, by team name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekFixtures {
    /// Pairings in the order they were scheduled
    pub games: Vec<[String; 2]>,
    /// Teams without a game, in roster order
    pub byes: Vec<String>,
}

/// A full schedule by team name, in week order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixtures {
    pub weeks: Vec<WeekFixtures>,
}

impl Fixtures {
    pub fn num_weeks(&self) -> usize {
        self.weeks.len()
    }

    /// Most games in any single week
    pub fn max_games_in_week(&self) -> usize {
        self.weeks.iter().map(|w| w.games.len()).max().unwrap_or(0)
    }
}

/// Map an index-based schedule onto team names.
pub fn format_schedule(schedule: &Schedule, team_names: &[String]) -> Fixtures {
    let weeks = (0..schedule.num_weeks())
        .map(|week| WeekFixtures {
            games: schedule
                .week(week)
                .iter()
                .map(|g| [team_names[g.low].clone(), team_names[g.high].clone()])
                .collect(),
            byes: schedule
                .byes_in_week(week, team_names.len())
                .into_iter()
                .map(|t| team_names[t].clone())
                .collect(),
        })
        .collect();
    Fixtures { weeks }
}

// ============================================================================
// OUTCOME
// ============================================================================

/// A successful search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedSchedule {
    pub schedule: Schedule,
    pub fixtures: Fixtures,
    pub stats: SearchStats,
}

/// A search that found no schedule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InfeasibleReport {
    pub message: &'static str,
    /// Prune that rejected the instance before any game was placed
    pub root_prune: Option<Prune>,
    pub stats: SearchStats,
}

impl InfeasibleReport {
    pub fn new(stats: SearchStats) -> Self {
        Self {
            message: INFEASIBLE_MESSAGE,
            root_prune: stats.root_prune,
            stats,
        }
    }
}

/// Result of one schedule generation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Scheduled(GeneratedSchedule),
    Infeasible(InfeasibleReport),
    Cancelled,
}

impl Outcome {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, Outcome::Scheduled(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    pub fn fixtures(&self) -> Option<&Fixtures> {
        match self {
            Outcome::Scheduled(generated) => Some(&generated.fixtures),
            _ => None,
        }
    }

    pub fn to_report(&self) -> ScheduleReport {
        match self {
            Outcome::Scheduled(generated) => ScheduleReport::scheduled(&generated.fixtures),
            Outcome::Infeasible(report) => ScheduleReport::failed(report.message),
            Outcome::Cancelled => ScheduleReport::cancelled(),
        }
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// Caller-facing result shape:
/// `{ success: true, schedule, byes }`, `{ success: false, message }`, or
/// `{ success: false, cancelled: true, message }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub success: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cancelled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<Vec<[String; 2]>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byes: Option<Vec<Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ScheduleReport {
    pub fn scheduled(fixtures: &Fixtures) -> Self {
        Self {
            success: true,
            cancelled: false,
            schedule: Some(fixtures.weeks.iter().map(|w| w.games.clone()).collect()),
            byes: Some(fixtures.weeks.iter().map(|w| w.byes.clone()).collect()),
            message: None,
        }
    }

    pub fn failed(message: &str) -> Self {
        Self {
            success: false,
            cancelled: false,
            schedule: None,
            byes: None,
            message: Some(message.to_string()),
        }
    }

    pub fn cancelled() -> Self {
        Self {
            cancelled: true,
            ..Self::failed(CANCELLED_MESSAGE)
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
