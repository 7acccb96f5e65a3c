//! Availability pre-check
//!
//! Cheap necessary conditions an availability grid can evaluate on every
//! edit, before a full search is attempted:
//! - the weeks together must hold every game
//! - no team may sit out more weeks than its byes allow

use std::fmt;

use serde::Serialize;

use crate::constraints::ConstraintTables;
use crate::error::ConfigError;
use crate::league::{LeagueConfig, Unavailability};

/// A condition that rules out any schedule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AvailabilityWarning {
    TotalCapacityShort { possible: usize, needed: usize },
    TooManyUnavailableWeeks { team: String, unavailable: usize, max: usize },
}

impl fmt::Display for AvailabilityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityWarning::TotalCapacityShort { possible, needed } => write!(
                f,
                "the total possible games ({}) are less than the total games needed ({})",
                possible, needed
            ),
            AvailabilityWarning::TooManyUnavailableWeeks { team, unavailable, max } => write!(
                f,
                "{} is unavailable for {} weeks but can have at most {}",
                team, unavailable, max
            ),
        }
    }
}

/// A (team, week) cell that cannot be marked unavailable without
/// triggering a warning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BlockedCell {
    pub team: usize,
    pub week: usize,
}

/// Summary of an availability map against a league configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AvailabilityCheck {
    pub weeks: usize,
    pub possible_games_per_week: Vec<usize>,
    pub total_possible: usize,
    pub total_needed: usize,
    /// Unavailable weeks inside the horizon, per team
    pub unavailable_weeks: Vec<usize>,
    pub max_unavailable_weeks: usize,
    pub warnings: Vec<AvailabilityWarning>,
    /// Unmarked cells whose marking would trigger a warning
    pub blocked: Vec<BlockedCell>,
    #[serde(skip)]
    marked: Vec<Vec<bool>>,
    #[serde(skip)]
    unavailable_per_week: Vec<usize>,
    #[serde(skip)]
    games_per_week: usize,
}

impl AvailabilityCheck {
    pub fn evaluate(config: &LeagueConfig, unavailable: &Unavailability) -> Result<Self, ConfigError> {
        config.validate()?;
        config.check_team_indices(unavailable)?;

        let n = config.num_teams();
        let weeks = config.weeks();
        let tables = ConstraintTables::compile(n, unavailable, config.games_per_week, weeks);

        let possible_games_per_week = tables.capacities().to_vec();
        let total_possible = tables.capacity_from(0);
        let total_needed = config.total_games();
        let unavailable_weeks: Vec<usize> = (0..n).map(|t| tables.upcoming_byes(t, 0)).collect();
        let max_unavailable_weeks = config.byes_per_team();

        let mut warnings = Vec::new();
        if total_possible < total_needed {
            warnings.push(AvailabilityWarning::TotalCapacityShort {
                possible: total_possible,
                needed: total_needed,
            });
        }
        for (team, &count) in unavailable_weeks.iter().enumerate() {
            if count > max_unavailable_weeks {
                warnings.push(AvailabilityWarning::TooManyUnavailableWeeks {
                    team: config.team_names[team].clone(),
                    unavailable: count,
                    max: max_unavailable_weeks,
                });
            }
        }

        let mut check = Self {
            weeks,
            possible_games_per_week,
            total_possible,
            total_needed,
            unavailable_weeks,
            max_unavailable_weeks,
            warnings,
            blocked: Vec::new(),
            marked: (0..n)
                .map(|t| (0..weeks).map(|w| tables.is_forbidden(t, w)).collect())
                .collect(),
            unavailable_per_week: (0..weeks).map(|w| tables.forbidden(w).len()).collect(),
            games_per_week: config.games_per_week,
        };

        check.blocked = (0..n)
            .flat_map(|team| (0..weeks).map(move |week| BlockedCell { team, week }))
            .filter(|cell| !check.can_mark_unavailable(cell.team, cell.week))
            .collect();

        Ok(check)
    }

    /// No warning fired
    pub fn is_clear(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Whether marking `team` unavailable in `week` keeps every check
    /// passing. Already-marked cells and weeks outside the horizon are
    /// always accepted.
    pub fn can_mark_unavailable(&self, team: usize, week: usize) -> bool {
        if week >= self.weeks || self.marked[team][week] {
            return true;
        }

        if self.unavailable_weeks[team] + 1 > self.max_unavailable_weeks {
            return false;
        }

        let num_teams = self.marked.len();
        let available = num_teams - self.unavailable_per_week[week] - 1;
        let new_capacity = self.games_per_week.min(available / 2);
        let new_total = self.total_possible - self.possible_games_per_week[week] + new_capacity;
        new_total >= self.total_needed
    }
}

// ============================================================================
// TESTS
// ============================================================================
