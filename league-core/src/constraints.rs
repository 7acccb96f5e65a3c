//! Constraint compilation
//!
//! Turns a sparse team -> unavailable-weeks map into the static tables the
//! search consults on every node:
//! - which teams are forbidden in each week
//! - how many games each week can hold
//! - how many forced byes each team still faces from a week onwards

use crate::league::Unavailability;

/// Per-search static tables derived from the unavailability map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstraintTables {
    num_teams: usize,
    weeks: usize,
    /// Unavailable teams per week, ascending and de-duplicated
    forbidden: Vec<Vec<usize>>,
    /// forbidden_mask[week][team]
    forbidden_mask: Vec<Vec<bool>>,
    /// Games playable per week
    capacity: Vec<usize>,
    /// capacity_from[w] = capacity[w..].sum(), with capacity_from[weeks] = 0
    capacity_from: Vec<usize>,
    /// upcoming_byes[team][w] = forced byes in weeks w..weeks, with a trailing 0
    upcoming_byes: Vec<Vec<usize>>,
}

impl ConstraintTables {
    /// Compile tables for one search.
    ///
    /// Weeks at or beyond the horizon are dropped. Team indices must already
    /// be checked against the roster.
    pub fn compile(
        num_teams: usize,
        unavailable: &Unavailability,
        games_per_week: usize,
        weeks: usize,
    ) -> Self {
        let mut forbidden_mask = vec![vec![false; num_teams]; weeks];
        for (&team, team_weeks) in unavailable {
            for &week in team_weeks {
                if week >= weeks {
                    tracing::debug!(
                        "Dropping unavailability for team {} in week {} (horizon is {} weeks)",
                        team,
                        week,
                        weeks
                    );
                    continue;
                }
                forbidden_mask[week][team] = true;
            }
        }

        let forbidden: Vec<Vec<usize>> = forbidden_mask
            .iter()
            .map(|mask| (0..num_teams).filter(|&t| mask[t]).collect())
            .collect();

        let capacity: Vec<usize> = forbidden
            .iter()
            .map(|teams| games_per_week.min((num_teams - teams.len()) / 2))
            .collect();

        let mut capacity_from = vec![0; weeks + 1];
        for w in (0..weeks).rev() {
            capacity_from[w] = capacity[w] + capacity_from[w + 1];
        }

        let mut upcoming_byes = vec![vec![0; weeks + 1]; num_teams];
        for (team, byes) in upcoming_byes.iter_mut().enumerate() {
            for w in (0..weeks).rev() {
                byes[w] = usize::from(forbidden_mask[w][team]) + byes[w + 1];
            }
        }

        Self {
            num_teams,
            weeks,
            forbidden,
            forbidden_mask,
            capacity,
            capacity_from,
            upcoming_byes,
        }
    }

    pub fn num_teams(&self) -> usize {
        self.num_teams
    }

    pub fn weeks(&self) -> usize {
        self.weeks
    }

    /// Teams unavailable in `week`
    pub fn forbidden(&self, week: usize) -> &[usize] {
        &self.forbidden[week]
    }

    pub fn is_forbidden(&self, team: usize, week: usize) -> bool {
        self.forbidden_mask[week][team]
    }

    pub fn capacity(&self, week: usize) -> usize {
        self.capacity[week]
    }

    pub fn capacities(&self) -> &[usize] {
        &self.capacity
    }

    /// Total capacity of weeks `week..weeks`
    pub fn capacity_from(&self, week: usize) -> usize {
        self.capacity_from[week]
    }

    /// Forced byes for `team` in weeks `week..weeks`
    pub fn upcoming_byes(&self, team: usize, week: usize) -> usize {
        self.upcoming_byes[team][week]
    }
}

// ============================================================================
// TESTS
// ============================================================================
