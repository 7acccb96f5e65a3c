//! Backtracking schedule search
//!
//! Two mutually recursive procedures share one `SearchState`:
//! - `Search::sequence` walks the weeks, pruning branches that can no
//!   longer finish (week sequencer)
//! - `Search::assign` chooses the games of a single week, trying to close
//!   the week before extending it (week assigner)
//!
//! Every mutation made on the way down is undone on the way back up, so a
//! sibling branch always starts from the state its parent saw.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cancel::CancelToken;
use crate::constraints::ConstraintTables;
use crate::schedule::{all_pairs, Game, Schedule};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Candidate examinations between cancellation checks inside a week
pub const CANCEL_CHECK_INTERVAL: u64 = 1024;

// ============================================================================
// RESULT TYPES
// ============================================================================

/// Feasibility check that rejected a branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prune {
    /// Remaining weekly capacity cannot hold the games still needed
    Capacity,
    /// Some team cannot fit its remaining games around its forced byes
    Deadline,
}

/// Counters collected during one search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub weeks_entered: u64,
    pub candidates_examined: u64,
    pub games_placed: u64,
    pub games_removed: u64,
    pub capacity_prunes: u64,
    pub deadline_prunes: u64,
    /// Set when the instance was rejected before any game was placed
    pub root_prune: Option<Prune>,
}

/// The cancellation signal was observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cancelled;

/// How a search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Schedule),
    Exhausted,
    Cancelled,
}

// ============================================================================
// SEARCH STATE
// ============================================================================

/// Mutable state of one search, owned exclusively by it.
#[derive(Debug)]
struct SearchState {
    /// Pairings placed anywhere in the schedule
    played: FxHashSet<Game>,
    /// Games each team still has to play
    games_left: Vec<usize>,
    /// Sum of `games_left`
    team_games_left: usize,
    /// Committed weeks plus the week under construction (last)
    weeks: Vec<Vec<Game>>,
}

impl SearchState {
    fn new(num_teams: usize, games_per_team: usize) -> Self {
        Self {
            played: FxHashSet::default(),
            games_left: vec![games_per_team; num_teams],
            team_games_left: num_teams * games_per_team,
            weeks: Vec::new(),
        }
    }

    /// Games that still have to be scheduled
    fn games_needed(&self) -> usize {
        self.team_games_left / 2
    }

    fn all_done(&self) -> bool {
        self.games_left.iter().all(|&left| left == 0)
    }

    fn open_week(&mut self) {
        self.weeks.push(Vec::new());
    }

    /// Discard the week under construction
    fn discard_week(&mut self) {
        self.weeks.pop();
    }

    fn current_week(&self) -> &[Game] {
        self.weeks.last().map(Vec::as_slice).unwrap_or(&[])
    }

    fn is_eligible(&self, game: Game, week: usize, tables: &ConstraintTables) -> bool {
        !self.played.contains(&game)
            && !tables.is_forbidden(game.low, week)
            && !tables.is_forbidden(game.high, week)
            && self.games_left[game.low] > 0
            && self.games_left[game.high] > 0
            && !self
                .current_week()
                .iter()
                .any(|g| g.involves(game.low) || g.involves(game.high))
    }

    fn place(&mut self, game: Game) {
        self.played.insert(game);
        self.games_left[game.low] -= 1;
        self.games_left[game.high] -= 1;
        self.team_games_left -= 2;
        if let Some(week) = self.weeks.last_mut() {
            week.push(game);
        }
    }

    fn unplace(&mut self, game: Game) {
        if let Some(week) = self.weeks.last_mut() {
            let removed = week.pop();
            debug_assert_eq!(removed, Some(game));
        }
        self.team_games_left += 2;
        self.games_left[game.high] += 1;
        self.games_left[game.low] += 1;
        self.played.remove(&game);
    }
}

// ============================================================================
// SEARCH
// ============================================================================

/// Depth-first search for a complete schedule.
pub struct Search<'a> {
    tables: &'a ConstraintTables,
    cancel: &'a CancelToken,
    /// Candidate pairings in enumeration order
    pairs: Vec<Game>,
    state: SearchState,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    pub fn new(tables: &'a ConstraintTables, games_per_team: usize, cancel: &'a CancelToken) -> Self {
        let num_teams = tables.num_teams();
        Self {
            tables,
            cancel,
            pairs: all_pairs(num_teams),
            state: SearchState::new(num_teams, games_per_team),
            stats: SearchStats::default(),
        }
    }

    /// Run the search to completion, exhaustion, or cancellation.
    pub fn run(mut self) -> (SearchOutcome, SearchStats) {
        if self.cancel.is_cancelled() {
            return (SearchOutcome::Cancelled, self.stats);
        }

        tracing::debug!(
            "Searching {} weeks for {} games",
            self.tables.weeks(),
            self.state.games_needed()
        );

        let outcome = match self.sequence(0) {
            Ok(true) => {
                let weeks = std::mem::take(&mut self.state.weeks);
                SearchOutcome::Found(Schedule::from_weeks(weeks))
            }
            Ok(false) => SearchOutcome::Exhausted,
            Err(Cancelled) => SearchOutcome::Cancelled,
        };

        tracing::debug!(
            "Search finished: {} after {} placements, {} backtracks",
            match &outcome {
                SearchOutcome::Found(_) => "found",
                SearchOutcome::Exhausted => "exhausted",
                SearchOutcome::Cancelled => "cancelled",
            },
            self.stats.games_placed,
            self.stats.games_removed
        );

        (outcome, self.stats)
    }

    /// Week sequencer: prune, then hand week `week` to the assigner.
    fn sequence(&mut self, week: usize) -> Result<bool, Cancelled> {
        self.checkpoint()?;
        self.stats.weeks_entered += 1;

        let weeks = self.tables.weeks();
        let needed = self.state.games_needed();
        let available = self.tables.capacity_from(week);
        tracing::trace!(
            "Week {}: capacity left {}, games needed {}",
            week + 1,
            available,
            needed
        );

        if available < needed {
            self.record_prune(Prune::Capacity, week);
            return Ok(false);
        }

        if week == weeks {
            return Ok(self.state.all_done());
        }

        let weeks_left = weeks - week;
        let tables = self.tables;
        let behind = (0..tables.num_teams())
            .any(|team| self.state.games_left[team] + tables.upcoming_byes(team, week) > weeks_left);
        if behind {
            self.record_prune(Prune::Deadline, week);
            return Ok(false);
        }

        self.state.open_week();
        let found = self.assign(week, 0)?;
        if !found {
            self.state.discard_week();
        }
        Ok(found)
    }

    /// Week assigner: close the week if allowed, otherwise (or after that
    /// fails) add one more game from `pairs[next..]`.
    fn assign(&mut self, week: usize, next: usize) -> Result<bool, Cancelled> {
        let capacity = self.tables.capacity(week);
        let at_capacity = self.state.current_week().len() >= capacity;
        let later_fits = self.state.games_needed() <= self.tables.capacity_from(week + 1);

        if at_capacity || later_fits {
            if self.sequence(week + 1)? {
                return Ok(true);
            }
            if at_capacity {
                return Ok(false);
            }
        }

        for index in next..self.pairs.len() {
            self.tick()?;
            let game = self.pairs[index];
            if !self.state.is_eligible(game, week, self.tables) {
                continue;
            }

            self.state.place(game);
            self.stats.games_placed += 1;

            if self.assign(week, index + 1)? {
                return Ok(true);
            }

            self.state.unplace(game);
            self.stats.games_removed += 1;
        }

        Ok(false)
    }

    fn record_prune(&mut self, prune: Prune, week: usize) {
        match prune {
            Prune::Capacity => self.stats.capacity_prunes += 1,
            Prune::Deadline => self.stats.deadline_prunes += 1,
        }
        if week == 0 {
            self.stats.root_prune = Some(prune);
        }
        tracing::trace!("Week {}: {:?} prune", week + 1, prune);
    }

    fn checkpoint(&self) -> Result<(), Cancelled> {
        if self.cancel.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    /// Count one candidate examination, checking for cancellation every
    /// `CANCEL_CHECK_INTERVAL` calls.
    fn tick(&mut self) -> Result<(), Cancelled> {
        self.stats.candidates_examined += 1;
        if self.stats.candidates_examined % CANCEL_CHECK_INTERVAL == 0 {
            self.checkpoint()
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
