//! Games and index-based schedules

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::constraints::ConstraintTables;
use crate::error::ScheduleViolation;
use crate::league::LeagueConfig;

/// Unordered pairing of two distinct teams, stored as (low, high).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Game {
    pub low: usize,
    pub high: usize,
}

impl Game {
    pub fn new(a: usize, b: usize) -> Self {
        debug_assert_ne!(a, b, "a team cannot play itself");
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    pub fn involves(&self, team: usize) -> bool {
        self.low == team || self.high == team
    }
}

/// Every pairing of `n` teams, ascending by first then second team.
pub fn all_pairs(n: usize) -> Vec<Game> {
    let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            pairs.push(Game::new(i, j));
        }
    }
    pairs
}

/// Week-indexed list of games, each week in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    weeks: Vec<Vec<Game>>,
}

impl Schedule {
    pub fn from_weeks(weeks: Vec<Vec<Game>>) -> Self {
        Self { weeks }
    }

    pub fn weeks(&self) -> &[Vec<Game>] {
        &self.weeks
    }

    pub fn num_weeks(&self) -> usize {
        self.weeks.len()
    }

    pub fn week(&self, week: usize) -> &[Game] {
        &self.weeks[week]
    }

    pub fn total_games(&self) -> usize {
        self.weeks.iter().map(Vec::len).sum()
    }

    /// Games `team` plays across the whole schedule
    pub fn games_for_team(&self, team: usize) -> usize {
        self.weeks
            .iter()
            .flatten()
            .filter(|g| g.involves(team))
            .count()
    }

    /// Teams without a game in `week`, ascending
    pub fn byes_in_week(&self, week: usize, num_teams: usize) -> Vec<usize> {
        (0..num_teams)
            .filter(|&t| !self.weeks[week].iter().any(|g| g.involves(t)))
            .collect()
    }

    /// Check every invariant an accepted schedule must satisfy.
    pub fn verify(
        &self,
        config: &LeagueConfig,
        tables: &ConstraintTables,
    ) -> Result<(), ScheduleViolation> {
        let n = config.num_teams();
        if self.weeks.len() != tables.weeks() {
            return Err(ScheduleViolation::WrongWeekCount {
                expected: tables.weeks(),
                actual: self.weeks.len(),
            });
        }

        let mut seen = FxHashSet::default();
        let mut played = vec![0usize; n];

        for (week, games) in self.weeks.iter().enumerate() {
            if games.len() > tables.capacity(week) {
                return Err(ScheduleViolation::OverCapacity {
                    week,
                    games: games.len(),
                    capacity: tables.capacity(week),
                });
            }

            let mut busy = vec![false; n];
            for game in games {
                if game.high >= n || game.low == game.high {
                    return Err(ScheduleViolation::UnknownTeam {
                        low: game.low,
                        high: game.high,
                    });
                }
                for team in [game.low, game.high] {
                    if busy[team] {
                        return Err(ScheduleViolation::DoubleBooked { team, week });
                    }
                    if tables.is_forbidden(team, week) {
                        return Err(ScheduleViolation::PlaysWhileUnavailable { team, week });
                    }
                    busy[team] = true;
                    played[team] += 1;
                }
                if !seen.insert(*game) {
                    return Err(ScheduleViolation::RepeatedPairing {
                        low: game.low,
                        high: game.high,
                    });
                }
            }
        }

        for (team, &actual) in played.iter().enumerate() {
            if actual != config.games_per_team {
                return Err(ScheduleViolation::WrongGameCount {
                    team,
                    expected: config.games_per_team,
                    actual,
                });
            }
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::Unavailability;

    fn setup(unavailable: Unavailability) -> (LeagueConfig, ConstraintTables) {
        let config = LeagueConfig::with_numbered_teams(4, 3, 2);
        let tables = ConstraintTables::compile(4, &unavailable, 2, config.weeks());
        (config, tables)
    }

    fn valid_schedule() -> Schedule {
        Schedule::from_weeks(vec![
            vec![Game::new(0, 1), Game::new(2, 3)],
            vec![Game::new(0, 2), Game::new(1, 3)],
            vec![Game::new(0, 3), Game::new(1, 2)],
        ])
    }

    #[test]
    fn test_game_is_canonical() {
        assert_eq!(Game::new(3, 1), Game::new(1, 3));
        assert_eq!(Game::new(3, 1).low, 1);
        assert!(Game::new(0, 2).involves(2));
        assert!(!Game::new(0, 2).involves(1));
    }

    #[test]
    fn test_all_pairs_order() {
        let pairs = all_pairs(4);
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[0], Game::new(0, 1));
        assert_eq!(pairs[2], Game::new(0, 3));
        assert_eq!(pairs[3], Game::new(1, 2));
        assert_eq!(pairs[5], Game::new(2, 3));
        assert!(all_pairs(1).is_empty());
    }

    #[test]
    fn test_verify_accepts_valid() {
        let (config, tables) = setup(Unavailability::new());
        let schedule = valid_schedule();
        assert_eq!(schedule.verify(&config, &tables), Ok(()));
        assert_eq!(schedule.total_games(), 6);
        assert_eq!(schedule.games_for_team(2), 3);
        assert!(schedule.byes_in_week(1, 4).is_empty());
    }

    #[test]
    fn test_verify_repeated_pairing() {
        let (config, tables) = setup(Unavailability::new());
        let schedule = Schedule::from_weeks(vec![
            vec![Game::new(0, 1), Game::new(2, 3)],
            vec![Game::new(0, 1), Game::new(2, 3)],
            vec![Game::new(0, 3), Game::new(1, 2)],
        ]);
        assert_eq!(
            schedule.verify(&config, &tables),
            Err(ScheduleViolation::RepeatedPairing { low: 0, high: 1 })
        );
    }

    #[test]
    fn test_verify_double_booked() {
        let (config, tables) = setup(Unavailability::new());
        let schedule = Schedule::from_weeks(vec![
            vec![Game::new(0, 1), Game::new(0, 2)],
            vec![],
            vec![],
        ]);
        assert_eq!(
            schedule.verify(&config, &tables),
            Err(ScheduleViolation::DoubleBooked { team: 0, week: 0 })
        );
    }

    #[test]
    fn test_verify_unavailable_team() {
        let (config, tables) = setup([(3, vec![2])].into_iter().collect());
        // Week 2 capacity drops to 1, so use a single-game week first
        let schedule = Schedule::from_weeks(vec![vec![Game::new(0, 3)], vec![], vec![]]);
        assert!(schedule.verify(&config, &tables).is_err());

        let schedule = Schedule::from_weeks(vec![vec![], vec![], vec![Game::new(1, 3)]]);
        assert_eq!(
            schedule.verify(&config, &tables),
            Err(ScheduleViolation::PlaysWhileUnavailable { team: 3, week: 2 })
        );
    }

    #[test]
    fn test_verify_counts_and_shape() {
        let (config, tables) = setup(Unavailability::new());
        let short = Schedule::from_weeks(vec![vec![Game::new(0, 1)]]);
        assert!(matches!(
            short.verify(&config, &tables),
            Err(ScheduleViolation::WrongWeekCount { expected: 3, actual: 1 })
        ));

        let missing = Schedule::from_weeks(vec![
            vec![Game::new(0, 1), Game::new(2, 3)],
            vec![Game::new(0, 2), Game::new(1, 3)],
            vec![Game::new(0, 3)],
        ]);
        assert_eq!(
            missing.verify(&config, &tables),
            Err(ScheduleViolation::WrongGameCount { team: 1, expected: 3, actual: 2 })
        );
    }
}
