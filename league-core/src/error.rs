//! Error types for league configuration and schedule verification

use thiserror::Error;

/// A league configuration that must be rejected before any search runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("a league needs at least 2 teams, got {0}")]
    TooFewTeams(usize),

    #[error("team name at position {0} is blank")]
    BlankTeamName(usize),

    #[error("team name '{0}' appears more than once")]
    DuplicateTeamName(String),

    #[error("games per team must be between 1 and {max}, got {games_per_team}")]
    GamesPerTeamOutOfRange { games_per_team: usize, max: usize },

    #[error("games per week must be between 1 and {max}, got {games_per_week}")]
    GamesPerWeekOutOfRange { games_per_week: usize, max: usize },

    #[error("{teams} teams playing {games_per_team} games each gives an odd number of team-games")]
    OddGameTotal { teams: usize, games_per_team: usize },

    #[error("unavailability refers to unknown team '{0}'")]
    UnknownTeam(String),

    #[error("unavailability refers to team index {index}, but the league has {teams} teams")]
    TeamIndexOutOfRange { index: usize, teams: usize },
}

/// A broken invariant found in a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleViolation {
    #[error("schedule has {actual} weeks, expected {expected}")]
    WrongWeekCount { expected: usize, actual: usize },

    #[error("week {week} has {games} games, capacity is {capacity}")]
    OverCapacity { week: usize, games: usize, capacity: usize },

    #[error("team {team} plays more than once in week {week}")]
    DoubleBooked { team: usize, week: usize },

    #[error("team {team} is scheduled in week {week} but is unavailable")]
    PlaysWhileUnavailable { team: usize, week: usize },

    #[error("teams {low} and {high} meet more than once")]
    RepeatedPairing { low: usize, high: usize },

    #[error("game {low} vs {high} refers to a team outside the league")]
    UnknownTeam { low: usize, high: usize },

    #[error("team {team} plays {actual} games, expected {expected}")]
    WrongGameCount { team: usize, expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::GamesPerWeekOutOfRange { games_per_week: 4, max: 2 };
        assert_eq!(err.to_string(), "games per week must be between 1 and 2, got 4");

        let err = ConfigError::UnknownTeam("Rovers".into());
        assert!(err.to_string().contains("Rovers"));
    }

    #[test]
    fn test_violation_messages() {
        let err = ScheduleViolation::RepeatedPairing { low: 0, high: 3 };
        assert_eq!(err.to_string(), "teams 0 and 3 meet more than once");
    }
}
