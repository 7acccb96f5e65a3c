//! League configuration - roster, game counts, and unavailability
//!
//! Week indices are 0-based everywhere in this crate. Only human-facing
//! renderings print 1-based week numbers.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Team index -> 0-based weeks in which that team cannot play.
pub type Unavailability = BTreeMap<usize, Vec<usize>>;

/// Roster and game-count settings for one league.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueConfig {
    /// Display names, in roster order; a team's index is its position here
    #[serde(rename = "teams")]
    pub team_names: Vec<String>,
    /// Games every team must play
    pub games_per_team: usize,
    /// Most games that can be played in a single week
    pub games_per_week: usize,
}

impl LeagueConfig {
    pub fn new(team_names: Vec<String>, games_per_team: usize, games_per_week: usize) -> Self {
        Self {
            team_names,
            games_per_team,
            games_per_week,
        }
    }

    /// Config with generated names "Team 1".."Team N"
    pub fn with_numbered_teams(num_teams: usize, games_per_team: usize, games_per_week: usize) -> Self {
        let names = (1..=num_teams).map(|i| format!("Team {}", i)).collect();
        Self::new(names, games_per_team, games_per_week)
    }

    pub fn num_teams(&self) -> usize {
        self.team_names.len()
    }

    /// Horizon: `ceil(N * games_per_team / (2 * games_per_week))`
    pub fn weeks(&self) -> usize {
        if self.games_per_week == 0 {
            return 0;
        }
        (self.num_teams() * self.games_per_team).div_ceil(2 * self.games_per_week)
    }

    /// Number of games in a complete schedule
    pub fn total_games(&self) -> usize {
        self.num_teams() * self.games_per_team / 2
    }

    /// Byes every team ends up with once the schedule is complete
    pub fn byes_per_team(&self) -> usize {
        self.weeks().saturating_sub(self.games_per_team)
    }

    /// Check every caller-side contract before a search is attempted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = self.num_teams();
        if n < 2 {
            return Err(ConfigError::TooFewTeams(n));
        }

        let mut seen = HashSet::new();
        for (i, name) in self.team_names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ConfigError::BlankTeamName(i));
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateTeamName(name.clone()));
            }
        }

        if self.games_per_team == 0 || self.games_per_team > n - 1 {
            return Err(ConfigError::GamesPerTeamOutOfRange {
                games_per_team: self.games_per_team,
                max: n - 1,
            });
        }
        if self.games_per_week == 0 || self.games_per_week > n / 2 {
            return Err(ConfigError::GamesPerWeekOutOfRange {
                games_per_week: self.games_per_week,
                max: n / 2,
            });
        }
        if (n * self.games_per_team) % 2 != 0 {
            return Err(ConfigError::OddGameTotal {
                teams: n,
                games_per_team: self.games_per_team,
            });
        }

        Ok(())
    }

    pub fn team_index(&self, name: &str) -> Option<usize> {
        self.team_names.iter().position(|t| t == name)
    }

    /// Translate a name-keyed unavailability map into team indices.
    pub fn resolve_unavailability(
        &self,
        by_name: &BTreeMap<String, Vec<usize>>,
    ) -> Result<Unavailability, ConfigError> {
        let mut resolved = Unavailability::new();
        for (name, weeks) in by_name {
            let index = self
                .team_index(name)
                .ok_or_else(|| ConfigError::UnknownTeam(name.clone()))?;
            resolved.entry(index).or_default().extend(weeks.iter().copied());
        }
        Ok(resolved)
    }

    /// Reject unavailability entries for teams outside the roster.
    pub fn check_team_indices(&self, unavailable: &Unavailability) -> Result<(), ConfigError> {
        let teams = self.num_teams();
        match unavailable.keys().find(|&&t| t >= teams) {
            Some(&index) => Err(ConfigError::TeamIndexOutOfRange { index, teams }),
            None => Ok(()),
        }
    }
}

/// On-disk league description: configuration plus unavailability by team name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueFile {
    #[serde(flatten)]
    pub config: LeagueConfig,
    /// Team name -> 0-based weeks the team cannot play
    #[serde(default)]
    pub unavailable: BTreeMap<String, Vec<usize>>,
}

impl LeagueFile {
    pub fn new(config: LeagueConfig) -> Self {
        Self {
            config,
            unavailable: BTreeMap::new(),
        }
    }

    /// Starter league with numbered teams and no unavailability
    pub fn example(num_teams: usize, games_per_team: usize, games_per_week: usize) -> Self {
        Self::new(LeagueConfig::with_numbered_teams(
            num_teams,
            games_per_team,
            games_per_week,
        ))
    }

    /// Mark a team unavailable for a 0-based week
    pub fn with_unavailable(mut self, team: &str, week: usize) -> Self {
        self.unavailable.entry(team.to_string()).or_default().push(week);
        self
    }

    pub fn resolve(&self) -> Result<Unavailability, ConfigError> {
        self.config.resolve_unavailability(&self.unavailable)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read league file: {}", path.display()))?;
        let league = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse league file: {}", path.display()))?;
        Ok(league)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write league file: {}", path.display()))?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
