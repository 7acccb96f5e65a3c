//! League Core - Round-robin schedule generation
//!
//! This crate provides the core scheduling logic:
//! - League configuration and file format (teams, games, unavailability)
//! - Constraint tables precomputed per week
//! - Backtracking search with capacity and deadline pruning
//! - Cooperative cancellation
//! - Schedule verification and name-based formatting
//! - Availability pre-checks for interactive editing

pub mod error;
pub mod league;
pub mod constraints;
pub mod cancel;
pub mod schedule;
pub mod search;
pub mod format;
pub mod generator;
pub mod availability;

// Re-exports for convenient access
pub use error::{ConfigError, ScheduleViolation};
pub use league::{LeagueConfig, LeagueFile, Unavailability};
pub use constraints::ConstraintTables;
pub use cancel::CancelToken;
pub use schedule::{Game, Schedule};
pub use search::{Prune, Search, SearchOutcome, SearchStats};
pub use format::{Fixtures, GeneratedSchedule, InfeasibleReport, Outcome, ScheduleReport, WeekFixtures};
pub use generator::{generate_from_file, generate_schedule};
pub use availability::{AvailabilityCheck, AvailabilityWarning, BlockedCell};
