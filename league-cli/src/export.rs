//! CSV export
//!
//! Two sections separated by a blank line:
//! - `Team Name,Unavailable Weeks`, one row per team, weeks 1-based
//! - `Week,Game1..GameK`, one row per week, `A vs B` cells, short rows
//!   padded with empty fields

use std::path::Path;

use anyhow::{Context, Result};

use league_core::{Fixtures, LeagueFile};

/// Render the league's availability and schedule as CSV text.
pub fn schedule_csv(league: &LeagueFile, fixtures: &Fixtures) -> Result<String> {
    let mut buffer = availability_section(league)?;
    buffer.push(b'\n');
    let buffer = schedule_section(buffer, fixtures)?;
    Ok(String::from_utf8(buffer)?)
}

/// Write the CSV export to `path`.
pub fn write_schedule_csv(path: &Path, league: &LeagueFile, fixtures: &Fixtures) -> Result<()> {
    let text = schedule_csv(league, fixtures)?;
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write CSV: {}", path.display()))?;
    tracing::info!("Wrote schedule CSV to {}", path.display());
    Ok(())
}

fn availability_section(league: &LeagueFile) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Team Name", "Unavailable Weeks"])?;

    for team in &league.config.team_names {
        let mut weeks = league.unavailable.get(team).cloned().unwrap_or_default();
        weeks.sort_unstable();
        weeks.dedup();
        let weeks: Vec<String> = weeks.iter().map(|w| (w + 1).to_string()).collect();
        writer.write_record([team.as_str(), weeks.join(", ").as_str()])?;
    }

    Ok(writer.into_inner()?)
}

fn schedule_section(buffer: Vec<u8>, fixtures: &Fixtures) -> Result<Vec<u8>> {
    let width = fixtures.max_games_in_week();
    let mut writer = csv::Writer::from_writer(buffer);

    let mut header = vec!["Week".to_string()];
    header.extend((1..=width).map(|g| format!("Game{}", g)));
    writer.write_record(&header)?;

    for (week, fixtures) in fixtures.weeks.iter().enumerate() {
        let mut row = vec![format!("Week {}", week + 1)];
        row.extend(fixtures.games.iter().map(|[a, b]| format!("{} vs {}", a, b)));
        row.resize(width + 1, String::new());
        writer.write_record(&row)?;
    }

    Ok(writer.into_inner()?)
}

// ============================================================================
// TESTS
// ============================================================================
