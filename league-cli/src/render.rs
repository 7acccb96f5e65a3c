//! Plain-text rendering for terminal output
//!
//! Week numbers are printed 1-based.

use league_core::{AvailabilityCheck, Fixtures, LeagueConfig, SearchStats};

/// Week-by-week fixture list
pub fn fixtures_table(fixtures: &Fixtures) -> String {
    let mut out = String::new();

    for (week, fixtures) in fixtures.weeks.iter().enumerate() {
        out.push_str(&format!("Week {}\n", week + 1));
        for [home, away] in &fixtures.games {
            out.push_str(&format!("  {} vs {}\n", home, away));
        }
        if !fixtures.byes.is_empty() {
            out.push_str(&format!("  Bye: {}\n", fixtures.byes.join(", ")));
        }
    }

    out
}

/// One-line search summary
pub fn stats_line(stats: &SearchStats) -> String {
    format!(
        "{} weeks entered, {} candidates examined, {} placements undone",
        stats.weeks_entered, stats.candidates_examined, stats.games_removed
    )
}

/// Availability pre-check report
pub fn availability_report(config: &LeagueConfig, check: &AvailabilityCheck) -> String {
    let per_week: Vec<String> = check
        .possible_games_per_week
        .iter()
        .map(|c| c.to_string())
        .collect();

    let mut lines = vec![
        format!(
            "{} teams, {} weeks, {} byes per team",
            config.num_teams(),
            check.weeks,
            check.max_unavailable_weeks
        ),
        format!("Possible games per week: {}", per_week.join(" ")),
        format!(
            "Total possible: {}, needed: {}",
            check.total_possible, check.total_needed
        ),
    ];

    if check.is_clear() {
        lines.push("No problems found".to_string());
    } else {
        lines.extend(check.warnings.iter().map(|w| format!("Warning: {}", w)));
    }

    let mut blocked: Vec<Vec<usize>> = vec![Vec::new(); config.num_teams()];
    for cell in &check.blocked {
        blocked[cell.team].push(cell.week + 1);
    }
    for (team, weeks) in blocked.iter().enumerate() {
        let name = &config.team_names[team];
        if !weeks.is_empty() && weeks.len() < check.weeks {
            let weeks: Vec<String> = weeks.iter().map(|w| w.to_string()).collect();
            lines.push(format!("{} cannot also miss week(s) {}", name, weeks.join(", ")));
        } else if weeks.len() == check.weeks && check.weeks > 0 {
            lines.push(format!("{} cannot miss any more weeks", name));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use league_core::{Unavailability, WeekFixtures};

    fn pair(a: &str, b: &str) -> [String; 2] {
        [a.to_string(), b.to_string()]
    }

    #[test]
    fn test_fixtures_table() {
        let fixtures = Fixtures {
            weeks: vec![
                WeekFixtures {
                    games: vec![pair("Ants", "Bees")],
                    byes: vec!["Cats".into()],
                },
                WeekFixtures {
                    games: vec![pair("Ants", "Cats")],
                    byes: vec![],
                },
            ],
        };

        let text = fixtures_table(&fixtures);
        assert_eq!(
            text,
            "Week 1\n  Ants vs Bees\n  Bye: Cats\nWeek 2\n  Ants vs Cats\n"
        );
    }

    #[test]
    fn test_availability_report_lists_warnings() {
        let config = LeagueConfig::with_numbered_teams(6, 3, 3);
        let unavailable: Unavailability = [(1, vec![0])].into_iter().collect();
        let check = AvailabilityCheck::evaluate(&config, &unavailable).unwrap();

        let text = availability_report(&config, &check);
        assert!(text.contains("Possible games per week: 2 3 3"));
        assert!(text.contains("Warning: the total possible games (8)"));
        assert!(text.contains("Team 1 cannot miss any more weeks"));
    }

    #[test]
    fn test_availability_report_header_lines() {
        let config = LeagueConfig::with_numbered_teams(6, 3, 3);
        let unavailable: Unavailability = [(1, vec![0])].into_iter().collect();
        let check = AvailabilityCheck::evaluate(&config, &unavailable).unwrap();

        let text = availability_report(&config, &check);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "6 teams, 3 weeks, 0 byes per team");
        assert_eq!(lines[1], "Possible games per week: 2 3 3");
        assert_eq!(lines[2], "Total possible: 8, needed: 9");
        assert!(lines[3].starts_with("Warning: "));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_availability_report_clear() {
        let config = LeagueConfig::with_numbered_teams(4, 2, 2);
        let check = AvailabilityCheck::evaluate(&config, &Unavailability::new()).unwrap();
        let text = availability_report(&config, &check);
        assert!(text.contains("No problems found"));
    }
}
