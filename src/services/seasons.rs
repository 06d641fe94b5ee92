// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Season grouping and aggregation.
//!
//! Competitions are stored flat; the season cards on the site are derived
//! here at read time. Everything in this module is a pure function over
//! already-fetched records, so a page render is fetch → group → aggregate
//! with no hidden state in between.

use std::collections::{HashMap, HashSet};

use crate::models::{Competition, GroupTotals, Match, SeasonGroup, TeamCompetition};
use crate::time_utils::display_year;

/// Group key for a competition.
///
/// Season-scoped kinds (league, cup, supercup) share one group per season
/// identifier; a missing or empty identifier falls back to the literal
/// `no-season` so a bad document collapses into a placeholder group instead
/// of breaking the listing. Standalone cups each form their own group.
pub fn group_key(competition: &Competition) -> String {
    if competition.kind.is_season_scoped() {
        let season = competition
            .season
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("no-season");
        format!("season-{}", season)
    } else {
        format!("{}-{}", competition.kind.key_fragment(), competition.id)
    }
}

/// Partition competitions into season groups, newest first.
///
/// Every competition lands in exactly one group. Group span is the
/// min start / max end across all members, and groups with no start date
/// at all sort last. Member order within a group is input order.
pub fn group_competitions(competitions: Vec<Competition>) -> Vec<SeasonGroup> {
    let mut groups: Vec<SeasonGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for competition in competitions {
        let key = group_key(&competition);
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                groups.push(SeasonGroup {
                    key: key.clone(),
                    title: group_title(&competition),
                    competitions: Vec::new(),
                    start_date: None,
                    end_date: None,
                    image: None,
                });
                index.insert(key, groups.len() - 1);
                groups.len() - 1
            }
        };

        let group = &mut groups[slot];
        group.start_date = match (group.start_date, competition.start_date) {
            (Some(current), Some(candidate)) => Some(current.min(candidate)),
            (current, candidate) => current.or(candidate),
        };
        group.end_date = match (group.end_date, competition.end_date) {
            (Some(current), Some(candidate)) => Some(current.max(candidate)),
            (current, candidate) => current.or(candidate),
        };
        if group.image.is_none() {
            group.image = competition.image.clone().filter(|i| !i.is_empty());
        }
        group.competitions.push(competition);
    }

    // Newest first. Option ordering puts None below any Some, so undated
    // groups end up at the bottom.
    groups.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    groups
}

fn group_title(competition: &Competition) -> String {
    use crate::models::CompetitionKind::{NationsCup, SummerCup};

    match competition.kind {
        SummerCup => standalone_title("Summer Cup", competition),
        NationsCup => standalone_title("Nations Cup", competition),
        _ => season_title(competition.season.as_deref()),
    }
}

/// "Season 12" for numeric identifiers, "Season beta" for anything else,
/// "Season ?" for the no-season placeholder group.
fn season_title(season: Option<&str>) -> String {
    match season.filter(|s| !s.is_empty()) {
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(number) => format!("Season {}", number),
            Err(_) => format!("Season {}", raw),
        },
        None => "Season ?".to_string(),
    }
}

fn standalone_title(base: &str, competition: &Competition) -> String {
    match competition.start_date {
        Some(date) => format!("{} {}", base, display_year(date)),
        None => base.to_string(),
    }
}

/// Compute related-record totals for one group.
///
/// Team counting deduplicates by team ID across ALL member competitions: a
/// team entered in both league divisions of a season counts once. A total
/// is `None` when no related rows reference the group at all, which the
/// caller renders as "unavailable" rather than zero.
pub fn aggregate_group(
    group: &SeasonGroup,
    team_competitions: &[TeamCompetition],
    matches: &[Match],
) -> GroupTotals {
    let member_ids: HashSet<&str> = group
        .competitions
        .iter()
        .map(|c| c.id.as_str())
        .collect();

    let teams: HashSet<&str> = team_competitions
        .iter()
        .filter(|tc| member_ids.contains(tc.competition_id.as_str()))
        .map(|tc| tc.team_id.as_str())
        .collect();

    let match_count = matches
        .iter()
        .filter(|m| member_ids.contains(m.competition_id.as_str()))
        .count();

    GroupTotals {
        team_count: (!teams.is_empty()).then(|| teams.len() as u32),
        match_count: (match_count > 0).then(|| match_count as u32),
    }
}

/// Resolve the champion display name for one competition.
///
/// Prefers the stored team reference, resolved against the competition's
/// own entries; falls back to the free-form champion name. Returns `None`
/// when neither resolves — the caller simply omits the champion line.
pub fn champion_name(
    competition: &Competition,
    team_competitions: &[TeamCompetition],
) -> Option<String> {
    if let Some(team_id) = competition.champion_team_id.as_deref() {
        let resolved = team_competitions
            .iter()
            .find(|tc| tc.competition_id == competition.id && tc.team_id == team_id)
            .map(|tc| tc.team_name.clone());
        if resolved.is_some() {
            return resolved;
        }
        tracing::warn!(
            competition_id = %competition.id,
            team_id,
            "Champion reference does not match any team entry"
        );
    }
    competition
        .champion_name
        .clone()
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CompetitionKind;
    use chrono::{DateTime, Utc};

    fn date(s: &str) -> Option<DateTime<Utc>> {
        Some(s.parse().unwrap())
    }

    fn competition(id: &str, kind: CompetitionKind, season: Option<&str>) -> Competition {
        Competition {
            id: id.to_string(),
            name: id.to_string(),
            kind,
            season: season.map(String::from),
            division: matches!(kind, CompetitionKind::League).then_some(1),
            start_date: None,
            end_date: None,
            champion_team_id: None,
            champion_name: None,
            image: None,
        }
    }

    fn entry(team_id: &str, competition_id: &str) -> TeamCompetition {
        TeamCompetition {
            team_id: team_id.to_string(),
            team_name: team_id.to_uppercase(),
            competition_id: competition_id.to_string(),
            points: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
        }
    }

    fn fixture(id: &str, competition_id: &str) -> Match {
        Match {
            id: id.to_string(),
            competition_id: competition_id.to_string(),
            home_team_id: "h".to_string(),
            away_team_id: "a".to_string(),
            home_score: None,
            away_score: None,
            played_at: None,
        }
    }

    #[test]
    fn test_grouping_is_a_partition() {
        let competitions = vec![
            competition("l1", CompetitionKind::League, Some("3")),
            competition("c1", CompetitionKind::Cup, Some("3")),
            competition("l2", CompetitionKind::League, Some("4")),
            competition("sc1", CompetitionKind::SummerCup, None),
            competition("nc1", CompetitionKind::NationsCup, None),
        ];
        let total = competitions.len();

        let groups = group_competitions(competitions);

        let grouped: usize = groups.iter().map(|g| g.competitions.len()).sum();
        assert_eq!(grouped, total);

        let mut seen = HashSet::new();
        for group in &groups {
            for member in &group.competitions {
                assert!(seen.insert(member.id.clone()), "{} grouped twice", member.id);
            }
        }
        // season 3, season 4, summer cup, nations cup
        assert_eq!(groups.len(), 4);
    }

    #[test]
    fn test_season_scoped_kinds_share_a_group() {
        let groups = group_competitions(vec![
            competition("l1", CompetitionKind::League, Some("7")),
            competition("c1", CompetitionKind::Cup, Some("7")),
            competition("s1", CompetitionKind::Supercup, Some("7")),
        ]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, "season-7");
        assert_eq!(groups[0].title, "Season 7");
        assert_eq!(groups[0].competitions.len(), 3);
    }

    #[test]
    fn test_missing_season_falls_back_to_placeholder_group() {
        let groups = group_competitions(vec![
            competition("l1", CompetitionKind::League, None),
            competition("c1", CompetitionKind::Cup, Some("")),
        ]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, "season-no-season");
        assert_eq!(groups[0].title, "Season ?");
    }

    #[test]
    fn test_non_numeric_season_keeps_raw_title() {
        let groups = group_competitions(vec![competition(
            "l1",
            CompetitionKind::League,
            Some("beta"),
        )]);
        assert_eq!(groups[0].title, "Season beta");
    }

    #[test]
    fn test_standalone_cups_get_their_own_groups_with_year_titles() {
        let mut summer = competition("sc9", CompetitionKind::SummerCup, None);
        summer.start_date = date("2025-07-01T00:00:00Z");
        let nations = competition("nc2", CompetitionKind::NationsCup, None);

        let groups = group_competitions(vec![summer, nations]);

        let summer_group = groups.iter().find(|g| g.key == "summer_cup-sc9").unwrap();
        assert_eq!(summer_group.title, "Summer Cup 2025");

        let nations_group = groups.iter().find(|g| g.key == "nations_cup-nc2").unwrap();
        assert_eq!(nations_group.title, "Nations Cup");
    }

    #[test]
    fn test_group_span_is_min_max_across_members() {
        let mut division_one = competition("l1", CompetitionKind::League, Some("5"));
        division_one.start_date = date("2025-02-01T00:00:00Z");
        division_one.end_date = date("2025-05-01T00:00:00Z");

        let mut cup = competition("c1", CompetitionKind::Cup, Some("5"));
        cup.start_date = date("2025-01-15T00:00:00Z");
        cup.end_date = date("2025-06-01T00:00:00Z");

        let mut division_two = competition("l2", CompetitionKind::League, Some("5"));
        division_two.division = Some(2);

        let groups = group_competitions(vec![division_one, cup, division_two]);

        assert_eq!(groups[0].start_date, date("2025-01-15T00:00:00Z"));
        assert_eq!(groups[0].end_date, date("2025-06-01T00:00:00Z"));
    }

    #[test]
    fn test_groups_sort_newest_first_with_undated_last() {
        let mut old = competition("l1", CompetitionKind::League, Some("1"));
        old.start_date = date("2024-01-01T00:00:00Z");
        let mut new = competition("l2", CompetitionKind::League, Some("2"));
        new.start_date = date("2025-01-01T00:00:00Z");
        let undated = competition("l3", CompetitionKind::League, Some("3"));

        let groups = group_competitions(vec![old, undated, new]);

        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["season-2", "season-1", "season-3"]);
    }

    #[test]
    fn test_group_image_takes_first_non_empty() {
        let mut first = competition("l1", CompetitionKind::League, Some("6"));
        first.image = Some(String::new());
        let mut second = competition("c1", CompetitionKind::Cup, Some("6"));
        second.image = Some("/img/season6.png".to_string());

        let groups = group_competitions(vec![first, second]);
        assert_eq!(groups[0].image.as_deref(), Some("/img/season6.png"));
    }

    #[test]
    fn test_team_count_deduplicates_across_divisions() {
        let groups = group_competitions(vec![
            competition("div1", CompetitionKind::League, Some("8")),
            competition("div2", CompetitionKind::League, Some("8")),
        ]);

        // "rovers" fields a side in both divisions; it must count once.
        let entries = vec![
            entry("rovers", "div1"),
            entry("united", "div1"),
            entry("rovers", "div2"),
            entry("casuals", "div2"),
        ];

        let totals = aggregate_group(&groups[0], &entries, &[]);
        assert_eq!(totals.team_count, Some(3));
    }

    #[test]
    fn test_missing_related_rows_are_unavailable_not_zero() {
        let groups = group_competitions(vec![competition(
            "l1",
            CompetitionKind::League,
            Some("9"),
        )]);

        let totals = aggregate_group(&groups[0], &[], &[]);
        assert_eq!(totals.team_count, None);
        assert_eq!(totals.match_count, None);

        // Rows for an unrelated competition don't count either.
        let foreign_entries = vec![entry("rovers", "other")];
        let foreign_matches = vec![fixture("m1", "other")];
        let totals = aggregate_group(&groups[0], &foreign_entries, &foreign_matches);
        assert_eq!(totals.team_count, None);
        assert_eq!(totals.match_count, None);
    }

    #[test]
    fn test_match_count_sums_member_matches() {
        let groups = group_competitions(vec![
            competition("div1", CompetitionKind::League, Some("8")),
            competition("cup", CompetitionKind::Cup, Some("8")),
        ]);

        let matches = vec![
            fixture("m1", "div1"),
            fixture("m2", "div1"),
            fixture("m3", "cup"),
            fixture("m4", "unrelated"),
        ];

        let totals = aggregate_group(&groups[0], &[], &matches);
        assert_eq!(totals.match_count, Some(3));
    }

    #[test]
    fn test_champion_resolution_prefers_reference() {
        let mut comp = competition("l1", CompetitionKind::League, Some("2"));
        comp.champion_team_id = Some("rovers".to_string());
        comp.champion_name = Some("Stale Name FC".to_string());

        let entries = vec![entry("rovers", "l1")];
        assert_eq!(
            champion_name(&comp, &entries),
            Some("ROVERS".to_string())
        );

        // Dangling reference falls back to the stored name.
        assert_eq!(
            champion_name(&comp, &[]),
            Some("Stale Name FC".to_string())
        );

        // Neither present: no champion line.
        comp.champion_team_id = None;
        comp.champion_name = None;
        assert_eq!(champion_name(&comp, &[]), None);
    }
}
