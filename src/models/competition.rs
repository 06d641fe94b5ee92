// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Competition model and read-time status derivation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Competition kinds known to the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionKind {
    League,
    Cup,
    Supercup,
    SummerCup,
    NationsCup,
}

impl CompetitionKind {
    /// Kinds that share one season group per season identifier.
    /// The rest (summer/nations cups) each stand alone.
    pub fn is_season_scoped(self) -> bool {
        matches!(self, Self::League | Self::Cup | Self::Supercup)
    }

    /// Stable fragment used in standalone group keys.
    pub fn key_fragment(self) -> &'static str {
        match self {
            Self::League => "league",
            Self::Cup => "cup",
            Self::Supercup => "supercup",
            Self::SummerCup => "summer_cup",
            Self::NationsCup => "nations_cup",
        }
    }
}

/// Competition document stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competition {
    /// Competition ID (also used as document ID)
    pub id: String,
    /// Display name (e.g. "Premier Division 12")
    pub name: String,
    /// Competition kind
    pub kind: CompetitionKind,
    /// Season identifier, present for league/cup/supercup
    #[serde(default)]
    pub season: Option<String>,
    /// League division (1 or 2), present for leagues only
    #[serde(default)]
    pub division: Option<u8>,
    /// First matchday
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// Last matchday
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    /// Champion team reference (team ID in this competition's entries)
    #[serde(default)]
    pub champion_team_id: Option<String>,
    /// Free-form champion name, for older documents without a reference
    #[serde(default)]
    pub champion_name: Option<String>,
    /// Cover image URL
    #[serde(default)]
    pub image: Option<String>,
}

/// Competition status, derived from dates at read time. Never stored —
/// a persisted status field goes stale the moment the clock passes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionStatus {
    Upcoming,
    Active,
    Finished,
}

/// Derive a competition's status from its dates.
///
/// A competition without a start date has not been scheduled and counts as
/// upcoming; one that started but has no end date is still running.
pub fn status(
    now: DateTime<Utc>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> CompetitionStatus {
    match (start, end) {
        (Some(start), _) if start > now => CompetitionStatus::Upcoming,
        (_, Some(end)) if end < now => CompetitionStatus::Finished,
        (Some(_), _) => CompetitionStatus::Active,
        (None, _) => CompetitionStatus::Upcoming,
    }
}

impl Competition {
    /// Status relative to `now`.
    pub fn status_at(&self, now: DateTime<Utc>) -> CompetitionStatus {
        status(now, self.start_date, self.end_date)
    }

    /// Display label for the competition tier.
    ///
    /// Any league without an explicit division 2 marker renders as first
    /// tier, so a malformed league document still gets a sensible label.
    pub fn tier_label(&self) -> &'static str {
        match (self.kind, self.division) {
            (CompetitionKind::League, Some(2)) => "2nd tier",
            (CompetitionKind::League, _) => "1st tier",
            (CompetitionKind::Cup, _) => "cup",
            (CompetitionKind::Supercup, _) => "supercup",
            (CompetitionKind::SummerCup, _) => "summer",
            (CompetitionKind::NationsCup, _) => "nations",
        }
    }

    /// Check the stored document against the schema invariants:
    /// division present iff league, season present iff season-scoped.
    ///
    /// Violations are reported, not fatal — the caller logs and renders
    /// the record anyway.
    pub fn check_invariants(&self) -> Result<(), String> {
        match (self.kind, self.division) {
            (CompetitionKind::League, None) => {
                return Err("league without a division".to_string());
            }
            (CompetitionKind::League, Some(d)) if d != 1 && d != 2 => {
                return Err(format!("league with out-of-range division {}", d));
            }
            (kind, Some(_)) if kind != CompetitionKind::League => {
                return Err("division set on a non-league competition".to_string());
            }
            _ => {}
        }

        let has_season = self.season.as_deref().is_some_and(|s| !s.is_empty());
        if self.kind.is_season_scoped() && !has_season {
            return Err("season-scoped competition without a season identifier".to_string());
        }
        if !self.kind.is_season_scoped() && has_season {
            return Err("standalone cup with a season identifier".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn league(division: u8) -> Competition {
        Competition {
            id: "comp-1".to_string(),
            name: "Premier Division".to_string(),
            kind: CompetitionKind::League,
            season: Some("12".to_string()),
            division: Some(division),
            start_date: None,
            end_date: None,
            champion_team_id: None,
            champion_name: None,
            image: None,
        }
    }

    #[test]
    fn test_status_boundaries() {
        let now = date("2025-06-15T12:00:00Z");
        let earlier = date("2025-06-01T00:00:00Z");
        let later = date("2025-07-01T00:00:00Z");

        assert_eq!(status(now, Some(later), None), CompetitionStatus::Upcoming);
        assert_eq!(
            status(now, Some(earlier), Some(later)),
            CompetitionStatus::Active
        );
        assert_eq!(
            status(now, Some(earlier), Some(earlier)),
            CompetitionStatus::Finished
        );
        // Boundary: a competition ending exactly now is still active
        assert_eq!(
            status(now, Some(earlier), Some(now)),
            CompetitionStatus::Active
        );
    }

    #[test]
    fn test_status_with_missing_dates() {
        let now = date("2025-06-15T12:00:00Z");
        let earlier = date("2025-06-01T00:00:00Z");

        assert_eq!(status(now, None, None), CompetitionStatus::Upcoming);
        assert_eq!(status(now, Some(earlier), None), CompetitionStatus::Active);
        assert_eq!(
            status(now, None, Some(earlier)),
            CompetitionStatus::Finished
        );
    }

    #[test]
    fn test_tier_labels() {
        assert_eq!(league(1).tier_label(), "1st tier");
        assert_eq!(league(2).tier_label(), "2nd tier");

        let mut cup = league(1);
        cup.kind = CompetitionKind::Cup;
        cup.division = None;
        assert_eq!(cup.tier_label(), "cup");

        cup.kind = CompetitionKind::Supercup;
        assert_eq!(cup.tier_label(), "supercup");

        cup.kind = CompetitionKind::SummerCup;
        cup.season = None;
        assert_eq!(cup.tier_label(), "summer");

        cup.kind = CompetitionKind::NationsCup;
        assert_eq!(cup.tier_label(), "nations");
    }

    #[test]
    fn test_invariants() {
        assert!(league(1).check_invariants().is_ok());

        let mut no_division = league(1);
        no_division.division = None;
        assert!(no_division.check_invariants().is_err());

        let mut cup_with_division = league(1);
        cup_with_division.kind = CompetitionKind::Cup;
        assert!(cup_with_division.check_invariants().is_err());

        let mut no_season = league(1);
        no_season.season = None;
        assert!(no_season.check_invariants().is_err());

        let mut standalone = league(1);
        standalone.kind = CompetitionKind::SummerCup;
        standalone.division = None;
        standalone.season = None;
        assert!(standalone.check_invariants().is_ok());
    }

    #[test]
    fn test_kind_serde_names() {
        let kind: CompetitionKind = serde_json::from_str("\"summer_cup\"").unwrap();
        assert_eq!(kind, CompetitionKind::SummerCup);
        assert_eq!(
            serde_json::to_string(&CompetitionKind::NationsCup).unwrap(),
            "\"nations_cup\""
        );
    }
}
