// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard orderings.
//!
//! Every ordering here is a deterministic total order: a primary metric
//! plus an explicit tie-break chain, on top of a stable sort so rows that
//! compare equal keep their input order. Float metrics are compared with
//! `total_cmp`; upstream decoding guarantees they are never NaN.

use serde::Serialize;

use crate::models::{PlayerStats, Position, TeamCompetition};

/// Elo-style boards show the top 50 entries.
pub const RATING_BOARD_SIZE: usize = 50;
/// Statistical boards (scorers, assists, clean sheets) show the top 7.
pub const STAT_BOARD_SIZE: usize = 7;

/// One participant's metrics for a leaderboard view.
#[derive(Debug, Clone, Serialize)]
pub struct RankingEntry {
    pub id: String,
    pub name: String,
    pub position: Position,
    pub elo: f64,
    pub wins: u32,
    pub losses: u32,
    pub goals: u32,
    pub assists: u32,
    pub clean_sheets: u32,
}

impl RankingEntry {
    /// Draws are not modeled in the Elo context.
    pub fn matches_played(&self) -> u32 {
        self.wins + self.losses
    }

    /// Win rate in [0, 1]; a player with no matches has rate 0 and sorts
    /// below anyone with a positive rate.
    pub fn win_rate(&self) -> f64 {
        let played = self.matches_played();
        if played == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(played)
        }
    }
}

impl From<PlayerStats> for RankingEntry {
    fn from(stats: PlayerStats) -> Self {
        Self {
            id: stats.player_id,
            name: stats.gamertag,
            position: stats.position,
            elo: stats.elo,
            wins: stats.wins,
            losses: stats.losses,
            goals: stats.goals,
            assists: stats.assists,
            clean_sheets: stats.clean_sheets,
        }
    }
}

// ─── Player Orderings ────────────────────────────────────────────

/// Elo descending; ties keep input order.
pub fn order_by_rating(mut entries: Vec<RankingEntry>) -> Vec<RankingEntry> {
    entries.sort_by(|a, b| b.elo.total_cmp(&a.elo));
    entries
}

/// Matches played descending, then Elo descending.
pub fn order_by_matches(mut entries: Vec<RankingEntry>) -> Vec<RankingEntry> {
    entries.sort_by(|a, b| {
        b.matches_played()
            .cmp(&a.matches_played())
            .then_with(|| b.elo.total_cmp(&a.elo))
    });
    entries
}

/// Win rate descending, then matches played descending.
pub fn order_by_win_rate(mut entries: Vec<RankingEntry>) -> Vec<RankingEntry> {
    entries.sort_by(|a, b| {
        b.win_rate()
            .total_cmp(&a.win_rate())
            .then_with(|| b.matches_played().cmp(&a.matches_played()))
    });
    entries
}

/// Goals descending; ties keep input order.
pub fn order_by_goals(mut entries: Vec<RankingEntry>) -> Vec<RankingEntry> {
    entries.sort_by(|a, b| b.goals.cmp(&a.goals));
    entries
}

/// Assists descending; ties keep input order.
pub fn order_by_assists(mut entries: Vec<RankingEntry>) -> Vec<RankingEntry> {
    entries.sort_by(|a, b| b.assists.cmp(&a.assists));
    entries
}

/// Clean sheets descending over goalkeepers only.
///
/// Outfield players occasionally carry a non-zero clean-sheet counter from
/// emergency keeper stints; the board still excludes them.
pub fn order_by_clean_sheets(entries: Vec<RankingEntry>) -> Vec<RankingEntry> {
    let mut keepers: Vec<RankingEntry> = entries
        .into_iter()
        .filter(|e| e.position == Position::Goalkeeper)
        .collect();
    keepers.sort_by(|a, b| b.clean_sheets.cmp(&a.clean_sheets));
    keepers
}

/// Truncate a board to its display size. Always applied AFTER sorting;
/// boards never pre-filter by count.
pub fn take_top(mut entries: Vec<RankingEntry>, limit: usize) -> Vec<RankingEntry> {
    entries.truncate(limit);
    entries
}

// ─── Division Standings ──────────────────────────────────────────

/// Order a division table: points, then goal difference, then goals
/// scored, then team name as the final deterministic key.
pub fn order_standings(mut rows: Vec<TeamCompetition>) -> Vec<TeamCompetition> {
    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
            .then_with(|| b.goals_for.cmp(&a.goals_for))
            .then_with(|| a.team_name.cmp(&b.team_name))
    });
    rows
}
