// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-model API routes for the site frontend.
//!
//! Handlers stay thin: fetch flat records, run the pure grouping/ranking
//! functions, serialize. All joins happen in memory by identifier.

use crate::error::{AppError, Result};
use crate::models::{Competition, CompetitionStatus, GroupTotals, SeasonGroup, TeamCompetition};
use crate::services::rankings::{self, RankingEntry};
use crate::services::seasons;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

/// Public read-model routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/seasons", get(get_seasons))
        .route("/api/competitions/{id}/standings", get(get_standings))
        .route("/api/rankings/{board}", get(get_rankings))
        .route("/api/leaderboards/{stat}", get(get_leaderboard))
}

// ─── Seasons ─────────────────────────────────────────────────────

/// Season card list response.
#[derive(Serialize)]
pub struct SeasonsResponse {
    pub seasons: Vec<SeasonView>,
}

#[derive(Serialize)]
pub struct SeasonView {
    pub key: String,
    pub title: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub image: Option<String>,
    /// Distinct teams across the whole group; null when unavailable
    pub team_count: Option<u32>,
    /// Matches across the whole group; null when unavailable
    pub match_count: Option<u32>,
    pub competitions: Vec<CompetitionView>,
}

#[derive(Serialize)]
pub struct CompetitionView {
    pub id: String,
    pub name: String,
    /// Tier label ("1st tier", "2nd tier", "cup", ...)
    pub tier: String,
    pub status: CompetitionStatus,
    pub champion: Option<String>,
}

/// Get all season cards, newest season first.
async fn get_seasons(State(state): State<Arc<AppState>>) -> Result<Json<SeasonsResponse>> {
    let mut competitions = state.db.list_competitions().await?;

    for competition in &competitions {
        if let Err(problem) = competition.check_invariants() {
            tracing::warn!(
                competition_id = %competition.id,
                %problem,
                "Competition document violates schema invariants"
            );
        }
    }

    // Deterministic member order inside each group: oldest first, ID as the
    // final key. The query itself is unordered (see FirestoreDb).
    competitions.sort_by(|a, b| {
        a.start_date
            .cmp(&b.start_date)
            .then_with(|| a.id.cmp(&b.id))
    });

    let groups = seasons::group_competitions(competitions);

    let member_ids: Vec<String> = groups
        .iter()
        .flat_map(|g| g.competitions.iter().map(|c| c.id.clone()))
        .collect();
    let team_competitions = state.db.team_competitions_for(&member_ids).await?;
    let matches = state.db.matches_for(&member_ids).await?;

    let now = chrono::Utc::now();
    let seasons = groups
        .iter()
        .map(|group| {
            let totals = seasons::aggregate_group(group, &team_competitions, &matches);
            season_view(group, totals, &team_competitions, now)
        })
        .collect();

    Ok(Json(SeasonsResponse { seasons }))
}

fn season_view(
    group: &SeasonGroup,
    totals: GroupTotals,
    team_competitions: &[TeamCompetition],
    now: chrono::DateTime<chrono::Utc>,
) -> SeasonView {
    SeasonView {
        key: group.key.clone(),
        title: group.title.clone(),
        start_date: group.start_date.map(format_utc_rfc3339),
        end_date: group.end_date.map(format_utc_rfc3339),
        image: group.image.clone(),
        team_count: totals.team_count,
        match_count: totals.match_count,
        competitions: group
            .competitions
            .iter()
            .map(|competition| competition_view(competition, team_competitions, now))
            .collect(),
    }
}

fn competition_view(
    competition: &Competition,
    team_competitions: &[TeamCompetition],
    now: chrono::DateTime<chrono::Utc>,
) -> CompetitionView {
    CompetitionView {
        id: competition.id.clone(),
        name: competition.name.clone(),
        tier: competition.tier_label().to_string(),
        status: competition.status_at(now),
        champion: seasons::champion_name(competition, team_competitions),
    }
}

// ─── Standings ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct StandingsResponse {
    pub competition_id: String,
    pub competition_name: String,
    pub status: CompetitionStatus,
    pub rows: Vec<StandingRow>,
}

#[derive(Serialize)]
pub struct StandingRow {
    pub position: u32,
    pub team_id: String,
    pub team_name: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
}

/// Get the ordered table of one competition.
async fn get_standings(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<StandingsResponse>> {
    let competition = state
        .db
        .get_competition(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Competition {} not found", id)))?;

    let entries = state.db.team_competitions_for_competition(&id).await?;
    let ordered = rankings::order_standings(entries);

    let rows = ordered
        .into_iter()
        .enumerate()
        .map(|(index, row)| StandingRow {
            position: index as u32 + 1,
            played: row.matches_played(),
            goal_difference: row.goal_difference(),
            team_id: row.team_id,
            team_name: row.team_name,
            wins: row.wins,
            draws: row.draws,
            losses: row.losses,
            goals_for: row.goals_for,
            goals_against: row.goals_against,
            points: row.points,
        })
        .collect();

    Ok(Json(StandingsResponse {
        competition_id: competition.id.clone(),
        competition_name: competition.name.clone(),
        status: competition.status_at(chrono::Utc::now()),
        rows,
    }))
}

// ─── Rankings & Leaderboards ─────────────────────────────────────

/// Player ranking boards (top 50).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RankingBoard {
    Elo,
    Matches,
    WinRate,
}

fn parse_ranking_board(raw: &str) -> Option<RankingBoard> {
    match raw {
        "elo" => Some(RankingBoard::Elo),
        "matches" => Some(RankingBoard::Matches),
        "winrate" => Some(RankingBoard::WinRate),
        _ => None,
    }
}

/// Statistical leaderboards (top 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatBoard {
    Scorers,
    Assists,
    CleanSheets,
}

fn parse_stat_board(raw: &str) -> Option<StatBoard> {
    match raw {
        "scorers" => Some(StatBoard::Scorers),
        "assists" => Some(StatBoard::Assists),
        "clean-sheets" => Some(StatBoard::CleanSheets),
        _ => None,
    }
}

#[derive(Serialize)]
pub struct RankingResponse {
    pub board: String,
    pub entries: Vec<RankedRow>,
}

#[derive(Serialize)]
pub struct RankedRow {
    pub position: u32,
    pub id: String,
    pub name: String,
    pub elo: f64,
    pub wins: u32,
    pub losses: u32,
    pub matches_played: u32,
    pub win_rate: f64,
    pub goals: u32,
    pub assists: u32,
    pub clean_sheets: u32,
}

fn ranked_rows(entries: Vec<RankingEntry>) -> Vec<RankedRow> {
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| RankedRow {
            position: index as u32 + 1,
            matches_played: entry.matches_played(),
            win_rate: entry.win_rate(),
            id: entry.id,
            name: entry.name,
            elo: entry.elo,
            wins: entry.wins,
            losses: entry.losses,
            goals: entry.goals,
            assists: entry.assists,
            clean_sheets: entry.clean_sheets,
        })
        .collect()
}

/// Get one of the player ranking boards: elo, matches or winrate.
async fn get_rankings(
    State(state): State<Arc<AppState>>,
    Path(board): Path<String>,
) -> Result<Json<RankingResponse>> {
    let parsed = parse_ranking_board(&board)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown ranking board '{}'", board)))?;

    let players = state.db.list_player_stats().await?;
    let entries: Vec<RankingEntry> = players.into_iter().map(RankingEntry::from).collect();

    let ordered = match parsed {
        RankingBoard::Elo => rankings::order_by_rating(entries),
        RankingBoard::Matches => rankings::order_by_matches(entries),
        RankingBoard::WinRate => rankings::order_by_win_rate(entries),
    };
    let top = rankings::take_top(ordered, rankings::RATING_BOARD_SIZE);

    tracing::debug!(board = %board, entries = top.len(), "Serving ranking board");

    Ok(Json(RankingResponse {
        board,
        entries: ranked_rows(top),
    }))
}

/// Get one of the statistical leaderboards: scorers, assists or clean-sheets.
async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Path(stat): Path<String>,
) -> Result<Json<RankingResponse>> {
    let parsed = parse_stat_board(&stat)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown leaderboard '{}'", stat)))?;

    let players = state.db.list_player_stats().await?;
    let entries: Vec<RankingEntry> = players.into_iter().map(RankingEntry::from).collect();

    let ordered = match parsed {
        StatBoard::Scorers => rankings::order_by_goals(entries),
        StatBoard::Assists => rankings::order_by_assists(entries),
        StatBoard::CleanSheets => rankings::order_by_clean_sheets(entries),
    };
    let top = rankings::take_top(ordered, rankings::STAT_BOARD_SIZE);

    tracing::debug!(board = %stat, entries = top.len(), "Serving leaderboard");

    Ok(Json(RankingResponse {
        board: stat,
        entries: ranked_rows(top),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_board_names() {
        assert_eq!(parse_ranking_board("elo"), Some(RankingBoard::Elo));
        assert_eq!(parse_ranking_board("matches"), Some(RankingBoard::Matches));
        assert_eq!(parse_ranking_board("winrate"), Some(RankingBoard::WinRate));
        assert_eq!(parse_ranking_board("points"), None);
        assert_eq!(parse_ranking_board("ELO"), None);
    }

    #[test]
    fn test_stat_board_names() {
        assert_eq!(parse_stat_board("scorers"), Some(StatBoard::Scorers));
        assert_eq!(parse_stat_board("assists"), Some(StatBoard::Assists));
        assert_eq!(
            parse_stat_board("clean-sheets"),
            Some(StatBoard::CleanSheets)
        );
        assert_eq!(parse_stat_board("clean_sheets"), None);
    }

    #[test]
    fn test_ranked_rows_are_one_indexed() {
        let entries = vec![
            RankingEntry {
                id: "p1".to_string(),
                name: "One".to_string(),
                position: crate::models::Position::Forward,
                elo: 1600.0,
                wins: 6,
                losses: 2,
                goals: 3,
                assists: 1,
                clean_sheets: 0,
            },
            RankingEntry {
                id: "p2".to_string(),
                name: "Two".to_string(),
                position: crate::models::Position::Midfielder,
                elo: 1500.0,
                wins: 1,
                losses: 3,
                goals: 0,
                assists: 2,
                clean_sheets: 0,
            },
        ];

        let rows = ranked_rows(entries);
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[1].position, 2);
        assert_eq!(rows[0].matches_played, 8);
        assert_eq!(rows[0].win_rate, 0.75);
        assert_eq!(rows[1].win_rate, 0.25);
    }
}
