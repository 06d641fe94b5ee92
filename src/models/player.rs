// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Per-player statistics document.

use serde::{Deserialize, Serialize};

use crate::models::numeric::{lenient_f64, lenient_u32};

/// Player position on the pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

/// Aggregated player statistics stored in Firestore.
///
/// Draws are not tracked here: in the Elo context every match has a
/// winner, so matches played is wins + losses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Player ID (also used as document ID)
    pub player_id: String,
    /// In-game name shown on leaderboards
    pub gamertag: String,
    /// Registered position
    pub position: Position,
    /// Current Elo rating
    #[serde(default, deserialize_with = "lenient_f64")]
    pub elo: f64,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub wins: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub losses: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub goals: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub assists: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub clean_sheets: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_document_decodes_with_zeroed_metrics() {
        // A document written by an old site version: elo as string,
        // losses null, goals missing entirely.
        let raw = r#"{
            "player_id": "p9",
            "gamertag": "keeper_dan",
            "position": "goalkeeper",
            "elo": "1412",
            "wins": 8,
            "losses": null,
            "assists": "two",
            "clean_sheets": 5
        }"#;

        let stats: PlayerStats = serde_json::from_str(raw).unwrap();
        assert_eq!(stats.position, Position::Goalkeeper);
        assert_eq!(stats.elo, 1412.0);
        assert_eq!(stats.wins, 8);
        assert_eq!(stats.losses, 0);
        assert_eq!(stats.goals, 0);
        assert_eq!(stats.assists, 0);
        assert_eq!(stats.clean_sheets, 5);
    }
}
