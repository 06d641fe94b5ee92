// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Match model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored match record in Firestore.
///
/// Every match belongs to exactly one competition; the team references
/// point at that competition's entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    /// Match ID (also used as document ID)
    pub id: String,
    /// Competition this match was played in
    pub competition_id: String,
    /// Home side team ID
    pub home_team_id: String,
    /// Away side team ID
    pub away_team_id: String,
    /// Final score, present once played
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
    /// Kickoff time
    #[serde(default)]
    pub played_at: Option<DateTime<Utc>>,
}

impl Match {
    /// True once both final scores are recorded.
    pub fn is_played(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }
}
