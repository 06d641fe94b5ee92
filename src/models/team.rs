// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Team entry in a competition, carrying its standings row.

use serde::{Deserialize, Serialize};

use crate::models::numeric::lenient_u32;

/// Team-competition link stored in Firestore.
///
/// One document per team per competition instance. The team name is
/// denormalized in so listings never need a second lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamCompetition {
    /// Team ID (stable across seasons)
    pub team_id: String,
    /// Team display name
    pub team_name: String,
    /// Competition this entry belongs to
    pub competition_id: String,
    /// Accumulated points
    #[serde(default, deserialize_with = "lenient_u32")]
    pub points: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub wins: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub draws: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub losses: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub goals_for: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub goals_against: u32,
}

impl TeamCompetition {
    pub fn matches_played(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }
}
