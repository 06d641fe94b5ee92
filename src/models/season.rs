// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Derived season grouping.
//!
//! Season groups are never persisted. Every read recomputes them from the
//! current competition documents, so there is no stale grouping to migrate.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Competition;

/// One logical season (or standalone cup) grouping its competitions.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonGroup {
    /// Group key: `season-<id>` or `<kind>-<competition id>`
    pub key: String,
    /// Display title (e.g. "Season 12", "Summer Cup 2025")
    pub title: String,
    /// Member competitions, in input order
    pub competitions: Vec<Competition>,
    /// Earliest member start date
    pub start_date: Option<DateTime<Utc>>,
    /// Latest member end date
    pub end_date: Option<DateTime<Utc>>,
    /// First non-empty member image
    pub image: Option<String>,
}

/// Related-record totals for one group.
///
/// `None` means the related rows were unavailable; the frontend renders
/// that differently from a real zero, so the two must stay distinguishable
/// all the way through serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupTotals {
    pub team_count: Option<u32>,
    pub match_count: Option<u32>,
}
