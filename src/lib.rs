// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Pitchside: backend for the Pitchside amateur league website.
//!
//! This crate derives the site's read models — season cards, division
//! standings and player leaderboards — from competition records stored
//! in Firestore. All grouping and ranking happens at read time.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
}
