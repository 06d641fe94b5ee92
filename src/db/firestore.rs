// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides read operations for:
//! - Competitions (league/cup instances)
//! - Team-Competitions (per-competition standings rows)
//! - Matches
//! - Player statistics
//!
//! The site never writes: league data is maintained by the admin tooling,
//! and this backend only derives read models from it.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Competition, Match, PlayerStats, TeamCompetition};
use futures_util::{stream, StreamExt};

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // Use ExternalJwtFunctionSource to provide a dummy token without needing async-trait
        // or a custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Competition Operations ──────────────────────────────────

    /// Get all competition documents.
    ///
    /// Unordered on purpose: Firestore drops documents missing the ordering
    /// field, and competitions without dates must still reach the grouping
    /// step. Callers sort in memory.
    pub async fn list_competitions(&self) -> Result<Vec<Competition>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::COMPETITIONS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a competition by its ID.
    pub async fn get_competition(&self, id: &str) -> Result<Option<Competition>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::COMPETITIONS)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Team-Competition Operations ─────────────────────────────

    /// Get the standings rows of one competition.
    pub async fn team_competitions_for_competition(
        &self,
        competition_id: &str,
    ) -> Result<Vec<TeamCompetition>, AppError> {
        let competition_id = competition_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::TEAM_COMPETITIONS)
            .filter(move |q| q.for_all([q.field("competition_id").eq(competition_id.clone())]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the team entries of a set of competitions.
    pub async fn team_competitions_for(
        &self,
        competition_ids: &[String],
    ) -> Result<Vec<TeamCompetition>, AppError> {
        self.fetch_for_competitions(collections::TEAM_COMPETITIONS, competition_ids)
            .await
    }

    // ─── Match Operations ────────────────────────────────────────

    /// Get the matches of a set of competitions.
    pub async fn matches_for(&self, competition_ids: &[String]) -> Result<Vec<Match>, AppError> {
        self.fetch_for_competitions(collections::MATCHES, competition_ids)
            .await
    }

    // ─── Player Stats Operations ─────────────────────────────────

    /// Get all player statistics documents.
    pub async fn list_player_stats(&self) -> Result<Vec<PlayerStats>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::PLAYER_STATS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Helper Methods ──────────────────────────────────────────

    /// Fetch all documents of `collection` whose `competition_id` is one of
    /// the given IDs.
    ///
    /// Firestore has no unbounded set-membership filter, so this fans out
    /// one equality query per ID with a concurrency limit. Result order is
    /// not defined.
    async fn fetch_for_competitions<T>(
        &self,
        collection: &'static str,
        competition_ids: &[String],
    ) -> Result<Vec<T>, AppError>
    where
        T: serde::de::DeserializeOwned + Send,
    {
        let client = self.get_client()?;

        let per_competition: Vec<Result<Vec<T>, AppError>> =
            stream::iter(competition_ids.to_vec())
                .map(|competition_id| async move {
                    client
                        .fluent()
                        .select()
                        .from(collection)
                        .filter(move |q| {
                            q.for_all([q.field("competition_id").eq(competition_id.clone())])
                        })
                        .obj()
                        .query()
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))
                })
                .buffer_unordered(MAX_CONCURRENT_DB_OPS)
                .collect()
                .await;

        let mut rows = Vec::new();
        for result in per_competition {
            rows.extend(result?);
        }
        Ok(rows)
    }
}
