//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const COMPETITIONS: &str = "competitions";
    pub const TEAM_COMPETITIONS: &str = "team_competitions";
    pub const MATCHES: &str = "matches";
    /// Aggregated per-player statistics (keyed by player_id)
    pub const PLAYER_STATS: &str = "player_stats";
}
