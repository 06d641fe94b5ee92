//! Application configuration loaded from environment variables.
//!
//! The site backend has no secrets of its own: it only reads public league
//! data. Everything here is plain deployment wiring.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL, used for CORS
    pub frontend_url: String,
    /// GCP project ID hosting the Firestore database
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable has a local-development default, so a bare
    /// `cargo run` against the emulator works without a `.env` file.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("FRONTEND_URL", "https://league.example.com");
        env::set_var("GCP_PROJECT_ID", "league-prod");

        let config = Config::from_env();

        assert_eq!(config.frontend_url, "https://league.example.com");
        assert_eq!(config.gcp_project_id, "league-prod");
        assert_eq!(config.port, 8080);
    }
}
