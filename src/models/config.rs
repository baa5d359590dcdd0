//! Configuration model loaded from external sources.

use serde::Deserialize;

/// Profile under which the seed binary is allowed to insert sample data.
pub const LOCAL_PROFILE: &str = "local";

#[derive(Clone, Debug, Deserialize)]
/// Top-level application configuration.
pub struct AppConfig {
    pub profile: String,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Clone, Debug, Deserialize)]
/// SQLite connection settings applied to every pooled connection.
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_true")]
    pub enable_wal: bool,
    #[serde(default = "default_true")]
    pub enable_foreign_keys: bool,
    /// Passed through to `PRAGMA busy_timeout`; unset leaves SQLite's default.
    #[serde(default)]
    pub busy_timeout_ms: Option<u64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SeedConfig {
    pub members: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { members: 100 }
    }
}

impl AppConfig {
    pub fn is_local(&self) -> bool {
        self.profile == LOCAL_PROFILE
    }
}

fn default_true() -> bool {
    true
}
