//! Application configuration loaded from environment variables.

use std::env;

use blogly_infra::database::DatabaseConfig;

/// Database used when `DATABASE_URL` is not set.
pub const FALLBACK_DATABASE_URL: &str = "sqlite://blogly.db?mode=rwc";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    /// Apply pending migrations before serving.
    pub auto_migrate: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            tracing::warn!(
                "DATABASE_URL not set. Using local SQLite database at {}",
                FALLBACK_DATABASE_URL
            );
            FALLBACK_DATABASE_URL.to_string()
        });

        let defaults = DatabaseConfig::new(url);
        let database = DatabaseConfig {
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(defaults.max_connections),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(defaults.min_connections),
            log_queries: flag_var("DB_LOG_QUERIES").unwrap_or(defaults.log_queries),
            ..defaults
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            auto_migrate: flag_var("AUTO_MIGRATE").unwrap_or(true),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

/// `false`/`0` turn a flag off, anything else turns it on.
fn flag_var(key: &str) -> Option<bool> {
    env::var(key).ok().map(|v| v != "false" && v != "0")
}
