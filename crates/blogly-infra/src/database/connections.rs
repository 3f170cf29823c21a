use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbConn, DbErr};

/// Configuration for the application database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Echo every statement through sqlx logging.
    pub log_queries: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            log_queries: true,
        }
    }

    pub fn is_sqlite_memory(&self) -> bool {
        self.url.starts_with("sqlite::memory:") || self.url.contains("mode=memory")
    }
}

/// Process-wide storage handle.
///
/// Opened once at start-up and cloned into each repository; repositories open their own
/// transaction per mutating call.
#[derive(Clone)]
pub struct DatabaseHandle {
    pub conn: DbConn,
}

impl DatabaseHandle {
    /// Open the connection pool described by `config`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        // An in-memory SQLite database lives inside a single connection.
        let max_connections = if config.is_sqlite_memory() {
            1
        } else {
            config.max_connections
        };

        let opts = ConnectOptions::new(&config.url)
            .max_connections(max_connections)
            .min_connections(config.min_connections.min(max_connections))
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(config.log_queries)
            .to_owned();

        let conn = Database::connect(opts).await?;
        tracing::info!(
            backend = ?conn.get_database_backend(),
            pool = max_connections,
            "Database connected"
        );

        Ok(Self { conn })
    }

    /// Round-trip to the database, used by the health check.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.conn.ping().await
    }
}
