use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

pub use sea_orm::DatabaseConnection;

/// Configuration for the blog database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// Read `DATABASE_URL`, `DB_MAX_CONNECTIONS` and `DB_MIN_CONNECTIONS`.
    /// Returns `None` when no database URL is configured.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("DATABASE_URL").ok()?;
        Some(Self {
            url,
            max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(20),
            min_connections: std::env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        })
    }

    /// Open the connection pool.
    pub async fn connect(&self) -> Result<DbConn, DbErr> {
        tracing::info!("Connecting to database...");

        let opts = ConnectOptions::new(&self.url)
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let conn = Database::connect(opts).await?;
        tracing::info!(pool = self.max_connections, "Database connected");

        Ok(conn)
    }
}
