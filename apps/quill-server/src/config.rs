//! Application configuration loaded from environment variables.

use std::env;

use quill_infra::{JwtConfig, RateLimitConfig};

#[cfg(feature = "postgres")]
use quill_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub login_rate_limit: RateLimitConfig,
    pub secure_cookies: bool,
    /// Account created at start-up when both parts are set.
    pub seed_user: Option<(String, String)>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let seed_user = match (env::var("SEED_USERNAME"), env::var("SEED_PASSWORD")) {
            (Ok(username), Ok(password)) if !username.is_empty() => Some((username, password)),
            _ => None,
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            #[cfg(feature = "postgres")]
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            login_rate_limit: RateLimitConfig::from_env(),
            secure_cookies: env::var("SESSION_COOKIE_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            seed_user,
        }
    }
}
