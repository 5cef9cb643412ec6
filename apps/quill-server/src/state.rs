//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::domain::User;
use quill_core::error::RepoError;
use quill_core::ports::{
    AuthError, PasswordService, PostRepository, RateLimiter, TokenService, UserRepository,
};
use quill_infra::{
    Argon2PasswordService, InMemoryPostRepository, InMemoryRateLimiter, InMemoryStore,
    InMemoryUserRepository, JwtTokenService,
};

#[cfg(feature = "postgres")]
use quill_infra::database::{PostgresPostRepository, PostgresUserRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub login_limiter: Arc<dyn RateLimiter>,
    /// `"postgres"` or `"memory"`, reported by the health check.
    pub storage: &'static str,
    /// Mark session cookies `Secure`.
    pub secure_cookies: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
        let login_limiter: Arc<dyn RateLimiter> =
            Arc::new(InMemoryRateLimiter::new(config.login_rate_limit.clone()));

        let mut state = Self::in_memory(tokens, passwords, login_limiter);
        state.secure_cookies = config.secure_cookies;

        #[cfg(feature = "postgres")]
        state.attach_database(config).await;

        #[cfg(not(feature = "postgres"))]
        tracing::info!("Running without postgres feature - using in-memory repositories");

        tracing::info!(storage = state.storage, "Application state initialized");
        state
    }

    /// Swap the in-memory repositories for PostgreSQL when configured.
    #[cfg(feature = "postgres")]
    async fn attach_database(&mut self, config: &AppConfig) {
        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return;
        };

        match db_config.connect().await {
            Ok(conn) => {
                self.users = Arc::new(PostgresUserRepository::new(conn.clone()));
                self.posts = Arc::new(PostgresPostRepository::new(conn));
                self.storage = "postgres";
            }
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
            }
        }
    }

    /// State backed by fresh in-memory repositories.
    pub fn in_memory(
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
        login_limiter: Arc<dyn RateLimiter>,
    ) -> Self {
        let store = InMemoryStore::new();
        Self {
            users: Arc::new(InMemoryUserRepository::new(store.clone())),
            posts: Arc::new(InMemoryPostRepository::new(store)),
            tokens,
            passwords,
            login_limiter,
            storage: "memory",
            secure_cookies: false,
        }
    }

    /// Create `username` unless it already exists; returns the stored user.
    pub async fn ensure_user(&self, username: &str, password: &str) -> Result<User, SeedError> {
        if let Some(existing) = self.users.find_by_username(username).await? {
            return Ok(existing);
        }

        let hash = self.passwords.hash(password)?;
        let user = self.users.save(User::new(username, hash)).await?;
        tracing::info!(%username, "Created user");
        Ok(user)
    }
}
