//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM
//!
//! In-memory repositories, JWT + Argon2 authentication and the governor
//! rate limiter are always built.

pub mod auth;
pub mod database;
pub mod rate_limit;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{InMemoryPostRepository, InMemoryStore, InMemoryUserRepository};
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, DatabaseConnection};
