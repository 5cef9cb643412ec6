//! Persistence: SeaORM-backed PostgreSQL repositories and in-memory fallbacks.

mod memory;

#[cfg(feature = "postgres")]
mod connections;
#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
mod postgres_repo;

pub use memory::{InMemoryPostRepository, InMemoryStore, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use connections::{DatabaseConfig, DatabaseConnection};
#[cfg(feature = "postgres")]
pub use postgres_base::PostgresBaseRepository;
#[cfg(feature = "postgres")]
pub use postgres_repo::{PostgresPostRepository, PostgresUserRepository};
