//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Rule violations raised by the domain model.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} {id} not found")]
    NotFound { entity_type: &'static str, id: Uuid },

    /// The caller is authenticated but may not touch the entity.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    /// Unique or foreign-key violation.
    #[error("Constraint violation: {0}")]
    Constraint(String),
}
