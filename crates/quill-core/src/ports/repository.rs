use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{AuthoredPost, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Missing rows yield [`RepoError::NotFound`].
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their login name.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts, newest first, joined with their author.
    async fn list_newest_first(&self) -> Result<Vec<AuthoredPost>, RepoError>;

    /// One post joined with its author.
    async fn find_authored(&self, id: Uuid) -> Result<Option<AuthoredPost>, RepoError>;
}
