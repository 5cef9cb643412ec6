//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use quill_core::domain::{AuthoredPost, User};
use quill_core::error::RepoError;
use quill_core::ports::{PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

fn authored(post: post::Model, author: Option<user::Model>) -> AuthoredPost {
    AuthoredPost {
        post: post.into(),
        // The FK makes a missing author impossible short of a concurrent delete.
        author_username: author.map(|u| u.username).unwrap_or_default(),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_newest_first(&self) -> Result<Vec<AuthoredPost>, RepoError> {
        let rows = PostEntity::find()
            .find_also_related(UserEntity)
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .map(|(post, author)| authored(post, author))
            .collect())
    }

    async fn find_authored(&self, id: Uuid) -> Result<Option<AuthoredPost>, RepoError> {
        let row = PostEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(|(post, author)| authored(post, author)))
    }
}
