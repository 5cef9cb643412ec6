//! In-memory repositories - used when no database is configured and in tests.
//!
//! Data is lost on process restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{AuthoredPost, Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository, UserRepository};

/// Tables shared by the in-memory repositories.
///
/// Posts are kept in insertion order so equal timestamps still list the
/// most recently created post first.
#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    posts: RwLock<Vec<Post>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    async fn username_of(&self, user_id: Uuid) -> String {
        self.users
            .read()
            .await
            .get(&user_id)
            .map(|u| u.username.clone())
            .unwrap_or_default()
    }
}

/// In-memory user repository.
#[derive(Clone)]
pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.users.read().await.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.store.users.write().await;

        let taken = users
            .values()
            .any(|u| u.username == user.username && u.id != user.id);
        if taken {
            return Err(RepoError::Constraint(format!(
                "username '{}' already exists",
                user.username
            )));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Removes the user's posts as well, like the cascading foreign key.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        if self.store.users.write().await.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }

        self.store.posts.write().await.retain(|p| p.author_id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let users = self.store.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }
}

/// In-memory post repository.
#[derive(Clone)]
pub struct InMemoryPostRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryPostRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let posts = self.store.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        if !self.store.users.read().await.contains_key(&post.author_id) {
            return Err(RepoError::Constraint(format!(
                "author {} does not exist",
                post.author_id
            )));
        }

        let mut posts = self.store.posts.write().await;
        match posts.iter_mut().find(|p| p.id == post.id) {
            Some(existing) => *existing = post.clone(),
            None => posts.push(post.clone()),
        }

        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.store.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);

        if posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_newest_first(&self) -> Result<Vec<AuthoredPost>, RepoError> {
        let mut posts: Vec<Post> = self.store.posts.read().await.iter().rev().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut listed = Vec::with_capacity(posts.len());
        for post in posts {
            let author_username = self.store.username_of(post.author_id).await;
            listed.push(AuthoredPost {
                post,
                author_username,
            });
        }
        Ok(listed)
    }

    async fn find_authored(&self, id: Uuid) -> Result<Option<AuthoredPost>, RepoError> {
        let Some(post) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let author_username = self.store.username_of(post.author_id).await;

        Ok(Some(AuthoredPost {
            post,
            author_username,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, Utc};

    fn repos() -> (InMemoryUserRepository, InMemoryPostRepository) {
        let store = InMemoryStore::new();
        (
            InMemoryUserRepository::new(store.clone()),
            InMemoryPostRepository::new(store),
        )
    }

    #[tokio::test]
    async fn test_post_fields_persist() {
        let (users, posts) = repos();
        let author = users.save(User::new("testuser", "hash")).await.unwrap();

        let post = posts
            .save(Post::new(author.id, "Test Post", "This is a test post"))
            .await
            .unwrap();

        let stored = posts.find_authored(post.id).await.unwrap().unwrap();
        assert_eq!(stored.author_username, "testuser");
        assert_eq!(stored.post.title, "Test Post");
        assert_eq!(stored.post.content, "This is a test post");
    }

    #[tokio::test]
    async fn test_save_requires_existing_author() {
        let (_, posts) = repos();

        let result = posts.save(Post::new(Uuid::new_v4(), "Orphan", "body")).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
        assert!(posts.list_newest_first().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_updates_in_place() {
        let (users, posts) = repos();
        let author = users.save(User::new("testuser", "hash")).await.unwrap();
        let mut post = posts
            .save(Post::new(author.id, "Test Post", "body"))
            .await
            .unwrap();

        post.revise("Updated title", "Updated text");
        posts.save(post.clone()).await.unwrap();

        let listed = posts.list_newest_first().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].post.title, "Updated title");
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let (users, posts) = repos();
        let author = users.save(User::new("testuser", "hash")).await.unwrap();

        let mut older = Post::new(author.id, "Older", "first");
        older.created_at = Utc::now() - TimeDelta::hours(1);
        posts.save(older).await.unwrap();
        posts.save(Post::new(author.id, "Newer", "second")).await.unwrap();

        let titles: Vec<String> = posts
            .list_newest_first()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.post.title)
            .collect();
        assert_eq!(titles, vec!["Newer", "Older"]);
    }

    #[tokio::test]
    async fn test_delete_removes_only_target() {
        let (users, posts) = repos();
        let author = users.save(User::new("testuser", "hash")).await.unwrap();
        let keep = posts.save(Post::new(author.id, "Keep", "a")).await.unwrap();
        let gone = posts.save(Post::new(author.id, "Drop", "b")).await.unwrap();

        posts.delete(gone.id).await.unwrap();

        assert!(posts.find_by_id(gone.id).await.unwrap().is_none());
        assert!(posts.find_by_id(keep.id).await.unwrap().is_some());
        assert!(matches!(
            posts.delete(gone.id).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_username_is_unique() {
        let (users, _) = repos();
        users.save(User::new("testuser", "hash")).await.unwrap();

        let result = users.save(User::new("testuser", "other")).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
        assert!(users.find_by_username("testuser").await.unwrap().is_some());
        assert!(users.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_deleting_user_removes_their_posts() {
        let (users, posts) = repos();
        let alice = users.save(User::new("alice", "hash")).await.unwrap();
        let bob = users.save(User::new("bob", "hash")).await.unwrap();
        let hers = posts.save(Post::new(alice.id, "Hers", "a")).await.unwrap();
        let his = posts.save(Post::new(bob.id, "His", "b")).await.unwrap();

        users.delete(alice.id).await.unwrap();

        assert!(posts.find_by_id(hers.id).await.unwrap().is_none());
        assert!(posts.find_by_id(his.id).await.unwrap().is_some());
    }
}
