use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Longest accepted title, in characters.
pub const TITLE_MAX_CHARS: usize = 100;

/// Post entity - a blog post owned by exactly one author.
///
/// `id`, `author_id` and `created_at` are fixed at construction. The only
/// mutation exposed is [`Post::revise`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post owned by `author_id`.
    pub fn new(author_id: Uuid, title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title: title.into(),
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace title and content in place.
    pub fn revise(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.title = title.into();
        self.content = content.into();
        self.updated_at = Utc::now();
    }

    /// Canonical URL of the post's detail page.
    pub fn absolute_url(&self) -> String {
        format!("/post/{}", self.id)
    }

    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }

    /// Fails with [`DomainError::Forbidden`] unless `user_id` wrote this post.
    pub fn ensure_author(&self, user_id: Uuid) -> Result<(), DomainError> {
        if self.is_authored_by(user_id) {
            Ok(())
        } else {
            Err(DomainError::Forbidden(format!(
                "post {} belongs to another author",
                self.id
            )))
        }
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// A post together with its author's username, as shown on pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthoredPost {
    pub post: Post,
    pub author_username: String,
}

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check user-supplied post fields. An empty result means the input is valid.
pub fn validate_post_fields(title: &str, content: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if title.trim().is_empty() {
        errors.push(FieldError::new("title", "This field is required."));
    } else if title.chars().count() > TITLE_MAX_CHARS {
        errors.push(FieldError::new(
            "title",
            format!("Ensure this value has at most {TITLE_MAX_CHARS} characters."),
        ));
    }

    if content.trim().is_empty() {
        errors.push(FieldError::new("content", "This field is required."));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_post_keeps_supplied_fields() {
        let author = Uuid::new_v4();
        let post = Post::new(author, "Test Post", "This is a test post");

        assert_eq!(post.author_id, author);
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.content, "This is a test post");
        assert_eq!(post.created_at, post.updated_at);
    }

    #[test]
    fn display_is_title() {
        let post = Post::new(Uuid::new_v4(), "Test Post", "body");
        assert_eq!(post.to_string(), post.title);
    }

    #[test]
    fn absolute_url_uses_id() {
        let post = Post::new(Uuid::new_v4(), "Test Post", "body");
        assert_eq!(post.absolute_url(), format!("/post/{}", post.id));
    }

    #[test]
    fn revise_leaves_identity_untouched() {
        let author = Uuid::new_v4();
        let mut post = Post::new(author, "Test Post", "body");
        let (id, created_at) = (post.id, post.created_at);

        post.revise("Updated title", "Updated text");

        assert_eq!(post.id, id);
        assert_eq!(post.author_id, author);
        assert_eq!(post.created_at, created_at);
        assert_eq!(post.title, "Updated title");
        assert_eq!(post.content, "Updated text");
        assert!(post.updated_at >= created_at);
    }

    #[test]
    fn ensure_author_rejects_other_users() {
        let post = Post::new(Uuid::new_v4(), "Test Post", "body");

        assert!(post.ensure_author(post.author_id).is_ok());
        assert!(matches!(
            post.ensure_author(Uuid::new_v4()),
            Err(DomainError::Forbidden(_))
        ));
    }

    #[test]
    fn validation_requires_both_fields() {
        let errors = validate_post_fields("  ", "");
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "content"]);

        assert!(validate_post_fields("New title", "New text").is_empty());
    }

    #[test]
    fn validation_limits_title_length() {
        let long_title = "x".repeat(TITLE_MAX_CHARS + 1);
        let errors = validate_post_fields(&long_title, "body");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");

        let exact = "é".repeat(TITLE_MAX_CHARS);
        assert!(validate_post_fields(&exact, "body").is_empty());
    }
}
