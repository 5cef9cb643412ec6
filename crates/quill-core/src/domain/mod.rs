//! Domain entities - the core business objects.

mod user;

mod post;

pub use post::{AuthoredPost, FieldError, Post, TITLE_MAX_CHARS, validate_post_fields};
pub use user::User;
