//! Data Transfer Objects - the url-encoded forms the views accept.
//!
//! Missing fields deserialize as empty strings so they reach validation
//! instead of being rejected by the extractor.

use serde::{Deserialize, Serialize};

/// Title/content submitted by the create and update views.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Credentials submitted by the login view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Where to go after a successful login.
    #[serde(default)]
    pub next: Option<String>,
}

/// Query string of `GET /login`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NextQuery {
    #[serde(default)]
    pub next: Option<String>,
}

/// Accept `next` only when it is a path on this site.
///
/// Browsers drop tabs and newlines from URLs, so `"/\t/host"` would become
/// a protocol-relative redirect; any whitespace or control character rejects.
pub fn safe_next(next: Option<&str>) -> Option<&str> {
    next.filter(|n| {
        n.starts_with('/')
            && !n.starts_with("//")
            && !n.contains('\\')
            && !n.chars().any(|c| c.is_whitespace() || c.is_control())
    })
}
