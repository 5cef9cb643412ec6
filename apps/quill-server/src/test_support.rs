//! Fixtures shared by the handler tests.

use std::sync::Arc;
use std::time::Duration;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::test;

use quill_core::domain::{Post, User};
use quill_infra::{
    Argon2PasswordService, InMemoryRateLimiter, JwtConfig, JwtTokenService, RateLimitConfig,
};

use crate::middleware::auth::session_cookie;
use crate::state::AppState;
use crate::templates::TEMPLATE_HEADER;

pub const TEST_USERNAME: &str = "testuser";
pub const TEST_PASSWORD: &str = "12345";

pub fn test_state() -> AppState {
    AppState::in_memory(
        Arc::new(JwtTokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
            issuer: "quill-test".to_string(),
        })),
        Arc::new(Argon2PasswordService::new()),
        Arc::new(InMemoryRateLimiter::new(RateLimitConfig {
            max_requests: 100,
            window: Duration::from_secs(60),
        })),
    )
}

/// One user and one post of theirs.
pub struct Fixture {
    pub state: AppState,
    pub user: User,
    pub post: Post,
}

impl Fixture {
    /// Session cookie for the fixture user.
    pub fn session_cookie(&self) -> Cookie<'static> {
        self.session_cookie_for(&self.user)
    }

    pub fn session_cookie_for(&self, user: &User) -> Cookie<'static> {
        let token = self
            .state
            .tokens
            .generate_token(user.id, &user.username)
            .unwrap();
        session_cookie(token, 3600, false)
    }
}

/// Password hashing is skipped here; tests that log in through the form
/// create their own user with `AppState::ensure_user`.
pub async fn fixture() -> Fixture {
    let state = test_state();
    let user = state
        .users
        .save(User::new(TEST_USERNAME, "not-a-real-hash"))
        .await
        .unwrap();
    let post = state
        .posts
        .save(Post::new(user.id, "Test Post", "This is a test post"))
        .await
        .unwrap();

    Fixture { state, user, post }
}

pub async fn body_text<B: actix_web::body::MessageBody>(resp: ServiceResponse<B>) -> String {
    String::from_utf8(test::read_body(resp).await.to_vec()).unwrap()
}

/// Template a view rendered, if any.
pub fn template_of<B>(resp: &ServiceResponse<B>) -> Option<&str> {
    resp.headers()
        .get(TEMPLATE_HEADER)
        .and_then(|v| v.to_str().ok())
}
