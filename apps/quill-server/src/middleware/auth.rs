//! Session authentication extractors.
//!
//! A request is authenticated by a JWT carried either in the `session`
//! cookie set by the login view or in an `Authorization: Bearer` header.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use std::future::{Ready, ready};

use quill_core::ports::{AuthError, TokenClaims};

use crate::routes::Route;
use crate::state::AppState;

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "session";

/// Authenticated user identity extractor.
///
/// Handlers taking an `Identity` only run for logged-in users; everyone
/// else is redirected to the login page.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub username: String,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}

/// Authentication failure; answered with a redirect to the login page that
/// brings the user back to `next` afterwards.
#[derive(Debug, thiserror::Error)]
#[error("{source}")]
pub struct AuthenticationError {
    pub source: AuthError,
    pub next: String,
}

impl ResponseError for AuthenticationError {
    fn status_code(&self) -> StatusCode {
        StatusCode::FOUND
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Found()
            .insert_header((header::LOCATION, login_url(&self.next)))
            .finish()
    }
}

/// `/login?next=<path>`
pub fn login_url(next: &str) -> String {
    format!("{}?next={}", Route::Login.path(), urlencoding::encode(next))
}

/// Build the session cookie for a freshly issued token.
pub fn session_cookie(token: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(actix_web::cookie::time::Duration::seconds(max_age_secs))
        .finish()
}

/// A cookie that makes the browser drop the session.
pub fn expired_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

fn bearer_token(req: &HttpRequest) -> Result<Option<String>, AuthError> {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(|t| Some(t.to_string()))
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

fn authenticate(req: &HttpRequest) -> Result<Identity, AuthError> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!("AppState not found in app data");
        AuthError::InvalidToken("Server configuration error".to_string())
    })?;

    let token = match req.cookie(SESSION_COOKIE) {
        Some(cookie) if !cookie.value().is_empty() => cookie.value().to_string(),
        _ => bearer_token(req)?.ok_or(AuthError::MissingAuth)?,
    };

    state.tokens.validate_token(&token).map(Identity::from)
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(|source| {
            tracing::debug!(path = %req.path(), error = %source, "Redirecting to login");
            AuthenticationError {
                source,
                next: req.path().to_string(),
            }
        }))
    }
}

/// Optional identity extractor - doesn't fail if not authenticated.
pub struct OptionalIdentity(pub Option<Identity>);

impl OptionalIdentity {
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }

    pub fn user_id(&self) -> Option<uuid::Uuid> {
        self.0.as_ref().map(|i| i.user_id)
    }
}

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalIdentity(authenticate(req).ok())))
    }
}
