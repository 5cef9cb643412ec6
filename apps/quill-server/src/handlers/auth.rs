//! Login and logout handlers.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, web};

use quill_shared::dto::{LoginForm, NextQuery, safe_next};

use crate::handlers::posts::redirect;
use crate::middleware::auth::{OptionalIdentity, expired_session_cookie, session_cookie};
use crate::middleware::error::{AppError, AppResult};
use crate::routes::Route;
use crate::state::AppState;
use crate::templates::{LoginPage, render};

const LOGIN_FAILED: &str = "Please enter a correct username and password.";

/// GET /login
pub async fn login_form(viewer: OptionalIdentity, query: web::Query<NextQuery>) -> HttpResponse {
    render(
        StatusCode::OK,
        viewer.identity(),
        &LoginPage {
            username: "",
            next: safe_next(query.next.as_deref()),
            error: None,
        },
    )
}

/// POST /login - sets the session cookie and follows `next`.
pub async fn login(
    state: web::Data<AppState>,
    form: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let username = form.username.trim();
    let next = safe_next(form.next.as_deref());

    // Find user by username
    let user = state.users.find_by_username(username).await?;

    // Verify password
    let valid = match &user {
        Some(user) => state
            .passwords
            .verify(&form.password, &user.password_hash)
            .map_err(|e| AppError::Internal(e.to_string()))?,
        None => false,
    };

    let Some(user) = user.filter(|_| valid) else {
        tracing::warn!(%username, "Failed login attempt");
        return Ok(render(
            StatusCode::OK,
            None,
            &LoginPage {
                username,
                next,
                error: Some(LOGIN_FAILED),
            },
        ));
    };

    // Generate token
    let token = state
        .tokens
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    tracing::info!(user_id = %user.id, %username, "User logged in");

    let target = next.map(str::to_string).unwrap_or_else(|| Route::BlogHome.path());
    Ok(HttpResponse::Found()
        .cookie(session_cookie(
            token,
            state.tokens.expiration_seconds(),
            state.secure_cookies,
        ))
        .insert_header((header::LOCATION, target))
        .finish())
}

/// POST /logout
pub async fn logout(viewer: OptionalIdentity) -> HttpResponse {
    if let Some(identity) = viewer.identity() {
        tracing::info!(username = %identity.username, "User logged out");
    }

    let mut response = redirect(Route::BlogHome);
    if let Err(e) = response.add_cookie(&expired_session_cookie()) {
        tracing::error!("Failed to clear session cookie: {}", e);
    }
    response
}
