//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;

use actix_web::{Resource, web};
use uuid::Uuid;

use crate::middleware::error::AppError;
use crate::middleware::rate_limit::RateLimitMiddleware;
use crate::routes::Route;
use crate::state::AppState;

/// Resource registered under the route's pattern and name. The id is
/// only a placeholder; the pattern keeps `{id}`.
fn named(route: Route) -> Resource {
    web::resource(route.pattern()).name(route.name())
}

/// Malformed path ids are reported as a missing page.
fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::NotFound(err.to_string()).into())
}

fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Configure shared state and every application route.
pub fn configure(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        let login_limiter = state.login_limiter.clone();

        cfg.app_data(web::Data::new(state))
            .app_data(path_config())
            .app_data(form_config())
            // Blog
            .service(named(Route::BlogHome).route(web::get().to(posts::list)))
            // Registered before /post/{id} so "new" is not taken for an id
            .service(
                named(Route::PostCreate)
                    .route(web::get().to(posts::create_form))
                    .route(web::post().to(posts::create)),
            )
            .service(named(Route::PostDetail(Uuid::nil())).route(web::get().to(posts::detail)))
            .service(
                named(Route::PostUpdate(Uuid::nil()))
                    .route(web::get().to(posts::update_form))
                    .route(web::post().to(posts::update)),
            )
            .service(
                named(Route::PostDelete(Uuid::nil()))
                    .route(web::get().to(posts::delete_confirm))
                    .route(web::post().to(posts::delete)),
            )
            // Session
            .service(
                named(Route::Login)
                    .wrap(RateLimitMiddleware::new(login_limiter))
                    .route(web::get().to(auth::login_form))
                    .route(web::post().to(auth::login)),
            )
            .service(named(Route::Logout).route(web::post().to(auth::logout)))
            // Public
            .service(named(Route::Health).route(web::get().to(health::health_check)));
    }
}
