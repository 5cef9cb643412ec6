//! # Quill Blog Server
//!
//! Server-rendered blog: anyone can read posts, logged-in users write,
//! edit and delete their own.

use actix_web::{App, HttpServer};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod routes;
mod state;
mod telemetry;
mod templates;

#[cfg(test)]
mod test_support;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!("Starting Quill on {}:{}", config.host, config.port);

    // Build application state
    let state = AppState::new(&config).await;

    if let Some((username, password)) = &config.seed_user {
        if let Err(e) = state.ensure_user(username, password).await {
            tracing::error!(%username, "Failed to seed user: {}", e);
        }
    }

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .configure(handlers::configure(state.clone()))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
