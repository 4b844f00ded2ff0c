//! Axum router configuration with middleware.
//!
//! Routes live at the root (no version prefix). Middleware: CORS restricted
//! to a single allow-listed origin, plus request tracing.

use anyhow::Context;
use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
///
/// `allowed_origin` is the single browser origin CORS accepts.
pub fn build_router(state: AppState, allowed_origin: &str) -> anyhow::Result<Router> {
    let origin: HeaderValue = allowed_origin
        .parse()
        .with_context(|| format!("invalid CORS origin '{allowed_origin}'"))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        // Chat CRUD
        .route(
            "/chats",
            get(handlers::chat::list_chats).post(handlers::chat::create_chat),
        )
        .route(
            "/chats/{uuid}",
            get(handlers::chat::get_chat).patch(handlers::chat::update_chat),
        )
        // Messages + completion relay
        .route(
            "/chats/{uuid}/messages",
            get(handlers::message::list_messages).post(handlers::message::send_message),
        )
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(router)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
