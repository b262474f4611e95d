//! Axum router configuration with middleware.
//!
//! Middleware: CORS, tracing.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Authentication
        .route("/auth/registration", post(handlers::auth::register))
        .route("/auth/token", post(handlers::auth::token))
        // Users
        .route("/users", get(handlers::user::list_users))
        .route("/users/me", get(handlers::user::get_me))
        .route("/users/{id}", get(handlers::user::get_user))
        .route("/users/{id}/chats", get(handlers::user::get_user_chats))
        // Chats
        .route(
            "/chats",
            get(handlers::chat::list_chats).post(handlers::chat::create_chat),
        )
        .route(
            "/chats/{id}",
            get(handlers::chat::get_chat)
                .put(handlers::chat::update_chat)
                .delete(handlers::chat::delete_chat),
        )
        .route(
            "/chats/{id}/messages",
            get(handlers::chat::get_chat_messages).post(handlers::chat::post_message),
        )
        .route("/chats/{id}/users", get(handlers::chat::get_chat_users))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
