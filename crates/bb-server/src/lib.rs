//! BinBot HTTP gateway (Axum).
//!
//! Exposes session creation, session-scoped image upload, and
//! natural-language command submission, all answering with the uniform
//! result envelope.

pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use state::AppState;

/// Build the application router with default state.
pub fn app() -> Router {
    app_with_state(AppState::new())
}

/// Build the application router with a custom state.
pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::session_routes())
        .merge(routes::chat_routes())
        .merge(routes::nlp_routes())
        .with_state(state)
}
