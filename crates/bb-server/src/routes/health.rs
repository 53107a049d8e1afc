use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use bb_core::Envelope;
use serde_json::json;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Liveness/readiness probe.
async fn health_check(State(state): State<AppState>) -> Json<Envelope> {
    Json(Envelope::ok(json!({
        "status": "ok",
        "uptime_seconds": state.uptime_seconds(),
        "services": {
            "sessions": state.sessions.count(),
            "images": state.images.count(),
        },
    })))
}
