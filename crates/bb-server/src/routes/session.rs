//! Session lifecycle endpoints. The session token travels back to the
//! client as a cookie; unknown or expired ids surface as logical failures
//! inside a 200 envelope.

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use bb_core::Envelope;
use serde_json::json;
use tracing::info;

pub const SESSION_COOKIE: &str = "session_id";

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/api/session", post(create_session))
        .route(
            "/api/session/{id}",
            axum::routing::get(get_session).delete(delete_session),
        )
}

async fn create_session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<Envelope>) {
    let session = state.sessions.create(None);
    info!(session_id = %session.id, "session created");
    let cookie = Cookie::build((SESSION_COOKIE, session.id.clone()))
        .path("/")
        .http_only(true)
        .build();
    let envelope = Envelope::ok(json!({
        "session": session.to_value(),
        "message": "Session created successfully",
    }));
    (jar.add(cookie), Json(envelope))
}

async fn get_session(State(state): State<AppState>, Path(id): Path<String>) -> Json<Envelope> {
    match state.sessions.get(&id) {
        Some(session) => Json(Envelope::ok(json!({ "session": session.to_value() }))),
        None => Json(Envelope::err(
            "SESSION_NOT_FOUND",
            format!("Session {id} not found or expired"),
        )),
    }
}

async fn delete_session(State(state): State<AppState>, Path(id): Path<String>) -> Json<Envelope> {
    if state.sessions.remove(&id) {
        Json(Envelope::ok(json!({
            "message": format!("Session {id} deleted successfully"),
        })))
    } else {
        Json(Envelope::err(
            "SESSION_NOT_FOUND",
            format!("Session {id} not found"),
        ))
    }
}
