//! Session-scoped image upload. Unlike the NLP path, failures here are
//! transport-level: missing cookie is 401, unknown session 404, bad upload
//! 400.

use crate::error::ApiError;
use crate::routes::session::SESSION_COOKIE;
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use bb_session::Role;
use serde_json::{json, Value};
use tracing::info;

pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/api/chat/image", post(chat_image))
}

/// Upload an image against the cookie-bound session, analyze it, and fold
/// the result into the session transcript.
async fn chat_image(
    State(state): State<AppState>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let session_id = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| ApiError::unauthorized("No active session"))?;

    let session = state
        .sessions
        .get(&session_id)
        .ok_or_else(|| ApiError::not_found("Session not found or expired"))?;

    let mut upload: Option<(String, String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().unwrap_or("").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {e}")))?;
            upload = Some((filename, content_type, bytes.to_vec()));
        }
    }

    let (filename, content_type, bytes) =
        upload.ok_or_else(|| ApiError::bad_request("Missing 'file' field"))?;
    if !content_type.starts_with("image/") {
        return Err(ApiError::bad_request("File must be an image"));
    }

    let analysis = state.engine.analyze(&filename, &bytes).await?;
    let image_id = state.images.save(&filename, &content_type, bytes);

    let summary = format!(
        "Image uploaded and analyzed. Found {} items: {}",
        analysis.identified_items.len(),
        analysis
            .identified_items
            .iter()
            .map(|i| i.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    state
        .sessions
        .add_message(&session.id, Role::User, format!("[Image uploaded: {filename}]"));
    state.sessions.add_message(&session.id, Role::Model, &summary);

    info!(session_id = %session.id, %image_id, "chat image processed");
    Ok(Json(json!({
        "success": true,
        "image_id": image_id,
        "analyzed_items": analysis.identified_items,
    })))
}
