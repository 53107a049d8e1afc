//! Natural-language command endpoints.
//!
//! These answer 200 with the result envelope for every processed request;
//! the client branches on `success`, never on HTTP status. Only a body the
//! server cannot take apart (missing multipart part, unreadable field) is a
//! transport failure.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use bb_core::{BotError, Envelope, Result as BotResult};
use bb_session::Role;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

pub fn nlp_routes() -> Router<AppState> {
    Router::new()
        .route("/nlp/command", post(command))
        .route("/nlp/command-with-image", post(command_with_image))
}

#[derive(Debug, Deserialize)]
struct NlpCommandRequest {
    command: String,
    session_id: Option<String>,
}

/// Bound an engine call by the configured server-side timeout.
async fn with_timeout<T>(limit: Duration, fut: impl Future<Output = BotResult<T>>) -> BotResult<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(BotError::Timeout),
    }
}

async fn command(
    State(state): State<AppState>,
    Json(request): Json<NlpCommandRequest>,
) -> Json<Envelope> {
    let command_text = request.command.trim().to_string();
    if command_text.is_empty() {
        return Json(Envelope::from_error(&BotError::EmptyCommand));
    }

    let session = match request.session_id {
        Some(id) if id.trim().is_empty() => {
            return Json(Envelope::from_error(&BotError::InvalidSessionId(id)));
        }
        Some(id) => state.sessions.get_or_create(&id),
        None => state.sessions.create(None),
    };

    state.sessions.add_message(&session.id, Role::User, &command_text);
    let result =
        with_timeout(state.command_timeout, state.engine.answer(&command_text, None)).await;
    match result {
        Ok(message) => {
            state.sessions.add_message(&session.id, Role::Model, &message);
            Json(Envelope::ok(json!({
                "message": message,
                "command_processed": command_text,
                "session_id": session.id,
                "timestamp": Utc::now().to_rfc3339(),
            })))
        }
        Err(err) => {
            warn!(session_id = %session.id, error = %err, "command failed");
            Json(Envelope::err_with_details(
                err.code(),
                err.to_string(),
                json!({ "command": command_text }),
            ))
        }
    }
}

/// Process a natural-language command against an uploaded image.
async fn command_with_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Envelope>, ApiError> {
    let mut image: Option<(String, Vec<u8>)> = None;
    let mut command_text: Option<String> = None;
    let mut session_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read image: {e}")))?;
                image = Some((filename, bytes.to_vec()));
            }
            Some("command") => {
                command_text = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("Failed to read command: {e}")))?,
                );
            }
            Some("session_id") => {
                session_id = Some(
                    field.text().await.map_err(|e| {
                        ApiError::bad_request(format!("Failed to read session_id: {e}"))
                    })?,
                );
            }
            _ => {}
        }
    }

    let (filename, bytes) = image.ok_or_else(|| ApiError::bad_request("Missing 'image' field"))?;
    let command_text =
        command_text.ok_or_else(|| ApiError::bad_request("Missing 'command' field"))?;
    let command_text = command_text.trim().to_string();
    if command_text.is_empty() {
        return Ok(Json(Envelope::from_error(&BotError::EmptyCommand)));
    }
    let session_id = session_id.unwrap_or_default();
    if session_id.trim().is_empty() {
        return Ok(Json(Envelope::from_error(&BotError::InvalidSessionId(
            session_id,
        ))));
    }

    // Fresh correlation tokens are accepted here: the client may mint its
    // own session id for this path instead of going through /api/session.
    let session = state.sessions.get_or_create(&session_id);
    state
        .sessions
        .add_message(&session.id, Role::User, format!("{command_text} [image: {filename}]"));

    let outcome = async {
        let analysis = state.engine.analyze(&filename, &bytes).await?;
        let response = state
            .engine
            .answer(&command_text, Some(&analysis))
            .await?;
        Ok::<_, BotError>((analysis, response))
    };

    let result = with_timeout(state.command_timeout, outcome).await;
    match result {
        Ok((analysis, response)) => {
            let image_id = state.images.save(&filename, analysis.format.mime(), bytes);
            state.sessions.add_message(&session.id, Role::Model, &response);
            info!(session_id = %session.id, %image_id, "image command processed");
            Ok(Json(Envelope::ok(json!({
                "response": response,
                "analysis": analysis.summary,
                "identified_items": analysis.identified_items,
                "image_id": image_id,
                "command_processed": command_text,
                "session_id": session.id,
                "timestamp": Utc::now().to_rfc3339(),
            }))))
        }
        Err(err) => {
            warn!(session_id = %session.id, error = %err, "image command failed");
            state
                .sessions
                .add_message(&session.id, Role::Model, err.to_string());
            Ok(Json(Envelope::err_with_details(
                err.code(),
                err.to_string(),
                json!({ "command": command_text }),
            )))
        }
    }
}
