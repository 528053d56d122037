use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};
use proctor_engine::IncomingEvent;
use serde::Deserialize;

use super::{parse_session_id, required};
use crate::error::ApiError;
use crate::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRequest {
    user_id: Option<String>,
    exam_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    session_id: Option<String>,
    event_type: Option<String>,
    timestamp: Option<serde_json::Value>,
    metadata: Option<serde_json::Value>,
}

pub async fn start(
    State(state): State<Arc<AppState>>,
    body: Result<Json<StartRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(body) = body?;
    let user_id = required("userId", body.user_id)?;
    let exam_id = required("examId", body.exam_id)?;

    let session = state.engine.start_exam(&user_id, &exam_id);

    Ok(Json(serde_json::json!({ "session": session })))
}

pub async fn submit_event(
    State(state): State<Arc<AppState>>,
    body: Result<Json<EventRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(body) = body?;
    let session_id = required("sessionId", body.session_id)?;
    let event_type = required("eventType", body.event_type)?;
    let session_id = parse_session_id(&session_id)?;

    let event = IncomingEvent::new(event_type)
        .with_timestamp(body.timestamp.unwrap_or_default())
        .with_metadata(body.metadata.unwrap_or_default());
    let outcome = state.engine.apply_event(session_id, event)?;

    Ok(Json(serde_json::json!({
        "log": outcome.log,
        "session": outcome.session,
    })))
}

pub async fn report(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    let report = state.engine.build_report(session_id)?;
    Ok(Json(serde_json::json!({ "report": report })))
}

pub async fn session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    let session = state.engine.session(session_id)?;
    Ok(Json(serde_json::json!({ "session": session })))
}
