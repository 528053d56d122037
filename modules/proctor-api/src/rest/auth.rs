use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde::Deserialize;

use super::required;
use crate::error::ApiError;
use crate::AppState;

/// Clients also send `faceEmbedding`; it is ignored.
#[derive(Deserialize)]
pub struct LoginRequest {
    username: Option<String>,
}

/// Placeholder token. Identifies the user to the demo client; proves nothing.
fn demo_token(user_id: &uuid::Uuid) -> String {
    format!("demo-token-{user_id}")
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(body) = body?;
    let username = required("username", body.username)?;

    let user = state.engine.login(&username);
    let token = demo_token(&user.id);

    Ok(Json(serde_json::json!({ "user": user, "token": token })))
}
