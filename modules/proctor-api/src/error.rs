use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use proctor_common::ProctorError;
use tracing::warn;

/// HTTP face of `ProctorError`: never fatal, always answered with a JSON body.
#[derive(Debug)]
pub struct ApiError(pub ProctorError);

impl From<ProctorError> for ApiError {
    fn from(err: ProctorError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ProctorError::invalid(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ProctorError::SessionNotFound { .. } => StatusCode::NOT_FOUND,
            ProctorError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };
        warn!(status = status.as_u16(), error = %self.0, "Request rejected");
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}
