//! HTTP-facing error type for the todo controller.
//!
//! # Design
//! Only two failures exist: the id is unknown, or the path or body of the
//! request could not be used. The status code is the contract; the `{"error": ...}` body is
//! informational.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::model::TodoId;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No todo is stored under the requested id.
    #[error("todo {0} not found")]
    NotFound(TodoId),

    /// The path id was not an integer, or the request body was `null`,
    /// missing, or not valid JSON for the payload.
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::NotFound(22);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "todo 22 not found");
    }

    #[test]
    fn bad_request_maps_to_400() {
        let response = ApiError::BadRequest("request body must not be null".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
