//! Uniform JSON envelope returned by every `/api/v1` endpoint

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// `{code, status, msg, data}` wrapper
///
/// `code` is the numeric HTTP status and `status` its canonical reason
/// phrase. `data` is `null` on every failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseResponse<T> {
    pub code: u16,
    pub status: String,
    pub msg: String,
    pub data: Option<T>,
}

impl<T> BaseResponse<T> {
    pub fn new(status: StatusCode, msg: impl Into<String>, data: Option<T>) -> Self {
        Self {
            code: status.as_u16(),
            status: status.canonical_reason().unwrap_or_default().to_string(),
            msg: msg.into(),
            data,
        }
    }

    pub fn ok(msg: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::OK, msg, Some(data))
    }

    pub fn created(msg: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::CREATED, msg, Some(data))
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg, None)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, msg, None)
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg, None)
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl<T: Serialize> IntoResponse for BaseResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
