//! Axum extractors for sale requests
//!
//! [`ValidatedJson`] deserializes the body and runs `validator` rules before
//! the handler sees it. [`SalePath`] wraps axum's `Path` so that undecodable
//! segments still answer with the envelope. Path parameters that must be
//! parsed (user ids, dates) go through [`parse_user_id`] and
//! [`parse_date_param`].

use super::response::BaseResponse;
use crate::core::parse_date;
use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::request::Parts,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

pub const INVALID_SALE_REQUEST: &str = "Invalid sale request";
pub const INVALID_USER_ID: &str = "Invalid user ID";
pub const INVALID_DATE: &str = "Invalid date";
pub const INVALID_PATH: &str = "Invalid path parameter";

/// Errors that can occur during extraction
#[derive(Debug)]
pub enum ExtractorError {
    /// Body was not valid JSON or did not match the request shape
    MalformedJson(JsonRejection),
    /// Body parsed but broke a field rule
    Validation(ValidationErrors),
    /// A path segment could not be decoded
    InvalidPath(PathRejection),
    InvalidUserId(String),
    InvalidDate(String),
}

impl std::fmt::Display for ExtractorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractorError::MalformedJson(e) => write!(f, "Malformed JSON: {}", e.body_text()),
            ExtractorError::Validation(e) => write!(f, "Validation failed: {}", e),
            ExtractorError::InvalidPath(e) => write!(f, "Invalid path: {}", e.body_text()),
            ExtractorError::InvalidUserId(raw) => write!(f, "Invalid user ID: {}", raw),
            ExtractorError::InvalidDate(raw) => write!(f, "Invalid date: {}", raw),
        }
    }
}

impl std::error::Error for ExtractorError {}

impl IntoResponse for ExtractorError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "Rejected request");

        let msg = match self {
            ExtractorError::MalformedJson(_) | ExtractorError::Validation(_) => {
                INVALID_SALE_REQUEST
            }
            ExtractorError::InvalidPath(_) => INVALID_PATH,
            ExtractorError::InvalidUserId(_) => INVALID_USER_ID,
            ExtractorError::InvalidDate(_) => INVALID_DATE,
        };

        BaseResponse::<()>::bad_request(msg).into_response()
    }
}

/// JSON body extractor that also runs `validator` rules
///
/// ```rust,ignore
/// pub async fn create_sale(
///     State(state): State<SalesState>,
///     ValidatedJson(request): ValidatedJson<CreateSaleRequest>,
/// ) -> Response {
///     // request is already validated
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ExtractorError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(ExtractorError::MalformedJson)?;

        payload.validate().map_err(ExtractorError::Validation)?;

        Ok(ValidatedJson(payload))
    }
}

/// Path extractor whose rejection is an enveloped 400
#[derive(Debug, Clone)]
pub struct SalePath<T>(pub T);

impl<S, T> FromRequestParts<S> for SalePath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ExtractorError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(ExtractorError::InvalidPath)?;

        Ok(SalePath(value))
    }
}

/// Parse the `userID` path segment
pub fn parse_user_id(raw: &str) -> Result<i64, ExtractorError> {
    raw.trim()
        .parse()
        .map_err(|_| ExtractorError::InvalidUserId(raw.to_string()))
}

/// Parse the `date` path segment (RFC 3339 or `YYYY-MM-DD`)
pub fn parse_date_param(raw: &str) -> Result<DateTime<Utc>, ExtractorError> {
    parse_date(raw).ok_or_else(|| ExtractorError::InvalidDate(raw.to_string()))
}
