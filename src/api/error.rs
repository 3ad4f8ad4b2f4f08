//! HTTP mapping of the service error vocabulary.

use crate::errors::Error;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Common error document returned with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Reason phrase of the status
    pub title: String,
    /// HTTP status code
    pub status: u16,
    /// Human-readable explanation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Per-field problems for validation failures
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// One invalid field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// External field name
    pub field: String,
    /// What is wrong with it
    pub message: String,
}

impl ErrorBody {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            status: status.as_u16(),
            detail: Some(detail.into()),
            errors: Vec::new(),
        }
    }
}

impl IntoResponse for ErrorBody {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// HTTP status for each error kind.
#[must_use]
pub const fn status_for(error: &Error) -> StatusCode {
    if error.is_client_error() {
        return StatusCode::BAD_REQUEST;
    }
    match error {
        Error::NotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        let body = match &self {
            Error::InvalidIdentifier { .. } => ErrorBody::new(status, "Invalid system ID format"),
            Error::Validation { field, message } => ErrorBody {
                errors: vec![FieldError {
                    field: (*field).to_string(),
                    message: message.clone(),
                }],
                ..ErrorBody::new(status, "Invalid request body")
            },
            Error::NotFound { .. } => ErrorBody::new(status, "System not found"),
            Error::Store { .. } | Error::Config { .. } | Error::Io(_) => {
                tracing::error!(error = ?self, "Request failed");
                ErrorBody::new(status, "Internal server error")
            }
        };
        body.into_response()
    }
}

/// Malformed or missing JSON bodies.
pub fn json_rejection(rejection: &JsonRejection) -> Response {
    tracing::warn!("Rejected request body: {rejection}");
    ErrorBody::new(StatusCode::BAD_REQUEST, "Invalid request body").into_response()
}

/// Query strings that do not deserialize into search criteria.
pub fn query_rejection(rejection: &QueryRejection) -> Response {
    tracing::warn!("Rejected query string: {rejection}");
    ErrorBody::new(StatusCode::BAD_REQUEST, "Invalid query parameters").into_response()
}

/// Path segments that cannot be extracted, e.g. invalid percent-encoding.
pub fn path_rejection(rejection: &PathRejection) -> Response {
    tracing::warn!("Rejected path: {rejection}");
    ErrorBody::new(StatusCode::BAD_REQUEST, "Invalid system ID format").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                Error::InvalidIdentifier {
                    value: "x".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                Error::validation("mailAddress", "bad"),
                StatusCode::BAD_REQUEST,
            ),
            (
                Error::NotFound {
                    id: "x".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                Error::Store {
                    message: "down".to_string(),
                    source: None,
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(status_for(&error), expected, "{error}");
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
