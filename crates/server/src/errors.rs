use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use service::errors::ServiceError;

/// JSON error envelope: `{"error": ..., "details": ...}` with `details`
/// omitted when absent.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, details: Option<String>) -> Self {
        Self { status, error: error.into(), details }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg, None)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: &self.error, details: self.details.as_deref() };
        (self.status, Json(body)).into_response()
    }
}

// Client-caused failures keep their message; store faults are logged in full
// here and flattened to a generic 500 for the caller.
impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(v) => Self::bad_request(v.to_string()),
            ServiceError::InvalidIdentifier => Self::bad_request("Invalid list ID format"),
            ServiceError::NotFound => Self::new(StatusCode::NOT_FOUND, "List not found", None),
            ServiceError::Store(s) => {
                error!(error = %s, "store operation failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong!", None)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::errors::{StoreError, ValidationError};

    #[test]
    fn maps_service_errors_to_status_codes() {
        let cases = [
            (ServiceError::Validation(ValidationError::Required), StatusCode::BAD_REQUEST),
            (ServiceError::Validation(ValidationError::Invalid), StatusCode::BAD_REQUEST),
            (ServiceError::InvalidIdentifier, StatusCode::BAD_REQUEST),
            (ServiceError::NotFound, StatusCode::NOT_FOUND),
            (ServiceError::Store(StoreError("connection refused".into())), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }

    #[test]
    fn store_fault_detail_is_not_echoed_to_clients() {
        let mapped = JsonApiError::from(ServiceError::Store(StoreError(
            "postgres://user:secret@db/listdb unreachable".into(),
        )));
        assert_eq!(mapped.error, "Something went wrong!");
        assert!(mapped.details.is_none());
    }
}
