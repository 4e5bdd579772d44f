use thiserror::Error;

/// Rejected request payload. Detected before any store call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("List field is required in the request body")]
    Required,
    #[error("List field must be a string of at most 200 characters")]
    Invalid,
}

/// Connectivity or driver fault in the underlying datastore. The message is
/// logged server-side only; HTTP clients get a generic envelope.
#[derive(Debug, Error)]
#[error("store error: {0}")]
pub struct StoreError(pub String);

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("Invalid list ID format")]
    InvalidIdentifier,
    #[error("List not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}
