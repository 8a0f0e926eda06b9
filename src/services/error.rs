//! Service-level error type.

use crate::storage::StorageError;

/// Errors returned by the ingest and query services.
///
/// Each variant maps to one HTTP status and a fixed JSON error body; the
/// Display strings are part of the wire contract.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request body was absent, unparseable, or not a JSON object.
    #[error("no data")]
    MalformedInput,

    /// A required request parameter was absent.
    #[error("{0} required")]
    MissingParameter(&'static str),

    /// A parameter was present but failed validation.
    #[error("{0}")]
    InvalidParameter(String),

    /// The record store failed while serving the request.
    #[error("database error")]
    StorageUnavailable(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_match_wire_contract() {
        assert_eq!(ApiError::MalformedInput.to_string(), "no data");
        assert_eq!(
            ApiError::MissingParameter("user_id").to_string(),
            "user_id required"
        );
        assert_eq!(
            ApiError::InvalidParameter("limit must be a positive integer".to_string()).to_string(),
            "limit must be a positive integer"
        );
        assert_eq!(
            ApiError::StorageUnavailable(StorageError::Unavailable("down".to_string()))
                .to_string(),
            "database error"
        );
    }
}
