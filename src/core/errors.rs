use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::fmt;

/// Typed failure of a store operation. Every fallible operation reports one
/// of these synchronously; the store has no transient failure modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Referenced entity id does not exist.
    NotFound(String),
    /// The operation would violate a uniqueness or state invariant.
    Conflict(String),
    /// Input violates a declared constraint (length, self-follow, blank name).
    Validation(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            StoreError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            StoreError::Validation(msg) => write!(f, "Bad Request: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl ResponseError for StoreError {
    fn status_code(&self) -> StatusCode {
        match self {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Conflict(_) => StatusCode::CONFLICT,
            StoreError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let msg = match self {
            StoreError::NotFound(msg)
            | StoreError::Conflict(msg)
            | StoreError::Validation(msg) => msg,
        };
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": msg }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_error_kinds() {
        assert_eq!(
            StoreError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            StoreError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            StoreError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
