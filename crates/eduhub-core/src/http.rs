//! HTTP status mapping for [`AppError`].

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP status and error code for an error kind.
pub fn status_and_code(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
        ErrorKind::TokenInvalid => (StatusCode::UNAUTHORIZED, "TOKEN_INVALID"),
        ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::StoreUnavailable => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_UNAVAILABLE"),
        ErrorKind::Configuration => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR"),
        ErrorKind::Serialization | ErrorKind::Internal => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code) = status_and_code(self.kind);

        if status.is_server_error() {
            tracing::error!(code = error_code, error = %self, "Request failed");
        }

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: self.message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failures_are_all_401_with_distinct_codes() {
        let kinds = [
            ErrorKind::InvalidCredentials,
            ErrorKind::TokenInvalid,
            ErrorKind::Unauthorized,
        ];
        let mut codes = Vec::new();
        for kind in kinds {
            let (status, code) = status_and_code(kind);
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            codes.push(code);
        }
        codes.dedup();
        assert_eq!(codes.len(), 3);
    }

    #[test]
    fn test_store_failures_are_server_errors() {
        let (status, code) = status_and_code(ErrorKind::StoreUnavailable);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "STORE_UNAVAILABLE");
        assert_eq!(
            status_and_code(ErrorKind::Validation).0,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_error_response_body_carries_code_and_message() {
        let response = AppError::unauthorized("Role 'Teacher' is not permitted").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ApiErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "UNAUTHORIZED");
        assert_eq!(body.message, "Role 'Teacher' is not permitted");
    }
}
