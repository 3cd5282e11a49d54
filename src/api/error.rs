//! Mapping of crate errors onto HTTP responses.

use crate::error::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Human-readable description of the failure.
    pub error: String,
}

/// An error returned from a request handler.
#[derive(Debug)]
pub enum ApiError {
    /// The query string could not be parsed.
    InvalidQuery,
    /// Any error raised by the domain or storage layers.
    Core(Error),
}

impl ApiError {
    /// The HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidQuery => StatusCode::BAD_REQUEST,
            Self::Core(err) if err.is_validation() => StatusCode::BAD_REQUEST,
            Self::Core(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            Self::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::InvalidQuery => "invalid query".to_string(),
            Self::Core(Error::Json(_)) => "invalid json".to_string(),
            Self::Core(err) => err.to_string(),
        }
    }
}

impl<E> From<E> for ApiError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        Self::Core(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self.message());
        }
        (status, Json(ErrorBody { error: self.message() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::{EmptyContent, InvalidReviewResult, TaskNotFound};

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::InvalidQuery.status(), StatusCode::BAD_REQUEST);
        let bad_json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(ApiError::from(bad_json).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(EmptyContent).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(InvalidReviewResult("x".to_string())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::from(TaskNotFound("x".to_string())).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(Error::Config("x".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::InvalidQuery.message(), "invalid query");
        let bad_json = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        assert_eq!(ApiError::from(bad_json).message(), "invalid json");
        assert_eq!(ApiError::from(EmptyContent).message(), "question and answer are required");
    }
}
