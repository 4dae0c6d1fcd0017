//! Error types for the recipe service
//!
//! `RecipeError` is the domain taxonomy shared by the repository and its
//! backends. `ApiError` pairs it with an HTTP status picked by the configured
//! [`ErrorMode`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Recipe Error Enum ==
/// Unified error type for recipe operations.
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Malformed request body or identifier
    #[error("{0}")]
    ClientInput(String),

    /// Store or cache backend failure
    #[error("{0}")]
    Internal(String),
}

impl From<mongodb::error::Error> for RecipeError {
    fn from(err: mongodb::error::Error) -> Self {
        RecipeError::Internal(err.to_string())
    }
}

impl From<redis::RedisError> for RecipeError {
    fn from(err: redis::RedisError) -> Self {
        RecipeError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for RecipeError {
    fn from(err: serde_json::Error) -> Self {
        RecipeError::Internal(err.to_string())
    }
}

// == Error Mode ==
/// Selects how strictly client input is policed and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Every failure is a 500 and malformed ids match nothing.
    #[default]
    Compatible,
    /// Client input errors are 400 and malformed ids are rejected.
    Strict,
}

impl ErrorMode {
    /// Maps an error to the status code this mode reports it with.
    pub fn status_for(self, err: &RecipeError) -> StatusCode {
        match (self, err) {
            (ErrorMode::Strict, RecipeError::ClientInput(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Wraps an error into a response-ready `ApiError`.
    pub fn reject(self, err: RecipeError) -> ApiError {
        ApiError {
            status: self.status_for(&err),
            source: err,
        }
    }
}

// == API Error ==
/// A `RecipeError` with the HTTP status it will be rendered with.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub source: RecipeError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.source.to_string()));
        (self.status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for recipe operations.
pub type Result<T> = std::result::Result<T, RecipeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compatible_mode_reports_everything_as_500() {
        let mode = ErrorMode::Compatible;
        assert_eq!(
            mode.status_for(&RecipeError::ClientInput("bad".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            mode.status_for(&RecipeError::Internal("down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_strict_mode_separates_client_errors() {
        let mode = ErrorMode::Strict;
        assert_eq!(
            mode.status_for(&RecipeError::ClientInput("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            mode.status_for(&RecipeError::Internal("down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_message_is_passed_through() {
        let err = RecipeError::Internal("connection refused".into());
        assert_eq!(err.to_string(), "connection refused");
    }
}
