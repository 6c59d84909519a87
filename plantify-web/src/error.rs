//! Error types for plantify-web
//!
//! Maps core resolution errors and collaborator failures onto HTTP
//! responses. Validation problems come back as 400 with the offending
//! field named in the message; internal prediction failures log their
//! detail and surface a generic retry message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::contacts::ContactError;
use crate::report::ReportError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request field carries a value outside its closed set (400)
    #[error("Invalid value for {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },

    /// Request field is empty or absent (400)
    #[error("Missing value for {field}")]
    MissingField { field: &'static str },

    /// Classifier failed internally (500); detail is logged, not sent
    #[error("Prediction failed. Please check inputs and try again.")]
    Prediction,

    /// Contact save rejected (400)
    #[error("{0}")]
    Contact(ContactError),

    /// Contact store I/O failure (500)
    #[error("Contact store error: {0}")]
    ContactStore(ContactError),

    /// Report rendering failure (500)
    #[error("Report generation error: {0}")]
    Report(#[from] ReportError),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<plantify_core::Error> for ApiError {
    fn from(err: plantify_core::Error) -> Self {
        match err {
            plantify_core::Error::InvalidTrait { field, value } => {
                ApiError::InvalidField { field, value }
            }
            plantify_core::Error::MissingTrait { field } => ApiError::MissingField { field },
            plantify_core::Error::SchemaMismatch { expected, actual } => {
                error!(
                    "Schema mismatch during prediction: expected {} columns, got {}",
                    expected, actual
                );
                ApiError::Prediction
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ContactError> for ApiError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::MissingName | ContactError::MissingDetail => ApiError::Contact(err),
            ContactError::Io(_) | ContactError::Csv(_) => ApiError::ContactStore(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::InvalidField { .. } => {
                (StatusCode::BAD_REQUEST, "INVALID_FIELD", self.to_string())
            }
            ApiError::MissingField { .. } => {
                (StatusCode::BAD_REQUEST, "MISSING_FIELD", self.to_string())
            }
            ApiError::Prediction => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PREDICTION_FAILED",
                self.to_string(),
            ),
            ApiError::Contact(ref err) => {
                (StatusCode::BAD_REQUEST, "INVALID_CONTACT", err.to_string())
            }
            ApiError::ContactStore(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONTACT_STORE_ERROR",
                err.to_string(),
            ),
            ApiError::Report(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "REPORT_ERROR",
                err.to_string(),
            ),
            ApiError::Internal(ref msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_bad_request() {
        let err: ApiError = plantify_core::Error::InvalidTrait {
            field: "petal_number",
            value: "7".to_string(),
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn schema_mismatch_maps_to_generic_prediction_failure() {
        let err: ApiError = plantify_core::Error::SchemaMismatch {
            expected: 31,
            actual: 30,
        }
        .into();
        assert!(matches!(err, ApiError::Prediction));
        // The outward message never leaks column counts.
        assert!(!err.to_string().contains("31"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn contact_validation_maps_to_bad_request() {
        let err: ApiError = ContactError::MissingName.into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
