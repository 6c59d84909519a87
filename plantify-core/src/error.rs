//! Common error types for the classification core

use thiserror::Error;

/// Common result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by catalog loading, validation, and resolution
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An input field carries a value outside its closed enumeration
    #[error("invalid value for {field}: {value:?}")]
    InvalidTrait { field: &'static str, value: String },

    /// A required input field is empty
    #[error("missing value for {field}")]
    MissingTrait { field: &'static str },

    /// Encoded feature vector does not match the trained schema width.
    /// Indicates the catalog changed shape after the model was trained.
    #[error("feature vector has {actual} columns, trained schema expects {expected}")]
    SchemaMismatch { expected: usize, actual: usize },

    /// The embedded catalog asset is malformed or inconsistent
    #[error("catalog asset error: {0}")]
    Catalog(String),

    /// Model construction from catalog data failed
    #[error("model training error: {0}")]
    Training(String),
}

impl Error {
    /// Field name for validation errors, None otherwise
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Error::InvalidTrait { field, .. } | Error::MissingTrait { field } => Some(field),
            _ => None,
        }
    }

    /// True for user-input validation errors (reject the request)
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::InvalidTrait { .. } | Error::MissingTrait { .. })
    }

    /// True for internal schema inconsistencies (surface a generic retry)
    pub fn is_prediction_failure(&self) -> bool {
        matches!(self, Error::SchemaMismatch { .. })
    }
}
