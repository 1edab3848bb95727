//! Error types surfaced by the engine boundary.
use thiserror::Error;

/// A submitted answer could not be interpreted as a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    #[error("answer is empty")]
    Empty,
    #[error("answer `{0}` is not a number")]
    NotANumber(String),
}

/// Raised by the strict operation parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operation `{0}`")]
pub struct ParseOperationError(pub String);

/// Raised by the strict difficulty label parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty category `{0}`")]
pub struct ParseCategoryError(pub String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("answer tolerance must be finite and positive, got {0}")]
    InvalidTolerance(f64),
}
