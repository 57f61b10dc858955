//! Query error types.

use dataset_core::SchemaError;
use thiserror::Error;

/// Errors returned by the query engine.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The request is malformed, e.g. empty sql text
    #[error("Invalid payload: {0}")]
    InvalidInput(String),

    /// The backend reported a failure
    #[error("{0}")]
    Backend(String),

    /// The caller abandoned the request
    #[error("Query cancelled")]
    Cancelled,

    /// The engine could not finish the computation
    #[error("Internal error: {0}")]
    Internal(String),

    /// The dataset catalog failed validation
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
}

impl QueryError {
    /// Whether the caller abandoned the request. Cancelled queries should not
    /// be reported as failures.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Whether the failure is the caller's fault (4xx) rather than the
    /// engine's (5xx).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;
