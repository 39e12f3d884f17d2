//! Error types for table transformations.

use thiserror::Error;

/// Errors raised while transforming record tables.
///
/// Malformed cells never produce an error; they are absorbed as absent
/// values. Only failures of the underlying DataFrame operations surface here.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
