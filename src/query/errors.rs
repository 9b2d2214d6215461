//! # Query Errors
//!
//! Failures surfaced by the search entry points. Validation failures come
//! through unchanged from the filter subsystem; configuration failures
//! (no field mapping available) are raised before any data-store access;
//! data-store failures pass through as-is.

use thiserror::Error;

use crate::filter::FilterError;

/// Result type for query compilation and execution
pub type QueryResult<T> = Result<T, QueryError>;

/// Query compilation and execution errors
#[derive(Debug, Error)]
pub enum QueryError {
    /// Malformed descriptor, unknown operator, or predicate validation
    /// failure
    #[error(transparent)]
    Validation(#[from] FilterError),

    /// No field mapping registered for the model and none supplied
    #[error(
        "no schema registered for model `{model}`; register one with \
         `register_model` or pass a mapping to `search`"
    )]
    NoSchema { model: &'static str },

    /// Data-store execution failure, passed through unchanged
    #[error(transparent)]
    Execution(Box<dyn std::error::Error + Send + Sync>),
}

impl QueryError {
    /// True for failures of the descriptor/predicate validation kind
    pub fn is_validation(&self) -> bool {
        matches!(self, QueryError::Validation(_))
    }
}
