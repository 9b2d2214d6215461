//! # Filter Errors
//!
//! Validation failures raised while deserializing descriptors and
//! constructing predicates. All of these surface synchronously, before
//! any constraint touches a data source.

use thiserror::Error;

/// Result type for filter validation and construction
pub type FilterResult<T> = Result<T, FilterError>;

/// Filter validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// Descriptor is not `{field, op, value}` shaped
    #[error("invalid filter descriptor: {0}")]
    InvalidDescriptor(String),

    /// `op` is not a registered operator symbol
    #[error("operator {0} is not supported")]
    UnsupportedOperator(String),

    /// Value's runtime type is outside the operator's allowed set
    #[error("operator `{op}` does not accept {found} values (expected {expected})")]
    TypeMismatch {
        op: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// A mapping was supplied but has no entry for the field
    #[error("'{0}' is not a valid field")]
    UnknownField(String),

    /// String matched the date pattern but is not a real calendar date
    #[error("invalid calendar date: {0}")]
    InvalidDate(String),

    /// String matched the date-time pattern but could not be parsed
    #[error("invalid date-time: {0}")]
    InvalidDateTime(String),

    /// Raw value kind with no filter representation (e.g. a JSON object)
    #[error("unsupported value type: {0}")]
    UnsupportedValue(String),
}
