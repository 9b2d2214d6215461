//! # Filter subsystem
//!
//! The core of the crate: the operator registry, per-operator value
//! validation, and the translation of validated predicates into query
//! constraints.
//!
//! Descriptors flow through [`FilterDeserializer`] (shape validation,
//! operator lookup, value coercion, construction) into [`Filter`] values,
//! which the query compiler folds onto a queryable.

mod ast;
mod deserializer;
mod errors;
mod registry;

pub use ast::{Filter, FilterOp, DEFAULT_NESTED_FIELD};
pub use deserializer::FilterDeserializer;
pub use errors::{FilterError, FilterResult};
pub use registry::{FilterCtor, OperatorRegistry};
