//! # Query subsystem
//!
//! The consumed [`Queryable`] capability, the compiled [`Constraint`]
//! form, and the compiler that folds filter sequences onto queryables.

mod compiler;
mod errors;
mod queryable;

pub use compiler::{apply_filters, query_with_filters};
pub(crate) use compiler::order_and_limit;
pub use errors::{QueryError, QueryResult};
pub use queryable::{ColumnRef, Comparison, Constraint, OrderRef, Queryable};
