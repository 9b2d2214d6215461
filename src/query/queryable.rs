//! # Queryable Capability
//!
//! The abstract, immutable query-builder interface this crate compiles
//! filters onto, plus the compiled [`Constraint`] form itself. Backends
//! (an ORM adapter, the in-memory store) implement [`Queryable`];
//! constraints accumulate by composition, never mutation.

use std::fmt;

use crate::value::FilterValue;

/// Direction of a relative comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Lt,
    Lte,
    Gt,
    Gte,
}

impl Comparison {
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::Lt => "<",
            Comparison::Lte => "<=",
            Comparison::Gt => ">",
            Comparison::Gte => ">=",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A compiled predicate: one column-level constraint a queryable applies
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// `column <cmp> value`
    Compare {
        column: String,
        cmp: Comparison,
        value: FilterValue,
    },
    /// `column = value` (null value means "is null")
    Eq { column: String, value: FilterValue },
    /// `column != value` (null value means "is not null")
    Ne { column: String, value: FilterValue },
    /// `column` is a member of `values`
    In {
        column: String,
        values: Vec<FilterValue>,
    },
    /// SQL-style wildcard match; `%` and `_` pass through verbatim
    Like { column: String, pattern: String },
    /// At least one related record where `nested_column == value`
    Exists {
        relation: String,
        nested_column: String,
        value: FilterValue,
    },
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Compare { column, cmp, value } => {
                write!(f, "{} {} {}", column, cmp, value)
            }
            Constraint::Eq { column, value } => write!(f, "{} = {}", column, value),
            Constraint::Ne { column, value } => write!(f, "{} != {}", column, value),
            Constraint::In { column, values } => {
                write!(f, "{} in {}", column, FilterValue::List(values.clone()))
            }
            Constraint::Like { column, pattern } => {
                write!(f, "{} like '{}'", column, pattern)
            }
            Constraint::Exists {
                relation,
                nested_column,
                value,
            } => write!(f, "exists {} where {} = {}", relation, nested_column, value),
        }
    }
}

/// Physical column reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef(String);

impl ColumnRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ColumnRef {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Ordering key: either an explicit column reference or a bare column
/// name. Both order identically for the same column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderRef {
    Name(String),
    Column(ColumnRef),
}

impl OrderRef {
    /// Collapse into the column reference the queryable orders by
    pub fn into_column(self) -> ColumnRef {
        match self {
            OrderRef::Name(name) => ColumnRef::new(name),
            OrderRef::Column(column) => column,
        }
    }
}

impl From<&str> for OrderRef {
    fn from(name: &str) -> Self {
        OrderRef::Name(name.to_string())
    }
}

impl From<String> for OrderRef {
    fn from(name: String) -> Self {
        OrderRef::Name(name)
    }
}

impl From<ColumnRef> for OrderRef {
    fn from(column: ColumnRef) -> Self {
        OrderRef::Column(column)
    }
}

/// An immutable query builder over some record store.
///
/// Each call returns a new queryable with the clause added; `all`
/// executes the accumulated query and materializes the results.
pub trait Queryable: Sized {
    /// Materialized record type
    type Record;
    /// Data-store execution error, surfaced to the caller unchanged
    type Error: std::error::Error + Send + Sync + 'static;

    /// Add a constraint (conjunction with any already present)
    fn filter(self, constraint: Constraint) -> Self;

    /// Append an ascending ordering clause
    fn order_by(self, column: ColumnRef) -> Self;

    /// Cap the number of returned records
    fn limit(self, n: usize) -> Self;

    /// Execute and return the matching records
    fn all(self) -> Result<Vec<Self::Record>, Self::Error>;
}
