//! # Filter Values
//!
//! The closed set of value types a filter can carry. Raw JSON values are
//! converted into `FilterValue` exactly once, at predicate construction,
//! by [`coerce`]; date-looking strings are upgraded to calendar dates or
//! timezone-aware date-times at that point and never re-parsed.

mod coerce;

pub use coerce::{coerce, is_date, is_datetime};
pub(crate) use coerce::{parse_date, parse_datetime};

use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

use chrono::{DateTime, FixedOffset, NaiveDate};

/// A coerced filter value.
///
/// JSON scalars map structurally (`Int`/`Float`/`Text`/`Bool`/`Null`),
/// arrays map to `List`, and strings matching the ISO-8601 patterns are
/// upgraded to `Date` or `DateTime`.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// JSON null
    Null,
    /// JSON boolean
    Bool(bool),
    /// JSON integer
    Int(i64),
    /// JSON non-integer number
    Float(f64),
    /// Plain string (did not match a temporal pattern)
    Text(String),
    /// Calendar date coerced from a strict zero-padded `YYYY-MM-DD`
    Date(NaiveDate),
    /// Timezone-aware instant coerced from extended ISO-8601
    DateTime(DateTime<FixedOffset>),
    /// Ordered sequence of scalars (membership tests)
    List(Vec<FilterValue>),
}

impl FilterValue {
    /// Human-readable type name used in validation messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FilterValue::Null => "null",
            FilterValue::Bool(_) => "boolean",
            FilterValue::Int(_) => "integer",
            FilterValue::Float(_) => "float",
            FilterValue::Text(_) => "string",
            FilterValue::Date(_) => "date",
            FilterValue::DateTime(_) => "date-time",
            FilterValue::List(_) => "sequence",
        }
    }

    /// True for value types with a total order usable by relative
    /// comparators: numbers, dates, and date-times.
    pub fn is_ordinal(&self) -> bool {
        matches!(
            self,
            FilterValue::Int(_)
                | FilterValue::Float(_)
                | FilterValue::Date(_)
                | FilterValue::DateTime(_)
        )
    }

    /// True for non-sequence values
    pub fn is_scalar(&self) -> bool {
        !matches!(self, FilterValue::List(_))
    }
}

impl Hash for FilterValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            FilterValue::Null => {}
            FilterValue::Bool(b) => b.hash(state),
            FilterValue::Int(i) => i.hash(state),
            // Floats hash by bit pattern; equal floats share bits
            FilterValue::Float(f) => f.to_bits().hash(state),
            FilterValue::Text(s) => s.hash(state),
            FilterValue::Date(d) => d.hash(state),
            // Equality on DateTime compares instants, so hash the instant
            FilterValue::DateTime(dt) => {
                dt.timestamp().hash(state);
                dt.timestamp_subsec_nanos().hash(state);
            }
            FilterValue::List(items) => items.hash(state),
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Null => write!(f, "null"),
            FilterValue::Bool(b) => write!(f, "{}", b),
            FilterValue::Int(i) => write!(f, "{}", i),
            FilterValue::Float(x) => write!(f, "{}", x),
            FilterValue::Text(s) => write!(f, "'{}'", s),
            FilterValue::Date(d) => write!(f, "{}", d),
            FilterValue::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            FilterValue::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Int(v)
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        FilterValue::Float(v)
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        FilterValue::Bool(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Text(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Text(v)
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(v: NaiveDate) -> Self {
        FilterValue::Date(v)
    }
}
