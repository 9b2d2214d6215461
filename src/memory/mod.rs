//! # In-Memory Queryable
//!
//! A reference [`Queryable`] over `serde_json` rows. Constraints are
//! evaluated strictly: a missing or null field matches nothing except an
//! explicit null equality, comparisons require comparable types, and
//! stored date/date-time strings compare as temporal values against
//! coerced filter values.

use std::cmp::Ordering;
use std::convert::Infallible;

use serde_json::Value;

use crate::query::{ColumnRef, Comparison, Constraint, Queryable};
use crate::value::{is_date, is_datetime, parse_date, parse_datetime, FilterValue};

/// A table of JSON rows
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    rows: Vec<Value>,
}

impl MemoryTable {
    pub fn new(rows: Vec<Value>) -> Self {
        Self { rows }
    }

    /// The unconstrained queryable over all rows
    pub fn query(&self) -> MemoryQuery {
        MemoryQuery {
            rows: self.rows.clone(),
            constraints: Vec::new(),
            order: None,
            limit: None,
        }
    }
}

/// Immutable query builder over a [`MemoryTable`] snapshot
#[derive(Debug, Clone)]
pub struct MemoryQuery {
    rows: Vec<Value>,
    constraints: Vec<Constraint>,
    order: Option<ColumnRef>,
    limit: Option<usize>,
}

impl Queryable for MemoryQuery {
    type Record = Value;
    type Error = Infallible;

    fn filter(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    fn order_by(mut self, column: ColumnRef) -> Self {
        self.order = Some(column);
        self
    }

    fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    fn all(self) -> Result<Vec<Value>, Infallible> {
        let Self {
            rows,
            constraints,
            order,
            limit,
        } = self;
        let mut out: Vec<Value> = rows
            .into_iter()
            .filter(|row| constraints.iter().all(|c| matches_constraint(row, c)))
            .collect();
        if let Some(column) = order {
            // Missing and null values order last
            out.sort_by(|a, b| compare_rows(a, b, column.name()));
        }
        if let Some(n) = limit {
            out.truncate(n);
        }
        Ok(out)
    }
}

fn matches_constraint(row: &Value, constraint: &Constraint) -> bool {
    match constraint {
        Constraint::Compare { column, cmp, value } => {
            let Some(actual) = present(row, column) else {
                return false;
            };
            match compare_value(actual, value) {
                Some(ord) => match cmp {
                    Comparison::Lt => ord == Ordering::Less,
                    Comparison::Lte => ord != Ordering::Greater,
                    Comparison::Gt => ord == Ordering::Greater,
                    Comparison::Gte => ord != Ordering::Less,
                },
                None => false,
            }
        }
        Constraint::Eq { column, value } => match present(row, column) {
            Some(actual) => values_equal(actual, value),
            // col = null means "is null"; an absent field counts
            None => matches!(value, FilterValue::Null),
        },
        Constraint::Ne { column, value } => match (present(row, column), value) {
            // col != null means "is not null"
            (Some(_), FilterValue::Null) => true,
            (None, FilterValue::Null) => false,
            (Some(actual), other) => !values_equal(actual, other),
            // Null field values never satisfy a non-null inequality
            (None, _) => false,
        },
        Constraint::In { column, values } => match present(row, column) {
            Some(actual) => values.iter().any(|v| values_equal(actual, v)),
            None => false,
        },
        Constraint::Like { column, pattern } => match present(row, column) {
            Some(Value::String(s)) => like_match(s, pattern),
            _ => false,
        },
        Constraint::Exists {
            relation,
            nested_column,
            value,
        } => match row.get(relation) {
            Some(Value::Array(related)) => related.iter().any(|record| {
                record
                    .get(nested_column)
                    .is_some_and(|nested| values_equal(nested, value))
            }),
            _ => false,
        },
    }
}

/// Field value if present and non-null
fn present<'a>(row: &'a Value, column: &str) -> Option<&'a Value> {
    row.get(column).filter(|v| !v.is_null())
}

/// Equality between a stored JSON value and a coerced filter value.
///
/// Stored temporal strings are parsed so `"1990-12-16"` equals the
/// coerced date 1990-12-16; everything else compares structurally, with
/// no cross-type coercion.
fn values_equal(actual: &Value, expected: &FilterValue) -> bool {
    match (actual, expected) {
        (Value::Null, FilterValue::Null) => true,
        (Value::Bool(a), FilterValue::Bool(b)) => a == b,
        (Value::Number(a), FilterValue::Int(b)) => {
            a.as_i64() == Some(*b) || a.as_f64() == Some(*b as f64)
        }
        (Value::Number(a), FilterValue::Float(b)) => a.as_f64() == Some(*b),
        (Value::String(a), FilterValue::Text(b)) => a == b,
        (Value::String(a), FilterValue::Date(b)) => {
            is_date(a) && parse_date(a).map(|d| d == *b).unwrap_or(false)
        }
        (Value::String(a), FilterValue::DateTime(b)) => {
            is_datetime(a) && parse_datetime(a).map(|dt| dt == *b).unwrap_or(false)
        }
        _ => false,
    }
}

/// Ordering between a stored JSON value and a coerced filter value;
/// `None` when the pair is not comparable.
fn compare_value(actual: &Value, bound: &FilterValue) -> Option<Ordering> {
    match (actual, bound) {
        (Value::Number(a), FilterValue::Int(b)) => {
            if let (Some(ai), bi) = (a.as_i64(), *b) {
                return Some(ai.cmp(&bi));
            }
            a.as_f64().and_then(|af| af.partial_cmp(&(*b as f64)))
        }
        (Value::Number(a), FilterValue::Float(b)) => {
            a.as_f64().and_then(|af| af.partial_cmp(b))
        }
        (Value::String(a), FilterValue::Text(b)) => Some(a.as_str().cmp(b.as_str())),
        (Value::String(a), FilterValue::Date(b)) => {
            if !is_date(a) {
                return None;
            }
            parse_date(a).ok().map(|d| d.cmp(b))
        }
        (Value::String(a), FilterValue::DateTime(b)) => {
            if !is_datetime(a) {
                return None;
            }
            parse_datetime(a).ok().map(|dt| dt.cmp(b))
        }
        _ => None,
    }
}

/// Row ordering for `order_by`: comparable values ascending, missing and
/// null values last.
fn compare_rows(a: &Value, b: &Value, column: &str) -> Ordering {
    match (present(a, column), present(b, column)) {
        (Some(x), Some(y)) => compare_json(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_json(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            match (x.as_f64(), y.as_f64()) {
                (Some(xf), Some(yf)) => xf.partial_cmp(&yf).unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            }
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// SQL LIKE matching: `%` is any sequence, `_` exactly one character.
fn like_match(value: &str, pattern: &str) -> bool {
    let value: Vec<char> = value.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    like_rec(&value, &pattern)
}

fn like_rec(value: &[char], pattern: &[char]) -> bool {
    match pattern.split_first() {
        None => value.is_empty(),
        Some((&'%', rest)) => {
            if rest.is_empty() {
                return true;
            }
            (0..=value.len()).any(|i| like_rec(&value[i..], rest))
        }
        Some((&'_', rest)) => !value.is_empty() && like_rec(&value[1..], rest),
        Some((c, rest)) => value.first() == Some(c) && like_rec(&value[1..], rest),
    }
}
