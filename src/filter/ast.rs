//! # Filter AST
//!
//! Typed, validated predicates, one [`FilterOp`] variant per operator.
//! Every variant enforces its allowed-value-type policy at construction;
//! an invalid field/operator/value combination never becomes a `Filter`,
//! so compilation onto a queryable cannot fail on types.

use crate::field::{FieldMapping, FieldPath};
use crate::query::{Comparison, Constraint, Queryable};
use crate::value::FilterValue;

use super::errors::{FilterError, FilterResult};

/// Nested key compared by `contains` when the path has no second segment
pub const DEFAULT_NESTED_FIELD: &str = "id";

/// A single validated filter condition.
///
/// Identity (equality and hashing) is the (field, operator, value) triple.
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct Filter {
    /// Field reference; the nested segment is used only by `Contains`
    pub field: FieldPath,
    /// Operator with its coerced value
    pub op: FilterOp,
}

/// Operator variants with their coerced values
#[derive(Debug, Clone, PartialEq, Hash)]
pub enum FilterOp {
    /// `<` — number, date, or date-time
    Lt(FilterValue),
    /// `<=` — number, date, or date-time
    Lte(FilterValue),
    /// `=` — string, integer, date, or null
    Eq(FilterValue),
    /// `>` — number, date, or date-time
    Gt(FilterValue),
    /// `>=` — number, date, or date-time
    Gte(FilterValue),
    /// `in` — sequence of scalars; a bare string is wrapped first
    In(Vec<FilterValue>),
    /// `!=` — string, integer, date, or null
    Ne(FilterValue),
    /// `like` — SQL-style wildcard pattern, passed through verbatim
    Like(String),
    /// `contains` — relationship existence; deliberately unvalidated,
    /// any value may be compared against the nested key
    Contains(FilterValue),
}

const ORDINAL_TYPES: &str = "number, date, or date-time";
const EQUALITY_TYPES: &str = "string, integer, date, or null";

impl Filter {
    /// `<`
    pub fn lt(field: FieldPath, value: FilterValue) -> FilterResult<Self> {
        Self::ordinal(field, value, "<", FilterOp::Lt)
    }

    /// `<=`
    pub fn lte(field: FieldPath, value: FilterValue) -> FilterResult<Self> {
        Self::ordinal(field, value, "<=", FilterOp::Lte)
    }

    /// `=`
    pub fn eq(field: FieldPath, value: FilterValue) -> FilterResult<Self> {
        Self::equality(field, value, "=", FilterOp::Eq)
    }

    /// `>`
    pub fn gt(field: FieldPath, value: FilterValue) -> FilterResult<Self> {
        Self::ordinal(field, value, ">", FilterOp::Gt)
    }

    /// `>=`
    pub fn gte(field: FieldPath, value: FilterValue) -> FilterResult<Self> {
        Self::ordinal(field, value, ">=", FilterOp::Gte)
    }

    /// `in` — a bare string becomes a one-element sequence before
    /// validation; everything else must already be a sequence of scalars
    pub fn is_in(field: FieldPath, value: FilterValue) -> FilterResult<Self> {
        let items = match value {
            FilterValue::Text(s) => vec![FilterValue::Text(s)],
            FilterValue::List(items) => {
                if let Some(nested) = items.iter().find(|item| !item.is_scalar()) {
                    return Err(FilterError::TypeMismatch {
                        op: "in",
                        expected: "sequence of scalars",
                        found: nested.type_name(),
                    });
                }
                items
            }
            other => {
                return Err(FilterError::TypeMismatch {
                    op: "in",
                    expected: "sequence of scalars",
                    found: other.type_name(),
                })
            }
        };
        Ok(Self {
            field,
            op: FilterOp::In(items),
        })
    }

    /// `!=`
    pub fn ne(field: FieldPath, value: FilterValue) -> FilterResult<Self> {
        Self::equality(field, value, "!=", FilterOp::Ne)
    }

    /// `like`
    pub fn like(field: FieldPath, value: FilterValue) -> FilterResult<Self> {
        match value {
            FilterValue::Text(pattern) => Ok(Self {
                field,
                op: FilterOp::Like(pattern),
            }),
            other => Err(FilterError::TypeMismatch {
                op: "like",
                expected: "string",
                found: other.type_name(),
            }),
        }
    }

    /// `contains` — always valid; relationship-existence checks accept
    /// any value for comparison against the nested key
    pub fn contains(field: FieldPath, value: FilterValue) -> FilterResult<Self> {
        Ok(Self {
            field,
            op: FilterOp::Contains(value),
        })
    }

    fn ordinal(
        field: FieldPath,
        value: FilterValue,
        symbol: &'static str,
        build: fn(FilterValue) -> FilterOp,
    ) -> FilterResult<Self> {
        if value.is_ordinal() {
            Ok(Self {
                field,
                op: build(value),
            })
        } else {
            Err(FilterError::TypeMismatch {
                op: symbol,
                expected: ORDINAL_TYPES,
                found: value.type_name(),
            })
        }
    }

    fn equality(
        field: FieldPath,
        value: FilterValue,
        symbol: &'static str,
        build: fn(FilterValue) -> FilterOp,
    ) -> FilterResult<Self> {
        match value {
            FilterValue::Text(_)
            | FilterValue::Int(_)
            | FilterValue::Date(_)
            | FilterValue::Null => Ok(Self {
                field,
                op: build(value),
            }),
            other => Err(FilterError::TypeMismatch {
                op: symbol,
                expected: EQUALITY_TYPES,
                found: other.type_name(),
            }),
        }
    }

    /// The operator symbol this filter was constructed from
    pub fn op_symbol(&self) -> &'static str {
        match self.op {
            FilterOp::Lt(_) => "<",
            FilterOp::Lte(_) => "<=",
            FilterOp::Eq(_) => "=",
            FilterOp::Gt(_) => ">",
            FilterOp::Gte(_) => ">=",
            FilterOp::In(_) => "in",
            FilterOp::Ne(_) => "!=",
            FilterOp::Like(_) => "like",
            FilterOp::Contains(_) => "contains",
        }
    }

    /// Compile into a column-level constraint, resolving the base field
    /// through the optional mapping.
    pub fn compile(&self, mapping: Option<&dyn FieldMapping>) -> FilterResult<Constraint> {
        let column = self.field.resolve_column(mapping)?;
        let constraint = match &self.op {
            FilterOp::Lt(value) => Constraint::Compare {
                column,
                cmp: Comparison::Lt,
                value: value.clone(),
            },
            FilterOp::Lte(value) => Constraint::Compare {
                column,
                cmp: Comparison::Lte,
                value: value.clone(),
            },
            FilterOp::Gt(value) => Constraint::Compare {
                column,
                cmp: Comparison::Gt,
                value: value.clone(),
            },
            FilterOp::Gte(value) => Constraint::Compare {
                column,
                cmp: Comparison::Gte,
                value: value.clone(),
            },
            FilterOp::Eq(value) => Constraint::Eq {
                column,
                value: value.clone(),
            },
            FilterOp::Ne(value) => Constraint::Ne {
                column,
                value: value.clone(),
            },
            FilterOp::In(values) => Constraint::In {
                column,
                values: values.clone(),
            },
            FilterOp::Like(pattern) => Constraint::Like {
                column,
                pattern: pattern.clone(),
            },
            FilterOp::Contains(value) => Constraint::Exists {
                relation: column,
                nested_column: self
                    .field
                    .nested
                    .clone()
                    .unwrap_or_else(|| DEFAULT_NESTED_FIELD.to_string()),
                value: value.clone(),
            },
        };
        Ok(constraint)
    }

    /// Apply onto a queryable, returning a new queryable with the
    /// compiled constraint added.
    pub fn apply<Q: Queryable>(
        &self,
        query: Q,
        mapping: Option<&dyn FieldMapping>,
    ) -> FilterResult<Q> {
        Ok(query.filter(self.compile(mapping)?))
    }
}
