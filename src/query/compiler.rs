//! # Query Compilation
//!
//! Folds a validated filter sequence onto a queryable in input order,
//! then applies optional ordering and a result cap. Any validation or
//! resolution failure aborts before the data store is touched.

use serde_json::Value;

use crate::field::FieldMapping;
use crate::filter::{Filter, FilterDeserializer, FilterResult};

use super::errors::{QueryError, QueryResult};
use super::queryable::{OrderRef, Queryable};

/// Fold filters onto a queryable, one constraint per filter, in order.
pub fn apply_filters<Q: Queryable>(
    query: Q,
    filters: &[Filter],
    mapping: Option<&dyn FieldMapping>,
) -> FilterResult<Q> {
    filters
        .iter()
        .try_fold(query, |query, filter| filter.apply(query, mapping))
}

/// One-shot entry point: deserialize raw descriptors, fold them onto the
/// queryable, and execute.
///
/// With no mapping, logical field names are used as column names
/// verbatim. Callers wanting registry-backed mapping lookup use
/// [`FilterEngine::search`](crate::engine::FilterEngine::search) instead.
pub fn query_with_filters<Q: Queryable>(
    query: Q,
    raw_filters: &Value,
    mapping: Option<&dyn FieldMapping>,
) -> QueryResult<Vec<Q::Record>> {
    let filters = FilterDeserializer::new().deserialize(raw_filters)?;
    let query = apply_filters(query, &filters, mapping)?;
    query
        .all()
        .map_err(|e| QueryError::Execution(Box::new(e)))
}

/// Append ordering and limit clauses when requested.
pub(crate) fn order_and_limit<Q: Queryable>(
    mut query: Q,
    order_by: Option<OrderRef>,
    limit: Option<usize>,
) -> Q {
    if let Some(order) = order_by {
        query = query.order_by(order.into_column());
    }
    if let Some(n) = limit {
        query = query.limit(n);
    }
    query
}
