//! # Filter Engine
//!
//! The host-facing entry point: owns the model → field-mapping registry
//! and the filter deserializer, and runs the full search sequence
//! (deserialize, resolve mapping, fold constraints, order, limit,
//! execute).
//!
//! The registry is an explicit object the host constructs and passes
//! around, not ambient process state; registration is a configuration-time
//! operation performed before concurrent reads begin.

use std::any::{type_name, TypeId};
use std::collections::HashMap;

use serde_json::Value;

use crate::field::FieldMapping;
use crate::filter::{FilterDeserializer, OperatorRegistry};
use crate::query::{apply_filters, order_and_limit, OrderRef, QueryError, QueryResult, Queryable};

/// Declarative filter engine with a per-model schema registry.
///
/// Models are identified by a marker type: `register_model::<Dog>(...)`
/// stores the mapping consulted by `search::<Dog, _>(...)` whenever the
/// caller does not pass one explicitly.
#[derive(Default)]
pub struct FilterEngine {
    deserializer: FilterDeserializer,
    schemas: HashMap<TypeId, Box<dyn FieldMapping + Send + Sync>>,
}

impl FilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine over a caller-extended operator registry
    pub fn with_operators(registry: OperatorRegistry) -> Self {
        Self {
            deserializer: FilterDeserializer::with_registry(registry),
            schemas: HashMap::new(),
        }
    }

    /// Register the field mapping for a model type. Registering the same
    /// model again replaces the previous mapping.
    pub fn register_model<M: 'static>(
        &mut self,
        mapping: impl FieldMapping + Send + Sync + 'static,
    ) {
        self.schemas.insert(TypeId::of::<M>(), Box::new(mapping));
    }

    /// Look up the registered mapping for a model type
    pub fn lookup_model<M: 'static>(&self) -> Option<&(dyn FieldMapping + Send + Sync)> {
        self.schemas.get(&TypeId::of::<M>()).map(Box::as_ref)
    }

    /// Mutable access to the operator table, for registering extensions
    pub fn operators_mut(&mut self) -> &mut OperatorRegistry {
        self.deserializer.registry_mut()
    }

    /// Deserialize, compile, and execute a filtered search.
    ///
    /// The mapping argument wins over the registry; with neither, the
    /// search fails with a configuration error before touching the data
    /// source. Ordering and the result cap are applied after all filter
    /// constraints, in that order.
    pub fn search<M, Q>(
        &self,
        query: Q,
        raw_filters: &Value,
        mapping: Option<&dyn FieldMapping>,
        order_by: Option<OrderRef>,
        limit: Option<usize>,
    ) -> QueryResult<Vec<Q::Record>>
    where
        M: 'static,
        Q: Queryable,
    {
        let filters = self.deserializer.deserialize(raw_filters)?;
        let resolved: &dyn FieldMapping = match mapping {
            Some(m) => m,
            None => match self.lookup_model::<M>() {
                Some(m) => m,
                None => {
                    return Err(QueryError::NoSchema {
                        model: type_name::<M>(),
                    })
                }
            },
        };
        let query = apply_filters(query, &filters, Some(resolved))?;
        let query = order_and_limit(query, order_by, limit);
        query
            .all()
            .map_err(|e| QueryError::Execution(Box::new(e)))
    }
}
