//! # Filter Deserializer
//!
//! Validates raw `{field, op, value}` descriptors, looks the operator up
//! in the registry, coerces the value, and constructs the matching
//! predicate variant. Descriptors are processed in input order and any
//! failure aborts the whole batch.

use serde::Deserialize;
use serde_json::Value;

use crate::field::FieldPath;
use crate::value::coerce;

use super::ast::Filter;
use super::errors::{FilterError, FilterResult};
use super::registry::OperatorRegistry;

/// Wire shape of one filter descriptor
#[derive(Debug, Deserialize)]
struct RawFilter {
    field: String,
    op: String,
    value: Value,
}

/// Turns raw descriptor lists into validated filter sequences
#[derive(Debug, Clone, Default)]
pub struct FilterDeserializer {
    registry: OperatorRegistry,
}

impl FilterDeserializer {
    /// Deserializer over the built-in operator set
    pub fn new() -> Self {
        Self::default()
    }

    /// Deserializer over a caller-extended registry
    pub fn with_registry(registry: OperatorRegistry) -> Self {
        Self { registry }
    }

    /// Mutable access to the operator table, for registering extensions
    pub fn registry_mut(&mut self) -> &mut OperatorRegistry {
        &mut self.registry
    }

    /// Deserialize a JSON array of descriptors into filters, preserving
    /// input order.
    pub fn deserialize(&self, raw: &Value) -> FilterResult<Vec<Filter>> {
        let items = raw.as_array().ok_or_else(|| {
            FilterError::InvalidDescriptor(format!(
                "expected an array of filter descriptors, got {}",
                json_kind(raw)
            ))
        })?;
        items.iter().map(|item| self.deserialize_one(item)).collect()
    }

    /// Deserialize a single descriptor
    pub fn deserialize_one(&self, raw: &Value) -> FilterResult<Filter> {
        let descriptor: RawFilter = serde_json::from_value(raw.clone())
            .map_err(|e| FilterError::InvalidDescriptor(e.to_string()))?;
        let ctor = self
            .registry
            .get(&descriptor.op)
            .ok_or(FilterError::UnsupportedOperator(descriptor.op))?;
        let field = FieldPath::split(&descriptor.field);
        let value = coerce(&descriptor.value)?;
        ctor(field, value)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterOp;
    use crate::value::FilterValue;
    use serde_json::json;

    #[test]
    fn test_deserialize_single_descriptor() {
        let deserializer = FilterDeserializer::new();
        let filter = deserializer
            .deserialize_one(&json!({"field": "weight", "op": "<", "value": 10.24}))
            .unwrap();
        assert_eq!(filter.field.base, "weight");
        assert_eq!(filter.op, FilterOp::Lt(FilterValue::Float(10.24)));
    }

    #[test]
    fn test_deserialize_preserves_order() {
        let deserializer = FilterDeserializer::new();
        let filters = deserializer
            .deserialize(&json!([
                {"field": "weight", "op": "<", "value": 50},
                {"field": "name", "op": "like", "value": "J%"},
                {"field": "id", "op": ">=", "value": 2}
            ]))
            .unwrap();
        let symbols: Vec<_> = filters.iter().map(Filter::op_symbol).collect();
        assert_eq!(symbols, ["<", "like", ">="]);
    }

    #[test]
    fn test_deserialize_is_repeatable() {
        let deserializer = FilterDeserializer::new();
        let raw = json!([
            {"field": "weight", "op": "<", "value": 50},
            {"field": "dob", "op": "=", "value": "2022-10-24"}
        ]);
        let first = deserializer.deserialize(&raw).unwrap();
        let second = deserializer.deserialize(&raw).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_key_fails() {
        let deserializer = FilterDeserializer::new();
        for raw in [
            json!({"op": "<", "value": 1}),
            json!({"field": "weight", "value": 1}),
            json!({"field": "weight", "op": "<"}),
        ] {
            let err = deserializer.deserialize_one(&raw).unwrap_err();
            assert!(matches!(err, FilterError::InvalidDescriptor(_)), "{:?}", raw);
        }
    }

    #[test]
    fn test_null_value_is_allowed() {
        let deserializer = FilterDeserializer::new();
        let filter = deserializer
            .deserialize_one(&json!({"field": "dob", "op": "=", "value": null}))
            .unwrap();
        assert_eq!(filter.op, FilterOp::Eq(FilterValue::Null));
    }

    #[test]
    fn test_unknown_operator_names_the_symbol() {
        let deserializer = FilterDeserializer::new();
        let err = deserializer
            .deserialize_one(&json!({"field": "x", "op": "~=", "value": 1}))
            .unwrap_err();
        assert_eq!(err, FilterError::UnsupportedOperator("~=".to_string()));
        assert!(err.to_string().contains("~="));
    }

    #[test]
    fn test_non_array_batch_fails() {
        let deserializer = FilterDeserializer::new();
        let err = deserializer
            .deserialize(&json!({"field": "x", "op": "=", "value": 1}))
            .unwrap_err();
        assert!(matches!(err, FilterError::InvalidDescriptor(_)));
    }

    #[test]
    fn test_construction_validation_propagates() {
        let deserializer = FilterDeserializer::new();
        let err = deserializer
            .deserialize(&json!([
                {"field": "weight", "op": "<", "value": 50},
                {"field": "weight", "op": "=", "value": 12.345}
            ]))
            .unwrap_err();
        assert!(matches!(err, FilterError::TypeMismatch { op: "=", .. }));
    }

    #[test]
    fn test_extended_registry() {
        let mut deserializer = FilterDeserializer::new();
        deserializer.registry_mut().register("matches", Filter::like);
        let filter = deserializer
            .deserialize_one(&json!({"field": "name", "op": "matches", "value": "J%"}))
            .unwrap();
        assert!(matches!(filter.op, FilterOp::Like(_)));
    }
}
