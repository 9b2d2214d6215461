//! # filterset
//!
//! A declarative filter-expression engine. Raw JSON descriptors
//! (`{"field": ..., "op": ..., "value": ...}`) are validated,
//! type-checked, and deserialized into typed predicates, then compiled
//! into constraints folded onto an abstract queryable.
//!
//! ```
//! use filterset::{FieldMap, FilterEngine, MemoryTable};
//! use serde_json::json;
//!
//! struct Dog;
//!
//! let store = MemoryTable::new(vec![
//!     json!({"name": "Jasmine", "weight": 40.0}),
//!     json!({"name": "Quick", "weight": 90.0}),
//! ]);
//!
//! let mut engine = FilterEngine::new();
//! engine.register_model::<Dog>(FieldMap::new().field("name").field("weight"));
//!
//! let light = engine
//!     .search::<Dog, _>(
//!         store.query(),
//!         &json!([{"field": "weight", "op": "<", "value": 50}]),
//!         None,
//!         None,
//!         None,
//!     )
//!     .unwrap();
//! assert_eq!(light.len(), 1);
//! assert_eq!(light[0]["name"], json!("Jasmine"));
//! ```

pub mod engine;
pub mod field;
pub mod filter;
pub mod memory;
pub mod query;
pub mod value;

pub use engine::FilterEngine;
pub use field::{FieldMap, FieldMapping, FieldPath};
pub use filter::{
    Filter, FilterCtor, FilterDeserializer, FilterError, FilterOp, FilterResult,
    OperatorRegistry, DEFAULT_NESTED_FIELD,
};
pub use memory::{MemoryQuery, MemoryTable};
pub use query::{
    apply_filters, query_with_filters, ColumnRef, Comparison, Constraint, OrderRef, QueryError,
    QueryResult, Queryable,
};
pub use value::{coerce, is_date, is_datetime, FilterValue};
