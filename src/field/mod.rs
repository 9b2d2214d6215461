//! # Field Paths and Column Resolution
//!
//! Splits dotted field paths (one nesting level) and resolves logical
//! field names to physical column names through an optional mapping.

use std::collections::HashMap;

use tracing::warn;

use crate::filter::{FilterError, FilterResult};

/// A dotted field path split into a base field and an optional nested
/// field. Only relationship-existence filters consult the nested segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    /// Base field name (before the first `.`)
    pub base: String,
    /// Field within a related collection, if the path had a second segment
    pub nested: Option<String>,
}

impl FieldPath {
    /// Split a raw path on `.`.
    ///
    /// At most one nesting level is supported; extra segments are
    /// truncated with a warning rather than rejected.
    pub fn split(path: &str) -> Self {
        let mut segments = path.split('.');
        let base = segments.next().unwrap_or_default().to_string();
        let nested = segments.next().map(str::to_string);
        if segments.next().is_some() {
            warn!(
                field = %path,
                "field path has more than one nesting level; extra segments ignored"
            );
        }
        Self { base, nested }
    }

    /// Build a path with no nested segment
    pub fn base(name: impl Into<String>) -> Self {
        Self {
            base: name.into(),
            nested: None,
        }
    }

    /// Resolve the base field to a physical column name.
    ///
    /// With no mapping the logical name is the column name. With a
    /// mapping, an unknown field is a validation failure.
    pub fn resolve_column(&self, mapping: Option<&dyn FieldMapping>) -> FilterResult<String> {
        match mapping {
            None => Ok(self.base.clone()),
            Some(m) => m
                .resolve(&self.base)
                .ok_or_else(|| FilterError::UnknownField(self.base.clone())),
        }
    }
}

/// Capability to resolve a logical (wire) field name to a physical
/// storage column. `None` means the field is unknown to the schema.
pub trait FieldMapping {
    fn resolve(&self, field: &str) -> Option<String>;
}

impl FieldMapping for HashMap<String, String> {
    fn resolve(&self, field: &str) -> Option<String> {
        self.get(field).cloned()
    }
}

/// A concrete field mapping built field by field.
///
/// A field declared without an explicit column maps to its own name,
/// mirroring schema attributes that rename only some fields.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    columns: HashMap<String, Option<String>>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field whose column name equals the logical name
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.columns.insert(name.into(), None);
        self
    }

    /// Declare a field stored under a different column name
    pub fn mapped(mut self, name: impl Into<String>, column: impl Into<String>) -> Self {
        self.columns.insert(name.into(), Some(column.into()));
        self
    }
}

impl FieldMapping for FieldMap {
    fn resolve(&self, field: &str) -> Option<String> {
        self.columns
            .get(field)
            .map(|column| column.clone().unwrap_or_else(|| field.to_string()))
    }
}
