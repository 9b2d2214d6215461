//! # Operator Registry
//!
//! Maps operator symbols to predicate constructors. The built-in table is
//! explicit and static; adding an operator means adding a row, not relying
//! on runtime discovery. Registering an existing symbol overwrites the
//! prior mapping (last write wins) — a deliberate extension point.

use std::collections::HashMap;

use crate::field::FieldPath;
use crate::value::FilterValue;

use super::ast::Filter;
use super::errors::FilterResult;

/// Constructor for one predicate variant: field path and coerced value in,
/// validated filter (or validation error) out.
pub type FilterCtor = fn(FieldPath, FilterValue) -> FilterResult<Filter>;

const BUILTIN: [(&str, FilterCtor); 9] = [
    ("<", Filter::lt),
    ("<=", Filter::lte),
    ("=", Filter::eq),
    (">", Filter::gt),
    (">=", Filter::gte),
    ("in", Filter::is_in),
    ("!=", Filter::ne),
    ("like", Filter::like),
    ("contains", Filter::contains),
];

/// Symbol → constructor table
#[derive(Debug, Clone)]
pub struct OperatorRegistry {
    table: HashMap<String, FilterCtor>,
}

impl OperatorRegistry {
    /// Registry seeded with the built-in operator set
    pub fn builtin() -> Self {
        let table = BUILTIN
            .iter()
            .map(|(symbol, ctor)| ((*symbol).to_string(), *ctor))
            .collect();
        Self { table }
    }

    /// Register an operator; an existing symbol is overwritten
    pub fn register(&mut self, symbol: impl Into<String>, ctor: FilterCtor) {
        self.table.insert(symbol.into(), ctor);
    }

    /// Look up the constructor for a symbol
    pub fn get(&self, symbol: &str) -> Option<FilterCtor> {
        self.table.get(symbol).copied()
    }

    /// True if the symbol is registered
    pub fn supports(&self, symbol: &str) -> bool {
        self.table.contains_key(symbol)
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_symbols_registered() {
        let registry = OperatorRegistry::builtin();
        for symbol in ["<", "<=", "=", ">", ">=", "in", "!=", "like", "contains"] {
            assert!(registry.supports(symbol), "{} should be registered", symbol);
        }
    }

    #[test]
    fn test_unknown_symbol_unsupported() {
        let registry = OperatorRegistry::builtin();
        assert!(!registry.supports("~="));
        assert!(registry.get("~=").is_none());
    }

    #[test]
    fn test_register_custom_operator() {
        let mut registry = OperatorRegistry::builtin();
        registry.register("startswith", Filter::like);
        assert!(registry.supports("startswith"));
    }

    #[test]
    fn test_duplicate_registration_overwrites() {
        let mut registry = OperatorRegistry::builtin();
        // "=" normally rejects floats; rebinding it to the `<` constructor
        // must take effect (last write wins)
        registry.register("=", Filter::lt);
        let ctor = registry.get("=").unwrap();
        let filter = ctor(
            crate::field::FieldPath::base("weight"),
            FilterValue::Float(1.5),
        )
        .unwrap();
        assert_eq!(filter.op_symbol(), "<");
    }
}
