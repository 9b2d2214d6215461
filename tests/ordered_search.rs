//! Ordered search tests
//!
//! `order_by` by bare column name and by explicit column reference must
//! produce identical orderings; the limit caps after ordering.

use filterset::{ColumnRef, FieldMap, FilterEngine, MemoryTable, OrderRef};
use serde_json::{json, Value};

struct Dog;

fn dog_store() -> MemoryTable {
    MemoryTable::new(vec![
        json!({"name": "Xocomil", "weight": 100.0}),
        json!({"name": "Jasmine", "weight": 40.0}),
        json!({"name": "Quick", "weight": 90.0}),
        json!({"name": "Jinx", "weight": 55.0}),
        json!({"name": "Kaya", "weight": 50.0}),
        json!({"name": "Bozeman", "weight": 45.0}),
    ])
}

fn engine() -> FilterEngine {
    let mut engine = FilterEngine::new();
    engine.register_model::<Dog>(FieldMap::new().field("name").field("weight"));
    engine
}

fn names(rows: &[Value]) -> Vec<&str> {
    rows.iter().filter_map(|r| r["name"].as_str()).collect()
}

#[test]
fn test_order_by_name() {
    let rows = engine()
        .search::<Dog, _>(
            dog_store().query(),
            &json!([]),
            None,
            Some(OrderRef::from("name")),
            None,
        )
        .unwrap();
    assert_eq!(
        names(&rows),
        ["Bozeman", "Jasmine", "Jinx", "Kaya", "Quick", "Xocomil"]
    );
}

#[test]
fn test_order_by_string_and_column_ref_agree() {
    let by_name = engine()
        .search::<Dog, _>(
            dog_store().query(),
            &json!([]),
            None,
            Some(OrderRef::from("weight")),
            None,
        )
        .unwrap();
    let by_ref = engine()
        .search::<Dog, _>(
            dog_store().query(),
            &json!([]),
            None,
            Some(OrderRef::from(ColumnRef::new("weight"))),
            None,
        )
        .unwrap();
    assert_eq!(by_name, by_ref);
    assert_eq!(names(&by_name)[0], "Jasmine");
}

#[test]
fn test_filter_then_order() {
    let rows = engine()
        .search::<Dog, _>(
            dog_store().query(),
            &json!([{"field": "weight", "op": ">=", "value": 50}]),
            None,
            Some(OrderRef::from("weight")),
            None,
        )
        .unwrap();
    assert_eq!(names(&rows), ["Kaya", "Jinx", "Quick", "Xocomil"]);
}

#[test]
fn test_order_with_limit_returns_lightest_two() {
    let rows = engine()
        .search::<Dog, _>(
            dog_store().query(),
            &json!([]),
            None,
            Some(OrderRef::from("weight")),
            Some(2),
        )
        .unwrap();
    assert_eq!(names(&rows), ["Jasmine", "Bozeman"]);
}

#[test]
fn test_no_order_by_keeps_natural_order() {
    let rows = engine()
        .search::<Dog, _>(dog_store().query(), &json!([]), None, None, None)
        .unwrap();
    assert_eq!(names(&rows)[0], "Xocomil");
    assert_eq!(names(&rows)[5], "Bozeman");
}
