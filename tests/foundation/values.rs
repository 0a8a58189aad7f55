//! Integration tests for Value and Queryable
//!
//! Tests typed comparison and the native-then-bag property lookup.

use cmdgen_foundation::{PropertyBag, Queryable, Value, ValueType};

struct Cup {
    bag: PropertyBag,
}

impl Queryable for Cup {
    fn name(&self) -> &str {
        "cup"
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name.to_ascii_lowercase().as_str() {
            "name" => Some(Value::from("cup")),
            "category" => Some(Value::named("dishes")),
            _ => None,
        }
    }

    fn properties(&self) -> Option<&PropertyBag> {
        Some(&self.bag)
    }
}

fn cup() -> Cup {
    Cup {
        bag: PropertyBag::new()
            .with("weight", "0.3")
            .with("fragile", "true")
            .with("category", "shadowed"),
    }
}

// =============================================================================
// Comparison
// =============================================================================

#[test]
fn numbers_order() {
    assert!(Value::from(2).compare(&Value::from(10.5)).is_some_and(std::cmp::Ordering::is_lt));
}

#[test]
fn named_values_compare_by_name() {
    assert_eq!(Value::named("Living Room"), Value::from("living room"));
}

#[test]
fn mixed_types_do_not_compare() {
    assert_eq!(Value::from("1").compare(&Value::from(1)), None);
    assert_eq!(Value::Null, Value::Null);
}

#[test]
fn bag_text_parses_by_type() {
    assert_eq!(Value::parse_as("0.5", ValueType::Number), Some(Value::Number(0.5)));
    assert_eq!(Value::parse_as("TRUE", ValueType::Bool), Some(Value::Bool(true)));
    assert_eq!(Value::parse_as("heavy", ValueType::Number), None);
}

// =============================================================================
// Lookup
// =============================================================================

#[test]
fn native_properties_win() {
    assert_eq!(cup().lookup("Category", ValueType::String), Some(Value::from("dishes")));
}

#[test]
fn bag_is_the_fallback() {
    let cup = cup();
    assert_eq!(cup.lookup("weight", ValueType::Number), Some(Value::Number(0.3)));
    assert_eq!(cup.lookup("fragile", ValueType::Bool), Some(Value::Bool(true)));
    assert_eq!(cup.lookup("color", ValueType::String), None);
}
