//! Integration tests for where clauses
//!
//! Tests clause parsing and evaluation against catalog entities.

use cmdgen_entities::{Gender, Location, Object, ObjectKind, PersonName};
use cmdgen_foundation::ErrorKind;
use cmdgen_language::where_clause::parse;
use cmdgen_language::{CompareOp, ConditionalStatement, Connective};

fn juice() -> Object {
    Object::new("orange juice", "drinks")
        .with_property("canPour", "true")
        .with_property("weight", "1.2")
}

fn sponge() -> Object {
    Object::new("sponge", "cleaning stuff")
        .with_property("canPour", "false")
        .with_property("weight", "0.05")
}

fn holds(clause: &str, subject: &Object) -> bool {
    parse(clause).unwrap().evaluate(subject)
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn quoted_and_bare_values_are_the_same() {
    let quoted = parse("Category = \"drinks\"").unwrap();
    let bare = parse("Category = drinks").unwrap();
    assert_eq!(quoted.conditions()[0].value, bare.conditions()[0].value);
    assert_eq!(quoted.conditions()[0].property, bare.conditions()[0].property);
}

#[test]
fn conditions_in_source_order() {
    let s = parse("canPour = true AND (weight < 2 OR Category != \"snacks\")").unwrap();
    let ops: Vec<_> = s.conditions().iter().map(|c| (c.property.as_str(), c.op)).collect();
    assert_eq!(
        ops,
        vec![
            ("canPour", CompareOp::Eq),
            ("weight", CompareOp::Lt),
            ("Category", CompareOp::Ne),
        ]
    );
    assert!(matches!(s, ConditionalStatement::Binary { op: Connective::And, .. }));
}

#[test]
fn keywords_ignore_case() {
    assert!(parse("a = 1 and b = 2").is_ok());
    assert!(parse("not a = 1").is_ok());
}

#[test]
fn ordering_needs_a_number() {
    let err = parse("Category > \"drinks\"").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidWhereClause { .. }));
}

// =============================================================================
// Evaluation
// =============================================================================

#[test]
fn native_category_is_matched_case_insensitively() {
    assert!(holds("Category = \"Drinks\"", &juice()));
    assert!(!holds("Category = drinks", &sponge()));
}

#[test]
fn string_comparisons_fold_case_everywhere() {
    let mug = Object::new("Coffee Mug", "Dishes").with_property("color", "Red");
    assert!(holds("color = \"red\" AND Name = \"coffee mug\"", &mug));
    assert!(holds("category = DISHES", &mug));
    assert!(!holds("color != \"RED\"", &mug));
    assert!(holds("color != \"blue\"", &mug));
}

#[test]
fn bag_properties_are_typed_by_the_literal() {
    assert!(holds("canPour = true AND weight > 1", &juice()));
    assert!(!holds("canPour = true", &sponge()));
    assert!(holds("weight <= 0.05", &sponge()));
}

#[test]
fn kind_is_a_native_property() {
    let special = Object::new("tray", "dishes").with_kind(ObjectKind::Special);
    assert!(holds("kind = special", &special));
    assert!(!holds("kind = special", &juice()));
}

#[test]
fn absent_properties_never_match_values() {
    assert!(!holds("color = red", &juice()));
    assert!(!holds("color != red", &juice()));
    assert!(holds("color = null", &juice()));
}

#[test]
fn composed_statements() {
    let drinks = parse("Category = drinks").unwrap();
    let light = parse("weight < 1").unwrap();

    let both = ConditionalStatement::and(drinks.clone(), light.clone());
    assert!(!both.evaluate(&juice()));

    let either = ConditionalStatement::or(drinks.clone(), light.clone());
    assert!(either.evaluate(&juice()));
    assert!(either.evaluate(&sponge()));

    let one = ConditionalStatement::xor(drinks.clone(), light);
    assert!(one.evaluate(&sponge()));

    assert!(ConditionalStatement::not(drinks).evaluate(&sponge()));
    assert!(ConditionalStatement::all(Vec::new()).is_none());
}

#[test]
fn locations_and_people() {
    let sofa = Location::specific("sofa", "living room").beacon().placement();
    assert!(parse("isPlacement = true AND room = \"Living Room\"").unwrap().evaluate(&sofa));
    assert!(!parse("isRoom = true").unwrap().evaluate(&sofa));

    let ana = PersonName::new("Ana", Gender::Female);
    assert!(parse("Gender = female").unwrap().evaluate(&ana));
    assert!(!parse("Gender = male").unwrap().evaluate(&ana));
}
