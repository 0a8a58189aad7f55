//! Integration tests for grammars
//!
//! Tests rule pooling, indexing, merging, and reference checks.

use cmdgen_engine::{Grammar, MAIN, MergeMode, ProductionRule};
use cmdgen_entities::DifficultyDegree;
use cmdgen_foundation::ErrorKind;

fn rule(nt: &str, alternatives: &[&str]) -> ProductionRule {
    ProductionRule::new(nt, alternatives.iter().copied()).unwrap()
}

fn base() -> Grammar {
    Grammar::new()
        .with_name("base")
        .with_tier(DifficultyDegree::Easy)
        .with_rule(rule(MAIN, &["$go"]))
        .with_rule(rule("$go", &["go to the {room}", "move"]))
}

#[test]
fn repeated_rules_pool_their_alternatives() {
    let mut g = base();
    g.add_rule(rule("$go", &["walk"]));
    assert_eq!(g.alternative_count("$go"), 3);
    assert_eq!(g.alternative("$go", 2).unwrap().text(), "walk");
    assert_eq!(g.len(), 2);
    let names: Vec<_> = g.non_terminals().collect();
    assert_eq!(names, vec![MAIN, "$go"]);
}

#[test]
fn out_of_range_and_unknown() {
    let g = base();
    let err = g.alternative("$go", 5).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::AlternativeOutOfRange { index: 5, count: 2, .. }
    ));
    let err = g.alternative("$fly", 0).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownNonTerminal(_)));
}

#[test]
fn merge_modes() {
    let other = Grammar::new()
        .with_rule(rule(MAIN, &["$fetch"]))
        .with_rule(rule("$fetch", &["fetch it"]));

    let mut all = base();
    all.merge(&other, &MergeMode::All);
    assert_eq!(all.alternative_count(MAIN), 2);
    assert!(all.contains("$fetch"));

    let mut except = base();
    except.merge(&other, &MergeMode::ExceptMain);
    assert_eq!(except.alternative_count(MAIN), 1);
    assert!(except.contains("$fetch"));

    let mut renamed = base();
    renamed.merge(&other, &MergeMode::MainAs("$errand".into()));
    assert_eq!(renamed.alternative_count(MAIN), 1);
    assert_eq!(renamed.alternative("$errand", 0).unwrap().text(), "$fetch");
}

#[test]
fn merging_keeps_identity() {
    let mut g = base();
    g.merge(&Grammar::new().with_name("other"), &MergeMode::All);
    assert_eq!(g.name(), Some("base"));
    assert_eq!(g.tier(), DifficultyDegree::Easy);
}

#[test]
fn unresolved_references_are_listed_once() {
    let g = Grammar::new()
        .with_rule(rule(MAIN, &["$go and $say", "$say twice"]))
        .with_rule(rule("$go", &["go"]));
    assert_eq!(g.unresolved_references(), vec!["$say".to_string()]);
    assert!(base().unresolved_references().is_empty());
}
