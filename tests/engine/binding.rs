//! Integration tests for wildcard binding
//!
//! Tests how generated tasks draw entities from the catalog: shared
//! keycodes, uniqueness, where clauses, obfuscation, pronouns, and remarks.

use std::collections::HashSet;

use cmdgen_engine::{GeneratorConfig, Grammar, MAIN, ProductionRule, SubKindPolicy, TaskGenerator};
use cmdgen_entities::{Catalog, Category, Gender, Gesture, Location, Object, ObjectKind, PersonName, PredefinedQuestion};
use cmdgen_foundation::ErrorKind;

fn arena() -> Catalog {
    Catalog::new()
        .with_category(Category::new("drinks").with_default_location("fridge", "kitchen"))
        .with_category(Category::new("snacks").with_default_location("shelf", "living room"))
        .with_object(Object::new("coke", "drinks").with_property("canPour", "true"))
        .with_object(Object::new("milk", "drinks").with_kind(ObjectKind::Alike))
        .with_object(Object::new("chips", "snacks"))
        .with_object(Object::new("cookies", "snacks"))
        .with_location(Location::room("kitchen"))
        .with_location(Location::room("living room"))
        .with_location(Location::specific("fridge", "kitchen").beacon().placement())
        .with_location(Location::specific("shelf", "living room").placement())
        .with_name(PersonName::new("Anna", Gender::Female))
        .with_name(PersonName::new("Maria", Gender::Female))
        .with_name(PersonName::new("John", Gender::Male))
        .with_gesture(Gesture::new("waving"))
        .with_question(PredefinedQuestion::new("What is the capital of France?", "Paris"))
}

fn generator(text: &str, seed: u64) -> TaskGenerator {
    let grammar = Grammar::new().with_rule(ProductionRule::new(MAIN, [text]).unwrap());
    TaskGenerator::new(grammar, arena(), GeneratorConfig::reproducible(seed))
}

fn sentence(text: &str, seed: u64) -> String {
    generator(text, seed).generate().unwrap().sentence().to_string()
}

#[test]
fn shared_ids_share_values() {
    for seed in 0..10 {
        let s = sentence("{name 1} meets {name 1}", seed);
        let (a, b) = s.split_once(" meets ").unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn distinct_wildcards_take_distinct_entities() {
    for seed in 0..10 {
        let s = sentence("{kobject}|{kobject}|{kobject}", seed);
        let values: HashSet<_> = s.split('|').map(str::to_lowercase).collect();
        assert_eq!(values.len(), 3, "{s}");
    }
}

#[test]
fn sub_kinds_filter_candidates() {
    for seed in 0..10 {
        assert_eq!(sentence("{aobject}", seed), "Milk");
        assert_eq!(sentence("{male}", seed), "John");
        assert_eq!(sentence("{beacon}", seed), "Fridge");
        let room = sentence("{location room}", seed);
        assert!(room == "Kitchen" || room == "Living room", "{room}");
    }
}

#[test]
fn first_policy_is_predictable() {
    let grammar = Grammar::new().with_rule(ProductionRule::new(MAIN, ["{name}"]).unwrap());
    let config = GeneratorConfig::reproducible(0).with_sub_kind_policy(SubKindPolicy::First);
    let mut g = TaskGenerator::new(grammar, arena(), config);
    for _ in 0..5 {
        assert_eq!(g.generate().unwrap().sentence(), "John");
    }
}

#[test]
fn where_clauses_constrain_candidates() {
    for seed in 0..10 {
        assert_eq!(sentence("{object where canPour = true}", seed), "Coke");
        let s = sentence("{object where Category = snacks}", seed);
        assert!(s == "Chips" || s == "Cookies", "{s}");
    }
}

#[test]
fn nested_values_feed_where_clauses() {
    for seed in 0..10 {
        let s = sentence("{category 1}: {object 2 where Category = \"{category 1}\"}", seed);
        let (category, object) = s.split_once(": ").unwrap();
        let expected: &[&str] = if category.eq_ignore_ascii_case("drinks") {
            &["coke", "milk"]
        } else {
            &["chips", "cookies"]
        };
        assert!(expected.contains(&object), "{s}");
    }
}

#[test]
fn obfuscation_shows_the_vaguer_value() {
    assert_eq!(sentence("find the {object ? where canPour = true}", 0), "Find the drinks");
    assert_eq!(sentence("go to the {beacon ?}", 0), "Go to the kitchen");
    assert_eq!(sentence("talk to {female ?}", 0), "Talk to a person");
}

#[test]
fn pronouns_follow_the_person() {
    for seed in 0..10 {
        let task = generator("greet {female 1} and ask {pron} for {pron pos} name", seed)
            .generate()
            .unwrap();
        assert!(task.sentence().ends_with("ask her for her name"), "{}", task.sentence());

        let task = generator("find {male} and say {pron sub} is late", seed).generate().unwrap();
        assert!(task.sentence().ends_with("say he is late"), "{}", task.sentence());
    }
}

#[test]
fn metadata_and_questions_become_remarks() {
    let task = generator("tell {name 1 meta: {pron sub} wears a red shirt} the {question}", 0)
        .generate()
        .unwrap();
    let text = task.remarks_text();
    assert!(text.contains("wears a red shirt"), "{text}");
    assert!(text.contains("Q: What is the capital of France?"), "{text}");
    assert!(text.contains("A: Paris"), "{text}");
}

#[test]
fn exhausted_pools_fail_after_retries() {
    let mut g = generator("{gesture} then {gesture}", 0);
    let err = g.generate().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::PoolExhausted { .. }));
    assert!(err.is_retryable());

    // The failure leaves the catalog intact for the next attempt.
    assert_eq!(g.catalog().gestures.len(), 1);
    let mut ok = TaskGenerator::new(
        Grammar::new().with_rule(ProductionRule::new(MAIN, ["{gesture}"]).unwrap()),
        g.catalog().clone(),
        GeneratorConfig::reproducible(0),
    );
    assert_eq!(ok.generate().unwrap().sentence(), "Waving");
}
