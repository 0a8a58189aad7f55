//! Integration tests for tree generation and enumeration
//!
//! Tests guided paths, recursion limits, unresolved references, seeding,
//! and exhaustive enumeration order.

use cmdgen_engine::{
    DEFAULT_MAX_DEPTH, GeneratorConfig, Grammar, MAIN, PathStep, ProductionRule, TaskGenerator, parse_path,
};
use cmdgen_entities::{Catalog, DifficultyDegree};
use cmdgen_foundation::ErrorKind;

fn rule(nt: &str, alternatives: &[&str]) -> ProductionRule {
    ProductionRule::new(nt, alternatives.iter().copied()).unwrap()
}

fn errands() -> Grammar {
    Grammar::new()
        .with_tier(DifficultyDegree::High)
        .with_rule(rule(MAIN, &["$go then $say", "$say"]))
        .with_rule(rule("$go", &["go to the kitchen", "go to the bedroom"]))
        .with_rule(rule("$say", &["say hello", "say goodbye", "tell a joke"]))
}

fn generator(grammar: Grammar, seed: u64) -> TaskGenerator {
    TaskGenerator::new(grammar, Catalog::new(), GeneratorConfig::reproducible(seed))
}

// =============================================================================
// Guided Generation
// =============================================================================

#[test]
fn path_fixes_choices_by_depth() {
    let mut g = generator(errands(), 1);
    let path = parse_path("Main:0, go:1").unwrap();
    let task = g.generate_guided(&path).unwrap();
    assert!(task.sentence().starts_with("Go to the bedroom then "));
    assert_eq!(task.tier(), DifficultyDegree::High);

    let task = g.generate_guided(&parse_path("Main:1 say:2").unwrap()).unwrap();
    assert_eq!(task.sentence(), "Tell a joke");
}

#[test]
fn steps_only_apply_to_matching_names() {
    // $go and $say both sit at depth 1; the step only forces $say.
    let path = vec![PathStep::new("Main", Some(0)), PathStep::new("say", Some(1))];
    for seed in 0..5 {
        let task = generator(errands(), seed).generate_guided(&path).unwrap();
        assert!(task.sentence().ends_with("then say goodbye"), "{}", task.sentence());
    }
}

#[test]
fn unindexed_steps_choose_at_random() {
    let path = parse_path("Main:1 say").unwrap();
    for seed in 0..10 {
        let task = generator(errands(), seed).generate_guided(&path).unwrap();
        assert!(task.sentence().starts_with("Say") || task.sentence().starts_with("Tell"));
    }
}

#[test]
fn path_index_out_of_range() {
    let err = generator(errands(), 0)
        .generate_guided(&parse_path("Main:4").unwrap())
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AlternativeOutOfRange { count: 2, .. }));
}

#[test]
fn malformed_paths() {
    assert!(parse_path("Main:x").is_err());
    assert!(parse_path("Ma in:1 $:2").is_err());
    assert_eq!(parse_path(" $Main:0 ").unwrap(), vec![PathStep::new("Main", Some(0))]);
}

// =============================================================================
// Limits and Gaps
// =============================================================================

#[test]
fn runaway_recursion_is_reported() {
    let grammar = Grammar::new().with_rule(rule(MAIN, &["again $Main"]));
    let config = GeneratorConfig::reproducible(0).with_max_depth(20).with_max_attempts(3);
    let err = TaskGenerator::new(grammar, Catalog::new(), config).generate().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::RecursionLimit { limit: 20, .. }));
}

#[test]
fn default_depth_guard_fails_the_attempt() {
    let grammar = Grammar::new().with_rule(rule(MAIN, &["again $Main"]));
    let mut g = generator(grammar, 1);
    assert_eq!(g.config().max_depth, DEFAULT_MAX_DEPTH);
    let err = g.generate().unwrap_err();
    assert!(err.is_retryable());
    assert!(matches!(
        err.kind,
        ErrorKind::RecursionLimit { limit: DEFAULT_MAX_DEPTH, ref non_terminal } if non_terminal == MAIN
    ));
    assert_eq!(err.to_string(), "recursion limit (1000) exceeded while expanding $Main");
}

#[test]
fn endless_branch_is_retried_until_a_finite_one_is_chosen() {
    let grammar = Grammar::new()
        .with_rule(rule(MAIN, &["$spin", "stop"]))
        .with_rule(rule("$spin", &["spin $spin"]));
    let mut g = generator(grammar, 6);
    for _ in 0..5 {
        assert_eq!(g.generate().unwrap().sentence(), "Stop");
    }
}

#[test]
fn undefined_references_render_verbatim() {
    let grammar = Grammar::new().with_rule(rule(MAIN, &["please $dance now"]));
    let task = generator(grammar, 0).generate().unwrap();
    assert_eq!(task.sentence(), "Please $dance now");
    assert!(task.pretty().contains("$dance (unresolved)"));
}

#[test]
fn missing_start_symbol() {
    let mut g = TaskGenerator::new(
        errands(),
        Catalog::new(),
        GeneratorConfig::reproducible(0).with_start_symbol("$Task"),
    );
    let err = g.generate().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownNonTerminal(_)));
    assert!(g.enumerate_all().is_err());
}

#[test]
fn alternate_start_symbol() {
    let mut g = TaskGenerator::new(
        errands(),
        Catalog::new(),
        GeneratorConfig::reproducible(0).with_start_symbol("$go"),
    );
    assert!(g.generate().unwrap().sentence().starts_with("Go to the"));
}

// =============================================================================
// Seeding
// =============================================================================

#[test]
fn same_seed_same_sequence() {
    let mut a = generator(errands(), 42);
    let mut b = generator(errands(), 42);
    for _ in 0..20 {
        assert_eq!(a.generate().unwrap().sentence(), b.generate().unwrap().sentence());
    }
}

#[test]
fn reseed_restarts_the_sequence() {
    let mut g = generator(errands(), 9);
    let first: Vec<String> = (0..8).map(|_| g.generate().unwrap().sentence().to_string()).collect();
    g.reseed(9);
    let again: Vec<String> = (0..8).map(|_| g.generate().unwrap().sentence().to_string()).collect();
    assert_eq!(first, again);
    assert_eq!(g.config().seed, Some(9));
}

// =============================================================================
// Enumeration
// =============================================================================

#[test]
fn enumeration_visits_every_tree_in_order() {
    let g = generator(errands(), 0);
    let sentences: Vec<String> = g.enumerate_all().unwrap().map(|t| t.render()).collect();
    assert_eq!(sentences.len(), 2 * 3 + 3);
    assert_eq!(sentences[0], "go to the kitchen then say hello");
    assert_eq!(sentences[1], "go to the kitchen then say goodbye");
    assert_eq!(sentences[5], "go to the bedroom then tell a joke");
    assert_eq!(sentences[8], "tell a joke");
}

#[test]
fn enumeration_leaves_wildcards_unbound() {
    let grammar = Grammar::new().with_rule(rule(MAIN, &["bring the {object}"]));
    let trees: Vec<_> = generator(grammar, 0).enumerate_all().unwrap().collect();
    assert_eq!(trees.len(), 1);
    assert!(!trees[0].is_bound());
    assert_eq!(trees[0].render(), "bring the {object}");
}

#[test]
fn enumeration_of_recursive_grammars_is_bounded() {
    let grammar = Grammar::new().with_rule(rule(MAIN, &["stop", "again $Main"]));
    let config = GeneratorConfig::reproducible(0).with_max_depth(4);
    let g = TaskGenerator::new(grammar, Catalog::new(), config);
    let sentences: Vec<String> = g.enumerate_all().unwrap().map(|t| t.render()).collect();
    assert!(!sentences.is_empty());
    assert_eq!(sentences[0], "stop");
    assert!(sentences.iter().all(|s| s.ends_with("stop")));
}
