//! Integration tests for command rendering
//!
//! Tests how command templates attached to rules turn a bound tree into a
//! machine-readable command.

use cmdgen_engine::{Attributes, GeneratorConfig, Grammar, MAIN, ProductionRule, TaskGenerator, parse_path, render_command};
use cmdgen_entities::{Catalog, Gender, Object, PersonName};
use cmdgen_foundation::ErrorKind;

fn rule(nt: &str, alternatives: &[&str], command: Option<&str>) -> ProductionRule {
    let rule = ProductionRule::new(nt, alternatives.iter().copied()).unwrap();
    match command {
        Some(template) => rule.with_attributes(Attributes::new().with_command(template).unwrap()),
        None => rule,
    }
}

fn catalog() -> Catalog {
    Catalog::new()
        .with_object(Object::new("apple", "fruits"))
        .with_name(PersonName::new("Ana", Gender::Female))
}

fn grammar() -> Grammar {
    Grammar::new()
        .with_rule(rule(MAIN, &["$deliver", "$deliver and $report", "$deliver or $deliver"], None))
        .with_rule(rule(
            "$deliver",
            &["bring the {kobject 1} to {female 1}"],
            Some("deliver(object={kobject 1}, person={female 1})"),
        ))
        .with_rule(rule("$report", &["$say it"], Some("report(%say, \"$say\")")))
        .with_rule(rule("$say", &["tell me"], Some("say()")))
}

fn task(path: &str) -> cmdgen_engine::Task {
    let mut g = TaskGenerator::new(grammar(), catalog(), GeneratorConfig::reproducible(0));
    g.generate_guided(&parse_path(path).unwrap()).unwrap()
}

#[test]
fn single_carrier_renders_its_template() {
    let t = task("Main:0");
    assert_eq!(t.sentence(), "Bring the apple to Ana");
    assert_eq!(t.command(), Some("deliver(object=apple, person=Ana)"));
}

#[test]
fn root_hands_off_to_the_only_carrier() {
    let grammar = Grammar::new()
        .with_rule(rule(MAIN, &["$report"], None))
        .with_rule(rule("$report", &["please $say it"], Some("report(%say, \"$say\")")))
        .with_rule(rule("$say", &["tell me"], Some("say()")));
    let mut g = TaskGenerator::new(grammar, Catalog::new(), GeneratorConfig::reproducible(0));
    let t = g.generate().unwrap();
    assert_eq!(t.command(), Some("report(say(), \"tell me\")"));
}

#[test]
fn several_carriers_are_ambiguous() {
    let t = task("Main:1");
    assert_eq!(t.command(), None);
    let err = render_command(t.tree()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AmbiguousRenderPath(_)));
    assert_eq!(t.command_error(), Some(&err));
}

#[test]
fn indexed_captures_pick_one_match() {
    let grammar = Grammar::new()
        .with_rule(rule(MAIN, &["$step then $step"], Some("seq(%step:0; %step:1)")))
        .with_rule(rule("$step", &["sit"], Some("sit()")));
    let mut g = TaskGenerator::new(grammar, Catalog::new(), GeneratorConfig::reproducible(0));
    assert_eq!(g.generate().unwrap().command(), Some("seq(sit(); sit())"));
}

#[test]
fn missing_targets_are_not_found() {
    let grammar = Grammar::new().with_rule(rule(MAIN, &["wait"], Some("wait(%timer)")));
    let mut g = TaskGenerator::new(grammar, Catalog::new(), GeneratorConfig::reproducible(0));
    let t = g.generate().unwrap();
    assert_eq!(t.command(), None);
    let err = render_command(t.tree()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::RenderPathNotFound(_)));
    assert!(err.to_string().contains("%timer"));
    assert_eq!(t.command_error(), Some(&err));
}

#[test]
fn template_with_missing_capture_reports_the_capture() {
    let grammar = Grammar::new()
        .with_rule(rule(MAIN, &["$fetch"], None))
        .with_rule(rule("$fetch", &["fetch the {kobject 1}"], Some("fetch(object={kobject 1}, from=$source)")));
    let catalog = Catalog::new().with_object(Object::new("apple", "fruits"));
    let mut g = TaskGenerator::new(grammar, catalog, GeneratorConfig::reproducible(0));
    let t = g.generate().unwrap();
    assert_eq!(t.sentence(), "Fetch the apple");
    assert_eq!(t.command(), None);
    let err = t.command_error().unwrap();
    assert!(matches!(err.kind, ErrorKind::RenderPathNotFound(ref token) if token == "$source"));
    assert!(err.to_string().contains("$fetch"), "{err}");
}

#[test]
fn unbound_trees_render_wildcard_sources() {
    let g = TaskGenerator::new(grammar(), catalog(), GeneratorConfig::reproducible(0));
    let first = g.enumerate_all().unwrap().next().unwrap();
    assert_eq!(
        render_command(&first).unwrap(),
        "deliver(object={kobject 1}, person={female 1})"
    );
}
