//! Integration tests for dataset export
//!
//! Tests random and exhaustive datasets built from the built-in grammar and
//! catalog, and their JSON and MessagePack files.

use std::fs;

use cmdgen_engine::{Attributes, GeneratorConfig, Grammar, MAIN, ProductionRule, TaskGenerator};
use cmdgen_entities::Catalog;
use cmdgen_runtime::{Dataset, OutputFormat, default_catalog, default_grammar};

fn generator(seed: u64) -> TaskGenerator {
    TaskGenerator::new(
        default_grammar().unwrap(),
        default_catalog().unwrap(),
        GeneratorConfig::reproducible(seed),
    )
}

#[test]
fn random_datasets_are_reproducible() {
    let a = Dataset::random(&mut generator(11), 25).unwrap();
    let b = Dataset::random(&mut generator(11), 25).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 25);
    assert!(a.elements().iter().all(|e| e.command.is_some() && !e.sentence.contains('{')));
    assert!(a.elements().iter().all(|e| e.command_error.is_none()));
}

#[test]
fn broken_templates_are_reported_per_element() {
    let grammar = Grammar::new().with_rule(
        ProductionRule::new(MAIN, ["guide the guest"])
            .unwrap()
            .with_attributes(Attributes::new().with_command("guide(to=$destination)").unwrap()),
    );
    let mut g = TaskGenerator::new(grammar, Catalog::new(), GeneratorConfig::reproducible(0));
    let dataset = Dataset::random(&mut g, 2).unwrap();
    let element = &dataset.elements()[0];
    assert_eq!(element.command, None);
    let error = element.command_error.as_deref().unwrap();
    assert!(error.contains("$destination"), "{error}");

    let value: serde_json::Value = serde_json::from_str(&dataset.to_json().unwrap()).unwrap();
    assert!(value[1]["command_error"].as_str().unwrap().contains("render path not found"));
}

#[test]
fn exhaustive_datasets_keep_placeholders() {
    let dataset = Dataset::exhaustive(&generator(0), Some(50)).unwrap();
    assert_eq!(dataset.len(), 50);
    assert_eq!(dataset.elements()[0].id, 1);
    assert_eq!(dataset.elements()[49].id, 50);
    assert!(dataset.elements().iter().any(|e| e.sentence.contains('{')));
}

#[test]
fn files_in_both_formats() {
    let dir = std::env::temp_dir().join(format!("cmdgen-datasets-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let dataset = Dataset::random(&mut generator(5), 10).unwrap();

    let json = dir.join("tasks.json");
    dataset.save(&json, OutputFormat::Json).unwrap();
    let text = fs::read_to_string(&json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 10);
    assert_eq!(value[0]["id"], 1);
    assert_eq!(Dataset::from_json(&text).unwrap(), dataset);

    let packed = dir.join("tasks.msgpack");
    dataset.save(&packed, OutputFormat::MessagePack).unwrap();
    let bytes = fs::read(&packed).unwrap();
    assert_eq!(Dataset::from_msgpack(&bytes).unwrap(), dataset);
}

#[test]
fn writing_to_a_buffer() {
    let dataset = Dataset::random(&mut generator(2), 3).unwrap();
    let mut out = Vec::new();
    dataset.write_to(&mut out, OutputFormat::Json).unwrap();
    assert!(out.ends_with(b"]\n"));
}

#[test]
fn unwritable_path_is_an_io_error() {
    let dataset = Dataset::random(&mut generator(2), 1).unwrap();
    let missing = std::env::temp_dir().join("cmdgen-no-such-dir").join("x").join("tasks.json");
    assert!(dataset.save(&missing, OutputFormat::Json).is_err());
}
