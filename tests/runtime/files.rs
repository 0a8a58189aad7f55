//! Integration tests for grammar and catalog files
//!
//! Tests loading rule files with includes from disk, and JSON catalogs.

use std::fs;
use std::path::PathBuf;

use cmdgen_engine::MAIN;
use cmdgen_entities::DifficultyDegree;
use cmdgen_foundation::ErrorKind;
use cmdgen_runtime::{GrammarLoader, RunConfig, load_catalog};

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cmdgen-files-{name}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

// =============================================================================
// Grammar Files
// =============================================================================

#[test]
fn includes_resolve_relative_to_the_including_file() {
    let dir = scratch("includes");
    fs::create_dir_all(dir.join("parts")).unwrap();
    fs::write(
        dir.join("main.txt"),
        "// grammar name Errands\n// grammar tier high\n\
         // import parts/people.txt\n\
         # import \"parts/objects.txt\" as $fetch\n\
         $Main = $greet | $fetch\n",
    )
    .unwrap();
    fs::write(
        dir.join("parts/people.txt"),
        "$Main = never chosen\n$greet = (greet | salute) {name}\n",
    )
    .unwrap();
    fs::write(dir.join("parts/objects.txt"), "$Main = bring the {object}\n").unwrap();

    let grammar = GrammarLoader::new().load(dir.join("main.txt")).unwrap();
    assert_eq!(grammar.name(), Some("Errands"));
    assert_eq!(grammar.tier(), DifficultyDegree::High);
    assert_eq!(grammar.alternative_count(MAIN), 2);
    assert_eq!(grammar.alternative_count("$greet"), 2);
    assert_eq!(grammar.alternative("$fetch", 0).unwrap().text(), "bring the {object}");
    assert!(grammar.unresolved_references().is_empty());
}

#[test]
fn cyclic_imports_load_once() {
    let dir = scratch("cycle");
    fs::write(dir.join("a.txt"), "// load b.txt\n$Main = $b\n$a = from a\n").unwrap();
    fs::write(dir.join("b.txt"), "// load a.txt\n$b = from b\n").unwrap();

    let grammar = GrammarLoader::new().load(dir.join("a.txt")).unwrap();
    assert_eq!(grammar.alternative_count("$a"), 1);
    assert_eq!(grammar.alternative_count("$b"), 1);
}

#[test]
fn errors_name_file_and_line() {
    let dir = scratch("errors");
    let path = dir.join("broken.txt");
    fs::write(&path, "$Main = fine\n$bad = x <=> { oops\n").unwrap();

    let err = GrammarLoader::new().load(&path).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Serialization(_)));
    let context = err.context.as_ref().unwrap();
    assert_eq!(context.line, Some(2));
    assert!(context.source.as_deref().unwrap().ends_with("broken.txt"));
}

#[test]
fn missing_main_is_rejected() {
    let dir = scratch("nomain");
    let path = dir.join("rules.txt");
    fs::write(&path, "$greet = hello\n").unwrap();
    let err = GrammarLoader::new().load(&path).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidRule(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = GrammarLoader::new()
        .load(std::env::temp_dir().join("cmdgen-does-not-exist.txt"))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io(_)));
}

// =============================================================================
// Catalog Files
// =============================================================================

#[test]
fn catalog_file_round_trip() {
    let dir = scratch("catalog");
    let path = dir.join("arena.json");
    fs::write(
        &path,
        r#"{
  "categories": [
    { "name": "drinks", "defaultLocation": "fridge", "room": "kitchen",
      "objects": [ { "name": "coke" }, { "name": "water", "type": "alike" } ] }
  ],
  "rooms": [ { "name": "kitchen", "locations": [ { "name": "fridge", "placement": true } ] } ],
  "names": [ { "name": "Ana", "gender": "female" } ],
  "gestures": [ "waving" ],
  "questions": [ { "question": "What day is it?", "answer": "Monday" } ]
}"#,
    )
    .unwrap();

    let catalog = load_catalog(&path).unwrap();
    assert_eq!(catalog.objects.len(), 2);
    assert_eq!(catalog.names.len(), 1);
    assert!(catalog.location("fridge").unwrap().is_placement());
    assert_eq!(catalog.category("drinks").unwrap().default_location().unwrap().room, "kitchen");
}

#[test]
fn malformed_catalog_reports_position() {
    let dir = scratch("badcatalog");
    let path = dir.join("arena.json");
    fs::write(&path, "{\n  \"names\": [ { \"gender\": \"female\" } ]\n}").unwrap();
    let err = load_catalog(&path).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Serialization(_)));
    assert!(err.context.as_ref().unwrap().line.is_some());
}

#[test]
fn run_config_merges_grammar_files() {
    let dir = scratch("config");
    fs::write(dir.join("one.txt"), "$Main = stand up\n").unwrap();
    fs::write(dir.join("two.txt"), "$Main = sit down\n").unwrap();
    let args: Vec<String> = [
        "cmdgen",
        "-g",
        dir.join("one.txt").to_str().unwrap(),
        "-g",
        dir.join("two.txt").to_str().unwrap(),
    ]
    .into_iter()
    .map(String::from)
    .collect();

    let config = RunConfig::from_args(&args).unwrap();
    let grammar = config.load_grammar().unwrap();
    assert_eq!(grammar.alternative_count(MAIN), 2);
}
