//! Integration tests for the interactive session
//!
//! Drives the session and the REPL loop with scripted input.

use cmdgen_engine::{Attributes, GeneratorConfig, Grammar, MAIN, ProductionRule, TaskGenerator};
use cmdgen_entities::{Catalog, Gesture};
use cmdgen_foundation::Result;
use cmdgen_runtime::{LineEditor, Outcome, ReadResult, Repl, Session, format_task};

struct Script {
    lines: Vec<ReadResult>,
    history: Vec<String>,
    keywords: Vec<String>,
}

impl Script {
    fn new(lines: &[&str]) -> Self {
        let mut lines: Vec<ReadResult> = lines.iter().map(|l| ReadResult::Line((*l).to_string())).collect();
        lines.reverse();
        Self {
            lines,
            history: Vec::new(),
            keywords: Vec::new(),
        }
    }
}

impl LineEditor for Script {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        Ok(self.lines.pop().unwrap_or(ReadResult::Eof))
    }

    fn add_history(&mut self, line: &str) {
        self.history.push(line.to_string());
    }

    fn set_keywords(&mut self, keywords: Vec<String>) {
        self.keywords = keywords;
    }
}

fn session(seed: u64) -> Session {
    let grammar = Grammar::new()
        .with_rule(ProductionRule::new(MAIN, ["$gesture", "$sit"]).unwrap())
        .with_rule(
            ProductionRule::new("$gesture", ["show me {gesture meta: slowly}"])
                .unwrap()
                .with_attributes(Attributes::new().with_command("show({gesture})").unwrap()),
        )
        .with_rule(ProductionRule::new("$sit", ["sit down"]).unwrap());
    let catalog = Catalog::new().with_gesture(Gesture::new("waving"));
    Session::new(TaskGenerator::new(grammar, catalog, GeneratorConfig::reproducible(seed)))
}

#[test]
fn guided_task_output() {
    let mut s = session(0);
    let Outcome::Task(task) = s.execute("path Main:0").unwrap() else {
        panic!("expected a task");
    };
    let text = format_task(&task, false);
    assert!(text.starts_with("Show me waving\n"), "{text}");
    assert!(text.contains("waving\n\tSlowly"), "{text}");
    assert!(text.contains("-> $Main"), "{text}");
    assert!(text.ends_with("command: show(waving)"), "{text}");

    let Outcome::Task(task) = s.execute("path Main:1").unwrap() else {
        panic!("expected a task");
    };
    assert!(format_task(&task, false).ends_with("command: (none)"));
    assert_eq!(s.generated(), 2);
}

#[test]
fn unrenderable_command_is_shown() {
    let grammar = Grammar::new().with_rule(
        ProductionRule::new(MAIN, ["wave goodbye"])
            .unwrap()
            .with_attributes(Attributes::new().with_command("wave(to={name})").unwrap()),
    );
    let mut s = Session::new(TaskGenerator::new(grammar, Catalog::new(), GeneratorConfig::reproducible(0)));
    let Outcome::Task(task) = s.execute("").unwrap() else {
        panic!("expected a task");
    };
    let text = format_task(&task, false);
    assert!(text.ends_with("command error: render path not found: {name} (in $Main)"), "{text}");
}

#[test]
fn seed_command_replays() {
    let mut s = session(1);
    let before: Vec<String> = (0..6).map(|_| sentence(&mut s, "")).collect();
    assert!(matches!(s.execute("seed 1").unwrap(), Outcome::Reseeded(1)));
    let after: Vec<String> = (0..6).map(|_| sentence(&mut s, "")).collect();
    assert_eq!(before, after);
}

fn sentence(s: &mut Session, input: &str) -> String {
    match s.execute(input).unwrap() {
        Outcome::Task(task) => task.sentence().to_string(),
        other => panic!("expected a task, got {other:?}"),
    }
}

#[test]
fn keywords_are_rule_names() {
    let s = session(0);
    assert_eq!(s.keywords(), vec!["Main", "gesture", "sit"]);
}

#[test]
fn repl_runs_a_script() {
    let script = Script::new(&["", "path Main:1", "bogus", "path Main:9", "help", "seed 3", "", "quit", "never read"]);
    let mut repl = Repl::with_editor(script, session(0)).without_banner().with_prompt("> ");
    repl.run().unwrap();
    assert_eq!(repl.session().generated(), 3);
    assert!(repl.session().last_task().is_some());
}
