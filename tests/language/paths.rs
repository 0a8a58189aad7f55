//! Integration tests for command path expressions
//!
//! Tests how command templates split into literal text, rule captures,
//! nested commands, and wildcard references.

use cmdgen_foundation::ErrorKind;
use cmdgen_language::{PathExpression, PathPart};

fn parts(source: &str) -> Vec<PathPart> {
    PathExpression::parse(source).unwrap().parts().to_vec()
}

#[test]
fn wildcard_references() {
    assert_eq!(
        parts("deliver({kobject}, {name 1})"),
        vec![
            PathPart::Text("deliver(".into()),
            PathPart::Wildcard {
                name: "kobject".into(),
                id: None
            },
            PathPart::Text(", ".into()),
            PathPart::Wildcard {
                name: "name".into(),
                id: Some(1)
            },
            PathPart::Text(")".into()),
        ]
    );
}

#[test]
fn captures_and_commands() {
    assert_eq!(
        parts("$Main:0 then %deliver"),
        vec![
            PathPart::Capture {
                non_terminal: "$Main".into(),
                index: Some(0)
            },
            PathPart::Text(" then ".into()),
            PathPart::Command {
                non_terminal: "$deliver".into(),
                index: None
            },
        ]
    );
}

#[test]
fn literal_templates() {
    let p = PathExpression::parse("stop()").unwrap();
    assert!(p.is_literal());
    assert_eq!(p.source(), "stop()");
    assert!(!PathExpression::parse("say({answer})").unwrap().is_literal());
}

#[test]
fn unclosed_reference_is_an_error() {
    let err = PathExpression::parse("go({room)").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidPathExpression { .. }));
}
