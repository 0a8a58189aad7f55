//! Integration tests for wildcard parsing
//!
//! Tests the `{name [?] [type] [id] [where ...] [meta: ...]}` body forms,
//! nesting, and identity.

use cmdgen_language::{FIRST_AUTO_ID, Keycode, NestedIn, TextWildcard, WildcardParser, split_rule};

fn parse(text: &str) -> TextWildcard {
    TextWildcard::parse(text).unwrap()
}

#[test]
fn every_part_of_the_body() {
    let w = parse("{kobject ? 3 where Category = \"fruits\" meta: on the table}");
    assert_eq!(w.name, "kobject");
    assert!(w.obfuscated);
    assert_eq!(w.type_tag, None);
    assert_eq!(w.id, 3);
    assert!(w.explicit_id);
    assert_eq!(w.where_clause.as_deref(), Some("Category = \"fruits\""));
    assert_eq!(w.metadata.as_deref(), Some(" on the table"));
}

#[test]
fn type_tags() {
    assert_eq!(parse("{name female}").type_tag.as_deref(), Some("female"));
    assert_eq!(parse("{location placement 2}").type_tag.as_deref(), Some("placement"));

    let pron = parse("{pron pos}");
    assert!(pron.is_pronoun());
    assert_eq!(pron.type_tag.as_deref(), Some("pos"));
    assert!(!parse("{name}").is_pronoun());
}

#[test]
fn keycodes_identify_occurrences() {
    let w = parse("{room 7}");
    assert_eq!(w.keycode(), Keycode::new("room", 7));
    assert_eq!(w.keycode().to_string(), "room0007");
}

#[test]
fn auto_ids_are_unique_within_a_rule() {
    let line = "bring the {object} to the {object} in the {room 1}";
    let mut parser = WildcardParser::new();
    let found = parser.parse_all(line);
    let ids: Vec<u32> = found.iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![FIRST_AUTO_ID, FIRST_AUTO_ID + 1, 1]);
    assert!(found.iter().all(|w| w.span.text(line).starts_with('{')));
}

#[test]
fn nested_wildcards_are_children() {
    let w = parse("{question meta: ask {name 1} about the {object where Category=\"{category 2}\"}}");
    assert_eq!(w.children.len(), 2);
    assert!(w.children.iter().all(|c| c.nested_in == Some(NestedIn::Metadata)));

    let object = &w.children[1];
    assert_eq!(object.children.len(), 1);
    assert_eq!(object.children[0].nested_in, Some(NestedIn::Where));

    let names: Vec<&str> = w.flatten().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["question", "name", "object", "category"]);
}

#[test]
fn metadata_renders_with_bound_children() {
    let w = parse("{name 1 meta: {pron} wears a hat}");
    let text = w
        .rendered_metadata(|c| c.is_pronoun().then(|| "she".to_string()))
        .unwrap();
    assert_eq!(text, "She wears a hat");
}

#[test]
fn tokens_carry_whole_wildcards() {
    let tokens = split_rule("find {name meta: {pron} is near the {beacon}} now").unwrap();
    let wildcard = tokens.iter().find(|t| t.is_wildcard()).unwrap();
    let w = parse(wildcard.text);
    assert_eq!(w.name, "name");
    assert_eq!(w.children.len(), 2);
}

#[test]
fn invalid_bodies() {
    for bad in ["{}", "{Room}", "{room", "{3}"] {
        assert!(TextWildcard::parse(bad).is_none(), "{bad}");
    }
}
