//! Integration tests for branch expansion and rule tokenizing
//!
//! Tests how a rule line with `( | )` groups turns into plain alternatives,
//! and how each alternative splits into literal, non-terminal, and wildcard
//! tokens.

use cmdgen_language::{RuleTokenKind, combinations, expand_branches, has_branches, split_rule};
use proptest::prelude::*;

fn expand(s: &str) -> Vec<String> {
    expand_branches(s).unwrap()
}

// =============================================================================
// Expansion
// =============================================================================

#[test]
fn groups_expand_in_order() {
    assert_eq!(
        expand("(a | b) c (d | e)"),
        vec!["a c d", "a c e", "b c d", "b c e"]
    );
}

#[test]
fn grammar_style_line() {
    let got = expand("$vbbring me the {object} from the (kitchen | bedroom)");
    assert_eq!(
        got,
        vec![
            "$vbbring me the {object} from the kitchen",
            "$vbbring me the {object} from the bedroom",
        ]
    );
}

#[test]
fn braces_are_not_groups() {
    assert!(!has_branches("{object meta: (fragile | heavy)}"));
    let got = expand("take {object meta: a | b}");
    assert_eq!(got, vec!["take {object meta: a | b}"]);
}

#[test]
fn unbalanced_lines_do_not_expand() {
    for bad in ["(", "a (b | c", "a b) c"] {
        assert_eq!(expand_branches(bad), None, "{bad}");
    }
}

#[test]
fn duplicates_are_dropped() {
    assert_eq!(expand("(a | a) b"), vec!["a b"]);
}

// =============================================================================
// Tokenizing
// =============================================================================

#[test]
fn tokens_cover_the_alternative() {
    let line = "$greet the person {name 1} in the {room 2}";
    let tokens = split_rule(line).unwrap();
    let joined: String = tokens.iter().map(|t| t.text).collect();
    assert_eq!(joined, line);

    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            RuleTokenKind::NonTerminal,
            RuleTokenKind::Literal,
            RuleTokenKind::Wildcard,
            RuleTokenKind::Literal,
            RuleTokenKind::Wildcard,
        ]
    );
    assert!(tokens[0].is_non_terminal());
    assert!(tokens[2].is_wildcard());
}

#[test]
fn odometer_order_of_choices() {
    let product: Vec<_> = combinations(vec![vec!["bring", "take"], vec!["it", "them"]])
        .unwrap()
        .collect();
    assert_eq!(
        product,
        vec![
            vec!["bring", "it"],
            vec!["bring", "them"],
            vec!["take", "it"],
            vec!["take", "them"],
        ]
    );
}

#[test]
fn empty_choice_list_is_an_error() {
    assert!(combinations(vec![vec![1], Vec::new()]).is_err());
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn expansion_count_is_product_of_group_sizes(
        groups in prop::collection::vec(prop::collection::hash_set("[a-z]{1,4}", 1..4), 1..4)
    ) {
        let line = groups
            .iter()
            .map(|g| format!("({})", g.iter().cloned().collect::<Vec<_>>().join(" | ")))
            .collect::<Vec<_>>()
            .join(" x ");
        let expected: usize = groups.iter().map(std::collections::HashSet::len).product();
        prop_assert_eq!(expand_branches(&line).unwrap().len(), expected);
    }

    #[test]
    fn expanded_alternatives_have_no_groups(words in prop::collection::vec("[a-z]{1,5}", 2..5)) {
        let line = format!("go ({}) now", words.join(" | "));
        for alt in expand_branches(&line).unwrap() {
            prop_assert!(!has_branches(&alt));
        }
    }
}
