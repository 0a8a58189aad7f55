//! Expansion of parenthesized OR-branches into flat alternatives.
//!
//! `"go to the (kitchen | bedroom)"` expands to `"go to the kitchen"` and
//! `"go to the bedroom"`. Groups nest, and a top-level `|` splits the whole
//! string. Wildcard spans are left untouched.

use crate::combinatorics::combinations;
use crate::scanner::{find_ranges, is_balanced, split_respecting};

/// Expands every branch of `sentence`.
///
/// Returns `None` if the parentheses do not balance. Results are trimmed,
/// listed in left-to-right odometer order, and free of duplicates.
#[must_use]
pub fn expand_branches(sentence: &str) -> Option<Vec<String>> {
    if !is_balanced(sentence, '(', ')') {
        return None;
    }
    let mut results = Vec::new();
    expand_into(sentence, &mut results)?;
    Some(results)
}

/// Returns true if `sentence` contains an unescaped top-level group or bar.
#[must_use]
pub fn has_branches(sentence: &str) -> bool {
    find_ranges(sentence, '(', ')').is_some_and(|segments| segments.iter().any(|s| s.grouped))
        || split_respecting(sentence, '(', ')', '|').is_some_and(|parts| parts.len() > 1)
}

fn expand_into(sentence: &str, results: &mut Vec<String>) -> Option<()> {
    for alternative in split_respecting(sentence, '(', ')', '|')? {
        let mut choices = Vec::new();
        for segment in find_ranges(alternative, '(', ')')? {
            let text = segment.inner_text(alternative);
            if segment.grouped {
                let mut inner = Vec::new();
                expand_into(text, &mut inner)?;
                choices.push(inner);
            } else {
                choices.push(vec![text.to_string()]);
            }
        }
        for combination in combinations(choices).ok()? {
            let joined = combination.concat();
            let trimmed = joined.trim();
            if !results.iter().any(|r| r == trimmed) {
                results.push(trimmed.to_string());
            }
        }
    }
    Some(())
}
