//! The where-clause query language.
//!
//! Clauses compare entity properties with typed literals and combine the
//! comparisons with `AND`, `OR`, `XOR`, and `NOT`:
//!
//! ```text
//! Category = "drinks" AND NOT canPour = false
//! ```

pub mod ast;
mod eval;
pub mod lexer;
pub mod parser;

pub use ast::{CompareOp, Condition, ConditionalStatement, Connective};
pub use parser::parse;

use crate::scanner::{Cursor, is_identifier_char};

/// Reads one clause from inside a wildcard body.
///
/// The clause ends at an unmatched `}`, at a top-level `meta` keyword followed
/// by `:`, or at the end of input. Quoted strings and nested `{...}` spans are
/// skipped whole. Returns the trimmed clause text.
pub fn fetch<'a>(cursor: &mut Cursor<'a>) -> &'a str {
    let source = cursor.source();
    let start = cursor.pos();
    let mut depth = 0usize;
    let mut at_word_start = true;

    while let Some(c) = cursor.peek() {
        match c {
            '"' | '\'' => {
                if cursor.read_quoted().is_none() {
                    cursor.bump();
                }
                at_word_start = true;
                continue;
            }
            '\\' => {
                cursor.bump();
                cursor.bump();
                at_word_start = false;
                continue;
            }
            '{' => depth += 1,
            '}' => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            'm' | 'M' if depth == 0 && at_word_start && starts_metadata(*cursor) => break,
            _ => {}
        }
        at_word_start = !is_identifier_char(c);
        cursor.bump();
    }

    source[start..cursor.pos()].trim()
}

fn starts_metadata(mut ahead: Cursor<'_>) -> bool {
    if !ahead.eat_keyword("meta") {
        return false;
    }
    ahead.skip_spaces();
    ahead.peek() == Some(':')
}
