//! Command path expressions.
//!
//! A path expression is a template attached to a production rule. When the
//! rule's subtree is rendered as a command, each placeholder is replaced:
//!
//! - `$Name[:n]` - rendered text of the descendant `$Name` rule node
//! - `%Name[:n]` - command of the descendant `$Name` rule node
//! - `{name[ id]}` - value bound to a wildcard
//!
//! A backslash makes the next character literal. `n` is a zero-based index
//! among matches in depth-first order.

use std::fmt;

use cmdgen_foundation::{Error, Result};

use crate::scanner::{Cursor, find_closing_pair};

/// One piece of a path expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathPart {
    /// Literal text.
    Text(String),
    /// `$Name[:n]`
    Capture {
        /// Non-terminal name including the `$`.
        non_terminal: String,
        /// Which match to take.
        index: Option<usize>,
    },
    /// `%Name[:n]`
    Command {
        /// Non-terminal name including the `$`.
        non_terminal: String,
        /// Which match to take.
        index: Option<usize>,
    },
    /// `{name[ id]}`
    Wildcard {
        /// Wildcard name.
        name: String,
        /// Optional explicit id.
        id: Option<u32>,
    },
}

/// A parsed command template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathExpression {
    source: String,
    parts: Vec<PathPart>,
}

impl PathExpression {
    /// Parses a template.
    ///
    /// # Errors
    /// Returns an invalid-path-expression error for an unclosed `{` or a
    /// malformed wildcard reference.
    pub fn parse(source: &str) -> Result<Self> {
        let mut parts = Vec::new();
        let mut text = String::new();
        let mut cursor = Cursor::new(source);

        while let Some(c) = cursor.peek() {
            let at = cursor.pos();
            match c {
                '\\' => {
                    cursor.bump();
                    if let Some(escaped) = cursor.bump() {
                        text.push(escaped);
                    }
                }
                '$' | '%' => {
                    cursor.bump();
                    let Some(ident) = cursor.read_identifier() else {
                        text.push(c);
                        continue;
                    };
                    let index = read_index(&mut cursor);
                    flush(&mut parts, &mut text);
                    let non_terminal = format!("${ident}");
                    parts.push(if c == '$' {
                        PathPart::Capture { non_terminal, index }
                    } else {
                        PathPart::Command { non_terminal, index }
                    });
                }
                '{' => {
                    let close = find_closing_pair(source, at + 1, '{', '}')
                        .ok_or_else(|| Error::invalid_path("unclosed `{`", at))?;
                    let part = parse_wildcard_ref(&source[at + 1..close], at)?;
                    flush(&mut parts, &mut text);
                    parts.push(part);
                    cursor.set_pos(close + 1);
                }
                _ => {
                    cursor.bump();
                    text.push(c);
                }
            }
        }
        flush(&mut parts, &mut text);

        Ok(Self {
            source: source.to_string(),
            parts,
        })
    }

    /// The template text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed pieces, in order.
    #[must_use]
    pub fn parts(&self) -> &[PathPart] {
        &self.parts
    }

    /// Returns true if the template has no placeholders.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.parts.iter().all(|p| matches!(p, PathPart::Text(_)))
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

fn flush(parts: &mut Vec<PathPart>, text: &mut String) {
    if !text.is_empty() {
        parts.push(PathPart::Text(std::mem::take(text)));
    }
}

fn read_index(cursor: &mut Cursor<'_>) -> Option<usize> {
    let mut ahead = *cursor;
    if !ahead.eat(':') {
        return None;
    }
    let index = ahead.read_u16()?;
    *cursor = ahead;
    Some(usize::from(index))
}

fn parse_wildcard_ref(body: &str, offset: usize) -> Result<PathPart> {
    let mut cursor = Cursor::new(body);
    cursor.skip_spaces();
    let name = cursor.read_lower_word();
    if name.is_empty() {
        return Err(Error::invalid_path("expected a wildcard name", offset + 1));
    }
    cursor.skip_spaces();
    let id = cursor.read_u16().map(u32::from);
    cursor.skip_spaces();
    if !cursor.is_eof() {
        return Err(Error::invalid_path(
            format!("unexpected `{}` in wildcard reference", cursor.rest()),
            offset + 1 + cursor.pos(),
        ));
    }
    Ok(PathPart::Wildcard {
        name: name.to_string(),
        id,
    })
}
