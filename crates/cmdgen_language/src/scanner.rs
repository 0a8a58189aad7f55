//! Character-level scanning primitives.
//!
//! Everything here is single-pass over the input and works on byte offsets
//! that always sit on `char` boundaries. A backslash makes the next character
//! literal for bracket counting. When scanning parentheses, a balanced
//! `{...}` wildcard span is opaque: brackets and separators inside it do not
//! count.
//!
//! Invalid input is reported with `None`, never with an error, so callers can
//! fall back to treating the text as a literal.

use crate::span::Span;
use crate::token::{RuleToken, RuleTokenKind};

// =============================================================================
// Character Classes
// =============================================================================

/// Returns true for space, tab, newline, carriage return, vertical tab, and form feed.
#[must_use]
pub const fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Returns true for characters allowed after the first one in an identifier.
#[must_use]
pub const fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Returns true for characters allowed to start an identifier.
#[must_use]
pub const fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

// =============================================================================
// Bracket Primitives
// =============================================================================

/// Finds the `close` that balances an already-consumed `open`.
///
/// `from` is the byte offset just past the opening character. Returns the byte
/// offset of the matching closing character.
#[must_use]
pub fn find_closing_pair(text: &str, from: usize, open: char, close: char) -> Option<usize> {
    let mut depth = 1usize;
    let mut chars = text.get(from..)?.char_indices();
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            chars.next();
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(from + i);
            }
        }
    }
    None
}

/// Iterates the characters that matter for bracket counting.
struct Significant<'a> {
    text: &'a str,
    pos: usize,
    opaque_braces: bool,
}

impl<'a> Significant<'a> {
    fn new(text: &'a str, open: char) -> Self {
        Self {
            text,
            pos: 0,
            opaque_braces: open != '{',
        }
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos..).and_then(|rest| rest.chars().next())
    }
}

impl Iterator for Significant<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let at = self.pos;
            let c = self.char_at(at)?;
            self.pos += c.len_utf8();
            match c {
                '\\' => {
                    if let Some(escaped) = self.char_at(self.pos) {
                        self.pos += escaped.len_utf8();
                    }
                }
                '{' if self.opaque_braces => {
                    match find_closing_pair(self.text, self.pos, '{', '}') {
                        Some(close) => self.pos = close + 1,
                        None => return Some((at, c)),
                    }
                }
                _ => return Some((at, c)),
            }
        }
    }
}

/// Returns true if every `close` balances a preceding `open`.
#[must_use]
pub fn is_balanced(text: &str, open: char, close: char) -> bool {
    let mut depth = 0usize;
    for (_, c) in Significant::new(text, open) {
        if c == open {
            depth += 1;
        } else if c == close {
            let Some(next) = depth.checked_sub(1) else {
                return false;
            };
            depth = next;
        }
    }
    depth == 0
}

/// Splits `text` on `sep` characters that are not nested inside brackets.
///
/// Empty segments are kept, so `"a|"` yields `["a", ""]`. Returns `None` when
/// the brackets do not balance.
#[must_use]
pub fn split_respecting(text: &str, open: char, close: char, sep: char) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in Significant::new(text, open) {
        if c == open {
            depth += 1;
        } else if c == close {
            depth = depth.checked_sub(1)?;
        } else if c == sep && depth == 0 {
            parts.push(&text[start..i]);
            start = i + c.len_utf8();
        }
    }
    if depth != 0 {
        return None;
    }
    parts.push(&text[start..]);
    Some(parts)
}

/// A top-level piece of text: either a literal run or a bracketed group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    /// The whole piece, brackets included.
    pub span: Span,
    /// The piece without its outer brackets (same as `span` for literals).
    pub inner: Span,
    /// True if this piece is a bracketed group.
    pub grouped: bool,
}

impl Segment {
    /// Returns the text inside the group (or the literal run).
    #[must_use]
    pub fn inner_text<'a>(&self, source: &'a str) -> &'a str {
        self.inner.text(source)
    }
}

/// Partitions `text` into alternating literal runs and top-level groups.
///
/// Returns `None` when the brackets do not balance.
#[must_use]
pub fn find_ranges(text: &str, open: char, close: char) -> Option<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut group_start = 0;
    for (i, c) in Significant::new(text, open) {
        if c == open {
            if depth == 0 {
                if i > start {
                    segments.push(literal_segment(start, i));
                }
                group_start = i;
            }
            depth += 1;
        } else if c == close {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                let end = i + c.len_utf8();
                segments.push(Segment {
                    span: Span::new(group_start, end),
                    inner: Span::new(group_start + open.len_utf8(), i),
                    grouped: true,
                });
                start = end;
            }
        }
    }
    if depth != 0 {
        return None;
    }
    if start < text.len() {
        segments.push(literal_segment(start, text.len()));
    }
    Some(segments)
}

const fn literal_segment(start: usize, end: usize) -> Segment {
    let span = Span::new(start, end);
    Segment {
        span,
        inner: span,
        grouped: false,
    }
}

// =============================================================================
// Rule Splitting
// =============================================================================

/// Splits a replacement string into literal, `$NonTerminal`, and `{wildcard}` tokens.
///
/// Concatenating the token texts reproduces the input. A `$` not followed by
/// an identifier stays literal text. Returns `None` if a `{` has no matching
/// `}`; an empty input yields an empty token list.
#[must_use]
pub fn split_rule(text: &str) -> Option<Vec<RuleToken<'_>>> {
    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut cursor = Cursor::new(text);

    while let Some(c) = cursor.peek() {
        let at = cursor.pos();
        match c {
            '{' => {
                let close = find_closing_pair(text, at + 1, '{', '}')?;
                push_literal(&mut tokens, text, literal_start, at);
                tokens.push(RuleToken::new(
                    RuleTokenKind::Wildcard,
                    text,
                    Span::new(at, close + 1),
                ));
                cursor.set_pos(close + 1);
                literal_start = close + 1;
            }
            '$' => {
                cursor.bump();
                if cursor.read_identifier().is_some() {
                    push_literal(&mut tokens, text, literal_start, at);
                    tokens.push(RuleToken::new(
                        RuleTokenKind::NonTerminal,
                        text,
                        Span::new(at, cursor.pos()),
                    ));
                    literal_start = cursor.pos();
                }
            }
            '\\' => {
                cursor.bump();
                cursor.bump();
            }
            _ => {
                cursor.bump();
            }
        }
    }
    push_literal(&mut tokens, text, literal_start, text.len());
    Some(tokens)
}

fn push_literal<'a>(tokens: &mut Vec<RuleToken<'a>>, text: &'a str, start: usize, end: usize) {
    if end > start {
        tokens.push(RuleToken::new(
            RuleTokenKind::Literal,
            text,
            Span::new(start, end),
        ));
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// A read head over a string, used by the wildcard and where-clause parsers.
///
/// Failed reads leave the position where it was.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'src> {
    source: &'src str,
    pos: usize,
}

impl<'src> Cursor<'src> {
    /// Creates a cursor at the start of `source`.
    #[must_use]
    pub const fn new(source: &'src str) -> Self {
        Self { source, pos: 0 }
    }

    /// Creates a cursor at byte offset `pos`.
    #[must_use]
    pub const fn at(source: &'src str, pos: usize) -> Self {
        Self { source, pos }
    }

    /// Current byte offset.
    #[must_use]
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// Moves the read head. Offsets past the end clamp to the end.
    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos.min(self.source.len());
    }

    /// The whole text being read.
    #[must_use]
    pub const fn source(&self) -> &'src str {
        self.source
    }

    /// The unread remainder.
    #[must_use]
    pub fn rest(&self) -> &'src str {
        self.source.get(self.pos..).unwrap_or("")
    }

    /// Returns true when nothing is left.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Peeks at the next character.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Peeks `n` characters ahead.
    #[must_use]
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    /// Consumes one character.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consumes `c` if it is next.
    pub fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consumes `s` if the remainder starts with it.
    pub fn eat_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Consumes the ASCII word `keyword`, ignoring case, when it is not
    /// immediately followed by another identifier character.
    pub fn eat_keyword(&mut self, keyword: &str) -> bool {
        let rest = self.rest();
        let Some(head) = rest.get(..keyword.len()) else {
            return false;
        };
        if !head.eq_ignore_ascii_case(keyword) {
            return false;
        }
        let boundary = rest[keyword.len()..]
            .chars()
            .next()
            .is_none_or(|c| !is_identifier_char(c));
        if boundary {
            self.pos += keyword.len();
        }
        boundary
    }

    /// Skips whitespace.
    pub fn skip_spaces(&mut self) {
        self.read_while(is_space);
    }

    /// Consumes characters while `pred` holds and returns them.
    pub fn read_while(&mut self, mut pred: impl FnMut(char) -> bool) -> &'src str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.source[start..self.pos]
    }

    /// Reads a run of lowercase ASCII letters (possibly empty).
    pub fn read_lower_word(&mut self) -> &'src str {
        self.read_while(|c| c.is_ascii_lowercase())
    }

    /// Reads a C-like identifier.
    pub fn read_identifier(&mut self) -> Option<&'src str> {
        if !self.peek().is_some_and(is_identifier_start) {
            return None;
        }
        Some(self.read_while(is_identifier_char))
    }

    /// Reads an unsigned 16-bit integer of at most five digits.
    pub fn read_u16(&mut self) -> Option<u16> {
        let start = self.pos;
        let digits = self.read_while(|c| c.is_ascii_digit());
        let value = (1..=5)
            .contains(&digits.len())
            .then(|| digits.parse::<u16>().ok())
            .flatten();
        if value.is_none() {
            self.pos = start;
        }
        value
    }

    /// Reads a decimal number with optional sign, fraction, and exponent.
    pub fn read_number(&mut self) -> Option<f64> {
        let start = self.pos;
        let value = self.scan_number().and_then(|()| self.source[start..self.pos].parse().ok());
        if value.is_none() {
            self.pos = start;
        }
        value
    }

    fn scan_number(&mut self) -> Option<()> {
        self.eat('-');
        let int_digits = self.read_while(|c| c.is_ascii_digit()).len();
        if self.eat('.') {
            if self.read_while(|c| c.is_ascii_digit()).is_empty() {
                return None;
            }
        } else if int_digits == 0 {
            return None;
        }
        if self.eat('e') || self.eat('E') {
            if !self.eat('+') {
                self.eat('-');
            }
            let exp = self.read_while(|c| c.is_ascii_digit()).len();
            if !(1..=3).contains(&exp) {
                return None;
            }
        }
        Some(())
    }

    /// Reads a string delimited by `"` or `'`.
    ///
    /// A backslash escapes the delimiter and itself; other escapes are kept
    /// verbatim.
    pub fn read_quoted(&mut self) -> Option<String> {
        let start = self.pos;
        let quote = self.peek().filter(|c| matches!(c, '"' | '\''))?;
        self.bump();
        let mut out = String::new();
        loop {
            let Some(c) = self.bump() else {
                self.pos = start;
                return None;
            };
            match c {
                c if c == quote => return Some(out),
                '\\' => {
                    let Some(next) = self.bump() else {
                        self.pos = start;
                        return None;
                    };
                    if next != quote && next != '\\' {
                        out.push('\\');
                    }
                    out.push(next);
                }
                c => out.push(c),
            }
        }
    }

    /// With the read head just past an `open`, moves it onto the matching
    /// `close`. If there is none, moves to the end and returns false.
    pub fn seek_closing(&mut self, open: char, close: char) -> bool {
        match find_closing_pair(self.source, self.pos, open, close) {
            Some(at) => {
                self.pos = at;
                true
            }
            None => {
                self.pos = self.source.len();
                false
            }
        }
    }
}
