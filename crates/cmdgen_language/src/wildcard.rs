//! Wildcard placeholder syntax.
//!
//! A wildcard is a `{...}` span in rule text:
//!
//! ```text
//! { name ['?'] [type] [id] ['where' clause] ['meta' ':' text] }
//! ```
//!
//! `name` and `type` are lowercase words, `id` is an unsigned integer, the
//! where clause runs until `meta:` or the closing brace, and the metadata runs
//! to the closing brace. Wildcards nested in the metadata or where text are
//! parsed too and attached as children.

use std::fmt;

use crate::scanner::{Cursor, find_closing_pair};
use crate::span::Span;
use crate::text::capitalize;
use crate::where_clause;

/// First id handed out to wildcards that carry none.
pub const FIRST_AUTO_ID: u32 = 1000;

/// The identity shared by every occurrence that must bind to the same value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Keycode {
    /// Wildcard name.
    pub name: String,
    /// Explicit or automatic id.
    pub id: u32,
}

impl Keycode {
    /// Creates a keycode.
    #[must_use]
    pub fn new(name: impl Into<String>, id: u32) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}

impl fmt::Display for Keycode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:04}", self.name, self.id)
    }
}

/// Where a nested wildcard was found inside its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NestedIn {
    /// Inside the parent's metadata text.
    Metadata,
    /// Inside the parent's where clause.
    Where,
}

/// One parsed `{...}` occurrence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextWildcard {
    /// Lowercase name, e.g. `object`.
    pub name: String,
    /// Set by a `?` after the name: render the obfuscated value.
    pub obfuscated: bool,
    /// Optional type tag, e.g. `male` in `{name male}`.
    pub type_tag: Option<String>,
    /// Explicit id, or one assigned by the parser.
    pub id: u32,
    /// True if the id was written in the source.
    pub explicit_id: bool,
    /// Raw where-clause text.
    pub where_clause: Option<String>,
    /// Raw metadata text.
    pub metadata: Option<String>,
    /// The full `{...}` source text.
    pub source: String,
    /// Location in the text this wildcard was parsed from.
    pub span: Span,
    /// For nested wildcards, which part of the parent holds them.
    pub nested_in: Option<NestedIn>,
    /// Wildcards nested in the metadata and where text, in source order.
    pub children: Vec<TextWildcard>,
}

impl TextWildcard {
    /// Parses a single wildcard that starts at the beginning of `text`,
    /// numbering id-less wildcards from [`FIRST_AUTO_ID`].
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        WildcardParser::new().parse_at(text, 0)
    }

    /// The binding identity of this occurrence.
    #[must_use]
    pub fn keycode(&self) -> Keycode {
        Keycode::new(self.name.clone(), self.id)
    }

    /// Returns true for `{pron ...}` wildcards.
    #[must_use]
    pub fn is_pronoun(&self) -> bool {
        self.name == "pron"
    }

    /// This wildcard followed by all of its descendants, depth-first.
    #[must_use]
    pub fn flatten(&self) -> Vec<&TextWildcard> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.flatten());
        }
        out
    }

    /// Descendants first, then this wildcard.
    #[must_use]
    pub fn flatten_post_order(&self) -> Vec<&TextWildcard> {
        let mut out = Vec::new();
        for child in &self.children {
            out.extend(child.flatten_post_order());
        }
        out.push(self);
        out
    }

    /// Metadata with nested wildcards replaced by `value_of(child)`, trimmed
    /// and capitalized. `None` if there is no metadata.
    pub fn rendered_metadata<F>(&self, value_of: F) -> Option<String>
    where
        F: FnMut(&TextWildcard) -> Option<String>,
    {
        let metadata = self.metadata.as_deref()?;
        let spliced = self.splice(metadata, NestedIn::Metadata, value_of);
        Some(capitalize(spliced.trim()))
    }

    /// Where clause with nested wildcards replaced by `value_of(child)`.
    pub fn rendered_where<F>(&self, value_of: F) -> Option<String>
    where
        F: FnMut(&TextWildcard) -> Option<String>,
    {
        let clause = self.where_clause.as_deref()?;
        Some(self.splice(clause, NestedIn::Where, value_of))
    }

    fn splice<F>(&self, text: &str, part: NestedIn, mut value_of: F) -> String
    where
        F: FnMut(&TextWildcard) -> Option<String>,
    {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for child in self.children.iter().filter(|c| c.nested_in == Some(part)) {
            let Some(value) = value_of(child) else {
                continue;
            };
            if child.span.start < last || child.span.end > text.len() {
                continue;
            }
            out.push_str(&text[last..child.span.start]);
            out.push_str(&value);
            last = child.span.end;
        }
        out.push_str(&text[last..]);
        out
    }
}

impl fmt::Display for TextWildcard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// Parses wildcards, handing out automatic ids.
///
/// One parser is used per generated tree so that automatic ids are unique
/// within the tree and reproducible across runs.
#[derive(Debug, Clone)]
pub struct WildcardParser {
    next_auto_id: u32,
}

impl Default for WildcardParser {
    fn default() -> Self {
        Self::new()
    }
}

impl WildcardParser {
    /// Creates a parser whose first automatic id is [`FIRST_AUTO_ID`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_auto_id: FIRST_AUTO_ID,
        }
    }

    /// Parses the wildcard whose `{` is at byte offset `pos` of `text`.
    ///
    /// Returns `None` if there is no `{` at `pos`, the name is missing, or the
    /// closing brace is missing.
    pub fn parse_at(&mut self, text: &str, pos: usize) -> Option<TextWildcard> {
        let mut cursor = Cursor::at(text, pos);
        if !cursor.eat('{') {
            return None;
        }
        let body_start = cursor.pos();
        let close = find_closing_pair(text, body_start, '{', '}')?;
        let body = &text[..close];

        let mut cursor = Cursor::at(body, body_start);
        cursor.skip_spaces();
        let name = cursor.read_lower_word();
        if name.is_empty() {
            return None;
        }

        cursor.skip_spaces();
        let obfuscated = cursor.eat('?');

        let type_tag = read_type(&mut cursor);

        cursor.skip_spaces();
        let explicit = cursor.read_u16().map(u32::from);

        cursor.skip_spaces();
        let where_clause = cursor
            .eat_keyword("where")
            .then(|| where_clause::fetch(&mut cursor).to_string());

        cursor.skip_spaces();
        let metadata = read_metadata(&mut cursor).map(str::to_string);

        let id = explicit.unwrap_or_else(|| self.next_id());
        let mut wildcard = TextWildcard {
            name: name.to_string(),
            obfuscated,
            type_tag,
            id,
            explicit_id: explicit.is_some(),
            where_clause,
            metadata,
            source: text[pos..=close].to_string(),
            span: Span::new(pos, close + 1),
            nested_in: None,
            children: Vec::new(),
        };

        if let Some(metadata) = wildcard.metadata.clone() {
            wildcard
                .children
                .extend(self.parse_nested(&metadata, NestedIn::Metadata));
        }
        if let Some(clause) = wildcard.where_clause.clone() {
            wildcard
                .children
                .extend(self.parse_nested(&clause, NestedIn::Where));
        }
        Some(wildcard)
    }

    /// Finds and parses every top-level wildcard in `text`.
    pub fn parse_all(&mut self, text: &str) -> Vec<TextWildcard> {
        let mut found = Vec::new();
        let mut pos = 0;
        while let Some(offset) = text.get(pos..).and_then(|rest| rest.find('{')) {
            let start = pos + offset;
            if let Some(wildcard) = self.parse_at(text, start) {
                pos = wildcard.span.end;
                found.push(wildcard);
            } else {
                pos = start + 1;
            }
        }
        found
    }

    fn parse_nested(&mut self, text: &str, part: NestedIn) -> Vec<TextWildcard> {
        let mut children = self.parse_all(text);
        for child in &mut children {
            child.nested_in = Some(part);
        }
        children
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_auto_id;
        self.next_auto_id = self.next_auto_id.saturating_add(1);
        id
    }
}

fn read_type(cursor: &mut Cursor<'_>) -> Option<String> {
    cursor.skip_spaces();
    let before = cursor.pos();
    let word = cursor.read_lower_word();
    if word.is_empty() {
        return None;
    }
    if word == "meta" || word == "where" {
        cursor.set_pos(before);
        return None;
    }
    Some(word.to_string())
}

/// Reads `meta: text` up to the end of the cursor's source.
fn read_metadata<'a>(cursor: &mut Cursor<'a>) -> Option<&'a str> {
    if !cursor.eat_keyword("meta") {
        return None;
    }
    cursor.skip_spaces();
    if !cursor.eat(':') {
        return None;
    }
    Some(cursor.rest())
}
