//! Tokens of a replacement string.
//!
//! Tokens are the output of [`split_rule`](crate::scanner::split_rule) and
//! the input to tree construction.

use std::fmt;

use crate::span::Span;

/// One piece of a replacement string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleToken<'src> {
    /// What this token is.
    pub kind: RuleTokenKind,
    /// The exact source text of the token.
    pub text: &'src str,
    /// Source location of this token.
    pub span: Span,
}

impl<'src> RuleToken<'src> {
    /// Creates a new token over `source[span]`.
    #[must_use]
    pub fn new(kind: RuleTokenKind, source: &'src str, span: Span) -> Self {
        Self {
            kind,
            text: span.text(source),
            span,
        }
    }

    /// Returns true if this token references a non-terminal.
    #[must_use]
    pub const fn is_non_terminal(&self) -> bool {
        matches!(self.kind, RuleTokenKind::NonTerminal)
    }

    /// Returns true if this token is a `{...}` wildcard span.
    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        matches!(self.kind, RuleTokenKind::Wildcard)
    }
}

/// Token types in a replacement string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleTokenKind {
    /// Plain text.
    Literal,
    /// `$Identifier`
    NonTerminal,
    /// A balanced `{...}` span.
    Wildcard,
}

impl fmt::Display for RuleTokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal => write!(f, "literal"),
            Self::NonTerminal => write!(f, "non-terminal"),
            Self::Wildcard => write!(f, "wildcard"),
        }
    }
}
