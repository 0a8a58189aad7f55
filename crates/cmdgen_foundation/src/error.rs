//! Error types for the command generator.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Syntax-level primitives (scanner, branch expander) report invalid input
//! with `Option`; everything above them reports through [`Error`].

use std::fmt;

use thiserror::Error;

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for generator operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}{}", context_suffix(.context.as_ref()))]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

fn context_suffix(context: Option<&ErrorContext>) -> String {
    match context {
        Some(ctx) if !ctx.is_empty() => format!(" ({ctx})"),
        _ => String::new(),
    }
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Pushes a frame onto the error's context, creating one if needed.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        let ctx = self.context.take().unwrap_or_default();
        self.context = Some(ctx.with_frame(frame));
        self
    }

    /// Creates an unbalanced brackets error.
    #[must_use]
    pub fn unbalanced(text: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnbalancedBrackets(text.into()))
    }

    /// Creates an invalid wildcard error.
    #[must_use]
    pub fn invalid_wildcard(text: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidWildcard(text.into()))
    }

    /// Creates an invalid where-clause error.
    #[must_use]
    pub fn invalid_where(message: impl Into<String>, position: usize) -> Self {
        Self::new(ErrorKind::InvalidWhereClause {
            message: message.into(),
            position,
        })
    }

    /// Creates an invalid path-expression error.
    #[must_use]
    pub fn invalid_path(message: impl Into<String>, position: usize) -> Self {
        Self::new(ErrorKind::InvalidPathExpression {
            message: message.into(),
            position,
        })
    }

    /// Creates an invalid rule-line error.
    #[must_use]
    pub fn invalid_rule(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRule(message.into()))
    }

    /// Creates an unknown non-terminal error.
    #[must_use]
    pub fn unknown_non_terminal(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownNonTerminal(name.into()))
    }

    /// Creates an alternative-out-of-range error.
    #[must_use]
    pub fn alternative_out_of_range(non_terminal: impl Into<String>, index: usize, count: usize) -> Self {
        Self::new(ErrorKind::AlternativeOutOfRange {
            non_terminal: non_terminal.into(),
            index,
            count,
        })
    }

    /// Creates an ambiguous render path error.
    #[must_use]
    pub fn ambiguous_render_path(token: impl Into<String>) -> Self {
        Self::new(ErrorKind::AmbiguousRenderPath(token.into()))
    }

    /// Creates a render path not found error.
    #[must_use]
    pub fn render_path_not_found(token: impl Into<String>) -> Self {
        Self::new(ErrorKind::RenderPathNotFound(token.into()))
    }

    /// Creates a pool exhausted error.
    #[must_use]
    pub fn pool_exhausted(kind: impl Into<String>, keycode: impl Into<String>) -> Self {
        Self::new(ErrorKind::PoolExhausted {
            kind: kind.into(),
            keycode: keycode.into(),
        })
    }

    /// Creates a recursion limit error.
    #[must_use]
    pub fn recursion_limit(limit: usize, non_terminal: impl Into<String>) -> Self {
        Self::new(ErrorKind::RecursionLimit {
            limit,
            non_terminal: non_terminal.into(),
        })
    }

    /// Creates an I/O error wrapper.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io(message.into()))
    }

    /// Creates a serialization error wrapper.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns true if retrying the generation with fresh pools may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::PoolExhausted { .. } | ErrorKind::RecursionLimit { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Brackets or parentheses do not balance.
    #[error("unbalanced brackets in: {0}")]
    UnbalancedBrackets(String),

    /// A `{...}` span could not be parsed as a wildcard.
    #[error("invalid wildcard: {0}")]
    InvalidWildcard(String),

    /// Where-clause text failed to parse.
    #[error("invalid where clause at {position}: {message}")]
    InvalidWhereClause {
        /// Description of the problem.
        message: String,
        /// Byte offset into the clause text.
        position: usize,
    },

    /// Command path expression failed to parse.
    #[error("invalid path expression at {position}: {message}")]
    InvalidPathExpression {
        /// Description of the problem.
        message: String,
        /// Byte offset into the expression.
        position: usize,
    },

    /// A rule line is malformed.
    #[error("invalid rule: {0}")]
    InvalidRule(String),

    /// A non-terminal has no rules.
    #[error("unknown non-terminal: {0}")]
    UnknownNonTerminal(String),

    /// A guided path asked for an alternative that does not exist.
    #[error("alternative {index} out of range for {non_terminal} ({count} alternatives)")]
    AlternativeOutOfRange {
        /// The non-terminal being expanded.
        non_terminal: String,
        /// The requested alternative index.
        index: usize,
        /// Number of alternatives available.
        count: usize,
    },

    /// More than one subtree matches a render path token.
    #[error("ambiguous render path: {0}")]
    AmbiguousRenderPath(String),

    /// No subtree matches a render path token.
    #[error("render path not found: {0}")]
    RenderPathNotFound(String),

    /// No candidate satisfied a wildcard.
    #[error("no {kind} candidate left for {keycode}")]
    PoolExhausted {
        /// The entity kind being bound.
        kind: String,
        /// The wildcard keycode.
        keycode: String,
    },

    /// A combinatorics input sequence was empty.
    #[error("cannot enumerate over an empty sequence")]
    EmptySequence,

    /// Expansion exceeded the recursion ceiling.
    #[error("recursion limit ({limit}) exceeded while expanding {non_terminal}")]
    RecursionLimit {
        /// The configured limit.
        limit: usize,
        /// The non-terminal being expanded when the limit tripped.
        non_terminal: String,
    },

    /// I/O failure.
    #[error("i/o error: {0}")]
    Io(String),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Source file or grammar name.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<usize>,
    /// Column number in source.
    pub column: Option<usize>,
    /// Chain of non-terminals or files being processed.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Sets just the line.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }

    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.line.is_none() && self.stack.is_empty()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote = false;
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            wrote = true;
        }
        match (self.line, self.column) {
            (Some(line), Some(col)) => {
                write!(f, "{}{line}:{col}", if wrote { ":" } else { "at " })?;
                wrote = true;
            }
            (Some(line), None) => {
                write!(f, "{}{line}", if wrote { ":" } else { "at line " })?;
                wrote = true;
            }
            _ => {}
        }
        if !self.stack.is_empty() {
            if wrote {
                write!(f, " ")?;
            }
            write!(f, "in {}", self.stack.join(" <- "))?;
        }
        Ok(())
    }
}
