//! Recursive-descent parser for where clauses.
//!
//! ```text
//! clause    := or
//! or        := xor ( OR xor )*
//! xor       := and ( XOR and )*
//! and       := unary ( AND unary )*
//! unary     := NOT unary | primary
//! primary   := '(' clause ')' | condition
//! condition := IDENT OP ( STRING | NUMBER | BOOL | NULL | IDENT )
//! ```
//!
//! A bare identifier on the right of an operator reads as a string.

use cmdgen_foundation::{Error, Result, Value};

use crate::span::Span;

use super::ast::{Condition, ConditionalStatement, Connective};
use super::lexer::{Lexer, Token, TokenKind};

/// Parser for where-clause text.
pub struct Parser<'src> {
    /// The lexer providing tokens.
    lexer: Lexer<'src>,
    /// Current token (lookahead).
    current: Token,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given clause.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self { lexer, current }
    }

    /// Parses the whole clause.
    ///
    /// # Errors
    /// Returns an invalid-where-clause error if the text is empty, malformed,
    /// or has trailing tokens.
    pub fn parse(&mut self) -> Result<ConditionalStatement> {
        if self.current.kind == TokenKind::Eof {
            return Err(self.error("empty where clause"));
        }
        let statement = self.parse_or()?;
        if self.current.kind != TokenKind::Eof {
            return Err(self.error(&format!("unexpected {}", self.current.kind.name())));
        }
        Ok(statement)
    }

    fn parse_or(&mut self) -> Result<ConditionalStatement> {
        let mut lhs = self.parse_xor()?;
        while self.current.kind == TokenKind::Or {
            self.advance();
            let rhs = self.parse_xor()?;
            lhs = ConditionalStatement::compose(lhs, Some(Connective::Or), Some(rhs));
        }
        Ok(lhs)
    }

    fn parse_xor(&mut self) -> Result<ConditionalStatement> {
        let mut lhs = self.parse_and()?;
        while self.current.kind == TokenKind::Xor {
            self.advance();
            let rhs = self.parse_and()?;
            lhs = ConditionalStatement::compose(lhs, Some(Connective::Xor), Some(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<ConditionalStatement> {
        let mut lhs = self.parse_unary()?;
        while self.current.kind == TokenKind::And {
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = ConditionalStatement::compose(lhs, Some(Connective::And), Some(rhs));
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<ConditionalStatement> {
        if self.current.kind == TokenKind::Not {
            self.advance();
            let inner = self.parse_unary()?;
            return Ok(ConditionalStatement::compose(inner, Some(Connective::Not), None));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<ConditionalStatement> {
        match self.current.kind {
            TokenKind::LParen => {
                let open = self.current.span;
                self.advance();
                let inner = self.parse_or()?;
                if self.current.kind != TokenKind::RParen {
                    return Err(self.error_at(open, "unclosed parenthesis"));
                }
                self.advance();
                Ok(inner)
            }
            TokenKind::Ident(_) => self.parse_condition().map(ConditionalStatement::Single),
            _ => Err(self.unexpected("a property name")),
        }
    }

    fn unexpected(&self, expected: &str) -> Error {
        match &self.current.kind {
            TokenKind::Error(msg) => self.error(msg),
            other => self.error(&format!("expected {expected}, found {}", other.name())),
        }
    }

    fn parse_condition(&mut self) -> Result<Condition> {
        let start = self.current.span;
        let TokenKind::Ident(property) = self.current.kind.clone() else {
            return Err(self.error("expected a property name"));
        };
        self.advance();

        let TokenKind::Op(op) = self.current.kind else {
            return Err(self.unexpected("a comparison operator"));
        };
        self.advance();

        let value = match &self.current.kind {
            TokenKind::Str(s) | TokenKind::Ident(s) => Value::from(s.as_str()),
            TokenKind::Number(n) => Value::Number(*n),
            TokenKind::Bool(b) => Value::Bool(*b),
            TokenKind::Null => Value::Null,
            _ => return Err(self.unexpected("a value")),
        };
        let end = self.current.span;
        self.advance();

        Condition::with_span(property, op, value, start.to(end))
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    /// Creates a parse error at the current position.
    fn error(&self, message: &str) -> Error {
        self.error_at(self.current.span, message)
    }

    /// Creates a parse error at a specific span.
    #[allow(clippy::unused_self)]
    fn error_at(&self, span: Span, message: &str) -> Error {
        Error::invalid_where(message, span.start)
    }
}

/// Parses where-clause text.
///
/// # Errors
/// Returns an invalid-where-clause error if the text cannot be parsed.
pub fn parse(source: &str) -> Result<ConditionalStatement> {
    Parser::new(source).parse()
}
