//! Lexer for where clauses.

use crate::scanner::{Cursor, is_identifier_char};
use crate::span::Span;

use super::ast::CompareOp;

/// A token from a where clause.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The type and value of this token.
    pub kind: TokenKind,
    /// Source location of this token.
    pub span: Span,
}

/// Token types in a where clause.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// Property name or bare word.
    Ident(String),
    /// Quoted string literal.
    Str(String),
    /// Numeric literal.
    Number(f64),
    /// `true` / `false`
    Bool(bool),
    /// `null`
    Null,
    /// Comparison operator.
    Op(CompareOp),
    /// `AND`
    And,
    /// `OR`
    Or,
    /// `XOR`
    Xor,
    /// `NOT`
    Not,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// End of input.
    Eof,
    /// Unrecognized input.
    Error(String),
}

impl TokenKind {
    /// Human-readable name for error messages.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Ident(s) => format!("identifier `{s}`"),
            Self::Str(_) => "string".to_string(),
            Self::Number(_) => "number".to_string(),
            Self::Bool(_) => "boolean".to_string(),
            Self::Null => "null".to_string(),
            Self::Op(op) => format!("`{op}`"),
            Self::And => "AND".to_string(),
            Self::Or => "OR".to_string(),
            Self::Xor => "XOR".to_string(),
            Self::Not => "NOT".to_string(),
            Self::LParen => "`(`".to_string(),
            Self::RParen => "`)`".to_string(),
            Self::Eof => "end of clause".to_string(),
            Self::Error(msg) => msg.clone(),
        }
    }
}

/// Lexer over where-clause text.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given clause.
    #[must_use]
    pub const fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Returns the next token.
    pub fn next_token(&mut self) -> Token {
        self.cursor.skip_spaces();
        let start = self.cursor.pos();

        let kind = match self.cursor.peek() {
            None => TokenKind::Eof,
            Some('(') => {
                self.cursor.bump();
                TokenKind::LParen
            }
            Some(')') => {
                self.cursor.bump();
                TokenKind::RParen
            }
            Some('"' | '\'') => match self.cursor.read_quoted() {
                Some(s) => TokenKind::Str(s),
                None => {
                    self.cursor.set_pos(self.cursor.source().len());
                    TokenKind::Error("unterminated string".to_string())
                }
            },
            Some('=' | '!' | '<' | '>') => self.scan_operator(),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '.' => {
                match self.cursor.read_number() {
                    Some(n) => TokenKind::Number(n),
                    None => {
                        self.cursor.bump();
                        TokenKind::Error(format!("malformed number near `{c}`"))
                    }
                }
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => self.scan_word(),
            Some(c) => {
                self.cursor.bump();
                TokenKind::Error(format!("unexpected character: {c}"))
            }
        };

        Token {
            kind,
            span: Span::new(start, self.cursor.pos()),
        }
    }

    /// Tokenizes the whole clause, ending with `Eof`.
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn scan_operator(&mut self) -> TokenKind {
        for symbol in ["==", "!=", "<>", ">=", "<=", "=", ">", "<"] {
            if self.cursor.eat_str(symbol) {
                if let Some(op) = CompareOp::from_symbol(symbol) {
                    return TokenKind::Op(op);
                }
            }
        }
        self.cursor.bump();
        TokenKind::Error("expected a comparison operator".to_string())
    }

    fn scan_word(&mut self) -> TokenKind {
        let word = self.cursor.read_while(is_identifier_char);
        match word.to_ascii_lowercase().as_str() {
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "xor" => TokenKind::Xor,
            "not" => TokenKind::Not,
            "true" => TokenKind::Bool(true),
            "false" => TokenKind::Bool(false),
            "null" => TokenKind::Null,
            _ => TokenKind::Ident(word.to_string()),
        }
    }
}
