//! Syntax tree of where clauses.

use std::fmt;

use cmdgen_foundation::{Error, Result, Value, ValueType};

use crate::span::Span;

/// Comparison operator of a condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `=` or `==`
    Eq,
    /// `!=` or `<>`
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
}

impl CompareOp {
    /// Parses an operator symbol.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "=" | "==" => Self::Eq,
            "!=" | "<>" => Self::Ne,
            ">" => Self::Gt,
            ">=" => Self::Ge,
            "<" => Self::Lt,
            "<=" => Self::Le,
            _ => return None,
        })
    }

    /// Canonical symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
        }
    }

    /// Returns true for `=` and `!=`.
    #[must_use]
    pub const fn is_equality(self) -> bool {
        matches!(self, Self::Eq | Self::Ne)
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single `property operator literal` test.
#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    /// Property name, matched case-insensitively.
    pub property: String,
    /// Comparison operator.
    pub op: CompareOp,
    /// Typed literal the property is compared with.
    pub value: Value,
    /// Source location within the clause text.
    pub span: Span,
}

impl Condition {
    /// Creates a condition, rejecting ordering operators on non-numeric literals.
    ///
    /// # Errors
    /// Returns an invalid-where-clause error for `<`, `<=`, `>`, `>=` against
    /// strings, booleans, or null.
    pub fn new(property: impl Into<String>, op: CompareOp, value: Value) -> Result<Self> {
        Self::with_span(property, op, value, Span::default())
    }

    pub(crate) fn with_span(
        property: impl Into<String>,
        op: CompareOp,
        value: Value,
        span: Span,
    ) -> Result<Self> {
        if !op.is_equality() && value.value_type() != ValueType::Number {
            return Err(Error::invalid_where(
                format!("operator {op} needs a number, got {}", value.value_type()),
                span.start,
            ));
        }
        Ok(Self {
            property: property.into(),
            op,
            value,
            span,
        })
    }

    /// The type tag of the literal.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        self.value.value_type()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Value::String(s) | Value::Named(s) => {
                write!(f, "{} {} \"{}\"", self.property, self.op, s.replace('"', "\\\""))
            }
            other => write!(f, "{} {} {other}", self.property, self.op),
        }
    }
}

/// Boolean connective joining two statements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Connective {
    /// Both sides hold.
    And,
    /// Either side holds.
    Or,
    /// Exactly one side holds.
    Xor,
    /// Negates the left side; the right side is ignored.
    Not,
}

impl Connective {
    /// Parses a connective keyword, ignoring case.
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            "xor" => Some(Self::Xor),
            "not" => Some(Self::Not),
            _ => None,
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Not => "NOT",
        };
        write!(f, "{word}")
    }
}

/// A composed where clause.
#[derive(Clone, Debug, PartialEq)]
pub enum ConditionalStatement {
    /// A single condition.
    Single(Condition),
    /// Negation.
    Not(Box<ConditionalStatement>),
    /// Binary composition with AND, OR, or XOR.
    Binary {
        /// The connective (never [`Connective::Not`]).
        op: Connective,
        /// Left operand.
        lhs: Box<ConditionalStatement>,
        /// Right operand.
        rhs: Box<ConditionalStatement>,
    },
}

impl ConditionalStatement {
    /// Composes `lhs` and `rhs` with `op`.
    ///
    /// With no operator, or a binary operator but no right side, the result is
    /// just `lhs`. `NOT` ignores `rhs`.
    #[must_use]
    pub fn compose(lhs: Self, op: Option<Connective>, rhs: Option<Self>) -> Self {
        match (op, rhs) {
            (Some(Connective::Not), _) => Self::Not(Box::new(lhs)),
            (Some(op), Some(rhs)) => Self::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            _ => lhs,
        }
    }

    /// `lhs AND rhs`
    #[must_use]
    pub fn and(lhs: Self, rhs: Self) -> Self {
        Self::compose(lhs, Some(Connective::And), Some(rhs))
    }

    /// `lhs OR rhs`
    #[must_use]
    pub fn or(lhs: Self, rhs: Self) -> Self {
        Self::compose(lhs, Some(Connective::Or), Some(rhs))
    }

    /// `lhs XOR rhs`
    #[must_use]
    pub fn xor(lhs: Self, rhs: Self) -> Self {
        Self::compose(lhs, Some(Connective::Xor), Some(rhs))
    }

    /// `NOT inner`
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: Self) -> Self {
        Self::Not(Box::new(inner))
    }

    /// ANDs every statement together, left to right. `None` if empty.
    pub fn all(statements: impl IntoIterator<Item = Self>) -> Option<Self> {
        statements.into_iter().reduce(Self::and)
    }

    /// Every condition in the statement, left to right.
    #[must_use]
    pub fn conditions(&self) -> Vec<&Condition> {
        match self {
            Self::Single(c) => vec![c],
            Self::Not(inner) => inner.conditions(),
            Self::Binary { lhs, rhs, .. } => {
                let mut out = lhs.conditions();
                out.extend(rhs.conditions());
                out
            }
        }
    }
}

impl From<Condition> for ConditionalStatement {
    fn from(condition: Condition) -> Self {
        Self::Single(condition)
    }
}

impl fmt::Display for ConditionalStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(c) => write!(f, "{c}"),
            Self::Not(inner) => write!(f, "NOT ({inner})"),
            Self::Binary { op, lhs, rhs } => write!(f, "({lhs}) {op} ({rhs})"),
        }
    }
}
