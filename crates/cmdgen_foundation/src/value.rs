//! Property values exposed by candidate entities.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A property value as seen by the where-clause evaluator.
///
/// Values are immutable and cheaply cloneable.
#[derive(Clone)]
pub enum Value {
    /// Absence of a value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// String value.
    String(Arc<str>),
    /// A reference to a named entity (a category, a room). Compares to
    /// strings by its display name.
    Named(Arc<str>),
}

/// The lexical type tag of a literal or a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// The null literal.
    Null,
    /// `true` / `false`.
    Bool,
    /// Integer or decimal literal.
    Number,
    /// Quoted string literal.
    String,
}

impl ValueType {
    /// Single-character tag, as printed in debug dumps of conditions.
    #[must_use]
    pub const fn tag(self) -> char {
        match self {
            Self::Null => '0',
            Self::Bool => 'B',
            Self::Number => 'n',
            Self::String => 's',
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
        };
        write!(f, "{name}")
    }
}

impl Value {
    /// Returns the type tag of this value. Named values are strings.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Null => ValueType::Null,
            Self::Bool(_) => ValueType::Bool,
            Self::Number(_) => ValueType::Number,
            Self::String(_) | Self::Named(_) => ValueType::String,
        }
    }

    /// Returns true if this is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean if this is a bool.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number if this is numeric.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text of a string or the display name of a named value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Named(s) => Some(s),
            _ => None,
        }
    }

    /// Creates a named-entity reference.
    #[must_use]
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        Self::Named(name.into())
    }

    /// Parses raw property-bag text as the given type.
    ///
    /// Returns `None` when the text does not read as that type.
    #[must_use]
    pub fn parse_as(text: &str, ty: ValueType) -> Option<Self> {
        let text = text.trim();
        match ty {
            ValueType::Null => text.eq_ignore_ascii_case("null").then_some(Self::Null),
            ValueType::Bool => {
                if text.eq_ignore_ascii_case("true") {
                    Some(Self::Bool(true))
                } else if text.eq_ignore_ascii_case("false") {
                    Some(Self::Bool(false))
                } else {
                    None
                }
            }
            ValueType::Number => text.parse::<f64>().ok().map(Self::Number),
            ValueType::String => Some(Self::String(text.into())),
        }
    }

    /// Compares two values of compatible type.
    ///
    /// Numbers order numerically, strings and names order case-insensitively,
    /// booleans and nulls only compare for equality (`Some(Equal)` or `None`).
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::Bool(a), Self::Bool(b)) => (a == b).then_some(Ordering::Equal),
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b),
            (a, b) => {
                let (a, b) = (a.as_str()?, b.as_str()?);
                Some(a.to_lowercase().cmp(&b.to_lowercase()))
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(_), Self::Bool(_)) | (Self::Null, Self::Null) => {
                self.compare(other).is_some()
            }
            (Self::Number(a), Self::Number(b)) => a == b,
            _ => matches!(self.compare(other), Some(Ordering::Equal)),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Named(s) => write!(f, "<{s}>"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) | Self::Named(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}
