//! Rule-text syntax for the command generator.
//!
//! This crate provides:
//! - [`scanner`] - Bracket primitives, rule tokenizing, and a character cursor
//! - [`expand_branches`] - Flattening of `( a | b )` alternatives
//! - [`combinatorics`] - Odometer-order cross products
//! - [`TextWildcard`] - Parsing of `{name ...}` placeholders
//! - [`where_clause`] - The property query language
//! - [`PathExpression`] - Command templates

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod branch;
pub mod combinatorics;
pub mod path;
pub mod scanner;
pub mod span;
pub mod text;
pub mod token;
pub mod where_clause;
pub mod wildcard;

pub use branch::{expand_branches, has_branches};
pub use combinatorics::{Product, combinations, increment_indices};
pub use path::{PathExpression, PathPart};
pub use scanner::{Cursor, split_rule};
pub use span::Span;
pub use text::{capitalize, tidy_spacing};
pub use token::{RuleToken, RuleTokenKind};
pub use where_clause::{CompareOp, Condition, ConditionalStatement, Connective};
pub use wildcard::{FIRST_AUTO_ID, Keycode, NestedIn, TextWildcard, WildcardParser};
