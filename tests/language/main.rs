//! Integration tests for Layer 2: Language
//!
//! Tests for rule text: branch expansion, tokenizing, wildcards, where
//! clauses, and command path expressions.

mod branches;
mod paths;
mod where_clauses;
mod wildcards;
