//! Integration tests for Layer 3: Engine
//!
//! Tests for grammars, tree generation, wildcard binding, enumeration, and
//! command rendering.

mod binding;
mod commands;
mod generation;
mod grammar;
