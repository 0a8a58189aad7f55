//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Error, Value, property lookup, and candidate pools.

mod errors;
mod pools;
mod values;
