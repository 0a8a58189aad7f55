//! Integration tests for Layer 4: Runtime
//!
//! Tests for grammar and catalog files, dataset export, and the interactive
//! session.

mod datasets;
mod files;
mod sessions;
