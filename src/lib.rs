//! cmdgen - Grammar-driven task and command generator
//!
//! This crate re-exports all layers of the cmdgen system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: cmdgen_runtime     - Rule files, catalogs, dataset export, session, CLI
//! Layer 3: cmdgen_engine      - Grammar store, generation, enumeration, binding, commands
//! Layer 2: cmdgen_language    - Scanner, branches, wildcards, where clauses, templates
//! Layer 1: cmdgen_entities    - Objects, locations, names, gestures, questions
//! Layer 0: cmdgen_foundation  - Core types (Value, Pool, Error)
//! ```

pub use cmdgen_engine as engine;
pub use cmdgen_entities as entities;
pub use cmdgen_foundation as foundation;
pub use cmdgen_language as language;
pub use cmdgen_runtime as runtime;
