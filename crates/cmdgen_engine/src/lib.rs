//! Grammar store, task generation, wildcard binding, and command rendering.
//!
//! This crate provides:
//! - [`Grammar`] - Production rules pooled by non-terminal
//! - [`generate_tree`] - Random and guided sentence generation
//! - [`Enumeration`] - Exhaustive, deterministic tree enumeration
//! - [`bind`] - Constraint-driven binding of wildcards to catalog entities
//! - [`render_command`] - Command templates rendered over bound trees
//! - [`TaskGenerator`] - Generation with fresh pools and retries

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod binder;
pub mod config;
pub mod enumerate;
pub mod generate;
pub mod generator;
pub mod grammar;
pub mod pronoun;
pub mod render;
pub mod task;
pub mod tree;

pub use binder::{Binding, Bindings, bind};
pub use config::{DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_DEPTH, GeneratorConfig, SubKindPolicy};
pub use enumerate::{Derivation, Derivations, Enumeration};
pub use generate::{PathStep, generate_tree, parse_path};
pub use generator::TaskGenerator;
pub use grammar::{Attributes, Grammar, MAIN, MergeMode, ProductionRule, Replacement, is_non_terminal};
pub use pronoun::{Number, Person, PronounCase, PronounGender, pronoun, third_person};
pub use render::{carries_command, render_command, render_node_command};
pub use task::{Remark, Task};
pub use tree::{NodeId, NodeKind, TaskNode, TaskTree};
