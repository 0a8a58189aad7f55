//! Loading, export, and the interactive front end for cmdgen.
//!
//! This crate provides:
//! - [`GrammarLoader`] - Rule files with comment directives and includes
//! - [`load_catalog`] - Entity catalogs from JSON
//! - [`Dataset`] - JSON and MessagePack export of generated tasks
//! - [`Repl`] and [`Session`] - The interactive generator
//! - [`RunConfig`] - Command-line configuration for the `cmdgen` binary
//! - A built-in grammar and catalog

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod config;
pub mod dataset;
pub mod defaults;
pub mod editor;
pub mod loader;
pub mod repl;
pub mod session;

pub use catalog::{load_catalog, parse_catalog};
pub use config::{RunConfig, RunMode};
pub use dataset::{Dataset, DatasetElement, OutputFormat};
pub use defaults::{DEFAULT_CATALOG, DEFAULT_GRAMMAR, default_catalog, default_grammar};
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use loader::{GrammarLoader, parse_rule};
pub use repl::Repl;
pub use session::{Command, HELP, Outcome, Session, format_task};
