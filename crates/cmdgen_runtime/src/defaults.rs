//! Built-in grammar and catalog, so the generator works without files.

use cmdgen_engine::Grammar;
use cmdgen_entities::Catalog;
use cmdgen_foundation::Result;

use crate::catalog::parse_catalog;
use crate::loader::GrammarLoader;

/// Rule-file text of the built-in grammar.
pub const DEFAULT_GRAMMAR: &str = include_str!("../data/default_grammar.txt");

/// Catalog document of the built-in entities.
pub const DEFAULT_CATALOG: &str = include_str!("../data/default_catalog.json");

/// Parses the built-in grammar.
///
/// # Errors
/// Only if the embedded text is malformed.
pub fn default_grammar() -> Result<Grammar> {
    GrammarLoader::new().load_str(DEFAULT_GRAMMAR, None)
}

/// Parses the built-in catalog.
///
/// # Errors
/// Only if the embedded document is malformed.
pub fn default_catalog() -> Result<Catalog> {
    parse_catalog(DEFAULT_CATALOG)
}
