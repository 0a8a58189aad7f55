//! The task generator.

use cmdgen_entities::Catalog;
use cmdgen_foundation::{Error, ErrorKind, GenRng, Result, from_entropy, seeded};
use tracing::{debug, warn};

use crate::binder::bind;
use crate::config::GeneratorConfig;
use crate::enumerate::Enumeration;
use crate::generate::{PathStep, generate_tree};
use crate::grammar::Grammar;
use crate::task::Task;
use crate::tree::TaskTree;

/// Generates bound tasks from a grammar and an entity catalog.
///
/// The generator owns its random source. Each attempt draws a fresh shuffled
/// copy of the catalog, so a failed attempt never affects the next one.
#[derive(Debug)]
pub struct TaskGenerator {
    grammar: Grammar,
    catalog: Catalog,
    config: GeneratorConfig,
    rng: GenRng,
}

impl TaskGenerator {
    /// Creates a generator, seeding from `config.seed` or the operating system.
    #[must_use]
    pub fn new(grammar: Grammar, catalog: Catalog, config: GeneratorConfig) -> Self {
        let rng = config.seed.map_or_else(from_entropy, seeded);
        Self {
            grammar,
            catalog,
            config,
            rng,
        }
    }

    /// The grammar.
    #[must_use]
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// The master catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Restarts the random source from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.config.seed = Some(seed);
        self.rng = seeded(seed);
    }

    /// Generates a random task.
    ///
    /// # Errors
    /// Returns the last error once `max_attempts` retryable failures have
    /// occurred, or the first non-retryable error. A recursion limit is not
    /// retried when the start symbol cannot derive a finite sentence.
    pub fn generate(&mut self) -> Result<Task> {
        self.generate_guided(&[])
    }

    /// Generates a task whose choices follow `path`.
    ///
    /// # Errors
    /// See [`generate`](Self::generate).
    pub fn generate_guided(&mut self, path: &[PathStep]) -> Result<Task> {
        let attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.attempt(path) {
                Ok(task) => return Ok(task),
                Err(e) if self.is_hopeless(&e) => {
                    warn!(error = %e, start = %self.config.start_symbol, "start symbol never terminates");
                    return Err(e);
                }
                Err(e) if e.is_retryable() && attempt < attempts => {
                    warn!(attempt, error = %e, "generation failed, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// True if every further attempt would hit the same recursion limit.
    fn is_hopeless(&self, error: &Error) -> bool {
        matches!(error.kind, ErrorKind::RecursionLimit { .. })
            && !self.grammar.terminating().contains(&self.config.start_symbol)
    }

    fn attempt(&mut self, path: &[PathStep]) -> Result<Task> {
        let mut tree = self.generate_tree(path)?;
        let mut pools = self.catalog.shuffled(&mut self.rng);
        let bindings = bind(&tree, &mut pools, &mut self.rng, self.config.sub_kind_policy)?;
        tree.set_bindings(bindings);
        debug!(nodes = tree.len(), "task generated");
        Ok(Task::new(tree))
    }

    /// Generates an unbound tree.
    ///
    /// # Errors
    /// Returns unknown-non-terminal, alternative-out-of-range, or
    /// recursion-limit errors from expansion.
    pub fn generate_tree(&mut self, path: &[PathStep]) -> Result<TaskTree> {
        generate_tree(
            &self.grammar,
            &self.config.start_symbol,
            &mut self.rng,
            path,
            self.config.max_depth,
        )
    }

    /// Every unbound tree the grammar can produce, lazily.
    ///
    /// # Errors
    /// Returns unknown-non-terminal if the start symbol has no rules.
    pub fn enumerate_all(&self) -> Result<Enumeration<'_>> {
        Enumeration::new(&self.grammar, &self.config.start_symbol, self.config.max_depth)
    }
}
