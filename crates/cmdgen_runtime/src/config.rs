//! Run configuration for the `cmdgen` binary.

use std::path::PathBuf;

use cmdgen_engine::{DEFAULT_MAX_DEPTH, GeneratorConfig, Grammar, MergeMode, TaskGenerator};
use cmdgen_entities::Catalog;
use cmdgen_foundation::Result;
use tracing::debug;

use crate::catalog::load_catalog;
use crate::dataset::OutputFormat;
use crate::defaults::{default_catalog, default_grammar};
use crate::loader::GrammarLoader;

/// What the binary does once configured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Interactive session.
    #[default]
    Interactive,
    /// Print `count` random tasks and exit.
    Batch {
        /// Number of tasks.
        count: usize,
    },
    /// Export a dataset: `count` random tasks, or every enumerated tree
    /// when no count is given.
    Dataset {
        /// Number of random tasks.
        count: Option<usize>,
    },
}

/// Configuration parsed from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Grammar files; the built-in grammar when empty.
    pub grammars: Vec<PathBuf>,
    /// Catalog file; the built-in catalog when absent.
    pub catalog: Option<PathBuf>,
    /// Seed for reproducible output.
    pub seed: Option<u64>,
    /// Recursion ceiling.
    pub max_depth: usize,
    /// What to do.
    pub mode: RunMode,
    /// Dataset format.
    pub format: OutputFormat,
    /// Dataset file; standard output when absent.
    pub output: Option<PathBuf>,
    /// Log at debug level.
    pub verbose: bool,
    /// Print usage and exit.
    pub show_help: bool,
    /// Print the version and exit.
    pub show_version: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            grammars: Vec::new(),
            catalog: None,
            seed: None,
            max_depth: DEFAULT_MAX_DEPTH,
            mode: RunMode::Interactive,
            format: OutputFormat::Json,
            output: None,
            verbose: false,
            show_help: false,
            show_version: false,
        }
    }
}

impl RunConfig {
    /// Parses arguments, the first being the program name.
    ///
    /// # Errors
    /// Returns a message naming the offending option.
    pub fn from_args(args: &[String]) -> std::result::Result<Self, String> {
        let mut config = Self::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => config.show_help = true,
                "-V" | "--version" => config.show_version = true,
                "-v" | "--verbose" => config.verbose = true,
                "-g" | "--grammar" => config.grammars.push(PathBuf::from(value(args, &mut i)?)),
                "-d" | "--data" => config.catalog = Some(PathBuf::from(value(args, &mut i)?)),
                "-o" | "--output" => config.output = Some(PathBuf::from(value(args, &mut i)?)),
                "-s" | "--seed" => config.seed = Some(number(args, &mut i)?),
                "--max-depth" => config.max_depth = number(args, &mut i)?,
                "-n" | "--count" => {
                    config.mode = RunMode::Batch {
                        count: number(args, &mut i)?,
                    };
                }
                "--format" => config.format = value(args, &mut i)?.parse()?,
                "--dataset" => {
                    let count = match args.get(i + 1) {
                        Some(next) if !next.starts_with('-') => Some(number(args, &mut i)?),
                        _ => None,
                    };
                    config.mode = RunMode::Dataset { count };
                }
                arg => return Err(format!("unknown option: {arg}")),
            }
            i += 1;
        }

        Ok(config)
    }

    /// The engine configuration this run implies.
    #[must_use]
    pub fn generator_config(&self) -> GeneratorConfig {
        let config = GeneratorConfig::new().with_max_depth(self.max_depth);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    /// Loads the grammar files, merging every file after the first into it,
    /// or the built-in grammar when none are given.
    ///
    /// # Errors
    /// Returns the first loading error.
    pub fn load_grammar(&self) -> Result<Grammar> {
        let Some((first, rest)) = self.grammars.split_first() else {
            debug!("using built-in grammar");
            return default_grammar();
        };
        let mut loader = GrammarLoader::new();
        let mut grammar = loader.load(first)?;
        for path in rest {
            let other = loader.load(path)?;
            grammar.merge(&other, &MergeMode::All);
        }
        Ok(grammar)
    }

    /// Loads the catalog file, or the built-in catalog.
    ///
    /// # Errors
    /// Returns an i/o or serialization error.
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog {
            Some(path) => load_catalog(path),
            None => {
                debug!("using built-in catalog");
                default_catalog()
            }
        }
    }

    /// Loads everything and builds a generator.
    ///
    /// # Errors
    /// See [`load_grammar`](Self::load_grammar) and
    /// [`load_catalog`](Self::load_catalog).
    pub fn build_generator(&self) -> Result<TaskGenerator> {
        Ok(TaskGenerator::new(
            self.load_grammar()?,
            self.load_catalog()?,
            self.generator_config(),
        ))
    }
}

fn value<'a>(args: &'a [String], i: &mut usize) -> std::result::Result<&'a str, String> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn number<T: std::str::FromStr>(args: &[String], i: &mut usize) -> std::result::Result<T, String> {
    let flag = args[*i].clone();
    let text = value(args, i)?;
    text.parse().map_err(|_| format!("invalid {flag} value: {text}"))
}
