//! Generator configuration.

use rand::Rng;

use crate::grammar::MAIN;

/// Default recursion ceiling for sentence generation.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Default number of attempts before a generation error is reported.
pub const DEFAULT_MAX_ATTEMPTS: usize = 16;

/// How a sub-kind is chosen when a wildcard's type tag does not pin one down.
///
/// Applies to `name` (male or female), `location` (beacon, room, or
/// placement), and `object` (known or alike).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubKindPolicy {
    /// Pick uniformly at random.
    #[default]
    Uniform,
    /// Always take the first option.
    First,
}

impl SubKindPolicy {
    /// Picks one of `options`. Returns `""` when there are none.
    pub fn choose<'a, R: Rng + ?Sized>(self, rng: &mut R, options: &[&'a str]) -> &'a str {
        match self {
            Self::Uniform => cmdgen_foundation::random_pick(rng, options).copied().unwrap_or(""),
            Self::First => options.first().copied().unwrap_or(""),
        }
    }
}

/// Settings for a [`TaskGenerator`](crate::TaskGenerator).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Seed for the random source; `None` seeds from the operating system.
    pub seed: Option<u64>,
    /// Recursion ceiling for generation and enumeration.
    pub max_depth: usize,
    /// Attempts per task before giving up on retryable errors.
    pub max_attempts: usize,
    /// Non-terminal generation starts from.
    pub start_symbol: String,
    /// Sub-kind fallback for untyped wildcards.
    pub sub_kind_policy: SubKindPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_depth: DEFAULT_MAX_DEPTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            start_symbol: MAIN.to_string(),
            sub_kind_policy: SubKindPolicy::Uniform,
        }
    }
}

impl GeneratorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration that reproduces the same tasks on every run.
    #[must_use]
    pub fn reproducible(seed: u64) -> Self {
        Self::default().with_seed(seed)
    }

    /// A configuration that reports the first failure instead of retrying.
    #[must_use]
    pub fn single_attempt() -> Self {
        Self::default().with_max_attempts(1)
    }

    /// Sets the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the recursion ceiling.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the number of attempts. Zero is treated as one.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Sets the start symbol, adding a leading `$` if missing.
    #[must_use]
    pub fn with_start_symbol(mut self, symbol: &str) -> Self {
        self.start_symbol = if symbol.starts_with('$') {
            symbol.to_string()
        } else {
            format!("${symbol}")
        };
        self
    }

    /// Sets the sub-kind policy.
    #[must_use]
    pub fn with_sub_kind_policy(mut self, policy: SubKindPolicy) -> Self {
        self.sub_kind_policy = policy;
        self
    }
}
