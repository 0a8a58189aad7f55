//! Random and guided sentence generation.
//!
//! Generation walks the grammar from a start symbol. At every non-terminal an
//! alternative is chosen uniformly among all of that non-terminal's pooled
//! alternatives, unless a guided path dictates the choice for the current
//! depth. The chosen text is split into tokens: literals and wildcards become
//! leaves, non-terminals recurse.

use std::fmt;
use std::str::FromStr;

use cmdgen_foundation::{Error, Result, random_pick};
use cmdgen_language::{RuleTokenKind, WildcardParser, split_rule};
use rand::Rng;
use tracing::warn;

use crate::grammar::{Grammar, Replacement};
use crate::tree::{NodeId, NodeKind, TaskTree};

// =============================================================================
// Guided Paths
// =============================================================================

/// One forced choice: at the matching depth, expand `non_terminal` with
/// alternative `index`, or at random when no index is given.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathStep {
    /// Non-terminal name without the `$`.
    pub non_terminal: String,
    /// Zero-based index into the pooled alternatives.
    pub index: Option<usize>,
}

impl PathStep {
    /// Creates a step.
    #[must_use]
    pub fn new(non_terminal: impl Into<String>, index: Option<usize>) -> Self {
        let non_terminal = non_terminal.into();
        Self {
            non_terminal: non_terminal.trim_start_matches('$').to_string(),
            index,
        }
    }

    /// Returns true if this step applies to `non_terminal` (with or without `$`).
    #[must_use]
    pub fn matches(&self, non_terminal: &str) -> bool {
        self.non_terminal == non_terminal.trim_start_matches('$')
    }
}

impl FromStr for PathStep {
    type Err = Error;

    /// Parses `name` or `name:index`. A leading `$` is accepted.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (name, index) = match s.split_once(':') {
            Some((name, index)) => {
                let index = index
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| Error::invalid_path(format!("bad alternative index in `{s}`"), name.len() + 1))?;
                (name, Some(index))
            }
            None => (s, None),
        };
        let name = name.trim().trim_start_matches('$');
        if name.is_empty() || !name.chars().all(cmdgen_language::scanner::is_identifier_char) {
            return Err(Error::invalid_path(format!("bad non-terminal in `{s}`"), 0));
        }
        Ok(Self::new(name, index))
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}:{index}", self.non_terminal),
            None => write!(f, "{}", self.non_terminal),
        }
    }
}

/// Parses a whitespace- or comma-separated list of steps.
///
/// # Errors
/// Returns an invalid-path-expression error for the first malformed step.
pub fn parse_path(text: &str) -> Result<Vec<PathStep>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

// =============================================================================
// Generation
// =============================================================================

/// Generates one unbound tree from `start`.
///
/// `path[d]` forces the choice made at depth `d` when its name matches the
/// non-terminal being expanded there. References to non-terminals without
/// rules degrade to unresolved leaves.
///
/// # Errors
/// - unknown-non-terminal if `start` has no rules
/// - alternative-out-of-range if a path index is too large
/// - recursion-limit once expansion reaches `max_depth`
pub fn generate_tree<R: Rng + ?Sized>(
    grammar: &Grammar,
    start: &str,
    rng: &mut R,
    path: &[PathStep],
    max_depth: usize,
) -> Result<TaskTree> {
    if !grammar.contains(start) {
        return Err(Error::unknown_non_terminal(start));
    }
    let mut expander = Expander {
        grammar,
        rng,
        path,
        max_depth,
        parser: WildcardParser::new(),
    };
    let replacement = expander.choose(start, 0)?;
    let text = replacement.text().to_string();
    let mut tree = TaskTree::new(NodeKind::Rule {
        non_terminal: start.to_string(),
        replacement,
    });
    tree.set_tier(grammar.tier());
    let root = tree.root();
    expander.expand(&mut tree, root, &text)?;
    Ok(tree)
}

struct Expander<'a, R: ?Sized> {
    grammar: &'a Grammar,
    rng: &'a mut R,
    path: &'a [PathStep],
    max_depth: usize,
    parser: WildcardParser,
}

impl<R: Rng + ?Sized> Expander<'_, R> {
    fn choose(&mut self, non_terminal: &str, depth: usize) -> Result<Replacement> {
        if depth >= self.max_depth {
            return Err(Error::recursion_limit(self.max_depth, non_terminal));
        }
        let step = self.path.get(depth).filter(|s| s.matches(non_terminal));
        if let Some(index) = step.and_then(|s| s.index) {
            return self.grammar.alternative(non_terminal, index);
        }
        let alternatives = self.grammar.alternatives(non_terminal);
        random_pick(&mut *self.rng, &alternatives)
            .cloned()
            .ok_or_else(|| Error::unknown_non_terminal(non_terminal))
    }

    /// Expands `text` under `root` depth-first. Pending rule nodes live on an
    /// explicit work stack, not the call stack.
    fn expand(&mut self, tree: &mut TaskTree, root: NodeId, text: &str) -> Result<()> {
        let mut stack = vec![Frame::new(tree, root, text, 0)];
        while let Some(frame) = stack.last_mut() {
            let Some((kind, text)) = frame.tokens.next() else {
                stack.pop();
                continue;
            };
            let (node, depth) = (frame.node, frame.depth);
            match kind {
                RuleTokenKind::Literal => {
                    tree.push_literal(node, &text);
                }
                RuleTokenKind::Wildcard => {
                    tree.push_wildcard(node, &text, &mut self.parser);
                }
                RuleTokenKind::NonTerminal if self.grammar.contains(&text) => {
                    let replacement = self.choose(&text, depth + 1)?;
                    let child_text = replacement.text().to_string();
                    let child = tree.push(
                        node,
                        NodeKind::Rule {
                            non_terminal: text,
                            replacement,
                        },
                    );
                    stack.push(Frame::new(tree, child, &child_text, depth + 1));
                }
                RuleTokenKind::NonTerminal => {
                    warn!(non_terminal = %text, "no rules for non-terminal");
                    tree.push(node, NodeKind::Unresolved { non_terminal: text });
                }
            }
        }
        Ok(())
    }
}

/// A rule node whose tokens are still being expanded.
struct Frame {
    node: NodeId,
    tokens: std::vec::IntoIter<(RuleTokenKind, String)>,
    depth: usize,
}

impl Frame {
    /// Tokenizes `text`. Unbalanced text is kept as one literal leaf.
    fn new(tree: &mut TaskTree, node: NodeId, text: &str, depth: usize) -> Self {
        let tokens: Vec<(RuleTokenKind, String)> = match split_rule(text) {
            Some(tokens) => tokens.into_iter().map(|t| (t.kind, t.text.to_string())).collect(),
            None => {
                warn!(text, "unbalanced replacement kept as literal text");
                tree.push_literal(node, text);
                Vec::new()
            }
        };
        Self {
            node,
            tokens: tokens.into_iter(),
            depth,
        }
    }
}
