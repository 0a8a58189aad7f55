//! Exhaustive enumeration of every tree a grammar can produce.
//!
//! Enumeration is lazy and deterministic. Each non-terminal yields its
//! derivations alternative by alternative; within an alternative the
//! derivations of its tokens are crossed in odometer order, the last token
//! turning fastest. An alternative that cannot complete below the depth
//! ceiling yields nothing and is skipped. Alternatives that reference a
//! non-terminal which never terminates are pruned before they are explored.

use std::collections::BTreeSet;
use std::rc::Rc;

use cmdgen_foundation::{Error, Result};
use cmdgen_language::{Product, RuleTokenKind, WildcardParser, split_rule};

use crate::grammar::{Grammar, Replacement};
use crate::tree::{NodeId, NodeKind, TaskTree};

// =============================================================================
// Derivations
// =============================================================================

/// One enumerated expansion, before it is turned into a [`TaskTree`].
#[derive(Clone, Debug, PartialEq)]
pub enum Derivation {
    /// Plain text.
    Literal(String),
    /// `{...}` source text.
    Wildcard(String),
    /// A non-terminal without rules.
    Unresolved(String),
    /// A non-terminal expanded by one alternative.
    Rule {
        /// Name including the `$`.
        non_terminal: String,
        /// The alternative taken.
        replacement: Replacement,
        /// Derivations of the alternative's tokens, in order.
        children: Vec<Derivation>,
    },
}

/// Every derivation of one non-terminal, in alternative order.
#[derive(Clone)]
pub struct Derivations<'g> {
    grammar: &'g Grammar,
    non_terminal: String,
    alternatives: Vec<Replacement>,
    next_alternative: usize,
    current: Option<(Replacement, Product<Source<'g>>)>,
    depth: usize,
    max_depth: usize,
    terminating: Rc<BTreeSet<String>>,
}

impl<'g> Derivations<'g> {
    /// Derivations of `non_terminal` starting at `depth`.
    #[must_use]
    pub fn new(grammar: &'g Grammar, non_terminal: &str, depth: usize, max_depth: usize) -> Self {
        Self::with_terminating(grammar, non_terminal, depth, max_depth, Rc::new(grammar.terminating()))
    }

    fn with_terminating(
        grammar: &'g Grammar,
        non_terminal: &str,
        depth: usize,
        max_depth: usize,
        terminating: Rc<BTreeSet<String>>,
    ) -> Self {
        let alternatives = if depth < max_depth && terminating.contains(non_terminal) {
            grammar.alternatives(non_terminal)
        } else {
            Vec::new()
        };
        Self {
            grammar,
            non_terminal: non_terminal.to_string(),
            alternatives,
            next_alternative: 0,
            current: None,
            depth,
            max_depth,
            terminating,
        }
    }

    /// One source per token, or `None` if some token can never complete.
    fn sources(&self, text: &str) -> Option<Vec<Source<'g>>> {
        let Some(tokens) = split_rule(text) else {
            return Some(vec![Source::single(Derivation::Literal(text.trim().to_string()))]);
        };
        let mut sources = Vec::with_capacity(tokens.len());
        for token in tokens {
            match token.kind {
                RuleTokenKind::Literal => {
                    let text = token.text.trim();
                    if !text.is_empty() {
                        sources.push(Source::single(Derivation::Literal(text.to_string())));
                    }
                }
                RuleTokenKind::Wildcard => sources.push(Source::single(Derivation::Wildcard(token.text.to_string()))),
                RuleTokenKind::NonTerminal if self.grammar.contains(token.text) => {
                    if !self.terminating.contains(token.text) {
                        return None;
                    }
                    sources.push(Source::Rule(Derivations::with_terminating(
                        self.grammar,
                        token.text,
                        self.depth + 1,
                        self.max_depth,
                        Rc::clone(&self.terminating),
                    )));
                }
                RuleTokenKind::NonTerminal => {
                    sources.push(Source::single(Derivation::Unresolved(token.text.to_string())));
                }
            }
        }
        Some(sources)
    }
}

impl Iterator for Derivations<'_> {
    type Item = Derivation;

    fn next(&mut self) -> Option<Derivation> {
        loop {
            if let Some((replacement, product)) = &mut self.current {
                if let Some(children) = product.next() {
                    return Some(Derivation::Rule {
                        non_terminal: self.non_terminal.clone(),
                        replacement: replacement.clone(),
                        children,
                    });
                }
                self.current = None;
            }

            let replacement = self.alternatives.get(self.next_alternative)?.clone();
            self.next_alternative += 1;
            // A missing or empty source means the alternative cannot complete.
            if let Some(Ok(product)) = self.sources(replacement.text()).map(Product::new) {
                self.current = Some((replacement, product));
            }
        }
    }
}

#[derive(Clone)]
enum Source<'g> {
    Single(std::option::IntoIter<Derivation>),
    Rule(Derivations<'g>),
}

impl Source<'_> {
    fn single(derivation: Derivation) -> Self {
        Self::Single(Some(derivation).into_iter())
    }
}

impl Iterator for Source<'_> {
    type Item = Derivation;

    fn next(&mut self) -> Option<Derivation> {
        match self {
            Self::Single(once) => once.next(),
            Self::Rule(rule) => rule.next(),
        }
    }
}

// =============================================================================
// Enumeration
// =============================================================================

/// Lazy sequence of every unbound tree reachable from a start symbol.
#[derive(Clone)]
pub struct Enumeration<'g> {
    grammar: &'g Grammar,
    derivations: Derivations<'g>,
}

impl<'g> Enumeration<'g> {
    /// Starts enumerating from `start`.
    ///
    /// # Errors
    /// Returns unknown-non-terminal if `start` has no rules.
    pub fn new(grammar: &'g Grammar, start: &str, max_depth: usize) -> Result<Self> {
        if !grammar.contains(start) {
            return Err(Error::unknown_non_terminal(start));
        }
        Ok(Self {
            grammar,
            derivations: Derivations::new(grammar, start, 0, max_depth),
        })
    }
}

impl Iterator for Enumeration<'_> {
    type Item = TaskTree;

    fn next(&mut self) -> Option<TaskTree> {
        let derivation = self.derivations.next()?;
        let mut tree = to_tree(derivation)?;
        tree.set_tier(self.grammar.tier());
        Some(tree)
    }
}

/// Builds the tree for a rule derivation, numbering wildcards in pre-order.
#[must_use]
pub fn to_tree(derivation: Derivation) -> Option<TaskTree> {
    let Derivation::Rule {
        non_terminal,
        replacement,
        children,
    } = derivation
    else {
        return None;
    };
    let mut tree = TaskTree::new(NodeKind::Rule {
        non_terminal,
        replacement,
    });
    let mut parser = WildcardParser::new();
    let root = tree.root();
    for child in children {
        attach(&mut tree, root, child, &mut parser);
    }
    Some(tree)
}

fn attach(tree: &mut TaskTree, parent: NodeId, derivation: Derivation, parser: &mut WildcardParser) {
    match derivation {
        Derivation::Literal(text) => {
            tree.push_literal(parent, &text);
        }
        Derivation::Wildcard(text) => {
            tree.push_wildcard(parent, &text, parser);
        }
        Derivation::Unresolved(non_terminal) => {
            tree.push(parent, NodeKind::Unresolved { non_terminal });
        }
        Derivation::Rule {
            non_terminal,
            replacement,
            children,
        } => {
            let node = tree.push(
                parent,
                NodeKind::Rule {
                    non_terminal,
                    replacement,
                },
            );
            for child in children {
                attach(tree, node, child, parser);
            }
        }
    }
}
