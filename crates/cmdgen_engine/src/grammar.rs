//! Production rules and the grammar that holds them.
//!
//! A [`Grammar`] maps each non-terminal to one or more rule groups. Groups for
//! the same name usually come from different files; they stay distinct so each
//! keeps its own attributes, but their alternatives are pooled when choosing a
//! replacement.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use cmdgen_entities::DifficultyDegree;
use cmdgen_foundation::{Error, Result};
use cmdgen_language::scanner::is_identifier_char;
use cmdgen_language::{PathExpression, RuleTokenKind, split_rule};

/// The default start symbol.
pub const MAIN: &str = "$Main";

/// Returns true if `name` is `$` followed by one or more identifier characters.
#[must_use]
pub fn is_non_terminal(name: &str) -> bool {
    name.strip_prefix('$')
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(is_identifier_char))
}

// =============================================================================
// Attributes
// =============================================================================

/// Output attributes attached to a production rule.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    /// Action name, e.g. `BringIt`.
    pub name: Option<String>,
    /// Who the robot should address.
    pub speak_to: Option<String>,
    /// Where the action takes place.
    pub location: Option<String>,
    /// Command template rendered for this rule's subtree.
    pub command: Option<PathExpression>,
}

impl Attributes {
    /// Creates empty attributes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the action name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the addressee.
    #[must_use]
    pub fn with_speak_to(mut self, speak_to: impl Into<String>) -> Self {
        self.speak_to = Some(speak_to.into());
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Parses and sets the command template.
    ///
    /// # Errors
    /// Returns an invalid-path-expression error if the template is malformed.
    pub fn with_command(mut self, template: &str) -> Result<Self> {
        self.command = Some(PathExpression::parse(template)?);
        Ok(self)
    }

    /// Returns true if no attribute is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.speak_to.is_none() && self.location.is_none() && self.command.is_none()
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ Name = \"{}\"", self.name.as_deref().unwrap_or(""))?;
        if let Some(speak_to) = &self.speak_to {
            write!(f, ", SpeakTo = \"{speak_to}\"")?;
        }
        if let Some(location) = &self.location {
            write!(f, ", Location = \"{location}\"")?;
        }
        if let Some(command) = &self.command {
            write!(f, ", Command = \"{command}\"")?;
        }
        write!(f, " }}")
    }
}

// =============================================================================
// Production Rule
// =============================================================================

/// A non-terminal with its ordered alternatives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductionRule {
    non_terminal: String,
    replacements: Vec<String>,
    attributes: Option<Attributes>,
}

impl ProductionRule {
    /// Creates a rule. Duplicate alternatives are dropped, keeping the first.
    ///
    /// # Errors
    /// Returns an invalid-rule error if `non_terminal` is not `$Identifier`.
    pub fn new<I, S>(non_terminal: impl Into<String>, replacements: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let non_terminal = non_terminal.into();
        if !is_non_terminal(&non_terminal) {
            return Err(Error::invalid_rule(format!(
                "`{non_terminal}` is not a non-terminal name"
            )));
        }
        let mut rule = Self {
            non_terminal,
            replacements: Vec::new(),
            attributes: None,
        };
        for replacement in replacements {
            rule.push(replacement.into());
        }
        Ok(rule)
    }

    /// Attaches output attributes. Empty attributes are dropped.
    #[must_use]
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = (!attributes.is_empty()).then_some(attributes);
        self
    }

    /// Non-terminal name, including the `$`.
    #[must_use]
    pub fn non_terminal(&self) -> &str {
        &self.non_terminal
    }

    /// Alternatives in insertion order.
    #[must_use]
    pub fn replacements(&self) -> &[String] {
        &self.replacements
    }

    /// Output attributes, if any.
    #[must_use]
    pub fn attributes(&self) -> Option<&Attributes> {
        self.attributes.as_ref()
    }

    /// Returns true if the rule has no alternatives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    /// Appends the alternatives of `other` not already present.
    ///
    /// Rules for a different non-terminal are ignored.
    pub fn add_replacements(&mut self, other: &Self) {
        if other.non_terminal != self.non_terminal {
            return;
        }
        for replacement in &other.replacements {
            self.push(replacement.clone());
        }
    }

    /// A copy of this rule under another name.
    #[must_use]
    pub fn renamed(&self, non_terminal: impl Into<String>) -> Self {
        Self {
            non_terminal: non_terminal.into(),
            ..self.clone()
        }
    }

    fn push(&mut self, replacement: String) {
        if !self.replacements.contains(&replacement) {
            self.replacements.push(replacement);
        }
    }
}

impl fmt::Display for ProductionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.replacements.is_empty() {
            return write!(f, "{} has no rules", self.non_terminal);
        }
        write!(f, "{} -> {}", self.non_terminal, self.replacements.join(" | "))
    }
}

// =============================================================================
// Replacement
// =============================================================================

/// One chosen alternative, with the rule it came from.
#[derive(Clone, Debug)]
pub struct Replacement {
    rule: Arc<ProductionRule>,
    index: usize,
}

impl Replacement {
    /// Creates a replacement, or `None` if `index` is out of range.
    #[must_use]
    pub fn new(rule: Arc<ProductionRule>, index: usize) -> Option<Self> {
        (index < rule.replacements.len()).then_some(Self { rule, index })
    }

    /// The owning rule.
    #[must_use]
    pub fn rule(&self) -> &Arc<ProductionRule> {
        &self.rule
    }

    /// Index within the owning rule.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The alternative text.
    #[must_use]
    pub fn text(&self) -> &str {
        self.rule.replacements.get(self.index).map_or("", String::as_str)
    }

    /// The owning rule's attributes.
    #[must_use]
    pub fn attributes(&self) -> Option<&Attributes> {
        self.rule.attributes()
    }
}

impl PartialEq for Replacement {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && (Arc::ptr_eq(&self.rule, &other.rule) || self.rule == other.rule)
    }
}

impl Eq for Replacement {}

// =============================================================================
// Grammar
// =============================================================================

/// How rules from another grammar are merged in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeMode {
    /// Every rule.
    All,
    /// Every rule except the start symbol's.
    ExceptMain,
    /// The start symbol's rules become rules of the given non-terminal.
    MainAs(String),
}

/// A set of production rules.
#[derive(Clone, Debug, Default)]
pub struct Grammar {
    name: Option<String>,
    tier: DifficultyDegree,
    rules: HashMap<String, Vec<Arc<ProductionRule>>>,
    order: Vec<String>,
}

impl Grammar {
    /// Creates an empty, unnamed grammar of unknown tier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the tier.
    #[must_use]
    pub fn with_tier(mut self, tier: DifficultyDegree) -> Self {
        self.tier = tier;
        self
    }

    /// Adds a rule and returns the grammar.
    #[must_use]
    pub fn with_rule(mut self, rule: ProductionRule) -> Self {
        self.add_rule(rule);
        self
    }

    /// The grammar's name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sets the name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// The grammar's difficulty.
    #[must_use]
    pub fn tier(&self) -> DifficultyDegree {
        self.tier
    }

    /// Sets the difficulty.
    pub fn set_tier(&mut self, tier: DifficultyDegree) {
        self.tier = tier;
    }

    /// Adds a rule as a new group for its non-terminal. Empty rules are ignored.
    pub fn add_rule(&mut self, rule: ProductionRule) {
        self.add_shared(Arc::new(rule));
    }

    fn add_shared(&mut self, rule: Arc<ProductionRule>) {
        if rule.is_empty() {
            return;
        }
        let groups = self.rules.entry(rule.non_terminal.clone()).or_default();
        if groups.is_empty() {
            self.order.push(rule.non_terminal.clone());
        }
        groups.push(rule);
    }

    /// Merges the rules of `other`.
    pub fn merge(&mut self, other: &Self, mode: &MergeMode) {
        for rule in other.production_rules() {
            let is_main = rule.non_terminal == MAIN;
            match mode {
                MergeMode::All => self.add_shared(Arc::clone(rule)),
                MergeMode::ExceptMain if is_main => {}
                MergeMode::ExceptMain => self.add_shared(Arc::clone(rule)),
                MergeMode::MainAs(target) if is_main => self.add_rule(rule.renamed(target.clone())),
                MergeMode::MainAs(_) => self.add_shared(Arc::clone(rule)),
            }
        }
    }

    /// Returns true if rules exist for `non_terminal`.
    #[must_use]
    pub fn contains(&self, non_terminal: &str) -> bool {
        self.rules.contains_key(non_terminal)
    }

    /// The rule groups for `non_terminal`, in arrival order.
    #[must_use]
    pub fn rule_groups(&self, non_terminal: &str) -> &[Arc<ProductionRule>] {
        self.rules.get(non_terminal).map_or(&[], Vec::as_slice)
    }

    /// Every alternative of `non_terminal`, pooled across groups in arrival order.
    #[must_use]
    pub fn alternatives(&self, non_terminal: &str) -> Vec<Replacement> {
        self.rule_groups(non_terminal)
            .iter()
            .flat_map(|rule| {
                (0..rule.replacements.len()).map(|index| Replacement {
                    rule: Arc::clone(rule),
                    index,
                })
            })
            .collect()
    }

    /// Number of pooled alternatives of `non_terminal`.
    #[must_use]
    pub fn alternative_count(&self, non_terminal: &str) -> usize {
        self.rule_groups(non_terminal)
            .iter()
            .map(|r| r.replacements.len())
            .sum()
    }

    /// The pooled alternative at `index`.
    ///
    /// # Errors
    /// Returns an unknown-non-terminal error if there are no rules for the
    /// name, or an alternative-out-of-range error if `index` is too large.
    pub fn alternative(&self, non_terminal: &str, index: usize) -> Result<Replacement> {
        if !self.contains(non_terminal) {
            return Err(Error::unknown_non_terminal(non_terminal));
        }
        let mut remaining = index;
        for rule in self.rule_groups(non_terminal) {
            if remaining < rule.replacements.len() {
                return Ok(Replacement {
                    rule: Arc::clone(rule),
                    index: remaining,
                });
            }
            remaining -= rule.replacements.len();
        }
        Err(Error::alternative_out_of_range(
            non_terminal,
            index,
            self.alternative_count(non_terminal),
        ))
    }

    /// All rule groups, grouped by non-terminal in first-arrival order.
    pub fn production_rules(&self) -> impl Iterator<Item = &Arc<ProductionRule>> {
        self.order.iter().flat_map(|nt| self.rule_groups(nt))
    }

    /// Defined non-terminals in first-arrival order.
    pub fn non_terminals(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of defined non-terminals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no rules are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Non-terminals referenced by some alternative but never defined, sorted.
    #[must_use]
    pub fn unresolved_references(&self) -> Vec<String> {
        let mut missing = BTreeSet::new();
        for rule in self.production_rules() {
            for replacement in &rule.replacements {
                let Some(tokens) = split_rule(replacement) else {
                    continue;
                };
                for token in tokens {
                    if token.kind == RuleTokenKind::NonTerminal && !self.contains(token.text) {
                        missing.insert(token.text.to_string());
                    }
                }
            }
        }
        missing.into_iter().collect()
    }

    /// Non-terminals that can derive a finite sentence.
    ///
    /// A non-terminal terminates once one of its alternatives references only
    /// undefined or already terminating non-terminals. The set is grown to a
    /// fixed point.
    #[must_use]
    pub fn terminating(&self) -> BTreeSet<String> {
        let references: Vec<(&str, Vec<Vec<&str>>)> = self
            .order
            .iter()
            .map(|nt| {
                let alternatives = self
                    .rule_groups(nt)
                    .iter()
                    .flat_map(|rule| rule.replacements.iter())
                    .map(|text| self.defined_references(text))
                    .collect();
                (nt.as_str(), alternatives)
            })
            .collect();

        let mut done: BTreeSet<String> = BTreeSet::new();
        loop {
            let before = done.len();
            for (nt, alternatives) in &references {
                if !done.contains(*nt) && alternatives.iter().any(|refs| refs.iter().all(|r| done.contains(*r))) {
                    done.insert((*nt).to_string());
                }
            }
            if done.len() == before {
                return done;
            }
        }
    }

    /// Defined non-terminals referenced by one alternative. Unbalanced text
    /// references nothing, since it expands as a literal.
    fn defined_references<'t>(&self, text: &'t str) -> Vec<&'t str> {
        split_rule(text)
            .unwrap_or_default()
            .into_iter()
            .filter(|t| t.kind == RuleTokenKind::NonTerminal && self.contains(t.text))
            .map(|t| t.text)
            .collect()
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Grammar: Name={}, Tier={}, Rules={}]",
            self.name.as_deref().unwrap_or("unnamed"),
            self.tier,
            self.len()
        )
    }
}
