//! Parse trees of generated sentences.
//!
//! Nodes live in an arena owned by the [`TaskTree`] and refer to each other by
//! [`NodeId`]. Children are listed by their parent; each node also records
//! its parent's id for upward lookups.

use std::fmt::Write as _;

use cmdgen_entities::DifficultyDegree;
use cmdgen_language::{TextWildcard, WildcardParser, tidy_spacing};

use crate::binder::{Binding, Bindings};
use crate::grammar::{Attributes, Replacement};

// =============================================================================
// Nodes
// =============================================================================

/// Index of a node within its tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// What a node stands for.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// A non-terminal expanded by one of its alternatives.
    Rule {
        /// Name including the `$`.
        non_terminal: String,
        /// The chosen alternative.
        replacement: Replacement,
    },
    /// A non-terminal with no rules; renders as its name.
    Unresolved {
        /// Name including the `$`.
        non_terminal: String,
    },
    /// Plain text.
    Literal {
        /// The text, trimmed.
        text: String,
    },
    /// A `{...}` placeholder.
    Wildcard {
        /// The parsed placeholder.
        wildcard: TextWildcard,
    },
}

/// One node of a [`TaskTree`].
#[derive(Clone, Debug, PartialEq)]
pub struct TaskNode {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl TaskNode {
    /// What the node stands for.
    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The parent, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in sentence order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The non-terminal name of rule and unresolved nodes.
    #[must_use]
    pub fn non_terminal(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Rule { non_terminal, .. } | NodeKind::Unresolved { non_terminal } => {
                Some(non_terminal)
            }
            _ => None,
        }
    }

    /// The chosen alternative of a rule node.
    #[must_use]
    pub fn replacement(&self) -> Option<&Replacement> {
        match &self.kind {
            NodeKind::Rule { replacement, .. } => Some(replacement),
            _ => None,
        }
    }

    /// Attributes of the rule that produced this node.
    #[must_use]
    pub fn attributes(&self) -> Option<&Attributes> {
        self.replacement().and_then(Replacement::attributes)
    }

    /// The placeholder of a wildcard leaf.
    #[must_use]
    pub fn wildcard(&self) -> Option<&TextWildcard> {
        match &self.kind {
            NodeKind::Wildcard { wildcard } => Some(wildcard),
            _ => None,
        }
    }

    /// Returns true for rule and unresolved nodes.
    #[must_use]
    pub fn is_non_terminal(&self) -> bool {
        self.non_terminal().is_some()
    }
}

// =============================================================================
// Tree
// =============================================================================

/// A generated parse tree and, once bound, its wildcard values.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskTree {
    nodes: Vec<TaskNode>,
    tier: DifficultyDegree,
    bindings: Bindings,
}

impl TaskTree {
    /// Creates a tree with a single root node.
    #[must_use]
    pub fn new(root: NodeKind) -> Self {
        Self {
            nodes: vec![TaskNode {
                kind: root,
                parent: None,
                children: Vec::new(),
            }],
            tier: DifficultyDegree::Unknown,
            bindings: Bindings::new(),
        }
    }

    /// Appends a child under `parent` and returns its id.
    pub fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TaskNode {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Appends trimmed literal text. Blank text adds nothing.
    pub fn push_literal(&mut self, parent: NodeId, text: &str) -> Option<NodeId> {
        let text = text.trim();
        (!text.is_empty()).then(|| {
            self.push(
                parent,
                NodeKind::Literal {
                    text: text.to_string(),
                },
            )
        })
    }

    /// Appends a wildcard leaf, or a literal if `text` does not parse as one.
    pub fn push_wildcard(&mut self, parent: NodeId, text: &str, parser: &mut WildcardParser) -> Option<NodeId> {
        match parser.parse_at(text, 0) {
            Some(wildcard) => Some(self.push(parent, NodeKind::Wildcard { wildcard })),
            None => self.push_literal(parent, text),
        }
    }

    /// The root id.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Looks up a node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&TaskNode> {
        self.nodes.get(id.0)
    }

    /// Looks up a node created by this tree.
    ///
    /// # Panics
    /// Panics if `id` belongs to another tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &TaskNode {
        &self.nodes[id.0]
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Difficulty inherited from the grammar.
    #[must_use]
    pub fn tier(&self) -> DifficultyDegree {
        self.tier
    }

    /// Sets the difficulty.
    pub fn set_tier(&mut self, tier: DifficultyDegree) {
        self.tier = tier;
    }

    /// Values bound to the tree's wildcards.
    #[must_use]
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Replaces the bound values.
    pub fn set_bindings(&mut self, bindings: Bindings) {
        self.bindings = bindings;
    }

    /// Returns true once wildcards have been bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        !self.bindings.is_empty()
    }

    /// The binding shared by `wildcard`'s keycode.
    #[must_use]
    pub fn binding(&self, wildcard: &TextWildcard) -> Option<&Binding> {
        self.bindings.get(&wildcard.keycode())
    }

    /// `id` and all of its descendants, depth-first.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(node) = self.get(next) {
                stack.extend(node.children.iter().rev());
            }
        }
        out
    }

    /// Parents of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.get(id).and_then(TaskNode::parent), |p| {
            self.get(*p).and_then(TaskNode::parent)
        })
    }

    /// Rule nodes named `non_terminal` strictly below `id`, depth-first.
    #[must_use]
    pub fn find(&self, id: NodeId, non_terminal: &str) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .skip(1)
            .filter(|d| {
                matches!(&self.node(*d).kind, NodeKind::Rule { non_terminal: nt, .. } if nt == non_terminal)
            })
            .collect()
    }

    /// Wildcard leaves below `id` (inclusive), depth-first.
    #[must_use]
    pub fn wildcard_leaves(&self, id: NodeId) -> Vec<(NodeId, &TextWildcard)> {
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.node(d).wildcard().map(|w| (d, w)))
            .collect()
    }

    /// Every wildcard occurrence below `id`, nested ones included, depth-first.
    #[must_use]
    pub fn wildcards(&self, id: NodeId) -> Vec<&TextWildcard> {
        self.wildcard_leaves(id)
            .into_iter()
            .flat_map(|(_, w)| w.flatten())
            .collect()
    }

    /// The text a wildcard renders as.
    ///
    /// Obfuscated wildcards use the obfuscated value when one exists. Unbound
    /// wildcards render their source text.
    #[must_use]
    pub fn display_value(&self, wildcard: &TextWildcard) -> String {
        match self.binding(wildcard) {
            Some(binding) => binding.display(wildcard.obfuscated).to_string(),
            None => wildcard.source.clone(),
        }
    }

    /// The sentence this tree produces.
    #[must_use]
    pub fn render(&self) -> String {
        self.render_node(self.root())
    }

    /// The sentence fragment produced by the subtree at `id`.
    #[must_use]
    pub fn render_node(&self, id: NodeId) -> String {
        let mut raw = String::new();
        self.render_into(id, &mut raw);
        tidy_spacing(&raw)
    }

    fn render_into(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Rule { .. } => {
                for child in &node.children {
                    out.push(' ');
                    self.render_into(*child, out);
                }
            }
            NodeKind::Unresolved { non_terminal } => out.push_str(non_terminal),
            NodeKind::Literal { text } => out.push_str(text),
            NodeKind::Wildcard { wildcard } => out.push_str(&self.display_value(wildcard)),
        }
    }

    /// An indented listing of the tree, one node per line.
    #[must_use]
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.pretty_into(self.root(), 0, &mut out);
        out.truncate(out.trim_end().len());
        out
    }

    fn pretty_into(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = self.node(id);
        let indent = ".".repeat(depth * 2);
        let _ = match &node.kind {
            NodeKind::Rule { non_terminal, .. } => match node.attributes() {
                Some(attributes) => writeln!(out, "{indent}-> {non_terminal} {attributes}"),
                None => writeln!(out, "{indent}-> {non_terminal}"),
            },
            NodeKind::Unresolved { non_terminal } => writeln!(out, "{indent}-> {non_terminal} (unresolved)"),
            NodeKind::Literal { text } => writeln!(out, "{indent}-> {text}"),
            NodeKind::Wildcard { wildcard } => writeln!(out, "{indent}-> {}", wildcard.source),
        };
        for child in &node.children {
            self.pretty_into(*child, depth + 1, out);
        }
    }
}
