//! Finished tasks.

use std::collections::BTreeSet;
use std::fmt;

use cmdgen_entities::DifficultyDegree;
use cmdgen_foundation::{Error, Result};
use cmdgen_language::capitalize;
use tracing::debug;

use crate::render::{carries_command, render_command};
use crate::tree::TaskTree;

/// A block of notes printed under a task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Remark {
    /// What the lines are about, usually a bound value.
    pub heading: String,
    /// The notes.
    pub lines: Vec<String>,
}

impl Remark {
    /// Creates a remark.
    #[must_use]
    pub fn new(heading: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            heading: heading.into(),
            lines,
        }
    }
}

impl fmt::Display for Remark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.heading)?;
        for line in &self.lines {
            write!(f, "\n\t{line}")?;
        }
        Ok(())
    }
}

/// A bound tree together with its sentence, remarks, and command.
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    tree: TaskTree,
    sentence: String,
    remarks: Vec<Remark>,
    /// `None` when no rule in the tree defines a command.
    command: Option<Result<String>>,
}

impl Task {
    /// Renders a (normally bound) tree into a task.
    #[must_use]
    pub fn new(tree: TaskTree) -> Self {
        let sentence = capitalize(&tree.render());
        let remarks = collect_remarks(&tree);
        let command = carries_command(&tree, tree.root()).then(|| {
            render_command(&tree).inspect_err(|e| debug!(error = %e, "command did not render"))
        });
        Self {
            tree,
            sentence,
            remarks,
            command,
        }
    }

    /// The parse tree.
    #[must_use]
    pub fn tree(&self) -> &TaskTree {
        &self.tree
    }

    /// The sentence, first letter capitalized.
    #[must_use]
    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    /// Difficulty inherited from the grammar.
    #[must_use]
    pub fn tier(&self) -> DifficultyDegree {
        self.tree.tier()
    }

    /// Notes attached through wildcard metadata and predefined questions.
    #[must_use]
    pub fn remarks(&self) -> &[Remark] {
        &self.remarks
    }

    /// The remarks as one block of text.
    #[must_use]
    pub fn remarks_text(&self) -> String {
        self.remarks
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The rendered command, if the grammar defines one for this tree and it
    /// rendered.
    #[must_use]
    pub fn command(&self) -> Option<&str> {
        self.command.as_ref()?.as_deref().ok()
    }

    /// Why the command failed to render, when the tree defines one.
    #[must_use]
    pub fn command_error(&self) -> Option<&Error> {
        self.command.as_ref()?.as_ref().err()
    }

    /// The indented parse tree.
    #[must_use]
    pub fn pretty(&self) -> String {
        self.tree.pretty()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sentence)?;
        for remark in &self.remarks {
            write!(f, "\n{remark}")?;
        }
        Ok(())
    }
}

/// One remark per wildcard with metadata, headed by its value; metadata of
/// hidden wildcards is gathered under `remarks`. Each question adds its
/// `Q:`/`A:` lines once.
fn collect_remarks(tree: &TaskTree) -> Vec<Remark> {
    let mut remarks = Vec::new();
    let mut anonymous = Vec::new();
    let mut seen_questions = BTreeSet::new();

    for wildcard in tree.wildcards(tree.root()) {
        if let Some(text) = wildcard.rendered_metadata(|child| Some(tree.display_value(child))) {
            if !text.is_empty() {
                let heading = tree.display_value(wildcard);
                if heading.is_empty() {
                    anonymous.push(text);
                } else {
                    remarks.push(Remark::new(heading, vec![text]));
                }
            }
        }
        if let Some(binding) = tree.binding(wildcard) {
            if !binding.remarks.is_empty() && seen_questions.insert(wildcard.keycode()) {
                remarks.push(Remark::new(binding.keyword.clone(), binding.remarks.clone()));
            }
        }
    }
    if !anonymous.is_empty() {
        remarks.push(Remark::new("remarks", anonymous));
    }
    remarks
}
