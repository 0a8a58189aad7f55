//! Command rendering.
//!
//! A rule node whose attributes carry a command template renders that
//! template. Any other node hands off to the one child subtree that contains a
//! template; none or several is an error.

use std::collections::BTreeSet;

use cmdgen_foundation::{Error, Result};
use cmdgen_language::{PathExpression, PathPart};

use crate::tree::{NodeId, TaskTree};

/// Renders the command of a whole tree.
///
/// # Errors
/// Returns render-path-not-found or ambiguous-render-path when a template
/// reference, or the hand-off to a child, does not resolve to exactly one
/// target.
pub fn render_command(tree: &TaskTree) -> Result<String> {
    render_node_command(tree, tree.root())
}

/// Renders the command of the subtree at `id`.
///
/// # Errors
/// See [`render_command`].
pub fn render_node_command(tree: &TaskTree, id: NodeId) -> Result<String> {
    let node = tree
        .get(id)
        .ok_or_else(|| Error::internal(format!("node {} is not in the tree", id.index())))?;
    let label = node.non_terminal().unwrap_or("").to_string();

    if let Some(template) = node.attributes().and_then(|a| a.command.as_ref()) {
        return expand(tree, id, template).map_err(|e| e.with_frame(label));
    }

    let mut carriers = node.children().iter().copied().filter(|c| carries_command(tree, *c));
    match (carriers.next(), carriers.next()) {
        (Some(child), None) => render_node_command(tree, child).map_err(|e| e.with_frame(label)),
        (None, _) => Err(Error::render_path_not_found(label)),
        (Some(_), Some(_)) => Err(Error::ambiguous_render_path(label)),
    }
}

/// Returns true if the subtree at `id` (inclusive) holds a command template.
#[must_use]
pub fn carries_command(tree: &TaskTree, id: NodeId) -> bool {
    tree.descendants(id).into_iter().any(|d| {
        tree.node(d)
            .attributes()
            .is_some_and(|a| a.command.is_some())
    })
}

fn expand(tree: &TaskTree, id: NodeId, template: &PathExpression) -> Result<String> {
    let mut out = String::new();
    for part in template.parts() {
        match part {
            PathPart::Text(text) => out.push_str(text),
            PathPart::Capture { non_terminal, index } => {
                let target = select(tree.find(id, non_terminal), *index, &token('$', non_terminal, *index))?;
                out.push_str(&tree.render_node(target));
            }
            PathPart::Command { non_terminal, index } => {
                let target = select(tree.find(id, non_terminal), *index, &token('%', non_terminal, *index))?;
                out.push_str(&render_node_command(tree, target)?);
            }
            PathPart::Wildcard { name, id: wildcard_id } => {
                out.push_str(&wildcard_value(tree, id, name, *wildcard_id)?);
            }
        }
    }
    Ok(out)
}

fn token(sigil: char, non_terminal: &str, index: Option<usize>) -> String {
    let name = non_terminal.trim_start_matches('$');
    match index {
        Some(i) => format!("{sigil}{name}:{i}"),
        None => format!("{sigil}{name}"),
    }
}

fn select(matches: Vec<NodeId>, index: Option<usize>, token: &str) -> Result<NodeId> {
    match index {
        Some(i) => matches
            .get(i)
            .copied()
            .ok_or_else(|| Error::render_path_not_found(token)),
        None => match matches.as_slice() {
            [only] => Ok(*only),
            [] => Err(Error::render_path_not_found(token)),
            _ => Err(Error::ambiguous_render_path(token)),
        },
    }
}

/// The unobfuscated value bound to `{name[ id]}` within the subtree.
fn wildcard_value(tree: &TaskTree, id: NodeId, name: &str, wildcard_id: Option<u32>) -> Result<String> {
    let reference = match wildcard_id {
        Some(w) => format!("{{{name} {w}}}"),
        None => format!("{{{name}}}"),
    };
    let found: Vec<_> = tree
        .wildcards(id)
        .into_iter()
        .filter(|w| w.name == name && wildcard_id.is_none_or(|i| w.id == i))
        .collect();
    let keycodes: BTreeSet<_> = found.iter().map(|w| w.keycode()).collect();
    match (found.first(), keycodes.len()) {
        (None, _) => Err(Error::render_path_not_found(reference)),
        (Some(_), n) if n > 1 => Err(Error::ambiguous_render_path(reference)),
        (Some(w), _) => Ok(tree
            .binding(w)
            .map_or_else(|| w.source.clone(), |b| b.value.clone())),
    }
}
