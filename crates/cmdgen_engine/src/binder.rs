//! Binding wildcards to catalog entities.
//!
//! Every wildcard occurrence in a tree, nested ones included, is grouped by
//! keycode. Each group receives one [`Binding`], popped from a shuffled copy of
//! the catalog so that no two groups of the same kind share an entity.
//! Pronouns are resolved in a second pass once the names they refer to are
//! known.
//!
//! Binding either succeeds for the whole tree or fails; a failed tree keeps no
//! partial values.

use std::collections::{BTreeMap, HashMap, HashSet};

use cmdgen_entities::{Catalog, Gender, ObjectKind};
use cmdgen_foundation::{Error, Pool, Queryable, Result};
use cmdgen_language::{ConditionalStatement, Keycode, NestedIn, TextWildcard, where_clause};
use rand::Rng;
use tracing::{debug, trace};

use crate::config::SubKindPolicy;
use crate::pronoun::{PronounGender, third_person};
use crate::tree::TaskTree;

// =============================================================================
// Binding
// =============================================================================

/// The value shared by every occurrence of one keycode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    /// The kind actually bound, e.g. `beacon` for an untyped `{location}`.
    pub keyword: String,
    /// The bound entity's name.
    pub value: String,
    /// Less specific alternative, shown for `?` wildcards.
    pub obfuscated: Option<String>,
    /// Gender of a bound person name.
    pub gender: Option<Gender>,
    /// Extra remark lines, e.g. a question's answer.
    pub remarks: Vec<String>,
}

impl Binding {
    /// Creates a binding with only a value.
    #[must_use]
    pub fn new(keyword: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            value: value.into(),
            obfuscated: None,
            gender: None,
            remarks: Vec::new(),
        }
    }

    /// A binding that renders as nothing.
    #[must_use]
    pub fn hidden(keyword: impl Into<String>) -> Self {
        Self::new(keyword, "").with_obfuscated("")
    }

    /// Sets the obfuscated value.
    #[must_use]
    pub fn with_obfuscated(mut self, obfuscated: impl Into<String>) -> Self {
        self.obfuscated = Some(obfuscated.into());
        self
    }

    /// Sets the gender.
    #[must_use]
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// Sets the remark lines.
    #[must_use]
    pub fn with_remarks(mut self, remarks: impl IntoIterator<Item = String>) -> Self {
        self.remarks = remarks.into_iter().collect();
        self
    }

    /// The text to render, honoring the `?` flag when an obfuscated value exists.
    #[must_use]
    pub fn display(&self, obfuscated: bool) -> &str {
        match (&self.obfuscated, obfuscated) {
            (Some(o), true) => o,
            _ => &self.value,
        }
    }

    /// Returns true for person-name bindings.
    #[must_use]
    pub fn is_person(&self) -> bool {
        matches!(self.keyword.as_str(), "name" | "male" | "female")
    }
}

/// Bindings of one tree, keyed by keycode.
pub type Bindings = BTreeMap<Keycode, Binding>;

// =============================================================================
// Occurrences and Groups
// =============================================================================

struct Occurrence<'t> {
    wildcard: &'t TextWildcard,
    parent: Option<Keycode>,
    order: usize,
}

struct Group<'t> {
    keycode: Keycode,
    members: Vec<Occurrence<'t>>,
}

impl Group<'_> {
    fn name(&self) -> &str {
        &self.keycode.name
    }

    /// The most common type tag among members, counting untyped ones; ties go
    /// to the tag seen first.
    fn type_tag(&self) -> Option<&str> {
        let mut counts: Vec<(Option<&str>, usize)> = Vec::new();
        for member in &self.members {
            let tag = member.wildcard.type_tag.as_deref();
            match counts.iter_mut().find(|(t, _)| *t == tag) {
                Some((_, n)) => *n += 1,
                None => counts.push((tag, 1)),
            }
        }
        let mut best: Option<(Option<&str>, usize)> = None;
        for (tag, n) in counts {
            if best.is_none_or(|(_, m)| n > m) {
                best = Some((tag, n));
            }
        }
        best.and_then(|(tag, _)| tag)
    }

    fn is_pronoun(&self) -> bool {
        self.name() == "pron"
    }
}

fn collect(tree: &TaskTree) -> Vec<Occurrence<'_>> {
    fn walk<'t>(wildcard: &'t TextWildcard, parent: Option<Keycode>, out: &mut Vec<Occurrence<'t>>) {
        let order = out.len();
        out.push(Occurrence {
            wildcard,
            parent,
            order,
        });
        for child in &wildcard.children {
            walk(child, Some(wildcard.keycode()), out);
        }
    }

    let mut out = Vec::new();
    for (_, wildcard) in tree.wildcard_leaves(tree.root()) {
        walk(wildcard, None, &mut out);
    }
    out
}

fn group(occurrences: Vec<Occurrence<'_>>) -> Vec<Group<'_>> {
    let mut groups: Vec<Group<'_>> = Vec::new();
    let mut index: HashMap<Keycode, usize> = HashMap::new();
    for occurrence in occurrences {
        let keycode = occurrence.wildcard.keycode();
        match index.get(&keycode) {
            Some(&i) => groups[i].members.push(occurrence),
            None => {
                index.insert(keycode.clone(), groups.len());
                groups.push(Group {
                    keycode,
                    members: vec![occurrence],
                });
            }
        }
    }
    groups
}

// =============================================================================
// Binder
// =============================================================================

/// Binds every wildcard of `tree`, consuming candidates from `pools`.
///
/// `pools` should be a shuffled copy of the master catalog; it is left with
/// whatever was not bound.
///
/// # Errors
/// Returns a pool-exhausted error when no candidate satisfies a wildcard, or
/// an invalid-where-clause error for a malformed clause.
pub fn bind<R: Rng + ?Sized>(
    tree: &TaskTree,
    pools: &mut Catalog,
    rng: &mut R,
    policy: SubKindPolicy,
) -> Result<Bindings> {
    let groups = group(collect(tree));
    let mut binder = Binder {
        groups: &groups,
        index: groups
            .iter()
            .enumerate()
            .map(|(i, g)| (g.keycode.clone(), i))
            .collect(),
        pools,
        rng,
        policy,
        bindings: Bindings::new(),
        visiting: HashSet::new(),
    };

    for group in &groups {
        if !group.is_pronoun() {
            binder.bind_group(&group.keycode)?;
        }
    }
    for group in groups.iter().filter(|g| g.is_pronoun()) {
        binder.bind_pronoun(group);
    }
    debug!(bound = binder.bindings.len(), "wildcards bound");
    Ok(binder.bindings)
}

struct Binder<'a, 't, R: ?Sized> {
    groups: &'a [Group<'t>],
    index: HashMap<Keycode, usize>,
    pools: &'a mut Catalog,
    rng: &'a mut R,
    policy: SubKindPolicy,
    bindings: Bindings,
    visiting: HashSet<Keycode>,
}

impl<R: Rng + ?Sized> Binder<'_, '_, R> {
    fn bind_group(&mut self, keycode: &Keycode) -> Result<()> {
        if self.bindings.contains_key(keycode) || !self.visiting.insert(keycode.clone()) {
            return Ok(());
        }
        let Some(&i) = self.index.get(keycode) else {
            return Ok(());
        };
        let groups = self.groups;
        let group = &groups[i];

        // Wildcards nested in a where clause are bound first so their values
        // can be spliced into the clause.
        for member in &group.members {
            for child in &member.wildcard.children {
                if child.nested_in == Some(NestedIn::Where) && !child.is_pronoun() {
                    self.bind_group(&child.keycode())?;
                }
            }
        }

        let clause = self.clause(group)?;
        let binding = self
            .resolve(group, clause.as_ref())
            .map_err(|e| e.with_frame(group.keycode.to_string()))?;
        trace!(keycode = %group.keycode, value = %binding.value, "bound");
        self.bindings.insert(group.keycode.clone(), binding);
        Ok(())
    }

    /// The conjunction of every member's where clause, with nested values spliced in.
    fn clause(&self, group: &Group<'_>) -> Result<Option<ConditionalStatement>> {
        let mut statements = Vec::new();
        for member in &group.members {
            let wildcard = member.wildcard;
            let Some(raw) = wildcard.where_clause.as_deref() else {
                continue;
            };
            let text = wildcard
                .rendered_where(|child| {
                    let value = &self.bindings.get(&child.keycode())?.value;
                    let quoted = raw[..child.span.start.min(raw.len())].ends_with(['"', '\'']);
                    Some(if quoted {
                        value.clone()
                    } else {
                        format!("\"{value}\"")
                    })
                })
                .unwrap_or_default();
            if text.trim().is_empty() {
                continue;
            }
            let statement = where_clause::parse(&text).map_err(|e| e.with_frame(group.keycode.to_string()))?;
            statements.push(statement);
        }
        Ok(ConditionalStatement::all(statements))
    }

    fn resolve(&mut self, group: &Group<'_>, clause: Option<&ConditionalStatement>) -> Result<Binding> {
        let name = group.name().to_string();
        let type_tag = group.type_tag().map(str::to_string);
        let has_where = clause.is_some();

        match name.as_str() {
            "category" => {
                let c = take(&mut self.pools.categories, |_| true, clause, &name, &group.keycode)?;
                Ok(Binding::new(name.as_str(), c.name()).with_obfuscated("objects"))
            }
            "gesture" => {
                let g = take(&mut self.pools.gestures, |_| true, clause, &name, &group.keycode)?;
                Ok(Binding::new(name.as_str(), g.name()))
            }
            "name" | "male" | "female" => {
                let keyword = self.keyword(&name, "name", type_tag, has_where, &["male", "female"]);
                let gender = match keyword.as_str() {
                    "male" => Some(Gender::Male),
                    "female" => Some(Gender::Female),
                    _ => None,
                };
                let n = take(
                    &mut self.pools.names,
                    |n| gender.is_none_or(|g| n.gender() == g),
                    clause,
                    &keyword,
                    &group.keycode,
                )?;
                Ok(Binding::new(keyword, n.name())
                    .with_obfuscated("a person")
                    .with_gender(n.gender()))
            }
            "location" | "beacon" | "room" | "placement" => {
                let keyword = self.keyword(
                    &name,
                    "location",
                    type_tag,
                    has_where,
                    &["beacon", "room", "placement"],
                );
                let pool = &mut self.pools.locations;
                let (l, obfuscated) = match keyword.as_str() {
                    "beacon" => {
                        let l = take(pool, |l| l.is_beacon(), clause, &keyword, &group.keycode)?;
                        let room = l.room_name().to_string();
                        (l, room)
                    }
                    "room" => (
                        take(pool, |l| l.is_room(), clause, &keyword, &group.keycode)?,
                        "apartment".to_string(),
                    ),
                    "placement" => {
                        let l = take(pool, |l| l.is_placement(), clause, &keyword, &group.keycode)?;
                        let room = l.room_name().to_string();
                        (l, room)
                    }
                    _ => (
                        take(pool, |_| true, clause, &keyword, &group.keycode)?,
                        "somewhere".to_string(),
                    ),
                };
                Ok(Binding::new(keyword, l.name()).with_obfuscated(obfuscated))
            }
            "object" | "kobject" | "aobject" | "sobject" => {
                let type_tag = type_tag.map(|t| match t.chars().next() {
                    Some(first) => format!("{first}object"),
                    None => t,
                });
                let keyword = self.keyword(&name, "object", type_tag, has_where, &["kobject", "aobject"]);
                let kind = ObjectKind::from_keyword(&keyword);
                let o = take(
                    &mut self.pools.objects,
                    |o| kind.is_none_or(|k| o.kind() == k),
                    clause,
                    &keyword,
                    &group.keycode,
                )?;
                Ok(Binding::new(keyword, o.name()).with_obfuscated(o.category()))
            }
            "question" => {
                let q = take(&mut self.pools.questions, |_| true, clause, &name, &group.keycode)?;
                Ok(Binding::new(name.as_str(), Queryable::name(&*q))
                    .with_obfuscated("question")
                    .with_remarks(q.metadata()))
            }
            _ => Ok(Binding::hidden(name)),
        }
    }

    /// Chooses the sub-kind to bind.
    ///
    /// A specific name (`male`, `beacon`, ...) is its own keyword. The family
    /// name stays generic if it has a where clause, even when it also carries
    /// a type tag; otherwise it uses its type tag or asks the sub-kind policy.
    fn keyword(
        &mut self,
        name: &str,
        family: &str,
        type_tag: Option<String>,
        has_where: bool,
        options: &[&str],
    ) -> String {
        if name != family {
            return name.to_string();
        }
        if has_where {
            return family.to_string();
        }
        if let Some(tag) = type_tag {
            return tag;
        }
        self.policy.choose(&mut *self.rng, options).to_string()
    }

    fn bind_pronoun(&mut self, group: &Group<'_>) {
        let gender = group
            .members
            .iter()
            .find_map(|m| self.referee_gender(m))
            .unwrap_or_default();
        let value = third_person(group.type_tag(), gender);
        self.bindings
            .insert(group.keycode.clone(), Binding::new("pron", value));
    }

    /// Gender of the person a pronoun occurrence refers to: its enclosing
    /// wildcard if it is nested, else the nearest person wildcard before it.
    fn referee_gender(&self, member: &Occurrence<'_>) -> Option<PronounGender> {
        if let Some(parent) = &member.parent {
            let binding = self.bindings.get(parent)?;
            return Some(binding.gender.into());
        }
        let earlier = self
            .groups
            .iter()
            .flat_map(|g| g.members.iter().map(move |m| (g, m)))
            .filter(|(_, m)| m.order < member.order)
            .filter_map(|(g, m)| self.bindings.get(&g.keycode).map(|b| (m.order, b)))
            .filter(|(_, b)| b.is_person())
            .max_by_key(|(order, _)| *order)?;
        Some(earlier.1.gender.into())
    }
}

/// Pops a candidate accepted by `filter` and, if given, `clause`.
///
/// With a clause the first match is taken; without one, the last.
fn take<T, F>(
    pool: &mut Pool<T>,
    filter: F,
    clause: Option<&ConditionalStatement>,
    kind: &str,
    keycode: &Keycode,
) -> Result<T>
where
    T: Clone + Queryable,
    F: Fn(&T) -> bool,
{
    let found = match clause {
        Some(clause) => pool.pop_first(|c| filter(c) && clause.evaluate(c)),
        None => pool.pop_last_where(&filter),
    };
    found.ok_or_else(|| {
        debug!(%keycode, kind, "candidate pool exhausted");
        Error::pool_exhausted(kind, keycode.to_string())
    })
}
