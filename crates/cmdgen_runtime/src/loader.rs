//! Grammar rule files.
//!
//! A rule file holds one production rule per line:
//!
//! ```text
//! $Main  = $deliver | $find
//! $deliver = (bring | give) me the {object} <=> { "Name": "Deliver", "Command": "deliver({object})" }
//! ```
//!
//! The text before `<=>` is branch-expanded into alternatives; the optional
//! JSON after it sets the rule's attributes. `//`, `#`, and `;` start a line
//! comment, `/* ... */` a block comment. Line comments may carry directives:
//!
//! - `grammar name <text>` and `grammar tier <easy|moderate|high>`
//! - `load <path>` merges every rule of another file
//! - `import <path>` merges every rule except `$Main`
//! - `import <path> as $Name` makes the imported `$Main` alternatives
//!   alternatives of `$Name`
//!
//! Paths are relative to the including file. A file that includes itself,
//! directly or through others, is skipped.

use std::fs;
use std::path::{Path, PathBuf};

use cmdgen_engine::{Attributes, Grammar, MAIN, MergeMode, ProductionRule, is_non_terminal};
use cmdgen_entities::DifficultyDegree;
use cmdgen_foundation::{Error, ErrorContext, Result};
use cmdgen_language::expand_branches;
use serde::Deserialize;
use tracing::{debug, info, warn};

// =============================================================================
// Loader
// =============================================================================

/// Loads grammars from rule files, following their include directives.
#[derive(Debug, Default)]
pub struct GrammarLoader {
    /// Files currently being loaded, outermost first.
    stack: Vec<PathBuf>,
}

impl GrammarLoader {
    /// Creates a loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a top-level grammar file.
    ///
    /// # Errors
    /// Returns an i/o error if the file cannot be read, a located syntax
    /// error for a malformed rule or attribute block, or an invalid-rule
    /// error if the grammar has no `$Main`.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Grammar> {
        self.load_file(path.as_ref(), true)
    }

    /// Loads a top-level grammar from text. Include directives resolve
    /// relative to `origin`'s directory and are ignored without one.
    ///
    /// # Errors
    /// See [`load`](Self::load).
    pub fn load_str(&mut self, text: &str, origin: Option<&Path>) -> Result<Grammar> {
        let grammar = self.parse(text, origin)?;
        require_main(&grammar, &source_name(origin))?;
        Ok(grammar)
    }

    fn load_file(&mut self, path: &Path, main_required: bool) -> Result<Grammar> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("cannot read grammar {}: {e}", path.display())))?;
        self.stack.push(canonical(path));
        let parsed = self.parse(&text, Some(path));
        self.stack.pop();
        let grammar = parsed?;
        if main_required {
            require_main(&grammar, &path.display().to_string())?;
        }
        info!(
            path = %path.display(),
            name = grammar.name().unwrap_or(""),
            non_terminals = grammar.len(),
            "grammar loaded"
        );
        Ok(grammar)
    }

    fn parse(&mut self, text: &str, origin: Option<&Path>) -> Result<Grammar> {
        let source = source_name(origin);
        let mut grammar = Grammar::new();

        for (index, line) in strip_block_comments(text).lines().enumerate() {
            let number = index + 1;
            let (code, comment) = split_comment(line);
            if let Some(directive) = comment.and_then(Directive::parse) {
                self.apply(&mut grammar, directive, origin)
                    .map_err(|e| locate(e, &source, number))?;
            }

            let code = code.trim();
            if code.is_empty() {
                continue;
            }
            match parse_rule(code).map_err(|e| locate(e, &source, number))? {
                Some(rule) => grammar.add_rule(rule),
                None => warn!(source = %source, line = number, "skipping line that is not a rule"),
            }
        }
        Ok(grammar)
    }

    fn apply(&mut self, grammar: &mut Grammar, directive: Directive, origin: Option<&Path>) -> Result<()> {
        match directive {
            Directive::Name(name) => {
                if grammar.name().is_none() {
                    grammar.set_name(name);
                }
            }
            Directive::Tier(tier) => {
                if grammar.tier() == DifficultyDegree::Unknown {
                    grammar.set_tier(tier);
                }
            }
            Directive::Include { import, path, target } => {
                let Some(dir) = origin.and_then(Path::parent) else {
                    warn!(path = %path, "include ignored outside a grammar file");
                    return Ok(());
                };
                let path = dir.join(path);
                if !path.is_file() {
                    warn!(path = %path.display(), "included grammar not found");
                    return Ok(());
                }
                if self.stack.contains(&canonical(&path)) {
                    warn!(path = %path.display(), "cyclic include skipped");
                    return Ok(());
                }
                let mode = match (import, target) {
                    (false, _) => MergeMode::All,
                    (true, None) => MergeMode::ExceptMain,
                    (true, Some(target)) => MergeMode::MainAs(target),
                };
                let included = self.load_file(&path, matches!(mode, MergeMode::MainAs(_)))?;
                debug!(path = %path.display(), ?mode, "merging included grammar");
                grammar.merge(&included, &mode);
            }
        }
        Ok(())
    }
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn source_name(origin: Option<&Path>) -> String {
    origin.map_or_else(|| "<text>".to_string(), |p| p.display().to_string())
}

fn require_main(grammar: &Grammar, source: &str) -> Result<()> {
    if grammar.contains(MAIN) {
        Ok(())
    } else {
        Err(Error::invalid_rule(format!("grammar defines no {MAIN} rule"))
            .with_context(ErrorContext::new().with_source(source)))
    }
}

/// Adds a file and line to an error, keeping the innermost location if an
/// included file already set one.
fn locate(error: Error, source: &str, line: usize) -> Error {
    if error.context.as_ref().is_some_and(|c| c.source.is_some()) {
        error.with_frame(format!("{source}:{line}"))
    } else {
        error.with_context(ErrorContext::new().with_source(source).with_line(line))
    }
}

// =============================================================================
// Comments and Directives
// =============================================================================

/// Removes `/* ... */` comments, keeping their line breaks so line numbers hold.
fn strip_block_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        let body = &rest[start + 2..];
        let end = body.find("*/").unwrap_or(body.len());
        out.extend(body[..end].chars().filter(|&c| c == '\n'));
        rest = body.get(end + 2..).unwrap_or("");
    }
    out.push_str(rest);
    out
}

/// Splits a line into code and line-comment text. Markers after `<=>` belong
/// to the attribute block.
fn split_comment(line: &str) -> (&str, Option<&str>) {
    let head = &line[..line.find("<=>").unwrap_or(line.len())];
    let marker = [
        head.find("//").map(|i| (i, 2)),
        head.find('#').map(|i| (i, 1)),
        head.find(';').map(|i| (i, 1)),
    ]
    .into_iter()
    .flatten()
    .min_by_key(|(i, _)| *i);
    match marker {
        Some((i, len)) => (&line[..i], Some(&line[i + len..])),
        None => (line, None),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Directive {
    Name(String),
    Tier(DifficultyDegree),
    Include {
        import: bool,
        path: String,
        target: Option<String>,
    },
}

impl Directive {
    fn parse(comment: &str) -> Option<Self> {
        let comment = comment.trim();
        let (keyword, rest) = comment.split_once(char::is_whitespace)?;
        let rest = rest.trim_start();
        match keyword {
            k if k.eq_ignore_ascii_case("grammar") => {
                let (field, value) = rest.split_once(char::is_whitespace)?;
                let value = value.trim();
                if field.eq_ignore_ascii_case("name") && !value.is_empty() {
                    Some(Self::Name(value.to_string()))
                } else if field.eq_ignore_ascii_case("tier") {
                    let word = value.split_whitespace().next()?;
                    match word.parse() {
                        Ok(tier) => Some(Self::Tier(tier)),
                        Err(e) => {
                            warn!(error = %e, "ignoring grammar tier");
                            None
                        }
                    }
                } else {
                    None
                }
            }
            "load" | "import" => {
                let (path, rest) = read_path(rest)?;
                let target = match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
                    ["as", nt] if is_non_terminal(nt) => Some((*nt).to_string()),
                    _ => None,
                };
                Some(Self::Include {
                    import: keyword == "import",
                    path,
                    target,
                })
            }
            _ => None,
        }
    }
}

/// Reads a bare or double-quoted path, returning it and the remaining text.
fn read_path(text: &str) -> Option<(String, &str)> {
    if let Some(quoted) = text.strip_prefix('"') {
        let mut path = String::new();
        let mut chars = quoted.char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => path.extend(chars.next().map(|(_, e)| e)),
                '"' => return Some((path, &quoted[i + 1..])),
                _ => path.push(c),
            }
        }
        None
    } else {
        let end = text.find(char::is_whitespace).unwrap_or(text.len());
        (end > 0).then(|| (text[..end].to_string(), &text[end..]))
    }
}

// =============================================================================
// Rules
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AttributesFile {
    #[serde(alias = "name")]
    name: Option<String>,
    #[serde(alias = "speakTo")]
    speak_to: Option<String>,
    #[serde(alias = "location")]
    location: Option<String>,
    #[serde(alias = "command")]
    command: Option<String>,
}

impl AttributesFile {
    fn into_attributes(self) -> Result<Attributes> {
        let mut attributes = Attributes::new();
        attributes.name = self.name;
        attributes.speak_to = self.speak_to;
        attributes.location = self.location;
        match self.command {
            Some(command) => attributes.with_command(&command),
            None => Ok(attributes),
        }
    }
}

/// Parses one rule line. Returns `None` if the line is not of the form
/// `$Name = ...`.
///
/// # Errors
/// Returns an invalid-rule error for an empty alternative list, a
/// serialization error for malformed attribute JSON, or an
/// invalid-path-expression error for a malformed command template.
pub fn parse_rule(line: &str) -> Result<Option<ProductionRule>> {
    let Some((name, rest)) = line.split_once('=') else {
        return Ok(None);
    };
    let name = name.trim();
    if !is_non_terminal(name) {
        return Ok(None);
    }
    let (body, attributes) = match rest.split_once("<=>") {
        Some((body, json)) => (body, Some(json.trim())),
        None => (rest, None),
    };

    let alternatives = expand_branches(body).unwrap_or_else(|| {
        warn!(rule = name, "unbalanced branch expression kept as a single alternative");
        vec![body.trim().to_string()]
    });
    let mut rule = ProductionRule::new(name, alternatives)?;

    if let Some(json) = attributes.filter(|j| !j.is_empty()) {
        let file: AttributesFile = serde_json::from_str(json)
            .map_err(|e| Error::serialization(format!("attributes of {name}: {e}")))?;
        rule = rule.with_attributes(file.into_attributes()?);
    }
    Ok(Some(rule))
}
