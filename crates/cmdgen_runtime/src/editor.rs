//! Line editor abstraction for the interactive session.
//!
//! The session talks to a [`LineEditor`], so tests can drive it with scripted
//! input while the binary uses rustyline.

use std::borrow::Cow;

use cmdgen_foundation::{Error, Result};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::{Completer, Config, Context, Editor, Helper, Hinter, Validator};

/// Session commands offered for completion.
pub const COMMANDS: [&str; 4] = ["help", "path", "seed", "quit"];

/// Result of reading a line from the editor.
#[derive(Debug)]
pub enum ReadResult {
    /// A line was successfully read.
    Line(String),
    /// User pressed Ctrl+C.
    Interrupted,
    /// User pressed Ctrl+D (EOF).
    Eof,
}

/// Abstraction over line editing functionality.
pub trait LineEditor {
    /// Read a line with the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Add a line to history.
    fn add_history(&mut self, line: &str);

    /// Set the words offered after `path`, normally the grammar's
    /// non-terminal names.
    fn set_keywords(&mut self, keywords: Vec<String>);
}

#[derive(Helper, Completer, Hinter, Validator)]
struct SessionHelper {
    #[rustyline(Completer)]
    completer: SessionCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
}

impl Highlighter for SessionHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let word_end = line.find(char::is_whitespace).unwrap_or(line.len());
        if COMMANDS.contains(&&line[..word_end]) {
            Cow::Owned(format!("\x1b[1;36m{}\x1b[0m{}", &line[..word_end], &line[word_end..]))
        } else {
            Cow::Borrowed(line)
        }
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(&'s self, prompt: &'p str, default: bool) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1;32m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }
}

/// Completes session commands, then non-terminal names after `path`.
#[derive(Default)]
struct SessionCompleter {
    keywords: Vec<String>,
}

impl SessionCompleter {
    fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<String>) {
        let start = line[..pos]
            .rfind(|c: char| c.is_whitespace() || c == ',')
            .map_or(0, |i| i + 1);
        let word = &line[start..pos];

        let words: Vec<String> = if start == 0 {
            COMMANDS.iter().map(|c| (*c).to_string()).collect()
        } else if line.trim_start().starts_with("path") {
            self.keywords.clone()
        } else {
            Vec::new()
        };
        let matches = words.into_iter().filter(|w| w.starts_with(word)).collect();
        (start, matches)
    }
}

impl Completer for SessionCompleter {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, words) = self.candidates(line, pos);
        let pairs = words
            .into_iter()
            .map(|w| Pair {
                display: w.clone(),
                replacement: w,
            })
            .collect();
        Ok((start, pairs))
    }
}

/// Line editor implementation using rustyline.
pub struct RustylineEditor {
    editor: Editor<SessionHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Creates a new rustyline-based editor.
    ///
    /// # Errors
    ///
    /// Returns an error if rustyline initialization fails.
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(1000)
            .map_err(|e| Error::internal(e.to_string()))?
            .build();

        let helper = SessionHelper {
            completer: SessionCompleter::default(),
            hinter: HistoryHinter::new(),
        };

        let mut editor = Editor::with_config(config).map_err(|e| Error::internal(e.to_string()))?;
        editor.set_helper(Some(helper));

        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(Error::io(e.to_string())),
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }

    fn set_keywords(&mut self, keywords: Vec<String>) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.completer.keywords = keywords;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completer() -> SessionCompleter {
        SessionCompleter {
            keywords: vec!["Main".into(), "deliver".into(), "find".into()],
        }
    }

    #[test]
    fn completes_commands_at_line_start() {
        let (start, words) = completer().candidates("se", 2);
        assert_eq!(start, 0);
        assert_eq!(words, ["seed"]);
    }

    #[test]
    fn completes_non_terminals_after_path() {
        let line = "path Main:0 de";
        let (start, words) = completer().candidates(line, line.len());
        assert_eq!(start, 12);
        assert_eq!(words, ["deliver"]);
    }

    #[test]
    fn nothing_after_other_commands() {
        let line = "seed 4";
        assert!(completer().candidates(line, line.len()).1.is_empty());
    }

    #[test]
    fn highlights_known_commands() {
        let helper = SessionHelper {
            completer: completer(),
            hinter: HistoryHinter::new(),
        };
        assert!(helper.highlight("seed 3", 0).contains("\x1b[1;36mseed"));
        assert_eq!(helper.highlight("hello", 0), "hello");
    }
}
