//! Session state for the interactive generator.
//!
//! The session owns a [`TaskGenerator`] and interprets one line of input at
//! a time. It never prints; [`Repl`](crate::Repl) and the CLI decide how
//! outcomes are shown.

use std::fmt::Write as _;

use cmdgen_engine::{PathStep, Task, TaskGenerator, parse_path};
use cmdgen_foundation::Result;

/// A parsed line of session input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Empty line: generate a random task.
    Generate,
    /// `path name[:i] ...`: generate following the given choices.
    Guided(Vec<PathStep>),
    /// `seed <n>`: restart the random source.
    Seed(u64),
    /// `help` or `?`.
    Help,
    /// `q`, `quit`, or `exit`.
    Quit,
    /// Anything else.
    Unrecognized(String),
}

impl Command {
    /// Parses one line.
    ///
    /// # Errors
    /// Returns an invalid-path-expression error for a malformed `path`
    /// argument.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map_or((input, ""), |(w, r)| (w, r.trim()));
        Ok(match word.to_ascii_lowercase().as_str() {
            "" => Self::Generate,
            "q" | "quit" | "exit" => Self::Quit,
            "help" | "?" => Self::Help,
            "path" => Self::Guided(parse_path(rest)?),
            "seed" => match rest.parse() {
                Ok(seed) => Self::Seed(seed),
                Err(_) => Self::Unrecognized(format!("`{rest}` is not a seed")),
            },
            _ => Self::Unrecognized(format!("unknown command `{word}`")),
        })
    }
}

/// What executing a command produced.
#[derive(Debug)]
pub enum Outcome {
    /// A task was generated.
    Task(Box<Task>),
    /// The generator was reseeded.
    Reseeded(u64),
    /// Usage text.
    Help(&'static str),
    /// The session should end.
    Quit,
    /// The input was not understood.
    Unrecognized(String),
}

/// Usage text shown by `help`.
pub const HELP: &str = "\
  <Enter>             generate a random task
  path NAME[:I] ...   generate following the given rule choices
  seed N              restart the random source from N
  help                show this text
  q                   quit";

/// Interactive session state.
#[derive(Debug)]
pub struct Session {
    generator: TaskGenerator,
    generated: usize,
    last: Option<Task>,
}

impl Session {
    /// Creates a session around a generator.
    #[must_use]
    pub fn new(generator: TaskGenerator) -> Self {
        Self {
            generator,
            generated: 0,
            last: None,
        }
    }

    /// The generator.
    #[must_use]
    pub fn generator(&self) -> &TaskGenerator {
        &self.generator
    }

    /// How many tasks this session has generated.
    #[must_use]
    pub fn generated(&self) -> usize {
        self.generated
    }

    /// The most recent task.
    #[must_use]
    pub fn last_task(&self) -> Option<&Task> {
        self.last.as_ref()
    }

    /// Non-terminal names without `$`, for completing `path` arguments.
    #[must_use]
    pub fn keywords(&self) -> Vec<String> {
        self.generator
            .grammar()
            .non_terminals()
            .map(|nt| nt.trim_start_matches('$').to_string())
            .collect()
    }

    /// Parses and runs one line of input.
    ///
    /// # Errors
    /// Returns parse errors for malformed arguments and generation errors
    /// once retries are exhausted.
    pub fn execute(&mut self, input: &str) -> Result<Outcome> {
        match Command::parse(input)? {
            Command::Generate => self.generate(&[]),
            Command::Guided(path) => self.generate(&path),
            Command::Seed(seed) => {
                self.generator.reseed(seed);
                Ok(Outcome::Reseeded(seed))
            }
            Command::Help => Ok(Outcome::Help(HELP)),
            Command::Quit => Ok(Outcome::Quit),
            Command::Unrecognized(message) => Ok(Outcome::Unrecognized(message)),
        }
    }

    fn generate(&mut self, path: &[PathStep]) -> Result<Outcome> {
        let task = self.generator.generate_guided(path)?;
        self.generated += 1;
        self.last = Some(task.clone());
        Ok(Outcome::Task(Box::new(task)))
    }
}

/// Formats a task the way the session shows it: sentence, remarks, parse
/// tree, and command.
#[must_use]
pub fn format_task(task: &Task, color: bool) -> String {
    let (bold, dim, reset) = if color {
        ("\x1b[1m", "\x1b[2m", "\x1b[0m")
    } else {
        ("", "", "")
    };
    let mut out = format!("{bold}{}{reset}\n", task.sentence());
    for remark in task.remarks() {
        let _ = writeln!(out, "{remark}");
    }
    let _ = writeln!(out, "{dim}{}{reset}", task.pretty());
    match (task.command(), task.command_error()) {
        (Some(command), _) => {
            let _ = write!(out, "command: {command}");
        }
        (None, Some(error)) => {
            let _ = write!(out, "command error: {error}");
        }
        (None, None) => out.push_str("command: (none)"),
    }
    out
}
