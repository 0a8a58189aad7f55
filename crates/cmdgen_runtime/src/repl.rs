//! The interactive loop.

use std::io::{self, Write};

use cmdgen_foundation::{Error, Result};

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::{Outcome, Session, format_task};

/// The interactive task generator.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Generator state.
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Prompt.
    prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, session))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a REPL with the given editor.
    pub fn with_editor(mut editor: E, session: Session) -> Self {
        editor.set_keywords(session.keywords());
        Self {
            editor,
            session,
            show_banner: true,
            prompt: "gpsr> ".to_string(),
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Runs until `q` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        while self.read_eval_print()? {}

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let input = match self.editor.read_line(&self.prompt)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => return Ok(true),
            ReadResult::Eof => return Ok(false),
        };

        if !input.trim().is_empty() {
            self.editor.add_history(&input);
        }

        match self.session.execute(&input) {
            Ok(Outcome::Task(task)) => println!("{}\n", format_task(&task, true)),
            Ok(Outcome::Reseeded(seed)) => println!("seed set to {seed}"),
            Ok(Outcome::Help(text)) => println!("{text}"),
            Ok(Outcome::Quit) => return Ok(false),
            Ok(Outcome::Unrecognized(message)) => {
                eprintln!("\x1b[33m{message}\x1b[0m (type `help` for commands)");
            }
            Err(e) => self.print_error(&e),
        }
        Ok(true)
    }

    /// Prints an error to stderr.
    #[allow(clippy::unused_self)]
    fn print_error(&self, error: &Error) {
        eprintln!("\x1b[31mError: {error}\x1b[0m");
    }

    /// Prints the welcome banner.
    fn print_banner(&self) {
        let grammar = self.session.generator().grammar();
        println!("\x1b[1;36mGPSR command generator v{}\x1b[0m", env!("CARGO_PKG_VERSION"));
        if let Some(name) = grammar.name() {
            println!("grammar: {name} ({})", grammar.tier());
        }
        println!("Press Enter to generate a task, `help` for commands, Ctrl+D to exit.\n");

        let _ = io::stdout().flush();
    }
}
