//! Line-oriented prompting.
//!
//! The shells talk to the user only through [`Prompter`], so tests can drive
//! them with scripted answers. [`TermPrompter`] is the real terminal, backed
//! by dialoguer when attached to a TTY and by plain stdin otherwise.

use std::io::{self, BufRead};
use std::process;

use console::Term;
use dialoguer::Input;

/// Farewell shown when the user interrupts a session.
pub const CANCELLED_MESSAGE: &str = "Operation cancelled by user.";

/// One answer from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptReply {
    Line(String),
    /// Ctrl-C or end of input.
    Interrupted,
}

pub trait Prompter {
    fn read_line(&mut self, prompt: &str) -> io::Result<PromptReply>;
    fn say(&mut self, message: &str);
}

/// Turn SIGINT into a clean exit.
///
/// console re-raises SIGINT when Ctrl-C is read at a prompt, and plain stdin
/// reads never see it at all, so the farewell has to come from a handler.
pub fn exit_on_interrupt() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        let term = Term::stdout();
        let _ = term.write_line("");
        let _ = term.write_line(CANCELLED_MESSAGE);
        process::exit(0);
    })
}

/// Trim whitespace and the quotes a shell or file manager may add around paths.
pub fn clean_path_input(raw: &str) -> &str {
    raw.trim().trim_matches(|c| c == '"' || c == '\'').trim()
}

pub struct TermPrompter {
    term: Term,
}

impl TermPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    fn read_plain(&mut self, prompt: &str) -> io::Result<PromptReply> {
        self.term.write_str(&format!("{prompt}: "))?;
        self.term.flush()?;
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => Ok(PromptReply::Interrupted),
            Ok(_) => Ok(PromptReply::Line(line.trim_end_matches(['\r', '\n']).to_string())),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(PromptReply::Interrupted),
            Err(e) => Err(e),
        }
    }
}

impl Default for TermPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TermPrompter {
    fn read_line(&mut self, prompt: &str) -> io::Result<PromptReply> {
        if !self.term.is_term() {
            return self.read_plain(prompt);
        }

        let answer = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text();

        match answer {
            Ok(line) => Ok(PromptReply::Line(line)),
            Err(dialoguer::Error::IO(e))
                if matches!(e.kind(), io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof) =>
            {
                Ok(PromptReply::Interrupted)
            }
            Err(e) => Err(io::Error::other(e)),
        }
    }

    fn say(&mut self, message: &str) {
        if let Err(e) = self.term.write_line(message) {
            log::warn!("failed to write to terminal: {}", e);
        }
    }
}
