//! Console plumbing for the interactive builder.
//!
//! Prompts are generic over the input and output streams so session logic
//! can be driven by scripted buffers in tests. Every prompt returns a typed
//! `Result`; deciding whether to re-ask is left to the caller.

use colored::Colorize;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

use crate::topology::TopologyError;

/// Errors produced while reading operator input.
#[derive(Debug, Error)]
pub enum InputError {
    /// Entered text could not be parsed as the expected number.
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),
    /// The entered value failed topology validation.
    #[error(transparent)]
    Invalid(#[from] TopologyError),
    /// The input stream ended before the session finished.
    #[error("input ended before the session was complete")]
    Eof,
    /// The confirmation dump could not be rendered.
    #[error("failed to render entry: {0}")]
    Render(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl InputError {
    /// Fatal errors abort the session; anything else re-runs the entry
    /// step that produced it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Eof | Self::Io(_) | Self::Render(_))
    }
}

/// Paired input and output streams with prompt helpers.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    /// A console over the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a blue field prompt and read one line of input.
    pub fn prompt(&mut self, text: &str) -> Result<String, InputError> {
        write!(self.output, "{}", text.blue().bold())?;
        self.output.flush()?;
        self.read_line()
    }

    /// Like [`prompt`](Self::prompt), with an uncolored prefix after the
    /// prompt text. Used for IP entry, where the network scheme is shown
    /// inline and only the suffix is typed.
    pub fn prompt_prefixed(&mut self, text: &str, prefix: &str) -> Result<String, InputError> {
        write!(self.output, "{}{}", text.blue().bold(), prefix)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Prompt for a number. Surrounding whitespace is tolerated; anything
    /// that does not parse is reported back with the raw text.
    pub fn prompt_number<T: FromStr>(&mut self, text: &str) -> Result<T, InputError> {
        let raw = self.prompt(text)?;
        raw.trim()
            .parse()
            .map_err(|_| InputError::InvalidNumber(raw))
    }

    /// Ask a yes/no question, defaulting to yes on an empty answer.
    pub fn confirm(&mut self, text: &str) -> Result<bool, InputError> {
        let question = format!("{} [Y/n] ", text);
        write!(self.output, "{}", question.as_str().green().bold())?;
        self.output.flush()?;
        let answer = self.read_line()?;
        Ok(matches!(
            answer.to_lowercase().as_str(),
            "" | "y" | "yes"
        ))
    }

    /// Print one plain line.
    pub fn line(&mut self, text: &str) -> Result<(), InputError> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Dump an entry as pretty JSON so the operator can review it before
    /// confirming.
    pub fn show_entry<T: Serialize>(&mut self, value: &T) -> Result<(), InputError> {
        let rendered = serde_json::to_string_pretty(value)?;
        writeln!(self.output)?;
        writeln!(self.output, "{}", rendered)?;
        Ok(())
    }

    /// Consume the console and hand back its streams. Used by tests to
    /// inspect what a scripted session printed.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    fn read_line(&mut self) -> Result<String, InputError> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            return Err(InputError::Eof);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }
}
