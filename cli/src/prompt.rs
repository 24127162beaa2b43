//! Interactive prompts.
use std::io::{BufRead, Write};

use anyhow::{Context as _, Result};

/// Asks the operator a question and reads a one-line answer.
pub trait Prompter {
    /// Show `question` and `choices`, then block until a line is read.
    ///
    /// Returns `None` when the input is closed. The trailing line ending is
    /// stripped; other whitespace is kept so that `" o"` is not `"o"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt cannot be written or input cannot be read.
    fn ask(&mut self, question: &str, choices: &str) -> Result<Option<String>>;
}

/// [`Prompter`] over any line reader and writer.
#[derive(Debug)]
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    /// Create a prompter reading answers from `input` and writing questions to `output`.
    #[must_use]
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompter and return the output sink.
    #[must_use]
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Prompts on stdout and reads answers from stdin.
///
/// Stdin is locked only for the duration of a single question.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &str, choices: &str) -> Result<Option<String>> {
        LinePrompter::new(std::io::stdin().lock(), std::io::stdout()).ask(question, choices)
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, question: &str, choices: &str) -> Result<Option<String>> {
        writeln!(self.output, "{question}").context("writing prompt")?;
        writeln!(self.output, "{choices}").context("writing prompt")?;
        self.output.flush().context("flushing prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("reading answer")?;
        if read == 0 {
            return Ok(None);
        }
        let answer = line.strip_suffix('\n').unwrap_or(&line);
        let answer = answer.strip_suffix('\r').unwrap_or(answer);
        Ok(Some(answer.to_string()))
    }
}
