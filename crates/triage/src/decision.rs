//! Manual count decisions
//!
//! Some threads cannot be classified from labels alone: a message support
//! sent to itself, or a conversation between colleagues, may or may not be
//! real customer work. [`Decide`] is the seam through which such threads are
//! resolved. The console prompt asks a person; [`AlwaysCount`] and
//! [`NeverCount`] answer without asking.

use std::io::{self, BufRead, Write};

use crate::error::DecisionError;
use crate::models::Message;
use crate::rules::ReviewReason;

/// Strategy answering "should this thread count?"
pub trait Decide {
    fn should_count(&mut self, message: &Message, reason: ReviewReason)
    -> Result<bool, DecisionError>;
}

/// Counts every thread it is asked about
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysCount;

impl Decide for AlwaysCount {
    fn should_count(&mut self, _: &Message, _: ReviewReason) -> Result<bool, DecisionError> {
        Ok(true)
    }
}

/// Counts no thread it is asked about
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverCount;

impl Decide for NeverCount {
    fn should_count(&mut self, _: &Message, _: ReviewReason) -> Result<bool, DecisionError> {
        Ok(false)
    }
}

/// Interactive prompt that shows the message and waits for Y or N.
///
/// Unrecognized answers are rejected and the question is asked again.
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process's standard input and output
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn describe(&mut self, message: &Message, reason: ReviewReason) -> io::Result<()> {
        let date = message
            .date
            .map(|d| d.to_rfc2822())
            .unwrap_or_else(|| "(no date)".to_string());
        let labels: Vec<&str> = message.labels.iter().map(String::as_str).collect();

        writeln!(
            self.output,
            "\nFound {reason} email. Should the following message be counted?\n"
        )?;
        writeln!(self.output, "From: {}", message.from_address)?;
        writeln!(self.output, "To: {}", message.to)?;
        writeln!(self.output, "Subject: {}", message.subject)?;
        writeln!(self.output, "Date: {date}")?;
        writeln!(self.output, "Labels: {}", labels.join(", "))
    }
}

impl<R: BufRead, W: Write> Decide for ConsolePrompt<R, W> {
    fn should_count(
        &mut self,
        message: &Message,
        reason: ReviewReason,
    ) -> Result<bool, DecisionError> {
        self.describe(message, reason)?;

        loop {
            write!(self.output, "Y/N?    ")?;
            self.output.flush()?;

            let mut answer = String::new();
            if self.input.read_line(&mut answer)? == 0 {
                return Err(DecisionError::InputClosed);
            }

            match answer.trim().to_lowercase().as_str() {
                "y" => {
                    writeln!(self.output, "Thread will be counted.")?;
                    return Ok(true);
                }
                "n" => {
                    writeln!(self.output, "Thread won't be counted.")?;
                    return Ok(false);
                }
                _ => writeln!(self.output, "Answer not recognized.")?,
            }
        }
    }
}
