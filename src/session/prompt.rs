//! Line-oriented prompting over any reader and writer.

use colored::*;
use log::debug;
use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::error::{ReadlogError, Result};

/// Writes prompts and reads one trimmed line of input per answer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line of output.
    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Show `label` and read the answer with surrounding whitespace removed.
    ///
    /// End of input is `ReadlogError::InputClosed`.
    pub fn ask(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}", label.bold())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ReadlogError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    /// Ask for a numeric menu choice. Anything that is not a number is `None`.
    pub fn ask_choice(&mut self, label: &str) -> Result<Option<u32>> {
        let answer = self.ask(label)?;
        let choice = answer.parse::<u32>().ok();
        if choice.is_none() {
            debug!("Non-numeric menu choice {:?}", answer);
        }
        Ok(choice)
    }

    /// Ask until `parse` accepts the answer, printing each validation failure.
    pub fn ask_until<T>(&mut self, label: &str, parse: impl Fn(&str) -> Result<T>) -> Result<T> {
        loop {
            let answer = self.ask(label)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(ReadlogError::Validation(msg)) => {
                    self.say(format!("{msg}. Please try again.").red())?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
