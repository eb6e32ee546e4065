//! REPL driver for the RPN console
//!
//! Each iteration prints the prompt, reads one line into an expression,
//! evaluates it and prints either the result or the error. Every error is
//! recoverable: the driver reports it and prompts again.
//!
//! On a device the driver runs until power-off, see [`Repl::run`]. Hosted
//! front ends and tests use [`Repl::run_until`] or [`Repl::step`] to get
//! control back.

use crate::evaluator::evaluate;
use crate::output::{format_error, format_result};
use crate::parser::{Expression, read_expression};
use crate::port::CharIo;
use crate::tokenizer::TokenReader;
use crate::value::{Error, Value};

pub const PROMPT: &str = "> ";

/// Runtime settings for a [`Repl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplConfig<'a> {
    /// Text sent before every line is read
    pub prompt: &'a str,
    /// Send a line feed when a carriage return ends a line
    pub line_feed_on_enter: bool,
    /// After a line fails before its carriage return was read, drop the rest
    /// of that line instead of reading it as the next one
    pub discard_rest_of_line: bool,
}

impl Default for ReplConfig<'static> {
    fn default() -> Self {
        Self {
            prompt: PROMPT,
            line_feed_on_enter: true,
            discard_rest_of_line: false,
        }
    }
}

/// What one iteration reported on the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    Value(Value),
    Error(Error),
}

/// Owns every buffer the calculator needs, so nothing is global and nothing
/// leaks from one line into the next.
pub struct Repl<'a> {
    prompt: &'a str,
    discard_rest_of_line: bool,
    reader: TokenReader,
    expression: Expression,
}

impl Default for Repl<'static> {
    fn default() -> Self {
        Self::new(ReplConfig::default())
    }
}

impl<'a> Repl<'a> {
    pub fn new(config: ReplConfig<'a>) -> Self {
        Self {
            prompt: config.prompt,
            discard_rest_of_line: config.discard_rest_of_line,
            reader: TokenReader::new(config.line_feed_on_enter),
            expression: Expression::new(),
        }
    }

    /// The expression read by the most recent successful or partial read.
    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Run one prompt/read/evaluate/print iteration.
    ///
    /// Send failures are ignored; the console has nowhere else to report them.
    pub fn step<P: CharIo>(&mut self, port: &mut P) -> Outcome {
        let _ = port.send_str(self.prompt);

        let result = read_expression(&mut self.reader, &mut self.expression, port)
            .and_then(|()| evaluate(&self.expression));

        match result {
            Ok(value) => {
                debug!(value, "evaluated");
                let _ = format_result(port, value);
                Outcome::Value(value)
            }
            Err(error) => {
                debug!(%error, "line rejected");
                // A failed read has nothing left to skip
                if self.discard_rest_of_line
                    && error != Error::ReadError
                    && !self.reader.line_complete()
                {
                    let _ = self.reader.skip_line(port);
                }
                let _ = format_error(port, error);
                Outcome::Error(error)
            }
        }
    }

    /// Serve the console forever.
    ///
    /// There is no exit path: an embedded console runs until it
    /// is reset or loses power.
    pub fn run<P: CharIo>(&mut self, port: &mut P) -> ! {
        loop {
            self.step(port);
        }
    }

    /// Serve the console until `stop` returns true.
    ///
    /// `stop` is checked before every prompt and gets the port, which lets a
    /// hosted front end end the session at end of input and lets tests run a
    /// finite script.
    pub fn run_until<P, F>(&mut self, port: &mut P, mut stop: F)
    where
        P: CharIo,
        F: FnMut(&mut P) -> bool,
    {
        while !stop(&mut *port) {
            self.step(port);
        }
    }
}
