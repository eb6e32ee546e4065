//! # RPN Core
//!
//! Allocation-free Reverse Polish Notation calculator for serial consoles.
//!
//! The crate reads one line of postfix arithmetic at a time from a byte
//! stream, evaluates it on a bounded stack machine and writes the result (or
//! an error message) back to the same stream. Every buffer has a fixed
//! capacity, so the whole calculator fits in static memory on a
//! microcontroller with no allocator and no operating system.
//!
//! ## Pipeline
//!
//! - [`tokenizer`]: splits incoming bytes into bounded tokens
//! - [`parser`]: classifies tokens into terms and builds an expression
//! - [`evaluator`]: runs the expression on a [`Stack`]
//! - [`output`]: prints results and errors
//! - [`repl`]: ties the stages together into a never-ending console loop
//!
//! Hardware stays behind the [`CharIo`] trait. [`MemoryPort`] implements it
//! in memory; the `serial` feature adds an adapter for `embedded-hal-nb`
//! UARTs.
//!
//! ## Example
//!
//! ```
//! use rpn_core::{MemoryPort, Outcome, Repl};
//!
//! let mut port: MemoryPort<'_, 64> = MemoryPort::new(b"3 4 +\r");
//! let mut repl = Repl::default();
//!
//! assert_eq!(repl.step(&mut port), Outcome::Value(7));
//! assert_eq!(port.output_str(), "> \n7\r\n");
//! ```

#![cfg_attr(target_os = "none", no_std)]

#[macro_use]
mod diag;

pub mod value;
pub mod port;
pub mod tokenizer;
pub mod parser;
pub mod stack;
pub mod evaluator;
pub mod output;
pub mod repl;

#[cfg(feature = "serial")]
pub mod serial;

// Re-exports for convenience
pub use value::{Error, Operator, Term, Value};
pub use port::{CharIo, MemoryPort, MemoryPortError};
pub use tokenizer::{MAX_TOKEN_LENGTH, Token, TokenReader};
pub use parser::{Expression, MAX_TERMS, classify, read_expression};
pub use stack::{STACK_SIZE, Stack};
pub use evaluator::{apply, evaluate};
pub use output::{format_error, format_result};
pub use repl::{Outcome, PROMPT, Repl, ReplConfig};

#[cfg(feature = "serial")]
pub use serial::SerialPort;
