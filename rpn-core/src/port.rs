//! Character I/O capability for the calculator
//!
//! This module defines the CharIo trait that the token reader, the output
//! formatter and the REPL talk to. Hardware UARTs, host terminals and test
//! buffers all sit behind it; the core never touches a peripheral directly.
//!
//! All operations block. There is no timeout and no cancellation below this
//! boundary.

use core::fmt;

/// Blocking byte-at-a-time I/O
///
/// Implementations may echo received bytes themselves (a UART console
/// usually does). The core adds exactly one echo of its own: the line feed
/// sent after a carriage return ends a line.
pub trait CharIo {
    /// Transport failure reported by the implementation.
    type Error: fmt::Debug;

    /// Transmit one byte, blocking until it has been accepted.
    fn send_char(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Transmit a string byte by byte.
    fn send_str(&mut self, text: &str) -> Result<(), Self::Error> {
        for byte in text.bytes() {
            self.send_char(byte)?;
        }
        Ok(())
    }

    /// Block until one byte arrives and return it.
    fn receive_char(&mut self) -> Result<u8, Self::Error>;
}

impl<T: CharIo + ?Sized> CharIo for &mut T {
    type Error = T::Error;

    fn send_char(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).send_char(byte)
    }

    fn send_str(&mut self, text: &str) -> Result<(), Self::Error> {
        (**self).send_str(text)
    }

    fn receive_char(&mut self) -> Result<u8, Self::Error> {
        (**self).receive_char()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MemoryPortError {
    /// Every scripted input byte has been consumed
    Exhausted,
    /// The fixed output buffer cannot take another byte
    OutputFull,
}

impl fmt::Display for MemoryPortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryPortError::Exhausted => write!(f, "Input exhausted"),
            MemoryPortError::OutputFull => write!(f, "Output buffer full"),
        }
    }
}

/// In-memory port: replays a fixed input script and captures output
///
/// `N` is the output capacity in bytes. Nothing is allocated, so the port
/// also works for on-target self tests.
///
/// # Example
///
/// ```
/// use rpn_core::port::{CharIo, MemoryPort};
///
/// let mut port: MemoryPort<'_, 64> = MemoryPort::new(b"7\r");
/// assert_eq!(port.receive_char(), Ok(b'7'));
/// port.send_str("ok").unwrap();
/// assert_eq!(port.output_str(), "ok");
/// ```
pub struct MemoryPort<'a, const N: usize> {
    input: &'a [u8],
    position: usize,
    output: heapless::Vec<u8, N>,
    echo: bool,
}

impl<'a, const N: usize> MemoryPort<'a, N> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            position: 0,
            output: heapless::Vec::new(),
            echo: false,
        }
    }

    /// Echo each received byte to the output, like a UART console does.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Captured output as text; empty if it is not valid UTF-8.
    pub fn output_str(&self) -> &str {
        core::str::from_utf8(&self.output).unwrap_or_default()
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.position..]
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.input.len()
    }
}

impl<const N: usize> CharIo for MemoryPort<'_, N> {
    type Error = MemoryPortError;

    fn send_char(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.output
            .push(byte)
            .map_err(|_| MemoryPortError::OutputFull)
    }

    fn receive_char(&mut self) -> Result<u8, Self::Error> {
        let byte = *self
            .input
            .get(self.position)
            .ok_or(MemoryPortError::Exhausted)?;
        self.position += 1;
        if self.echo {
            self.send_char(byte)?;
        }
        Ok(byte)
    }
}
