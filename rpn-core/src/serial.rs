//! CharIo adapter for embedded-hal-nb serial peripherals
//!
//! Any UART HAL implementing the non-blocking `embedded_hal_nb::serial`
//! traits can drive the calculator. `nb::block!` spins on `WouldBlock`,
//! giving the blocking semantics the core expects.

use crate::port::CharIo;
use embedded_hal_nb::nb::block;
use embedded_hal_nb::serial::{Read, Write};

/// Serial console port
///
/// Echo is on by default: a UART terminal shows nothing the device does not
/// send back.
pub struct SerialPort<S> {
    serial: S,
    echo: bool,
}

impl<S> SerialPort<S>
where
    S: Read<u8> + Write<u8>,
{
    pub fn new(serial: S) -> Self {
        Self { serial, echo: true }
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Give the peripheral back, e.g. to reconfigure the baud rate.
    pub fn release(self) -> S {
        self.serial
    }
}

impl<S> CharIo for SerialPort<S>
where
    S: Read<u8> + Write<u8>,
{
    type Error = S::Error;

    fn send_char(&mut self, byte: u8) -> Result<(), Self::Error> {
        block!(self.serial.write(byte))?;
        block!(self.serial.flush())
    }

    fn receive_char(&mut self) -> Result<u8, Self::Error> {
        let byte = block!(self.serial.read())?;
        if self.echo {
            self.send_char(byte)?;
        }
        Ok(byte)
    }
}
