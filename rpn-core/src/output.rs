//! Console output formatting
//!
//! Results and errors are written straight to the port, one byte at a time,
//! without building a string first. Both end with a CR/LF pair.

use crate::port::CharIo;
use crate::value::{Error, Value};

pub const LINE_BREAK: &str = "\r\n";
pub const ERROR_PREFIX: &str = "Error: ";

// u32::MAX has ten decimal digits
const MAX_DIGITS: usize = 10;

/// Write a value in decimal followed by a line break.
///
/// The digits come from the unsigned magnitude, so `i32::MIN` prints as
/// `-2147483648` instead of overflowing on negation.
pub fn format_result<P: CharIo>(port: &mut P, value: Value) -> Result<(), P::Error> {
    if value < 0 {
        port.send_char(b'-')?;
    }

    let mut magnitude = value.unsigned_abs();
    let mut digits = [0u8; MAX_DIGITS];
    let mut count = 0;

    // Least significant digit first
    loop {
        digits[count] = b'0' + (magnitude % 10) as u8;
        count += 1;
        magnitude /= 10;
        if magnitude == 0 {
            break;
        }
    }

    for &digit in digits[..count].iter().rev() {
        port.send_char(digit)?;
    }
    port.send_str(LINE_BREAK)
}

/// Write a blank line, `Error: `, the error's message and a line break.
pub fn format_error<P: CharIo>(port: &mut P, error: Error) -> Result<(), P::Error> {
    port.send_str(LINE_BREAK)?;
    port.send_str(ERROR_PREFIX)?;
    port.send_str(error.message())?;
    port.send_str(LINE_BREAK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::MemoryPort;

    fn result_text(value: Value) -> String {
        let mut port: MemoryPort<'_, 32> = MemoryPort::new(b"");
        format_result(&mut port, value).unwrap();
        port.output_str().to_string()
    }

    #[test]
    fn test_format_result() {
        assert_eq!(result_text(0), "0\r\n");
        assert_eq!(result_text(7), "7\r\n");
        assert_eq!(result_text(-15), "-15\r\n");
        assert_eq!(result_text(1_000_000), "1000000\r\n");
    }

    #[test]
    fn test_format_result_extremes() {
        assert_eq!(result_text(i32::MAX), "2147483647\r\n");
        assert_eq!(result_text(i32::MIN), "-2147483648\r\n");
    }

    #[test]
    fn test_format_error() {
        let mut port: MemoryPort<'_, 64> = MemoryPort::new(b"");
        format_error(&mut port, Error::StackUnderflow).unwrap();
        assert_eq!(port.output_str(), "\r\nError: Stack underflow\r\n");
    }

    #[test]
    fn test_send_failure_propagates() {
        let mut port: MemoryPort<'_, 2> = MemoryPort::new(b"");
        assert!(format_result(&mut port, 12345).is_err());
    }
}
