// Token reader: pulls bytes from the port and splits them into tokens
//
// Space and tab end a token; carriage return ends the token and the line.
// Tokens are collected into a fixed buffer and never outlive the read cycle.

use crate::port::CharIo;
use crate::value::Error;

pub const MAX_TOKEN_LENGTH: usize = 16;

pub const SPACE: u8 = b' ';
pub const TAB: u8 = b'\t';
pub const CARRIAGE_RETURN: u8 = b'\r';
pub const LINE_FEED: u8 = b'\n';

/// Raw, unclassified bytes between two separators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Token {
    bytes: heapless::Vec<u8, MAX_TOKEN_LENGTH>,
}

impl Token {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    // A full buffer rejects the byte rather than truncating the token
    fn push(&mut self, byte: u8) -> Result<(), Error> {
        self.bytes.push(byte).map_err(|_| Error::TokenTooLong)
    }
}

/// Reads tokens one at a time and remembers where in the line it stopped.
#[derive(Debug, Clone)]
pub struct TokenReader {
    token: Token,
    line_complete: bool,
    line_feed_on_enter: bool,
}

impl Default for TokenReader {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TokenReader {
    /// `line_feed_on_enter` sends a line feed to the port whenever a carriage
    /// return ends a line.
    pub fn new(line_feed_on_enter: bool) -> Self {
        Self {
            token: Token::new(),
            line_complete: true,
            line_feed_on_enter,
        }
    }

    /// Read the next token.
    ///
    /// Returns the token and whether it was ended by a carriage return. The
    /// token may be empty (two separators in a row, or a separator at the
    /// start of a line); callers decide whether to skip it.
    ///
    /// A token that would grow past [`MAX_TOKEN_LENGTH`] fails with
    /// [`Error::TokenTooLong`] as soon as the extra byte arrives. A receive
    /// failure from the port fails with [`Error::ReadError`].
    pub fn read_token<P: CharIo>(&mut self, port: &mut P) -> Result<(&Token, bool), Error> {
        self.token.clear();
        self.line_complete = false;

        loop {
            let byte = port.receive_char().map_err(|_err| {
                warn!(error = ?_err, "receive failed");
                Error::ReadError
            })?;

            match byte {
                SPACE | TAB => return Ok((&self.token, false)),
                CARRIAGE_RETURN => {
                    self.line_complete = true;
                    if self.line_feed_on_enter {
                        // Nothing useful to do if the echo cannot be sent
                        let _ = port.send_char(LINE_FEED);
                    }
                    return Ok((&self.token, true));
                }
                _ => self.token.push(byte)?,
            }
        }
    }

    /// True once the carriage return of the current line has been consumed.
    ///
    /// Stays false after a read that failed mid-line, which is how the REPL
    /// knows there is input left to discard.
    pub fn line_complete(&self) -> bool {
        self.line_complete
    }

    /// Consume and drop input up to and including the next carriage return.
    pub fn skip_line<P: CharIo>(&mut self, port: &mut P) -> Result<(), Error> {
        self.token.clear();
        while !self.line_complete {
            let byte = port.receive_char().map_err(|_| Error::ReadError)?;
            if byte == CARRIAGE_RETURN {
                self.line_complete = true;
                if self.line_feed_on_enter {
                    let _ = port.send_char(LINE_FEED);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::MemoryPort;

    fn reader() -> TokenReader {
        TokenReader::new(true)
    }

    #[test]
    fn test_read_token_space_separated() {
        let mut port: MemoryPort<'_, 8> = MemoryPort::new(b"12 +\r");
        let mut reader = reader();

        let (token, eol) = reader.read_token(&mut port).unwrap();
        assert_eq!(token.as_bytes(), b"12");
        assert!(!eol);

        let (token, eol) = reader.read_token(&mut port).unwrap();
        assert_eq!(token.as_bytes(), b"+");
        assert!(eol);
        assert!(reader.line_complete());
    }

    #[test]
    fn test_tab_is_a_separator() {
        let mut port: MemoryPort<'_, 8> = MemoryPort::new(b"3\t4\r");
        let mut reader = reader();
        let (token, eol) = reader.read_token(&mut port).unwrap();
        assert_eq!(token.as_bytes(), b"3");
        assert!(!eol);
    }

    #[test]
    fn test_carriage_return_sends_line_feed() {
        let mut port: MemoryPort<'_, 8> = MemoryPort::new(b"5\r");
        reader().read_token(&mut port).unwrap();
        assert_eq!(port.output(), b"\n");

        let mut port: MemoryPort<'_, 8> = MemoryPort::new(b"5\r");
        TokenReader::new(false).read_token(&mut port).unwrap();
        assert!(port.output().is_empty());
    }

    #[test]
    fn test_empty_tokens_are_returned() {
        let mut port: MemoryPort<'_, 8> = MemoryPort::new(b"  \r");
        let mut reader = reader();

        let (token, eol) = reader.read_token(&mut port).unwrap();
        assert!(token.is_empty());
        assert!(!eol);
        let (token, _) = reader.read_token(&mut port).unwrap();
        assert!(token.is_empty());
        let (token, eol) = reader.read_token(&mut port).unwrap();
        assert!(token.is_empty());
        assert!(eol);
    }

    #[test]
    fn test_token_at_max_length_is_accepted() {
        let mut port: MemoryPort<'_, 8> = MemoryPort::new(b"1234567890123456\r");
        let mut reader = reader();
        let (token, eol) = reader.read_token(&mut port).unwrap();
        assert_eq!(token.len(), MAX_TOKEN_LENGTH);
        assert!(eol);
    }

    #[test]
    fn test_token_too_long_stops_immediately() {
        let mut port: MemoryPort<'_, 8> = MemoryPort::new(b"12345678901234567 +\r");
        let mut reader = reader();
        assert_eq!(reader.read_token(&mut port).unwrap_err(), Error::TokenTooLong);
        // The offending byte was consumed, nothing after it
        assert_eq!(port.remaining(), b" +\r");
        assert!(!reader.line_complete());
    }

    #[test]
    fn test_exhausted_input_is_a_read_error() {
        let mut port: MemoryPort<'_, 8> = MemoryPort::new(b"12");
        assert_eq!(reader().read_token(&mut port).unwrap_err(), Error::ReadError);
    }

    #[test]
    fn test_skip_line_discards_rest_of_line() {
        let mut port: MemoryPort<'_, 8> = MemoryPort::new(b"12345678901234567 +\r9\r");
        let mut reader = reader();
        assert!(reader.read_token(&mut port).is_err());
        reader.skip_line(&mut port).unwrap();
        assert!(reader.line_complete());
        assert_eq!(port.remaining(), b"9\r");
        assert_eq!(port.output(), b"\n");
    }
}
