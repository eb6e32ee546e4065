// Terminal port implementing CharIo for the host build
//
// Interactive terminals get line editing from editline; piped input is read
// line by line. Either way each finished line is handed to the calculator
// byte by byte and terminated with a carriage return, the way a serial
// terminal would send it.

use editline::{LineEditor, terminals::StdioTerminal};
use rpn_core::CharIo;
use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufRead, IsTerminal, Write};

const CARRIAGE_RETURN: u8 = b'\r';

#[derive(Debug)]
pub enum PortError {
    /// End of input (Ctrl-D or end of pipe)
    Closed,
    /// Ctrl-C abandoned the line being edited
    Interrupted,
    Io(io::Error),
    Terminal(String),
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortError::Closed => write!(f, "Input closed"),
            PortError::Interrupted => write!(f, "Interrupted"),
            PortError::Io(e) => write!(f, "I/O error: {}", e),
            PortError::Terminal(msg) => write!(f, "Terminal error: {}", msg),
        }
    }
}

impl std::error::Error for PortError {}

impl From<io::Error> for PortError {
    fn from(e: io::Error) -> Self {
        PortError::Io(e)
    }
}

enum Source {
    Editor {
        editor: LineEditor,
        terminal: StdioTerminal,
    },
    Piped(io::StdinLock<'static>),
}

pub struct StdioPort {
    source: Source,
    pending: VecDeque<u8>,
    stdout: io::Stdout,
    echo: bool,
    closed: bool,
}

impl StdioPort {
    /// Pick line editing when stdin is a terminal, plain reads otherwise.
    pub fn new(echo: bool) -> Self {
        let stdin = io::stdin();
        let source = if stdin.is_terminal() {
            Source::Editor {
                editor: LineEditor::new(1024, 50),
                terminal: StdioTerminal::new(),
            }
        } else {
            Source::Piped(stdin.lock())
        };

        Self {
            source,
            pending: VecDeque::new(),
            stdout: io::stdout(),
            echo,
            closed: false,
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self.source, Source::Editor { .. })
    }

    /// True once input has ended.
    ///
    /// Piped input is read ahead here so the session ends right after the
    /// last line instead of prompting once more. An interactive terminal is
    /// never read before its prompt has been shown.
    pub fn at_end(&mut self) -> bool {
        if !self.closed && self.pending.is_empty() && !self.is_interactive() {
            match self.fill() {
                Ok(()) | Err(PortError::Closed) => {}
                Err(e) => tracing::warn!(error = %e, "read ahead failed"),
            }
        }
        self.closed && self.pending.is_empty()
    }

    fn fill(&mut self) -> Result<(), PortError> {
        if self.closed {
            return Err(PortError::Closed);
        }
        // The prompt must be visible before blocking on input
        self.stdout.flush()?;

        match &mut self.source {
            Source::Editor { editor, terminal } => match editor.read_line(terminal) {
                Ok(line) => {
                    tracing::trace!(bytes = line.len(), "line edited");
                    self.pending.extend(line.bytes());
                    self.pending.push_back(CARRIAGE_RETURN);
                }
                Err(editline::Error::Eof) => {
                    self.closed = true;
                    return Err(PortError::Closed);
                }
                Err(editline::Error::Interrupted) => return Err(PortError::Interrupted),
                Err(e) => return Err(PortError::Terminal(e.to_string())),
            },
            Source::Piped(stdin) => {
                if !queue_line(stdin, &mut self.pending)? {
                    tracing::debug!("end of piped input");
                    self.closed = true;
                    return Err(PortError::Closed);
                }
            }
        }
        Ok(())
    }
}

/// Queue the next raw line of `input` followed by a carriage return.
///
/// Bytes are passed through untouched, so a line that is not valid UTF-8
/// still reaches the calculator. Returns false at end of input.
fn queue_line<R: BufRead>(input: &mut R, pending: &mut VecDeque<u8>) -> io::Result<bool> {
    let mut line = Vec::new();
    if input.read_until(b'\n', &mut line)? == 0 {
        return Ok(false);
    }
    while let Some(b'\r' | b'\n') = line.last() {
        line.pop();
    }
    pending.extend(line);
    pending.push_back(CARRIAGE_RETURN);
    Ok(true)
}

impl CharIo for StdioPort {
    type Error = PortError;

    fn send_char(&mut self, byte: u8) -> Result<(), PortError> {
        self.stdout.write_all(&[byte])?;
        Ok(())
    }

    fn receive_char(&mut self) -> Result<u8, PortError> {
        if self.pending.is_empty() {
            self.fill()?;
        }
        let byte = self.pending.pop_front().ok_or(PortError::Closed)?;
        if self.echo {
            self.send_char(byte)?;
        }
        Ok(byte)
    }
}
