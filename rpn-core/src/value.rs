use core::fmt;

/// Signed machine integer every value, operand and result is held in.
pub type Value = i32;

// RUST CONCEPT: A plain fieldless enum for the five binary operators
// Copy makes terms cheap to move between the expression and the evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operator {
    Add,       // +
    Subtract,  // -
    Multiply,  // *
    Divide,    // /
    Remainder, // %
}

impl Operator {
    /// The single-byte spelling the classifier accepts for this operator.
    pub fn symbol(self) -> u8 {
        match self {
            Operator::Add => b'+',
            Operator::Subtract => b'-',
            Operator::Multiply => b'*',
            Operator::Divide => b'/',
            Operator::Remainder => b'%',
        }
    }

    pub fn from_symbol(symbol: u8) -> Option<Self> {
        match symbol {
            b'+' => Some(Operator::Add),
            b'-' => Some(Operator::Subtract),
            b'*' => Some(Operator::Multiply),
            b'/' => Some(Operator::Divide),
            b'%' => Some(Operator::Remainder),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol() as char)
    }
}

// RUST CONCEPT: Sum type instead of a tagged union
// A term is either a number to push or an operator to apply, never both
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Term {
    Value(Value),
    Operator(Operator),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Value(v) => write!(f, "{}", v),
            Term::Operator(op) => write!(f, "{}", op),
        }
    }
}

/// Everything that can go wrong while reading or evaluating one line.
///
/// No variant carries a payload: the console only ever shows the kind's
/// fixed message, and every kind is recovered from by prompting again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    InvalidTerm,
    TooManyTerms,
    TokenTooLong,
    StackOverflow,
    StackUnderflow,
    DivisionByZero,
    Overflow,
    ReadError,
}

impl Error {
    /// Static text shown after the `Error: ` prefix.
    pub fn message(self) -> &'static str {
        match self {
            Error::InvalidTerm => "Invalid term",
            Error::TooManyTerms => "Too many terms",
            Error::TokenTooLong => "Token too long",
            Error::StackOverflow => "Stack overflow",
            Error::StackUnderflow => "Stack underflow",
            Error::DivisionByZero => "Division by zero",
            Error::Overflow => "Arithmetic overflow",
            Error::ReadError => "Read error",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(not(target_os = "none"))]
impl std::error::Error for Error {}
