// Term classification and expression building
//
// A token becomes a term by trying the operator recognizer first and the
// value recognizer second. That order is what makes a lone "-" the subtract
// operator while "-5" stays a negative literal.

use crate::port::CharIo;
use crate::tokenizer::TokenReader;
use crate::value::{Error, Operator, Term, Value};
use core::ops::Deref;

pub const MAX_TERMS: usize = 32;

/// Classify a raw token, or `None` if it is neither an operator nor a value.
pub fn classify(token: &[u8]) -> Option<Term> {
    parse_operator(token)
        .map(Term::Operator)
        .or_else(|| parse_value(token).map(Term::Value))
}

/// Exactly one byte among `+ - * / %`.
pub fn parse_operator(token: &[u8]) -> Option<Operator> {
    match token {
        [symbol] => Operator::from_symbol(*symbol),
        _ => None,
    }
}

/// An optional `-` followed by at least one ASCII digit.
///
/// Digits are accumulated with the sign already applied, so the most negative
/// `i32` is accepted; any literal outside the `i32` range is rejected.
pub fn parse_value(token: &[u8]) -> Option<Value> {
    let (negative, digits) = match token {
        [b'-', rest @ ..] => (true, rest),
        _ => (false, token),
    };
    if digits.is_empty() {
        return None;
    }

    let mut value: Value = 0;
    for &byte in digits {
        if !byte.is_ascii_digit() {
            return None;
        }
        let digit = Value::from(byte - b'0');
        value = value.checked_mul(10)?;
        value = if negative {
            value.checked_sub(digit)?
        } else {
            value.checked_add(digit)?
        };
    }
    Some(value)
}

/// One input line as an ordered, bounded list of terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expression {
    terms: heapless::Vec<Term, MAX_TERMS>,
}

impl Expression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a term; a full expression fails with [`Error::TooManyTerms`].
    pub fn push(&mut self, term: Term) -> Result<(), Error> {
        self.terms.push(term).map_err(|_| Error::TooManyTerms)
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }
}

impl Deref for Expression {
    type Target = [Term];

    fn deref(&self) -> &[Term] {
        &self.terms
    }
}

/// Read one line of input into `expression`.
///
/// The expression is cleared first. Empty tokens are skipped, anything that
/// does not classify aborts with [`Error::InvalidTerm`] before insertion,
/// and the `MAX_TERMS + 1`-th term aborts with [`Error::TooManyTerms`].
pub fn read_expression<P: CharIo>(
    reader: &mut TokenReader,
    expression: &mut Expression,
    port: &mut P,
) -> Result<(), Error> {
    expression.clear();

    loop {
        let (token, end_of_line) = reader.read_token(port)?;

        if !token.is_empty() {
            let term = classify(token.as_bytes()).ok_or(Error::InvalidTerm)?;
            trace!(%term, "classified token");
            expression.push(term)?;
        }

        if end_of_line {
            break;
        }
    }

    debug!(terms = expression.len(), "expression built");
    Ok(())
}
