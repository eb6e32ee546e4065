use crate::value::{Error, Value};

pub const STACK_SIZE: usize = 32;

/// Bounded LIFO of values for one evaluation.
///
/// Push and pop report overflow and underflow as errors instead of
/// indexing past the buffer.
#[derive(Debug, Clone, Default)]
pub struct Stack<const N: usize = STACK_SIZE> {
    values: heapless::Vec<Value, N>,
}

impl<const N: usize> Stack<N> {
    pub fn new() -> Self {
        Self {
            values: heapless::Vec::new(),
        }
    }

    pub fn push(&mut self, value: Value) -> Result<(), Error> {
        self.values.push(value).map_err(|_| Error::StackOverflow)
    }

    pub fn pop(&mut self) -> Result<Value, Error> {
        self.values.pop().ok_or(Error::StackUnderflow)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        N
    }

    /// Values from bottom to top.
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }
}
