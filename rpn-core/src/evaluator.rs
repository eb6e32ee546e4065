// Stack machine evaluator
//
// EXECUTION MODEL:
// 1. Values push themselves onto the stack
// 2. Operators pop the second operand, then the first, and push
//    apply(op, first, second), so "a b -" computes a - b
// 3. When the terms run out the top of the stack is the result
//
// Anything left underneath the result is ignored; "1 2" evaluates to 2.

use crate::stack::Stack;
use crate::value::{Error, Operator, Term, Value};

/// Evaluate a term sequence on a fresh [`STACK_SIZE`](crate::stack::STACK_SIZE) stack.
pub fn evaluate(terms: &[Term]) -> Result<Value, Error> {
    let mut stack: Stack = Stack::new();
    evaluate_with_stack(terms, &mut stack)
}

/// Evaluate on a caller-supplied stack of any capacity.
///
/// The stack is expected to be empty; values already on it take part in the
/// evaluation as if they had been pushed first.
pub fn evaluate_with_stack<const N: usize>(
    terms: &[Term],
    stack: &mut Stack<N>,
) -> Result<Value, Error> {
    for term in terms {
        match *term {
            Term::Value(value) => stack.push(value)?,
            Term::Operator(op) => {
                let second = stack.pop()?;
                let first = stack.pop()?;
                stack.push(apply(op, first, second)?)?;
            }
        }
    }

    let result = stack.pop()?;
    if !stack.is_empty() {
        debug!(leftover = stack.len(), "values left on the stack were ignored");
    }
    Ok(result)
}

// ( first second -- result )
// Division and remainder truncate toward zero. A zero divisor is trapped and
// results that do not fit a Value are reported instead of wrapping.
pub fn apply(op: Operator, first: Value, second: Value) -> Result<Value, Error> {
    match op {
        Operator::Add => first.checked_add(second).ok_or(Error::Overflow),
        Operator::Subtract => first.checked_sub(second).ok_or(Error::Overflow),
        Operator::Multiply => first.checked_mul(second).ok_or(Error::Overflow),
        Operator::Divide => {
            if second == 0 {
                return Err(Error::DivisionByZero);
            }
            // Only MIN / -1 can fail here
            first.checked_div(second).ok_or(Error::Overflow)
        }
        Operator::Remainder => {
            if second == 0 {
                return Err(Error::DivisionByZero);
            }
            // MIN % -1 is mathematically 0, which is what wrapping_rem gives
            Ok(first.wrapping_rem(second))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Operator::*;

    fn v(value: Value) -> Term {
        Term::Value(value)
    }

    fn op(operator: Operator) -> Term {
        Term::Operator(operator)
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(evaluate(&[v(3), v(4), op(Add)]), Ok(7));
        assert_eq!(evaluate(&[v(10), v(2), op(Divide)]), Ok(5));
        assert_eq!(evaluate(&[v(-5), v(3), op(Multiply)]), Ok(-15));
        assert_eq!(evaluate(&[v(7), v(2), op(Remainder)]), Ok(1));
        assert_eq!(evaluate(&[v(1), v(2), v(3), op(Add), op(Add)]), Ok(6));
    }

    #[test]
    fn test_operand_order() {
        assert_eq!(evaluate(&[v(10), v(3), op(Subtract)]), Ok(7));
        assert_eq!(evaluate(&[v(3), v(10), op(Subtract)]), Ok(-7));
        assert_eq!(evaluate(&[v(20), v(4), op(Divide)]), Ok(5));
        assert_eq!(evaluate(&[v(4), v(20), op(Divide)]), Ok(0));
        assert_eq!(evaluate(&[v(20), v(6), op(Remainder)]), Ok(2));
    }

    #[test]
    fn test_truncating_division() {
        assert_eq!(evaluate(&[v(-7), v(2), op(Divide)]), Ok(-3));
        assert_eq!(evaluate(&[v(7), v(-2), op(Divide)]), Ok(-3));
        assert_eq!(evaluate(&[v(-7), v(2), op(Remainder)]), Ok(-1));
        assert_eq!(evaluate(&[v(7), v(-2), op(Remainder)]), Ok(1));
    }

    #[test]
    fn test_underflow() {
        assert_eq!(evaluate(&[op(Add)]), Err(Error::StackUnderflow));
        assert_eq!(evaluate(&[v(1), op(Add)]), Err(Error::StackUnderflow));
        assert_eq!(evaluate(&[]), Err(Error::StackUnderflow));
    }

    #[test]
    fn test_leftover_values_are_ignored() {
        assert_eq!(evaluate(&[v(1), v(2)]), Ok(2));
        assert_eq!(evaluate(&[v(1), v(2), v(3), op(Add)]), Ok(5));
    }

    #[test]
    fn test_overflow_on_small_stack() {
        let mut stack: Stack<2> = Stack::new();
        assert_eq!(
            evaluate_with_stack(&[v(1), v(2), v(3)], &mut stack),
            Err(Error::StackOverflow)
        );

        let mut stack: Stack<2> = Stack::new();
        assert_eq!(
            evaluate_with_stack(&[v(1), v(2), op(Add), v(3), op(Multiply)], &mut stack),
            Ok(9)
        );
    }

    #[test]
    fn test_division_by_zero_is_trapped() {
        assert_eq!(apply(Divide, 1, 0), Err(Error::DivisionByZero));
        assert_eq!(apply(Remainder, 1, 0), Err(Error::DivisionByZero));
        assert_eq!(apply(Divide, 0, 0), Err(Error::DivisionByZero));
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(apply(Add, i32::MAX, 1), Err(Error::Overflow));
        assert_eq!(apply(Subtract, i32::MIN, 1), Err(Error::Overflow));
        assert_eq!(apply(Multiply, 65536, 65536), Err(Error::Overflow));
        assert_eq!(apply(Divide, i32::MIN, -1), Err(Error::Overflow));
        assert_eq!(apply(Remainder, i32::MIN, -1), Ok(0));
    }
}
