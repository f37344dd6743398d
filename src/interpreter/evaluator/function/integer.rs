use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{core::Number, precision::Precision},
    },
    util::num::count,
};

/// Factorial of a non-negative integer.
///
/// # Errors
/// - `ExpectingIntegerOperand` for a float argument.
/// - `ExpectingPositiveIntegerOperand` for a negative argument.
/// - `Overflow` for an argument beyond 32 bits.
///
/// # Example
/// ```
/// use clicalc::interpreter::{
///     evaluator::function::integer::fact,
///     value::{core::Number, precision::Precision},
/// };
///
/// let r = fact(Number::Integer(20.into()), Precision::default()).unwrap();
/// assert_eq!(r.to_string(), "2432902008176640000");
/// ```
pub fn fact(x: Number, _: Precision) -> EvalResult<Number> {
    let n = count(&integer_argument(x)?)?;
    Ok(Number::Integer((2..=n).fold(BigInt::one(), |acc, k| acc * k)))
}

/// The `n`-th Fibonacci number, with `fib(0) = 0` and `fib(1) = 1`.
///
/// # Errors
/// Same conditions as [`fact`].
pub fn fib(x: Number, _: Precision) -> EvalResult<Number> {
    let n = count(&integer_argument(x)?)?;
    Ok(Number::Integer(fibonacci(n)))
}

fn integer_argument(x: Number) -> EvalResult<BigInt> {
    match x {
        Number::Integer(i) => Ok(i),
        Number::Float(_) => Err(RuntimeError::ExpectingIntegerOperand),
    }
}

/// Fast doubling: F(2k) = F(k) (2 F(k+1) - F(k)), F(2k+1) = F(k)^2 + F(k+1)^2.
fn fibonacci(n: u32) -> BigInt {
    let mut a = BigInt::zero();
    let mut b = BigInt::one();
    for bit in (0..u32::BITS - n.leading_zeros()).rev() {
        let doubled = &a * (&b * 2u8 - &a);
        let next = &a * &a + &b * &b;
        if (n >> bit) & 1 == 0 {
            a = doubled;
            b = next;
        } else {
            b = &doubled + &next;
            a = next;
        }
    }
    a
}
