use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};

use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Narrows a non-negative integer operand to a `u32` count.
///
/// Used for shift amounts, integer exponents and the arguments of `fact` and
/// `fib`.
///
/// ## Errors
/// - `ExpectingPositiveIntegerOperand` if `value` is negative.
/// - `Overflow` if `value` does not fit in a `u32`.
///
/// ## Example
/// ```
/// use clicalc::{error::RuntimeError, util::num::count};
///
/// assert_eq!(count(&10.into()), Ok(10));
/// assert_eq!(count(&(-1).into()), Err(RuntimeError::ExpectingPositiveIntegerOperand));
/// assert_eq!(count(&(1u64 << 40).into()), Err(RuntimeError::Overflow));
/// ```
pub fn count(value: &BigInt) -> EvalResult<u32> {
    if value.is_negative() {
        return Err(RuntimeError::ExpectingPositiveIntegerOperand);
    }
    value.to_u32().ok_or(RuntimeError::Overflow)
}

