use bigdecimal::BigDecimal;
use num_traits::Signed;

use crate::interpreter::{
    evaluator::core::EvalResult,
    value::{
        core::Number,
        precision::{self, Precision},
    },
};

/// Absolute value, keeping the argument's kind.
pub fn abs(x: Number, _: Precision) -> EvalResult<Number> {
    Ok(match x {
        Number::Integer(i) => Number::Integer(i.abs()),
        Number::Float(f) => Number::Float(f.abs()),
    })
}

/// Smallest integral value not less than the argument, keeping its kind.
///
/// # Example
/// ```
/// use clicalc::interpreter::{
///     evaluator::function::rounding::ceiling,
///     value::{core::Number, precision::Precision, render::parse_float},
/// };
///
/// let x = Number::Float(parse_float("-2.5").unwrap());
/// assert_eq!(ceiling(x, Precision::default()).unwrap().to_string(), "-2.0");
/// ```
pub fn ceiling(x: Number, _: Precision) -> EvalResult<Number> {
    Ok(integral_float(x, precision::ceil))
}

/// Largest integral value not greater than the argument, keeping its kind.
pub fn floor(x: Number, _: Precision) -> EvalResult<Number> {
    Ok(integral_float(x, precision::floor))
}

/// Nearest integral value, ties away from zero, keeping the argument's kind.
pub fn round(x: Number, _: Precision) -> EvalResult<Number> {
    Ok(integral_float(x, precision::round_half_away))
}

/// Integral part as an integer, truncating toward zero.
pub fn int(x: Number, _: Precision) -> EvalResult<Number> {
    Ok(match x {
        Number::Float(f) => Number::Integer(precision::trunc(&f)),
        integer @ Number::Integer(_) => integer,
    })
}

/// The argument as a float.
pub fn float(x: Number, precision: Precision) -> EvalResult<Number> {
    Ok(Number::Float(precision.round(&x.to_float())))
}

/// Square, keeping the argument's kind.
pub fn sqr(x: Number, precision: Precision) -> EvalResult<Number> {
    Ok(match x {
        Number::Integer(i) => Number::Integer(&i * &i),
        Number::Float(f) => Number::Float(precision.mul(&f, &f)),
    })
}

fn integral_float(x: Number, f: fn(&BigDecimal) -> num_bigint::BigInt) -> Number {
    match x {
        Number::Float(value) => Number::Float(BigDecimal::new(f(&value), 0)),
        integer @ Number::Integer(_) => integer,
    }
}
