use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        token::{Token, TokenKind},
        value::{
            core::{Number, Operands},
            precision::Precision,
        },
    },
    util::num::count,
};

/// Bitwise operators, integers only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitwiseOp {
    /// `&`
    And,
    /// `|`
    Or,
    /// `$`
    Xor,
}

/// Shift operators, integers only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftOp {
    /// `<<`
    Left,
    /// `>>`, rounding toward zero.
    Right,
}

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`; floor division on integers.
    Div,
    /// `%`; non-negative remainder, integers only.
    Mod,
    /// `^`
    Pow,
}

/// Any operator that can follow the first operand of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `&`, `|`, `$`
    Bitwise(BitwiseOp),
    /// `<<`, `>>`
    Shift(ShiftOp),
    /// `+`, `-`, `*`, `/`, `%`, `^`
    Arithmetic(ArithmeticOp),
}

impl Operator {
    /// Decodes an operator token.
    ///
    /// # Errors
    /// - [`RuntimeError::InvalidBinaryOperator`],
    ///   [`RuntimeError::InvalidLogicalOperator`] or
    ///   [`RuntimeError::InvalidArithmeticOperator`] for unknown text of the
    ///   respective kind.
    /// - [`RuntimeError::InvalidOperator`] for a token that is not an operator.
    pub fn from_token(token: &Token) -> EvalResult<Self> {
        match token.kind {
            TokenKind::BinaryOp => match token.text.as_str() {
                "&" => Ok(Self::Bitwise(BitwiseOp::And)),
                "|" => Ok(Self::Bitwise(BitwiseOp::Or)),
                "$" => Ok(Self::Bitwise(BitwiseOp::Xor)),
                _ => Err(RuntimeError::InvalidBinaryOperator),
            },
            TokenKind::LogicalOp => match token.text.as_str() {
                "<<" => Ok(Self::Shift(ShiftOp::Left)),
                ">>" => Ok(Self::Shift(ShiftOp::Right)),
                _ => Err(RuntimeError::InvalidLogicalOperator),
            },
            TokenKind::Op => match token.text.as_str() {
                "+" => Ok(Self::Arithmetic(ArithmeticOp::Add)),
                "-" => Ok(Self::Arithmetic(ArithmeticOp::Sub)),
                "*" => Ok(Self::Arithmetic(ArithmeticOp::Mul)),
                "/" => Ok(Self::Arithmetic(ArithmeticOp::Div)),
                "%" => Ok(Self::Arithmetic(ArithmeticOp::Mod)),
                "^" => Ok(Self::Arithmetic(ArithmeticOp::Pow)),
                _ => Err(RuntimeError::InvalidArithmeticOperator),
            },
            _ => Err(RuntimeError::InvalidOperator),
        }
    }

    /// Applies the operator.
    ///
    /// The result is an integer only when both operands are integers.
    ///
    /// # Example
    /// ```
    /// use clicalc::interpreter::{
    ///     evaluator::operator::{ArithmeticOp, Operator},
    ///     value::{core::Number, precision::Precision},
    /// };
    ///
    /// let div = Operator::Arithmetic(ArithmeticOp::Div);
    /// let q = div.apply(Number::Integer((-7).into()), Number::Integer(2.into()), Precision::default())
    ///            .unwrap();
    /// assert_eq!(q.to_string(), "-4");
    /// ```
    ///
    /// # Errors
    /// - [`RuntimeError::ExpectingIntegerOperand`] for bitwise, shift or `%`
    ///   on floats.
    /// - [`RuntimeError::DivisionByZero`], [`RuntimeError::OutOfDomain`],
    ///   [`RuntimeError::Overflow`] or
    ///   [`RuntimeError::ExpectingPositiveIntegerOperand`] from the individual
    ///   operations.
    pub fn apply(self, left: Number, right: Number, precision: Precision) -> EvalResult<Number> {
        let operands = Number::promote(left, right);
        match self {
            Self::Bitwise(op) => {
                let (a, b) = integers(operands)?;
                Ok(Number::Integer(bitwise(op, &a, &b)))
            },
            Self::Shift(op) => {
                let (a, b) = integers(operands)?;
                shift(op, &a, &b).map(Number::from)
            },
            Self::Arithmetic(op) => match operands {
                Operands::Integers(a, b) => integer_arithmetic(op, &a, &b).map(Number::from),
                Operands::Floats(a, b) => {
                    let result = match op {
                        ArithmeticOp::Add => precision.add(&a, &b),
                        ArithmeticOp::Sub => precision.sub(&a, &b),
                        ArithmeticOp::Mul => precision.mul(&a, &b),
                        ArithmeticOp::Div => precision.div(&a, &b)?,
                        ArithmeticOp::Mod => return Err(RuntimeError::ExpectingIntegerOperand),
                        ArithmeticOp::Pow => precision.pow(&a, &b)?,
                    };
                    Ok(Number::Float(result))
                },
            },
        }
    }
}

fn integers(operands: Operands) -> EvalResult<(BigInt, BigInt)> {
    match operands {
        Operands::Integers(a, b) => Ok((a, b)),
        Operands::Floats(..) => Err(RuntimeError::ExpectingIntegerOperand),
    }
}

fn bitwise(op: BitwiseOp, a: &BigInt, b: &BigInt) -> BigInt {
    match op {
        BitwiseOp::And => a & b,
        BitwiseOp::Or => a | b,
        BitwiseOp::Xor => a ^ b,
    }
}

fn shift(op: ShiftOp, a: &BigInt, b: &BigInt) -> EvalResult<BigInt> {
    let amount = count(b)?;
    Ok(match op {
        ShiftOp::Left => a << amount,
        ShiftOp::Right if a.is_negative() => -((-a) >> amount),
        ShiftOp::Right => a >> amount,
    })
}

fn integer_arithmetic(op: ArithmeticOp, a: &BigInt, b: &BigInt) -> EvalResult<BigInt> {
    match op {
        ArithmeticOp::Add => Ok(a + b),
        ArithmeticOp::Sub => Ok(a - b),
        ArithmeticOp::Mul => Ok(a * b),
        ArithmeticOp::Div => {
            if b.is_zero() {
                return Err(RuntimeError::DivisionByZero);
            }
            Ok(a.div_floor(b))
        },
        ArithmeticOp::Mod => {
            if b.is_zero() {
                return Err(RuntimeError::DivisionByZero);
            }
            Ok(a.mod_floor(&b.abs()))
        },
        ArithmeticOp::Pow => integer_pow(a, b),
    }
}

fn integer_pow(base: &BigInt, exponent: &BigInt) -> EvalResult<BigInt> {
    if exponent.is_negative() {
        return Err(RuntimeError::ExpectingPositiveIntegerOperand);
    }
    // Bases whose powers never grow accept any exponent.
    if base.is_zero() {
        return Ok(if exponent.is_zero() { BigInt::one() } else { BigInt::zero() });
    }
    if base.is_one() {
        return Ok(BigInt::one());
    }
    if *base == -BigInt::one() {
        return Ok(if exponent.is_odd() { -BigInt::one() } else { BigInt::one() });
    }
    Ok(base.pow(count(exponent)?))
}
