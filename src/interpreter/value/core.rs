use std::{fmt, ops::Neg};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        token::{Token, TokenKind},
        value::render::{parse_float, parse_integer, render_float, render_integer},
    },
};

/// A reduced numeric value.
///
/// Integers have unbounded size. Floats are decimals whose precision is kept
/// in check by [`Precision`](crate::interpreter::value::precision::Precision);
/// a `Number` itself does not know the working precision.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// Arbitrary-size integer.
    Integer(BigInt),
    /// Arbitrary-precision decimal.
    Float(BigDecimal),
}

/// Two operands brought to a common kind.
///
/// See [`Number::promote`].
#[derive(Debug, Clone, PartialEq)]
pub enum Operands {
    /// Both operands were integers.
    Integers(BigInt, BigInt),
    /// At least one operand was a float; both are floats now.
    Floats(BigDecimal, BigDecimal),
}

impl Number {
    /// Reads the value held by an integer or float token.
    ///
    /// # Errors
    /// [`RuntimeError::InvalidOperand`] for any other kind of token or for
    /// text that is not a number.
    pub fn from_token(token: &Token) -> EvalResult<Self> {
        let number = match token.kind {
            TokenKind::Integer => parse_integer(&token.text).map(Self::Integer),
            TokenKind::Float => parse_float(&token.text).map(Self::Float),
            _ => None,
        };
        number.ok_or(RuntimeError::InvalidOperand)
    }

    /// Turns the value into a token carrying its canonical text.
    #[must_use]
    pub fn into_token(self) -> Token {
        Token::new(self.kind(), self.to_string())
    }

    /// Returns [`TokenKind::Integer`] or [`TokenKind::Float`].
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::Integer(_) => TokenKind::Integer,
            Self::Float(_) => TokenKind::Float,
        }
    }

    /// Returns the value as a decimal, widening integers exactly.
    #[must_use]
    pub fn to_float(&self) -> BigDecimal {
        match self {
            Self::Integer(i) => BigDecimal::new(i.clone(), 0),
            Self::Float(f) => f.clone(),
        }
    }

    /// Brings two operands to a common kind.
    ///
    /// The pair stays integral only if both sides are integers; otherwise both
    /// are widened to floats.
    ///
    /// # Example
    /// ```
    /// use clicalc::interpreter::value::core::{Number, Operands};
    ///
    /// let pair = Number::promote(Number::Integer(2.into()), Number::Integer(3.into()));
    /// assert!(matches!(pair, Operands::Integers(..)));
    ///
    /// let x = clicalc::interpreter::value::render::parse_float("0.5").unwrap();
    /// let pair = Number::promote(Number::Integer(2.into()), Number::Float(x));
    /// assert!(matches!(pair, Operands::Floats(..)));
    /// ```
    #[must_use]
    pub fn promote(left: Self, right: Self) -> Operands {
        match (left, right) {
            (Self::Integer(a), Self::Integer(b)) => Operands::Integers(a, b),
            (a, b) => Operands::Floats(a.to_float(), b.to_float()),
        }
    }
}

impl Neg for Number {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Self::Integer(i) => Self::Integer(-i),
            Self::Float(f) => Self::Float(-f),
        }
    }
}

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Self {
        Self::Integer(value)
    }
}

impl From<BigDecimal> for Number {
    fn from(value: BigDecimal) -> Self {
        Self::Float(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => f.write_str(&render_integer(i)),
            Self::Float(x) => f.write_str(&render_float(x)),
        }
    }
}
