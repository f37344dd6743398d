use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use rand::Rng;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Number,
    },
};

/// Names the lexer classifies as constants.
pub const CONSTANT_NAMES: &[&str] = &["e", "pi", "rand"];

/// A named constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    /// Euler's number.
    E,
    /// The ratio of a circle's circumference to its diameter.
    Pi,
    /// A fresh uniform random number in `[0, 1)` on every use.
    Rand,
}

impl Constant {
    /// Looks up a constant by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "e" => Some(Self::E),
            "pi" => Some(Self::Pi),
            "rand" => Some(Self::Rand),
            _ => None,
        }
    }
}

impl Context {
    /// Evaluates a constant to a float at the working precision.
    ///
    /// # Errors
    /// [`RuntimeError::InvalidConstant`] for an unknown name.
    pub fn eval_constant(&mut self, name: &str) -> EvalResult<Number> {
        let value = match Constant::from_name(name).ok_or(RuntimeError::InvalidConstant)? {
            Constant::E => self.precision.e()?,
            Constant::Pi => self.precision.pi()?,
            Constant::Rand => self.random(),
        };
        Ok(Number::Float(value))
    }

    /// Draws one random digit per significant digit of the working precision.
    fn random(&mut self) -> BigDecimal {
        let digits = self.precision.digits();
        let text = (0..digits).map(|_| char::from(b'0' + self.rng.gen_range(0..10u8)))
                              .collect::<String>();
        let mantissa = BigInt::parse_bytes(text.as_bytes(), 10).unwrap_or_default();
        BigDecimal::new(mantissa, i64::from(digits))
    }
}
