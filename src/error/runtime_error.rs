use thiserror::Error;

use crate::interpreter::tree::TreeError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur while reducing a syntax tree.
///
/// Runtime errors abort the current statement only. The variable store and
/// results already produced for earlier statements are kept.
pub enum RuntimeError {
    /// An operator node that is not a binary, logical or arithmetic operator.
    #[error("Invalid operator")]
    InvalidOperator,
    /// An operand did not reduce to an integer or a float.
    #[error("Invalid operand")]
    InvalidOperand,
    /// The operation is only defined for integers.
    #[error("Expecting integer operands")]
    ExpectingIntegerOperand,
    /// Unknown bitwise operator text.
    #[error("Invalid binary operator")]
    InvalidBinaryOperator,
    /// Unknown shift operator text.
    #[error("Invalid logical operator")]
    InvalidLogicalOperator,
    /// Unknown arithmetic operator text.
    #[error("Invalid arithmetic operator")]
    InvalidArithmeticOperator,
    /// The expression chain is not `operand (operator operand)*`.
    #[error("Invalid expression")]
    InvalidExpression,
    /// Unknown constant name.
    #[error("Invalid constant")]
    InvalidConstant,
    /// Unknown function name or malformed function node.
    #[error("Invalid function")]
    InvalidFunction,
    /// An identifier was read before anything was assigned to it.
    #[error("Undefined identifier")]
    UndefinedIdentifier {
        /// The identifier that was looked up.
        name: String,
    },
    /// The operation needs a non-negative integer.
    #[error("Expecting positive integer operands")]
    ExpectingPositiveIntegerOperand,
    /// Unknown unary operator text.
    #[error("Invalid unary operator")]
    InvalidUnaryOperator,
    /// Division or modulo by zero.
    #[error("Division by zero")]
    DivisionByZero,
    /// A function was applied outside of its mathematical domain.
    #[error("Operand outside of function domain")]
    OutOfDomain,
    /// An operand is too large for the requested operation.
    #[error("Operand too large")]
    Overflow,
}

impl RuntimeError {
    /// Returns the numeric error code shown to the user.
    ///
    /// # Example
    /// ```
    /// use clicalc::error::RuntimeError;
    ///
    /// assert_eq!(RuntimeError::ExpectingIntegerOperand.code(), 9);
    /// assert_eq!(RuntimeError::UndefinedIdentifier { name: "x".into() }.code(), 19);
    /// ```
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::InvalidOperator => 7,
            Self::InvalidOperand => 8,
            Self::ExpectingIntegerOperand => 9,
            Self::InvalidBinaryOperator => 10,
            Self::InvalidLogicalOperator => 11,
            Self::InvalidArithmeticOperator => 12,
            Self::InvalidExpression => 13,
            Self::InvalidConstant => 14,
            Self::InvalidFunction => 15,
            Self::UndefinedIdentifier { .. } => 19,
            Self::ExpectingPositiveIntegerOperand => 20,
            Self::InvalidUnaryOperator => 21,
            Self::DivisionByZero => 22,
            Self::OutOfDomain => 23,
            Self::Overflow => 24,
        }
    }
}

impl From<TreeError> for RuntimeError {
    fn from(_: TreeError) -> Self {
        Self::InvalidExpression
    }
}
