use thiserror::Error;

use crate::interpreter::tree::TreeError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur while turning a line into syntax
/// trees.
///
/// Every variant carries the 1-based lexer offset at which parsing stopped so
/// the caller can point at the offending part of the input.
pub enum ParseError {
    /// An operand (integer, float or identifier) was expected but something
    /// else was found.
    #[error("Expecting identifier")]
    ExpectingIdentifier {
        /// Lexer offset where the error occurred.
        position: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("Expecting close parenthesis")]
    ExpectingCloseParen {
        /// Lexer offset where the error occurred.
        position: usize,
    },
    /// The `make` keyword was not followed by a plain identifier.
    #[error("Expecting alpha-numeric identifier")]
    ExpectingStringIdentifier {
        /// Lexer offset where the error occurred.
        position: usize,
    },
    /// The parser tried to move the tree cursor somewhere that does not exist.
    #[error("Malformed syntax tree ({source})")]
    Internal {
        /// The failed tree operation.
        source:   TreeError,
        /// Lexer offset where the error occurred.
        position: usize,
    },
}

impl ParseError {
    /// Returns the lexer offset recorded with the error.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::ExpectingIdentifier { position }
            | Self::ExpectingCloseParen { position }
            | Self::ExpectingStringIdentifier { position }
            | Self::Internal { position, .. } => *position,
        }
    }

    /// Returns the numeric error code shown to the user.
    ///
    /// # Example
    /// ```
    /// use clicalc::error::ParseError;
    ///
    /// let err = ParseError::ExpectingCloseParen { position: 7 };
    /// assert_eq!(err.code(), 5);
    /// ```
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Internal { .. } => 1,
            Self::ExpectingIdentifier { .. } => 4,
            Self::ExpectingCloseParen { .. } => 5,
            Self::ExpectingStringIdentifier { .. } => 18,
        }
    }
}
