/// Parsing errors.
///
/// Defines the grammar violations that can be detected while the lexer's
/// token stream is turned into syntax trees, such as a missing closing
/// parenthesis or an operand that is not an identifier or a number.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error kinds that can be raised while a syntax tree is reduced
/// to a value: type mismatches between operators and operands, unknown
/// identifiers, and domain violations of the numeric functions.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
use thiserror::Error;

/// Marker inserted into the echoed input at the offending offset.
pub const POSITION_MARKER: &str = "[ ]";

/// Error returned by the line-level entry points.
///
/// Wraps either a [`ParseError`] or a [`RuntimeError`] together with the
/// 1-based lexer offset at which parsing stopped, so that a front end can
/// point at the relevant part of the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// The line could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A statement failed while being evaluated.
    #[error("{source}")]
    Runtime {
        /// The evaluation failure.
        source:   RuntimeError,
        /// Lexer offset at which parsing of the line stopped.
        position: usize,
    },
}

impl CalcError {
    /// Returns the small integer code of the error kind.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Parse(e) => e.code(),
            Self::Runtime { source, .. } => source.code(),
        }
    }

    /// Returns the fixed, human-readable message of the error kind.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns the 1-based lexer offset associated with the error.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Parse(e) => e.position(),
            Self::Runtime { position, .. } => *position,
        }
    }

    /// Returns the input with [`POSITION_MARKER`] inserted right before the
    /// offending offset.
    ///
    /// Offsets past the end of the input put the marker at the end.
    ///
    /// # Example
    /// ```
    /// use clicalc::error::{CalcError, ParseError};
    ///
    /// let err = CalcError::from(ParseError::ExpectingCloseParen { position: 7 });
    /// assert_eq!(err.annotate("(1 + 2"), "(1 + 2[ ]");
    /// ```
    #[must_use]
    pub fn annotate(&self, input: &str) -> String {
        let mut index = self.position().saturating_sub(1).min(input.len());
        while !input.is_char_boundary(index) {
            index -= 1;
        }

        let mut annotated = String::with_capacity(input.len() + POSITION_MARKER.len());
        annotated.push_str(&input[..index]);
        annotated.push_str(POSITION_MARKER);
        annotated.push_str(&input[index..]);
        annotated
    }
}
