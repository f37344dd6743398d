use std::fmt;

use crate::interpreter::value::core::Number;

/// The kind tag of a [`Token`].
///
/// Lexemes, syntax tree nodes and computed values all share this closed set
/// of kinds; the evaluator rewrites a node's kind when it folds the node into
/// a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TokenKind {
    /// Unrecognised input.
    #[default]
    Undefined,
    /// The `make` keyword; root of an assignment statement.
    Assignment,
    /// Lexer state before the first token has been read.
    Begin,
    /// `&`, `|` or `$`.
    BinaryOp,
    /// `)`.
    ClosingParen,
    /// `e`, `pi` or `rand`.
    Constant,
    /// End of input.
    End,
    /// An expression node: first operand followed by operator nodes.
    Expression,
    /// A decimal number with a fractional part.
    Float,
    /// A named unary function such as `sqrt`.
    Function,
    /// A whole number.
    Integer,
    /// `<<` or `>>`.
    LogicalOp,
    /// `+`, `-`, `*`, `/`, `%` or `^`.
    Op,
    /// `(`.
    OpeningParen,
    /// A plain identifier.
    String,
    /// `~`.
    UnaryOp,
}

impl TokenKind {
    /// Returns `true` for the kinds a fully reduced value can have.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    /// Returns `true` for the kinds that may follow the first operand of an
    /// expression.
    #[must_use]
    pub const fn is_operator(self) -> bool {
        matches!(self, Self::BinaryOp | Self::LogicalOp | Self::Op)
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Undefined => "UNDEFINED",
            Self::Assignment => "ASSIGNMENT",
            Self::Begin => "BEGIN",
            Self::BinaryOp => "BINARY OPERATOR",
            Self::ClosingParen => "CLOSE PARENTHESIS",
            Self::Constant => "CONSTANT",
            Self::End => "END",
            Self::Expression => "EXPRESSION",
            Self::Float => "FLOAT",
            Self::Function => "FUNCTION",
            Self::Integer => "INTEGER",
            Self::LogicalOp => "LOGICAL OPERATOR",
            Self::Op => "OPERATOR",
            Self::OpeningParen => "OPEN PARENTHESIS",
            Self::String => "STRING",
            Self::UnaryOp => "UNARY OPERATOR",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.label())
    }
}

/// The universal unit of lexical and syntactic meaning.
///
/// A token pairs a [`TokenKind`] with its text: the raw lexeme as read by the
/// lexer, or the canonical decimal rendering of a value once the evaluator has
/// folded a node. Tree linkage is kept by the syntax tree that owns the token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Token {
    /// What the token is.
    pub kind: TokenKind,
    /// Lexeme or canonical numeric text.
    pub text: String,
}

impl Token {
    /// Creates a token from a kind and its text.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self { kind,
               text: text.into() }
    }

    /// Creates an empty expression placeholder.
    #[must_use]
    pub fn expression() -> Self {
        Self::new(TokenKind::Expression, "")
    }

    /// Returns `true` if the token holds an integer or float value.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        self.kind.is_numeric()
    }

    /// Flips the sign of an integer or float token in place.
    ///
    /// Returns `false` and leaves the token untouched for every other kind,
    /// or when the text is not a valid number.
    ///
    /// # Example
    /// ```
    /// use clicalc::interpreter::token::{Token, TokenKind};
    ///
    /// let mut t = Token::new(TokenKind::Integer, "5");
    /// assert!(t.negate());
    /// assert_eq!(t.text, "-5");
    ///
    /// let mut op = Token::new(TokenKind::Op, "+");
    /// assert!(!op.negate());
    /// ```
    pub fn negate(&mut self) -> bool {
        if !self.is_numeric() {
            return false;
        }
        match Number::from_token(self) {
            Ok(number) => {
                *self = (-number).into_token();
                true
            },
            Err(_) => false,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.text)
        }
    }
}
