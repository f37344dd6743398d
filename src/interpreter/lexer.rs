use std::ops::Range;

use logos::Logos;

use crate::interpreter::{
    evaluator::{constant::CONSTANT_NAMES, function::core::BUILTIN_FUNCTIONS},
    token::{Token, TokenKind},
};

/// Keyword that starts an assignment statement.
pub const ASSIGNMENT_KEYWORD: &str = "make";

/// Raw lexemes recognised in a line of input.
///
/// Words are classified afterwards by [`Lexer`], since whether `sqrt` is a
/// function or `x` a variable depends on the evaluator's tables rather than on
/// the characters themselves.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme {
    /// Decimal literal with a point, such as `3.25` or `3.`.
    #[regex(r"[0-9]+\.[0-9]*")]
    Float,
    /// Digits only.
    #[regex(r"[0-9]+")]
    Integer,
    /// Letter followed by letters or digits.
    #[regex(r"[a-zA-Z][a-zA-Z0-9]*")]
    Word,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `+`, `-`, `*`, `/`, `%` or `^`.
    #[regex(r"[+\-*/%^]")]
    Op,
    /// `&`, `|` or `$`.
    #[regex(r"[&|$]")]
    BinaryOp,
    /// `<<` or `>>`.
    #[token("<<")]
    #[token(">>")]
    Shift,
    /// `~`
    #[token("~")]
    Tilde,
    /// Whitespace.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

/// Pull-based tokenizer over a single line.
///
/// The lexer always holds one current token. It starts in
/// [`TokenKind::Begin`] and each call to [`advance`](Self::advance) replaces
/// the current token with the next one, until [`TokenKind::End`] is reached
/// and repeated forever after. Characters that start no lexeme produce a
/// [`TokenKind::Undefined`] token instead of an error; the parser decides what
/// to make of it.
///
/// # Example
/// ```
/// use clicalc::interpreter::{lexer::Lexer, token::TokenKind};
///
/// let kinds = Lexer::new("make x 2 * sqrt(y)").map(|t| t.kind).collect::<Vec<_>>();
/// assert_eq!(kinds,
///            [TokenKind::Assignment,
///             TokenKind::String,
///             TokenKind::Integer,
///             TokenKind::Op,
///             TokenKind::Function,
///             TokenKind::OpeningParen,
///             TokenKind::String,
///             TokenKind::ClosingParen]);
/// ```
pub struct Lexer<'a> {
    inner:   logos::Lexer<'a, Lexeme>,
    current: Token,
    span:    Range<usize>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned before the first token of `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self { inner:   Lexeme::lexer(source),
               current: Token::new(TokenKind::Begin, ""),
               span:    0..0, }
    }

    /// Reads the next token and makes it current.
    ///
    /// # Returns
    /// The new current token.
    pub fn advance(&mut self) -> &Token {
        let Some(lexeme) = self.inner.next() else {
            let end = self.inner.source().len();
            self.span = end..end;
            self.current = Token::new(TokenKind::End, "");
            return &self.current;
        };

        self.span = self.inner.span();
        let text = self.inner.slice();
        let kind = match lexeme {
            Ok(Lexeme::Float) => TokenKind::Float,
            Ok(Lexeme::Integer) => TokenKind::Integer,
            Ok(Lexeme::Word) => classify_word(text),
            Ok(Lexeme::LParen) => TokenKind::OpeningParen,
            Ok(Lexeme::RParen) => TokenKind::ClosingParen,
            Ok(Lexeme::Op) => TokenKind::Op,
            Ok(Lexeme::BinaryOp) => TokenKind::BinaryOp,
            Ok(Lexeme::Shift) => TokenKind::LogicalOp,
            Ok(Lexeme::Tilde) => TokenKind::UnaryOp,
            Ok(Lexeme::Ignored) | Err(()) => TokenKind::Undefined,
        };
        self.current = Token::new(kind, text);
        &self.current
    }

    /// Returns `false` once the end of the input has been reached.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current.kind != TokenKind::End
    }

    /// Returns the current token.
    #[must_use]
    pub const fn current(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the text of the current token.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.current.text
    }

    /// Returns the 1-based offset just past the current token.
    ///
    /// Once the input is exhausted this is the input length plus one.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.span.end + 1
    }
}

/// Yields every token after `Begin`, stopping before `End`.
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.advance();
        (token.kind != TokenKind::End).then(|| token.clone())
    }
}

/// Decides what a word means: constant, function, keyword or identifier, in
/// that order.
#[must_use]
pub fn classify_word(word: &str) -> TokenKind {
    if CONSTANT_NAMES.contains(&word) {
        TokenKind::Constant
    } else if BUILTIN_FUNCTIONS.contains(&word) {
        TokenKind::Function
    } else if word == ASSIGNMENT_KEYWORD {
        TokenKind::Assignment
    } else {
        TokenKind::String
    }
}
