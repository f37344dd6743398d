use tracing::{debug, trace};

use crate::{
    error::ParseError,
    interpreter::{
        lexer::Lexer,
        parser::binary::Level,
        token::{Token, TokenKind},
        tree::{SyntaxTree, TreeResult},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Recursive-descent parser turning one line into statement trees.
///
/// The parser pulls tokens from its [`Lexer`] and grows a [`SyntaxTree`]
/// below the tree's cursor. Grammar, loosest to tightest:
///
/// ```text
/// statement  := "make" STRING expression | expression
/// expression := shift  (("&" | "|" | "$") shift)*
/// shift      := minus  (("<<" | ">>") minus)*
/// minus      := plus   ("-" plus)*
/// plus       := quot   ("+" quot)*
/// quot       := prod   (("/" | "%") prod)*
/// prod       := power  ("*" power)*
/// power      := primary ("^" primary)*
/// primary    := "(" expression ")" | CONSTANT | (FUNCTION | "~") expression
///             | INTEGER | FLOAT | STRING
/// ```
///
/// Every operator becomes a node appended to the enclosing expression, with a
/// single expression child holding its right operand, so a run of operators
/// from one level folds left to right.
///
/// # Example
/// ```
/// use clicalc::interpreter::{parser::core::Parser, token::TokenKind};
///
/// let trees = Parser::new("make x 2 3 + 4").parse().unwrap();
/// assert_eq!(trees.len(), 2);
/// assert_eq!(trees[0].root_contents().unwrap().kind, TokenKind::Assignment);
/// assert_eq!(trees[1].root_contents().unwrap().kind, TokenKind::Expression);
/// ```
pub struct Parser<'a> {
    pub(super) lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    /// Creates a parser over one line of input.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self { lexer: Lexer::new(source) }
    }

    /// Returns the 1-based lexer offset reached so far.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.lexer.position()
    }

    /// Consumes the whole input into independent statement trees.
    ///
    /// Each returned tree has its cursor on the root.
    ///
    /// # Errors
    /// The first [`ParseError`] met; no tree is returned in that case.
    pub fn parse(&mut self) -> ParseResult<Vec<SyntaxTree>> {
        let mut trees = Vec::new();
        self.lexer.advance();

        while self.lexer.has_next() {
            let mut tree = SyntaxTree::new();
            self.statement(&mut tree)?;
            tree.advance_root();
            trace!(position = self.position(), "parsed statement\n{tree}");
            trees.push(tree);
        }

        debug!(statements = trees.len(), "parsed line");
        Ok(trees)
    }

    /// `statement := "make" STRING expression | expression`
    fn statement(&mut self, tree: &mut SyntaxTree) -> ParseResult<()> {
        if self.lexer.kind() != TokenKind::Assignment {
            return self.expression(tree);
        }

        tree.add_child(self.lexer.current().clone());
        self.lexer.advance();
        if self.lexer.kind() != TokenKind::String {
            return Err(ParseError::ExpectingStringIdentifier { position: self.position() });
        }
        tree.add_child(self.lexer.current().clone());
        self.lexer.advance();
        self.expression(tree)
    }

    /// Appends a new expression node below the cursor and parses a full
    /// expression into it. The cursor is left where it was.
    pub(super) fn expression(&mut self, tree: &mut SyntaxTree) -> ParseResult<()> {
        tree.push_cache();
        // The first node of a tree is the root and already under the cursor.
        let is_root = tree.is_empty();
        tree.add_child(Token::expression());
        if !is_root {
            let entered = tree.advance_last();
            self.check(entered)?;
        }
        Level::Bitwise.parse(self, tree)?;
        self.restore(tree)
    }

    /// Appends the current operator token below the cursor, gives it an empty
    /// expression child, moves the cursor into that child and reads the next
    /// token.
    pub(super) fn add_symbol(&mut self, tree: &mut SyntaxTree) -> ParseResult<()> {
        tree.add_child(self.lexer.current().clone());
        let entered = tree.advance_last();
        self.check(entered)?;
        tree.add_child(Token::expression());
        let entered = tree.advance_forward(0);
        self.check(entered)?;
        self.lexer.advance();
        Ok(())
    }

    pub(super) fn restore(&self, tree: &mut SyntaxTree) -> ParseResult<()> {
        let restored = tree.pop_cache();
        self.check(restored)
    }

    pub(super) fn check<T>(&self, result: TreeResult<T>) -> ParseResult<T> {
        result.map_err(|source| ParseError::Internal { source,
                                                       position: self.position() })
    }
}
