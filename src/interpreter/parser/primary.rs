use crate::{
    error::ParseError,
    interpreter::{
        evaluator::expression::NEGATION,
        parser::core::{ParseResult, Parser},
        token::TokenKind,
        tree::SyntaxTree,
    },
};

impl Parser<'_> {
    /// Parses the tightest-binding operand at the cursor.
    ///
    /// A function name or `~` takes the whole expression that follows it as
    /// its argument, and the cursor is left on the new function node.
    ///
    /// # Errors
    /// - [`ParseError::ExpectingCloseParen`] if a `(` is never closed.
    /// - [`ParseError::ExpectingIdentifier`] if no operand can start here.
    pub(super) fn primary(&mut self, tree: &mut SyntaxTree) -> ParseResult<()> {
        match self.lexer.kind() {
            TokenKind::OpeningParen => {
                self.lexer.advance();
                self.expression(tree)?;
                if self.lexer.kind() != TokenKind::ClosingParen {
                    return Err(ParseError::ExpectingCloseParen { position: self.position() });
                }
                self.lexer.advance();
                Ok(())
            },
            TokenKind::Constant => {
                tree.add_child(self.lexer.current().clone());
                self.lexer.advance();
                Ok(())
            },
            TokenKind::Function => self.application(tree),
            TokenKind::UnaryOp if self.lexer.text() == NEGATION => self.application(tree),
            _ => self.identifier(tree),
        }
    }

    fn application(&mut self, tree: &mut SyntaxTree) -> ParseResult<()> {
        tree.add_child(self.lexer.current().clone());
        let entered = tree.advance_last();
        self.check(entered)?;
        self.lexer.advance();
        self.expression(tree)
    }

    fn identifier(&mut self, tree: &mut SyntaxTree) -> ParseResult<()> {
        match self.lexer.kind() {
            TokenKind::Integer | TokenKind::Float | TokenKind::String => {
                tree.add_child(self.lexer.current().clone());
                self.lexer.advance();
                Ok(())
            },
            _ => Err(ParseError::ExpectingIdentifier { position: self.position() }),
        }
    }
}
