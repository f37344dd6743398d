use crate::interpreter::{
    parser::core::{ParseResult, Parser},
    token::{Token, TokenKind},
    tree::SyntaxTree,
};

/// Binary operator precedence levels, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// `&`, `|`, `$`
    Bitwise,
    /// `<<`, `>>`
    Shift,
    /// `-`
    Minus,
    /// `+`
    Plus,
    /// `/`, `%`
    Quotient,
    /// `*`
    Product,
    /// `^`
    Power,
}

impl Level {
    /// The level whose operands this level combines, or `None` when operands
    /// are primaries.
    #[must_use]
    pub const fn tighter(self) -> Option<Self> {
        match self {
            Self::Bitwise => Some(Self::Shift),
            Self::Shift => Some(Self::Minus),
            Self::Minus => Some(Self::Plus),
            Self::Plus => Some(Self::Quotient),
            Self::Quotient => Some(Self::Product),
            Self::Product => Some(Self::Power),
            Self::Power => None,
        }
    }

    /// Returns `true` if `token` is an operator of this level.
    #[must_use]
    pub fn matches(self, token: &Token) -> bool {
        match self {
            Self::Bitwise => token.kind == TokenKind::BinaryOp,
            Self::Shift => token.kind == TokenKind::LogicalOp,
            level => {
                token.kind == TokenKind::Op
                && match level {
                    Self::Minus => token.text == "-",
                    Self::Plus => token.text == "+",
                    Self::Quotient => token.text == "/" || token.text == "%",
                    Self::Product => token.text == "*",
                    _ => token.text == "^",
                }
            },
        }
    }

    /// Parses one operand of the tighter level followed by any run of this
    /// level's operators, each with its own right operand.
    pub(super) fn parse(self, parser: &mut Parser<'_>, tree: &mut SyntaxTree) -> ParseResult<()> {
        self.operand(parser, tree)?;

        while self.matches(parser.lexer.current()) {
            tree.push_cache();
            parser.add_symbol(tree)?;
            self.operand(parser, tree)?;
            parser.restore(tree)?;
        }
        Ok(())
    }

    fn operand(self, parser: &mut Parser<'_>, tree: &mut SyntaxTree) -> ParseResult<()> {
        match self.tighter() {
            Some(level) => level.parse(parser, tree),
            None => parser.primary(tree),
        }
    }
}
