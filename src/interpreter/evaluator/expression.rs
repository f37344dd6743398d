use tracing::trace;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            operator::Operator,
        },
        token::TokenKind,
        tree::{SyntaxTree, TreeError},
        value::core::Number,
    },
};

/// Text of the negation operator.
pub const NEGATION: &str = "~";

impl Context {
    /// Reduces the expression node under the cursor to a number.
    ///
    /// The first child is the accumulator; every further child must be an
    /// operator node with a single expression child, applied to the
    /// accumulator in order. Each visited child is rewritten into its value,
    /// and finally the expression node itself becomes a terminal value with
    /// no children. The cursor ends where it started.
    ///
    /// # Errors
    /// - [`RuntimeError::InvalidExpression`] if the node is not a well-formed
    ///   expression.
    /// - Anything raised by operands, operators or functions.
    pub fn eval_expression(&mut self, tree: &mut SyntaxTree) -> EvalResult<Number> {
        if tree.kind()? != TokenKind::Expression {
            return Err(RuntimeError::InvalidExpression);
        }
        let id = tree.current().ok_or(TreeError::NoCurrent)?;
        let size = tree.size()?;
        if size == 0 {
            return Err(RuntimeError::InvalidExpression);
        }

        tree.advance_forward(0)?;
        let mut accum = self.eval_operand(tree)?;
        tree.advance_back()?;

        for index in 1..size {
            tree.advance_forward(index)?;
            accum = self.eval_operator(tree, accum)?;
            tree.advance_back()?;
        }

        tree.reduce(id, accum.clone().into_token())?;
        Ok(accum)
    }

    /// Reduces the first child of an expression: a literal, identifier,
    /// constant, function application, negation or nested expression.
    fn eval_operand(&mut self, tree: &mut SyntaxTree) -> EvalResult<Number> {
        let token = tree.contents()?.clone();

        let value = match token.kind {
            TokenKind::Integer | TokenKind::Float => {
                self.precision.normalize(Number::from_token(&token)?)
            },
            TokenKind::String => {
                let bound = self.store
                                .get(&token.text)
                                .ok_or_else(|| RuntimeError::UndefinedIdentifier { name: token.text.clone() })?;
                Number::from_token(bound)?
            },
            TokenKind::Constant => self.eval_constant(&token.text)?,
            TokenKind::Function => self.eval_function(tree)?,
            TokenKind::Expression => self.eval_expression(tree)?,
            TokenKind::UnaryOp => self.eval_negation(tree, &token.text)?,
            _ => return Err(RuntimeError::InvalidExpression),
        };

        tree.reduce_current(value.clone().into_token())?;
        Ok(value)
    }

    fn eval_negation(&mut self, tree: &mut SyntaxTree, text: &str) -> EvalResult<Number> {
        if text != NEGATION {
            return Err(RuntimeError::InvalidUnaryOperator);
        }
        if tree.size()? != 1 {
            return Err(RuntimeError::InvalidExpression);
        }

        tree.advance_forward(0)?;
        self.eval_expression(tree)?;
        if !tree.negate()? {
            return Err(RuntimeError::InvalidOperand);
        }
        let negated = Number::from_token(tree.contents()?)?;
        tree.advance_back()?;
        Ok(negated)
    }

    /// Applies the operator node under the cursor to `accum` and the value of
    /// the operator's expression child.
    fn eval_operator(&mut self, tree: &mut SyntaxTree, accum: Number) -> EvalResult<Number> {
        let token = tree.contents()?.clone();
        if !token.kind.is_operator() || tree.size()? != 1 {
            return Err(RuntimeError::InvalidExpression);
        }
        let operator = Operator::from_token(&token)?;

        tree.advance_forward(0)?;
        let operand = self.eval_expression(tree)?;
        tree.advance_back()?;

        trace!(%accum, op = %token.text, %operand, "apply");
        operator.apply(accum, operand, self.precision)
    }
}
