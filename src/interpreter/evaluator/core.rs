use rand::{SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::{
    config::Config,
    error::RuntimeError,
    interpreter::{
        store::VariableStore,
        token::TokenKind,
        tree::SyntaxTree,
        value::precision::Precision,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Stores the runtime evaluation context.
///
/// A `Context` lives for the whole session. It owns the variable bindings
/// created by `make`, the working precision of float arithmetic, and the
/// generator behind the `rand` constant, which is seeded exactly once.
///
/// # Example
/// ```
/// use clicalc::interpreter::{evaluator::core::Context, parser::core::Parser};
///
/// let mut ctx = Context::new();
/// let mut trees = Parser::new("make x 4 x * 2").parse().unwrap();
///
/// assert_eq!(ctx.eval_statement(&mut trees[0]).unwrap(), None);
/// assert_eq!(ctx.eval_statement(&mut trees[1]).unwrap(), Some("8".to_string()));
/// ```
pub struct Context {
    pub(super) store:     VariableStore,
    pub(super) precision: Precision,
    pub(super) rng:       StdRng,
}

impl Default for Context {
    fn default() -> Self {
        Self::with_config(&Config::default())
    }
}

impl Context {
    /// Creates a context with default precision and an entropy-seeded
    /// generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context from a configuration.
    #[must_use]
    pub fn with_config(config: &Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { store: VariableStore::new(),
               precision: Precision::new(config.precision),
               rng }
    }

    /// Returns the variable bindings.
    #[must_use]
    pub const fn store(&self) -> &VariableStore {
        &self.store
    }

    /// Returns the working precision.
    #[must_use]
    pub const fn precision(&self) -> Precision {
        self.precision
    }

    /// Forgets every variable binding.
    pub fn reset(&mut self) {
        debug!(bindings = self.store.len(), "reset");
        self.store.clear();
    }

    /// Reduces one statement tree.
    ///
    /// An assignment stores the value of its expression and yields nothing;
    /// an expression yields the canonical text of its value.
    ///
    /// # Errors
    /// Any [`RuntimeError`] raised while reducing the tree. The store is only
    /// written once the whole expression has been reduced.
    pub fn eval_statement(&mut self, tree: &mut SyntaxTree) -> EvalResult<Option<String>> {
        tree.advance_root();

        match tree.kind()? {
            TokenKind::Assignment => {
                let name = tree.child_contents(0)?.text.clone();
                tree.advance_forward(1)?;
                let value = self.eval_expression(tree)?;
                self.store.set(name, value.into_token())?;
                Ok(None)
            },
            TokenKind::Expression => {
                if tree.size()? == 0 {
                    return Ok(None);
                }
                let value = self.eval_expression(tree)?;
                debug!(%value, "evaluated");
                Ok(Some(value.to_string()))
            },
            _ => Err(RuntimeError::InvalidExpression),
        }
    }
}
