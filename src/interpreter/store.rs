use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, token::Token},
};

/// Separator between a name and its value in [`VariableStore::render`].
pub const BINDING_SEPARATOR: &str = " --> ";

/// Mapping from variable names to their last assigned value.
///
/// Only fully reduced integer and float tokens are stored. Names iterate in
/// lexicographic order.
///
/// # Example
/// ```
/// use clicalc::interpreter::{
///     store::VariableStore,
///     token::{Token, TokenKind},
/// };
///
/// let mut store = VariableStore::new();
/// store.set("y", Token::new(TokenKind::Float, "0.5")).unwrap();
/// store.set("x", Token::new(TokenKind::Integer, "3")).unwrap();
///
/// assert_eq!(store.render(), "x --> 3\ny --> 0.5\n");
/// assert!(store.set("z", Token::new(TokenKind::Op, "+")).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    values: BTreeMap<String, Token>,
}

impl VariableStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a variable.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Token> {
        self.values.get(name)
    }

    /// Binds `name` to `value`, replacing any earlier binding.
    ///
    /// # Errors
    /// [`RuntimeError::InvalidOperand`] if `value` is not an integer or float.
    pub fn set(&mut self, name: impl Into<String>, value: Token) -> EvalResult<()> {
        if !value.is_numeric() {
            return Err(RuntimeError::InvalidOperand);
        }
        let name = name.into();
        debug!(%name, value = %value.text, "assign");
        self.values.insert(name, value);
        Ok(())
    }

    /// Returns `true` if `name` has been assigned.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Forgets every binding.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Returns the number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing has been assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Token)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Renders one `name --> value` line per binding.
    #[must_use]
    pub fn render(&self) -> String {
        self.iter()
            .map(|(name, value)| format!("{name}{BINDING_SEPARATOR}{}\n", value.text))
            .collect()
    }
}
