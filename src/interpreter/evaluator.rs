/// Evaluation context and statement dispatch.
///
/// Holds the [`Context`](core::Context) that owns the variable store, the
/// working precision and the random number generator, and reduces whole
/// statement trees.
pub mod core;

/// Expression reduction.
///
/// Folds an expression node's first operand and operator chain left to right,
/// rewriting every visited node into the value it stands for.
pub mod expression;

/// Binary operators.
///
/// Bitwise, shift and arithmetic operators with integer/float promotion.
pub mod operator;

/// Named constants: `e`, `pi` and `rand`.
pub mod constant;

/// Named unary functions.
///
/// The function table, which also feeds the lexer's vocabulary, and the
/// implementations grouped by family.
pub mod function;
