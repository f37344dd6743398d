/// Parser state and statement-level grammar.
///
/// Holds the [`Parser`](core::Parser) type, which owns the lexer, and the
/// rules for statements, expressions and operator nodes.
pub mod core;

/// Binary operator precedence levels.
///
/// Each level parses one operand of the next tighter level and then a run of
/// its own operators, appending every operator as a sibling in the enclosing
/// expression node.
pub mod binary;

/// Primary operands.
///
/// Parenthesised expressions, constants, function and negation application,
/// and plain identifiers and literals.
pub mod primary;
