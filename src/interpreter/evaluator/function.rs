/// The function table.
///
/// Maps every function name to its implementation and exports the list of
/// names that the lexer recognises.
pub mod core;
/// Transcendental functions.
///
/// Roots, logarithms, and the trigonometric and hyperbolic families. Integer
/// arguments are widened and the result is always a float.
pub mod builtin;
/// Sign and rounding functions.
///
/// `abs`, `ceiling`, `floor`, `round`, `int`, `float` and `sqr`. These keep
/// the argument's kind wherever that makes sense.
pub mod rounding;
/// Integer sequences: `fact` and `fib`.
pub mod integer;
