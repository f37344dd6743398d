/// The numeric value type.
///
/// Defines [`Number`](core::Number), the tagged union of arbitrary-size
/// integers and arbitrary-precision decimals that every reduced syntax tree
/// node holds, together with type promotion and sign flipping.
pub mod core;
/// Working precision and the transcendental functions.
///
/// Decimal results are rounded half-to-even to a fixed number of significant
/// digits. This module owns that rounding plus division, roots, logarithms,
/// exponentials and the trigonometric and hyperbolic families, all computed
/// with a few guard digits and rounded once at the end.
pub mod precision;
/// Canonical text form of numbers.
///
/// Converts between the decimal text stored in tokens and the numeric types,
/// and renders decimals in plain positional notation.
pub mod render;
