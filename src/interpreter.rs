/// The evaluator module reduces syntax trees to values.
///
/// The evaluator walks a statement tree with the tree's own cursor and folds
/// every node into the number it stands for, applying operators and functions
/// with integer/float promotion. Assignments write to the variable store.
///
/// # Responsibilities
/// - Reduces expressions, operators, constants and function calls in place.
/// - Owns the session state: variable store, precision and random generator.
/// - Reports typed runtime errors such as invalid operands or domain errors.
pub mod evaluator;
/// The lexer module tokenizes a line of input.
///
/// The lexer reads raw text and produces one token at a time on demand:
/// numbers, words classified as constants, functions, the assignment keyword
/// or identifiers, and operators.
///
/// # Responsibilities
/// - Recognises integer and float literals, words and operator symbols.
/// - Classifies words against the constant and function vocabularies.
/// - Tracks the offset reported with parse and runtime errors.
pub mod lexer;
/// The parser module builds syntax trees from tokens.
///
/// A recursive-descent parser with one level per operator precedence class.
/// Each statement on the line becomes its own tree.
pub mod parser;
/// The variable store.
///
/// Maps names assigned with `make` to their values for the rest of the
/// session.
pub mod store;
/// The token model shared by the lexer, the syntax tree and the evaluator.
pub mod token;
/// The syntax tree.
///
/// An arena of token nodes with parent links, a movable cursor and a stack of
/// saved cursor positions. The parser grows it and the evaluator reduces it in
/// place.
pub mod tree;
/// The value module defines numbers and their arithmetic.
///
/// Integers are unbounded and exact; floats are decimals rounded to a
/// configurable number of significant digits.
///
/// # Responsibilities
/// - Defines the `Number` type and integer/float promotion.
/// - Implements precision-controlled arithmetic and transcendental functions.
/// - Converts numbers to and from their canonical text.
pub mod value;
