//! # clicalc
//!
//! clicalc is an interactive arbitrary-precision expression calculator.
//! It evaluates arithmetic, bitwise and transcendental expressions over exact
//! big integers and decimals of configurable precision, and remembers values
//! assigned with `make` for the rest of the session.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

use crate::{
    error::CalcError,
    interpreter::{evaluator::core::Context, parser::core::Parser},
};

/// Built-in interactive commands.
///
/// Recognises `about`, `exit`, `help`, `reset` and `state` and carries the
/// texts the interactive session prints.
pub mod command;
/// Session configuration.
///
/// Working precision, random seed and log verbosity, with validation.
pub mod config;
/// Provides unified error types for parsing and evaluation.
///
/// Parse errors and runtime errors are closed sets of named kinds, each with
/// a stable numeric code and message. Both carry the input offset needed to
/// point at the offending part of a line.
///
/// # Responsibilities
/// - Defines error enums for every failure mode of the parser and evaluator.
/// - Maps each kind to its code and fixed message.
/// - Annotates the input with the position of the failure.
pub mod error;
/// Orchestrates lexing, parsing and evaluation.
///
/// This module ties together the token model, the lexer, the syntax tree, the
/// parser, the evaluator and the numeric values.
///
/// # Responsibilities
/// - Coordinates all core components from raw text to a reduced value.
/// - Owns the session state through the evaluation context.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Safe narrowing of big integers to machine integers.
pub mod util;

/// Parses and evaluates one line of input.
///
/// The whole line is parsed first; a parse error rejects the line without
/// evaluating anything. Statements are then evaluated in order and `emit` is
/// called with the result of every expression statement. Evaluation stops at
/// the first runtime error, after the results of earlier statements have been
/// emitted and their assignments stored.
///
/// # Errors
/// The first [`CalcError`] met.
///
/// # Examples
/// ```
/// use clicalc::{evaluate_line, interpreter::evaluator::core::Context};
///
/// let mut ctx = Context::new();
/// let mut out = Vec::new();
///
/// evaluate_line("make x 6 x * 7 x + 1", &mut ctx, |s| out.push(s)).unwrap();
/// assert_eq!(out, ["42", "7"]);
///
/// // The first statement still produces output before the second fails.
/// out.clear();
/// let err = evaluate_line("1 + 1 y", &mut ctx, |s| out.push(s)).unwrap_err();
/// assert_eq!(out, ["2"]);
/// assert_eq!(err.code(), 19);
/// ```
pub fn evaluate_line(source: &str,
                     context: &mut Context,
                     mut emit: impl FnMut(String))
                     -> Result<(), CalcError> {
    debug!(source, "evaluate line");

    let mut parser = Parser::new(source);
    let mut trees = parser.parse()?;
    let position = parser.position();

    for tree in &mut trees {
        match context.eval_statement(tree) {
            Ok(Some(output)) => emit(output),
            Ok(None) => {},
            Err(source) => return Err(CalcError::Runtime { source, position }),
        }
    }
    Ok(())
}

/// Evaluates one line and returns the last result it produced.
///
/// # Errors
/// The first [`CalcError`] met; see [`evaluate_line`].
///
/// # Examples
/// ```
/// use clicalc::{evaluate, interpreter::evaluator::core::Context};
///
/// let mut ctx = Context::new();
/// assert_eq!(evaluate("2 ^ 100", &mut ctx).unwrap().as_deref(),
///            Some("1267650600228229401496703205376"));
/// assert_eq!(evaluate("make z 1", &mut ctx).unwrap(), None);
/// ```
pub fn evaluate(source: &str, context: &mut Context) -> Result<Option<String>, CalcError> {
    let mut last = None;
    evaluate_line(source, context, |output| last = Some(output))?;
    Ok(last)
}
