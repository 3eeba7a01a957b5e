//! # tessera
//!
//! tessera is a small, dynamically typed scripting language written in Rust.
//! It tokenizes, parses and evaluates programs with lexical scoping,
//! closures, classes with static members, enums with tagged payloads,
//! `match` expressions and `throw`/`try`/`catch`.
//!
//! The usual entry point is [`run`], which evaluates a source string in a
//! fresh global scope. Hosts that keep state between snippets use
//! [`run_in`] with their own [`Environment`] and [`Context`].

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
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Program,
    error::{Error, ParseError},
    interpreter::{
        environment::Environment, evaluator::core::Context, lexer::tokenize,
        parser::core::parse_program, value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and the supporting
/// types that represent a program as a tree. The tree is built by the parser
/// and walked by the evaluator; every node carries the source line it came
/// from for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// Parse errors carry a line and column and are always fatal. Runtime errors
/// carry a line and can be intercepted by `try`/`catch`.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and scopes to provide a complete runtime for source code.
pub mod interpreter;
/// General utilities for safe numeric conversion.
pub mod util;

/// Tokenizes and parses `source` into a [`Program`].
///
/// # Errors
/// Returns the first lexing or parsing error.
///
/// # Examples
/// ```
/// use tessera::parse;
///
/// let program = parse("let x = 1\nx + 1").unwrap();
/// assert_eq!(program.body.len(), 2);
///
/// assert!(parse("let = 1").is_err());
/// ```
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = tokenize(source)?;
    parse_program(&mut tokens.iter().peekable())
}

/// Parses and evaluates `source` in a fresh global scope.
///
/// The result is the value of the last top-level statement, or the value of
/// a top-level `return`.
///
/// # Errors
/// Returns an error if parsing fails or evaluation raises an error that no
/// `try`/`catch` intercepts.
///
/// # Examples
/// ```
/// use tessera::{interpreter::value::core::Value, run};
///
/// let value = run("let x = 1; while (x < 4) { x = x + 1; } x;").unwrap();
/// assert_eq!(value, Value::Number(4.0));
///
/// // 'y' is not defined.
/// assert!(run("let x = y + 1").is_err());
/// ```
pub fn run(source: &str) -> Result<Value, Error> {
    run_in(source, &Environment::global(), &mut Context::new())
}

/// Parses and evaluates `source` in an existing scope.
///
/// Bindings declared at the top level of `source` land in `env` and stay
/// visible to later calls.
///
/// # Errors
/// Returns an error if parsing fails or evaluation raises an error that no
/// `try`/`catch` intercepts.
///
/// # Examples
/// ```
/// use tessera::{
///     interpreter::{environment::Environment, evaluator::core::Context, value::core::Value},
///     run_in,
/// };
///
/// let env = Environment::global();
/// let mut context = Context::new();
///
/// run_in("fn double(n) { n * 2 }", &env, &mut context).unwrap();
/// let value = run_in("double(21)", &env, &mut context).unwrap();
///
/// assert_eq!(value, Value::Number(42.0));
/// ```
pub fn run_in(source: &str, env: &Environment, context: &mut Context) -> Result<Value, Error> {
    let program = parse(source)?;
    Ok(context.evaluate_program(&program, env)?)
}
