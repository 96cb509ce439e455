//! # infixa
//!
//! infixa is an infix arithmetic expression parser and evaluator written in
//! Rust. It tokenizes, validates, and evaluates expressions over numeric
//! literals, the binary operators `+ - * / **`, and parentheses, producing a
//! single floating-point result or reporting why the expression is
//! malformed.

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

use crate::{
    ast::Node,
    engine::{
        brackets::BracketChecker,
        lexer::{Token, display_tokens, tokenize},
        parser::ExpressionBuilder,
    },
    error::EvalError,
};

/// Defines the structure of parsed expressions.
///
/// This module declares the `Node` sum type that represents an expression as
/// a tree of operator and operand nodes, independent of its original text.
/// Trees are built by the parser and reduced to a value by `Node::eval`.
///
/// # Responsibilities
/// - Defines the numeric leaf and the five binary-operator node variants.
/// - Carries precedence, associativity, and evaluation rules as intrinsic,
///   queryable node properties.
/// - Keeps the operator set closed so additions are compile-time checked.
pub mod ast;
/// Ties the pipeline stages together.
///
/// This module holds the three stages an expression passes through on its
/// way to a value: the lexer, the bracket checker, and the parser.
///
/// # Responsibilities
/// - Converts text to tokens, tokens to a validated tree.
/// - Keeps each stage independent and individually testable.
pub mod engine;
/// Provides the unified error type for the pipeline.
///
/// This module defines the error kinds an expression can be rejected with,
/// standardizes their user-facing messages, and integrates with the standard
/// error handling traits.
///
/// # Responsibilities
/// - Defines the error taxonomy: empty input, invalid brackets, malformed
///   expression.
/// - Attaches token positions and details for context.
pub mod error;

/// Per-call configuration for the pipeline.
///
/// There is no process-wide state: every behavior toggle travels with the
/// call that wants it.
#[derive(Debug, Default, Clone, Copy)]
pub struct EvalOptions {
    /// Print the token sequence, each parser step, and the final value.
    pub trace: bool,
}

/// Evaluates one expression string to a value.
///
/// Equivalent to [`evaluate_with`] with default options. Each call
/// constructs its own pipeline state, so independent calls may run
/// concurrently on different inputs.
///
/// # Errors
/// Returns an [`EvalError`] when the expression is rejected by the bracket
/// check or the parser.
///
/// # Examples
/// ```
/// use infixa::evaluate;
///
/// assert_eq!(evaluate("1+3*2").unwrap(), 7.0);
/// assert_eq!(evaluate("2**3**2").unwrap(), 512.0);
///
/// // Empty input defaults to zero rather than an error.
/// assert_eq!(evaluate("").unwrap(), 0.0);
///
/// // Mismatched brackets are rejected before parsing begins.
/// assert!(evaluate("(1+2").is_err());
/// ```
pub fn evaluate(source: &str) -> Result<f64, EvalError> {
    evaluate_with(source, &EvalOptions::default())
}

/// Evaluates one expression string to a value with explicit options.
///
/// The pipeline is string → tokenize → bracket check → build → eval. Each
/// stage fails fast: a rejected expression is never patched up into a
/// partial result. Division by zero and domain-invalid powers are not
/// rejected; they propagate IEEE-754 infinity/NaN through evaluation.
///
/// A single unmatched `)` as the very last token is dropped and the
/// remaining prefix evaluated; every other bracket mismatch is
/// [`EvalError::InvalidBrackets`].
///
/// # Parameters
/// - `source`: The expression text.
/// - `options`: Per-call configuration, such as the detailed trace flag.
///
/// # Returns
/// The evaluated value.
///
/// # Errors
/// Returns an [`EvalError`] when the expression is rejected by the bracket
/// check or the parser.
pub fn evaluate_with(source: &str, options: &EvalOptions) -> Result<f64, EvalError> {
    let tokens = tokenize(source)?;
    if options.trace {
        display_tokens(&tokens);
    }
    let tokens = bracket_validated(&tokens)?;

    let root = ExpressionBuilder::with_trace(options.trace).build(tokens)?;
    if !root.is_valid() {
        return Err(EvalError::MalformedExpression { details:
                       "Built tree is not evaluable".to_string(), });
    }

    let value = root.eval();
    if options.trace {
        println!("Tree: {root}");
        println!("Calculated number is: {value}");
    }
    Ok(value)
}

/// Parses one expression string to its AST root without evaluating it.
///
/// Runs the same tokenize → bracket check → build stages as
/// [`evaluate_with`], under the same trailing-bracket policy, and hands the
/// tree back for inspection. Used by the AST-dump surface.
///
/// # Errors
/// Returns an [`EvalError`] when the expression is rejected by the bracket
/// check or the parser.
///
/// # Example
/// ```
/// use infixa::parse;
///
/// let root = parse("(5+10*(3-9))").unwrap();
/// assert_eq!(root.to_string(), "(5 + (10 * (3 - 9)))");
/// assert_eq!(root.eval(), -55.0);
/// ```
pub fn parse(source: &str) -> Result<Node, EvalError> {
    let tokens = tokenize(source)?;
    let tokens = bracket_validated(&tokens)?;
    ExpressionBuilder::new().build(tokens)
}

/// Applies the bracket check and the trailing-bracket policy.
///
/// The scan only stops early at an unmatched `)`; when that happens on the
/// very last token, the dangling bracket is dropped and the prefix is
/// parsed. Every other mismatch is rejected with the position of the first
/// unmatched `)` or of the first `(` left open.
fn bracket_validated(tokens: &[Token]) -> Result<&[Token], EvalError> {
    let mut checker = BracketChecker::new();
    let stopped_at = checker.check(tokens);

    if checker.result() {
        return Ok(tokens);
    }
    if stopped_at + 1 == tokens.len() {
        return Ok(&tokens[..stopped_at]);
    }

    let position = if stopped_at < tokens.len() {
        stopped_at
    } else {
        checker.first_unclosed().unwrap_or(0)
    };
    Err(EvalError::InvalidBrackets { position })
}
