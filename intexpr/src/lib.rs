//! # intexpr
//!
//! A tokenizer and recursive-descent evaluator for single-line integer
//! arithmetic expressions over `+ - * /` with unary `+`/`-`.
//!
//! ## Overview
//!
//! The crate is a two-stage pipeline:
//!
//! - [`lexer`] — [`Tokenizer`] turns the input line into [`Token`]s, one per
//!   request, each annotated with the [`Span`] it was read from.
//! - [`parser`] — [`Parser`] pulls tokens through a one-token lookahead and
//!   validates and evaluates the expression in a single pass.
//!
//! Shared definitions live in [`token`] and [`error`]. Every failure is an
//! [`ExprError`], returned by value and propagated with `?`.
//!
//! ## Example
//!
//! ```rust
//! use intexpr::{evaluate, validate, ErrorKind};
//!
//! assert_eq!(evaluate("3 + 4 * 2").unwrap(), 11);
//! assert_eq!(evaluate("-7 / 2").unwrap(), -3);
//! assert!(validate("--5").is_ok());
//!
//! assert_eq!(evaluate("10 / 0").unwrap_err().kind(), ErrorKind::DivisionByZero);
//! assert_eq!(evaluate("3 +").unwrap_err().kind(), ErrorKind::UnexpectedToken);
//! assert_eq!(evaluate("3 + 4 5").unwrap_err().kind(), ErrorKind::TrailingInput);
//! ```
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use error::{ErrorKind, Expected, ExprError};
pub use lexer::Tokenizer;
pub use parser::Parser;
pub use token::{Span, Token, TokenId, TokenKind};

/// Parses `input` as one expression and returns its value.
pub fn evaluate(input: &str) -> Result<i64, ExprError> {
    Parser::try_new(Tokenizer::new(input))?.parse()
}

/// Checks that `input` is a valid expression, discarding its value.
///
/// Division by zero and overflow make an expression invalid, since they are
/// detected while evaluating.
pub fn validate(input: &str) -> Result<(), ExprError> {
    evaluate(input).map(|_| ())
}
