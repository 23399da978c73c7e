//! # Expression Error Type
//!
//! This module defines [`ExprError`], the single error surface of the
//! tokenizer–parser–evaluator pipeline. Every fallible operation returns
//! `Result<T, ExprError>`, and the failure raised at the point of detection
//! travels unchanged up to the caller via `?`.
//!
//! [`ErrorKind`] is the fieldless category of an error, for callers that only
//! care which of the fixed failure kinds occurred.
use crate::{Span, TokenId, TokenKind};
use std::fmt;
use thiserror::Error;

/// What a grammar rule was looking for when it met an unexpected token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A specific token kind.
    Token(TokenId),
    /// The start of a factor: an integer or a unary `+`/`-`.
    Operand,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(id) => fmt::Display::fmt(id, f),
            Expected::Operand => f.write_str("integer or unary operator"),
        }
    }
}

/// The category of an [`ExprError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidCharacter,
    UnexpectedToken,
    TrailingInput,
    DivisionByZero,
    Overflow,
}

/// Represents all possible failures of a parse.
///
/// All variants are terminal for the current parse: nothing is retried and
/// no partial value is reported.
///
/// # Example
/// ```rust
/// # use intexpr::{evaluate, ErrorKind, ExprError};
/// let err = evaluate("7 % 2").unwrap_err();
/// assert!(matches!(err, ExprError::InvalidCharacter { ch: '%', offset: 2 }));
/// assert_eq!(err.kind(), ErrorKind::InvalidCharacter);
/// assert_eq!(err.to_string(), "invalid character '%' at offset 2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    /// The tokenizer met a character that is not whitespace, a digit, or one
    /// of `+ - * /`.
    #[error("invalid character {ch:?} at offset {offset}")]
    InvalidCharacter {
        /// The offending character.
        ch: char,
        /// Byte offset of the character in the input.
        offset: usize,
    },

    /// A grammar rule required a token kind that the lookahead did not match.
    #[error("unexpected token: expected {expected}, found {found} at {span}")]
    UnexpectedToken {
        expected: Expected,
        found: TokenKind,
        span: Span,
    },

    /// A complete expression was followed by more tokens.
    #[error("unexpected token after expression: {found} at {span}")]
    TrailingInput { found: TokenKind, span: Span },

    /// The right-hand factor of `/` evaluated to zero.
    #[error("division by zero at {span}")]
    DivisionByZero {
        /// Span of the divisor.
        span: Span,
    },

    /// A literal or an intermediate result does not fit in `i64`.
    #[error("integer overflow at {span}")]
    Overflow {
        /// Span of the literal or of the whole overflowing operation.
        span: Span,
    },
}

impl ExprError {
    /// Returns the error's category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExprError::InvalidCharacter { .. } => ErrorKind::InvalidCharacter,
            ExprError::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            ExprError::TrailingInput { .. } => ErrorKind::TrailingInput,
            ExprError::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            ExprError::Overflow { .. } => ErrorKind::Overflow,
        }
    }

    /// Returns the span of input the error points at.
    pub fn span(&self) -> Span {
        match self {
            ExprError::InvalidCharacter { ch, offset } => {
                Span::new(*offset, *offset + ch.len_utf8())
            }
            ExprError::UnexpectedToken { span, .. }
            | ExprError::TrailingInput { span, .. }
            | ExprError::DivisionByZero { span }
            | ExprError::Overflow { span } => *span,
        }
    }
}
