//! # Expression Tokens
//!
//! This module defines the token types shared by the tokenizer and the
//! parser:
//!
//! - [`Span`]: a half-open byte range `[start, end)` into the input line,
//! - [`TokenId`]: the fieldless category of a token, used when a grammar rule
//!   asks for a specific kind,
//! - [`TokenKind`]: the tagged token value; only [`TokenKind::Integer`]
//!   carries a payload,
//! - [`Token`]: a [`TokenKind`] paired with the [`Span`] it was read from.
//!
//! Tokens are produced by [`Tokenizer`](crate::Tokenizer) and consumed by
//! [`Parser`](crate::Parser). They are `Copy` and never change once produced.
use std::fmt;

/// A half-open byte range `[start, end)` in the input text.
///
/// Offsets are byte offsets into the `&str` handed to the tokenizer, so they
/// can be used directly for slicing. It is conventional for `start <= end`.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Starting offset (inclusive).
    pub start: usize,
    /// Ending offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new `Span`.
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Merge with another span by covering both.
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Returns the slice of `input` covered by this span.
    ///
    /// Returns `None` when the span does not fall on character boundaries of
    /// `input` or runs past its end.
    pub fn slice<'a>(&self, input: &'a str) -> Option<&'a str> {
        input.get(self.start..self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Build a [`Span`] inline from byte offsets.
///
/// # Examples
///
/// ```rust
/// # use intexpr::span;
/// let s = span!(2, 5);
/// assert_eq!((s.start, s.end), (2, 5));
/// assert_eq!(s.slice("1 + 23"), Some("+ 2"));
/// ```
#[macro_export]
macro_rules! span {
    ($start:expr, $end:expr) => {
        $crate::Span {
            start: $start,
            end: $end,
        }
    };
}

/// The category of a token, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenId {
    Integer,
    Plus,
    Minus,
    Star,
    Slash,
    End,
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenId::Integer => "integer",
            TokenId::Plus => "'+'",
            TokenId::Minus => "'-'",
            TokenId::Star => "'*'",
            TokenId::Slash => "'/'",
            TokenId::End => "end of input",
        })
    }
}

/// A classified unit of input.
///
/// # Example
/// ```rust
/// # use intexpr::{TokenId, TokenKind};
/// let kind = TokenKind::Integer(42);
/// assert_eq!(kind.id(), TokenId::Integer);
/// assert_ne!(kind, TokenKind::Integer(7));
/// assert_eq!(kind.id(), TokenKind::Integer(7).id());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A non-negative integer literal.
    Integer(i64),
    Plus,
    Minus,
    Star,
    Slash,
    /// End of input. Returned again on every read past the end.
    End,
}

impl TokenKind {
    /// Returns the token's category.
    pub fn id(&self) -> TokenId {
        match self {
            TokenKind::Integer(_) => TokenId::Integer,
            TokenKind::Plus => TokenId::Plus,
            TokenKind::Minus => TokenId::Minus,
            TokenKind::Star => TokenId::Star,
            TokenKind::Slash => TokenId::Slash,
            TokenKind::End => TokenId::End,
        }
    }

    /// Maps a single-character operator to its token kind.
    pub fn from_operator(c: char) -> Option<TokenKind> {
        Some(match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Integer(n) => write!(f, "integer {n}"),
            other => fmt::Display::fmt(&other.id(), f),
        }
    }
}

/// A token together with the span of input it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The token's kind and payload.
    pub kind: TokenKind,
    /// Where the token occurs in the input line.
    pub span: Span,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the token's category.
    #[inline]
    pub fn id(&self) -> TokenId {
        self.kind.id()
    }

    /// Is this the end-of-input marker?
    #[inline]
    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::End
    }
}
