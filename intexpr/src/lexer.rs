//! # Expression Tokenizer
//!
//! [`Tokenizer`] scans an input line left to right and produces one
//! [`Token`] per call to [`Tokenizer::next_token`]. Nothing is scanned ahead
//! of demand: the parser pulls tokens as its grammar rules need them.
//!
//! The tokenizer recognizes:
//!
//! - the operators `+`, `-`, `*` and `/`,
//! - maximal runs of ASCII digits, read as a non-negative `i64`,
//! - whitespace (`char::is_whitespace`), which is skipped.
//!
//! Any other character is an [`ExprError::InvalidCharacter`]. A literal that
//! does not fit in `i64` is an [`ExprError::Overflow`].
//!
//! Once the input is exhausted every call returns [`TokenKind::End`]. The
//! [`Iterator`] implementation instead stops at the end marker, and stops for
//! good after the first error.
use crate::{ExprError, Span, Token, TokenKind};
use std::iter::FusedIterator;

/// A pull-based tokenizer over a single line of input.
///
/// # Example
/// ```rust
/// # use intexpr::{Tokenizer, TokenKind};
/// let mut tokenizer = Tokenizer::new(" 12 *3");
/// assert_eq!(tokenizer.next_token().unwrap().kind, TokenKind::Integer(12));
/// assert_eq!(tokenizer.next_token().unwrap().kind, TokenKind::Star);
/// assert_eq!(tokenizer.next_token().unwrap().kind, TokenKind::Integer(3));
/// assert_eq!(tokenizer.next_token().unwrap().kind, TokenKind::End);
/// assert_eq!(tokenizer.next_token().unwrap().kind, TokenKind::End);
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    /// Byte offset of the next unread character. Never moves backward.
    pos: usize,
    /// Set once the iterator has yielded an error.
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            failed: false,
        }
    }

    /// Tokenizes the entire input, excluding the end marker.
    ///
    /// Stops at, and returns, the first error.
    pub fn tokenize(input: &'a str) -> Result<Vec<Token>, ExprError> {
        Tokenizer::new(input).collect()
    }

    /// The input being scanned.
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the next token, consuming its characters and any whitespace
    /// before it.
    ///
    /// At end of input this returns [`TokenKind::End`] and leaves the cursor
    /// where it is, however many times it is called. After an error the
    /// cursor stays on the offending text, so calling again reports the same
    /// error.
    pub fn next_token(&mut self) -> Result<Token, ExprError> {
        self.skip_whitespace();
        let start = self.pos;

        let Some(ch) = self.input[start..].chars().next() else {
            let token = Token::new(TokenKind::End, Span::new(start, start));
            log::trace!("token {:?}", token);
            return Ok(token);
        };

        let token = if let Some(kind) = TokenKind::from_operator(ch) {
            self.pos += ch.len_utf8();
            Token::new(kind, Span::new(start, self.pos))
        } else if ch.is_ascii_digit() {
            self.integer(start)?
        } else {
            log::trace!("invalid character {:?} at offset {}", ch, start);
            return Err(ExprError::InvalidCharacter { ch, offset: start });
        };

        log::trace!("token {:?}", token);
        Ok(token)
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Reads the maximal digit run starting at `start`.
    fn integer(&mut self, start: usize) -> Result<Token, ExprError> {
        let digits = &self.input[start..];
        let len = digits.bytes().take_while(u8::is_ascii_digit).count();
        let span = Span::new(start, start + len);

        let value = digits[..len]
            .bytes()
            .try_fold(0i64, |acc, b| {
                acc.checked_mul(10)?.checked_add(i64::from(b - b'0'))
            })
            .ok_or(ExprError::Overflow { span })?;

        self.pos = span.end;
        Ok(Token::new(TokenKind::Integer(value), span))
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, ExprError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(token) if token.is_end() => None,
            Ok(token) => Some(Ok(token)),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for Tokenizer<'_> {}
