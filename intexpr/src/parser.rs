//! # Expression Parser
//!
//! [`Parser`] is a recursive-descent parser that evaluates while it
//! validates. It owns a [`Tokenizer`] and a single lookahead token, and
//! implements the grammar
//!
//! ```text
//! expression := term   (('+' | '-') term)*
//! term       := factor (('*' | '/') factor)*
//! factor     := ('+' | '-')* INTEGER
//! ```
//!
//! ## Behavior highlights
//! - `*` and `/` bind tighter than `+` and `-`; both levels are
//!   left-associative.
//! - Unary `+` and `-` stack arbitrarily (`--5` is `5`); a run of signs is
//!   read iteratively, so its length is not limited by the stack.
//! - `/` truncates toward zero; a zero divisor is
//!   [`ExprError::DivisionByZero`].
//! - Arithmetic is checked `i64`; overflow is [`ExprError::Overflow`].
//! - The first failure aborts the parse and is returned unchanged.
use crate::{Expected, ExprError, Span, Token, TokenId, TokenKind, Tokenizer};
use std::mem;

/// A value computed by a grammar rule, with the span of input it came from.
#[derive(Debug, Clone, Copy)]
struct Operand {
    value: i64,
    span: Span,
}

/// Parses and evaluates one expression.
///
/// # Example
///
/// ```rust
/// # use intexpr::{Parser, Tokenizer};
/// let parser = Parser::try_new(Tokenizer::new("3 + 4 * 2")).unwrap();
/// assert_eq!(parser.parse().unwrap(), 11);
/// ```
#[derive(Debug)]
pub struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    /// The token not yet consumed by any grammar rule.
    current: Token,
}

impl<'a> Parser<'a> {
    /// Creates a parser and pulls the first token into the lookahead slot.
    ///
    /// Fails if the first token cannot be read.
    pub fn try_new(mut tokenizer: Tokenizer<'a>) -> Result<Self, ExprError> {
        let current = tokenizer.next_token()?;
        Ok(Self { tokenizer, current })
    }

    /// The current lookahead token.
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Parses the whole input as one expression and returns its value.
    ///
    /// Fails with [`ExprError::TrailingInput`] if anything but the end of
    /// input follows the expression.
    pub fn parse(mut self) -> Result<i64, ExprError> {
        let result = self.expression()?;
        if !self.current.is_end() {
            log::trace!("trailing {:?}", self.current);
            return Err(ExprError::TrailingInput {
                found: self.current.kind,
                span: self.current.span,
            });
        }
        log::debug!(
            "parsed {:?} = {} ({})",
            self.tokenizer.input(),
            result.value,
            result.span
        );
        Ok(result.value)
    }

    /// Replaces the lookahead with the next token and returns the old one.
    fn advance(&mut self) -> Result<Token, ExprError> {
        let next = self.tokenizer.next_token()?;
        Ok(mem::replace(&mut self.current, next))
    }

    /// Consumes the lookahead if it is of kind `expected`.
    fn consume(&mut self, expected: TokenId) -> Result<Token, ExprError> {
        if self.current.id() != expected {
            return Err(ExprError::UnexpectedToken {
                expected: Expected::Token(expected),
                found: self.current.kind,
                span: self.current.span,
            });
        }
        let token = self.advance()?;
        log::trace!("consumed {:?}", token);
        Ok(token)
    }

    fn expression(&mut self) -> Result<Operand, ExprError> {
        log::trace!("expression at {}", self.current.span);
        let mut result = self.term()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Plus => TokenId::Plus,
                TokenKind::Minus => TokenId::Minus,
                _ => break,
            };
            self.consume(op)?;
            let rhs = self.term()?;
            let span = result.span.merge(&rhs.span);
            let value = match op {
                TokenId::Plus => result.value.checked_add(rhs.value),
                _ => result.value.checked_sub(rhs.value),
            };
            result = Operand {
                value: value.ok_or(ExprError::Overflow { span })?,
                span,
            };
        }

        Ok(result)
    }

    fn term(&mut self) -> Result<Operand, ExprError> {
        log::trace!("term at {}", self.current.span);
        let mut result = self.factor()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Star => TokenId::Star,
                TokenKind::Slash => TokenId::Slash,
                _ => break,
            };
            self.consume(op)?;
            let rhs = self.factor()?;
            let span = result.span.merge(&rhs.span);
            let value = match op {
                TokenId::Star => result.value.checked_mul(rhs.value),
                _ => {
                    if rhs.value == 0 {
                        return Err(ExprError::DivisionByZero { span: rhs.span });
                    }
                    // i64::MIN / -1 is the only remaining failure.
                    result.value.checked_div(rhs.value)
                }
            };
            result = Operand {
                value: value.ok_or(ExprError::Overflow { span })?,
                span,
            };
        }

        Ok(result)
    }

    /// Reads a run of unary signs followed by an integer literal.
    ///
    /// The signs are consumed in a loop rather than by recursion, so the
    /// length of a sign run is not bounded by the stack.
    fn factor(&mut self) -> Result<Operand, ExprError> {
        log::trace!("factor at {}", self.current.span);
        let start = self.current.span;
        let mut negations = 0usize;

        loop {
            match self.current.kind {
                TokenKind::Plus => {
                    self.consume(TokenId::Plus)?;
                }
                TokenKind::Minus => {
                    self.consume(TokenId::Minus)?;
                    negations += 1;
                }
                TokenKind::Integer(value) => {
                    let token = self.consume(TokenId::Integer)?;
                    // Literals are non-negative, so negating one cannot overflow.
                    let value = if negations % 2 == 1 { -value } else { value };
                    return Ok(Operand {
                        value,
                        span: start.merge(&token.span),
                    });
                }
                found => {
                    return Err(ExprError::UnexpectedToken {
                        expected: Expected::Operand,
                        found,
                        span: self.current.span,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, span};
    use proptest::collection::vec;
    use proptest::prelude::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn eval(input: &str) -> Result<i64, ExprError> {
        init_logger();
        Parser::try_new(Tokenizer::new(input))?.parse()
    }

    fn kind_of(input: &str) -> ErrorKind {
        eval(input).unwrap_err().kind()
    }

    #[test]
    fn respects_operator_precedence() {
        assert_eq!(eval("3 + 4 * 2"), Ok(11));
        assert_eq!(eval("3 * 4 + 2"), Ok(14));
        assert_eq!(eval("2 + 12 / 4 - 1"), Ok(4));
        assert_eq!(eval("1 + 2 * 3 * 4 - 5"), Ok(20));
    }

    #[test]
    fn operators_are_left_associative() {
        assert_eq!(eval("10 - 3 - 2"), Ok(5));
        assert_eq!(eval("100 / 10 / 5"), Ok(2));
        assert_eq!(eval("8 / 2 * 4"), Ok(16));
        assert_eq!(eval("7 * 3 / 2"), Ok(10));
    }

    #[test]
    fn unary_operators_stack() {
        assert_eq!(eval("-5 * -3"), Ok(15));
        assert_eq!(eval("--5"), Ok(5));
        assert_eq!(eval("- - -5"), Ok(-5));
        assert_eq!(eval("+-+5"), Ok(-5));
        assert_eq!(eval("3 - -2"), Ok(5));
        assert_eq!(eval("3--2"), Ok(5));
        assert_eq!(eval("2 * +3"), Ok(6));
    }

    #[test]
    fn long_sign_runs_do_not_exhaust_the_stack() {
        let even = format!("{}5", "-".repeat(1_000_000));
        assert_eq!(eval(&even), Ok(5));

        let odd = format!("{}5", "-".repeat(1_000_001));
        assert_eq!(eval(&odd), Ok(-5));

        let mixed = format!("7 * {}2", "+-".repeat(500_000));
        assert_eq!(eval(&mixed), Ok(14));
    }

    #[test]
    fn sign_run_without_literal_fails_after_the_signs() {
        assert_eq!(
            eval("2 * - + -"),
            Err(ExprError::UnexpectedToken {
                expected: Expected::Operand,
                found: TokenKind::End,
                span: span!(9, 9),
            })
        );
        assert_eq!(
            eval("- - * 3"),
            Err(ExprError::UnexpectedToken {
                expected: Expected::Operand,
                found: TokenKind::Star,
                span: span!(4, 5),
            })
        );
    }

    #[test]
    fn signed_factor_span_covers_signs_and_literal() {
        assert_eq!(
            eval("1 / - -0"),
            Err(ExprError::DivisionByZero { span: span!(4, 8) })
        );
    }

    #[test]
    fn division_truncates_toward_zero() {
        assert_eq!(eval("7 / 2"), Ok(3));
        assert_eq!(eval("-7 / 2"), Ok(-3));
        assert_eq!(eval("7 / -2"), Ok(-3));
        assert_eq!(eval("-7 / -2"), Ok(3));
        assert_eq!(eval("1 / 2"), Ok(0));
    }

    #[test]
    fn division_by_zero_points_at_divisor() {
        assert_eq!(
            eval("10 / 0"),
            Err(ExprError::DivisionByZero { span: span!(5, 6) })
        );
        assert_eq!(
            eval("1 / -0"),
            Err(ExprError::DivisionByZero { span: span!(4, 6) })
        );
        assert_eq!(kind_of("0 / 0"), ErrorKind::DivisionByZero);
    }

    #[test]
    fn division_by_zero_is_detected_before_later_errors() {
        assert_eq!(kind_of("1 / 0 + a"), ErrorKind::DivisionByZero);
        assert_eq!(kind_of("1 / 0 2"), ErrorKind::DivisionByZero);
    }

    #[test]
    fn zero_dividend_is_fine() {
        assert_eq!(eval("0 / 5"), Ok(0));
        assert_eq!(eval("0 * 5 - 0"), Ok(0));
    }

    #[test]
    fn invalid_characters_fail() {
        assert_eq!(
            eval("3 + a"),
            Err(ExprError::InvalidCharacter { ch: 'a', offset: 4 })
        );
        assert_eq!(
            eval("7 % 2"),
            Err(ExprError::InvalidCharacter { ch: '%', offset: 2 })
        );
        assert_eq!(kind_of("(1 + 2)"), ErrorKind::InvalidCharacter);
        assert_eq!(kind_of("x"), ErrorKind::InvalidCharacter);
    }

    #[test]
    fn incomplete_expressions_fail_with_unexpected_token() {
        assert_eq!(
            eval("3 +"),
            Err(ExprError::UnexpectedToken {
                expected: Expected::Operand,
                found: TokenKind::End,
                span: span!(3, 3),
            })
        );
        assert_eq!(
            eval("* 5"),
            Err(ExprError::UnexpectedToken {
                expected: Expected::Operand,
                found: TokenKind::Star,
                span: span!(0, 1),
            })
        );
        assert_eq!(kind_of(""), ErrorKind::UnexpectedToken);
        assert_eq!(kind_of("   "), ErrorKind::UnexpectedToken);
        assert_eq!(kind_of("4 * / 2"), ErrorKind::UnexpectedToken);
        assert_eq!(kind_of("-"), ErrorKind::UnexpectedToken);
    }

    #[test]
    fn trailing_tokens_fail() {
        assert_eq!(
            eval("3 + 4 5"),
            Err(ExprError::TrailingInput {
                found: TokenKind::Integer(5),
                span: span!(6, 7),
            })
        );
        assert_eq!(kind_of("1 2 3"), ErrorKind::TrailingInput);
    }

    #[test]
    fn first_failure_wins() {
        // The parse stops at the trailing token before reaching '#'.
        assert_eq!(kind_of("1 2 #"), ErrorKind::TrailingInput);
        // The tokenizer fails while the lookahead is refilled after '1'.
        assert_eq!(kind_of("1 # 2"), ErrorKind::InvalidCharacter);
        assert_eq!(kind_of("1 + # / 0"), ErrorKind::InvalidCharacter);
    }

    #[test]
    fn construction_fails_on_bad_first_token() {
        init_logger();
        let err = Parser::try_new(Tokenizer::new("?1")).unwrap_err();
        assert_eq!(err, ExprError::InvalidCharacter { ch: '?', offset: 0 });
    }

    #[test]
    fn construction_fills_lookahead() {
        init_logger();
        let parser = Parser::try_new(Tokenizer::new("  9 + 1")).unwrap();
        assert_eq!(parser.current().kind, TokenKind::Integer(9));
        assert_eq!(parser.current().span, span!(2, 3));
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(eval("9223372036854775807"), Ok(i64::MAX));
        assert_eq!(eval("-9223372036854775807 - 1"), Ok(i64::MIN));
        assert_eq!(
            eval("9223372036854775807 + 1"),
            Err(ExprError::Overflow { span: span!(0, 23) })
        );
        assert_eq!(kind_of("9223372036854775808"), ErrorKind::Overflow);
        assert_eq!(kind_of("4611686018427387904 * 2"), ErrorKind::Overflow);
        assert_eq!(kind_of("-9223372036854775807 - 2"), ErrorKind::Overflow);
        assert_eq!(
            eval("-4611686018427387904 * 2 / -1"),
            Err(ExprError::Overflow { span: span!(0, 29) })
        );
    }

    /// A factor: a run of unary signs followed by a literal.
    #[derive(Debug, Clone)]
    struct Factor {
        signs: String,
        literal: i64,
    }

    impl Factor {
        fn value(&self) -> i64 {
            if self.signs.matches('-').count() % 2 == 0 {
                self.literal
            } else {
                -self.literal
            }
        }
    }

    #[derive(Debug, Clone)]
    struct Term {
        first: Factor,
        rest: Vec<(char, Factor)>,
    }

    #[derive(Debug, Clone)]
    struct Expr {
        first: Term,
        rest: Vec<(char, Term)>,
    }

    impl Term {
        fn render(&self) -> String {
            let mut out = format!("{}{}", self.first.signs, self.first.literal);
            for (op, f) in &self.rest {
                out.push_str(&format!(" {op} {}{}", f.signs, f.literal));
            }
            out
        }

        fn eval(&self) -> i64 {
            self.rest
                .iter()
                .fold(self.first.value(), |acc, (op, f)| match op {
                    '*' => acc * f.value(),
                    _ => acc / f.value(),
                })
        }
    }

    impl Expr {
        fn render(&self) -> String {
            let mut out = self.first.render();
            for (op, t) in &self.rest {
                out.push_str(&format!(" {op} {}", t.render()));
            }
            out
        }

        fn eval(&self) -> i64 {
            self.rest
                .iter()
                .fold(self.first.eval(), |acc, (op, t)| match op {
                    '+' => acc + t.eval(),
                    _ => acc - t.eval(),
                })
        }
    }

    fn arb_factor(min: i64) -> impl Strategy<Value = Factor> {
        ("[+-]{0,3}", min..1000i64).prop_map(|(signs, literal)| Factor { signs, literal })
    }

    fn arb_term() -> impl Strategy<Value = Term> {
        // Right-hand factors start at 1, so no divisor is ever zero.
        (arb_factor(0), vec((any::<bool>(), arb_factor(1)), 0..4)).prop_map(|(first, rest)| {
            Term {
                first,
                rest: rest
                    .into_iter()
                    .map(|(mul, f)| (if mul { '*' } else { '/' }, f))
                    .collect(),
            }
        })
    }

    fn arb_expr() -> impl Strategy<Value = Expr> {
        (arb_term(), vec((any::<bool>(), arb_term()), 0..5)).prop_map(|(first, rest)| Expr {
            first,
            rest: rest
                .into_iter()
                .map(|(add, t)| (if add { '+' } else { '-' }, t))
                .collect(),
        })
    }

    proptest! {
        #[test]
        fn matches_reference_evaluator(expr in arb_expr()) {
            prop_assert_eq!(eval(&expr.render()), Ok(expr.eval()));
        }

        #[test]
        fn signed_literals(signs in "[+-]{0,12}", n in 0i64..1_000_000) {
            let negations = signs.matches('-').count();
            let expected = if negations % 2 == 0 { n } else { -n };
            prop_assert_eq!(eval(&format!("{signs}{n}")), Ok(expected));
        }

        #[test]
        fn whitespace_does_not_change_value(a in 0i64..1000, b in 1i64..1000, ws in "[ \t]{0,3}") {
            let tight = eval(&format!("{a}*-{b}/{b}+{a}"));
            let loose = eval(&format!("{ws}{a}{ws}*{ws}-{ws}{b}{ws}/{ws}{b}{ws}+{ws}{a}{ws}"));
            prop_assert_eq!(tight, loose);
        }
    }
}
