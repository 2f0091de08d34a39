//! Token cursor for navigating the token stream.
//!
//! The cursor owns the `TokenList` and hands tokens out by value; tokens
//! are `Copy` and borrow their text from the source buffer, not from the
//! list.

use std::fmt;

use gotyno_ir::{Location, Token, TokenKind, TokenList};
use thiserror::Error;
use tracing::trace;

/// The current token did not have any of the expected kinds.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
#[error("expected {}, found {actual}", ExpectedKinds(.expected))]
pub struct ExpectError {
    pub expected: Vec<TokenKind>,
    pub actual: TokenKind,
    /// Source text of the offending token.
    pub text: String,
    pub location: Location,
}

impl ExpectError {
    /// Width of the offending token in characters, at least 1.
    pub fn width(&self) -> u32 {
        let chars = self.text.chars().filter(|c| *c != '\r' && *c != '\n').count();
        u32::try_from(chars).unwrap_or(u32::MAX).max(1)
    }
}

/// Formats `a`, `a or b`, `a, b or c`.
struct ExpectedKinds<'a>(&'a [TokenKind]);

impl fmt::Display for ExpectedKinds<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.0.len().saturating_sub(1);
        for (i, kind) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(if i == last { " or " } else { ", " })?;
            }
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}

/// Cursor over a lexed buffer.
///
/// Invariant: the token list is non-empty and ends with `Eof`, and the
/// position never moves past that `Eof`.
pub struct Cursor<'src> {
    tokens: TokenList<'src>,
    pos: usize,
}

impl<'src> Cursor<'src> {
    /// Create a cursor at the start of `tokens`.
    ///
    /// A list that does not end in `Eof` gets one appended.
    pub fn new(mut tokens: TokenList<'src>) -> Self {
        let needs_eof = tokens
            .as_slice()
            .last()
            .map_or(true, |token| token.kind != TokenKind::Eof);
        if needs_eof {
            let location = tokens
                .as_slice()
                .last()
                .map_or(Location::START, |token| token.location);
            tokens.push(Token::new(TokenKind::Eof, "", location));
        }
        Cursor { tokens, pos: 0 }
    }

    /// Lex `source` and put a cursor at its start.
    pub fn from_source(source: &'src str) -> Self {
        Cursor::new(crate::lex(source))
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The current token.
    #[inline]
    pub fn peek(&self) -> Token<'src> {
        self.tokens[self.pos]
    }

    /// The token `n` places ahead of the current one; `peek_nth(0)` is
    /// `peek()`. Clamps to `Eof`.
    #[inline]
    pub fn peek_nth(&self, n: usize) -> Token<'src> {
        let last = self.tokens.len() - 1;
        self.tokens[self.pos.saturating_add(n).min(last)]
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Consume and return the current token. Stays put on `Eof`.
    pub fn next_token(&mut self) -> Token<'src> {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        trace!(
            pos = self.pos,
            kind = %token.kind,
            location = %token.location,
            "advance"
        );
        token
    }

    /// Consume the current token if it has the given kind.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token<'src>, ExpectError> {
        if self.check(kind) {
            Ok(self.next_token())
        } else {
            Err(self.make_expect_error(&[kind]))
        }
    }

    /// Consume the current token if it has any of the given kinds.
    pub fn expect_one_of(&mut self, kinds: &[TokenKind]) -> Result<Token<'src>, ExpectError> {
        if kinds.contains(&self.peek().kind) {
            Ok(self.next_token())
        } else {
            Err(self.make_expect_error(kinds))
        }
    }

    /// Consume exactly `count` tokens of `kind`.
    ///
    /// Fails at the first token that is not `kind`; tokens matched before
    /// the failure stay consumed.
    pub fn skip_many(&mut self, kind: TokenKind, count: usize) -> Result<(), ExpectError> {
        for _ in 0..count {
            self.expect(kind)?;
        }
        Ok(())
    }

    /// Consume any run of `kind`, returning how many tokens were skipped.
    pub fn skip_while(&mut self, kind: TokenKind) -> usize {
        let mut skipped = 0;
        while self.check(kind) && kind != TokenKind::Eof {
            self.next_token();
            skipped += 1;
        }
        skipped
    }

    /// Build the error for a failed `expect*` call.
    #[cold]
    #[inline(never)]
    pub fn make_expect_error(&self, expected: &[TokenKind]) -> ExpectError {
        let actual = self.peek();
        trace!(
            expected = ?expected,
            actual = %actual.kind,
            location = %actual.location,
            "expect failed"
        );
        ExpectError {
            expected: expected.to_vec(),
            actual: actual.kind,
            text: actual.text.to_string(),
            location: actual.location,
        }
    }
}
