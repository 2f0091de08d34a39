//! Lexer for gotyno using logos.
//!
//! Produces a located `TokenList` and a `Cursor` the resolver consumes it
//! through. Whitespace is significant (indentation is part of the grammar),
//! so spaces and line breaks are tokens rather than skipped trivia.

mod cursor;

pub use cursor::{Cursor, ExpectError};
pub use gotyno_ir::{Location, Token, TokenKind, TokenList};

use logos::Logos;
use tracing::debug;

/// Raw token from logos (before locations are attached).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum RawToken {
    #[token("\n")]
    Newline,
    #[token("\r\n")]
    Crlf,
    #[token(" ")]
    Space,

    #[regex(r"[a-z_][a-zA-Z0-9_]*")]
    Symbol,
    #[regex(r"[A-Z][a-zA-Z0-9_]*")]
    Name,
    #[regex(r#""[^"]*""#)]
    String,
    // Integers that do not fit in a u64 fail the callback and come out as errors.
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u64>().is_ok())]
    UnsignedInteger,

    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("<")]
    LeftAngle,
    #[token(">")]
    RightAngle,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Period,
    #[token("=")]
    Equals,
    #[token("*")]
    Asterisk,
    #[token("?")]
    QuestionMark,
}

/// Lex source code into a `TokenList`.
///
/// Never fails: input the lexer does not recognize becomes a
/// `TokenKind::Error` token and is reported by whoever consumes it. The
/// returned list always ends with a single `Eof` token.
pub fn lex(source: &str) -> TokenList<'_> {
    let mut result = TokenList::with_capacity(source.len() / 2 + 1);
    let mut logos = RawToken::lexer(source);
    let mut position = LineTracker::new();

    while let Some(token_result) = logos.next() {
        let slice = logos.slice();
        let kind = match token_result {
            Ok(raw) => convert_token(raw),
            Err(()) => TokenKind::Error,
        };
        result.push(Token::new(kind, slice, position.location()));
        position.advance(slice);
    }

    result.push(Token::new(TokenKind::Eof, "", position.location()));
    debug!(tokens = result.len(), bytes = source.len(), "lexed buffer");
    result
}

fn convert_token(raw: RawToken) -> TokenKind {
    match raw {
        RawToken::Newline => TokenKind::Newline,
        RawToken::Crlf => TokenKind::Crlf,
        RawToken::Space => TokenKind::Space,
        RawToken::Symbol => TokenKind::Symbol,
        RawToken::Name => TokenKind::Name,
        RawToken::String => TokenKind::String,
        RawToken::UnsignedInteger => TokenKind::UnsignedInteger,
        RawToken::LeftBrace => TokenKind::LeftBrace,
        RawToken::RightBrace => TokenKind::RightBrace,
        RawToken::LeftAngle => TokenKind::LeftAngle,
        RawToken::RightAngle => TokenKind::RightAngle,
        RawToken::LeftBracket => TokenKind::LeftBracket,
        RawToken::RightBracket => TokenKind::RightBracket,
        RawToken::LeftParen => TokenKind::LeftParen,
        RawToken::RightParen => TokenKind::RightParen,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Period => TokenKind::Period,
        RawToken::Equals => TokenKind::Equals,
        RawToken::Asterisk => TokenKind::Asterisk,
        RawToken::QuestionMark => TokenKind::QuestionMark,
    }
}

/// Running line/column position while walking token slices.
///
/// A `\n` starts a new line; every other character, `\r` included, moves
/// one column to the right.
struct LineTracker {
    line: u32,
    column: u32,
}

impl LineTracker {
    fn new() -> Self {
        LineTracker { line: 1, column: 1 }
    }

    fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }

    fn advance(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.line = self.line.saturating_add(1);
                self.column = 1;
            } else {
                self.column = self.column.saturating_add(1);
            }
        }
    }
}
