//! Tokens produced by the lexer.
//!
//! A `Token` borrows its text from the source buffer, so token lists are
//! cheap to build and copy. Token kinds carry no payload: the parser reads
//! identifiers, literals and integers back out of `Token::text`.

use std::fmt;
use std::ops::Index;

use crate::Location;

/// Token kinds for gotyno.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// Lowercase- or underscore-leading identifier: `struct`, `recruiter`, `m1`
    Symbol,
    /// Uppercase-leading identifier, used for definition and type names: `Person`
    Name,
    /// String literal including its quotes: `"movie"`
    String,
    /// Decimal integer that fits in `u64`: `42`
    UnsignedInteger,

    LeftBrace,
    RightBrace,
    LeftAngle,
    RightAngle,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    Colon,
    Comma,
    Period,
    Equals,
    Asterisk,
    QuestionMark,

    /// `\n`
    Newline,
    /// `\r\n`
    Crlf,
    /// A single space character. Indentation is significant, so spaces
    /// are never skipped by the lexer.
    Space,

    /// Input the lexer could not recognize.
    Error,
    /// End of input. Always the last token of a `TokenList`.
    Eof,
}

impl TokenKind {
    /// Human-readable name used in error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Symbol => "symbol",
            TokenKind::Name => "name",
            TokenKind::String => "string literal",
            TokenKind::UnsignedInteger => "unsigned integer",
            TokenKind::LeftBrace => "`{`",
            TokenKind::RightBrace => "`}`",
            TokenKind::LeftAngle => "`<`",
            TokenKind::RightAngle => "`>`",
            TokenKind::LeftBracket => "`[`",
            TokenKind::RightBracket => "`]`",
            TokenKind::LeftParen => "`(`",
            TokenKind::RightParen => "`)`",
            TokenKind::Colon => "`:`",
            TokenKind::Comma => "`,`",
            TokenKind::Period => "`.`",
            TokenKind::Equals => "`=`",
            TokenKind::Asterisk => "`*`",
            TokenKind::QuestionMark => "`?`",
            TokenKind::Newline => "newline",
            TokenKind::Crlf => "CRLF newline",
            TokenKind::Space => "space",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of input",
        }
    }

    /// True for `Newline` and `Crlf`.
    #[inline]
    pub fn is_line_break(self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Crlf)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A located token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// The exact source text of the token (empty for `Eof`).
    pub text: &'src str,
    /// Location of the token's first character.
    pub location: Location,
}

impl<'src> Token<'src> {
    #[inline]
    pub fn new(kind: TokenKind, text: &'src str, location: Location) -> Self {
        Token {
            kind,
            text,
            location,
        }
    }

    /// Width of the token in characters, at least 1 so that carets for
    /// `Eof` and line breaks stay visible.
    pub fn width(&self) -> u32 {
        let chars = self.text.chars().filter(|c| *c != '\r' && *c != '\n').count();
        u32::try_from(chars).unwrap_or(u32::MAX).max(1)
    }
}

/// The lexer's output: every token of a buffer, terminated by `Eof`.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct TokenList<'src> {
    tokens: Vec<Token<'src>>,
}

impl<'src> TokenList<'src> {
    #[inline]
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, token: Token<'src>) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token<'src>> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token<'src>> {
        self.tokens.iter()
    }

    /// The token kinds in order. Mostly useful in tests.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }

    pub fn as_slice(&self) -> &[Token<'src>] {
        &self.tokens
    }
}

impl<'src> Index<usize> for TokenList<'src> {
    type Output = Token<'src>;

    #[inline]
    fn index(&self, index: usize) -> &Token<'src> {
        &self.tokens[index]
    }
}

impl<'a, 'src> IntoIterator for &'a TokenList<'src> {
    type Item = &'a Token<'src>;
    type IntoIter = std::slice::Iter<'a, Token<'src>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
