//! Cooked tokens.

use bitflags::bitflags;
use lyre_ir::{Name, Span};

bitflags! {
    /// Whitespace context preceding a token.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u8 {
        /// Whitespace or a comment preceded this token.
        const SPACE_BEFORE = 1 << 0;
        /// A newline preceded this token.
        const NEWLINE_BEFORE = 1 << 1;
        /// Nothing separates this token from the previous one.
        const ADJACENT = 1 << 2;
    }
}

/// Token kinds after interning.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TokenKind {
    Ident(Name),
    /// Text literal contents, quotes stripped.
    Text(Name),
    Number(f64),

    If,
    Then,
    Else,
    True,
    False,

    Bullet,
    LParen,
    RParen,
    Colon,
    Comma,
    Dot,
    Hash,
    Question,

    Plus,
    Minus,
    Star,
    Slash,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Ampersand,
    Pipe,
    Tilde,

    Eof,
}

impl TokenKind {
    /// How the token reads in "expected X, found Y" messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Ident(_) => "identifier",
            TokenKind::Text(_) => "text",
            TokenKind::Number(_) => "number",
            TokenKind::If => "`if`",
            TokenKind::Then => "`then`",
            TokenKind::Else => "`else`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Bullet => "`•`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::Colon => "`:`",
            TokenKind::Comma => "`,`",
            TokenKind::Dot => "`.`",
            TokenKind::Hash => "`#`",
            TokenKind::Question => "`?`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Equal => "`=`",
            TokenKind::NotEqual => "`≠`",
            TokenKind::Less => "`<`",
            TokenKind::LessEqual => "`≤`",
            TokenKind::Greater => "`>`",
            TokenKind::GreaterEqual => "`≥`",
            TokenKind::Ampersand => "`&`",
            TokenKind::Pipe => "`|`",
            TokenKind::Tilde => "`~`",
            TokenKind::Eof => "end of input",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub flags: TokenFlags,
}

/// Token sequence terminated by [`TokenKind::Eof`].
#[derive(Clone, Debug, PartialEq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(matches!(
            tokens.last().map(|t| t.kind),
            Some(TokenKind::Eof)
        ));
        TokenList { tokens }
    }

    /// Token at `index`, clamped to the trailing `Eof`.
    #[inline]
    pub fn get(&self, index: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[index.min(last)]
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Never true: the list always holds `Eof`.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }
}
