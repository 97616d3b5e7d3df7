//! Lexer for Lyre using logos.
//!
//! Whitespace and `//` comments are skipped by logos; the layout they carried
//! survives as [`TokenFlags`] on the following token, computed from the gap
//! between consecutive tokens. The parser relies on two of them:
//!
//! - `ADJACENT`: a `(` touching its callee is a call, `f(x)` vs `f (x)`.
//! - `NEWLINE_BEFORE`: a structure body block must start on the line where
//!   its inputs close.

mod token;

use logos::Logos;
use lyre_ir::{Span, StringInterner};

pub use token::{Token, TokenFlags, TokenKind, TokenList};

/// Error produced while tokenizing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("unexpected character `{found}` at {span}")]
    UnexpectedCharacter { found: char, span: Span },
    #[error("text literal starting at {span} is never closed")]
    UnterminatedText { span: Span },
    #[error("source is larger than 4 GiB")]
    SourceTooLarge,
}

/// Raw token from logos (before interning).
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
enum RawToken {
    // Keywords
    #[token("if")]
    If,
    #[token("then")]
    Then,
    #[token("else")]
    Else,
    #[token("true")]
    #[token("⊤")]
    True,
    #[token("false")]
    #[token("⊥")]
    False,

    // Literals
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    #[regex(r#""[^"]*""#)]
    #[regex(r"'[^']*'")]
    Text,
    #[regex(r#""[^"]*"#)]
    #[regex(r"'[^']*")]
    UnterminatedText,

    // Punctuation
    #[token("•")]
    Bullet,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("#")]
    Hash,
    #[token("?")]
    Question,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("=")]
    Equal,
    #[token("≠")]
    #[token("!=")]
    NotEqual,
    #[token("<")]
    Less,
    #[token("≤")]
    #[token("<=")]
    LessEqual,
    #[token(">")]
    Greater,
    #[token("≥")]
    #[token(">=")]
    GreaterEqual,
    #[token("&")]
    Ampersand,
    #[token("|")]
    Pipe,
    #[token("~")]
    Tilde,
}

/// Tokenize `text`, interning identifiers and text literals.
///
/// The returned list always ends with [`TokenKind::Eof`].
pub fn lex(text: &str, interner: &StringInterner) -> Result<TokenList, LexError> {
    if u32::try_from(text.len()).is_err() {
        return Err(LexError::SourceTooLarge);
    }

    let mut tokens = Vec::new();
    let mut previous_end = 0usize;
    let mut lexer = RawToken::lexer(text);

    while let Some(raw) = lexer.next() {
        let range = lexer.span();
        let span = span_of(range.clone());
        let slice = lexer.slice();
        let flags = flags_for(&text[previous_end..range.start], !tokens.is_empty());
        previous_end = range.end;

        let Ok(raw) = raw else {
            let found = slice.chars().next().unwrap_or('\u{FFFD}');
            return Err(LexError::UnexpectedCharacter { found, span });
        };

        let kind = match raw {
            RawToken::If => TokenKind::If,
            RawToken::Then => TokenKind::Then,
            RawToken::Else => TokenKind::Else,
            RawToken::True => TokenKind::True,
            RawToken::False => TokenKind::False,
            RawToken::Ident => TokenKind::Ident(interner.intern(slice)),
            // The regex only admits digits with an optional fraction.
            RawToken::Number => TokenKind::Number(slice.parse::<f64>().unwrap_or(f64::NAN)),
            RawToken::Text => {
                // Both delimiters are one byte wide.
                let contents = &slice[1..slice.len() - 1];
                TokenKind::Text(interner.intern(contents))
            }
            RawToken::UnterminatedText => return Err(LexError::UnterminatedText { span }),
            RawToken::Bullet => TokenKind::Bullet,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Hash => TokenKind::Hash,
            RawToken::Question => TokenKind::Question,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Equal => TokenKind::Equal,
            RawToken::NotEqual => TokenKind::NotEqual,
            RawToken::Less => TokenKind::Less,
            RawToken::LessEqual => TokenKind::LessEqual,
            RawToken::Greater => TokenKind::Greater,
            RawToken::GreaterEqual => TokenKind::GreaterEqual,
            RawToken::Ampersand => TokenKind::Ampersand,
            RawToken::Pipe => TokenKind::Pipe,
            RawToken::Tilde => TokenKind::Tilde,
        };
        tokens.push(Token { kind, span, flags });
    }

    let eof_flags = flags_for(&text[previous_end..], !tokens.is_empty());
    tokens.push(Token {
        kind: TokenKind::Eof,
        span: span_of(text.len()..text.len()),
        flags: eof_flags,
    });
    Ok(TokenList::new(tokens))
}

/// Layout flags from the skipped text between two tokens.
fn flags_for(gap: &str, has_previous: bool) -> TokenFlags {
    let mut flags = TokenFlags::empty();
    if gap.contains('\n') {
        flags |= TokenFlags::NEWLINE_BEFORE;
    }
    if !gap.is_empty() {
        flags |= TokenFlags::SPACE_BEFORE;
    } else if has_previous {
        flags |= TokenFlags::ADJACENT;
    }
    flags
}

/// Length was checked against `u32::MAX` on entry.
fn span_of(range: std::ops::Range<usize>) -> Span {
    Span::try_from_range(range).unwrap_or(Span::DUMMY)
}
