//! Token cursor.

use std::mem::discriminant;

use lyre_ir::{Name, Span};
use lyre_lexer::{Token, TokenFlags, TokenKind, TokenList};

use crate::ParseError;

pub(crate) struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
    previous_end: u32,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(tokens: &'a TokenList) -> Self {
        Cursor {
            tokens,
            pos: 0,
            previous_end: 0,
        }
    }

    #[inline]
    pub(crate) fn current(&self) -> &'a Token {
        self.tokens.get(self.pos)
    }

    #[inline]
    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub(crate) fn current_span(&self) -> Span {
        self.current().span
    }

    #[inline]
    pub(crate) fn current_flags(&self) -> TokenFlags {
        self.current().flags
    }

    /// Kind of the token after the current one.
    #[inline]
    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.tokens.get(self.pos + 1).kind
    }

    /// End offset of the last consumed token.
    #[inline]
    pub(crate) fn previous_end(&self) -> u32 {
        self.previous_end
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Same variant as `kind`, ignoring payloads.
    #[inline]
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        discriminant(&self.current_kind()) == discriminant(kind)
    }

    pub(crate) fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
            self.previous_end = token.span.end;
        }
        token
    }

    /// Consume the current token if it is `kind`.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.display_name()))
        }
    }

    pub(crate) fn expect_ident(&mut self) -> Result<(Name, Span), ParseError> {
        match self.current_kind() {
            TokenKind::Ident(name) => {
                let span = self.advance().span;
                Ok((name, span))
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    #[cold]
    pub(crate) fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            found: self.current_kind().display_name(),
            span: self.current_span(),
        }
    }
}
