//! Type annotations.

use lyre_ir::{Name, TypeAnnotation};
use lyre_lexer::TokenKind;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `type := '""' | '#' | '?' | IDENT`, the `•` already consumed.
    pub(crate) fn parse_type(&mut self) -> Result<TypeAnnotation, ParseError> {
        let ty = match self.cursor.current_kind() {
            TokenKind::Text(name) if name == Name::EMPTY => TypeAnnotation::Text,
            TokenKind::Hash => TypeAnnotation::Number,
            TokenKind::Question => TypeAnnotation::Boolean,
            TokenKind::Ident(name) => TypeAnnotation::Named(name),
            _ => return Err(self.cursor.unexpected("type")),
        };
        self.cursor.advance();
        Ok(ty)
    }
}
