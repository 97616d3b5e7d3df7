//! Primary expressions.

use lyre_ir::{NodeId, NodeKind};
use lyre_lexer::TokenKind;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `primary := NUMBER | TEXT | BOOLEAN | IDENT | block`
    pub(crate) fn parse_primary(&mut self) -> Result<NodeId, ParseError> {
        let kind = match self.cursor.current_kind() {
            TokenKind::Number(value) => NodeKind::number(value),
            TokenKind::Text(name) => NodeKind::Text(name),
            TokenKind::True => NodeKind::Boolean(true),
            TokenKind::False => NodeKind::Boolean(false),
            TokenKind::Ident(name) => NodeKind::Reference(name),
            TokenKind::LParen => return self.parse_block(),
            _ => return Err(self.cursor.unexpected("expression")),
        };
        let span = self.cursor.advance().span;
        Ok(self.alloc(kind, span))
    }
}
