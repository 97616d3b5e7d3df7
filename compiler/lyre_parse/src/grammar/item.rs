//! Programs, blocks, and the statements that introduce names.

use lyre_ir::{Bind, NodeId, NodeKind, Span, StructureDefinition};
use lyre_lexer::{TokenFlags, TokenKind};
use lyre_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

/// Whether a bind may omit its `: value`.
#[derive(Copy, Clone, PartialEq, Eq)]
enum BindValue {
    Required,
    Optional,
}

impl Parser<'_> {
    /// `program := statement* EOF`, wrapped in a root block.
    pub(crate) fn parse_program(&mut self) -> Result<NodeId, ParseError> {
        let statements = self.parse_statements_until(&TokenKind::Eof)?;
        let end = self.cursor.current_span().end;
        let statements = self.arena.alloc_list(statements);
        Ok(self.alloc(NodeKind::Block { statements }, Span::new(0, end)))
    }

    /// `block := '(' statement* ')'`
    pub(crate) fn parse_block(&mut self) -> Result<NodeId, ParseError> {
        ensure_sufficient_stack(|| {
            let start = self.cursor.expect(&TokenKind::LParen)?.span;
            let statements = self.parse_statements_until(&TokenKind::RParen)?;
            let end = self.cursor.expect(&TokenKind::RParen)?.span;
            let statements = self.arena.alloc_list(statements);
            Ok(self.alloc(NodeKind::Block { statements }, start.merge(end)))
        })
    }

    fn parse_statements_until(&mut self, close: &TokenKind) -> Result<Vec<NodeId>, ParseError> {
        let mut statements = Vec::new();
        while !self.cursor.check(close) && !self.cursor.is_at_end() {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    /// `statement := structure | bind | expr`
    fn parse_statement(&mut self) -> Result<NodeId, ParseError> {
        match (self.cursor.current_kind(), self.cursor.peek_kind()) {
            (TokenKind::Bullet, _) => self.parse_structure(),
            (TokenKind::Ident(_), TokenKind::Colon | TokenKind::Bullet) => {
                self.parse_bind(BindValue::Required)
            }
            _ => self.parse_expr(),
        }
    }

    /// `bind := IDENT ('•' type)? (':' expr)?`
    fn parse_bind(&mut self, value: BindValue) -> Result<NodeId, ParseError> {
        let (name, start) = self.cursor.expect_ident()?;
        let ty = if self.cursor.eat(&TokenKind::Bullet) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let value = if self.cursor.eat(&TokenKind::Colon) {
            Some(self.parse_expr()?)
        } else if value == BindValue::Required {
            return Err(ParseError::UnvaluedBind {
                name: self.interner.lookup(name).to_owned(),
                span: start,
            });
        } else {
            None
        };
        let span = Span::new(start.start, self.cursor.previous_end());
        Ok(self.alloc(NodeKind::Bind(Bind { name, ty, value }), span))
    }

    /// `structure := '•' IDENT '(' (input ','?)* ')' block?`
    ///
    /// The body block must open on the line where the inputs close; a `(` on
    /// the next line starts a new statement.
    fn parse_structure(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.expect(&TokenKind::Bullet)?.span;
        let (name, _) = self.cursor.expect_ident()?;
        self.cursor.expect(&TokenKind::LParen)?;

        let mut inputs = Vec::new();
        while !self.cursor.check(&TokenKind::RParen) {
            inputs.push(self.parse_bind(BindValue::Optional)?);
            self.cursor.eat(&TokenKind::Comma);
        }
        self.cursor.expect(&TokenKind::RParen)?;
        let inputs = self.arena.alloc_list(inputs);

        let body = if self.cursor.check(&TokenKind::LParen)
            && !self.cursor.current_flags().contains(TokenFlags::NEWLINE_BEFORE)
        {
            Some(self.parse_block()?)
        } else {
            None
        };

        let span = Span::new(start.start, self.cursor.previous_end());
        Ok(self.alloc(
            NodeKind::Structure(StructureDefinition { name, inputs, body }),
            span,
        ))
    }
}
