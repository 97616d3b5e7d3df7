//! Postfix expressions: property access and evaluation.

use lyre_ir::{NodeId, NodeKind, Span};
use lyre_lexer::{TokenFlags, TokenKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `postfix := primary ('.' IDENT | '(' args ')')*`
    ///
    /// An argument list only continues the expression when its `(` touches
    /// the preceding token: `Cat("boomy")` evaluates, `Cat ("boomy")` is a
    /// reference followed by a block.
    pub(crate) fn parse_postfix(&mut self) -> Result<NodeId, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.cursor.check(&TokenKind::Dot) {
                self.cursor.advance();
                let (name, name_span) = self.cursor.expect_ident()?;
                let member = self.alloc(NodeKind::MemberName(name), name_span);
                let span = self.arena.get(expr).span.merge(name_span);
                expr = self.alloc(
                    NodeKind::PropertyReference {
                        subject: expr,
                        name: member,
                    },
                    span,
                );
            } else if self.cursor.check(&TokenKind::LParen)
                && self.cursor.current_flags().contains(TokenFlags::ADJACENT)
            {
                expr = self.parse_evaluate(expr)?;
            } else {
                return Ok(expr);
            }
        }
    }

    /// `args := (expr ','?)*` between parentheses.
    fn parse_evaluate(&mut self, callee: NodeId) -> Result<NodeId, ParseError> {
        self.cursor.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();
        while !self.cursor.check(&TokenKind::RParen) {
            args.push(self.parse_expr()?);
            self.cursor.eat(&TokenKind::Comma);
        }
        let end = self.cursor.expect(&TokenKind::RParen)?.span;
        let args = self.arena.alloc_list(args);
        let start = self.arena.get(callee).span;
        Ok(self.alloc(
            NodeKind::Evaluate { callee, args },
            Span::new(start.start, end.end),
        ))
    }
}
