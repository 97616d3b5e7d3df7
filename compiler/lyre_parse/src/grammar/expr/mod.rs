//! Expression parsing.
//!
//! - `mod.rs`: entry point (`parse_expr`), conditionals, binary precedence chain
//! - `operators.rs`: operator matching helpers
//! - `postfix.rs`: property access and evaluation
//! - `primary.rs`: literals, references, parenthesized blocks
//!
//! Precedence, loosest first: `if`, `|`, `&`, `= ≠`, `< ≤ > ≥`, `+ -`,
//! `* /`, prefix `- ~`, postfix `.name` and `(args)`.

mod operators;
mod postfix;
mod primary;

use lyre_ir::{BinaryOp, NodeId, NodeKind};
use lyre_lexer::TokenKind;
use lyre_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse an expression.
    pub(crate) fn parse_expr(&mut self) -> Result<NodeId, ParseError> {
        ensure_sufficient_stack(|| {
            if self.cursor.check(&TokenKind::If) {
                self.parse_conditional()
            } else {
                self.parse_binary_or()
            }
        })
    }

    /// `if expr then expr else expr`
    fn parse_conditional(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.expect(&TokenKind::If)?.span;
        let condition = self.parse_expr()?;
        self.cursor.expect(&TokenKind::Then)?;
        let yes = self.parse_expr()?;
        self.cursor.expect(&TokenKind::Else)?;
        let no = self.parse_expr()?;
        let span = start.merge(self.arena.get(no).span);
        Ok(self.alloc(NodeKind::Conditional { condition, yes, no }, span))
    }

    fn parse_binary_or(&mut self) -> Result<NodeId, ParseError> {
        self.parse_binary_level(Self::parse_binary_and, |p| {
            p.cursor.check(&TokenKind::Pipe).then_some(BinaryOp::Or)
        })
    }

    fn parse_binary_and(&mut self) -> Result<NodeId, ParseError> {
        self.parse_binary_level(Self::parse_equality, |p| {
            p.cursor.check(&TokenKind::Ampersand).then_some(BinaryOp::And)
        })
    }

    fn parse_equality(&mut self) -> Result<NodeId, ParseError> {
        self.parse_binary_level(Self::parse_comparison, Self::match_equality_op)
    }

    fn parse_comparison(&mut self) -> Result<NodeId, ParseError> {
        self.parse_binary_level(Self::parse_additive, Self::match_comparison_op)
    }

    fn parse_additive(&mut self) -> Result<NodeId, ParseError> {
        self.parse_binary_level(Self::parse_term, Self::match_additive_op)
    }

    fn parse_term(&mut self) -> Result<NodeId, ParseError> {
        self.parse_binary_level(Self::parse_unary, Self::match_multiplicative_op)
    }

    /// One left-associative precedence level.
    fn parse_binary_level(
        &mut self,
        mut operand: impl FnMut(&mut Self) -> Result<NodeId, ParseError>,
        match_op: impl Fn(&Self) -> Option<BinaryOp>,
    ) -> Result<NodeId, ParseError> {
        let mut left = operand(self)?;
        while let Some(op) = match_op(self) {
            self.cursor.advance();
            let right = operand(self)?;
            let span = self.arena.get(left).span.merge(self.arena.get(right).span);
            left = self.alloc(NodeKind::Binary { op, left, right }, span);
        }
        Ok(left)
    }

    /// `unary := ('-' | '~') unary | postfix`
    fn parse_unary(&mut self) -> Result<NodeId, ParseError> {
        ensure_sufficient_stack(|| {
            let Some(op) = self.match_unary_op() else {
                return self.parse_postfix();
            };
            let start = self.cursor.advance().span;
            let operand = self.parse_unary()?;
            let span = start.merge(self.arena.get(operand).span);
            Ok(self.alloc(NodeKind::Unary { op, operand }, span))
        })
    }
}
