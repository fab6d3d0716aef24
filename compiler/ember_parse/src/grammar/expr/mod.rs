//! Expression parsing.
//!
//! Layering, loosest first:
//! - `parse_expression`: comma sequences
//! - `parse_assignment`: arrows, assignment (right-associative)
//! - `parse_conditional`: `test ? a : b`
//! - `operators`: binary and logical operators by precedence climbing
//! - `postfix`: unary prefixes, postfix updates, calls, member access, `new`
//! - `primary`: literals, identifiers, parentheses, function expressions
//!
//! `no_in` threads through the layers so a `for (x in …)` head is not
//! misread as a binary `in`.

mod operators;
mod postfix;
mod primary;

use ember_ir::{ExprId, ExprKind, FunctionBody, FunctionDef, Name, Span, TokenKind};

use crate::stack::ensure_sufficient_stack;
use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    pub(crate) fn parse_expression(&mut self, no_in: bool) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        let first = self.parse_assignment(no_in)?;
        if !self.check(&TokenKind::Comma) {
            return Ok(first);
        }
        let mut exprs = vec![first];
        while self.cursor.eat(&TokenKind::Comma) {
            exprs.push(self.parse_assignment(no_in)?);
        }
        Ok(self.alloc_expr(ExprKind::Sequence(exprs), self.span_from(start)))
    }

    pub(crate) fn parse_assignment(&mut self, no_in: bool) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.parse_assignment_inner(no_in))
    }

    fn parse_assignment_inner(&mut self, no_in: bool) -> Result<ExprId, ParseError> {
        let start = self.current_span();

        if let Some(param) = self.cursor.current_ident() {
            let next = self.cursor.peek(1);
            if matches!(next.kind, TokenKind::Arrow) && !next.newline_before {
                self.advance();
                return self.parse_arrow_body(vec![param], start, no_in);
            }
        }
        if self.cursor.at_arrow_params() {
            let params = self.parse_params()?;
            return self.parse_arrow_body(params, start, no_in);
        }

        let target = self.parse_conditional(no_in)?;
        let Some(op) = operators::assign_op(self.current_kind()) else {
            return Ok(target);
        };
        if !self.is_assignment_target(target) {
            return Err(ParseError::new(
                ParseErrorKind::InvalidAssignmentTarget,
                self.arena.expr_span(target),
            ));
        }
        self.advance();
        let value = self.parse_assignment(no_in)?;
        Ok(self.alloc_expr(
            ExprKind::Assign { op, target, value },
            self.span_from(start),
        ))
    }

    /// `=> body` after an arrow parameter list.
    fn parse_arrow_body(
        &mut self,
        params: Vec<Name>,
        start: Span,
        no_in: bool,
    ) -> Result<ExprId, ParseError> {
        self.expect(&TokenKind::Arrow)?;
        let body = if self.check(&TokenKind::LBrace) {
            FunctionBody::Block(self.parse_block_body()?)
        } else {
            FunctionBody::Expr(self.parse_assignment(no_in)?)
        };
        let span = self.span_from(start);
        let function = self.arena.alloc_function(FunctionDef {
            name: None,
            params,
            body,
            is_arrow: true,
            span,
        });
        Ok(self.alloc_expr(ExprKind::Function(function), span))
    }

    fn parse_conditional(&mut self, no_in: bool) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        let test = self.parse_binary(0, no_in)?;
        if !self.cursor.eat(&TokenKind::Question) {
            return Ok(test);
        }
        let consequent = self.parse_assignment(false)?;
        self.expect(&TokenKind::Colon)?;
        let alternate = self.parse_assignment(no_in)?;
        Ok(self.alloc_expr(
            ExprKind::Conditional {
                test,
                consequent,
                alternate,
            },
            self.span_from(start),
        ))
    }
}
