//! Unary prefixes, postfix updates, calls, member access and `new`.

use ember_ir::{ExprId, ExprKind, MemberProperty, Span, TokenKind, UnaryOp, UpdateOp};

use crate::stack::ensure_sufficient_stack;
use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    pub(super) fn parse_unary(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.parse_unary_inner())
    }

    fn parse_unary_inner(&mut self) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        let op = match self.current_kind() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Tilde => UnaryOp::BitNot,
            TokenKind::Typeof => UnaryOp::Typeof,
            TokenKind::Void => UnaryOp::Void,
            TokenKind::Delete => UnaryOp::Delete,
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                let op = update_op(self.current_kind());
                self.advance();
                let target = self.parse_unary()?;
                self.check_update_target(target)?;
                return Ok(self.alloc_expr(
                    ExprKind::Update {
                        op,
                        prefix: true,
                        target,
                    },
                    self.span_from(start),
                ));
            }
            _ => return self.parse_postfix(),
        };
        self.advance();
        let operand = self.parse_unary()?;
        Ok(self.alloc_expr(ExprKind::Unary { op, operand }, self.span_from(start)))
    }

    fn parse_postfix(&mut self) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        let expr = self.parse_call_member()?;
        if matches!(
            self.current_kind(),
            TokenKind::PlusPlus | TokenKind::MinusMinus
        ) && !self.cursor.newline_before()
        {
            self.check_update_target(expr)?;
            let op = update_op(self.current_kind());
            self.advance();
            return Ok(self.alloc_expr(
                ExprKind::Update {
                    op,
                    prefix: false,
                    target: expr,
                },
                self.span_from(start),
            ));
        }
        Ok(expr)
    }

    fn check_update_target(&self, target: ExprId) -> Result<(), ParseError> {
        if self.is_assignment_target(target) {
            Ok(())
        } else {
            Err(ParseError::new(
                ParseErrorKind::InvalidAssignmentTarget,
                self.arena.expr_span(target),
            ))
        }
    }

    /// Primary followed by any number of `.name`, `[key]` and `(args)`.
    fn parse_call_member(&mut self) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        let mut expr = if self.check(&TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        loop {
            expr = match self.current_kind() {
                TokenKind::Dot | TokenKind::LBracket => self.parse_member_suffix(expr, start)?,
                TokenKind::LParen => {
                    let args = self.parse_arguments()?;
                    self.alloc_expr(
                        ExprKind::Call { callee: expr, args },
                        self.span_from(start),
                    )
                }
                _ => return Ok(expr),
            };
        }
    }

    /// `new Callee(args)`; the argument list is optional.
    fn parse_new(&mut self) -> Result<ExprId, ParseError> {
        let start = self.advance();
        let mut callee = if self.check(&TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        while matches!(self.current_kind(), TokenKind::Dot | TokenKind::LBracket) {
            callee = self.parse_member_suffix(callee, start)?;
        }
        let args = if self.check(&TokenKind::LParen) {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        Ok(self.alloc_expr(ExprKind::New { callee, args }, self.span_from(start)))
    }

    fn parse_member_suffix(&mut self, object: ExprId, start: Span) -> Result<ExprId, ParseError> {
        let property = if self.cursor.eat(&TokenKind::Dot) {
            let Some(name) = self.cursor.current_property_name() else {
                return Err(self.unexpected("property name"));
            };
            self.advance();
            MemberProperty::Named(name)
        } else {
            self.expect(&TokenKind::LBracket)?;
            let key = self.parse_expression(false)?;
            self.expect(&TokenKind::RBracket)?;
            MemberProperty::Computed(key)
        };
        Ok(self.alloc_expr(
            ExprKind::Member { object, property },
            self.span_from(start),
        ))
    }

    /// `( a, b, )`, trailing comma allowed.
    fn parse_arguments(&mut self) -> Result<Vec<ExprId>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();
        while !self.check(&TokenKind::RParen) {
            args.push(self.parse_assignment(false)?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }
}

fn update_op(kind: &TokenKind) -> UpdateOp {
    if matches!(kind, TokenKind::MinusMinus) {
        UpdateOp::Decrement
    } else {
        UpdateOp::Increment
    }
}
