//! Binary operator parsing by precedence climbing.

use ember_ir::{AssignOp, BinaryOp, ExprId, ExprKind, LogicalOp, TokenKind};

use crate::{ParseError, Parser};

/// Infix operator recognised in binary position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum InfixOp {
    Binary(BinaryOp),
    Logical(LogicalOp),
}

impl InfixOp {
    fn precedence(self) -> u8 {
        match self {
            InfixOp::Binary(op) => op.precedence(),
            InfixOp::Logical(op) => op.precedence(),
        }
    }
}

fn infix_op(kind: &TokenKind, no_in: bool) -> Option<InfixOp> {
    let op = match kind {
        TokenKind::PipePipe => return Some(InfixOp::Logical(LogicalOp::Or)),
        TokenKind::AmpAmp => return Some(InfixOp::Logical(LogicalOp::And)),
        TokenKind::Pipe => BinaryOp::BitOr,
        TokenKind::Caret => BinaryOp::BitXor,
        TokenKind::Amp => BinaryOp::BitAnd,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::NotEq => BinaryOp::NotEq,
        TokenKind::EqEqEq => BinaryOp::StrictEq,
        TokenKind::NotEqEq => BinaryOp::StrictNotEq,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::LtEq => BinaryOp::LtEq,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::GtEq => BinaryOp::GtEq,
        TokenKind::Instanceof => BinaryOp::Instanceof,
        TokenKind::In if !no_in => BinaryOp::In,
        TokenKind::Shl => BinaryOp::Shl,
        TokenKind::Shr => BinaryOp::Shr,
        TokenKind::UShr => BinaryOp::UShr,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        _ => return None,
    };
    Some(InfixOp::Binary(op))
}

/// Assignment operator for the current token, if any.
pub(super) fn assign_op(kind: &TokenKind) -> Option<AssignOp> {
    let op = match kind {
        TokenKind::Eq => return Some(AssignOp::Assign),
        TokenKind::PlusEq => BinaryOp::Add,
        TokenKind::MinusEq => BinaryOp::Sub,
        TokenKind::StarEq => BinaryOp::Mul,
        TokenKind::SlashEq => BinaryOp::Div,
        TokenKind::PercentEq => BinaryOp::Mod,
        TokenKind::ShlEq => BinaryOp::Shl,
        TokenKind::ShrEq => BinaryOp::Shr,
        TokenKind::UShrEq => BinaryOp::UShr,
        TokenKind::AmpEq => BinaryOp::BitAnd,
        TokenKind::PipeEq => BinaryOp::BitOr,
        TokenKind::CaretEq => BinaryOp::BitXor,
        _ => return None,
    };
    Some(AssignOp::Compound(op))
}

impl Parser<'_> {
    /// Parse operators binding at least as tightly as `min_prec`. All
    /// binary operators are left-associative.
    pub(super) fn parse_binary(&mut self, min_prec: u8, no_in: bool) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        let mut left = self.parse_unary()?;

        while let Some(op) = infix_op(self.current_kind(), no_in) {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.advance();
            let right = self.parse_binary(prec + 1, no_in)?;
            let kind = match op {
                InfixOp::Binary(op) => ExprKind::Binary { op, left, right },
                InfixOp::Logical(op) => ExprKind::Logical { op, left, right },
            };
            left = self.alloc_expr(kind, self.span_from(start));
        }
        Ok(left)
    }
}
