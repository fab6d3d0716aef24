//! Primary expressions: literals, identifiers, groups, array and object
//! literals, function expressions.

use ember_ir::{ExprId, ExprKind, Property, PropertyKey, TokenKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(super) fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        let kind = match self.current_kind() {
            TokenKind::Number(value) => ExprKind::Number(*value),
            TokenKind::String(text) => ExprKind::String(text.clone()),
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Null => ExprKind::Null,
            TokenKind::This => ExprKind::This,
            TokenKind::Ident(name) => ExprKind::Ident(*name),
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression(false)?;
                self.expect(&TokenKind::RParen)?;
                return Ok(inner);
            }
            TokenKind::LBracket => return self.parse_array_literal(),
            TokenKind::LBrace => return self.parse_object_literal(),
            TokenKind::Function => {
                self.advance();
                let name = self.cursor.current_ident();
                if name.is_some() {
                    self.advance();
                }
                let function = self.parse_function_rest(name, start)?;
                return Ok(self.alloc_expr(ExprKind::Function(function), self.span_from(start)));
            }
            _ => return Err(self.unexpected("expression")),
        };
        self.advance();
        Ok(self.alloc_expr(kind, start))
    }

    fn parse_array_literal(&mut self) -> Result<ExprId, ParseError> {
        let start = self.advance();
        let mut elements = Vec::new();
        while !self.check(&TokenKind::RBracket) {
            elements.push(self.parse_assignment(false)?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBracket)?;
        Ok(self.alloc_expr(ExprKind::Array(elements), self.span_from(start)))
    }

    /// `{ a: 1, "b": 2, 3: x, [k]: v, short, method() {} }`
    fn parse_object_literal(&mut self) -> Result<ExprId, ParseError> {
        let start = self.advance();
        let mut properties = Vec::new();

        while !self.check(&TokenKind::RBrace) {
            let prop_start = self.current_span();
            let mut shorthand = None;
            let key = match self.current_kind() {
                TokenKind::String(text) => {
                    self.advance();
                    PropertyKey::String(text.clone())
                }
                TokenKind::Number(value) => {
                    self.advance();
                    PropertyKey::Number(*value)
                }
                TokenKind::LBracket => {
                    self.advance();
                    let key = self.parse_assignment(false)?;
                    self.expect(&TokenKind::RBracket)?;
                    PropertyKey::Computed(key)
                }
                _ => {
                    let Some(name) = self.cursor.current_property_name() else {
                        return Err(self.unexpected("property name"));
                    };
                    shorthand = self.cursor.current_ident();
                    self.advance();
                    PropertyKey::Named(name)
                }
            };

            let value = if self.cursor.eat(&TokenKind::Colon) {
                self.parse_assignment(false)?
            } else if self.check(&TokenKind::LParen) {
                let name = match key {
                    PropertyKey::Named(name) => Some(name),
                    _ => None,
                };
                let function = self.parse_function_rest(name, prop_start)?;
                self.alloc_expr(ExprKind::Function(function), self.span_from(prop_start))
            } else if let Some(name) = shorthand {
                self.alloc_expr(ExprKind::Ident(name), prop_start)
            } else {
                return Err(self.unexpected("':'"));
            };

            properties.push(Property {
                key,
                value,
                span: self.span_from(prop_start),
            });
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(self.alloc_expr(ExprKind::Object(properties), self.span_from(start)))
    }
}
