//! Statement parsing.

use ember_ir::{
    CatchClause, Declarator, ExprKind, ForInit, FunctionBody, FunctionDef, FunctionId, Name, Span,
    StmtId, StmtKind, SwitchCase, TokenKind, VarKind,
};

use crate::recovery::synchronize;
use crate::stack::ensure_sufficient_stack;
use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// Parse statements until `is_end` matches the current token (or input
    /// ends). Broken statements are recorded and skipped.
    pub(crate) fn parse_statement_list(&mut self, is_end: fn(&TokenKind) -> bool) -> Vec<StmtId> {
        let mut body = Vec::new();
        while !is_end(self.current_kind()) && !self.cursor.is_at_end() {
            let start = self.cursor.position();
            match self.parse_statement() {
                Ok(stmt) => body.push(stmt),
                Err(err) => {
                    self.errors.push(err);
                    synchronize(&mut self.cursor, start);
                }
            }
        }
        body
    }

    pub(crate) fn parse_statement(&mut self) -> Result<StmtId, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        match self.current_kind() {
            TokenKind::LBrace => {
                let body = self.parse_block_body()?;
                Ok(self.alloc_stmt(StmtKind::Block(body), self.span_from(start)))
            }
            TokenKind::Var | TokenKind::Let | TokenKind::Const => {
                let (kind, declarators) = self.parse_var_declarators(false)?;
                check_const_initializers(kind, &declarators)?;
                self.consume_semicolon()?;
                Ok(self.alloc_stmt(
                    StmtKind::VarDecl { kind, declarators },
                    self.span_from(start),
                ))
            }
            TokenKind::Function => {
                self.advance();
                let name = self.expect_ident()?;
                let function = self.parse_function_rest(Some(name), start)?;
                Ok(self.alloc_stmt(StmtKind::FunctionDecl(function), self.span_from(start)))
            }
            TokenKind::If => self.parse_if(start),
            TokenKind::While => {
                self.advance();
                let test = self.parse_paren_expression()?;
                let body = self.parse_statement()?;
                Ok(self.alloc_stmt(StmtKind::While { test, body }, self.span_from(start)))
            }
            TokenKind::Do => {
                self.advance();
                let body = self.parse_statement()?;
                self.expect(&TokenKind::While)?;
                let test = self.parse_paren_expression()?;
                // A semicolon is always insertable after `do … while (…)`.
                self.cursor.eat(&TokenKind::Semicolon);
                Ok(self.alloc_stmt(StmtKind::DoWhile { body, test }, self.span_from(start)))
            }
            TokenKind::For => self.parse_for(start),
            TokenKind::Break | TokenKind::Continue => {
                let is_break = matches!(self.current_kind(), TokenKind::Break);
                self.advance();
                let label = if self.cursor.newline_before() {
                    None
                } else {
                    self.cursor.current_ident()
                };
                if label.is_some() {
                    self.advance();
                }
                self.consume_semicolon()?;
                let kind = if is_break {
                    StmtKind::Break(label)
                } else {
                    StmtKind::Continue(label)
                };
                Ok(self.alloc_stmt(kind, self.span_from(start)))
            }
            TokenKind::Return => {
                self.advance();
                let argument = if self.at_statement_end() {
                    None
                } else {
                    Some(self.parse_expression(false)?)
                };
                self.consume_semicolon()?;
                Ok(self.alloc_stmt(StmtKind::Return(argument), self.span_from(start)))
            }
            TokenKind::Throw => {
                self.advance();
                if self.cursor.newline_before() {
                    return Err(ParseError::new(
                        ParseErrorKind::NewlineAfterThrow,
                        self.current_span(),
                    ));
                }
                let argument = self.parse_expression(false)?;
                self.consume_semicolon()?;
                Ok(self.alloc_stmt(StmtKind::Throw(argument), self.span_from(start)))
            }
            TokenKind::Try => self.parse_try(start),
            TokenKind::Switch => self.parse_switch(start),
            TokenKind::Semicolon => {
                self.advance();
                Ok(self.alloc_stmt(StmtKind::Empty, start))
            }
            TokenKind::Debugger => {
                self.advance();
                self.consume_semicolon()?;
                Ok(self.alloc_stmt(StmtKind::Debugger, self.span_from(start)))
            }
            TokenKind::Ident(label) if matches!(self.cursor.peek_next_kind(), TokenKind::Colon) => {
                let label = *label;
                self.advance();
                self.advance();
                let body = self.parse_statement()?;
                Ok(self.alloc_stmt(StmtKind::Labeled { label, body }, self.span_from(start)))
            }
            _ => {
                let expr = self.parse_expression(false)?;
                self.consume_semicolon()?;
                Ok(self.alloc_stmt(StmtKind::Expr(expr), self.span_from(start)))
            }
        }
    }

    /// `{ statements }`
    pub(crate) fn parse_block_body(&mut self) -> Result<Vec<StmtId>, ParseError> {
        self.expect(&TokenKind::LBrace)?;
        let body = self.parse_statement_list(|kind| matches!(kind, TokenKind::RBrace));
        self.expect(&TokenKind::RBrace)?;
        Ok(body)
    }

    /// Parameter list and block body of a `function` literal; `start` is
    /// the span of the `function` keyword (or method key).
    pub(crate) fn parse_function_rest(
        &mut self,
        name: Option<Name>,
        start: Span,
    ) -> Result<FunctionId, ParseError> {
        let params = self.parse_params()?;
        let body = self.parse_block_body()?;
        Ok(self.arena.alloc_function(FunctionDef {
            name,
            params,
            body: FunctionBody::Block(body),
            is_arrow: false,
            span: self.span_from(start),
        }))
    }

    /// `( a, b, c )`
    pub(crate) fn parse_params(&mut self) -> Result<Vec<Name>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        while !self.check(&TokenKind::RParen) {
            match self.cursor.current_ident() {
                Some(name) => {
                    self.advance();
                    params.push(name);
                }
                None => {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidParameter,
                        self.current_span(),
                    ))
                }
            }
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(params)
    }

    /// `var` / `let` / `const` followed by declarators. With `no_in`, the
    /// initialisers may not contain a bare `in` (for-statement heads).
    fn parse_var_declarators(
        &mut self,
        no_in: bool,
    ) -> Result<(VarKind, Vec<Declarator>), ParseError> {
        let kind = match self.current_kind() {
            TokenKind::Var => VarKind::Var,
            TokenKind::Let => VarKind::Let,
            TokenKind::Const => VarKind::Const,
            _ => return Err(self.unexpected("declaration")),
        };
        self.advance();

        let mut declarators = Vec::new();
        loop {
            let start = self.current_span();
            let name = self.expect_ident()?;
            let init = if self.cursor.eat(&TokenKind::Eq) {
                Some(self.parse_assignment(no_in)?)
            } else {
                None
            };
            declarators.push(Declarator {
                name,
                init,
                span: self.span_from(start),
            });
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok((kind, declarators))
    }

    fn parse_if(&mut self, start: Span) -> Result<StmtId, ParseError> {
        self.advance();
        let test = self.parse_paren_expression()?;
        let consequent = self.parse_statement()?;
        let alternate = if self.cursor.eat(&TokenKind::Else) {
            Some(self.parse_statement()?)
        } else {
            None
        };
        Ok(self.alloc_stmt(
            StmtKind::If {
                test,
                consequent,
                alternate,
            },
            self.span_from(start),
        ))
    }

    fn parse_for(&mut self, start: Span) -> Result<StmtId, ParseError> {
        self.advance();
        self.expect(&TokenKind::LParen)?;

        let init = match self.current_kind() {
            TokenKind::Semicolon => None,
            TokenKind::Var | TokenKind::Let | TokenKind::Const => {
                let decl_start = self.current_span();
                let (kind, declarators) = self.parse_var_declarators(true)?;
                let iterates = self.at_for_in_of();
                if let Some(which) = iterates {
                    if declarators.len() != 1 || declarators[0].init.is_some() {
                        return Err(ParseError::new(
                            ParseErrorKind::InvalidForTarget(which),
                            self.span_from(decl_start),
                        ));
                    }
                } else {
                    check_const_initializers(kind, &declarators)?;
                }
                let decl = self.alloc_stmt(
                    StmtKind::VarDecl { kind, declarators },
                    self.span_from(decl_start),
                );
                if iterates.is_some() {
                    return self.parse_for_in_of_rest(start, ForInit::Decl(decl));
                }
                Some(ForInit::Decl(decl))
            }
            _ => {
                let expr = self.parse_expression(true)?;
                if let Some(which) = self.at_for_in_of() {
                    if !self.is_assignment_target(expr) {
                        return Err(ParseError::new(
                            ParseErrorKind::InvalidForTarget(which),
                            self.arena.expr_span(expr),
                        ));
                    }
                    return self.parse_for_in_of_rest(start, ForInit::Expr(expr));
                }
                Some(ForInit::Expr(expr))
            }
        };

        self.expect(&TokenKind::Semicolon)?;
        let test = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression(false)?)
        };
        self.expect(&TokenKind::Semicolon)?;
        let update = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expression(false)?)
        };
        self.expect(&TokenKind::RParen)?;
        let body = self.parse_statement()?;
        Ok(self.alloc_stmt(
            StmtKind::For {
                init,
                test,
                update,
                body,
            },
            self.span_from(start),
        ))
    }

    /// `"in"` or `"of"` if the cursor sits on the iteration keyword of a
    /// for-in / for-of head.
    fn at_for_in_of(&self) -> Option<&'static str> {
        match self.current_kind() {
            TokenKind::In => Some("in"),
            TokenKind::Ident(name) if *name == Name::OF => Some("of"),
            _ => None,
        }
    }

    fn parse_for_in_of_rest(&mut self, start: Span, left: ForInit) -> Result<StmtId, ParseError> {
        let is_of = !matches!(self.current_kind(), TokenKind::In);
        self.advance();
        let right = if is_of {
            self.parse_assignment(false)?
        } else {
            self.parse_expression(false)?
        };
        self.expect(&TokenKind::RParen)?;
        let body = self.parse_statement()?;
        let kind = if is_of {
            StmtKind::ForOf { left, right, body }
        } else {
            StmtKind::ForIn { left, right, body }
        };
        Ok(self.alloc_stmt(kind, self.span_from(start)))
    }

    fn parse_try(&mut self, start: Span) -> Result<StmtId, ParseError> {
        self.advance();
        let block = self.parse_block_body()?;

        let handler = if self.check(&TokenKind::Catch) {
            let catch_start = self.advance();
            let param = if self.cursor.eat(&TokenKind::LParen) {
                let name = self.expect_ident()?;
                self.expect(&TokenKind::RParen)?;
                Some(name)
            } else {
                None
            };
            let body = self.parse_block_body()?;
            Some(CatchClause {
                param,
                body,
                span: self.span_from(catch_start),
            })
        } else {
            None
        };

        let finalizer = if self.cursor.eat(&TokenKind::Finally) {
            Some(self.parse_block_body()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(ParseError::new(
                ParseErrorKind::MissingCatchOrFinally,
                self.current_span(),
            ));
        }

        Ok(self.alloc_stmt(
            StmtKind::Try {
                block,
                handler,
                finalizer,
            },
            self.span_from(start),
        ))
    }

    fn parse_switch(&mut self, start: Span) -> Result<StmtId, ParseError> {
        self.advance();
        let discriminant = self.parse_paren_expression()?;
        self.expect(&TokenKind::LBrace)?;

        let mut cases = Vec::new();
        let mut seen_default = false;
        while !self.check(&TokenKind::RBrace) && !self.cursor.is_at_end() {
            let case_start = self.current_span();
            let test = match self.current_kind() {
                TokenKind::Case => {
                    self.advance();
                    Some(self.parse_expression(false)?)
                }
                TokenKind::Default => {
                    if seen_default {
                        self.errors.push(ParseError::new(
                            ParseErrorKind::DuplicateDefault,
                            case_start,
                        ));
                    }
                    seen_default = true;
                    self.advance();
                    None
                }
                _ => return Err(self.unexpected("'case' or 'default'")),
            };
            self.expect(&TokenKind::Colon)?;
            let body = self.parse_statement_list(|kind| {
                matches!(
                    kind,
                    TokenKind::Case | TokenKind::Default | TokenKind::RBrace
                )
            });
            cases.push(SwitchCase {
                test,
                body,
                span: self.span_from(case_start),
            });
        }
        self.expect(&TokenKind::RBrace)?;

        Ok(self.alloc_stmt(
            StmtKind::Switch {
                discriminant,
                cases,
            },
            self.span_from(start),
        ))
    }

    fn parse_paren_expression(&mut self) -> Result<ember_ir::ExprId, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let expr = self.parse_expression(false)?;
        self.expect(&TokenKind::RParen)?;
        Ok(expr)
    }

    /// Whether a `return` argument is absent here.
    fn at_statement_end(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
        ) || self.cursor.newline_before()
    }

    /// Accept `;`, or insert one before `}`, end of input, or a line break.
    fn consume_semicolon(&mut self) -> Result<(), ParseError> {
        if self.cursor.eat(&TokenKind::Semicolon) {
            return Ok(());
        }
        if matches!(self.current_kind(), TokenKind::RBrace | TokenKind::Eof)
            || self.cursor.newline_before()
        {
            return Ok(());
        }
        Err(self.unexpected("';'"))
    }

    pub(crate) fn is_assignment_target(&self, expr: ember_ir::ExprId) -> bool {
        matches!(
            self.arena.get_expr(expr).kind,
            ExprKind::Ident(_) | ExprKind::Member { .. }
        )
    }
}

fn check_const_initializers(kind: VarKind, declarators: &[Declarator]) -> Result<(), ParseError> {
    if kind != VarKind::Const {
        return Ok(());
    }
    match declarators.iter().find(|decl| decl.init.is_none()) {
        Some(decl) => Err(ParseError::new(
            ParseErrorKind::MissingConstInitializer,
            decl.span,
        )),
        None => Ok(()),
    }
}
