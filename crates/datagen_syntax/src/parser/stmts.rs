/// Statement and block parsing.
///
/// Blocks recover per statement: a malformed statement is reported and skipped, and
/// parsing resumes at the next statement of the same block.
impl<'a> Parser<'a> {
    // ========================================================================
    // Statements
    // ========================================================================

    /// `{ statement* }`
    fn block(&mut self) -> Result<Vec<Spanned<Statement>>, CompileError> {
        self.expect_punct(PunctuationId::LBrace, "'{' to open block")?;
        let mut body = Vec::new();
        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            match self.statement() {
                Ok(stmt) => body.push(stmt),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize_statement();
                }
            }
        }
        self.expect_punct(PunctuationId::RBrace, "'}' to close block")?;
        Ok(body)
    }

    fn statement(&mut self) -> Result<Spanned<Statement>, CompileError> {
        let start = self.current_span().start;

        let stmt = if self.match_keyword(KeywordId::Let) {
            self.let_stmt()?
        } else if self.match_keyword(KeywordId::Return) {
            let value = if self.check_punct(PunctuationId::Semicolon) {
                None
            } else {
                Some(self.expression()?)
            };
            self.expect_punct(PunctuationId::Semicolon, "';' after return")?;
            Statement::Return(value)
        } else if self.match_keyword(KeywordId::If) {
            Statement::If(self.if_stmt()?)
        } else if self.match_keyword(KeywordId::While) {
            let condition = self.expression()?;
            let body = self.block()?;
            Statement::While(WhileStmt { condition, body })
        } else {
            let expr = self.expression()?;
            if self.match_op(OperatorId::Eq) {
                if !matches!(expr.node, Expr::Ident(_) | Expr::Field(..)) {
                    return Err(errors::invalid_assignment_target(expr.span));
                }
                let value = self.expression()?;
                self.expect_punct(PunctuationId::Semicolon, "';' after assignment")?;
                Statement::Assign(AssignStmt { target: expr, value })
            } else {
                self.expect_punct(PunctuationId::Semicolon, "';' after expression")?;
                Statement::Expr(expr)
            }
        };

        Ok(Spanned::new(stmt, self.span_from(start)))
    }

    /// `let name[: Type][= value];`
    fn let_stmt(&mut self) -> Result<Statement, CompileError> {
        let name = self.identifier()?;
        let ty = if self.match_punct(PunctuationId::Colon) {
            Some(self.type_ref()?)
        } else {
            None
        };
        let value = if self.match_op(OperatorId::Eq) {
            Some(self.expression()?)
        } else {
            None
        };
        self.expect_punct(PunctuationId::Semicolon, "';' after let")?;
        Ok(Statement::Let(LetStmt { name, ty, value }))
    }

    /// Parse the rest of an `if` after the keyword. `else if` nests as a single-statement else body.
    fn if_stmt(&mut self) -> Result<IfStmt, CompileError> {
        let condition = self.expression()?;
        let then_body = self.block()?;
        let else_body = if self.match_keyword(KeywordId::Else) {
            if self.check_keyword(KeywordId::If) {
                let start = self.advance().span.start;
                let nested = self.if_stmt()?;
                Some(vec![Spanned::new(Statement::If(nested), self.span_from(start))])
            } else {
                Some(self.block()?)
            }
        } else {
            None
        };
        Ok(IfStmt {
            condition,
            then_body,
            else_body,
        })
    }
}
