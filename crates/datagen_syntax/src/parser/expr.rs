/// Expression parsing methods.
///
/// Precedence ladder: `||` → `&&` → comparison → additive → multiplicative → unary → postfix → primary.
///
/// ## Notes
/// - Comparisons do not chain: `a < b < c` is a syntax error.
/// - Parentheses are kept in the tree as [`Expr::Paren`] so printing reproduces them.
impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    fn expression(&mut self) -> Result<Spanned<Expr>, CompileError> {
        self.or_expr()
    }

    fn or_expr(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let mut left = self.and_expr()?;
        while self.match_op(OperatorId::OrOr) {
            let right = self.and_expr()?;
            left = binary(left, BinaryOp::Or, right);
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let mut left = self.comparison()?;
        while self.match_op(OperatorId::AndAnd) {
            let right = self.comparison()?;
            left = binary(left, BinaryOp::And, right);
        }
        Ok(left)
    }

    fn comparison(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let left = self.additive()?;
        let Some(op) = self.comparison_op() else {
            return Ok(left);
        };
        let right = self.additive()?;
        if self.comparison_op().is_some() {
            return Err(CompileError::syntax(
                "Comparison operators cannot be chained".to_string(),
                self.previous_span(),
            )
            .with_hint("Combine the comparisons with '&&'"));
        }
        Ok(binary(left, op, right))
    }

    /// Consume a comparison operator, if present.
    fn comparison_op(&mut self) -> Option<BinaryOp> {
        let op = match self.peek().kind {
            TokenKind::Operator(OperatorId::EqEq) => BinaryOp::Eq,
            TokenKind::Operator(OperatorId::NotEq) => BinaryOp::NotEq,
            TokenKind::Operator(OperatorId::Lt) => BinaryOp::Lt,
            TokenKind::Operator(OperatorId::LtEq) => BinaryOp::LtEq,
            TokenKind::Operator(OperatorId::Gt) => BinaryOp::Gt,
            TokenKind::Operator(OperatorId::GtEq) => BinaryOp::GtEq,
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    fn additive(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let mut left = self.multiplicative()?;
        loop {
            let op = if self.match_op(OperatorId::Plus) {
                BinaryOp::Add
            } else if self.match_op(OperatorId::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };
            let right = self.multiplicative()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    fn multiplicative(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let mut left = self.unary()?;
        loop {
            let op = if self.match_op(OperatorId::Star) {
                BinaryOp::Mul
            } else if self.match_op(OperatorId::Slash) {
                BinaryOp::Div
            } else if self.match_op(OperatorId::Percent) {
                BinaryOp::Mod
            } else {
                break;
            };
            let right = self.unary()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let op = if self.check_op(OperatorId::Minus) {
            UnaryOp::Neg
        } else if self.check_op(OperatorId::Bang) {
            UnaryOp::Not
        } else {
            return self.postfix();
        };
        let start = self.advance().span.start;
        let operand = self.unary()?;
        let span = Span::new(start, operand.span.end);
        Ok(Spanned::new(Expr::Unary(op, Box::new(operand)), span))
    }

    fn postfix(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let mut expr = self.primary()?;
        loop {
            if self.match_punct(PunctuationId::Dot) {
                let name = self.identifier()?;
                if self.check_punct(PunctuationId::LParen) {
                    let args = self.arguments()?;
                    let span = self.span_from(expr.span.start);
                    expr = Spanned::new(Expr::MethodCall(Box::new(expr), name, args), span);
                } else {
                    let span = self.span_from(expr.span.start);
                    expr = Spanned::new(Expr::Field(Box::new(expr), name), span);
                }
            } else if self.check_punct(PunctuationId::LParen) {
                let args = self.arguments()?;
                let span = self.span_from(expr.span.start);
                expr = Spanned::new(Expr::Call(Box::new(expr), args), span);
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let span = self.current_span();
        if self.match_punct(PunctuationId::LParen) {
            let inner = self.expression()?;
            self.expect_punct(PunctuationId::RParen, "')' to close parenthesized expression")?;
            return Ok(Spanned::new(Expr::Paren(Box::new(inner)), self.span_from(span.start)));
        }

        let expr = match &self.peek().kind {
            TokenKind::Int(v) => Expr::Literal(Literal::Int(*v)),
            TokenKind::Float(v) => Expr::Literal(Literal::Float(*v)),
            TokenKind::String(s) => Expr::Literal(Literal::String(s.clone())),
            TokenKind::Ident(name) => Expr::Ident(name.clone()),
            TokenKind::Keyword(KeywordId::True) => Expr::Literal(Literal::Bool(true)),
            TokenKind::Keyword(KeywordId::False) => Expr::Literal(Literal::Bool(false)),
            TokenKind::Keyword(KeywordId::Null) => Expr::Literal(Literal::Null),
            TokenKind::Keyword(KeywordId::This) => Expr::This,
            _ => return Err(self.error_expected("expression")),
        };
        self.advance();
        Ok(Spanned::new(expr, span))
    }
}

fn binary(left: Spanned<Expr>, op: BinaryOp, right: Spanned<Expr>) -> Spanned<Expr> {
    let span = left.span.merge(right.span);
    Spanned::new(Expr::Binary(Box::new(left), op, Box::new(right)), span)
}
