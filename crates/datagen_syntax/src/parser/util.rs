/// Miscellaneous parser utilities.
///
/// Identifier parsing, dotted paths and call argument lists.
impl<'a> Parser<'a> {
    // ========================================================================
    // Utilities
    // ========================================================================

    fn identifier(&mut self) -> Result<Ident, CompileError> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error_expected("identifier")),
        }
    }

    fn identifier_spanned(&mut self) -> Result<Spanned<Ident>, CompileError> {
        let span = self.current_span();
        let name = self.identifier()?;
        Ok(Spanned::new(name, span))
    }

    /// `a.b.C`
    fn dotted_path(&mut self) -> Result<Vec<Ident>, CompileError> {
        let mut path = vec![self.identifier()?];
        while self.match_punct(PunctuationId::Dot) {
            path.push(self.identifier()?);
        }
        Ok(path)
    }

    /// `(expr, ...)`
    fn arguments(&mut self) -> Result<Vec<Spanned<Expr>>, CompileError> {
        self.expect_punct(PunctuationId::LParen, "'(' before arguments")?;
        let mut args = Vec::new();
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                args.push(self.expression()?);
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(PunctuationId::RParen, "')' after arguments")?;
        Ok(args)
    }
}
