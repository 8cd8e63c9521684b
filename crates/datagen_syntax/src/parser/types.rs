/// Type reference parsing.
///
/// `void`, dotted paths with optional generic arguments (`Map<String, List<Int>>`), and any
/// number of `[]` array suffixes. `>>` is never a single token, so nested generics close
/// naturally.
impl<'a> Parser<'a> {
    fn type_ref(&mut self) -> Result<Spanned<Type>, CompileError> {
        if self.check_keyword(KeywordId::Void) {
            let span = self.advance().span;
            return Ok(Spanned::new(Type::Void, span));
        }

        let start = self.current_span().start;
        let path = self.dotted_path()?;

        let mut args = Vec::new();
        if self.match_op(OperatorId::Lt) {
            loop {
                args.push(self.type_ref()?);
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
            self.expect_op(OperatorId::Gt, "'>' to close type arguments")?;
        }

        let mut ty = Spanned::new(Type::Named { path, args }, self.span_from(start));
        while self.check_punct(PunctuationId::LBracket) {
            self.advance();
            self.expect_punct(PunctuationId::RBracket, "']' in array type")?;
            ty = Spanned::new(Type::Array(Box::new(ty)), self.span_from(start));
        }
        Ok(ty)
    }
}
