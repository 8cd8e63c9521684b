/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`)
/// - Matching / expecting keywords, operators, and punctuation
/// - Error recovery (`synchronize`, `synchronize_member`, `synchronize_statement`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        &self.tokens[self.pos.saturating_sub(1)]
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().kind.is_operator(id)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, expected: &str) -> Result<Span, CompileError> {
        if self.check_punct(id) {
            Ok(self.advance().span)
        } else {
            Err(self.error_expected(expected))
        }
    }

    fn expect_op(&mut self, id: OperatorId, expected: &str) -> Result<Span, CompileError> {
        if self.check_op(id) {
            Ok(self.advance().span)
        } else {
            Err(self.error_expected(expected))
        }
    }

    /// Build an "Expected X, found Y" error at the current token.
    fn error_expected(&self, expected: &str) -> CompileError {
        errors::expected_token(expected, &self.peek().kind.to_string(), self.current_span())
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    /// Span of the most recently consumed token.
    fn previous_span(&self) -> Span {
        if self.pos == 0 {
            self.current_span()
        } else {
            self.tokens[self.pos - 1].span
        }
    }

    /// Span from `start` to the end of the most recently consumed token.
    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.previous_span().end.max(start))
    }

    // ========================================================================
    // Error recovery
    // ========================================================================

    /// Recover at the top level: skip to the next declaration.
    fn synchronize(&mut self) {
        self.recover(&[KeywordId::Class, KeywordId::Fn, KeywordId::Import, KeywordId::Pub, KeywordId::Priv], false);
    }

    /// Recover inside a class body: skip to the next member or the closing brace.
    fn synchronize_member(&mut self) {
        self.recover(
            &[
                KeywordId::Fn,
                KeywordId::New,
                KeywordId::Init,
                KeywordId::Class,
                KeywordId::Pub,
                KeywordId::Priv,
            ],
            true,
        );
    }

    /// Recover inside a block: skip to the next statement or the closing brace.
    fn synchronize_statement(&mut self) {
        self.recover(&[KeywordId::Let, KeywordId::Return, KeywordId::If, KeywordId::While], true);
    }

    /// Skip tokens until a restart point at the current nesting depth.
    ///
    /// A restart point is one of `restart` (or `@`) after at least one token has been skipped,
    /// just past a `;`, or just past a balanced `{ ... }` group. With `stop_before_close`, an
    /// unbalanced `}` ends recovery without being consumed, leaving it for the enclosing body.
    fn recover(&mut self, restart: &[KeywordId], stop_before_close: bool) {
        let start = self.pos;
        let mut depth = 0usize;
        while !self.is_at_end() {
            let is_open = self.check_punct(PunctuationId::LBrace);
            let is_close = self.check_punct(PunctuationId::RBrace);
            let is_semi = self.check_punct(PunctuationId::Semicolon);
            let is_restart =
                self.check_punct(PunctuationId::At) || restart.iter().any(|k| self.check_keyword(*k));

            if depth == 0 {
                if is_close && stop_before_close {
                    return;
                }
                if is_restart && self.pos > start {
                    return;
                }
            }

            self.advance();

            if is_open {
                depth += 1;
            } else if is_close && depth > 0 {
                depth -= 1;
                if depth == 0 {
                    return;
                }
            } else if is_semi && depth == 0 {
                return;
            }
        }
    }
}
