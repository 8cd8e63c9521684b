/// Declaration and member parsing.
///
/// Top level: `import`, `class`, `fn`. Inside a class body: fields, methods, constructors
/// (`new`), initializers (`init`) and nested classes. Annotations and visibility modifiers
/// are collected first by [`Parser::modifiers`] and handed to the specific parser.
impl<'a> Parser<'a> {
    // ========================================================================
    // Declarations
    // ========================================================================

    fn declaration(&mut self) -> Result<Spanned<Declaration>, CompileError> {
        let mods = self.modifiers()?;
        let start = mods.start;

        if self.check_keyword(KeywordId::Import) {
            if let Some(annotation) = mods.annotations.first() {
                return Err(errors::annotation_not_allowed("imports", annotation.span));
            }
            self.advance();
            let path = self.dotted_path()?;
            self.expect_punct(PunctuationId::Semicolon, "';' after import")?;
            return Ok(Spanned::new(Declaration::Import(ImportDecl { path }), self.span_from(start)));
        }

        if self.match_keyword(KeywordId::Class) {
            let decl = self.type_decl(mods)?;
            return Ok(Spanned::new(Declaration::Type(decl), self.span_from(start)));
        }

        if self.match_keyword(KeywordId::Fn) {
            let decl = self.method_decl(mods)?;
            return Ok(Spanned::new(Declaration::Function(decl), self.span_from(start)));
        }

        Err(self.error_expected("declaration ('class', 'fn' or 'import')"))
    }

    /// Parse `@annotations` followed by an optional `pub` / `priv`.
    fn modifiers(&mut self) -> Result<Modifiers, CompileError> {
        let start = self.current_span().start;
        let mut annotations = Vec::new();

        while self.check_punct(PunctuationId::At) {
            let at = self.advance().span;
            let path = self.dotted_path()?;
            annotations.push(Spanned::new(Annotation { path }, self.span_from(at.start)));
        }

        let visibility = if self.match_keyword(KeywordId::Pub) {
            Visibility::Public
        } else {
            self.match_keyword(KeywordId::Priv);
            Visibility::Private
        };

        Ok(Modifiers {
            annotations,
            visibility,
            start,
        })
    }

    /// Parse a class after the `class` keyword.
    fn type_decl(&mut self, mods: Modifiers) -> Result<TypeDecl, CompileError> {
        let name = self.identifier()?;
        self.expect_punct(PunctuationId::LBrace, "'{' after class name")?;

        let mut members = Vec::new();
        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            match self.member() {
                Ok(member) => members.push(member),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize_member();
                }
            }
        }
        self.expect_punct(PunctuationId::RBrace, "'}' to close class body")?;

        Ok(TypeDecl {
            annotations: mods.annotations,
            visibility: mods.visibility,
            name,
            members,
        })
    }

    // ========================================================================
    // Members
    // ========================================================================

    fn member(&mut self) -> Result<Spanned<Member>, CompileError> {
        let mods = self.modifiers()?;
        let start = mods.start;

        let member = if self.match_keyword(KeywordId::Fn) {
            Member::Method(self.method_decl(mods)?)
        } else if self.match_keyword(KeywordId::New) {
            let params = self.params()?;
            let body = self.block()?;
            Member::Constructor(ConstructorDecl {
                annotations: mods.annotations,
                visibility: mods.visibility,
                params,
                body,
            })
        } else if self.check_keyword(KeywordId::Init) {
            if let Some(annotation) = mods.annotations.first() {
                return Err(errors::annotation_not_allowed("initializers", annotation.span));
            }
            self.advance();
            Member::Initializer(self.block()?)
        } else if self.match_keyword(KeywordId::Class) {
            Member::Type(self.type_decl(mods)?)
        } else if matches!(self.peek().kind, TokenKind::Ident(_)) {
            Member::Field(self.field_decl(mods)?)
        } else {
            return Err(self.error_expected("class member"));
        };

        Ok(Spanned::new(member, self.span_from(start)))
    }

    /// `name[: Type][= default];`
    fn field_decl(&mut self, mods: Modifiers) -> Result<FieldDecl, CompileError> {
        let name = self.identifier()?;
        let ty = if self.match_punct(PunctuationId::Colon) {
            Some(self.type_ref()?)
        } else {
            None
        };
        let default = if self.match_op(OperatorId::Eq) {
            Some(self.expression()?)
        } else {
            None
        };
        self.expect_punct(PunctuationId::Semicolon, "';' after field")?;

        Ok(FieldDecl {
            annotations: mods.annotations,
            visibility: mods.visibility,
            name,
            ty,
            default,
        })
    }

    /// Parse a method or function after the `fn` keyword.
    ///
    /// A missing return type means `void`.
    fn method_decl(&mut self, mods: Modifiers) -> Result<MethodDecl, CompileError> {
        let name = self.identifier()?;
        let params = self.params()?;
        let return_type = if self.match_punct(PunctuationId::Colon) {
            self.type_ref()?
        } else {
            Spanned::new(Type::Void, self.previous_span())
        };
        let body = self.block()?;

        Ok(MethodDecl {
            annotations: mods.annotations,
            visibility: mods.visibility,
            name,
            params,
            return_type,
            body,
        })
    }

    /// `(name: Type, ...)`
    fn params(&mut self) -> Result<Vec<Spanned<Param>>, CompileError> {
        self.expect_punct(PunctuationId::LParen, "'(' before parameters")?;
        let mut params = Vec::new();
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                let name = self.identifier_spanned()?;
                self.expect_punct(PunctuationId::Colon, "':' after parameter name")?;
                let ty = self.type_ref()?;
                let span = name.span.merge(ty.span);
                params.push(Spanned::new(Param { name: name.node, ty }, span));
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(PunctuationId::RParen, "')' after parameters")?;
        Ok(params)
    }
}
