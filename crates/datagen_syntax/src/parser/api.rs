/// Parse a token stream into a [`CompilationUnit`].
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `datagen_syntax::lexer`.
///
/// ## Errors
/// Returns `Err(Vec<CompileError>)` if parsing fails.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<CompilationUnit, Vec<CompileError>> {
    if tokens.is_empty() {
        return Ok(CompilationUnit::default());
    }
    Parser::new(tokens).parse()
}
