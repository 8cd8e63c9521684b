/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single "god file".

/// Annotations and visibility that precede a declaration or member.
struct Modifiers {
    annotations: Vec<Spanned<Annotation>>,
    visibility: Visibility,
    start: usize,
}

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass and recovers from errors by synchronizing at
///   declaration and member boundaries, so one bad member yields one error.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<CompileError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `datagen_syntax::lexer`, ending in `Eof`.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the entire token stream into a [`CompilationUnit`].
    ///
    /// ## Errors
    /// Returns a list of [`CompileError`]s if parsing fails. The parser recovers and
    /// continues after an error to report multiple issues in one pass.
    pub fn parse(mut self) -> Result<CompilationUnit, Vec<CompileError>> {
        let mut declarations = Vec::new();

        while !self.is_at_end() {
            match self.declaration() {
                Ok(decl) => declarations.push(decl),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                }
            }
        }

        if self.errors.is_empty() {
            Ok(CompilationUnit { declarations })
        } else {
            Err(self.errors)
        }
    }
}
