//! Diagnostics and error reporting.
//!
//! [`CompileError`] is the single diagnostic record shared by the lexer, the parser and the
//! accessor synthesis pass. Rendering goes through `miette`'s graphical report handler so every
//! front-end prints the same source-highlighted output.

use std::fmt;

use miette::{
    Diagnostic, GraphicalReportHandler, GraphicalTheme, LabeledSpan, NamedSource, Severity, SourceCode, SourceSpan,
};

use crate::ast::Span;

/// A diagnostic with location information
#[derive(Debug, Clone, PartialEq)]
pub struct CompileError {
    pub message: String,
    pub span: Span,
    pub kind: ErrorKind,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl CompileError {
    pub fn new(message: String, span: Span) -> Self {
        Self::with_kind(message, span, ErrorKind::Error)
    }

    pub fn syntax(message: String, span: Span) -> Self {
        Self::with_kind(message, span, ErrorKind::Syntax)
    }

    pub fn synthesis(message: String, span: Span) -> Self {
        Self::with_kind(message, span, ErrorKind::Synthesis)
    }

    /// Informational diagnostic (progress/trace messages).
    pub fn note(message: String, span: Span) -> Self {
        Self::with_kind(message, span, ErrorKind::Note)
    }

    fn with_kind(message: String, span: Span, kind: ErrorKind) -> Self {
        Self {
            message,
            span,
            kind,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    /// `true` for every kind that should fail a build.
    pub fn is_error(&self) -> bool {
        self.kind.is_error()
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for CompileError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Error,
    Syntax,
    Synthesis,
    Warning,
    Note,
}

impl ErrorKind {
    pub fn is_error(self) -> bool {
        matches!(self, ErrorKind::Error | ErrorKind::Syntax | ErrorKind::Synthesis)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Error => write!(f, "error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::Synthesis => write!(f, "synthesis error"),
            ErrorKind::Warning => write!(f, "warning"),
            ErrorKind::Note => write!(f, "note"),
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Borrowed view of a [`CompileError`] bound to its source text, rendered by miette.
#[derive(Debug)]
struct SourceReport<'a> {
    error: &'a CompileError,
    source: NamedSource<String>,
    span: SourceSpan,
}

impl fmt::Display for SourceReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error.kind, self.error.message)
    }
}

impl std::error::Error for SourceReport<'_> {}

impl Diagnostic for SourceReport<'_> {
    fn severity(&self) -> Option<Severity> {
        Some(match self.error.kind {
            ErrorKind::Error | ErrorKind::Syntax | ErrorKind::Synthesis => Severity::Error,
            ErrorKind::Warning => Severity::Warning,
            ErrorKind::Note => Severity::Advice,
        })
    }

    fn help<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        if self.error.notes.is_empty() && self.error.hints.is_empty() {
            return None;
        }
        let lines: Vec<String> = self
            .error
            .notes
            .iter()
            .map(|n| format!("note: {n}"))
            .chain(self.error.hints.iter().cloned())
            .collect();
        Some(Box::new(lines.join("\n")))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.source)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = match self.error.kind {
            ErrorKind::Note => "here",
            _ => "error occurred here",
        };
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(label.to_string()),
            self.span,
        ))))
    }
}

/// Render an error with source context into a string (no ANSI colors).
pub fn format_error(file_name: &str, source: &str, error: &CompileError) -> String {
    let start = error.span.start.min(source.len());
    let len = error.span.end.min(source.len()).saturating_sub(start);
    let report = SourceReport {
        error,
        source: NamedSource::new(file_name, source.to_string()),
        span: SourceSpan::from((start, len)),
    };

    let mut out = String::new();
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    if handler.render_report(&mut out, &report).is_err() {
        let (line, col, _) = get_line_info(source, error.span.start);
        out = format!("{}: {}\n  --> {}:{}:{}\n", error.kind, error.message, file_name, line, col);
    }
    out
}

/// Render a batch of errors, one after another.
pub fn format_errors(file_name: &str, source: &str, errors: &[CompileError]) -> String {
    let mut msg = String::new();
    for err in errors {
        msg.push_str(&format_error(file_name, source, err));
        msg.push('\n');
    }
    msg.trim_end().to_string()
}

/// Get line number, column number, and line text for a byte offset
pub fn get_line_info(source: &str, offset: usize) -> (usize, usize, &str) {
    let offset = offset.min(source.len());
    let mut line_num = 1;
    let mut line_start = 0;

    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line_num += 1;
            line_start = i + 1;
        }
    }

    let line_end = source[line_start..]
        .find('\n')
        .map(|i| line_start + i)
        .unwrap_or(source.len());

    let line_text = &source[line_start..line_end];
    let col_num = offset - line_start + 1;

    (line_num, col_num, line_text)
}

// ============================================================================
// Error catalog
// ============================================================================

/// Common syntax errors with consistent wording.
pub mod errors {
    use super::*;

    pub fn expected_token(expected: &str, found: &str, span: Span) -> CompileError {
        CompileError::syntax(format!("Expected {}, found {}", expected, found), span)
    }

    pub fn unexpected_character(c: char, span: Span) -> CompileError {
        CompileError::syntax(format!("Unexpected character '{}'", c), span)
    }

    pub fn unterminated_string(span: Span) -> CompileError {
        CompileError::syntax("Unterminated string literal".to_string(), span)
            .with_hint("Close the string with a matching quote on the same line")
    }

    pub fn unterminated_comment(span: Span) -> CompileError {
        CompileError::syntax("Unterminated block comment".to_string(), span).with_hint("Close the comment with '*/'")
    }

    pub fn integer_out_of_range(literal: &str, span: Span) -> CompileError {
        CompileError::syntax(format!("Integer literal '{}' does not fit in 64 bits", literal), span)
    }

    pub fn invalid_assignment_target(span: Span) -> CompileError {
        CompileError::syntax("Invalid assignment target".to_string(), span)
            .with_hint("Only variables and fields such as 'this.name' can be assigned")
    }

    pub fn annotation_not_allowed(what: &str, span: Span) -> CompileError {
        CompileError::syntax(format!("Annotations are not allowed on {}", what), span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_line_info() {
        let source = "line 1\nline 2\nline 3";

        let (line, col, text) = get_line_info(source, 0);
        assert_eq!(line, 1);
        assert_eq!(col, 1);
        assert_eq!(text, "line 1");

        let (line, col, text) = get_line_info(source, 10);
        assert_eq!(line, 2);
        assert_eq!(col, 4);
        assert_eq!(text, "line 2");
    }

    #[test]
    fn test_format_error_mentions_file_and_message() {
        let source = "class A {\n    x = 1;\n}\n";
        let err = CompileError::synthesis("Field 'x' has no declared type".to_string(), Span::new(14, 20))
            .with_hint("Declare it as 'x: Int = 1;'");
        let rendered = format_error("a.dg", source, &err);
        assert!(rendered.contains("Field 'x' has no declared type"), "{rendered}");
        assert!(rendered.contains("a.dg"), "{rendered}");
        assert!(rendered.contains("Declare it as"), "{rendered}");
    }

    #[test]
    fn test_format_error_clamps_out_of_range_span() {
        let err = CompileError::syntax("boom".to_string(), Span::new(100, 200));
        let rendered = format_error("x.dg", "short", &err);
        assert!(rendered.contains("boom"));
    }

    #[test]
    fn test_error_kinds() {
        assert!(CompileError::synthesis(String::new(), Span::default()).is_error());
        assert!(!CompileError::note(String::new(), Span::default()).is_error());
    }
}
