//! Diagnostics sink for the synthesis pass.
//!
//! The pass never returns diagnostics directly; it hands each one to a [`Reporter`] and moves
//! on. Two sinks ship with the crate: a plain `Vec` for tests and tooling that wants to render
//! errors later, and [`TracingReporter`] for hosts that only log.

use datagen_syntax::diagnostics::{CompileError, ErrorKind};

/// Fire-and-forget diagnostic channel.
pub trait Reporter {
    fn report(&mut self, diagnostic: CompileError);

    /// Informational message tied to a span.
    fn note(&mut self, message: String, span: datagen_syntax::ast::Span) {
        self.report(CompileError::note(message, span));
    }
}

impl Reporter for Vec<CompileError> {
    fn report(&mut self, diagnostic: CompileError) {
        self.push(diagnostic);
    }
}

/// Forwards diagnostics to `tracing`: notes at `info`, warnings at `warn`, errors at `error`.
#[derive(Debug, Default, Clone)]
pub struct TracingReporter {
    errors: usize,
}

impl TracingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of error diagnostics seen so far.
    pub fn error_count(&self) -> usize {
        self.errors
    }
}

impl Reporter for TracingReporter {
    fn report(&mut self, diagnostic: CompileError) {
        let span = diagnostic.span;
        match diagnostic.kind {
            ErrorKind::Note => tracing::info!(start = span.start, end = span.end, "{}", diagnostic.message),
            ErrorKind::Warning => tracing::warn!(start = span.start, end = span.end, "{}", diagnostic.message),
            _ => {
                self.errors += 1;
                tracing::error!(start = span.start, end = span.end, "{}", diagnostic.message);
            }
        }
    }
}
