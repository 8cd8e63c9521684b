//! Errors raised while synthesizing accessors for a single field.

use datagen_syntax::ast::Span;
use datagen_syntax::diagnostics::CompileError;
use miette::Diagnostic;
use thiserror::Error;

/// Why a field did not get its accessors.
///
/// Every variant names the owning type and the field, and carries the field's span so the
/// diagnostic points at the declaration the user has to fix.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SynthError {
    #[error("Field '{field}' of '{owner}' has no declared type")]
    #[diagnostic(
        code(datagen::synth::missing_type),
        help("Declare the field type, e.g. '{field}: Int;'")
    )]
    MissingType { owner: String, field: String, span: Span },

    #[error("Field '{field}' of '{owner}' is declared 'void'")]
    #[diagnostic(code(datagen::synth::void_field), help("Fields need a value type"))]
    VoidType { owner: String, field: String, span: Span },

    #[error("Field name '{field}' of '{owner}' is not a valid identifier")]
    #[diagnostic(code(datagen::synth::invalid_field_name))]
    InvalidFieldName { owner: String, field: String, span: Span },

    #[error("Cannot synthesize '{accessor}' for field '{field}' of '{owner}': {existing}")]
    #[diagnostic(
        code(datagen::synth::accessor_conflict),
        help("Rename or remove the existing member, or run with '--on-conflict skip'")
    )]
    AccessorConflict {
        owner: String,
        field: String,
        accessor: String,
        existing: ConflictSource,
        span: Span,
    },
}

/// What an accessor name collided with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictSource {
    /// A hand-written method with a different shape.
    ExistingMethod,
    /// An accessor planned earlier in the same round for another field.
    PlannedAccessor { field: String },
}

impl std::fmt::Display for ConflictSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictSource::ExistingMethod => write!(f, "a different method with that name already exists"),
            ConflictSource::PlannedAccessor { field } => {
                write!(f, "the same name is already generated for field '{}'", field)
            }
        }
    }
}

impl SynthError {
    pub fn span(&self) -> Span {
        match self {
            SynthError::MissingType { span, .. }
            | SynthError::VoidType { span, .. }
            | SynthError::InvalidFieldName { span, .. }
            | SynthError::AccessorConflict { span, .. } => *span,
        }
    }

    /// Convert into the shared diagnostic record, carrying the miette help text as a hint.
    pub fn to_compile_error(&self) -> CompileError {
        let err = CompileError::synthesis(self.to_string(), self.span());
        match self.help() {
            Some(help) => err.with_hint(help.to_string()),
            None => err,
        }
    }
}

impl From<SynthError> for CompileError {
    fn from(err: SynthError) -> Self {
        err.to_compile_error()
    }
}
