//! datagen code formatter
//!
//! Prints a parsed compilation unit back as canonical source:
//! - 4-space indentation
//! - Double quotes for strings
//! - One blank line between top-level declarations and between non-field members
//! - Consecutive imports and consecutive fields stay grouped
//!
//! Formatting is idempotent: formatting already-formatted output changes nothing.

mod config;
mod formatter;
mod writer;

pub use config::{FormatConfig, QuoteStyle};
pub use formatter::Formatter;

use datagen_syntax::ast::CompilationUnit;
use datagen_syntax::diagnostics::CompileError;

/// Format an already parsed unit
pub fn format_unit(unit: &CompilationUnit, config: &FormatConfig) -> String {
    Formatter::new(config.clone()).format(unit)
}

/// Format datagen source code with default settings
pub fn format_source(source: &str) -> Result<String, Vec<CompileError>> {
    format_source_with_config(source, FormatConfig::default())
}

/// Format datagen source code with custom configuration
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn format_source_with_config(source: &str, config: FormatConfig) -> Result<String, Vec<CompileError>> {
    let unit = datagen_syntax::parse_source(source)?;
    Ok(Formatter::new(config).format(&unit))
}

/// Check if source code is already formatted
pub fn check_formatted(source: &str) -> Result<bool, Vec<CompileError>> {
    let formatted = format_source(source)?;
    Ok(source == formatted)
}

/// Get the diff between original and formatted source
pub fn format_diff(source: &str) -> Result<Option<String>, Vec<CompileError>> {
    let formatted = format_source(source)?;

    if source == formatted {
        return Ok(None);
    }

    Ok(Some(line_diff(source, &formatted)))
}

/// Simple line-by-line diff
pub fn line_diff(original: &str, updated: &str) -> String {
    let mut diff = String::new();
    let original_lines: Vec<&str> = original.lines().collect();
    let updated_lines: Vec<&str> = updated.lines().collect();

    let max_lines = original_lines.len().max(updated_lines.len());

    for i in 0..max_lines {
        let orig = original_lines.get(i).copied().unwrap_or("");
        let new = updated_lines.get(i).copied().unwrap_or("");

        if orig != new {
            if !orig.is_empty() {
                diff.push_str(&format!("-{:4} | {}\n", i + 1, orig));
            }
            if !new.is_empty() {
                diff.push_str(&format!("+{:4} | {}\n", i + 1, new));
            }
        }
    }

    diff
}
