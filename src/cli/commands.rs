//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Path, PathBuf};

use datagen_syntax::diagnostics::{self, CompileError};
use datagen_syntax::{lexer, parser};

use crate::backend::RustEmitter;
use crate::format::{FormatConfig, format_diff, format_source, format_unit};
use crate::synth::{Expansion, Reporter, SynthConfig, TracingReporter, expand_source};

use super::{CliError, CliResult, ExitCode};

/// Source file extension picked up by `fmt` when walking directories.
const SOURCE_EXTENSION: &str = "dg";

/// Maximum source file size (10 MB)
///
/// Files larger than this are rejected before being read into memory.
const MAX_SOURCE_SIZE: u64 = 10 * 1024 * 1024;

/// Read a source file, enforcing [`MAX_SOURCE_SIZE`].
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (10 MB)
pub fn read_source(file_path: &str) -> CliResult<String> {
    // Check file size before reading
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

fn render_errors(file_path: &str, source: &str, errors: &[CompileError]) -> CliError {
    CliError::failure(diagnostics::format_errors(file_path, source, errors))
}

/// Parse and expand `file_path`, failing on syntax errors.
fn expand(file_path: &str, config: &SynthConfig) -> CliResult<(String, Expansion)> {
    let source = read_source(file_path)?;
    let expansion = expand_source(&source, config).map_err(|errs| render_errors(file_path, &source, &errs))?;
    Ok((source, expansion))
}

/// Route pass diagnostics: notes go to the log, errors become a rendered CLI failure.
fn report_diagnostics(file_path: &str, source: &str, expansion: &Expansion) -> CliResult<()> {
    let mut log = TracingReporter::new();
    let mut errors = Vec::new();
    for diagnostic in &expansion.diagnostics {
        if diagnostic.is_error() {
            errors.push(diagnostic.clone());
        } else {
            log.report(diagnostic.clone());
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(render_errors(file_path, source, &errors))
    }
}

/// Lex and display tokens.
pub fn lex_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lexer::lex(&source).map_err(|errs| render_errors(file_path, &source, &errs))?;

    for tok in &tokens {
        println!("{:?}", tok);
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse and display AST.
pub fn parse_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lexer::lex(&source).map_err(|errs| render_errors(file_path, &source, &errs))?;
    let unit = parser::parse(&tokens).map_err(|errs| render_errors(file_path, &source, &errs))?;

    println!("{:#?}", unit);
    Ok(ExitCode::SUCCESS)
}

/// Run the pass and report what it did, without writing anything.
pub fn check_file(file_path: &str, config: &SynthConfig) -> CliResult<ExitCode> {
    let (source, expansion) = expand(file_path, config)?;
    report_diagnostics(file_path, &source, &expansion)?;

    let outcome = expansion.outcome;
    println!(
        "✓ {}: {} type(s) expanded, {} accessor(s) synthesized",
        file_path, outcome.types_processed, outcome.methods_added
    );
    Ok(ExitCode::SUCCESS)
}

/// Expand tagged classes and print the result, or rewrite the file with `--write`.
pub fn expand_file(file_path: &str, write: bool, config: &SynthConfig) -> CliResult<ExitCode> {
    let (source, expansion) = expand(file_path, config)?;
    report_diagnostics(file_path, &source, &expansion)?;

    let expanded = format_unit(&expansion.unit, &FormatConfig::default());
    if !write {
        print!("{}", expanded);
        return Ok(ExitCode::SUCCESS);
    }

    if expanded == source {
        println!("✓ {} already expanded", file_path);
        return Ok(ExitCode::SUCCESS);
    }
    fs::write(file_path, &expanded).map_err(|e| CliError::failure(format!("Error writing {}: {}", file_path, e)))?;
    println!(
        "Expanded: {} ({} accessor(s) added)",
        file_path, expansion.outcome.methods_added
    );
    Ok(ExitCode::SUCCESS)
}

/// Expand and print the Rust lowering.
pub fn emit_rust(file_path: &str, config: &SynthConfig) -> CliResult<ExitCode> {
    let (source, expansion) = expand(file_path, config)?;
    report_diagnostics(file_path, &source, &expansion)?;

    let mut emitter = RustEmitter::new();
    let rust_code = emitter
        .emit(&expansion.unit)
        .map_err(|e| CliError::failure(format!("Code generation error: {}", e)))?;
    print!("{}", rust_code);
    Ok(ExitCode::SUCCESS)
}

/// Format datagen source files.
pub fn format_files(path: &str, check_mode: bool, diff_mode: bool) -> CliResult<ExitCode> {
    let path = Path::new(path);
    let files = collect_source_files(path);

    if files.is_empty() {
        return Err(CliError::failure(format!("No .{} files found", SOURCE_EXTENSION)));
    }

    let mut needs_formatting = false;
    let mut formatted_count = 0;
    let mut error_count = 0;

    for file_path in &files {
        let display = file_path.display().to_string();
        let source = match read_source(&display) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{}", e);
                error_count += 1;
                continue;
            }
        };

        match format_source(&source) {
            Ok(formatted) => {
                let changed = source != formatted;

                if diff_mode && changed {
                    println!("--- {}", display);
                    if let Ok(Some(diff)) = format_diff(&source) {
                        print!("{}", diff);
                    }
                    println!();
                }

                if check_mode {
                    if changed {
                        println!("Would reformat: {}", display);
                        needs_formatting = true;
                    }
                } else if diff_mode {
                    if changed {
                        needs_formatting = true;
                    }
                } else if changed {
                    if let Err(e) = fs::write(file_path, &formatted) {
                        eprintln!("Error writing {}: {}", display, e);
                        error_count += 1;
                    } else {
                        println!("Formatted: {}", display);
                        formatted_count += 1;
                    }
                }
            }
            Err(errs) => {
                eprintln!("{}", diagnostics::format_errors(&display, &source, &errs));
                error_count += 1;
            }
        }
    }

    if check_mode || diff_mode {
        if needs_formatting {
            let msg = if diff_mode {
                "need formatting"
            } else {
                "would be reformatted"
            };
            return Err(CliError::failure(format!("\n{} file(s) {}", files.len(), msg)));
        } else {
            println!("✓ {} file(s) already formatted", files.len());
        }
    } else {
        println!("\n✓ {} file(s) formatted, {} error(s)", formatted_count, error_count);
    }

    if error_count > 0 {
        return Err(CliError::new("", ExitCode::FAILURE));
    }

    Ok(ExitCode::SUCCESS)
}

fn has_source_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

fn collect_source_files(path: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if path.is_file() {
        if has_source_extension(path) {
            files.push(path.to_path_buf());
        }
    } else if path.is_dir() {
        if let Ok(entries) = fs::read_dir(path) {
            for entry in entries.flatten() {
                let entry_path = entry.path();
                if entry_path.is_dir() {
                    let name = entry_path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                    if !name.starts_with('.') && name != "target" && name != "node_modules" {
                        files.extend(collect_source_files(&entry_path));
                    }
                } else if has_source_extension(&entry_path) {
                    files.push(entry_path);
                }
            }
        }
    }

    files.sort();
    files
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("datagen-cli-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source("/definitely/not/here.dg").unwrap_err();
        assert!(err.message.contains("Cannot access file"), "{}", err.message);
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }

    #[test]
    fn test_collect_source_files_skips_hidden_and_target() {
        let dir = scratch_dir("collect");
        fs::write(dir.join("a.dg"), "class A {}\n").unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();
        fs::create_dir_all(dir.join("target")).unwrap();
        fs::write(dir.join("target").join("b.dg"), "class B {}\n").unwrap();
        fs::create_dir_all(dir.join(".cache")).unwrap();
        fs::write(dir.join(".cache").join("c.dg"), "class C {}\n").unwrap();
        fs::create_dir_all(dir.join("model")).unwrap();
        fs::write(dir.join("model").join("d.dg"), "class D {}\n").unwrap();

        let files = collect_source_files(&dir);
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.dg", "d.dg"]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_expand_write_rewrites_file_once() {
        let dir = scratch_dir("expand");
        let file = dir.join("person.dg");
        fs::write(&file, "@Data\nclass Person {\n    name: String;\n}\n").unwrap();
        let path = file.to_string_lossy().to_string();

        expand_file(&path, true, &SynthConfig::default()).unwrap();
        let expanded = fs::read_to_string(&file).unwrap();
        assert!(expanded.contains("pub fn getName(): String"), "{expanded}");
        assert!(expanded.contains("pub fn setName(name: String)"), "{expanded}");

        expand_file(&path, true, &SynthConfig::default()).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), expanded);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_check_file_reports_synthesis_errors() {
        let dir = scratch_dir("check");
        let file = dir.join("bad.dg");
        fs::write(&file, "@Data class A { x; }\n").unwrap();

        let err = check_file(&file.to_string_lossy(), &SynthConfig::default()).unwrap_err();
        assert!(err.message.contains("x"), "{}", err.message);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_format_files_check_mode() {
        let dir = scratch_dir("fmt");
        fs::write(dir.join("messy.dg"), "class A{x:Int;}").unwrap();

        let err = format_files(&dir.to_string_lossy(), true, false).unwrap_err();
        assert!(err.message.contains("would be reformatted"));

        format_files(&dir.to_string_lossy(), false, false).unwrap();
        format_files(&dir.to_string_lossy(), true, false).unwrap();

        fs::remove_dir_all(&dir).unwrap();
    }
}
