//! CLI module for datagen
//!
//! This module provides the command-line interface for the accessor synthesizer.
//!
//! ## Commands
//!
//! - `expand <file>` - Expand `@Data` types and print (or rewrite) the source
//! - `emit-rust <file>` - Expand and lower to Rust
//! - `fmt [path]` - Format datagen source files
//! - `check <file>` - Run the pass and report diagnostics (also the default for a bare `<file>`)
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::synth::{ConflictPolicy, SynthConfig};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Accessor synthesis for `@Data` classes
#[derive(Parser, Debug)]
#[command(name = "datagen")]
#[command(version = VERSION)]
#[command(about = "Synthesize getters and setters for @Data classes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to check (default action when no subcommand given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub synth: SynthArgs,

    // Debug/development flags
    /// Tokenize only (debug)
    #[arg(long = "lex", value_name = "FILE", conflicts_with = "file")]
    pub lex_file: Option<PathBuf>,

    /// Parse only (debug)
    #[arg(long = "parse", value_name = "FILE", conflicts_with = "file")]
    pub parse_file: Option<PathBuf>,
}

/// Options of the synthesis pass, shared by every command that runs it.
#[derive(Args, Debug, Clone)]
pub struct SynthArgs {
    /// Marker annotation that requests accessors (bare or dotted name)
    #[arg(long, value_name = "NAME", default_value = "Data", global = true)]
    pub marker: String,

    /// What to do when an accessor name is already taken: error or skip
    #[arg(
        long = "on-conflict",
        value_name = "POLICY",
        default_value = "error",
        value_parser = parse_conflict_policy,
        global = true
    )]
    pub on_conflict: ConflictPolicy,

    /// Upper bound on processing rounds
    #[arg(long = "max-rounds", value_name = "N", default_value_t = 8, global = true)]
    pub max_rounds: usize,
}

impl SynthArgs {
    pub fn to_config(&self) -> SynthConfig {
        SynthConfig::new()
            .with_marker(self.marker.clone())
            .with_conflict_policy(self.on_conflict)
            .with_max_rounds(self.max_rounds)
    }
}

fn parse_conflict_policy(s: &str) -> Result<ConflictPolicy, String> {
    s.parse()
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Expand tagged classes and print the resulting source
    Expand {
        /// Source file to expand
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Rewrite the file in place instead of printing
        #[arg(long)]
        write: bool,
    },

    /// Expand and emit Rust source
    EmitRust {
        /// Source file to lower
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Format datagen source files
    Fmt {
        /// File or directory to format
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,
        /// Check formatting without modifying files
        #[arg(long)]
        check: bool,
        /// Show diff of formatting changes
        #[arg(long)]
        diff: bool,
    },

    /// Run the pass and report diagnostics without writing anything
    Check {
        /// Source file to check
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    // Handle debug flags first
    if let Some(file) = cli.lex_file {
        return commands::lex_file(&file.to_string_lossy());
    }
    if let Some(file) = cli.parse_file {
        return commands::parse_file(&file.to_string_lossy());
    }

    let config = cli.synth.to_config();
    match cli.command {
        Some(Command::Expand { file, write }) => commands::expand_file(&file.to_string_lossy(), write, &config),
        Some(Command::EmitRust { file }) => commands::emit_rust(&file.to_string_lossy(), &config),
        Some(Command::Fmt { path, check, diff }) => commands::format_files(&path.to_string_lossy(), check, diff),
        Some(Command::Check { file }) => commands::check_file(&file.to_string_lossy(), &config),
        None => {
            // Default: check the file if provided
            if let Some(file) = cli.file {
                commands::check_file(&file.to_string_lossy(), &config)
            } else {
                // No command and no file - show help
                Err(CliError::failure("No input file given; run 'datagen --help' for usage"))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_expand() {
        let cli = Cli::try_parse_from(["datagen", "expand", "person.dg", "--write"]).unwrap();
        if let Some(Command::Expand { write, .. }) = cli.command {
            assert!(write);
        } else {
            panic!("Expected Expand command");
        }
    }

    #[test]
    fn test_cli_parse_emit_rust() {
        let cli = Cli::try_parse_from(["datagen", "emit-rust", "person.dg"]).unwrap();
        assert!(matches!(cli.command, Some(Command::EmitRust { .. })));
    }

    #[test]
    fn test_cli_parse_fmt() {
        let cli = Cli::try_parse_from(["datagen", "fmt", "src/", "--check"]).unwrap();
        if let Some(Command::Fmt { check, diff, .. }) = cli.command {
            assert!(check);
            assert!(!diff);
        } else {
            panic!("Expected Fmt command");
        }
    }

    #[test]
    fn test_cli_default_file_is_check() {
        let cli = Cli::try_parse_from(["datagen", "person.dg"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.file, Some(PathBuf::from("person.dg")));
    }

    #[test]
    fn test_cli_synth_flags() {
        let cli = Cli::try_parse_from([
            "datagen",
            "check",
            "a.dg",
            "--marker",
            "app.Bean",
            "--on-conflict",
            "skip",
            "--max-rounds",
            "3",
        ])
        .unwrap();
        let config = cli.synth.to_config();
        assert_eq!(config.marker, "app.Bean");
        assert_eq!(config.conflict_policy, ConflictPolicy::Skip);
        assert_eq!(config.max_rounds, 3);
    }

    #[test]
    fn test_cli_synth_defaults() {
        let cli = Cli::try_parse_from(["datagen", "a.dg"]).unwrap();
        assert_eq!(cli.synth.to_config(), SynthConfig::default());
    }

    #[test]
    fn test_cli_rejects_unknown_policy() {
        assert!(Cli::try_parse_from(["datagen", "a.dg", "--on-conflict", "merge"]).is_err());
    }

    #[test]
    fn test_cli_parse_debug_flags() {
        let cli = Cli::try_parse_from(["datagen", "--lex", "a.dg"]).unwrap();
        assert!(cli.lex_file.is_some());

        let cli = Cli::try_parse_from(["datagen", "--parse", "a.dg"]).unwrap();
        assert!(cli.parse_file.is_some());
    }
}
