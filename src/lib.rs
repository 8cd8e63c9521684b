#![forbid(unsafe_code)]
//! datagen: accessor synthesis for `@Data` classes
//!
//! A compile-time pass that finds classes tagged with the `@Data` marker and appends a public
//! getter and setter for every field, using the `get<Field>` / `set<Field>` naming convention.
//! The crate provides the pass ([`synth`]), a source formatter ([`format`]) that prints expanded
//! units back as source, a Rust lowering ([`backend`]), and the command-line front end ([`cli`]).
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod backend;
pub mod cli;
pub mod format;
pub mod synth;

pub use datagen_syntax::{ast, diagnostics, lexer, parser};

pub use backend::{EmitError, RustEmitter};
pub use format::{FormatConfig, check_formatted, format_diff, format_source, format_source_with_config};
pub use synth::{ConflictPolicy, SynthConfig, expand_source};
