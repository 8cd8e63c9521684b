//! Shared syntax frontend for the datagen source language: lexer, parser, AST, diagnostics.
//!
//! ## Notes
//! - This crate is "syntax-only": it does not resolve names, check types or synthesize members.
//! - Vocabulary identity (keywords/operators/punctuation) comes from `datagen_core::lang` registries.
//!
//! ## Examples
//! ```rust,no_run
//! use datagen_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("@Data class Person { name: String; }").unwrap();
//! let unit = parser::parse(&tokens).unwrap();
//! assert_eq!(unit.declarations.len(), 1);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;

/// Lex and parse `source` in one step.
///
/// ## Errors
/// Returns every lexer error, or every parser error if lexing succeeded.
pub fn parse_source(source: &str) -> Result<ast::CompilationUnit, Vec<diagnostics::CompileError>> {
    let tokens = lexer::lex(source)?;
    parser::parse(&tokens)
}
