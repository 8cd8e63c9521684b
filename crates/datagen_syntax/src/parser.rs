//! Parser for the datagen source language
//!
//! Converts a token stream into a [`CompilationUnit`].
//!
//! ## Examples
//!
//! ```rust,no_run
//! use datagen_syntax::{lexer, parser};
//!
//! let source = "@Data class Person { name: String; age: Int; }";
//! let tokens = lexer::lex(source).unwrap();
//! let unit = parser::parse(&tokens).unwrap();
//! assert_eq!(unit.declarations.len(), 1);
//! ```

use crate::ast::*;
use crate::diagnostics::{CompileError, errors};
use crate::lexer::{Token, TokenKind};
use datagen_core::lang::keywords::KeywordId;
use datagen_core::lang::operators::OperatorId;
use datagen_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
