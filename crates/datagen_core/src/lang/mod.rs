//! Datagen language vocabulary registries.
//!
//! This module is the "front door" for language-level vocabulary: reserved keywords, operators,
//! punctuation, builtin types, and the naming conventions used by accessor synthesis.
//!
//! Callers work with **stable IDs** (e.g. `KeywordId`, `OperatorId`) and look up spellings and
//! metadata via registry tables instead of comparing strings at every call site.
//!
//! ## Notes
//! - Registries are **pure**: no AST types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and metadata for shared use (diagnostics,
//!   formatting, Rust emission).
//!
//! ## Examples
//! ```rust
//! use datagen_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("class"), Some(KeywordId::Class));
//! assert_eq!(keywords::as_str(KeywordId::Class), "class");
//! ```

pub mod conventions;
pub mod keywords;
pub mod operators;
pub mod punctuation;
pub mod registry;
pub mod rust_keywords;
pub mod types;
