//! Provide canonical language vocabulary and pure naming helpers for the datagen toolchain.
//!
//! This crate is intentionally small and dependency-free. Both the syntax frontend (lexer/parser) and the accessor
//! synthesis pass depend on it, so spellings and naming rules are defined exactly once.
//!
//! ## Notes
//!
//! - This is a "vocabulary core" crate: **no IO**, no global state, and no AST types.
//! - Current scope: reserved words, operators, punctuation, builtin types, and accessor naming conventions.

pub mod lang;
