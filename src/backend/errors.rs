//! Errors raised while lowering a compilation unit to Rust.
//!
//! These are *backend* failures: the unit parsed and expanded fine, but uses something the Rust
//! emitter cannot express. Messages name the construct so the user knows what to change.

use thiserror::Error;

/// Error during Rust emission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    #[error("syn parse error: {0}")]
    SynParse(String),
    #[error("unsupported: {0}")]
    Unsupported(String),
    #[error("'{0}' cannot be used as a Rust identifier")]
    InvalidIdent(String),
}
