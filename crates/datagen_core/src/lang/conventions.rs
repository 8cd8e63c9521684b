//! Shared naming conventions (well-known identifiers and accessor names).
//!
//! Accessor names are built from a kind prefix and the field name with its first character
//! title-cased. The title-case rule is deliberately narrow: only an initial lower-case ASCII
//! letter is upper-cased. Every other first character (upper-case letters, `_`, digits, non-ASCII)
//! is left alone, and the rest of the name is never touched.
//!
//! ## Examples
//! ```rust
//! use datagen_core::lang::conventions::{self, AccessorKind};
//!
//! assert_eq!(conventions::accessor_name(AccessorKind::Getter, "id"), "getId");
//! assert_eq!(conventions::accessor_name(AccessorKind::Setter, "URL"), "setURL");
//! assert_eq!(conventions::accessor_name(AccessorKind::Getter, "_name"), "get_name");
//! ```

use std::borrow::Cow;

/// Prefix for synthesized getters.
pub const GET_PREFIX: &str = "get";

/// Prefix for synthesized setters.
pub const SET_PREFIX: &str = "set";

/// Default marker annotation that requests accessor synthesis.
pub const DEFAULT_MARKER: &str = "Data";

/// Receiver keyword spelling used in synthesized bodies.
pub const RECEIVER_NAME: &str = "this";

/// Constructor member name.
pub const CONSTRUCTOR_NAME: &str = "new";

/// Entry point function name.
pub const ENTRYPOINT_NAME: &str = "main";

/// Which accessor a name is being built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Getter,
    Setter,
}

impl AccessorKind {
    /// Name prefix for this accessor kind.
    pub fn prefix(self) -> &'static str {
        match self {
            AccessorKind::Getter => GET_PREFIX,
            AccessorKind::Setter => SET_PREFIX,
        }
    }
}

/// Upper-case the first character of `name` if, and only if, it is in `a..=z`.
///
/// Borrows when nothing changes.
pub fn titlecase(name: &str) -> Cow<'_, str> {
    match name.as_bytes().first() {
        Some(first) if first.is_ascii_lowercase() => {
            let mut out = String::with_capacity(name.len());
            out.push(first.to_ascii_uppercase() as char);
            out.push_str(&name[1..]);
            Cow::Owned(out)
        }
        _ => Cow::Borrowed(name),
    }
}

/// Build the accessor method name for a field.
pub fn accessor_name(kind: AccessorKind, field: &str) -> String {
    let mut out = String::with_capacity(kind.prefix().len() + field.len());
    out.push_str(kind.prefix());
    out.push_str(&titlecase(field));
    out
}

/// Return `true` if `name` is a valid identifier in the source language.
///
/// Identifiers start with an ASCII letter or `_` and continue with ASCII alphanumerics or `_`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        _ => false,
    }
}
