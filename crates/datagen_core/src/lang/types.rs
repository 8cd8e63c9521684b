//! Builtin type vocabulary.
//!
//! The source language has a handful of builtin type names. This registry records their spelling,
//! generic arity, and how the Rust backend lowers them.
//!
//! ## Notes
//! - Type names that are not in this registry are user types and are emitted as-is.
//! - `is_copy` drives whether the Rust backend clones a field read (`return this.name;`).
//!
//! ## Examples
//! ```rust
//! use datagen_core::lang::types::{self, BuiltinTypeId};
//!
//! assert_eq!(types::from_str("Int"), Some(BuiltinTypeId::Int));
//! assert_eq!(types::info_for(BuiltinTypeId::List).rust_path, "Vec");
//! assert!(types::info_for(BuiltinTypeId::Int).is_copy);
//! ```

/// Stable identifier for every builtin type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinTypeId {
    Int,
    Float,
    Bool,
    String,
    List,
    Map,
    Set,
    Option,
}

/// Metadata for a builtin type.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinTypeInfo {
    pub id: BuiltinTypeId,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    /// Number of generic arguments the type expects.
    pub arity: usize,
    /// Rust path used by the backend (without generic arguments).
    pub rust_path: &'static str,
    pub is_copy: bool,
}

/// Registry of builtin types.
pub const BUILTIN_TYPES: &[BuiltinTypeInfo] = &[
    ty(BuiltinTypeId::Int, "Int", &["int", "Long", "long"], 0, "i64", true),
    ty(BuiltinTypeId::Float, "Float", &["float", "Double", "double"], 0, "f64", true),
    ty(BuiltinTypeId::Bool, "Bool", &["bool", "boolean", "Boolean"], 0, "bool", true),
    ty(BuiltinTypeId::String, "String", &["str"], 0, "String", false),
    ty(BuiltinTypeId::List, "List", &[], 1, "Vec", false),
    ty(BuiltinTypeId::Map, "Map", &["Dict"], 2, "std::collections::HashMap", false),
    ty(BuiltinTypeId::Set, "Set", &[], 1, "std::collections::HashSet", false),
    ty(BuiltinTypeId::Option, "Option", &["Optional"], 1, "Option", false),
];

/// Canonical spelling.
pub fn as_str(id: BuiltinTypeId) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: BuiltinTypeId) -> &'static BuiltinTypeInfo {
    BUILTIN_TYPES
        .iter()
        .find(|t| t.id == id)
        .expect("builtin type info missing")
}

/// Lookup by spelling (canonical or alias).
pub fn from_str(s: &str) -> Option<BuiltinTypeId> {
    BUILTIN_TYPES
        .iter()
        .find(|t| {
            let aliases: &[&str] = t.aliases;
            t.canonical == s || aliases.contains(&s)
        })
        .map(|t| t.id)
}

// --- helpers -----------------------------------------------------------------

const fn ty(
    id: BuiltinTypeId,
    canonical: &'static str,
    aliases: &'static [&'static str],
    arity: usize,
    rust_path: &'static str,
    is_copy: bool,
) -> BuiltinTypeInfo {
    BuiltinTypeInfo {
        id,
        canonical,
        aliases,
        arity,
        rust_path,
        is_copy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_canonical() {
        assert_eq!(from_str("boolean"), Some(BuiltinTypeId::Bool));
        assert_eq!(from_str("Dict"), Some(BuiltinTypeId::Map));
        assert_eq!(from_str("Person"), None);
    }

    #[test]
    fn only_scalars_are_copy() {
        let copy: Vec<_> = BUILTIN_TYPES.iter().filter(|t| t.is_copy).map(|t| t.id).collect();
        assert_eq!(copy, vec![BuiltinTypeId::Int, BuiltinTypeId::Float, BuiltinTypeId::Bool]);
    }
}
