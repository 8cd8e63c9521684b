//! Shareable metadata for `datagen_core::lang` registries.
//!
//! Every vocabulary in [`crate::lang`] is a `const` table of small `Copy` records. This module
//! holds the metadata types those records have in common.
//!
//! ## Notes
//! - Metadata is meant for tooling, docs and diagnostics; enforcement of syntax rules lives in the
//!   lexer/parser.

/// Language version a vocabulary item is available since, as `(major, minor)`.
///
/// ## Examples
/// ```rust
/// use datagen_core::lang::registry::Since;
///
/// assert!(Since(0, 2) > Since(0, 1));
/// assert_eq!(Since(0, 1).to_string(), "0.1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Since(pub u16, pub u16);

impl std::fmt::Display for Since {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.0, self.1)
    }
}

/// Lifecycle status of a vocabulary item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Draft,
    Deprecated,
}

/// A small example snippet for documentation.
///
/// ## Examples
/// ```rust
/// use datagen_core::lang::registry::Example;
///
/// let ex = Example {
///     code: "@Data\nclass Point { x: Int; }",
///     note: Some("Marker on a class."),
/// };
/// assert!(ex.code.contains("class"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Example {
    pub code: &'static str,
    pub note: Option<&'static str>,
}
