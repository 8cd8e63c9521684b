//! Define the reserved keyword vocabulary for the datagen source language.
//!
//! This module is the single source of truth for reserved words: a stable identifier
//! ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that records canonical spellings,
//! aliases, categories and provenance.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**, except where explicit aliases are defined.
//! - This registry is **pure** (no AST/IO/side effects).
//!
//! ## Examples
//! ```rust
//! use datagen_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("this"), Some(KeywordId::This));
//! assert_eq!(keywords::from_str("self"), Some(KeywordId::This)); // alias
//! assert_eq!(keywords::as_str(KeywordId::This), "this");
//! ```

use super::registry::{Example, Since, Stability};

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Control flow / statements
    If,
    Else,
    While,
    Return,
    Let,

    // Definitions / declarations
    Class,
    Fn,
    New,
    Init,
    Import,

    // Modifiers
    Pub,
    Priv,

    // Receivers / types
    This,
    Void,

    // Literals
    True,
    False,
    Null,
}

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    ControlFlow,
    Definition,
    Modifier,
    Receiver,
    Literal,
}

/// Metadata for a keyword.
///
/// ## Notes
/// - `canonical` is the preferred spelling for docs and for the source printer.
/// - `aliases` are additional spellings accepted by the lexer.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub category: KeywordCategory,
    pub since: Since,
    pub stability: Stability,
    pub examples: &'static [Example],
}

/// Registry of all reserved keywords.
pub const KEYWORDS: &[KeywordInfo] = &[
    info(KeywordId::If, "if", &[], KeywordCategory::ControlFlow),
    info(KeywordId::Else, "else", &[], KeywordCategory::ControlFlow),
    info(KeywordId::While, "while", &[], KeywordCategory::ControlFlow),
    info(KeywordId::Return, "return", &[], KeywordCategory::ControlFlow),
    info(KeywordId::Let, "let", &["var"], KeywordCategory::ControlFlow),
    info(KeywordId::Class, "class", &[], KeywordCategory::Definition),
    info(KeywordId::Fn, "fn", &[], KeywordCategory::Definition),
    info(KeywordId::New, "new", &[], KeywordCategory::Definition),
    info(KeywordId::Init, "init", &[], KeywordCategory::Definition),
    info(KeywordId::Import, "import", &[], KeywordCategory::Definition),
    info(KeywordId::Pub, "pub", &["public"], KeywordCategory::Modifier),
    info(KeywordId::Priv, "priv", &["private"], KeywordCategory::Modifier),
    info(KeywordId::This, "this", &["self"], KeywordCategory::Receiver),
    info(KeywordId::Void, "void", &[], KeywordCategory::Receiver),
    info(KeywordId::True, "true", &[], KeywordCategory::Literal),
    info(KeywordId::False, "false", &[], KeywordCategory::Literal),
    info(KeywordId::Null, "null", &[], KeywordCategory::Literal),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Accepted alias spellings.
pub fn aliases(id: KeywordId) -> &'static [&'static str] {
    info_for(id).aliases
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling (canonical or alias).
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling matches this registry.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    if let Some(k) = KEYWORDS.iter().find(|k| k.canonical == s) {
        return Some(k.id);
    }
    KEYWORDS
        .iter()
        .find(|k| {
            let aliases: &[&str] = k.aliases;
            aliases.contains(&s)
        })
        .map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: KeywordId,
    canonical: &'static str,
    aliases: &'static [&'static str],
    category: KeywordCategory,
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        aliases,
        category,
        since: Since(0, 1),
        stability: Stability::Stable,
        examples: &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_keyword_round_trips_through_its_spelling() {
        for k in KEYWORDS {
            assert_eq!(from_str(k.canonical), Some(k.id));
            for alias in k.aliases {
                assert_eq!(from_str(alias), Some(k.id), "alias {alias}");
            }
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(from_str("Class"), None);
        assert_eq!(from_str("NULL"), None);
    }

    #[test]
    fn spellings_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for k in KEYWORDS {
            assert!(seen.insert(k.canonical), "duplicate keyword {}", k.canonical);
            for alias in k.aliases {
                assert!(seen.insert(alias), "duplicate alias {alias}");
            }
        }
    }
}
