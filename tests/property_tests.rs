//! Property-based tests for datagen
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use datagen::format::{FormatConfig, format_source, format_unit};
use datagen::synth::{SynthConfig, expand_source};
use datagen_core::lang::conventions::titlecase;
use datagen_core::lang::keywords;
use proptest::collection::btree_set;
use proptest::prelude::*;

// =============================================================================
// Titlecase Properties
// =============================================================================

proptest! {
    /// Property: only the first character may change, and only from `a..=z` to `A..=Z`
    #[test]
    fn titlecase_changes_at_most_the_first_char(name in "\\PC{0,16}") {
        let out = titlecase(&name);
        prop_assert_eq!(out.len(), name.len());

        let mut original = name.chars();
        let mut updated = out.chars();
        match (original.next(), updated.next()) {
            (Some(a), Some(b)) if a.is_ascii_lowercase() => prop_assert_eq!(b, a.to_ascii_uppercase()),
            (a, b) => prop_assert_eq!(a, b),
        }
        prop_assert_eq!(original.as_str(), updated.as_str());
    }

    /// Property: titlecase is idempotent
    #[test]
    fn titlecase_is_idempotent(name in "\\PC{0,16}") {
        let once = titlecase(&name).into_owned();
        prop_assert_eq!(titlecase(&once), once.as_str());
    }
}

// =============================================================================
// Expansion Properties
// =============================================================================

const FIELD_TYPES: &[&str] = &["Int", "Float", "Bool", "String", "List<Int>", "Map<String, Float>"];

/// Field names start lower-case so no two of them produce the same accessor name.
fn field_names() -> impl Strategy<Value = Vec<String>> {
    btree_set("[a-z][a-z0-9_]{0,8}", 1..6).prop_map(|names| {
        names
            .into_iter()
            .filter(|n| keywords::from_str(n).is_none())
            .collect()
    })
}

fn data_class() -> impl Strategy<Value = (String, usize)> {
    (field_names(), proptest::collection::vec(0..FIELD_TYPES.len(), 6)).prop_map(|(names, types)| {
        let mut source = String::from("@Data\nclass Generated {\n");
        for (name, ty) in names.iter().zip(types.iter().cycle()) {
            source.push_str(&format!("    {}: {};\n", name, FIELD_TYPES[*ty]));
        }
        source.push_str("}\n");
        (source, names.len())
    })
}

proptest! {
    /// Property: every field gets exactly one getter and one setter
    #[test]
    fn expansion_adds_two_methods_per_field((source, fields) in data_class()) {
        let expansion = expand_source(&source, &SynthConfig::default()).unwrap();
        prop_assert!(!expansion.has_errors(), "{:?}", expansion.diagnostics);
        prop_assert_eq!(expansion.outcome.methods_added, fields * 2);
    }

    /// Property: expand, format, re-parse and expand again is stable
    #[test]
    fn expand_format_expand_is_stable((source, _) in data_class()) {
        let config = SynthConfig::default();
        let format = FormatConfig::default();

        let first = expand_source(&source, &config).unwrap();
        let printed = format_unit(&first.unit, &format);

        let second = expand_source(&printed, &config).unwrap();
        prop_assert!(!second.has_errors(), "{:?}", second.diagnostics);
        prop_assert_eq!(second.outcome.methods_added, 0);
        prop_assert_eq!(format_unit(&second.unit, &format), printed);
    }

    /// Property: formatting is idempotent on expanded output
    #[test]
    fn format_is_idempotent((source, _) in data_class()) {
        let expansion = expand_source(&source, &SynthConfig::default()).unwrap();
        let printed = format_unit(&expansion.unit, &FormatConfig::default());
        prop_assert_eq!(format_source(&printed).unwrap(), printed);
    }
}
