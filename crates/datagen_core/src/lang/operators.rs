//! Operator vocabulary.
//!
//! Canonical operator set with precedence, associativity and fixity. The parser's precedence ladder
//! and the source printer both read from this table.
//!
//! ## Examples
//! ```rust
//! use datagen_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("&&"), Some(OperatorId::AndAnd));
//! assert!(operators::info_for(OperatorId::Star).precedence > operators::info_for(OperatorId::Plus).precedence);
//! ```

use super::registry::{Since, Stability};

/// How operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    None,
}

/// Whether an operator is infix (binary) or prefix (unary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
    /// Both prefix and infix forms exist (`-`).
    Both,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    AndAnd,
    OrOr,
    Bang,

    // Assignment
    Eq,
}

/// Metadata for an operator.
///
/// ## Notes
/// - `precedence` is relative: higher binds tighter. `0` marks non-expression operators (assignment).
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
    pub fixity: Fixity,
    pub since: Since,
    pub stability: Stability,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    op(OperatorId::OrOr, "||", 10, Associativity::Left, Fixity::Infix),
    op(OperatorId::AndAnd, "&&", 20, Associativity::Left, Fixity::Infix),
    op(OperatorId::EqEq, "==", 30, Associativity::None, Fixity::Infix),
    op(OperatorId::NotEq, "!=", 30, Associativity::None, Fixity::Infix),
    op(OperatorId::Lt, "<", 30, Associativity::None, Fixity::Infix),
    op(OperatorId::LtEq, "<=", 30, Associativity::None, Fixity::Infix),
    op(OperatorId::Gt, ">", 30, Associativity::None, Fixity::Infix),
    op(OperatorId::GtEq, ">=", 30, Associativity::None, Fixity::Infix),
    op(OperatorId::Plus, "+", 50, Associativity::Left, Fixity::Infix),
    op(OperatorId::Minus, "-", 50, Associativity::Left, Fixity::Both),
    op(OperatorId::Star, "*", 60, Associativity::Left, Fixity::Infix),
    op(OperatorId::Slash, "/", 60, Associativity::Left, Fixity::Infix),
    op(OperatorId::Percent, "%", 60, Associativity::Left, Fixity::Infix),
    op(OperatorId::Bang, "!", 70, Associativity::Right, Fixity::Prefix),
    op(OperatorId::Eq, "=", 0, Associativity::Right, Fixity::Infix),
];

/// Canonical spelling.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Resolve an operator spelling to its identifier.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

// --- helpers -----------------------------------------------------------------

const fn op(
    id: OperatorId,
    spelling: &'static str,
    precedence: u8,
    associativity: Associativity,
    fixity: Fixity,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        associativity,
        fixity,
        since: Since(0, 1),
        stability: Stability::Stable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_operators_bind_looser_than_comparison() {
        let or = info_for(OperatorId::OrOr).precedence;
        let and = info_for(OperatorId::AndAnd).precedence;
        let eq = info_for(OperatorId::EqEq).precedence;
        assert!(or < and && and < eq);
    }

    #[test]
    fn spellings_resolve() {
        for o in OPERATORS {
            assert_eq!(from_str(o.spelling), Some(o.id));
        }
        assert_eq!(from_str("**"), None);
    }
}
