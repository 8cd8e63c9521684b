//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These reduce repetitive `matches!(...)` at call sites when working with ID-based tokens.

use crate::lexer::{Token, TokenKind};
use datagen_core::lang::keywords::KeywordId;
use datagen_core::lang::operators::OperatorId;
use datagen_core::lang::punctuation::PunctuationId;

impl TokenKind {
    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    /// Return `true` if this is the given operator.
    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Identifier spelling, if this is an identifier token.
    pub fn ident(&self) -> Option<&str> {
        match self {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        }
    }
}

impl Token {
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        self.kind.is_keyword(id)
    }

    pub fn is_operator(&self, id: OperatorId) -> bool {
        self.kind.is_operator(id)
    }

    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        self.kind.is_punctuation(id)
    }
}
