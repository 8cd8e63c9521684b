//! Lexer for the datagen source language
//!
//! Handles tokenization including:
//! - Keywords (class, fn, new, init, import, this, ...)
//! - Identifiers and literals (int, float, string)
//! - Operators and punctuation (`&&`, `<=`, `@`, `;`, ...)
//! - Line (`//`) and block (`/* */`) comments
//!
//! The language is brace-delimited, so whitespace and newlines are insignificant and never
//! produce tokens.

pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::Span;
use crate::diagnostics::{CompileError, errors};
use datagen_core::lang::operators::OperatorId;
use datagen_core::lang::punctuation::PunctuationId;

/// Lexer for datagen source code.
///
/// Errors are collected rather than returned eagerly so a single run reports every bad
/// character or literal in the file.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    tokens: Vec<Token>,
    errors: Vec<CompileError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<CompileError>> {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(self.current_pos, self.current_pos),
        ));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next();
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            ' ' | '\t' | '\r' | '\n' => {}

            '/' => self.scan_slash(start),

            // Operators
            '+' => self.add_op(OperatorId::Plus, start),
            '-' => self.add_op(OperatorId::Minus, start),
            '*' => self.add_op(OperatorId::Star, start),
            '%' => self.add_op(OperatorId::Percent, start),
            '=' => self.operator(start, OperatorId::Eq, &[('=', OperatorId::EqEq)]),
            '!' => self.operator(start, OperatorId::Bang, &[('=', OperatorId::NotEq)]),
            '<' => self.operator(start, OperatorId::Lt, &[('=', OperatorId::LtEq)]),
            '>' => self.operator(start, OperatorId::Gt, &[('=', OperatorId::GtEq)]),
            '&' => self.doubled(start, '&', OperatorId::AndAnd),
            '|' => self.doubled(start, '|', OperatorId::OrOr),

            // Punctuation
            ',' => self.add_punct(PunctuationId::Comma, start),
            ':' => self.add_punct(PunctuationId::Colon, start),
            ';' => self.add_punct(PunctuationId::Semicolon, start),
            '@' => self.add_punct(PunctuationId::At, start),
            '.' => self.add_punct(PunctuationId::Dot, start),
            '(' => self.add_punct(PunctuationId::LParen, start),
            ')' => self.add_punct(PunctuationId::RParen, start),
            '[' => self.add_punct(PunctuationId::LBracket, start),
            ']' => self.add_punct(PunctuationId::RBracket, start),
            '{' => self.add_punct(PunctuationId::LBrace, start),
            '}' => self.add_punct(PunctuationId::RBrace, start),

            '"' | '\'' => self.scan_string(start, c),

            '0'..='9' => self.scan_number(start),

            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => {
                self.errors
                    .push(errors::unexpected_character(c, Span::new(start, self.current_pos)));
            }
        }
    }

    // ========================================================================
    // Operator helpers
    // ========================================================================

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    fn add_op(&mut self, id: OperatorId, start: usize) {
        self.add_token(TokenKind::Operator(id), start);
    }

    fn add_punct(&mut self, id: PunctuationId, start: usize) {
        self.add_token(TokenKind::Punctuation(id), start);
    }

    /// Try to match compound operator, fallback to simple.
    fn operator(&mut self, start: usize, simple: OperatorId, compounds: &[(char, OperatorId)]) {
        for (c, id) in compounds {
            if self.match_char(*c) {
                self.add_op(*id, start);
                return;
            }
        }
        self.add_op(simple, start);
    }

    /// `&&` / `||`: the single-character form is not an operator.
    fn doubled(&mut self, start: usize, c: char, id: OperatorId) {
        if self.match_char(c) {
            self.add_op(id, start);
        } else {
            self.errors
                .push(errors::unexpected_character(c, Span::new(start, self.current_pos)));
        }
    }

    /// Scan `/`, `// comment`, or `/* comment */`.
    fn scan_slash(&mut self, start: usize) {
        if self.match_char('/') {
            while let Some(c) = self.peek() {
                if c == '\n' {
                    break;
                }
                self.advance();
            }
        } else if self.match_char('*') {
            loop {
                match self.advance() {
                    Some('*') if self.peek() == Some('/') => {
                        self.advance();
                        return;
                    }
                    Some(_) => {}
                    None => {
                        self.errors
                            .push(errors::unterminated_comment(Span::new(start, self.current_pos)));
                        return;
                    }
                }
            }
        } else {
            self.add_op(OperatorId::Slash, start);
        }
    }

    // ========================================================================
    // Literals
    // ========================================================================

    fn scan_string(&mut self, start: usize, quote: char) {
        let mut value = String::new();
        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    self.add_token(TokenKind::String(value), start);
                    return;
                }
                Some('\\') => match self.advance() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('0') => value.push('\0'),
                    Some('\\') => value.push('\\'),
                    Some('"') => value.push('"'),
                    Some('\'') => value.push('\''),
                    Some(other) => {
                        self.errors.push(CompileError::syntax(
                            format!("Unknown escape sequence '\\{}'", other),
                            Span::new(self.current_pos - other.len_utf8() - 1, self.current_pos),
                        ));
                    }
                    None => break,
                },
                Some('\n') | None => break,
                Some(c) => value.push(c),
            }
        }
        self.errors
            .push(errors::unterminated_string(Span::new(start, self.current_pos)));
    }

    fn scan_number(&mut self, start: usize) {
        self.eat_digits();

        let mut is_float = false;
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance();
            self.eat_digits();
        }

        let text: String = self.source[start..self.current_pos].chars().filter(|c| *c != '_').collect();
        let span = Span::new(start, self.current_pos);
        if is_float {
            match text.parse::<f64>() {
                Ok(v) => self.add_token(TokenKind::Float(v), start),
                Err(_) => self
                    .errors
                    .push(CompileError::syntax(format!("Invalid float literal '{}'", text), span)),
            }
        } else {
            match text.parse::<i64>() {
                Ok(v) => self.add_token(TokenKind::Int(v), start),
                Err(_) => self.errors.push(errors::integer_out_of_range(&text, span)),
            }
        }
    }

    fn eat_digits(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.current_pos];

        if let Some(id) = keyword_id(spelling) {
            self.add_token(TokenKind::Keyword(id), start);
        } else {
            self.add_token(TokenKind::Ident(spelling.to_string()), start);
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Tokenize `source`.
///
/// ## Errors
/// Returns every lexical error found in the file.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<CompileError>> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use datagen_core::lang::keywords::KeywordId;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_annotated_class_header() {
        assert_eq!(
            kinds("@Data class Person {"),
            vec![
                TokenKind::Punctuation(PunctuationId::At),
                TokenKind::Ident("Data".into()),
                TokenKind::Keyword(KeywordId::Class),
                TokenKind::Ident("Person".into()),
                TokenKind::Punctuation(PunctuationId::LBrace),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_compound_operators() {
        assert_eq!(
            kinds("a <= b && !c || d != e"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Operator(OperatorId::LtEq),
                TokenKind::Ident("b".into()),
                TokenKind::Operator(OperatorId::AndAnd),
                TokenKind::Operator(OperatorId::Bang),
                TokenKind::Ident("c".into()),
                TokenKind::Operator(OperatorId::OrOr),
                TokenKind::Ident("d".into()),
                TokenKind::Operator(OperatorId::NotEq),
                TokenKind::Ident("e".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("a // line\n/* block\n comment */ b"),
            vec![TokenKind::Ident("a".into()), TokenKind::Ident("b".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            kinds(r#"42 1_000 3.5 "hi\n" 'x'"#),
            vec![
                TokenKind::Int(42),
                TokenKind::Int(1000),
                TokenKind::Float(3.5),
                TokenKind::String("hi\n".into()),
                TokenKind::String("x".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_member_access_after_int_is_not_float() {
        assert_eq!(
            kinds("1.x"),
            vec![
                TokenKind::Int(1),
                TokenKind::Punctuation(PunctuationId::Dot),
                TokenKind::Ident("x".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keyword_aliases() {
        assert_eq!(
            kinds("public self"),
            vec![
                TokenKind::Keyword(KeywordId::Pub),
                TokenKind::Keyword(KeywordId::This),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let tokens = lex("  name: String;").unwrap();
        assert_eq!(tokens[0].span, Span::new(2, 6));
        assert_eq!(tokens[2].span, Span::new(8, 14));
    }

    #[test]
    fn test_errors_are_collected() {
        let errs = lex("a # b & c").unwrap_err();
        assert_eq!(errs.len(), 2);
        assert!(errs[0].message.contains("'#'"));
        assert!(errs[1].message.contains("'&'"));
    }

    #[test]
    fn test_unterminated_string_and_comment() {
        let errs = lex("\"abc\n").unwrap_err();
        assert!(errs[0].message.contains("Unterminated string"));
        let errs = lex("/* never closed").unwrap_err();
        assert!(errs[0].message.contains("Unterminated block comment"));
    }

    #[test]
    fn test_integer_overflow() {
        let errs = lex("99999999999999999999").unwrap_err();
        assert!(errs[0].message.contains("does not fit"));
    }
}
