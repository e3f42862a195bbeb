//! Lazy token stream over a source buffer.
//!
//! `Scanner` exposes `take_*`/`peek_*` character-level combinators over the
//! cursor, and `next_token` is an ordered if-let-else-continue dispatch loop
//! over JavaScript keywords and symbols, with regex/division disambiguation
//! and embedded ASP.NET `<% %>` blocks handled as their own branches.

pub mod keywords;
pub mod unicode;

use crate::diagnostics::{ErrorDetails, ScannerErrorKind, Severity};
use crate::span::{FileId, Span};
use std::fmt::Debug;

/// The kind of a single token. `Display` comes from `strum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum TokenKind {
    // Keywords
    Break, Case, Catch, Continue, Debugger, Default, Delete, Do, Else, Finally,
    For, Function, If, In, InstanceOf, New, Return, Switch, This, Throw, Try,
    TypeOf, Var, Void, While, With,
    NullLiteral, TrueLiteral, FalseLiteral,

    // Punctuators
    UnsignedRightShiftAssign, StrictEquals, StrictNotEquals, UnsignedRightShift,
    LeftShiftAssign, RightShiftAssign, ExponentAssign, Equals, NotEquals,
    LessThanEquals, GreaterThanEquals, LogicalAnd, LogicalOr, NullishCoalesce,
    Increment, Decrement, LeftShift, RightShift, PlusAssign, MinusAssign,
    MultiplyAssign, DivideAssign, ModuloAssign, BitwiseAndAssign, BitwiseOrAssign,
    BitwiseXorAssign, Exponent, Arrow, OptionalChain,
    LeftBrace, RightBrace, LeftParen, RightParen, LeftBracket, RightBracket,
    Dot, Semicolon, Comma, LessThan, GreaterThan, Plus, Minus, Multiply, Divide,
    Modulo, BitwiseAnd, BitwiseOr, BitwiseXor, LogicalNot, BitwiseNot, Question,
    Colon, Assign,

    // Literals / names
    Identifier,
    NumericLiteral,
    StringLiteral,
    RegexLiteral,
    TemplateLiteral,

    // Structural
    LineTerminator,
    Comment,
    ImportantComment,
    AspNetBlock,
    PreprocessorComment,
    Eof,
}

impl TokenKind {
    /// Whether a token of this kind can end an expression, meaning a `/`
    /// immediately following it starts a division rather than a regex
    /// literal.
    pub fn ends_expression(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::NumericLiteral
                | TokenKind::StringLiteral
                | TokenKind::RegexLiteral
                | TokenKind::TemplateLiteral
                | TokenKind::NullLiteral
                | TokenKind::TrueLiteral
                | TokenKind::FalseLiteral
                | TokenKind::This
                | TokenKind::RightParen
                | TokenKind::RightBracket
                | TokenKind::Increment
                | TokenKind::Decrement
        )
    }
}

/// A scanned token: its kind, source span, and exact text (so the Output
/// Visitor and diagnostics can recover the original spelling, e.g. for
/// surrogate-pair identifiers).
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Where in the source this token was found.
    pub span: Span,
    /// The raw source text of the token.
    pub text: String,
    /// True if at least one line terminator appeared between this token and
    /// the previous one. Consulted by the parser for ASI.
    pub preceded_by_line_terminator: bool,
}

/// Lazy cursor over a source buffer, producing one [`Token`] per call to
/// [`Scanner::next_token`]. Holds no backtracking state: the parser supplies
/// one-token lookahead itself.
pub struct Scanner<'a> {
    file: FileId,
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: u32,
    column: u32,
    allow_aspnet_blocks: bool,
}

impl<'a> Scanner<'a> {
    /// Build a scanner over `source`, tagging every span with `file`.
    pub fn new(file: FileId, source: &'a str, allow_aspnet_blocks: bool) -> Self {
        Scanner {
            file,
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
            column: 0,
            allow_aspnet_blocks,
        }
    }

    /// Whether the cursor has consumed the entire source.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn advance_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn starts_with(&self, needle: &str) -> bool {
        self.source[self.pos..].starts_with(needle)
    }

    fn here(&self) -> (usize, u32, u32) {
        (self.pos, self.line, self.column)
    }

    fn span_from(&self, start: (usize, u32, u32)) -> Span {
        Span {
            file: self.file,
            start_offset: start.0 as u32,
            end_offset: self.pos as u32,
            start_line: start.1,
            start_column: start.2,
            end_line: self.line,
            end_column: self.column,
        }
    }

    fn error(&self, start: (usize, u32, u32), kind: ScannerErrorKind) -> ErrorDetails<'a, ScannerErrorKind> {
        ErrorDetails {
            source_name: "<input>".to_string().into_boxed_str(),
            source_content: self.source,
            span: self.span_from(start),
            kind,
            severity: Severity::Error,
            code: "JS1100",
        }
    }

    fn skip_whitespace_and_count_newlines(&mut self) -> bool {
        let mut saw_newline = false;
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                saw_newline = true;
                self.advance_char();
            } else if c.is_whitespace() {
                self.advance_char();
            } else {
                break;
            }
        }
        saw_newline
    }

    fn take_line_comment(&mut self) -> Option<(Span, String)> {
        if !self.starts_with("//") {
            return None;
        }
        let start = self.here();
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            self.advance_char();
        }
        let span = self.span_from(start);
        Some((span, self.source[span.start_offset as usize..span.end_offset as usize].to_string()))
    }

    /// Scans a `/* ... */` comment, classifying it as important (`/*! */`,
    /// preserved verbatim when `preserve_important_comments` is set) or
    /// conditional-compilation.
    fn take_block_comment(&mut self) -> Result<Option<(Span, String, bool, bool)>, ErrorDetails<'a, ScannerErrorKind>> {
        if !self.starts_with("/*") {
            return Ok(None);
        }
        let start = self.here();
        self.advance_char();
        self.advance_char();
        let is_important = self.peek_char() == Some('!');
        let is_cc = self.peek_char() == Some('@');
        loop {
            if self.starts_with("*/") {
                self.advance_char();
                self.advance_char();
                let span = self.span_from(start);
                let text = self.source[span.start_offset as usize..span.end_offset as usize].to_string();
                return Ok(Some((span, text, is_important, is_cc)));
            }
            if self.advance_char().is_none() {
                return Err(self.error(start, ScannerErrorKind::UnterminatedComment));
            }
        }
    }

    fn take_aspnet_block(&mut self) -> Result<Option<(Span, String)>, ErrorDetails<'a, ScannerErrorKind>> {
        if !self.allow_aspnet_blocks || !self.starts_with("<%") {
            return Ok(None);
        }
        let start = self.here();
        self.advance_char();
        self.advance_char();
        loop {
            if self.starts_with("%>") {
                self.advance_char();
                self.advance_char();
                let span = self.span_from(start);
                let text = self.source[span.start_offset as usize..span.end_offset as usize].to_string();
                return Ok(Some((span, text)));
            }
            if self.advance_char().is_none() {
                return Err(self.error(start, ScannerErrorKind::UnexpectedEndOfSource));
            }
        }
    }

    fn take_string_literal(&mut self) -> Result<Option<(Span, String)>, ErrorDetails<'a, ScannerErrorKind>> {
        let quote = match self.peek_char() {
            Some(c @ ('"' | '\'')) => c,
            _ => return Ok(None),
        };
        let start = self.here();
        self.advance_char();
        loop {
            match self.peek_char() {
                None | Some('\n') => return Err(self.error(start, ScannerErrorKind::UnterminatedString)),
                Some('\\') => {
                    self.advance_char();
                    if self.advance_char().is_none() {
                        return Err(self.error(start, ScannerErrorKind::UnterminatedString));
                    }
                }
                Some(c) if c == quote => {
                    self.advance_char();
                    break;
                }
                Some(_) => {
                    self.advance_char();
                }
            }
        }
        let span = self.span_from(start);
        let text = self.source[span.start_offset as usize..span.end_offset as usize].to_string();
        Ok(Some((span, text)))
    }

    fn take_regex_literal(&mut self) -> Result<Option<(Span, String)>, ErrorDetails<'a, ScannerErrorKind>> {
        if self.peek_char() != Some('/') {
            return Ok(None);
        }
        let start = self.here();
        self.advance_char();
        let mut in_class = false;
        loop {
            match self.peek_char() {
                None | Some('\n') => return Err(self.error(start, ScannerErrorKind::UnterminatedRegex)),
                Some('\\') => {
                    self.advance_char();
                    if self.advance_char().is_none() {
                        return Err(self.error(start, ScannerErrorKind::UnterminatedRegex));
                    }
                }
                Some('[') => {
                    in_class = true;
                    self.advance_char();
                }
                Some(']') => {
                    in_class = false;
                    self.advance_char();
                }
                Some('/') if !in_class => {
                    self.advance_char();
                    break;
                }
                Some(_) => {
                    self.advance_char();
                }
            }
        }
        // trailing flags
        while matches!(self.peek_char(), Some(c) if c.is_ascii_alphabetic()) {
            self.advance_char();
        }
        let span = self.span_from(start);
        let text = self.source[span.start_offset as usize..span.end_offset as usize].to_string();
        Ok(Some((span, text)))
    }

    fn take_numeric_literal(&mut self) -> Option<(Span, String)> {
        let c = self.peek_char()?;
        if !(c.is_ascii_digit() || (c == '.' && matches!(self.peek_byte_at(1), Some(b) if b.is_ascii_digit()))) {
            return None;
        }
        let start = self.here();
        if c == '0' && matches!(self.peek_byte_at(1), Some(b'x') | Some(b'X')) {
            self.advance_char();
            self.advance_char();
            while matches!(self.peek_char(), Some(c) if c.is_ascii_hexdigit()) {
                self.advance_char();
            }
            let span = self.span_from(start);
            return Some((span, self.source[span.start_offset as usize..span.end_offset as usize].to_string()));
        }
        while matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
            self.advance_char();
        }
        if self.peek_char() == Some('.') {
            self.advance_char();
            while matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
                self.advance_char();
            }
        }
        if matches!(self.peek_char(), Some('e') | Some('E')) {
            self.advance_char();
            if matches!(self.peek_char(), Some('+') | Some('-')) {
                self.advance_char();
            }
            while matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
                self.advance_char();
            }
        }
        let span = self.span_from(start);
        Some((span, self.source[span.start_offset as usize..span.end_offset as usize].to_string()))
    }

    fn take_identifier(&mut self) -> Option<(Span, String)> {
        let c = self.peek_char()?;
        if !unicode::is_identifier_start(c) {
            return None;
        }
        let start = self.here();
        self.advance_char();
        while matches!(self.peek_char(), Some(c) if unicode::is_identifier_part(c)) {
            self.advance_char();
        }
        let span = self.span_from(start);
        Some((span, self.source[span.start_offset as usize..span.end_offset as usize].to_string()))
    }

    fn take_punctuator(&mut self) -> Option<(Span, TokenKind, String)> {
        let start = self.here();
        for (text, kind) in keywords::PUNCTUATORS {
            if self.starts_with(text) {
                for _ in 0..text.chars().count() {
                    self.advance_char();
                }
                let span = self.span_from(start);
                return Some((span, *kind, (*text).to_string()));
            }
        }
        None
    }

    /// Produce the next token. `expression_allowed` is the parser-maintained
    /// mode bit: true when a `/` here would start a regex literal rather than
    /// a division operator.
    pub fn next_token(&mut self, expression_allowed: bool) -> Result<Token, ErrorDetails<'a, ScannerErrorKind>> {
        let mut preceded_by_line_terminator = false;
        loop {
            preceded_by_line_terminator |= self.skip_whitespace_and_count_newlines();

            if self.is_empty() {
                let start = self.here();
                return Ok(Token {
                    kind: TokenKind::Eof,
                    span: self.span_from(start),
                    text: String::new(),
                    preceded_by_line_terminator,
                });
            }

            if let Some((span, text)) = self.take_line_comment() {
                preceded_by_line_terminator |= self.skip_whitespace_and_count_newlines();
                let _ = (span, text);
                continue;
            }

            if let Some((span, text, is_important, is_cc)) = self.take_block_comment()? {
                if is_cc {
                    return Ok(Token {
                        kind: TokenKind::PreprocessorComment,
                        span,
                        text,
                        preceded_by_line_terminator,
                    });
                }
                if is_important {
                    return Ok(Token {
                        kind: TokenKind::ImportantComment,
                        span,
                        text,
                        preceded_by_line_terminator,
                    });
                }
                continue;
            }

            if let Some((span, text)) = self.take_aspnet_block()? {
                return Ok(Token {
                    kind: TokenKind::AspNetBlock,
                    span,
                    text,
                    preceded_by_line_terminator,
                });
            }

            if let Some((span, text)) = self.take_string_literal()? {
                return Ok(Token {
                    kind: TokenKind::StringLiteral,
                    span,
                    text,
                    preceded_by_line_terminator,
                });
            }

            if expression_allowed {
                if let Some((span, text)) = self.take_regex_literal()? {
                    return Ok(Token {
                        kind: TokenKind::RegexLiteral,
                        span,
                        text,
                        preceded_by_line_terminator,
                    });
                }
            }

            if let Some((span, text)) = self.take_numeric_literal() {
                return Ok(Token {
                    kind: TokenKind::NumericLiteral,
                    span,
                    text,
                    preceded_by_line_terminator,
                });
            }

            if let Some((span, text)) = self.take_identifier() {
                let kind = keywords::KEYWORDS
                    .get(text.as_str())
                    .copied()
                    .unwrap_or(TokenKind::Identifier);
                return Ok(Token {
                    kind,
                    span,
                    text,
                    preceded_by_line_terminator,
                });
            }

            if let Some((span, kind, text)) = self.take_punctuator() {
                return Ok(Token {
                    kind,
                    span,
                    text,
                    preceded_by_line_terminator,
                });
            }

            let start = self.here();
            let bad = self.advance_char().unwrap_or('\u{0}');
            return Err(self.error(start, ScannerErrorKind::InvalidCharacter { character: bad }));
        }
    }
}

/// Pure predicate: is `s` a syntactically valid identifier?
pub fn is_valid_identifier(s: &str) -> bool {
    unicode::is_valid_identifier(s)
}

/// Pure predicate: is `s` a reserved word? `strict` additionally rejects the
/// future-reserved-word set.
pub fn is_keyword(s: &str, strict: bool) -> bool {
    keywords::KEYWORDS.contains_key(s) || (strict && keywords::FUTURE_RESERVED_WORDS.contains(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_all(src: &str) -> Vec<TokenKind> {
        let mut scanner = Scanner::new(0, src, false);
        let mut kinds = Vec::new();
        let mut expr_allowed = true;
        loop {
            let token = scanner.next_token(expr_allowed).expect("scan error");
            expr_allowed = !token.kind.ends_expression();
            if token.kind == TokenKind::Eof {
                break;
            }
            kinds.push(token.kind);
        }
        kinds
    }

    #[test]
    fn scans_simple_function_call() {
        let kinds = scan_all("f(2);");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::LeftParen,
                TokenKind::NumericLiteral,
                TokenKind::RightParen,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn division_after_identifier_not_regex() {
        let mut scanner = Scanner::new(0, "a/b", false);
        let first = scanner.next_token(true).unwrap();
        assert_eq!(first.kind, TokenKind::Identifier);
        let second = scanner.next_token(!first.kind.ends_expression()).unwrap();
        assert_eq!(second.kind, TokenKind::Divide);
    }

    #[test]
    fn regex_after_assignment() {
        let mut scanner = Scanner::new(0, "=/abc/g", false);
        let first = scanner.next_token(true).unwrap();
        assert_eq!(first.kind, TokenKind::Assign);
        let second = scanner.next_token(!first.kind.ends_expression()).unwrap();
        assert_eq!(second.kind, TokenKind::RegexLiteral);
        assert_eq!(second.text, "/abc/g");
    }

    #[test]
    fn unterminated_string_reports_error() {
        let mut scanner = Scanner::new(0, "\"abc", false);
        assert!(scanner.next_token(true).is_err());
    }

    #[test]
    fn important_comment_is_a_token() {
        let mut scanner = Scanner::new(0, "/*! keep me */x", false);
        let first = scanner.next_token(true).unwrap();
        assert_eq!(first.kind, TokenKind::ImportantComment);
        assert_eq!(first.text, "/*! keep me */");
    }

    #[test]
    fn keyword_lookup_matches_exact_identifier() {
        assert!(is_keyword("return", false));
        assert!(!is_keyword("returns", false));
        assert!(is_keyword("let", true));
        assert!(!is_keyword("let", false));
    }
}
