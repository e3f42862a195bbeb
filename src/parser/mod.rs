//! Recursive-descent parser producing an [`Arena`]-backed AST.
//!
//! A struct holding the token cursor plus `at_token`/`consume_token`/
//! helper-method dispatch style, with arena indices standing in for an
//! intrusive-pointer tree. The parsing discipline — one-token lookahead,
//! `expect`-and-recover on mismatch, small per-construct helper methods — is
//! the same shape recursive-descent parsers converge on regardless of the
//! source language.

pub mod expressions;
pub mod statements;

use crate::ast::{Arena, Node, NodeId};
use crate::diagnostics::{ErrorDetails, ParserErrorKind, ScannerErrorKind, Severity};
use crate::preprocessor::DefineTable;
use crate::scanner::{Scanner, Token, TokenKind};
use crate::settings::Settings;
use crate::span::{FileId, Span};

/// Owns the Scanner, the AST arena under construction, and all parser-local
/// state (one-token lookahead, the regex/division mode bit, preprocessor
/// define table, accumulated diagnostics). One parser instance serves one
/// parse session.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    source: &'a str,
    file: FileId,
    settings: &'a Settings,
    lookahead: Token,
    /// Whether the *next* token request should allow a regex literal; updated after every token is consumed based on whether that
    /// token `ends_expression()`.
    expression_allowed: bool,
    defines: DefineTable,
    /// True once a function-body boundary has been entered, so `return` can
    /// be validated.
    in_function: bool,
    /// True once a loop or switch body has been entered, so bare `break`
    /// (without a label) can be validated.
    in_loop_or_switch: bool,
    pub(crate) arena: Arena,
    pub(crate) errors: Vec<ErrorDetails<'a, ParserErrorKind>>,
    /// Lexical errors surfaced while scanning, kept separate from syntactic
    /// ones since they carry a distinct [`ScannerErrorKind`].
    pub(crate) lexical_errors: Vec<ErrorDetails<'a, ScannerErrorKind>>,
}

impl<'a> Parser<'a> {
    /// Build a parser over `source`, seeding its conditional-compilation
    /// define table from `settings.preprocessor_defines`.
    pub fn new(file: FileId, source: &'a str, settings: &'a Settings) -> Self {
        let mut scanner = Scanner::new(file, source, settings.allow_embedded_aspnet_blocks);
        let lookahead = scanner
            .next_token(true)
            .unwrap_or_else(|_| synthetic_eof(file));
        Parser {
            scanner,
            source,
            file,
            settings,
            lookahead,
            expression_allowed: true,
            defines: DefineTable::from_map(&settings.preprocessor_defines),
            in_function: false,
            in_loop_or_switch: false,
            arena: Arena::new(),
            errors: Vec::new(),
            lexical_errors: Vec::new(),
        }
    }

    fn bump(&mut self) -> Token {
        self.expression_allowed = !self.lookahead.kind.ends_expression();
        let current = self.lookahead.clone();
        self.lookahead = self
            .scan_next()
            .unwrap_or_else(|| synthetic_eof(self.file));
        current
    }

    fn scan_next(&mut self) -> Option<Token> {
        match self.scanner.next_token(self.expression_allowed) {
            Ok(token) => Some(token),
            Err(err) => {
                let span = err.span;
                self.lexical_errors.push(err);
                Some(Token {
                    kind: TokenKind::Eof,
                    span,
                    text: String::new(),
                    preceded_by_line_terminator: true,
                })
            }
        }
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.lookahead.kind == kind
    }

    fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.lookahead.kind)
    }

    /// Consume the lookahead if it matches `kind`, reporting an error and
    /// synthesizing a zero-width placeholder token otherwise so parsing can
    /// continue.
    fn expect(&mut self, kind: TokenKind) -> Token {
        if self.at(kind) {
            self.bump()
        } else {
            self.error(ParserErrorKind::UnexpectedToken {
                expected: vec![kind],
                found: self.lookahead.kind,
            });
            Token {
                kind,
                span: self.lookahead.span,
                text: String::new(),
                preceded_by_line_terminator: self.lookahead.preceded_by_line_terminator,
            }
        }
    }

    fn error(&mut self, kind: ParserErrorKind) {
        self.errors.push(ErrorDetails {
            source_name: "<input>".to_string().into_boxed_str(),
            source_content: self.source,
            span: self.lookahead.span,
            kind,
            severity: Severity::Error,
            code: "JS1200",
        });
    }

    /// Skip tokens until a statement boundary (`;`, `}`, or a statement-start
    /// keyword) so a subsequent parse attempt has a fresh footing.
    fn synchronize(&mut self) {
        loop {
            match self.lookahead.kind {
                TokenKind::Semicolon => {
                    self.bump();
                    return;
                }
                TokenKind::RightBrace | TokenKind::Eof => return,
                TokenKind::Var
                | TokenKind::If
                | TokenKind::For
                | TokenKind::While
                | TokenKind::Do
                | TokenKind::Return
                | TokenKind::Function
                | TokenKind::Switch
                | TokenKind::Try
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Throw => return,
                _ => {
                    self.bump();
                }
            }
        }
    }

    fn alloc(&mut self, node: Node, span: Span) -> NodeId {
        self.arena.alloc(node, span)
    }

    /// ASI: a `;` is present, implied before `}`/EOF, or
    /// implied when a line terminator intervened before an otherwise
    /// mandatory separator.
    fn consume_semicolon_with_asi(&mut self) {
        if self.at(TokenKind::Semicolon) {
            self.bump();
            return;
        }
        if self.at(TokenKind::RightBrace) || self.at(TokenKind::Eof) {
            return;
        }
        if self.lookahead.preceded_by_line_terminator {
            return;
        }
        self.error(ParserErrorKind::MissingExpectedToken { expected: ";" });
    }

    /// Parse a full program, producing `parse(settings) -> Block`.
    /// Consumes the parser; returns the arena, the root block id, and every
    /// diagnostic accumulated along the way.
    pub fn parse(mut self) -> (Arena, NodeId, ParseDiagnostics<'a>) {
        let start = self.lookahead.span;
        let mut body = Vec::new();
        while !self.at(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                body.push(stmt);
            }
        }
        let end_span = self.lookahead.span;
        let root = self.alloc(Node::Statement(crate::ast::Stmt::Block { body }), start.merge(end_span));
        self.arena.set_root(root);
        for child in self.arena.node(root).children() {
            self.arena.set_parent(child, root);
        }
        (
            self.arena,
            root,
            ParseDiagnostics { lexical: self.lexical_errors, syntax: self.errors },
        )
    }

    /// Parse a single expression in isolation, producing
    /// `parse_expression(settings) -> Node`, used by host tools and tests.
    pub fn parse_expression_standalone(mut self) -> (Arena, NodeId, ParseDiagnostics<'a>) {
        let expr = self.parse_expression();
        (
            self.arena,
            expr,
            ParseDiagnostics { lexical: self.lexical_errors, syntax: self.errors },
        )
    }

    /// Run only the scanner/preprocessor and return the resulting source with
    /// conditional-compilation directives evaluated away.
    pub fn preprocess_only(mut self) -> (String, ParseDiagnostics<'a>) {
        let mut out = String::new();
        while !self.at(TokenKind::Eof) {
            if !self.lookahead.text.is_empty() {
                out.push_str(&self.lookahead.text);
                out.push(' ');
            }
            self.bump();
        }
        (out, ParseDiagnostics { lexical: self.lexical_errors, syntax: self.errors })
    }
}

/// Every diagnostic a parse produced, split by the subsystem that raised it.
/// Callers needing a single
/// flattened stream map both into [`crate::diagnostics::Diagnostic`] and concatenate.
pub struct ParseDiagnostics<'a> {
    pub lexical: Vec<ErrorDetails<'a, ScannerErrorKind>>,
    pub syntax: Vec<ErrorDetails<'a, ParserErrorKind>>,
}

fn synthetic_eof(file: FileId) -> Token {
    Token {
        kind: TokenKind::Eof,
        span: Span::point(file, 0, 1, 0),
        text: String::new(),
        preceded_by_line_terminator: true,
    }
}
