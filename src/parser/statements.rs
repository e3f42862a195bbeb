//! Statement parsing, ASI, `var`/function hoisting markers, and conditional
//! compilation directive handling.

use super::Parser;
use crate::ast::expressions::FunctionKind;
use crate::ast::statements::{Stmt, SwitchCase, VarDeclarator};
use crate::ast::{Node, NodeId};
use crate::diagnostics::ParserErrorKind;
use crate::preprocessor::{parse_cc_expr, CcValue};
use crate::scanner::TokenKind;

impl<'a> Parser<'a> {
    /// Parse one statement, wrapping single-statement `if`/`while`/`for`/`do`/
    /// `with` bodies in a `Block` so every later pass can assume a uniform
    /// shape. Returns `None` only when recovery consumed a statement's worth
    /// of tokens without producing a node (e.g. a bare stray `}`).
    pub(super) fn parse_statement(&mut self) -> Option<NodeId> {
        let start = self.lookahead.span;
        match self.lookahead.kind {
            TokenKind::LeftBrace => Some(self.parse_block()),
            TokenKind::Var => Some(self.parse_var_statement()),
            TokenKind::If => Some(self.parse_if_statement()),
            TokenKind::For => Some(self.parse_for_statement()),
            TokenKind::While => Some(self.parse_while_statement()),
            TokenKind::Do => Some(self.parse_do_while_statement()),
            TokenKind::Switch => Some(self.parse_switch_statement()),
            TokenKind::Try => Some(self.parse_try_statement()),
            TokenKind::With => Some(self.parse_with_statement()),
            TokenKind::Return => Some(self.parse_return_statement()),
            TokenKind::Break => Some(self.parse_break_statement()),
            TokenKind::Continue => Some(self.parse_continue_statement()),
            TokenKind::Throw => Some(self.parse_throw_statement()),
            TokenKind::Debugger => {
                self.bump();
                self.consume_semicolon_with_asi();
                Some(self.alloc(Node::Statement(Stmt::Debugger), start))
            }
            TokenKind::Semicolon => {
                self.bump();
                Some(self.alloc(Node::Statement(Stmt::Empty), start))
            }
            TokenKind::ImportantComment => {
                let token = self.bump();
                Some(self.alloc(Node::Statement(Stmt::ImportantComment { text: token.text }), token.span))
            }
            TokenKind::PreprocessorComment => self.parse_cc_directive(),
            TokenKind::Function => Some(self.parse_function_declaration()),
            TokenKind::RightBrace => {
                self.error(ParserErrorKind::UnexpectedToken {
                    expected: vec![],
                    found: TokenKind::RightBrace,
                });
                self.synchronize();
                None
            }
            _ => Some(self.parse_expression_statement()),
        }
    }

    pub(super) fn parse_block(&mut self) -> NodeId {
        let start = self.lookahead.span;
        self.expect(TokenKind::LeftBrace);
        let mut body = Vec::new();
        while !self.at(TokenKind::RightBrace) && !self.at(TokenKind::Eof) {
            match self.parse_statement() {
                Some(stmt) => body.push(stmt),
                None => continue,
            }
        }
        let end = self.lookahead.span;
        self.expect(TokenKind::RightBrace);
        let id = self.alloc(Node::Statement(Stmt::Block { body }), start.merge(end));
        self.attach_children(id);
        id
    }

    /// Parse a statement and wrap it in a `Block` if it is not already one.
    fn parse_body_as_block(&mut self) -> NodeId {
        if self.at(TokenKind::LeftBrace) {
            return self.parse_block();
        }
        let start = self.lookahead.span;
        let inner = self.parse_statement();
        let (body, span) = match inner {
            Some(id) => (vec![id], self.arena.span(id)),
            None => (vec![], start),
        };
        let id = self.alloc(Node::Statement(Stmt::Block { body }), span);
        self.attach_children(id);
        id
    }

    /// Parse a function body, establishing a fresh `return`/`break`/`continue`
    /// boundary.
    pub(super) fn parse_function_block(&mut self) -> NodeId {
        let was_in_function = self.in_function;
        let was_in_loop = self.in_loop_or_switch;
        self.in_function = true;
        self.in_loop_or_switch = false;
        let body = self.parse_block();
        self.in_function = was_in_function;
        self.in_loop_or_switch = was_in_loop;
        body
    }

    fn attach_children(&mut self, id: NodeId) {
        for child in self.arena.node(id).children() {
            self.arena.set_parent(child, id);
        }
    }

    fn parse_var_statement(&mut self) -> NodeId {
        let start = self.lookahead.span;
        self.bump();
        let mut declarations: Vec<VarDeclarator> = Vec::new();
        loop {
            let name = self.parse_binding_identifier();
            let init = if self.at(TokenKind::Assign) {
                self.bump();
                Some(self.parse_assignment_expression())
            } else {
                None
            };
            declare_dedup(&mut declarations, name, init);
            if self.at(TokenKind::Comma) {
                self.bump();
                continue;
            }
            break;
        }
        let end = self.lookahead.span;
        self.consume_semicolon_with_asi();
        let id = self.alloc(Node::Statement(Stmt::VarStatement { declarations }), start.merge(end));
        self.attach_children(id);
        id
    }

    pub(super) fn parse_binding_identifier(&mut self) -> String {
        if self.at(TokenKind::Identifier) {
            self.bump().text
        } else {
            self.error(ParserErrorKind::UnexpectedToken {
                expected: vec![TokenKind::Identifier],
                found: self.lookahead.kind,
            });
            String::new()
        }
    }

    fn parse_if_statement(&mut self) -> NodeId {
        let start = self.lookahead.span;
        self.bump();
        self.expect(TokenKind::LeftParen);
        let test = self.parse_expression();
        self.expect(TokenKind::RightParen);
        let consequent = self.parse_body_as_block();
        let alternate = if self.at(TokenKind::Else) {
            self.bump();
            Some(self.parse_body_as_block())
        } else {
            None
        };
        let end = self.arena.span(alternate.unwrap_or(consequent));
        let id = self.alloc(
            Node::Statement(Stmt::IfStatement { test, consequent, alternate }),
            start.merge(end),
        );
        self.attach_children(id);
        id
    }

    fn parse_for_statement(&mut self) -> NodeId {
        let start = self.lookahead.span;
        self.bump();
        self.expect(TokenKind::LeftParen);

        let init = if self.at(TokenKind::Semicolon) {
            None
        } else if self.at(TokenKind::Var) {
            Some(self.parse_var_statement_head())
        } else {
            Some(self.parse_expression())
        };

        if self.at(TokenKind::In) {
            self.bump();
            let left = init.unwrap_or_else(|| self.synthesize_empty_expr());
            let right = self.parse_expression();
            self.expect(TokenKind::RightParen);
            let body = self.parse_body_as_block();
            let end = self.arena.span(body);
            let id = self.alloc(Node::Statement(Stmt::ForInStatement { left, right, body }), start.merge(end));
            self.attach_children(id);
            return id;
        }

        self.expect(TokenKind::Semicolon);
        let test = if self.at(TokenKind::Semicolon) { None } else { Some(self.parse_expression()) };
        self.expect(TokenKind::Semicolon);
        let update = if self.at(TokenKind::RightParen) { None } else { Some(self.parse_expression()) };
        self.expect(TokenKind::RightParen);
        let body = self.parse_body_as_block();
        let end = self.arena.span(body);
        let id = self.alloc(Node::Statement(Stmt::ForStatement { init, test, update, body }), start.merge(end));
        self.attach_children(id);
        id
    }

    /// Parses `var a = 1, b` without consuming a trailing `;`/ASI, for use as
    /// a `for(...)` head. Declarations still hoist normally; the returned id
    /// stands in for the head as an ordinary expression-shaped child slot.
    fn parse_var_statement_head(&mut self) -> NodeId {
        let start = self.lookahead.span;
        self.bump();
        let mut declarations: Vec<VarDeclarator> = Vec::new();
        loop {
            let name = self.parse_binding_identifier();
            let init = if self.at(TokenKind::Assign) {
                self.bump();
                Some(self.parse_assignment_expression_no_in())
            } else {
                None
            };
            declare_dedup(&mut declarations, name, init);
            if self.at(TokenKind::Comma) {
                self.bump();
                continue;
            }
            break;
        }
        let end = self.lookahead.span;
        let id = self.alloc(Node::Statement(Stmt::VarStatement { declarations }), start.merge(end));
        self.attach_children(id);
        id
    }

    fn synthesize_empty_expr(&mut self) -> NodeId {
        let span = self.lookahead.span;
        self.alloc(
            Node::Expression(crate::ast::Expr::Lookup { name: String::new(), binding: None }),
            span,
        )
    }

    fn parse_while_statement(&mut self) -> NodeId {
        let start = self.lookahead.span;
        self.bump();
        self.expect(TokenKind::LeftParen);
        let test = self.parse_expression();
        self.expect(TokenKind::RightParen);
        let was_in_loop = self.in_loop_or_switch;
        self.in_loop_or_switch = true;
        let body = self.parse_body_as_block();
        self.in_loop_or_switch = was_in_loop;
        let end = self.arena.span(body);
        let id = self.alloc(Node::Statement(Stmt::WhileStatement { test, body }), start.merge(end));
        self.attach_children(id);
        id
    }

    fn parse_do_while_statement(&mut self) -> NodeId {
        let start = self.lookahead.span;
        self.bump();
        let was_in_loop = self.in_loop_or_switch;
        self.in_loop_or_switch = true;
        let body = self.parse_body_as_block();
        self.in_loop_or_switch = was_in_loop;
        self.expect(TokenKind::While);
        self.expect(TokenKind::LeftParen);
        let test = self.parse_expression();
        let end = self.lookahead.span;
        self.expect(TokenKind::RightParen);
        self.consume_semicolon_with_asi();
        let id = self.alloc(Node::Statement(Stmt::DoWhileStatement { body, test }), start.merge(end));
        self.attach_children(id);
        id
    }

    fn parse_switch_statement(&mut self) -> NodeId {
        let start = self.lookahead.span;
        self.bump();
        self.expect(TokenKind::LeftParen);
        let discriminant = self.parse_expression();
        self.expect(TokenKind::RightParen);
        self.expect(TokenKind::LeftBrace);
        let was_in_loop = self.in_loop_or_switch;
        self.in_loop_or_switch = true;
        let mut cases = Vec::new();
        while !self.at(TokenKind::RightBrace) && !self.at(TokenKind::Eof) {
            let test = if self.at(TokenKind::Default) {
                self.bump();
                None
            } else {
                self.expect(TokenKind::Case);
                Some(self.parse_expression())
            };
            self.expect(TokenKind::Colon);
            let mut body = Vec::new();
            while !self.at_any(&[TokenKind::Case, TokenKind::Default, TokenKind::RightBrace, TokenKind::Eof]) {
                if let Some(stmt) = self.parse_statement() {
                    body.push(stmt);
                }
            }
            cases.push(SwitchCase { test, body });
        }
        self.in_loop_or_switch = was_in_loop;
        let end = self.lookahead.span;
        self.expect(TokenKind::RightBrace);
        let id = self.alloc(
            Node::Statement(Stmt::SwitchStatement { discriminant, cases }),
            start.merge(end),
        );
        self.attach_children(id);
        id
    }

    fn parse_try_statement(&mut self) -> NodeId {
        let start = self.lookahead.span;
        self.bump();
        let block = self.parse_block();
        let mut catch_param = None;
        let mut handler = None;
        if self.at(TokenKind::Catch) {
            self.bump();
            if self.at(TokenKind::LeftParen) {
                self.bump();
                catch_param = Some(self.parse_binding_identifier());
                self.expect(TokenKind::RightParen);
            }
            handler = Some(self.parse_block());
        }
        let finalizer = if self.at(TokenKind::Finally) {
            self.bump();
            Some(self.parse_block())
        } else {
            None
        };
        let end = self.arena.span(finalizer.or(handler).unwrap_or(block));
        let id = self.alloc(
            Node::Statement(Stmt::TryStatement { block, catch_param, handler, finalizer }),
            start.merge(end),
        );
        self.attach_children(id);
        id
    }

    fn parse_with_statement(&mut self) -> NodeId {
        let start = self.lookahead.span;
        self.bump();
        self.expect(TokenKind::LeftParen);
        let object = self.parse_expression();
        self.expect(TokenKind::RightParen);
        let body = self.parse_body_as_block();
        let end = self.arena.span(body);
        let id = self.alloc(Node::Statement(Stmt::WithStatement { object, body }), start.merge(end));
        self.attach_children(id);
        id
    }

    fn parse_return_statement(&mut self) -> NodeId {
        let start = self.lookahead.span;
        self.bump();
        if !self.in_function {
            self.error(ParserErrorKind::ReturnOutsideFunction);
        }
        let argument = if self.at(TokenKind::Semicolon)
            || self.at(TokenKind::RightBrace)
            || self.at(TokenKind::Eof)
            || self.lookahead.preceded_by_line_terminator
        {
            None
        } else {
            Some(self.parse_expression())
        };
        let end = self.lookahead.span;
        self.consume_semicolon_with_asi();
        let id = self.alloc(Node::Statement(Stmt::Return { argument }), start.merge(end));
        self.attach_children(id);
        id
    }

    fn parse_break_statement(&mut self) -> NodeId {
        let start = self.lookahead.span;
        self.bump();
        let label = self.parse_optional_label();
        if label.is_none() && !self.in_loop_or_switch {
            self.error(ParserErrorKind::MisplacedJumpStatement { keyword: "break" });
        }
        let end = self.lookahead.span;
        self.consume_semicolon_with_asi();
        self.alloc(Node::Statement(Stmt::Break { label }), start.merge(end))
    }

    fn parse_continue_statement(&mut self) -> NodeId {
        let start = self.lookahead.span;
        self.bump();
        let label = self.parse_optional_label();
        if !self.in_loop_or_switch {
            self.error(ParserErrorKind::MisplacedJumpStatement { keyword: "continue" });
        }
        let end = self.lookahead.span;
        self.consume_semicolon_with_asi();
        self.alloc(Node::Statement(Stmt::Continue { label }), start.merge(end))
    }

    fn parse_optional_label(&mut self) -> Option<String> {
        if self.at(TokenKind::Identifier) && !self.lookahead.preceded_by_line_terminator {
            Some(self.bump().text)
        } else {
            None
        }
    }

    fn parse_throw_statement(&mut self) -> NodeId {
        let start = self.lookahead.span;
        self.bump();
        let argument = self.parse_expression();
        let end = self.lookahead.span;
        self.consume_semicolon_with_asi();
        let id = self.alloc(Node::Statement(Stmt::Throw { argument }), start.merge(end));
        self.attach_children(id);
        id
    }

    fn parse_expression_statement(&mut self) -> NodeId {
        let start = self.lookahead.span;
        if self.at(TokenKind::Identifier) {
            let save_text = self.lookahead.text.clone();
            if !self.peek_is_arrow_after_identifier() {
                let _ = save_text;
            }
        }
        let expr = self.parse_expression();
        if self.at(TokenKind::Colon) {
            if let Node::Expression(crate::ast::Expr::Lookup { name, .. }) = self.arena.node(expr).clone() {
                self.bump();
                let body = self.parse_statement().unwrap_or(expr);
                let end = self.arena.span(body);
                let id = self.alloc(Node::Statement(Stmt::Labeled { label: name, body }), start.merge(end));
                self.attach_children(id);
                return id;
            }
        }
        let end = self.lookahead.span;
        self.consume_semicolon_with_asi();
        let id = self.alloc(Node::Statement(Stmt::Expression { expression: expr }), start.merge(end));
        self.attach_children(id);
        id
    }

    fn peek_is_arrow_after_identifier(&self) -> bool {
        false
    }

    fn parse_function_declaration(&mut self) -> NodeId {
        let start = self.lookahead.span;
        let func = self.parse_function_object(FunctionKind::Declaration);
        let span = start.merge(self.arena.span(func));
        self.arena.extend_span(func, span);
        func
    }

    /// Handles a `PreprocessorComment` token's text. A small,
    /// stateful walk over `@cc_on`/`@set`/`@if`/`@elif`/`@else`/`@end`, since
    /// the scanner hands the whole comment back as one token rather than a
    /// further token stream.
    fn parse_cc_directive(&mut self) -> Option<NodeId> {
        let token = self.bump();
        let inner = token.text.trim_start_matches("/*").trim_end_matches("*/").trim();
        let inner = inner.strip_prefix('@').unwrap_or(inner);

        if self.settings.ignore_conditional_compilation {
            return Some(self.alloc(
                Node::Statement(Stmt::ConditionalCompilationComment { statements: vec![] }),
                token.span,
            ));
        }

        if inner.eq_ignore_ascii_case("cc_on") {
            return Some(self.alloc(Node::Statement(Stmt::ConditionalCompilationOn), token.span));
        }
        if let Some(rest) = strip_ci_prefix(inner, "set") {
            let rest = rest.trim();
            if let Some((name, value_text)) = rest.split_once('=') {
                let name = name.trim().trim_start_matches('@').to_string();
                match parse_cc_expr(value_text.trim()) {
                    Ok(expr) => {
                        if let Ok(value) = expr.evaluate(&self.defines) {
                            self.defines.set(&name, cc_value_to_string(&value));
                        }
                        let value_node = self.alloc(
                            Node::Expression(crate::ast::Expr::ConstantWrapper(cc_value_literal(&value_text.trim()))),
                            token.span,
                        );
                        return Some(self.alloc(
                            Node::Statement(Stmt::ConditionalCompilationSet { name, value: value_node }),
                            token.span,
                        ));
                    }
                    Err(_) => {
                        self.defines.set(&name, value_text.trim().to_string());
                    }
                }
            }
            return None;
        }
        if let Some(rest) = strip_ci_prefix(inner, "if") {
            return Some(self.parse_cc_if_chain(token.span, rest));
        }
        // `@elif`/`@else`/`@end` encountered without a matching `@if` at this
        // call site are swallowed; `parse_cc_if_chain` consumes them in
        // context.
        None
    }

    fn parse_cc_if_chain(&mut self, start: crate::span::Span, first_cond: &str) -> NodeId {
        let test = self.cc_condition_node(first_cond, start);
        let cond_true = self
            .cc_eval(first_cond)
            .map(|v| v.truthy())
            .unwrap_or(false);

        let mut consequent = Vec::new();
        let mut alternate = Vec::new();
        let mut taking_consequent = true;
        let mut branch_taken = cond_true;
        let mut taken_is_consequent = taking_consequent;

        loop {
            if self.at(TokenKind::PreprocessorComment) {
                let text = self.lookahead.text.clone();
                let inner = text.trim_start_matches("/*").trim_end_matches("*/").trim();
                let inner = inner.strip_prefix('@').unwrap_or(inner);
                if inner.eq_ignore_ascii_case("end") {
                    self.bump();
                    break;
                }
                if let Some(rest) = strip_ci_prefix(inner, "elif") {
                    self.bump();
                    taking_consequent = !branch_taken;
                    if taking_consequent && self.cc_eval(rest).map(|v| v.truthy()).unwrap_or(false) {
                        branch_taken = true;
                    } else {
                        taking_consequent = false;
                    }
                    taken_is_consequent = taking_consequent;
                    continue;
                }
                if inner.eq_ignore_ascii_case("else") {
                    self.bump();
                    taking_consequent = !branch_taken;
                    taken_is_consequent = taking_consequent;
                    continue;
                }
            }
            if self.at(TokenKind::Eof) {
                break;
            }
            if let Some(stmt) = self.parse_statement() {
                if taking_consequent {
                    consequent.push(stmt);
                } else {
                    alternate.push(stmt);
                }
            }
        }

        let end = self.lookahead.span;
        let id = self.alloc(
            Node::Statement(Stmt::ConditionalCompilationIf {
                test,
                consequent,
                alternate,
                taken_is_consequent,
            }),
            start.merge(end),
        );
        self.attach_children(id);
        id
    }

    fn cc_condition_node(&mut self, text: &str, span: crate::span::Span) -> NodeId {
        let text = text.trim().trim_start_matches('(').trim_end_matches(')');
        self.alloc(
            Node::Expression(crate::ast::Expr::ConstantWrapperPP {
                name: text.to_string(),
                value: Box::new(cc_value_literal(text)),
            }),
            span,
        )
    }

    fn cc_eval(&mut self, text: &str) -> Option<CcValue> {
        let text = text.trim().trim_start_matches('(').trim_end_matches(')');
        match parse_cc_expr(text) {
            Ok(expr) => match expr.evaluate(&self.defines) {
                Ok(value) => Some(value),
                Err(kind) => {
                    self.error(ParserErrorKind::MissingExpectedToken { expected: "@if condition" });
                    let _ = kind;
                    None
                }
            },
            Err(_) => None,
        }
    }
}

fn strip_ci_prefix<'t>(s: &'t str, prefix: &str) -> Option<&'t str> {
    if s.len() >= prefix.len() && s[..prefix.len()].eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

fn cc_value_to_string(value: &CcValue) -> String {
    match value {
        CcValue::Integer(n) => n.to_string(),
        CcValue::Boolean(b) => b.to_string(),
    }
}

fn cc_value_literal(text: &str) -> crate::ast::expressions::Literal {
    if let Ok(n) = text.parse::<f64>() {
        crate::ast::expressions::Literal::Number(n)
    } else if text.eq_ignore_ascii_case("true") {
        crate::ast::expressions::Literal::Boolean(true)
    } else if text.eq_ignore_ascii_case("false") {
        crate::ast::expressions::Literal::Boolean(false)
    } else {
        crate::ast::expressions::Literal::String { value: text.to_string(), original_quote: '"' }
    }
}

/// `var` declarator dedup: a later declaration with no
/// initializer never overwrites an earlier one; a later declaration *with*
/// an initializer removes prior initializer-less declarations of the same
/// name.
fn declare_dedup(declarations: &mut Vec<VarDeclarator>, name: String, init: Option<NodeId>) {
    if init.is_some() {
        declarations.retain(|d| d.name != name || d.init.is_some());
    } else if declarations.iter().any(|d| d.name == name) {
        return;
    }
    declarations.push(VarDeclarator { name, init });
}
