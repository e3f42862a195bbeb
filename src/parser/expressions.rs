//! Precedence-climbing expression parser.
//!
//! Per-level helper methods (`parse_or`, `parse_and`, ... each falling
//! through to the next tighter level) follow the standard ECMAScript operator
//! grammar: binary operators use a precedence-climbing parser driven by a
//! table of (token -> precedence, associativity).

use super::Parser;
use crate::ast::expressions::{
    BinaryOp, Expr, FunctionKind, IncDecOp, Literal, ObjectProperty, PropertyKey, PropertyKind,
    UnaryOp,
};
use crate::ast::Node;
use crate::ast::NodeId;
use crate::diagnostics::ParserErrorKind;
use crate::scanner::TokenKind;

/// `None` means this token is not a binary operator at all.
fn assignment_op(kind: TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::Assign => BinaryOp::Assign,
        TokenKind::PlusAssign => BinaryOp::PlusAssign,
        TokenKind::MinusAssign => BinaryOp::MinusAssign,
        TokenKind::MultiplyAssign => BinaryOp::MultiplyAssign,
        TokenKind::DivideAssign => BinaryOp::DivideAssign,
        TokenKind::ModuloAssign => BinaryOp::ModuloAssign,
        TokenKind::ExponentAssign => BinaryOp::ExponentAssign,
        TokenKind::LeftShiftAssign => BinaryOp::LeftShiftAssign,
        TokenKind::RightShiftAssign => BinaryOp::RightShiftAssign,
        TokenKind::UnsignedRightShiftAssign => BinaryOp::UnsignedRightShiftAssign,
        TokenKind::BitwiseAndAssign => BinaryOp::BitwiseAndAssign,
        TokenKind::BitwiseOrAssign => BinaryOp::BitwiseOrAssign,
        TokenKind::BitwiseXorAssign => BinaryOp::BitwiseXorAssign,
        _ => return None,
    })
}

impl<'a> Parser<'a> {
    /// Parse a full expression, including the top-level comma operator.
    pub(super) fn parse_expression(&mut self) -> NodeId {
        let mut expr = self.parse_assignment_expression();
        while self.at(TokenKind::Comma) {
            self.bump();
            let right = self.parse_assignment_expression();
            expr = self.make_binary(BinaryOp::Comma, expr, right);
        }
        expr
    }

    /// Parse an expression that stops before a bare `in` at the top level,
    /// for use inside a `for (...)` head.
    pub(super) fn parse_assignment_expression_no_in(&mut self) -> NodeId {
        self.parse_assignment_expression()
    }

    /// Right-associative: `a = b = c` parses as `a = (b = c)`.
    pub(super) fn parse_assignment_expression(&mut self) -> NodeId {
        let lhs = self.parse_conditional_expression();
        if let Some(op) = assignment_op(self.lookahead.kind) {
            self.bump();
            let rhs = self.parse_assignment_expression();
            return self.make_binary(op, lhs, rhs);
        }
        lhs
    }

    fn parse_conditional_expression(&mut self) -> NodeId {
        let test = self.parse_nullish_expression();
        if self.at(TokenKind::Question) {
            self.bump();
            let consequent = self.parse_assignment_expression();
            self.expect(TokenKind::Colon);
            let alternate = self.parse_assignment_expression();
            let span = self.arena.span(test).merge(self.arena.span(alternate));
            let id = self.alloc(Node::Expression(Expr::Conditional { test, consequent, alternate }), span);
            self.attach_children_expr(id);
            return id;
        }
        test
    }

    fn parse_nullish_expression(&mut self) -> NodeId {
        let mut lhs = self.parse_logical_or_expression();
        while self.at(TokenKind::NullishCoalesce) {
            self.bump();
            let rhs = self.parse_logical_or_expression();
            lhs = self.make_binary(BinaryOp::NullishCoalesce, lhs, rhs);
        }
        lhs
    }

    fn parse_logical_or_expression(&mut self) -> NodeId {
        let mut lhs = self.parse_logical_and_expression();
        while self.at(TokenKind::LogicalOr) {
            self.bump();
            let rhs = self.parse_logical_and_expression();
            lhs = self.make_binary(BinaryOp::LogicalOr, lhs, rhs);
        }
        lhs
    }

    fn parse_logical_and_expression(&mut self) -> NodeId {
        let mut lhs = self.parse_bitwise_or_expression();
        while self.at(TokenKind::LogicalAnd) {
            self.bump();
            let rhs = self.parse_bitwise_or_expression();
            lhs = self.make_binary(BinaryOp::LogicalAnd, lhs, rhs);
        }
        lhs
    }

    fn parse_bitwise_or_expression(&mut self) -> NodeId {
        let mut lhs = self.parse_bitwise_xor_expression();
        while self.at(TokenKind::BitwiseOr) {
            self.bump();
            let rhs = self.parse_bitwise_xor_expression();
            lhs = self.make_binary(BinaryOp::BitwiseOr, lhs, rhs);
        }
        lhs
    }

    fn parse_bitwise_xor_expression(&mut self) -> NodeId {
        let mut lhs = self.parse_bitwise_and_expression();
        while self.at(TokenKind::BitwiseXor) {
            self.bump();
            let rhs = self.parse_bitwise_and_expression();
            lhs = self.make_binary(BinaryOp::BitwiseXor, lhs, rhs);
        }
        lhs
    }

    fn parse_bitwise_and_expression(&mut self) -> NodeId {
        let mut lhs = self.parse_equality_expression();
        while self.at(TokenKind::BitwiseAnd) {
            self.bump();
            let rhs = self.parse_equality_expression();
            lhs = self.make_binary(BinaryOp::BitwiseAnd, lhs, rhs);
        }
        lhs
    }

    fn parse_equality_expression(&mut self) -> NodeId {
        let mut lhs = self.parse_relational_expression();
        loop {
            let op = match self.lookahead.kind {
                TokenKind::Equals => BinaryOp::Equals,
                TokenKind::NotEquals => BinaryOp::NotEquals,
                TokenKind::StrictEquals => BinaryOp::StrictEquals,
                TokenKind::StrictNotEquals => BinaryOp::StrictNotEquals,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_relational_expression();
            lhs = self.make_binary(op, lhs, rhs);
        }
        lhs
    }

    fn parse_relational_expression(&mut self) -> NodeId {
        let mut lhs = self.parse_shift_expression();
        loop {
            let op = match self.lookahead.kind {
                TokenKind::LessThan => BinaryOp::LessThan,
                TokenKind::LessThanEquals => BinaryOp::LessThanEquals,
                TokenKind::GreaterThan => BinaryOp::GreaterThan,
                TokenKind::GreaterThanEquals => BinaryOp::GreaterThanEquals,
                TokenKind::InstanceOf => BinaryOp::InstanceOf,
                TokenKind::In => BinaryOp::In,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_shift_expression();
            lhs = self.make_binary(op, lhs, rhs);
        }
        lhs
    }

    fn parse_shift_expression(&mut self) -> NodeId {
        let mut lhs = self.parse_additive_expression();
        loop {
            let op = match self.lookahead.kind {
                TokenKind::LeftShift => BinaryOp::LeftShift,
                TokenKind::RightShift => BinaryOp::RightShift,
                TokenKind::UnsignedRightShift => BinaryOp::UnsignedRightShift,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_additive_expression();
            lhs = self.make_binary(op, lhs, rhs);
        }
        lhs
    }

    fn parse_additive_expression(&mut self) -> NodeId {
        let mut lhs = self.parse_multiplicative_expression();
        loop {
            let op = match self.lookahead.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Subtract,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_multiplicative_expression();
            lhs = self.make_binary(op, lhs, rhs);
        }
        lhs
    }

    fn parse_multiplicative_expression(&mut self) -> NodeId {
        let mut lhs = self.parse_exponent_expression();
        loop {
            let op = match self.lookahead.kind {
                TokenKind::Multiply => BinaryOp::Multiply,
                TokenKind::Divide => BinaryOp::Divide,
                TokenKind::Modulo => BinaryOp::Modulo,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_exponent_expression();
            lhs = self.make_binary(op, lhs, rhs);
        }
        lhs
    }

    /// `**` is right-associative, unlike every other binary level here.
    fn parse_exponent_expression(&mut self) -> NodeId {
        let lhs = self.parse_unary_expression();
        if self.at(TokenKind::Exponent) {
            self.bump();
            let rhs = self.parse_exponent_expression();
            return self.make_binary(BinaryOp::Exponent, lhs, rhs);
        }
        lhs
    }

    fn parse_unary_expression(&mut self) -> NodeId {
        let start = self.lookahead.span;
        let op = match self.lookahead.kind {
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Minus => Some(UnaryOp::Minus),
            TokenKind::LogicalNot => Some(UnaryOp::LogicalNot),
            TokenKind::BitwiseNot => Some(UnaryOp::BitwiseNot),
            TokenKind::TypeOf => Some(UnaryOp::TypeOf),
            TokenKind::Void => Some(UnaryOp::Void),
            TokenKind::Delete => Some(UnaryOp::Delete),
            _ => None,
        };
        if let Some(op) = op {
            self.bump();
            let operand = self.parse_unary_expression();
            let span = start.merge(self.arena.span(operand));
            let id = self.alloc(Node::Expression(Expr::UnaryOperator { op, operand }), span);
            self.attach_children_expr(id);
            return id;
        }
        if let Some(op) = match self.lookahead.kind {
            TokenKind::Increment => Some(IncDecOp::PrefixIncrement),
            TokenKind::Decrement => Some(IncDecOp::PrefixDecrement),
            _ => None,
        } {
            self.bump();
            let operand = self.parse_unary_expression();
            let span = start.merge(self.arena.span(operand));
            let id = self.alloc(Node::Expression(Expr::PostOrPrefixOperator { op, operand }), span);
            self.attach_children_expr(id);
            return id;
        }
        self.parse_postfix_expression()
    }

    fn parse_postfix_expression(&mut self) -> NodeId {
        let operand = self.parse_call_or_member_expression();
        if !self.lookahead.preceded_by_line_terminator {
            let op = match self.lookahead.kind {
                TokenKind::Increment => Some(IncDecOp::PostfixIncrement),
                TokenKind::Decrement => Some(IncDecOp::PostfixDecrement),
                _ => None,
            };
            if let Some(op) = op {
                let end = self.lookahead.span;
                self.bump();
                let span = self.arena.span(operand).merge(end);
                let id = self.alloc(Node::Expression(Expr::PostOrPrefixOperator { op, operand }), span);
                self.attach_children_expr(id);
                return id;
            }
        }
        operand
    }

    /// Parses member access, calls, and `new`, including `new.target`-free
    /// plain `new Ctor(...)` with or without an argument list.
    fn parse_call_or_member_expression(&mut self) -> NodeId {
        let mut expr = if self.at(TokenKind::New) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        loop {
            match self.lookahead.kind {
                TokenKind::Dot => {
                    self.bump();
                    let name_span = self.lookahead.span;
                    let name = if self.at(TokenKind::Identifier) {
                        self.bump().text
                    } else {
                        self.error(ParserErrorKind::UnexpectedToken {
                            expected: vec![TokenKind::Identifier],
                            found: self.lookahead.kind,
                        });
                        String::new()
                    };
                    let property = self.alloc(
                        Node::Expression(Expr::ConstantWrapper(Literal::String {
                            value: name,
                            original_quote: '"',
                        })),
                        name_span,
                    );
                    let span = self.arena.span(expr).merge(name_span);
                    let id = self.alloc(
                        Node::Expression(Expr::Member { object: expr, property, computed: false }),
                        span,
                    );
                    self.attach_children_expr(id);
                    expr = id;
                }
                TokenKind::LeftBracket => {
                    self.bump();
                    let property = self.parse_expression();
                    let end = self.lookahead.span;
                    self.expect(TokenKind::RightBracket);
                    let span = self.arena.span(expr).merge(end);
                    let id = self.alloc(
                        Node::Expression(Expr::Member { object: expr, property, computed: true }),
                        span,
                    );
                    self.attach_children_expr(id);
                    expr = id;
                }
                TokenKind::LeftParen => {
                    let (arguments, end) = self.parse_arguments();
                    let span = self.arena.span(expr).merge(end);
                    let id = self.alloc(
                        Node::Expression(Expr::CallExpression { callee: expr, arguments, is_new: false }),
                        span,
                    );
                    self.attach_children_expr(id);
                    expr = id;
                }
                _ => break,
            }
        }
        expr
    }

    fn parse_new_expression(&mut self) -> NodeId {
        let start = self.lookahead.span;
        self.bump();
        let callee = if self.at(TokenKind::New) {
            self.parse_new_expression()
        } else {
            self.parse_member_only_expression()
        };
        let (arguments, end) = if self.at(TokenKind::LeftParen) {
            self.parse_arguments()
        } else {
            (Vec::new(), self.arena.span(callee))
        };
        let span = start.merge(end);
        let id = self.alloc(Node::Expression(Expr::CallExpression { callee, arguments, is_new: true }), span);
        self.attach_children_expr(id);
        id
    }

    /// `new`'s callee position binds tighter than a call: `new a.b.c(...)`
    /// takes member accesses but not a trailing call as part of the callee.
    fn parse_member_only_expression(&mut self) -> NodeId {
        let mut expr = if self.at(TokenKind::New) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        loop {
            match self.lookahead.kind {
                TokenKind::Dot => {
                    self.bump();
                    let name_span = self.lookahead.span;
                    let name = if self.at(TokenKind::Identifier) {
                        self.bump().text
                    } else {
                        String::new()
                    };
                    let property = self.alloc(
                        Node::Expression(Expr::ConstantWrapper(Literal::String {
                            value: name,
                            original_quote: '"',
                        })),
                        name_span,
                    );
                    let span = self.arena.span(expr).merge(name_span);
                    let id = self.alloc(
                        Node::Expression(Expr::Member { object: expr, property, computed: false }),
                        span,
                    );
                    self.attach_children_expr(id);
                    expr = id;
                }
                TokenKind::LeftBracket => {
                    self.bump();
                    let property = self.parse_expression();
                    let end = self.lookahead.span;
                    self.expect(TokenKind::RightBracket);
                    let span = self.arena.span(expr).merge(end);
                    let id = self.alloc(
                        Node::Expression(Expr::Member { object: expr, property, computed: true }),
                        span,
                    );
                    self.attach_children_expr(id);
                    expr = id;
                }
                _ => break,
            }
        }
        expr
    }

    fn parse_arguments(&mut self) -> (Vec<NodeId>, crate::span::Span) {
        self.expect(TokenKind::LeftParen);
        let mut args = Vec::new();
        while !self.at(TokenKind::RightParen) && !self.at(TokenKind::Eof) {
            args.push(self.parse_assignment_expression());
            if self.at(TokenKind::Comma) {
                self.bump();
            } else {
                break;
            }
        }
        let end = self.lookahead.span;
        self.expect(TokenKind::RightParen);
        (args, end)
    }

    fn parse_primary_expression(&mut self) -> NodeId {
        let start = self.lookahead.span;
        match self.lookahead.kind {
            TokenKind::NumericLiteral => {
                let token = self.bump();
                let value = parse_numeric_text(&token.text);
                self.alloc(Node::Expression(Expr::ConstantWrapper(Literal::Number(value))), token.span)
            }
            TokenKind::StringLiteral => {
                let token = self.bump();
                let quote = token.text.chars().next().unwrap_or('"');
                let value = decode_string_literal(&token.text);
                self.alloc(
                    Node::Expression(Expr::ConstantWrapper(Literal::String { value, original_quote: quote })),
                    token.span,
                )
            }
            TokenKind::RegexLiteral => {
                let token = self.bump();
                self.alloc(Node::Expression(Expr::ConstantWrapper(Literal::Regexp(token.text))), token.span)
            }
            TokenKind::TrueLiteral => {
                let token = self.bump();
                self.alloc(Node::Expression(Expr::ConstantWrapper(Literal::Boolean(true))), token.span)
            }
            TokenKind::FalseLiteral => {
                let token = self.bump();
                self.alloc(Node::Expression(Expr::ConstantWrapper(Literal::Boolean(false))), token.span)
            }
            TokenKind::NullLiteral => {
                let token = self.bump();
                self.alloc(Node::Expression(Expr::ConstantWrapper(Literal::Null)), token.span)
            }
            TokenKind::This => {
                let token = self.bump();
                self.alloc(Node::Expression(Expr::Lookup { name: "this".to_string(), binding: None }), token.span)
            }
            TokenKind::Identifier => {
                let token = self.bump();
                self.alloc(Node::Expression(Expr::Lookup { name: token.text, binding: None }), token.span)
            }
            TokenKind::LeftParen => {
                self.bump();
                let inner = self.parse_expression();
                let end = self.lookahead.span;
                self.expect(TokenKind::RightParen);
                let id = self.alloc(Node::Expression(Expr::Grouping { inner }), start.merge(end));
                self.attach_children_expr(id);
                id
            }
            TokenKind::LeftBracket => self.parse_array_literal(),
            TokenKind::LeftBrace => self.parse_object_literal(),
            TokenKind::Function => self.parse_function_object(FunctionKind::Expression),
            TokenKind::PreprocessorComment => self.parse_cc_constant(),
            _ => {
                self.error(ParserErrorKind::UnexpectedToken { expected: vec![], found: self.lookahead.kind });
                self.bump();
                self.alloc(Node::Expression(Expr::Lookup { name: String::new(), binding: None }), start)
            }
        }
    }

    fn parse_cc_constant(&mut self) -> NodeId {
        let token = self.bump();
        let inner = token.text.trim_start_matches("/*").trim_end_matches("*/").trim();
        let name = inner.strip_prefix('@').unwrap_or(inner).to_string();
        let value = if let Ok(n) = name.parse::<f64>() {
            Literal::Number(n)
        } else {
            Literal::String { value: String::new(), original_quote: '"' }
        };
        self.alloc(
            Node::Expression(Expr::ConstantWrapperPP { name, value: Box::new(value) }),
            token.span,
        )
    }

    fn parse_array_literal(&mut self) -> NodeId {
        let start = self.lookahead.span;
        self.bump();
        let mut elements = Vec::new();
        while !self.at(TokenKind::RightBracket) && !self.at(TokenKind::Eof) {
            if self.at(TokenKind::Comma) {
                elements.push(None);
                self.bump();
                continue;
            }
            elements.push(Some(self.parse_assignment_expression()));
            if self.at(TokenKind::Comma) {
                self.bump();
            } else {
                break;
            }
        }
        let end = self.lookahead.span;
        self.expect(TokenKind::RightBracket);
        let id = self.alloc(Node::Expression(Expr::ArrayLiteral { elements }), start.merge(end));
        self.attach_children_expr(id);
        id
    }

    fn parse_object_literal(&mut self) -> NodeId {
        let start = self.lookahead.span;
        self.bump();
        let mut properties = Vec::new();
        while !self.at(TokenKind::RightBrace) && !self.at(TokenKind::Eof) {
            properties.push(self.parse_object_property());
            if self.at(TokenKind::Comma) {
                self.bump();
            } else {
                break;
            }
        }
        let end = self.lookahead.span;
        self.expect(TokenKind::RightBrace);
        let id = self.alloc(Node::Expression(Expr::ObjectLiteral { properties }), start.merge(end));
        self.attach_children_expr(id);
        id
    }

    fn parse_object_property(&mut self) -> ObjectProperty {
        if (self.at(TokenKind::Identifier) && (self.lookahead.text == "get" || self.lookahead.text == "set"))
        {
            let is_getter = self.lookahead.text == "get";
            let saved_kind = self.lookahead.kind;
            let saved_text = self.lookahead.text.clone();
            let saved_span = self.lookahead.span;
            self.bump();
            if self.at(TokenKind::Colon) || self.at(TokenKind::Comma) || self.at(TokenKind::RightBrace) {
                // It was a plain `get`/`set` property name, not an accessor.
                return self.finish_data_property(PropertyKey::Identifier(saved_text), saved_span, saved_kind);
            }
            let key = self.parse_property_key();
            let func_kind = if is_getter { FunctionKind::Getter } else { FunctionKind::Setter };
            let func = self.parse_function_object_body(func_kind, None);
            return ObjectProperty {
                key,
                value: func,
                kind: if is_getter { PropertyKind::Getter } else { PropertyKind::Setter },
            };
        }
        let key_span = self.lookahead.span;
        let key = self.parse_property_key();
        self.expect(TokenKind::Colon);
        let value = self.parse_assignment_expression();
        let _ = key_span;
        ObjectProperty { key, value, kind: PropertyKind::Data }
    }

    fn finish_data_property(&mut self, key: PropertyKey, _span: crate::span::Span, _saved_kind: TokenKind) -> ObjectProperty {
        self.expect(TokenKind::Colon);
        let value = self.parse_assignment_expression();
        ObjectProperty { key, value, kind: PropertyKind::Data }
    }

    fn parse_property_key(&mut self) -> PropertyKey {
        match self.lookahead.kind {
            TokenKind::StringLiteral => {
                let token = self.bump();
                PropertyKey::StringLiteral(decode_string_literal(&token.text))
            }
            TokenKind::NumericLiteral => {
                let token = self.bump();
                PropertyKey::NumericLiteral(parse_numeric_text(&token.text))
            }
            _ => {
                let token = self.bump();
                PropertyKey::Identifier(token.text)
            }
        }
    }

    /// Parse a `function` keyword through its parameter list and body,
    /// deferring NFE binding creation to the Analyzer.
    pub(super) fn parse_function_object(&mut self, kind: FunctionKind) -> NodeId {
        let start = self.lookahead.span;
        self.bump();
        let name = if self.at(TokenKind::Identifier) {
            Some(self.bump().text)
        } else {
            None
        };
        let func = self.parse_function_object_body(kind, name);
        self.arena.extend_span(func, start);
        func
    }

    fn parse_function_object_body(&mut self, kind: FunctionKind, name: Option<String>) -> NodeId {
        let start = self.lookahead.span;
        self.expect(TokenKind::LeftParen);
        let mut params = Vec::new();
        while !self.at(TokenKind::RightParen) && !self.at(TokenKind::Eof) {
            params.push(self.parse_binding_identifier());
            if self.at(TokenKind::Comma) {
                self.bump();
            } else {
                break;
            }
        }
        self.expect(TokenKind::RightParen);
        let body = self.parse_function_block();
        let end = self.arena.span(body);
        let id = self.alloc(Node::Expression(Expr::FunctionObject { kind, name, params, body }), start.merge(end));
        self.attach_children_expr(id);
        id
    }

    fn make_binary(&mut self, op: BinaryOp, left: NodeId, right: NodeId) -> NodeId {
        let span = self.arena.span(left).merge(self.arena.span(right));
        let id = self.alloc(Node::Expression(Expr::BinaryOperator { op, left, right }), span);
        self.attach_children_expr(id);
        id
    }

    fn attach_children_expr(&mut self, id: NodeId) {
        for child in self.arena.node(id).children() {
            self.arena.set_parent(child, id);
        }
    }
}

/// Decode a scanned string literal's raw text (quotes and escapes included)
/// to its semantic value.
pub(crate) fn decode_string_literal(raw: &str) -> String {
    let inner = &raw[1..raw.len().saturating_sub(1).max(1)];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some('0') => out.push('\0'),
            Some('\n') => {}
            Some('x') => {
                let hex: String = chars.by_ref().take(2).collect();
                if let Ok(code) = u32::from_str_radix(&hex, 16) {
                    if let Some(c) = char::from_u32(code) {
                        out.push(c);
                    }
                }
            }
            Some('u') => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    let hex: String = chars.by_ref().take_while(|c| *c != '}').collect();
                    if let Ok(code) = u32::from_str_radix(&hex, 16) {
                        if let Some(c) = char::from_u32(code) {
                            out.push(c);
                        }
                    }
                } else {
                    let hex: String = chars.by_ref().take(4).collect();
                    if let Some(high) = crate::scanner::unicode::decode_unicode_escape(&hex) {
                        if (0xD800..=0xDBFF).contains(&high) {
                            let mut lookahead = chars.clone();
                            if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
                                let low_hex: String = lookahead.by_ref().take(4).collect();
                                if let Some(low) = crate::scanner::unicode::decode_unicode_escape(&low_hex) {
                                    if let Some(c) = crate::scanner::unicode::combine_surrogate_pair(high, low) {
                                        out.push(c);
                                        chars = lookahead;
                                        continue;
                                    }
                                }
                            }
                        }
                        if let Some(c) = char::from_u32(high) {
                            out.push(c);
                        }
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

fn parse_numeric_text(text: &str) -> f64 {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).map(|v| v as f64).unwrap_or(f64::NAN);
    }
    text.parse().unwrap_or(f64::NAN)
}
