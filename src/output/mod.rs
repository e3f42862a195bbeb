//! The Output Visitor: rendering the (transformed, renamed) AST back to JS
//! source text.
//!
//! Shaped like the rest of this crate's tree walks: a single recursive
//! descent over `Arena`/`NodeId`, consulting `needs_parens` as the one place
//! parenthesization decisions are made and `numeric_format`/`string_format`
//! for literal text.
//!
//! Every statement this visitor prints gets an explicit trailing `;` (except
//! the handful of statement kinds a `;` would be a syntax error after, and
//! the very last statement of a list unless `Settings::term_semicolons` asks
//! to keep it anyway) — this sidesteps ASI pitfalls entirely rather than
//! reproducing ECMAScript's "is a semicolon insertable here" rules, since a
//! minifier that always supplies its own semicolons never needs ASI to fill
//! one in.

pub mod needs_parens;
pub mod numeric_format;
pub mod string_format;

use crate::ast::expressions::{
    BinaryOp, FunctionKind, IncDecOp, Literal, ObjectProperty, PropertyKey, PropertyKind,
};
use crate::ast::{Arena, Expr, Node, NodeId, Stmt};
use crate::env::{BindingId, EnvId, EnvironmentTree};
use crate::settings::{BlockStart, OutputMode, Settings};
use std::collections::HashMap;

/// Render `root` to JS source text using `tree` for resolved/renamed
/// identifiers and `settings` for layout choices.
pub fn render(arena: &Arena, tree: &EnvironmentTree, root: NodeId, settings: &Settings) -> String {
    OutputVisitor::new(arena, tree, settings, false).print_program(root).0
}

/// Like [`render`], but also returns one [`SourceMapping`] per top-level
/// statement printed, for driving a [`crate::sourcemap::SourceMapEmitter`].
/// Statement granularity, not per-token: the cheapest
/// mapping density that still lets a debugger land on the right line for
/// every originally-separate statement, without threading a mapping call
/// through every `write_expression` call site.
pub fn render_with_mappings(
    arena: &Arena,
    tree: &EnvironmentTree,
    root: NodeId,
    settings: &Settings,
) -> (String, Vec<SourceMapping>) {
    OutputVisitor::new(arena, tree, settings, true).print_program(root)
}

/// One generated-position -> source-position correspondence.
#[derive(Debug, Clone)]
pub struct SourceMapping {
    /// 1-based generated line.
    pub gen_line: u32,
    /// 0-based generated column.
    pub gen_col: u32,
    /// The original span this statement came from.
    pub source_span: crate::span::Span,
    /// Name of the innermost enclosing named function, if any.
    pub enclosing_function: Option<String>,
}

struct OutputVisitor<'a> {
    arena: &'a Arena,
    tree: &'a EnvironmentTree,
    settings: &'a Settings,
    /// Maps a `LexicalEnvironment`'s owner node (function body, catch
    /// handler, `with` body) back to its `EnvId`, so entering that node a
    /// second time during printing re-enters the same scope the Analyzer
    /// built for it.
    owner_to_env: HashMap<NodeId, EnvId>,
    out: String,
    depth: u32,
    line: u32,
    column: u32,
    last_char: Option<char>,
    record_mappings: bool,
    mappings: Vec<SourceMapping>,
}

impl<'a> OutputVisitor<'a> {
    fn new(arena: &'a Arena, tree: &'a EnvironmentTree, settings: &'a Settings, record_mappings: bool) -> Self {
        let owner_to_env = tree.env_ids().map(|env| (tree.owner_of(env), env)).collect();
        OutputVisitor {
            arena,
            tree,
            settings,
            owner_to_env,
            out: String::new(),
            depth: 0,
            line: 1,
            column: 0,
            last_char: None,
            record_mappings,
            mappings: Vec::new(),
        }
    }

    fn print_program(mut self, root: NodeId) -> (String, Vec<SourceMapping>) {
        let env = self.tree.global();
        match self.arena.node(root) {
            Node::Statement(Stmt::Block { body }) => self.write_statement_list(body, env, false),
            _ => self.write_statement(root, env),
        }
        (self.out, self.mappings)
    }

    /// Name of the innermost `FunctionObject` ancestor of `id`, if any.
    fn enclosing_function_name(&self, id: NodeId) -> Option<String> {
        let mut current = self.arena.parent(id);
        while let Some(parent) = current {
            if let Node::Expression(Expr::FunctionObject { name: Some(name), .. }) = self.arena.node(parent) {
                return Some(name.clone());
            }
            current = self.arena.parent(parent);
        }
        None
    }

    fn multiline(&self) -> bool {
        matches!(self.settings.output_mode, OutputMode::MultipleLines)
    }

    fn push_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        if let (Some(prev), Some(next)) = (self.last_char, s.chars().next()) {
            if needs_separator(prev, next) {
                self.out.push(' ');
                self.column += 1;
            }
        }
        self.out.push_str(s);
        self.last_char = s.chars().last();
        self.column += s.chars().count() as u32;
    }

    fn newline_indent(&mut self) {
        self.out.push('\n');
        self.line += 1;
        let spaces = self.depth * self.settings.indent_size;
        for _ in 0..spaces {
            self.out.push(' ');
        }
        self.column = spaces;
        self.last_char = None;
    }

    /// Resolve a `Lookup`'s already-analyzed binding to its printed name.
    fn lookup_name(&self, env: EnvId, name: &str, binding: Option<BindingId>) -> String {
        match binding {
            Some(id) => self.binding_text(id),
            None => self.declared_name(env, name),
        }
    }

    /// Resolve a declaration-site name (a `var`, a parameter, a catch
    /// parameter, a function name) to its printed form by walking the scope
    /// chain from `env` outward, the same way a reference to it would
    /// resolve.
    fn declared_name(&self, env: EnvId, name: &str) -> String {
        match self.tree.resolve_name(env, name) {
            Some(id) => self.binding_text(id),
            None => name.to_string(),
        }
    }

    fn binding_text(&self, id: BindingId) -> String {
        let binding = self.tree.binding(id);
        binding.crunched_name.clone().unwrap_or_else(|| binding.name.clone())
    }

    fn env_of(&self, owner: NodeId, fallback: EnvId) -> EnvId {
        self.owner_to_env.get(&owner).copied().unwrap_or(fallback)
    }

    fn is_empty_stmt(&self, id: NodeId) -> bool {
        matches!(self.arena.node(id), Node::Statement(Stmt::Empty))
    }

    /// Whether a `;` is both legal and meaningful right after this statement.
    fn statement_needs_semicolon(&self, id: NodeId) -> bool {
        match self.arena.node(id) {
            Node::Expression(Expr::FunctionObject { kind: FunctionKind::Declaration, .. }) => false,
            Node::Expression(_) => true,
            Node::Statement(stmt) => match stmt {
                Stmt::Block { .. }
                | Stmt::IfStatement { .. }
                | Stmt::ForStatement { .. }
                | Stmt::ForInStatement { .. }
                | Stmt::WhileStatement { .. }
                | Stmt::SwitchStatement { .. }
                | Stmt::TryStatement { .. }
                | Stmt::WithStatement { .. }
                | Stmt::Empty
                | Stmt::ImportantComment { .. }
                | Stmt::AspNetBlock { .. }
                | Stmt::ConditionalCompilationOn
                | Stmt::ConditionalCompilationIf { .. }
                | Stmt::ConditionalCompilationComment { .. } => false,
                Stmt::Labeled { body, .. } => self.statement_needs_semicolon(*body),
                _ => true,
            },
        }
    }

    /// Print every non-`Empty` statement of a body list, each terminated by
    /// `;` where needed except the last (unless `term_semicolons`).
    /// `lead_newline` requests a newline/indent before the first statement
    /// too, for a body list printed right after an already-written `{`.
    fn write_statement_list(&mut self, body: &[NodeId], env: EnvId, lead_newline: bool) {
        let visible: Vec<NodeId> = body.iter().copied().filter(|id| !self.is_empty_stmt(*id)).collect();
        let last_index = visible.len().saturating_sub(1);
        for (i, id) in visible.iter().enumerate() {
            if self.multiline() && (i > 0 || lead_newline) {
                self.newline_indent();
            }
            if self.record_mappings {
                let gen_line = self.line;
                let gen_col = self.column;
                let source_span = self.arena.span(*id);
                let enclosing_function = self.enclosing_function_name(*id);
                self.mappings.push(SourceMapping { gen_line, gen_col, source_span, enclosing_function });
            }
            self.write_statement(*id, env);
            if self.statement_needs_semicolon(*id) && (i != last_index || self.settings.term_semicolons) {
                self.push_str(";");
            }
            if !self.multiline() {
                if let Some(threshold) = self.settings.line_break_threshold {
                    if self.column >= threshold {
                        self.out.push('\n');
                        self.line += 1;
                        self.column = 0;
                        self.last_char = None;
                    }
                }
            }
        }
    }

    fn write_braced_block(&mut self, body: &[NodeId], env: EnvId) {
        if self.multiline() && matches!(self.settings.blocks_start_on_same_line, BlockStart::NewLine) {
            self.newline_indent();
        }
        self.push_str("{");
        if self.multiline() {
            self.depth += 1;
        }
        self.write_statement_list(body, env, true);
        if self.multiline() {
            self.depth -= 1;
            if !body.iter().all(|id| self.is_empty_stmt(*id)) {
                self.newline_indent();
            }
        }
        self.push_str("}");
    }

    /// A body `NodeId` guaranteed by the parser to be a `Stmt::Block`.
    fn write_block(&mut self, id: NodeId, env: EnvId) {
        match self.arena.node(id) {
            Node::Statement(Stmt::Block { body }) => self.write_braced_block(body, env),
            _ => self.write_statement(id, env),
        }
    }

    fn write_maybe_parens(&mut self, id: NodeId, env: EnvId, parens: bool) {
        if parens {
            self.push_str("(");
            self.write_expression(id, env);
            self.push_str(")");
        } else {
            self.write_expression(id, env);
        }
    }

    /// A statement-list entry: either an ordinary `Stmt`, a bare function
    /// declaration (a `FunctionObject` placed directly in a body list, not
    /// wrapped in any `Stmt` variant — there is no dedicated
    /// `FunctionDeclaration` statement), or any other bare expression used as
    /// an expression statement.
    fn write_statement(&mut self, id: NodeId, env: EnvId) {
        match self.arena.node(id) {
            Node::Expression(Expr::FunctionObject { kind: FunctionKind::Declaration, name, params, body }) => {
                let params = params.clone();
                let name = name.clone();
                let body = *body;
                self.write_function_header("function", name.as_deref(), &params, body, env);
            }
            Node::Expression(_) => {
                let parens = needs_parens::statement_expression_needs_parens(self.arena, id);
                self.write_maybe_parens(id, env, parens);
            }
            Node::Statement(_) => self.write_stmt(id, env),
        }
    }

    fn write_stmt(&mut self, id: NodeId, env: EnvId) {
        let Node::Statement(stmt) = self.arena.node(id) else {
            unreachable!("write_stmt only called for Node::Statement ids");
        };
        match stmt {
            Stmt::Block { body } => self.write_braced_block(body, env),
            Stmt::VarStatement { declarations } => {
                self.push_str("var");
                let declarations = declarations.clone();
                for (i, decl) in declarations.iter().enumerate() {
                    if i > 0 {
                        self.push_str(",");
                    }
                    let name = self.declared_name(env, &decl.name);
                    self.push_str(&name);
                    if let Some(init) = decl.init {
                        self.push_str("=");
                        let parens = is_comma_expression(self.arena, init);
                        self.write_maybe_parens(init, env, parens);
                    }
                }
            }
            Stmt::IfStatement { test, consequent, alternate } => {
                let (test, consequent, alternate) = (*test, *consequent, *alternate);
                self.push_str("if");
                self.push_str("(");
                self.write_expression(test, env);
                self.push_str(")");
                self.write_block(consequent, env);
                if let Some(alt) = alternate {
                    self.push_str("else");
                    self.write_block(alt, env);
                }
            }
            Stmt::ForStatement { init, test, update, body } => {
                let (init, test, update, body) = (*init, *test, *update, *body);
                self.push_str("for");
                self.push_str("(");
                if let Some(init) = init {
                    self.write_for_head(init, env);
                }
                self.push_str(";");
                if let Some(test) = test {
                    self.write_expression(test, env);
                }
                self.push_str(";");
                if let Some(update) = update {
                    self.write_expression(update, env);
                }
                self.push_str(")");
                self.write_block(body, env);
            }
            Stmt::ForInStatement { left, right, body } => {
                let (left, right, body) = (*left, *right, *body);
                self.push_str("for");
                self.push_str("(");
                self.write_for_head(left, env);
                self.push_str("in");
                self.write_expression(right, env);
                self.push_str(")");
                self.write_block(body, env);
            }
            Stmt::WhileStatement { test, body } => {
                let (test, body) = (*test, *body);
                self.push_str("while");
                self.push_str("(");
                self.write_expression(test, env);
                self.push_str(")");
                self.write_block(body, env);
            }
            Stmt::DoWhileStatement { body, test } => {
                let (body, test) = (*body, *test);
                self.push_str("do");
                self.write_block(body, env);
                self.push_str("while");
                self.push_str("(");
                self.write_expression(test, env);
                self.push_str(")");
            }
            Stmt::SwitchStatement { discriminant, cases } => {
                let discriminant = *discriminant;
                let cases = cases.clone();
                self.push_str("switch");
                self.push_str("(");
                self.write_expression(discriminant, env);
                self.push_str(")");
                self.push_str("{");
                if self.multiline() {
                    self.depth += 1;
                }
                for case in &cases {
                    if self.multiline() {
                        self.newline_indent();
                    }
                    match case.test {
                        Some(test) => {
                            self.push_str("case");
                            self.write_expression(test, env);
                            self.push_str(":");
                        }
                        None => self.push_str("default:"),
                    }
                    if self.multiline() {
                        self.depth += 1;
                    }
                    self.write_statement_list(&case.body, env, self.multiline());
                    if self.multiline() {
                        self.depth -= 1;
                    }
                }
                if self.multiline() {
                    self.depth -= 1;
                    if !cases.is_empty() {
                        self.newline_indent();
                    }
                }
                self.push_str("}");
            }
            Stmt::TryStatement { block, catch_param, handler, finalizer } => {
                let (block, catch_param, handler, finalizer) =
                    (*block, catch_param.clone(), *handler, *finalizer);
                self.push_str("try");
                self.write_block(block, env);
                if let Some(handler_id) = handler {
                    self.push_str("catch");
                    let catch_env = self.env_of(handler_id, env);
                    if let Some(param) = &catch_param {
                        self.push_str("(");
                        let name = self.declared_name(catch_env, param);
                        self.push_str(&name);
                        self.push_str(")");
                    }
                    self.write_block(handler_id, catch_env);
                }
                if let Some(finalizer) = finalizer {
                    self.push_str("finally");
                    self.write_block(finalizer, env);
                }
            }
            Stmt::WithStatement { object, body } => {
                let (object, body) = (*object, *body);
                self.push_str("with");
                self.push_str("(");
                self.write_expression(object, env);
                self.push_str(")");
                let with_env = self.env_of(body, env);
                self.write_block(body, with_env);
            }
            Stmt::Return { argument } => {
                let argument = *argument;
                self.push_str("return");
                if let Some(arg) = argument {
                    self.write_expression(arg, env);
                }
            }
            Stmt::Break { label } => {
                self.push_str("break");
                if let Some(label) = label {
                    self.push_str(label);
                }
            }
            Stmt::Continue { label } => {
                self.push_str("continue");
                if let Some(label) = label {
                    self.push_str(label);
                }
            }
            Stmt::Throw { argument } => {
                let argument = *argument;
                self.push_str("throw");
                self.write_expression(argument, env);
            }
            Stmt::Labeled { label, body } => {
                let (label, body) = (label.clone(), *body);
                self.push_str(&label);
                self.push_str(":");
                self.write_statement(body, env);
            }
            Stmt::Empty => {}
            Stmt::Debugger => self.push_str("debugger"),
            Stmt::Expression { expression } => {
                let expression = *expression;
                let parens = needs_parens::statement_expression_needs_parens(self.arena, expression);
                self.write_maybe_parens(expression, env, parens);
            }
            Stmt::ImportantComment { text } => {
                if self.settings.preserve_important_comments {
                    self.out.push_str(text);
                    self.last_char = text.chars().last();
                    self.column += text.chars().count() as u32;
                }
            }
            Stmt::DirectivePrologue { directives } => {
                let directives = directives.clone();
                for (i, directive) in directives.iter().enumerate() {
                    if i > 0 {
                        self.push_str(";");
                    }
                    let formatted = string_format::format_string(directive, self.settings.inline_safe_strings);
                    self.push_str(&formatted);
                }
            }
            Stmt::AspNetBlock { raw_text, .. } => {
                self.out.push_str(raw_text);
                self.last_char = raw_text.chars().last();
                self.column += raw_text.chars().count() as u32;
            }
            Stmt::ConditionalCompilationComment { statements } => {
                let statements = statements.clone();
                if self.settings.ignore_conditional_compilation {
                    self.push_str("/*");
                    self.write_statement_list(&statements, env, false);
                    self.push_str("*/");
                } else {
                    self.write_statement_list(&statements, env, false);
                }
            }
            Stmt::ConditionalCompilationOn => self.push_str("/*@cc_on@*/"),
            Stmt::ConditionalCompilationSet { name, value } => {
                let (name, value) = (name.clone(), *value);
                self.push_str("/*@set@");
                self.push_str(&name);
                self.push_str("=");
                self.write_expression(value, env);
                self.push_str("@*/");
            }
            Stmt::ConditionalCompilationIf {
                test,
                consequent,
                alternate,
                taken_is_consequent,
            } => {
                let (test, consequent, alternate, taken_is_consequent) =
                    (*test, consequent.clone(), alternate.clone(), *taken_is_consequent);
                if self.settings.ignore_conditional_compilation {
                    self.push_str("/*@if(");
                    self.write_expression(test, env);
                    self.push_str(")");
                    self.write_statement_list(&consequent, env, false);
                    if !alternate.is_empty() {
                        self.push_str("@else");
                        self.write_statement_list(&alternate, env, false);
                    }
                    self.push_str("@end@*/");
                } else {
                    // The branch was already resolved against the active define
                    // table at parse time; emit only the live arm as ordinary
                    // code, the way a `@cc_on`-aware engine would compile it.
                    let taken = if taken_is_consequent { &consequent } else { &alternate };
                    self.write_statement_list(taken, env, false);
                }
            }
        }
    }

    /// A `for(...)`/`for(...in...)` head slot: either a `var` declaration or
    /// a bare expression.
    fn write_for_head(&mut self, id: NodeId, env: EnvId) {
        match self.arena.node(id) {
            Node::Statement(Stmt::VarStatement { declarations }) => {
                let declarations = declarations.clone();
                self.push_str("var");
                for (i, decl) in declarations.iter().enumerate() {
                    if i > 0 {
                        self.push_str(",");
                    }
                    let name = self.declared_name(env, &decl.name);
                    self.push_str(&name);
                    if let Some(init) = decl.init {
                        self.push_str("=");
                        self.write_expression(init, env);
                    }
                }
            }
            _ => self.write_expression(id, env),
        }
    }

    fn write_function_header(&mut self, keyword: &str, name: Option<&str>, params: &[String], body: NodeId, env: EnvId) {
        if !keyword.is_empty() {
            self.push_str(keyword);
        }
        let fn_env = self.env_of(body, env);
        if let Some(name) = name {
            let resolved = self.declared_name(fn_env, name);
            self.push_str(&resolved);
        }
        self.push_str("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.push_str(",");
            }
            let resolved = self.declared_name(fn_env, param);
            self.push_str(&resolved);
        }
        self.push_str(")");
        self.write_block(body, fn_env);
    }

    fn write_expression(&mut self, id: NodeId, env: EnvId) {
        match self.arena.node(id) {
            Node::Expression(Expr::ArrayLiteral { elements }) => {
                let elements = elements.clone();
                self.push_str("[");
                for (i, el) in elements.iter().enumerate() {
                    if i > 0 {
                        self.push_str(",");
                    }
                    if let Some(el) = el {
                        self.write_expression(*el, env);
                    }
                }
                self.push_str("]");
            }
            Node::Expression(Expr::ObjectLiteral { properties }) => {
                let properties = properties.clone();
                self.push_str("{");
                for (i, prop) in properties.iter().enumerate() {
                    if i > 0 {
                        self.push_str(",");
                    }
                    self.write_object_property(prop, env);
                }
                self.push_str("}");
            }
            Node::Expression(Expr::FunctionObject { kind, name, params, body }) => {
                let (kind, name, params, body) = (*kind, name.clone(), params.clone(), *body);
                match kind {
                    FunctionKind::Getter => self.write_function_header("get", name.as_deref(), &params, body, env),
                    FunctionKind::Setter => self.write_function_header("set", name.as_deref(), &params, body, env),
                    FunctionKind::Declaration | FunctionKind::Expression => {
                        self.write_function_header("function", name.as_deref(), &params, body, env)
                    }
                }
            }
            Node::Expression(Expr::Lookup { name, binding }) => {
                let resolved = self.lookup_name(env, name, *binding);
                self.push_str(&resolved);
            }
            Node::Expression(Expr::Member { object, property, computed }) => {
                let (object, property, computed) = (*object, *property, *computed);
                let parens = needs_parens::member_object_needs_parens(self.arena, object);
                self.write_maybe_parens(object, env, parens);
                if computed {
                    self.push_str("[");
                    self.write_expression(property, env);
                    self.push_str("]");
                } else {
                    self.push_str(".");
                    self.write_property_name(property);
                }
            }
            Node::Expression(Expr::CallExpression { callee, arguments, is_new }) => {
                let (callee, arguments, is_new) = (*callee, arguments.clone(), *is_new);
                if is_new {
                    self.push_str("new");
                    let parens = needs_parens::new_callee_needs_parens(self.arena, callee)
                        || needs_parens::member_object_needs_parens(self.arena, callee);
                    self.write_maybe_parens(callee, env, parens);
                } else {
                    let parens = needs_parens::member_object_needs_parens(self.arena, callee);
                    self.write_maybe_parens(callee, env, parens);
                }
                self.push_str("(");
                for (i, arg) in arguments.iter().enumerate() {
                    if i > 0 {
                        self.push_str(",");
                    }
                    self.write_expression(*arg, env);
                }
                self.push_str(")");
            }
            Node::Expression(Expr::ConstantWrapper(lit)) => {
                let lit = lit.clone();
                self.write_literal(&lit);
            }
            Node::Expression(Expr::ConstantWrapperPP { value, .. }) => {
                let value = (**value).clone();
                self.write_literal(&value);
            }
            Node::Expression(Expr::BinaryOperator { op, left, right }) => {
                let (op, left, right) = (*op, *left, *right);
                let left_parens = needs_parens::binary_operand_needs_parens(self.arena, left, op, false);
                self.write_maybe_parens(left, env, left_parens);
                self.push_str(op.as_str());
                let right_parens = needs_parens::binary_operand_needs_parens(self.arena, right, op, true);
                self.write_maybe_parens(right, env, right_parens);
            }
            Node::Expression(Expr::UnaryOperator { op, operand }) => {
                let (op, operand) = (*op, *operand);
                self.push_str(op.as_str());
                let parens = needs_parens::unary_operand_needs_parens(self.arena, operand);
                self.write_maybe_parens(operand, env, parens);
            }
            Node::Expression(Expr::PostOrPrefixOperator { op, operand }) => {
                let (op, operand) = (*op, *operand);
                match op {
                    IncDecOp::PrefixIncrement => {
                        self.push_str("++");
                        self.write_expression(operand, env);
                    }
                    IncDecOp::PrefixDecrement => {
                        self.push_str("--");
                        self.write_expression(operand, env);
                    }
                    IncDecOp::PostfixIncrement => {
                        self.write_expression(operand, env);
                        self.push_str("++");
                    }
                    IncDecOp::PostfixDecrement => {
                        self.write_expression(operand, env);
                        self.push_str("--");
                    }
                }
            }
            Node::Expression(Expr::Conditional { test, consequent, alternate }) => {
                let (test, consequent, alternate) = (*test, *consequent, *alternate);
                let test_parens = needs_parens::conditional_operand_needs_parens(self.arena, test, true);
                self.write_maybe_parens(test, env, test_parens);
                self.push_str("?");
                let cons_parens = needs_parens::conditional_operand_needs_parens(self.arena, consequent, false);
                self.write_maybe_parens(consequent, env, cons_parens);
                self.push_str(":");
                let alt_parens = needs_parens::conditional_operand_needs_parens(self.arena, alternate, false);
                self.write_maybe_parens(alternate, env, alt_parens);
            }
            Node::Expression(Expr::Grouping { inner }) => {
                let inner = *inner;
                self.write_expression(inner, env);
            }
            Node::Statement(_) => unreachable!("expression position holds a statement node"),
        }
    }

    fn write_property_name(&mut self, id: NodeId) {
        if let Node::Expression(Expr::ConstantWrapper(Literal::String { value, .. })) = self.arena.node(id) {
            let value = value.clone();
            self.push_str(&value);
        }
    }

    fn write_object_property(&mut self, prop: &ObjectProperty, env: EnvId) {
        match prop.kind {
            PropertyKind::Getter | PropertyKind::Setter => self.write_expression(prop.value, env),
            PropertyKind::Data => {
                self.write_property_key(&prop.key);
                self.push_str(":");
                self.write_expression(prop.value, env);
            }
        }
    }

    fn write_property_key(&mut self, key: &PropertyKey) {
        match key {
            PropertyKey::Identifier(name) => self.push_str(name),
            PropertyKey::StringLiteral(value) => {
                let formatted = string_format::format_string(value, self.settings.inline_safe_strings);
                self.push_str(&formatted);
            }
            PropertyKey::NumericLiteral(n) => {
                let formatted = numeric_format::format_number(*n);
                self.push_str(&formatted);
            }
        }
    }

    fn write_literal(&mut self, lit: &Literal) {
        match lit {
            Literal::String { value, .. } => {
                let formatted = string_format::format_string(value, self.settings.inline_safe_strings);
                self.push_str(&formatted);
            }
            Literal::Number(n) => self.push_str(&numeric_format::format_number(*n)),
            Literal::Boolean(b) => self.push_str(if *b { "true" } else { "false" }),
            Literal::Null => self.push_str("null"),
            Literal::Regexp(raw) => self.push_str(raw),
        }
    }
}

fn is_comma_expression(arena: &Arena, id: NodeId) -> bool {
    matches!(arena.node(id), Node::Expression(Expr::BinaryOperator { op: BinaryOp::Comma, .. }))
}

/// Whether a space must be inserted between two adjacent printed tokens so
/// they don't fuse into a different token: two identifier-ish
/// characters (`return`+`x` -> `returnx`), `+`/`-` doubling up into `++`/`--`,
/// or `/` running into a `/` or `*` that would start a comment.
fn needs_separator(prev: char, next: char) -> bool {
    let ident_char = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '$';
    if ident_char(prev) && ident_char(next) {
        return true;
    }
    if (prev == '+' && next == '+') || (prev == '-' && next == '-') {
        return true;
    }
    if prev == '/' && (next == '/' || next == '*') {
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::statements::VarDeclarator;
    use crate::settings::Settings;
    use crate::span::Span;

    fn dummy_span() -> Span {
        Span::point(0, 0, 1, 0)
    }

    #[test]
    fn renders_var_statement_with_resolved_name() {
        let mut arena = Arena::new();
        let one = arena.alloc(Node::Expression(Expr::ConstantWrapper(Literal::Number(1.0))), dummy_span());
        let var_stmt = arena.alloc(
            Node::Statement(Stmt::VarStatement {
                declarations: vec![VarDeclarator { name: "counter".to_string(), init: Some(one) }],
            }),
            dummy_span(),
        );
        let root = arena.alloc(Node::Statement(Stmt::Block { body: vec![var_stmt] }), dummy_span());
        arena.set_root(root);

        let settings = Settings::default();
        let (tree, _errors) = crate::env::analyze(&mut arena, root, &settings);
        let output = render(&arena, &tree, root, &settings);
        assert_eq!(output, "var counter=1");
    }

    #[test]
    fn inserts_space_to_avoid_token_fusion() {
        let mut arena = Arena::new();
        let a = arena.alloc(Node::Expression(Expr::Lookup { name: "a".to_string(), binding: None }), dummy_span());
        let plus_one = arena.alloc(
            Node::Expression(Expr::UnaryOperator { op: crate::ast::expressions::UnaryOp::Plus, operand: a }),
            dummy_span(),
        );
        let b = arena.alloc(Node::Expression(Expr::Lookup { name: "b".to_string(), binding: None }), dummy_span());
        let sum = arena.alloc(
            Node::Expression(Expr::BinaryOperator { op: BinaryOp::Add, left: b, right: plus_one }),
            dummy_span(),
        );
        let stmt = arena.alloc(Node::Statement(Stmt::Expression { expression: sum }), dummy_span());
        arena.set_root(stmt);

        let settings = Settings::default();
        let (tree, _errors) = crate::env::analyze(&mut arena, stmt, &settings);
        let output = render(&arena, &tree, stmt, &settings);
        assert_eq!(output, "b+ +a");
    }

    #[test]
    fn last_statement_omits_trailing_semicolon_by_default() {
        let mut arena = Arena::new();
        let a = arena.alloc(Node::Expression(Expr::Lookup { name: "a".to_string(), binding: None }), dummy_span());
        let stmt_a = arena.alloc(Node::Statement(Stmt::Expression { expression: a }), dummy_span());
        let b = arena.alloc(Node::Expression(Expr::Lookup { name: "b".to_string(), binding: None }), dummy_span());
        let stmt_b = arena.alloc(Node::Statement(Stmt::Expression { expression: b }), dummy_span());
        let root = arena.alloc(Node::Statement(Stmt::Block { body: vec![stmt_a, stmt_b] }), dummy_span());
        arena.set_root(root);

        let settings = Settings::default();
        let (tree, _errors) = crate::env::analyze(&mut arena, root, &settings);
        let output = render(&arena, &tree, root, &settings);
        assert_eq!(output, "a;b");
    }

    #[test]
    fn empty_statements_are_skipped() {
        let mut arena = Arena::new();
        let empty = arena.alloc(Node::Statement(Stmt::Empty), dummy_span());
        let a = arena.alloc(Node::Expression(Expr::Lookup { name: "a".to_string(), binding: None }), dummy_span());
        let stmt_a = arena.alloc(Node::Statement(Stmt::Expression { expression: a }), dummy_span());
        let root = arena.alloc(Node::Statement(Stmt::Block { body: vec![empty, stmt_a] }), dummy_span());
        arena.set_root(root);

        let settings = Settings::default();
        let (tree, _errors) = crate::env::analyze(&mut arena, root, &settings);
        let output = render(&arena, &tree, root, &settings);
        assert_eq!(output, "a");
    }

    #[test]
    fn function_expression_statement_gets_wrapping_parens() {
        let mut arena = Arena::new();
        let body = arena.alloc(Node::Statement(Stmt::Block { body: vec![] }), dummy_span());
        let func = arena.alloc(
            Node::Expression(Expr::FunctionObject {
                kind: FunctionKind::Expression,
                name: None,
                params: vec![],
                body,
            }),
            dummy_span(),
        );
        let stmt = arena.alloc(Node::Statement(Stmt::Expression { expression: func }), dummy_span());
        arena.set_root(stmt);

        let settings = Settings::default();
        let (tree, _errors) = crate::env::analyze(&mut arena, stmt, &settings);
        let output = render(&arena, &tree, stmt, &settings);
        assert_eq!(output, "(function(){})");
    }
}
