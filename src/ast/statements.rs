//! Statement node variants.

use crate::ast::NodeId;

/// A single `name` (and optional initializer) inside a `var` statement.
/// Deduplication across a `VarStatement`'s declarators happens in the parser
///, not here.
#[derive(Debug, Clone)]
pub struct VarDeclarator {
    /// The declared name.
    pub name: String,
    /// The initializer expression, if any.
    pub init: Option<NodeId>,
}

/// One `case`/`default` arm of a `switch`.
#[derive(Debug, Clone)]
pub struct SwitchCase {
    /// `None` for the `default` arm.
    pub test: Option<NodeId>,
    /// Statements belonging to this arm (falls through if no `break`).
    pub body: Vec<NodeId>,
}

/// Statement-position AST nodes.
#[derive(Debug, Clone)]
pub enum Stmt {
    /// `{ ... }`. Every `if`/`while`/`for`/`do`/`with` body is wrapped in one
    /// after parsing.
    Block { body: Vec<NodeId> },
    /// `var a = 1, b;`.
    VarStatement { declarations: Vec<VarDeclarator> },
    /// `if (test) consequent else alternate`.
    IfStatement {
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
    },
    /// `for (init; test; update) body`.
    ForStatement {
        init: Option<NodeId>,
        test: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    },
    /// `for (left in right) body`.
    ForInStatement {
        left: NodeId,
        right: NodeId,
        body: NodeId,
    },
    /// `while (test) body`.
    WhileStatement { test: NodeId, body: NodeId },
    /// `do body while (test);`.
    DoWhileStatement { body: NodeId, test: NodeId },
    /// `switch (discriminant) { cases }`.
    SwitchStatement {
        discriminant: NodeId,
        cases: Vec<SwitchCase>,
    },
    /// `try block catch (param) handler finally finalizer`.
    TryStatement {
        block: NodeId,
        catch_param: Option<String>,
        handler: Option<NodeId>,
        finalizer: Option<NodeId>,
    },
    /// `with (object) body`.
    WithStatement { object: NodeId, body: NodeId },
    /// `return argument;`.
    Return { argument: Option<NodeId> },
    /// `break label;`.
    Break { label: Option<String> },
    /// `continue label;`.
    Continue { label: Option<String> },
    /// `throw argument;`.
    Throw { argument: NodeId },
    /// `label: body`.
    Labeled { label: String, body: NodeId },
    /// A bare `;`.
    Empty,
    /// `debugger;`.
    Debugger,
    /// An expression used as a statement, e.g. `f();`.
    Expression { expression: NodeId },
    /// A `/*! ... */` comment the Output Visitor must reproduce verbatim.
    ImportantComment { text: String },
    /// The leading run of string-literal-expression-statements ("use strict"
    /// and similar) at the top of a program or function body.
    DirectivePrologue { directives: Vec<String> },
    /// An ASP.NET `<% ... %>` block, recognized verbatim when
    /// `allow_embedded_aspnet_blocks` is set.
    AspNetBlock {
        raw_text: String,
        followed_by_semicolon: bool,
    },
    /// A container for a run of parsed conditional-compilation statements,
    /// reproduced as a comment when `ignore_conditional_compilation` is set.
    ConditionalCompilationComment { statements: Vec<NodeId> },
    /// `/*@cc_on@*/`, enabling conditional compilation for the rest of the file.
    ConditionalCompilationOn,
    /// `/*@set @name = expr@*/`.
    ConditionalCompilationSet { name: String, value: NodeId },
    /// One arm of a `/*@if ... @elif ... @else ... @end@*/` chain.
    ///
    /// The minifier resolves this at parse time against the active
    /// `DefineTable`, the way a `@cc_on`-aware engine would: `taken_is_consequent`
    /// records which of `consequent`/`alternate` is the live branch, and the
    /// Output Visitor emits only that branch's statements (no `@if`/`@*/`
    /// wrapper) unless `ignore_conditional_compilation` is set.
    ConditionalCompilationIf {
        test: NodeId,
        consequent: Vec<NodeId>,
        alternate: Vec<NodeId>,
        taken_is_consequent: bool,
    },
}

impl Stmt {
    /// Direct children, in source order, snapshotted for safe traversal
    /// during mutation.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Stmt::Block { body } => body.clone(),
            Stmt::VarStatement { declarations } => {
                declarations.iter().filter_map(|d| d.init).collect()
            }
            Stmt::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                let mut out = vec![*test, *consequent];
                if let Some(alt) = alternate {
                    out.push(*alt);
                }
                out
            }
            Stmt::ForStatement {
                init,
                test,
                update,
                body,
            } => [*init, *test, *update]
                .into_iter()
                .flatten()
                .chain(std::iter::once(*body))
                .collect(),
            Stmt::ForInStatement { left, right, body } => vec![*left, *right, *body],
            Stmt::WhileStatement { test, body } => vec![*test, *body],
            Stmt::DoWhileStatement { body, test } => vec![*body, *test],
            Stmt::SwitchStatement { discriminant, cases } => {
                let mut out = vec![*discriminant];
                for case in cases {
                    out.extend(case.test);
                    out.extend(case.body.iter().copied());
                }
                out
            }
            Stmt::TryStatement {
                block,
                handler,
                finalizer,
                ..
            } => [Some(*block), *handler, *finalizer].into_iter().flatten().collect(),
            Stmt::WithStatement { object, body } => vec![*object, *body],
            Stmt::Return { argument } => argument.into_iter().collect(),
            Stmt::Break { .. } | Stmt::Continue { .. } | Stmt::Empty | Stmt::Debugger => vec![],
            Stmt::Throw { argument } => vec![*argument],
            Stmt::Labeled { body, .. } => vec![*body],
            Stmt::Expression { expression } => vec![*expression],
            Stmt::ImportantComment { .. } => vec![],
            Stmt::DirectivePrologue { .. } => vec![],
            Stmt::AspNetBlock { .. } => vec![],
            Stmt::ConditionalCompilationComment { statements } => statements.clone(),
            Stmt::ConditionalCompilationOn => vec![],
            Stmt::ConditionalCompilationSet { value, .. } => vec![*value],
            Stmt::ConditionalCompilationIf {
                test,
                consequent,
                alternate,
                ..
            } => std::iter::once(*test)
                .chain(consequent.iter().copied())
                .chain(alternate.iter().copied())
                .collect(),
        }
    }

    /// Rewrite every child slot equal to `old` to `new`.
    pub fn replace_child_id(&mut self, old: NodeId, new: NodeId) {
        let swap = |slot: &mut NodeId| {
            if *slot == old {
                *slot = new;
            }
        };
        let swap_opt = |slot: &mut Option<NodeId>| {
            if *slot == Some(old) {
                *slot = Some(new);
            }
        };
        let swap_vec = |slots: &mut Vec<NodeId>| {
            for slot in slots.iter_mut() {
                if *slot == old {
                    *slot = new;
                }
            }
        };
        match self {
            Stmt::Block { body } => swap_vec(body),
            Stmt::VarStatement { declarations } => {
                for d in declarations {
                    swap_opt(&mut d.init);
                }
            }
            Stmt::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                swap(test);
                swap(consequent);
                swap_opt(alternate);
            }
            Stmt::ForStatement {
                init,
                test,
                update,
                body,
            } => {
                swap_opt(init);
                swap_opt(test);
                swap_opt(update);
                swap(body);
            }
            Stmt::ForInStatement { left, right, body } => {
                swap(left);
                swap(right);
                swap(body);
            }
            Stmt::WhileStatement { test, body } => {
                swap(test);
                swap(body);
            }
            Stmt::DoWhileStatement { body, test } => {
                swap(body);
                swap(test);
            }
            Stmt::SwitchStatement { discriminant, cases } => {
                swap(discriminant);
                for case in cases {
                    swap_opt(&mut case.test);
                    swap_vec(&mut case.body);
                }
            }
            Stmt::TryStatement {
                block,
                handler,
                finalizer,
                ..
            } => {
                swap(block);
                swap_opt(handler);
                swap_opt(finalizer);
            }
            Stmt::WithStatement { object, body } => {
                swap(object);
                swap(body);
            }
            Stmt::Return { argument } => swap_opt(argument),
            Stmt::Break { .. } | Stmt::Continue { .. } | Stmt::Empty | Stmt::Debugger => {}
            Stmt::Throw { argument } => swap(argument),
            Stmt::Labeled { body, .. } => swap(body),
            Stmt::Expression { expression } => swap(expression),
            Stmt::ImportantComment { .. } => {}
            Stmt::DirectivePrologue { .. } => {}
            Stmt::AspNetBlock { .. } => {}
            Stmt::ConditionalCompilationComment { statements } => swap_vec(statements),
            Stmt::ConditionalCompilationOn => {}
            Stmt::ConditionalCompilationSet { value, .. } => swap(value),
            Stmt::ConditionalCompilationIf {
                test,
                consequent,
                alternate,
                ..
            } => {
                swap(test);
                swap_vec(consequent);
                swap_vec(alternate);
            }
        }
    }
}
