//! Expression node variants.

use crate::ast::NodeId;
use crate::env::BindingId;

/// One entry of an `ObjectLiteral`: a key (identifier, string, or numeric)
/// and its value, or a getter/setter marker.
#[derive(Debug, Clone)]
pub struct ObjectProperty {
    /// How the key was written.
    pub key: PropertyKey,
    /// The property's value expression.
    pub value: NodeId,
    /// Whether this entry is a getter, setter, or a plain data property.
    pub kind: PropertyKind,
}

/// The syntactic form of an object literal key.
#[derive(Debug, Clone)]
pub enum PropertyKey {
    /// `{ name: ... }`.
    Identifier(String),
    /// `{ "name": ... }`.
    StringLiteral(String),
    /// `{ 0: ... }`.
    NumericLiteral(f64),
}

/// Whether an `ObjectLiteral` entry is a data property or an accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// A plain `key: value` entry.
    Data,
    /// `get key() { ... }`.
    Getter,
    /// `set key(v) { ... }`.
    Setter,
}

/// What kind of `FunctionObject` this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    /// `function name() { ... }` in statement position.
    Declaration,
    /// `function name() { ... }` or `function() { ... }` in expression position.
    Expression,
    /// An object-literal `get` accessor body.
    Getter,
    /// An object-literal `set` accessor body.
    Setter,
}

/// A constant literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A string literal's decoded value plus its original quote character,
    /// so the Output Visitor can re-minimize quoting.
    String { value: String, original_quote: char },
    /// A numeric literal's value.
    Number(f64),
    /// `true` / `false`.
    Boolean(bool),
    /// `null`.
    Null,
    /// A regular expression literal's raw source text, round-tripped
    /// verbatim.
    Regexp(String),
}

/// Binary operator kinds, used by both `BinaryOperator` nodes and precedence
/// lookup in the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum BinaryOp {
    Add, Subtract, Multiply, Divide, Modulo, Exponent,
    Equals, NotEquals, StrictEquals, StrictNotEquals,
    LessThan, LessThanEquals, GreaterThan, GreaterThanEquals,
    LeftShift, RightShift, UnsignedRightShift,
    BitwiseAnd, BitwiseOr, BitwiseXor,
    LogicalAnd, LogicalOr, NullishCoalesce,
    InstanceOf, In,
    /// Plain `=`. Compound assignments keep their own operator
    /// variant below rather than collapsing into this one, so the Output
    /// Visitor can re-emit `+=` instead of expanding it to `a=a+b`.
    Assign,
    PlusAssign, MinusAssign, MultiplyAssign, DivideAssign, ModuloAssign, ExponentAssign,
    LeftShiftAssign, RightShiftAssign, UnsignedRightShiftAssign,
    BitwiseAndAssign, BitwiseOrAssign, BitwiseXorAssign,
    Comma,
}

impl BinaryOp {
    /// Whether this operator is `=` or a compound assignment.
    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            BinaryOp::Assign
                | BinaryOp::PlusAssign
                | BinaryOp::MinusAssign
                | BinaryOp::MultiplyAssign
                | BinaryOp::DivideAssign
                | BinaryOp::ModuloAssign
                | BinaryOp::ExponentAssign
                | BinaryOp::LeftShiftAssign
                | BinaryOp::RightShiftAssign
                | BinaryOp::UnsignedRightShiftAssign
                | BinaryOp::BitwiseAndAssign
                | BinaryOp::BitwiseOrAssign
                | BinaryOp::BitwiseXorAssign
        )
    }

    /// The source text this operator is printed as.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Exponent => "**",
            BinaryOp::Equals => "==",
            BinaryOp::NotEquals => "!=",
            BinaryOp::StrictEquals => "===",
            BinaryOp::StrictNotEquals => "!==",
            BinaryOp::LessThan => "<",
            BinaryOp::LessThanEquals => "<=",
            BinaryOp::GreaterThan => ">",
            BinaryOp::GreaterThanEquals => ">=",
            BinaryOp::LeftShift => "<<",
            BinaryOp::RightShift => ">>",
            BinaryOp::UnsignedRightShift => ">>>",
            BinaryOp::BitwiseAnd => "&",
            BinaryOp::BitwiseOr => "|",
            BinaryOp::BitwiseXor => "^",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::LogicalOr => "||",
            BinaryOp::NullishCoalesce => "??",
            BinaryOp::InstanceOf => "instanceof",
            BinaryOp::In => "in",
            BinaryOp::Assign => "=",
            BinaryOp::PlusAssign => "+=",
            BinaryOp::MinusAssign => "-=",
            BinaryOp::MultiplyAssign => "*=",
            BinaryOp::DivideAssign => "/=",
            BinaryOp::ModuloAssign => "%=",
            BinaryOp::ExponentAssign => "**=",
            BinaryOp::LeftShiftAssign => "<<=",
            BinaryOp::RightShiftAssign => ">>=",
            BinaryOp::UnsignedRightShiftAssign => ">>>=",
            BinaryOp::BitwiseAndAssign => "&=",
            BinaryOp::BitwiseOrAssign => "|=",
            BinaryOp::BitwiseXorAssign => "^=",
            BinaryOp::Comma => ",",
        }
    }
}

/// Unary operator kinds (prefix, non-increment/decrement).
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum UnaryOp {
    Plus, Minus, LogicalNot, BitwiseNot, TypeOf, Void, Delete,
}

impl UnaryOp {
    /// The source text this operator is printed as, including the trailing
    /// space word-operators (`typeof`, `void`, `delete`) need before their
    /// operand.
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::LogicalNot => "!",
            UnaryOp::BitwiseNot => "~",
            UnaryOp::TypeOf => "typeof",
            UnaryOp::Void => "void",
            UnaryOp::Delete => "delete",
        }
    }

    /// Word operators need a separating space (or comment) before an operand
    /// that could otherwise fuse with the keyword; symbolic ones don't.
    pub fn is_word(self) -> bool {
        matches!(self, UnaryOp::TypeOf | UnaryOp::Void | UnaryOp::Delete)
    }
}

/// `++`/`--`, prefix or postfix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncDecOp {
    /// `++operand`.
    PrefixIncrement,
    /// `--operand`.
    PrefixDecrement,
    /// `operand++`.
    PostfixIncrement,
    /// `operand--`.
    PostfixDecrement,
}

/// Expression-position AST nodes.
#[derive(Debug, Clone)]
pub enum Expr {
    /// `[a, b, c]`.
    ArrayLiteral { elements: Vec<Option<NodeId>> },
    /// `{ key: value, ... }`.
    ObjectLiteral { properties: Vec<ObjectProperty> },
    /// A function declaration, expression, getter, or setter.
    FunctionObject {
        kind: FunctionKind,
        /// The syntactic name, if any. Present without necessarily having a
        /// binding yet for expression-position named functions.
        name: Option<String>,
        params: Vec<String>,
        body: NodeId,
    },
    /// An identifier reference. Resolves to a [`BindingId`] during analysis;
    /// `None` before the Analyzer has run.
    Lookup { name: String, binding: Option<BindingId> },
    /// `object.property` or `object[property]`.
    Member {
        object: NodeId,
        property: NodeId,
        computed: bool,
    },
    /// `callee(arguments)`, optionally `new callee(arguments)`.
    CallExpression {
        callee: NodeId,
        arguments: Vec<NodeId>,
        is_new: bool,
    },
    /// A literal value.
    ConstantWrapper(Literal),
    /// A preprocessor constant substituted by `@name`; retains its source name for diagnostics even
    /// after the value is known.
    ConstantWrapperPP { name: String, value: Box<Literal> },
    /// `lhs op rhs`.
    BinaryOperator { op: BinaryOp, left: NodeId, right: NodeId },
    /// `op operand` (non increment/decrement prefix operators).
    UnaryOperator { op: UnaryOp, operand: NodeId },
    /// `++operand`, `operand--`, etc.
    PostOrPrefixOperator { op: IncDecOp, operand: NodeId },
    /// `test ? consequent : alternate`.
    Conditional {
        test: NodeId,
        consequent: NodeId,
        alternate: NodeId,
    },
    /// `( inner )`, kept only while parenthesization is semantically load
    /// bearing; the Output Visitor re-derives parens from `needs_parens`
    /// rather than this node surviving to emission.
    Grouping { inner: NodeId },
}

impl Expr {
    /// Direct children, in source order.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Expr::ArrayLiteral { elements } => elements.iter().flatten().copied().collect(),
            Expr::ObjectLiteral { properties } => properties.iter().map(|p| p.value).collect(),
            Expr::FunctionObject { body, .. } => vec![*body],
            Expr::Lookup { .. } => vec![],
            Expr::Member { object, property, .. } => vec![*object, *property],
            Expr::CallExpression { callee, arguments, .. } => {
                std::iter::once(*callee).chain(arguments.iter().copied()).collect()
            }
            Expr::ConstantWrapper(_) => vec![],
            Expr::ConstantWrapperPP { .. } => vec![],
            Expr::BinaryOperator { left, right, .. } => vec![*left, *right],
            Expr::UnaryOperator { operand, .. } => vec![*operand],
            Expr::PostOrPrefixOperator { operand, .. } => vec![*operand],
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => vec![*test, *consequent, *alternate],
            Expr::Grouping { inner } => vec![*inner],
        }
    }

    /// Rewrite every child slot equal to `old` to `new`.
    pub fn replace_child_id(&mut self, old: NodeId, new: NodeId) {
        let swap = |slot: &mut NodeId| {
            if *slot == old {
                *slot = new;
            }
        };
        match self {
            Expr::ArrayLiteral { elements } => {
                for slot in elements.iter_mut().flatten() {
                    if *slot == old {
                        *slot = new;
                    }
                }
            }
            Expr::ObjectLiteral { properties } => {
                for p in properties.iter_mut() {
                    swap(&mut p.value);
                }
            }
            Expr::FunctionObject { body, .. } => swap(body),
            Expr::Lookup { .. } => {}
            Expr::Member { object, property, .. } => {
                swap(object);
                swap(property);
            }
            Expr::CallExpression { callee, arguments, .. } => {
                swap(callee);
                for arg in arguments.iter_mut() {
                    swap(arg);
                }
            }
            Expr::ConstantWrapper(_) => {}
            Expr::ConstantWrapperPP { .. } => {}
            Expr::BinaryOperator { left, right, .. } => {
                swap(left);
                swap(right);
            }
            Expr::UnaryOperator { operand, .. } => swap(operand),
            Expr::PostOrPrefixOperator { operand, .. } => swap(operand),
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                swap(test);
                swap(consequent);
                swap(alternate);
            }
            Expr::Grouping { inner } => swap(inner),
        }
    }
}
