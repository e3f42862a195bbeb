//! Static keyword and punctuator lookup tables.
//!
//! A `phf` perfect-hash map from literal text to a token kind, with explicit
//! ordering notes wherever one key is a prefix of another (`"in"` vs
//! `"instanceof"`, `"<"` vs `"<="`).

use crate::scanner::TokenKind;

/// ECMAScript reserved words recognized as keywords in every context.
///
/// Order does not matter for a `phf::Map` lookup: identifiers are scanned to
/// their full maximal length first, then looked up whole, so `"in"` and
/// `"instanceof"` never collide despite one being a prefix of the other.
pub static KEYWORDS: phf::Map<&'static str, TokenKind> = phf::phf_map! {
    "break" => TokenKind::Break,
    "case" => TokenKind::Case,
    "catch" => TokenKind::Catch,
    "continue" => TokenKind::Continue,
    "debugger" => TokenKind::Debugger,
    "default" => TokenKind::Default,
    "delete" => TokenKind::Delete,
    "do" => TokenKind::Do,
    "else" => TokenKind::Else,
    "finally" => TokenKind::Finally,
    "for" => TokenKind::For,
    "function" => TokenKind::Function,
    "if" => TokenKind::If,
    "in" => TokenKind::In,
    "instanceof" => TokenKind::InstanceOf,
    "new" => TokenKind::New,
    "return" => TokenKind::Return,
    "switch" => TokenKind::Switch,
    "this" => TokenKind::This,
    "throw" => TokenKind::Throw,
    "try" => TokenKind::Try,
    "typeof" => TokenKind::TypeOf,
    "var" => TokenKind::Var,
    "void" => TokenKind::Void,
    "while" => TokenKind::While,
    "with" => TokenKind::With,
    "null" => TokenKind::NullLiteral,
    "true" => TokenKind::TrueLiteral,
    "false" => TokenKind::FalseLiteral,
};

/// Words reserved by ECMAScript for possible future use. Only relevant when
/// `is_keyword(s, strict=true)` is consulted; not used as
/// ordinary keywords otherwise.
pub static FUTURE_RESERVED_WORDS: phf::Set<&'static str> = phf::phf_set! {
    "class", "const", "enum", "export", "extends", "import", "super",
    "implements", "interface", "let", "package", "private", "protected",
    "public", "static", "yield",
};

/// Multi-character punctuators, ordered longest-first so the scanner's
/// greedy match never stops early (e.g. `"==="` before `"=="` before `"="`).
pub static PUNCTUATORS: &[(&str, TokenKind)] = &[
    (">>>=", TokenKind::UnsignedRightShiftAssign),
    ("===", TokenKind::StrictEquals),
    ("!==", TokenKind::StrictNotEquals),
    (">>>", TokenKind::UnsignedRightShift),
    ("<<=", TokenKind::LeftShiftAssign),
    (">>=", TokenKind::RightShiftAssign),
    ("**=", TokenKind::ExponentAssign),
    ("==", TokenKind::Equals),
    ("!=", TokenKind::NotEquals),
    ("<=", TokenKind::LessThanEquals),
    (">=", TokenKind::GreaterThanEquals),
    ("&&", TokenKind::LogicalAnd),
    ("||", TokenKind::LogicalOr),
    ("??", TokenKind::NullishCoalesce),
    ("++", TokenKind::Increment),
    ("--", TokenKind::Decrement),
    ("<<", TokenKind::LeftShift),
    (">>", TokenKind::RightShift),
    ("+=", TokenKind::PlusAssign),
    ("-=", TokenKind::MinusAssign),
    ("*=", TokenKind::MultiplyAssign),
    ("/=", TokenKind::DivideAssign),
    ("%=", TokenKind::ModuloAssign),
    ("&=", TokenKind::BitwiseAndAssign),
    ("|=", TokenKind::BitwiseOrAssign),
    ("^=", TokenKind::BitwiseXorAssign),
    ("**", TokenKind::Exponent),
    ("=>", TokenKind::Arrow),
    ("?.", TokenKind::OptionalChain),
    ("{", TokenKind::LeftBrace),
    ("}", TokenKind::RightBrace),
    ("(", TokenKind::LeftParen),
    (")", TokenKind::RightParen),
    ("[", TokenKind::LeftBracket),
    ("]", TokenKind::RightBracket),
    (".", TokenKind::Dot),
    (";", TokenKind::Semicolon),
    (",", TokenKind::Comma),
    ("<", TokenKind::LessThan),
    (">", TokenKind::GreaterThan),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Multiply),
    ("/", TokenKind::Divide),
    ("%", TokenKind::Modulo),
    ("&", TokenKind::BitwiseAnd),
    ("|", TokenKind::BitwiseOr),
    ("^", TokenKind::BitwiseXor),
    ("!", TokenKind::LogicalNot),
    ("~", TokenKind::BitwiseNot),
    ("?", TokenKind::Question),
    (":", TokenKind::Colon),
    ("=", TokenKind::Assign),
};
