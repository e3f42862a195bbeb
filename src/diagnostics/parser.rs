//! Errors produced while parsing a token stream into an AST.

use crate::scanner::TokenKind;

/// Syntactic errors the parser recovers from by synchronizing to the next
/// statement boundary.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParserErrorKind {
    /// Parser expected one of several token kinds and found something else.
    #[error("Expected {expected:?}, found {found:?}.")]
    UnexpectedToken {
        /// The token kinds that would have been accepted here.
        expected: Vec<TokenKind>,
        /// What was actually seen.
        found: TokenKind,
    },
    /// A specific closing token (e.g. `)`) never appeared.
    #[error("Missing expected '{expected}'.")]
    MissingExpectedToken {
        /// Textual form of the missing token, e.g. `")"`.
        expected: &'static str,
    },
    /// `break`/`continue` outside of a loop or switch, or used with an
    /// unresolvable label.
    #[error("'{keyword}' is not valid here.")]
    MisplacedJumpStatement {
        /// `"break"` or `"continue"`.
        keyword: &'static str,
    },
    /// `return` outside of a function body.
    #[error("'return' statement is not within a function.")]
    ReturnOutsideFunction,
    /// Malformed `for (... in ...)` / `for (... of ...)` head.
    #[error("Invalid for-in/for-of loop head.")]
    InvalidForInHead,
    /// A reserved word was used where an identifier was required.
    #[error("'{word}' is a reserved word and cannot be used as an identifier.")]
    ReservedWordMisuse {
        /// The offending word.
        word: String,
    },
    /// Two declarations of the same name conflict outright (e.g. `let` twice).
    #[error("Duplicate declaration of '{name}'.")]
    DuplicateDeclaration {
        /// The declared name.
        name: String,
    },
}
