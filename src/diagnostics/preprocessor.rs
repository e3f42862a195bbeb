//! Errors produced while evaluating conditional-compilation directives.

/// Malformed conditional-compilation constructs.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PreprocessorErrorKind {
    /// `/*@if(expr)*/` with an expression the restricted CC grammar can't parse.
    #[error("Malformed '@if' expression: {reason}")]
    MalformedIf {
        /// Why the expression was rejected.
        reason: String,
    },
    /// `/*@set @name = expr*/` referencing a name that fails identifier validation.
    #[error("Invalid '@set' target '{name}'.")]
    InvalidSetTarget {
        /// The rejected define name.
        name: String,
    },
    /// A `/*@if ... */` block was never closed with `/*@end@*/`.
    #[error("Unclosed conditional-compilation block.")]
    UnclosedBlock,
    /// `@name` referenced a define that was never `@set` nor supplied via
    /// `preprocessor_defines`.
    #[error("Undefined preprocessor variable '@{name}'.")]
    UndefinedVariable {
        /// The referenced define name, without the leading `@`.
        name: String,
    },
}
