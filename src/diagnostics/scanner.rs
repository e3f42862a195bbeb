//! Errors produced while tokenizing source text.

/// Lexical errors the scanner can recover from without aborting.
///
/// Mirrors `errors/tokenize.rs::CodeErrorKind` in shape: a `thiserror`-derived
/// enum with one message-bearing variant per recoverable lexical failure.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScannerErrorKind {
    /// A `"` or `'` string literal ran to end of line/file without a closing quote.
    #[error("Unterminated string literal.")]
    UnterminatedString,
    /// A `/* ... */` comment never saw its closing `*/`.
    #[error("Unterminated comment.")]
    UnterminatedComment,
    /// A regular-expression literal ran to end of line without a closing `/`.
    #[error("Unterminated regular expression literal.")]
    UnterminatedRegex,
    /// A `\` escape sequence inside a string or identifier was malformed.
    #[error("Invalid escape sequence '{escape}'.")]
    InvalidEscape {
        /// The raw escape text, e.g. `\\q`.
        escape: String,
    },
    /// A byte sequence that cannot begin any token.
    #[error("Unrecognized character '{character}'.")]
    InvalidCharacter {
        /// The offending character.
        character: char,
    },
    /// A numeric literal's digits didn't match any supported radix/format.
    #[error("Invalid numeric literal '{text}'.")]
    InvalidNumericLiteral {
        /// The raw text scanned so far.
        text: String,
    },
    /// A conditional-compilation / preprocessor construct was malformed.
    #[error("Invalid preprocessor directive: {reason}")]
    InvalidPreprocessor {
        /// What went wrong.
        reason: String,
    },
    /// Scanner reached end of input while a token was still open.
    #[error("Unexpected end of source.")]
    UnexpectedEndOfSource,
}
