//! Errors produced while validating a `Settings` value.

/// Configuration errors. These are caller errors: an invalid `Settings` value
/// handed to a session, not something produced during scanning/parsing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// A manual rename's `to` name names something that isn't a valid identifier.
    #[error("Rename target '{name}' is not a valid identifier.")]
    InvalidRenameTarget {
        /// The offending target name.
        name: String,
    },
    /// A `preprocessor_defines` key isn't a valid identifier.
    #[error("Preprocessor define name '{name}' is not a valid identifier.")]
    InvalidDefineName {
        /// The offending define name.
        name: String,
    },
    /// Two manual rename pairs disagree about the same source name.
    #[error("Contradictory manual renames for '{name}': '{first}' and '{second}'.")]
    ContradictoryManualRenames {
        /// The source name being renamed two different ways.
        name: String,
        /// The first target seen.
        first: String,
        /// The second, conflicting target.
        second: String,
    },
}
