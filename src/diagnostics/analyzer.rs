//! Errors produced while building the environment tree and resolving references.

/// Semantic diagnostics from the Analyzer pass.
///
/// Unlike lexical/syntactic errors these never halt parsing; the affected
/// binding is flagged and later passes degrade gracefully.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerErrorKind {
    /// A `Lookup` did not resolve to any binding in the environment chain.
    #[error("'{name}' is not defined.")]
    UndefinedReference {
        /// The unresolved identifier.
        name: String,
    },
    /// Two named function expressions in the same environment share a name.
    #[error("Ambiguous named function expression '{name}'.")]
    AmbiguousNamedFunctionExpression {
        /// The colliding name.
        name: String,
    },
    /// `with` or `eval` appeared where a strict directive prologue forbids it.
    #[error("'{construct}' is not allowed in strict mode.")]
    StrictModeViolation {
        /// `"with"` or `"eval"`.
        construct: &'static str,
    },
    /// `delete` applied directly to an identifier binding rather than a property.
    #[error("Cannot delete binding '{name}'.")]
    DeleteOfBinding {
        /// The binding name being deleted.
        name: String,
    },
    /// A `let`/`const`-shaped redeclaration of an existing binding in the
    /// same environment.
    #[error("'{name}' has already been declared in this scope.")]
    DuplicateBinding {
        /// The duplicated name.
        name: String,
    },
}
