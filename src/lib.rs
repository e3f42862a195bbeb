#![warn(missing_docs)]
//! # Summary
//!
//! `jsminify` is a library for parsing, analyzing, and minifying JavaScript
//! source text. It is a foundational library for tools that need to shrink
//! JavaScript for delivery while preserving behavior: renaming locals,
//! folding constants, dropping dead code, and rewriting a handful of
//! syntactic shapes to their shortest equivalent form.
//!
//! ## Design Goals
//!
//! `jsminify` is designed to be fast, predictable, and safe to run on
//! arbitrary third-party scripts: malformed input is recovered from rather
//! than panicking, and every non-fatal diagnostic is reported rather than
//! silently swallowed. The primary entry point,
//! [`minify_javascript`](crate::minifier::minify_javascript), takes an owned
//! source string and a [`Settings`](crate::settings::Settings) value and
//! returns a single [`MinifyResult`](crate::minifier::MinifyResult)
//! containing the minified text, every diagnostic raised, every undefined
//! reference found, and an optional source map.
//!
//! ## Minifying a script
//!
//! ```rust
//! use jsminify::{minify_javascript, Settings};
//!
//! let result = minify_javascript(
//!     "function outer() { var longVariableName = 1; return longVariableName; }".to_string(),
//!     Settings::default(),
//! );
//!
//! assert!(result.errors.iter().all(|d| d.severity != 0));
//! assert!(!result.output.contains("longVariableName"));
//! ```
//!
//! Note that in the example above, renaming is on by default
//! (`LocalRenaming::CrunchAll`), so the long parameter name is replaced with
//! a short generated identifier. Diagnostics never halt a session unless one
//! carries severity `0`; see [`MinifyResult`](crate::minifier::MinifyResult)'s
//! documentation for the exact contract.
//!
//! ## Preprocessing only
//!
//! A caller that only needs conditional-compilation directives evaluated,
//! without full analysis or renaming, can call
//! [`preprocess_only`](crate::minifier::preprocess_only) directly:
//!
//! ```rust
//! use jsminify::{preprocess_only, Settings};
//!
//! let (text, diagnostics) = preprocess_only("var a = 1;".to_string(), Settings::default());
//! assert!(diagnostics.is_empty());
//! assert!(text.contains('a'));
//! ```

pub mod ast;
pub mod diagnostics;
pub mod env;
pub mod minifier;
pub mod output;
pub mod parse_result;
pub mod parser;
pub mod preprocessor;
pub mod rename;
pub mod resource_strings;
pub mod scanner;
pub mod settings;
pub mod sourcemap;
pub mod span;
pub mod transform;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crate::diagnostics::Diagnostic;
pub use crate::minifier::{minify_javascript, preprocess_only, MinifyResult, Minifier, UndefinedRef};
pub use crate::settings::Settings;
