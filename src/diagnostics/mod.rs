//! Diagnostic types shared across every error-producing subsystem.
//!
//! A single [`Severity`] and [`ErrorDetails`] pair is reused by every
//! subsystem's `XxxErrorKind`, and rendering is delegated to `ariadne`.
//! [`Diagnostic`] is the flattened, serializable projection handed across
//! the library boundary so callers do not need an `ariadne` dependency of
//! their own.

pub mod analyzer;
pub mod config;
pub mod parser;
pub mod preprocessor;
pub mod scanner;

pub use analyzer::AnalyzerErrorKind;
pub use config::ConfigErrorKind;
pub use parser::ParserErrorKind;
pub use preprocessor::PreprocessorErrorKind;
pub use scanner::ScannerErrorKind;

use crate::span::Span;
use ariadne::{Label, Report, ReportKind, Source};
use std::fmt::{Debug, Display};

/// Severity level of a diagnostic.
///
/// Numeric values match a `0..4` scale: `0` halts emission, the rest are
/// advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Fatal: prevents the Output Visitor from writing.
    Error = 0,
    /// Serious warning; emission still proceeds.
    Warning = 1,
    /// Style-level note, least severe.
    Note = 2,
}

impl Severity {
    /// Numeric code in the `0..4` range.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Error
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// Full detail for a single diagnostic: source name/content, the offending
/// span, the error kind, and its severity.
///
/// Generic over `T`, the per-subsystem error-kind enum, so each subsystem
/// can define its own closed set of error variants while sharing this one
/// span/severity wrapper.
#[derive(Debug, Clone)]
pub struct ErrorDetails<'a, T>
where
    T: ToString + Debug,
{
    /// Name of the source file the error occurred in.
    pub source_name: Box<str>,
    /// Full content of that source file, for ariadne rendering.
    pub source_content: &'a str,
    /// Span of the offending construct.
    pub span: Span,
    /// The specific error.
    pub kind: T,
    /// How severe this diagnostic is.
    pub severity: Severity,
    /// Stable diagnostic code, e.g. `"JS1004"`.
    pub code: &'static str,
}

impl<T> Display for ErrorDetails<'_, T>
where
    T: ToString + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}:{}: {:?}",
            self.severity, self.code, self.source_name, self.span.start_line, self.kind
        )
    }
}

impl<T> ErrorDetails<'_, T>
where
    T: ToString + Debug,
{
    /// Print the diagnostic to stdout using `ariadne`.
    pub fn print(&self) {
        if let Err(e) = self.report().print(self.cache()) {
            eprint!("failed to render diagnostic: {e:?}");
        }
    }

    /// Print the diagnostic to stderr using `ariadne`.
    pub fn eprint(&self) {
        if let Err(e) = self.report().eprint(self.cache()) {
            eprint!("failed to render diagnostic: {e:?}");
        }
    }

    /// Render the diagnostic to a `String`.
    pub fn print_to_string(&self) -> Result<String, std::string::FromUtf8Error> {
        let mut buf = Vec::new();
        let _ = self.report().write(self.cache(), &mut buf);
        String::from_utf8(buf)
    }

    fn cache(&self) -> (String, Source<&str>) {
        (self.source_name.to_string(), Source::from(self.source_content))
    }

    fn report(&self) -> Report<'_, (String, std::ops::Range<usize>)> {
        let name = self.source_name.to_string();
        let start = self.span.start_offset as usize;
        let end = self.span.end_offset.max(self.span.start_offset + 1) as usize;
        Report::build(ReportKind::Error, (name.clone(), start..end))
            .with_message(self.kind.to_string())
            .with_label(Label::new((name, start..end)).with_message("here"))
            .finish()
    }
}

/// Flattened, serializable diagnostic handed across the `Minifier` library
/// boundary. Produced from an [`ErrorDetails`] by discarding the
/// borrowed source content and `ariadne` rendering machinery.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Diagnostic {
    /// `0..4` severity; `0` is fatal.
    pub severity: u8,
    /// Stable string code, e.g. `"JS1004"`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Source file name.
    pub file: String,
    /// 1-based starting line.
    pub start_line: u32,
    /// 0-based starting column.
    pub start_column: u32,
    /// 1-based ending line.
    pub end_line: u32,
    /// 0-based ending column.
    pub end_column: u32,
    /// Coarse grouping, e.g. `"syntax"`, `"semantic"`.
    pub subcategory: String,
    /// Optional documentation anchor for tooling.
    pub help_keyword: Option<String>,
}

impl<T> From<&ErrorDetails<'_, T>> for Diagnostic
where
    T: ToString + Debug,
{
    fn from(details: &ErrorDetails<'_, T>) -> Self {
        Diagnostic {
            severity: details.severity.code(),
            code: details.code.to_string(),
            message: details.kind.to_string(),
            file: details.source_name.to_string(),
            start_line: details.span.start_line,
            start_column: details.span.start_column,
            end_line: details.span.end_line,
            end_column: details.span.end_column,
            subcategory: String::new(),
            help_keyword: None,
        }
    }
}
