//! The library entry point: wires every pass into the single
//! `minify_javascript`/`preprocess_only` surface.
//!
//! Built in the shape every pass module already uses: plain functions taking
//! `&Settings`, called in a fixed order from parse through render.

use crate::diagnostics::{AnalyzerErrorKind, ConfigErrorKind, Diagnostic, Severity};
use crate::env;
use crate::output;
use crate::parser::Parser;
use crate::rename;
use crate::resource_strings;
use crate::settings::Settings;
use crate::sourcemap;
use crate::span::Span;
use crate::transform;

/// One unresolved identifier reference left behind by the Analyzer, reported alongside the matching
/// `AnalyzerErrorKind::UndefinedReference` diagnostic so callers that only
/// care about undefined names don't need to filter the `errors` list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UndefinedRef {
    /// The unresolved identifier.
    pub name: String,
    /// 1-based line of the offending reference.
    pub line: u32,
    /// 0-based column of the offending reference.
    pub column: u32,
}

/// Outcome of a full `minify_javascript` session.
///
/// `output` is only meaningful when `errors` contains no severity-0
/// (`Severity::Error`) entry; see [`minify_javascript`]'s doc comment.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct MinifyResult {
    /// The minified script, or the empty string if any severity-0 diagnostic
    /// was produced.
    pub output: String,
    /// Every diagnostic raised during the session, in source order.
    pub errors: Vec<Diagnostic>,
    /// Every undefined reference the Analyzer encountered.
    pub undefined_refs: Vec<UndefinedRef>,
    /// The serialized source map text, present only when `settings.source_map`
    /// was set and no severity-0 diagnostic halted emission.
    pub source_map: Option<String>,
}

/// The single library entry.
///
/// Stateless: every method is a free function over its arguments, so a
/// `Minifier` value itself carries no fields. Kept as a unit struct rather
/// than bare module functions so the public API reads as a named entry
/// point a host application can hold onto.
#[derive(Debug, Default, Clone, Copy)]
pub struct Minifier;

impl Minifier {
    /// Run a full session: parse, expand resource strings, analyze, transform,
    /// rename, and render `source` under `settings`.
    ///
    /// `settings` is validated first; a severity-0 configuration problem is
    /// reported the same way a severity-0 parse error is, with an empty
    /// `output`.
    pub fn minify_javascript(&self, source: String, settings: Settings) -> MinifyResult {
        minify_javascript(source, settings)
    }

    /// Run only the scanner/preprocessor and return the resulting source with
    /// conditional-compilation directives evaluated away, plus any
    /// lexical/syntactic diagnostics raised along the way.
    pub fn preprocess_only(&self, source: String, settings: Settings) -> (String, Vec<Diagnostic>) {
        preprocess_only(source, settings)
    }
}

/// Free-function form of [`Minifier::minify_javascript`]; the `Minifier`
/// method just forwards here.
pub fn minify_javascript(source: String, settings: Settings) -> MinifyResult {
    let mut errors: Vec<Diagnostic> = Vec::new();

    for config_error in settings.validate() {
        errors.push(diagnostic_from_config(config_error));
    }
    if has_fatal(&errors) {
        return MinifyResult { output: String::new(), errors, undefined_refs: Vec::new(), source_map: None };
    }

    let file = 0;
    let parser = Parser::new(file, &source, &settings);
    let (mut arena, root, parse_diagnostics) = parser.parse();

    for failure in parse_diagnostics.lexical.iter() {
        errors.push(Diagnostic::from(failure));
    }
    for failure in parse_diagnostics.syntax.iter() {
        errors.push(Diagnostic::from(failure));
    }

    let program_span = arena.span(root);
    resource_strings::expand(&mut arena, root, &settings, program_span);

    let (mut tree, analyzer_errors) = env::analyze(&mut arena, root, &settings);
    let mut undefined_refs = Vec::new();
    for (kind, span) in &analyzer_errors {
        if let AnalyzerErrorKind::UndefinedReference { name } = kind {
            undefined_refs.push(UndefinedRef { name: name.clone(), line: span.start_line, column: span.start_column });
        }
        errors.push(diagnostic_from_analyzer(kind, *span));
    }

    errors.sort_by_key(|d| (d.start_line, d.start_column));

    let errors: Vec<Diagnostic> = errors
        .into_iter()
        .filter(|d| !settings.ignore_errors.iter().any(|code| code == &d.code))
        .collect();

    if has_fatal(&errors) {
        return MinifyResult { output: String::new(), errors, undefined_refs, source_map: None };
    }

    transform::run(&mut arena, root, &settings);
    rename::run(&mut tree, &mut arena, &settings);

    let source_map = if settings.source_map {
        let (output, mappings) = output::render_with_mappings(&arena, &tree, root, &settings);
        let map = sourcemap::emit(
            settings.source_map_format,
            "<output>",
            "<output>.map",
            &output,
            &mappings,
            "\n",
        );
        (output, Some(map))
    } else {
        (output::render(&arena, &tree, root, &settings), None)
    };

    MinifyResult { output: source_map.0, errors, undefined_refs, source_map: source_map.1 }
}

/// Free-function form of [`Minifier::preprocess_only`]; the `Minifier`
/// method just forwards here.
pub fn preprocess_only(source: String, settings: Settings) -> (String, Vec<Diagnostic>) {
    let file = 0;
    let parser = Parser::new(file, &source, &settings);
    let (text, diagnostics) = parser.preprocess_only();

    let mut out = Vec::new();
    for failure in diagnostics.lexical.iter() {
        out.push(Diagnostic::from(failure));
    }
    for failure in diagnostics.syntax.iter() {
        out.push(Diagnostic::from(failure));
    }
    out.sort_by_key(|d| (d.start_line, d.start_column));
    (text, out)
}

fn has_fatal(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|d| d.severity == Severity::Error.code())
}

fn diagnostic_from_config(kind: ConfigErrorKind) -> Diagnostic {
    Diagnostic {
        severity: Severity::Error.code(),
        code: "JS7000".to_string(),
        message: kind.to_string(),
        file: "<settings>".to_string(),
        start_line: 0,
        start_column: 0,
        end_line: 0,
        end_column: 0,
        subcategory: "configuration".to_string(),
        help_keyword: None,
    }
}

/// Maps an `AnalyzerErrorKind` to a diagnostic severity: an ambiguous NFE is
/// advisory only (it never empties `output`), everything else defaults to
/// `Warning` since the Analyzer never halts a session on its own.
fn diagnostic_from_analyzer(kind: &AnalyzerErrorKind, span: Span) -> Diagnostic {
    let (code, severity, subcategory) = match kind {
        AnalyzerErrorKind::UndefinedReference { .. } => ("JS1301", Severity::Warning, "semantic"),
        AnalyzerErrorKind::AmbiguousNamedFunctionExpression { .. } => ("JS1302", Severity::Note, "semantic"),
        AnalyzerErrorKind::StrictModeViolation { .. } => ("JS1303", Severity::Warning, "semantic"),
        AnalyzerErrorKind::DeleteOfBinding { .. } => ("JS1304", Severity::Warning, "semantic"),
        AnalyzerErrorKind::DuplicateBinding { .. } => ("JS1305", Severity::Warning, "semantic"),
    };
    Diagnostic {
        severity: severity.code(),
        code: code.to_string(),
        message: kind.to_string(),
        file: "<input>".to_string(),
        start_line: span.start_line,
        start_column: span.start_column,
        end_line: span.end_line,
        end_column: span.end_column,
        subcategory: subcategory.to_string(),
        help_keyword: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minifies_a_simple_rename() {
        let settings = Settings::default();
        let result = minify_javascript("function outer(){ var longName = 1; return longName; }".to_string(), settings);
        assert!(!result.output.is_empty());
        assert!(result.errors.iter().all(|d| d.severity != Severity::Error.code()));
        assert!(!result.output.contains("longName"));
    }

    #[test]
    fn reports_undefined_reference_without_halting_output() {
        let settings = Settings::default();
        let result = minify_javascript("function f(){ return totallyUndefinedName; }".to_string(), settings);
        assert!(!result.output.is_empty());
        assert_eq!(result.undefined_refs.len(), 1);
        assert_eq!(result.undefined_refs[0].name, "totallyUndefinedName");
    }

    #[test]
    fn invalid_settings_yield_empty_output_and_fatal_diagnostic() {
        let mut settings = Settings::default();
        settings.rename_pairs.insert("a".to_string(), "not an identifier".to_string());
        let result = minify_javascript("var a = 1;".to_string(), settings);
        assert!(result.output.is_empty());
        assert!(result.errors.iter().any(|d| d.severity == Severity::Error.code()));
    }

    #[test]
    fn source_map_is_emitted_when_requested() {
        let mut settings = Settings::default();
        settings.source_map = true;
        let result = minify_javascript("var a = 1; var b = 2;".to_string(), settings);
        assert!(!result.output.is_empty());
        assert!(result.source_map.is_some());
        assert!(result.source_map.unwrap().contains("\"version\":3"));
    }

    #[test]
    fn preprocess_only_strips_conditional_compilation() {
        let settings = Settings::default();
        let (text, errors) = preprocess_only("var a = 1;".to_string(), settings);
        assert!(text.contains('a'));
        assert!(errors.is_empty());
    }

    #[test]
    fn ignore_errors_suppresses_matching_codes() {
        let mut settings = Settings::default();
        settings.ignore_errors.push("JS1301".to_string());
        let result = minify_javascript("function f(){ return totallyUndefinedName; }".to_string(), settings);
        assert!(result.errors.iter().all(|d| d.code != "JS1301"));
        assert_eq!(result.undefined_refs.len(), 1);
    }
}
