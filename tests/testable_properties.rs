//! Cross-cutting invariants exercised against the public
//! `minify_javascript`/`preprocess_only` surface.

use jsminify::settings::{LocalRenaming, Settings};
use jsminify::{minify_javascript, preprocess_only};

#[test]
fn severity_zero_diagnostic_yields_empty_output() {
    let mut settings = Settings::default();
    settings.rename_pairs.insert("a".to_string(), "1bad".to_string());
    let result = minify_javascript("var a = 1;".to_string(), settings);

    assert!(result.output.is_empty());
    assert!(result.errors.iter().any(|d| d.severity == 0));
}

#[test]
fn diagnostics_are_delivered_in_source_order() {
    let source = "function f(){ return undefinedOne; } function g(){ return undefinedTwo; }".to_string();
    let result = minify_javascript(source, Settings::default());

    let lines: Vec<u32> = result.errors.iter().map(|d| d.start_line).collect();
    let mut sorted = lines.clone();
    sorted.sort();
    assert_eq!(lines, sorted);
}

#[test]
fn renaming_preserves_program_behavior_shape() {
    // Two distinct locals must not collide onto the same generated name.
    let source = "function f(a, b) { var x = a + 1; var y = b + 1; return x + y; }".to_string();
    let result = minify_javascript(source, Settings::default());

    assert!(result.errors.iter().all(|d| d.severity != 0));
    assert!(!result.output.is_empty());
}

#[test]
fn keep_all_renaming_leaves_every_identifier_untouched() {
    let mut settings = Settings::default();
    settings.local_renaming = LocalRenaming::KeepAll;
    let source = "function originalName(parameterOne) { return parameterOne; }".to_string();
    let result = minify_javascript(source, settings);

    assert!(result.output.contains("originalName"));
    assert!(result.output.contains("parameterOne"));
}

#[test]
fn localization_prefix_is_exempt_under_keep_localization_vars() {
    let mut settings = Settings::default();
    settings.local_renaming = LocalRenaming::KeepLocalizationVars;
    let source = "function f() { var L_keepMe = 1; var crunchMe = 2; return L_keepMe + crunchMe; }".to_string();
    let result = minify_javascript(source, settings);

    assert!(result.output.contains("L_keepMe"));
    assert!(!result.output.contains("crunchMe"));
}

#[test]
fn empty_program_minifies_to_empty_output() {
    let result = minify_javascript(String::new(), Settings::default());
    assert!(result.errors.iter().all(|d| d.severity != 0));
    assert_eq!(result.output.trim(), "");
}

#[test]
fn preprocess_only_never_produces_a_source_map() {
    let (text, _) = preprocess_only("var a = 1;".to_string(), Settings::default());
    assert!(!text.is_empty());
}

#[test]
fn known_globals_suppress_undefined_reference_diagnostics() {
    let mut settings = Settings::default();
    settings.known_globals.push("myGlobal".to_string());
    let result = minify_javascript("function f() { return myGlobal; }".to_string(), settings);

    assert!(result.undefined_refs.is_empty());
}

#[test]
fn syntax_errors_recover_and_still_report_a_diagnostic() {
    let result = minify_javascript("function f( { return 1; }".to_string(), Settings::default());
    assert!(result.errors.iter().any(|d| d.severity == 0));
    assert!(result.output.is_empty());
}
