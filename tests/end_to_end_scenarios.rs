//! End-to-end minification scenarios.

use jsminify::{minify_javascript, Settings};

#[test]
fn simple_rename_shortens_a_local() {
    let source = "function outer() { var longVariableName = 10; return longVariableName * 2; }".to_string();
    let result = minify_javascript(source, Settings::default());

    assert!(result.errors.iter().all(|d| d.severity != 0));
    assert!(!result.output.contains("longVariableName"));
    assert!(result.output.contains("outer"));
}

#[test]
fn constant_arithmetic_folds_at_compile_time() {
    let source = "var n = 1 + 2;".to_string();
    let mut settings = Settings::default();
    settings.local_renaming = jsminify::settings::LocalRenaming::KeepAll;
    let result = minify_javascript(source, settings);

    assert!(result.errors.iter().all(|d| d.severity != 0));
    assert!(result.output.contains('3'));
    assert!(!result.output.contains('1'));
}

#[test]
fn surrogate_pair_identifier_round_trips() {
    // U+1D400 MATHEMATICAL BOLD CAPITAL A, valid as an identifier start char.
    let source = "var \u{1D400} = 1; \u{1D400} += 1;".to_string();
    let mut settings = Settings::default();
    settings.local_renaming = jsminify::settings::LocalRenaming::KeepAll;
    let result = minify_javascript(source, settings);

    assert!(result.errors.iter().all(|d| d.severity != 0));
    assert!(!result.output.is_empty());
}

#[test]
fn ambiguous_named_function_expression_is_advisory_only() {
    let source = "var f = function f() { return f; }; var f = function f() { return 1; };".to_string();
    let result = minify_javascript(source, Settings::default());

    assert!(!result.output.is_empty(), "an ambiguous NFE must not halt emission");
    assert!(result
        .errors
        .iter()
        .any(|d| d.message.to_lowercase().contains("ambiguous")));
}

#[test]
fn logical_not_inverts_equality_comparisons() {
    let source = "var r = !(a == b);".to_string();
    let mut settings = Settings::default();
    settings.local_renaming = jsminify::settings::LocalRenaming::KeepAll;
    let result = minify_javascript(source, settings);

    assert!(result.errors.iter().all(|d| d.severity != 0));
    assert!(result.output.contains("!="));
    assert!(!result.output.contains("!("));
}

#[test]
fn preprocessor_define_selects_the_live_cc_branch() {
    // spec.md §8 end-to-end scenario 6: `@if(@FOO==1)` picks the `alert(1)`
    // branch and the `/*@if.../*@else@*/.../*@end@*/` wrapper disappears —
    // the minifier resolves conditional compilation at compile time rather
    // than preserving it as a runtime construct.
    let source = "/*@if(@FOO==1)*/alert(1);/*@else@*/alert(2);/*@end@*/".to_string();
    let mut settings = Settings::default();
    settings.local_renaming = jsminify::settings::LocalRenaming::KeepAll;
    settings.preprocessor_defines.insert("FOO".to_string(), "1".to_string());
    let result = minify_javascript(source, settings);

    assert!(result.errors.iter().all(|d| d.severity != 0));
    assert!(result.output.contains("alert(1)"));
    assert!(!result.output.contains("alert(2)"));
    assert!(!result.output.contains("@if"));
}

#[test]
fn preprocessor_define_false_selects_the_else_branch() {
    let source = "/*@if(@FOO==1)*/alert(1);/*@else@*/alert(2);/*@end@*/".to_string();
    let mut settings = Settings::default();
    settings.local_renaming = jsminify::settings::LocalRenaming::KeepAll;
    settings.preprocessor_defines.insert("FOO".to_string(), "0".to_string());
    let result = minify_javascript(source, settings);

    assert!(result.errors.iter().all(|d| d.severity != 0));
    assert!(result.output.contains("alert(2)"));
    assert!(!result.output.contains("alert(1)"));
}

#[test]
fn catch_parameter_resolves_inside_its_own_handler_scope() {
    // The catch parameter's binding lives in a lexical environment scoped to
    // the handler block; a reference inside the handler must resolve to it
    // rather than falling through to the enclosing scope and being reported
    // as an undefined reference.
    let source = "function f() { try { risky(); } catch (err) { handle(err); } }".to_string();
    let mut settings = Settings::default();
    settings.local_renaming = jsminify::settings::LocalRenaming::KeepAll;
    let result = minify_javascript(source, settings);

    assert!(result.errors.iter().all(|d| d.severity != 0));
    assert!(!result.errors.iter().any(|d| d.code == "JS1301"));
    assert!(result.output.contains("catch(err)"));
    assert!(result.output.contains("handle(err)"));
}

#[test]
fn catch_parameter_is_renamed_consistently_with_its_uses() {
    let source = "function f() { try { risky(); } catch (err) { handle(err); } }".to_string();
    let result = minify_javascript(source, Settings::default());

    assert!(result.errors.iter().all(|d| d.severity != 0));
    assert!(!result.output.contains("err"));
    let open = result.output.find("catch(").expect("catch clause present") + "catch(".len();
    let close = result.output[open..].find(')').expect("closing paren present");
    let crunched = &result.output[open..open + close];
    assert!(!crunched.is_empty());
    assert!(result.output.contains(&format!("handle({crunched})")));
}

#[test]
fn with_statement_disables_renaming_for_its_free_variables() {
    // Inside `with(obj)`, a bare `x` might resolve to `obj.x` at runtime
    // instead of the outer local, so the outer binding must keep its
    // original name wherever it is used, not just inside the `with` body.
    let source = "function f(obj) { var x = 1; with (obj) { x; } return x; }".to_string();
    let result = minify_javascript(source, Settings::default());

    assert!(result.errors.iter().all(|d| d.severity != 0));
    assert!(result.output.contains("var x"));
    assert!(result.output.contains("return x"));
}

#[test]
fn ignore_conditional_compilation_wraps_the_block_as_a_plain_comment() {
    let source = "/*@if (DEBUG)*/ var mode = \"debug\"; /*@end@*/".to_string();
    let mut settings = Settings::default();
    settings.local_renaming = jsminify::settings::LocalRenaming::KeepAll;
    settings.ignore_conditional_compilation = true;
    let result = minify_javascript(source, settings);

    assert!(result.errors.iter().all(|d| d.severity != 0));
    assert!(result.output.starts_with("/*"));
}
