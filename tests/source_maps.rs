//! Source map emission.

use jsminify::minify_javascript;
use jsminify::settings::Settings;
use jsminify::sourcemap::SourceMapFormat;

#[test]
fn v3_json_map_is_present_when_requested() {
    let mut settings = Settings::default();
    settings.source_map = true;
    settings.source_map_format = SourceMapFormat::V3Json;
    let result = minify_javascript("var a = 1; var b = 2;".to_string(), settings);

    let map = result.source_map.expect("expected a source map");
    assert!(map.contains("\"version\":3"));
    assert!(map.contains("\"mappings\""));
}

#[test]
fn xml_map_is_present_when_requested() {
    let mut settings = Settings::default();
    settings.source_map = true;
    settings.source_map_format = SourceMapFormat::Xml;
    let result = minify_javascript("var a = 1; var b = 2;".to_string(), settings);

    let map = result.source_map.expect("expected a source map");
    assert!(map.contains("<scriptFile"));
    assert!(map.contains("<checksum"));
}

#[test]
fn no_map_is_produced_when_not_requested() {
    let result = minify_javascript("var a = 1;".to_string(), Settings::default());
    assert!(result.source_map.is_none());
}

#[test]
fn fatal_diagnostic_suppresses_the_source_map_too() {
    let mut settings = Settings::default();
    settings.source_map = true;
    settings.rename_pairs.insert("a".to_string(), "not valid".to_string());
    let result = minify_javascript("var a = 1;".to_string(), settings);

    assert!(result.output.is_empty());
    assert!(result.source_map.is_none());
}
