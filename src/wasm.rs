//! WebAssembly bindings for the minifier.
//!
//! Exposes [`minify_javascript`](crate::minify_javascript) and
//! [`preprocess_only`](crate::preprocess_only) to JavaScript, for the needs
//! of an in-browser playground.

use crate::minifier::{minify_javascript, preprocess_only};
use crate::settings::Settings;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

/// Initializes the panic hook for better error messages in the browser console.
#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Minify `source` using the default `Settings`, returning a
/// `MinifyResult`-shaped `JsValue`.
///
/// Callers needing non-default settings should serialize a `Settings` value
/// to JSON on the JavaScript side and use [`minify_javascript_with_settings`]
/// instead; this entry point exists for the common "just minify it" case.
#[wasm_bindgen]
pub fn minify(source: String) -> Result<JsValue, JsValue> {
    let result = minify_javascript(source, Settings::default());
    to_value(&result).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Minify `source` using a `Settings` value deserialized from `settings_json`.
#[wasm_bindgen]
pub fn minify_javascript_with_settings(source: String, settings_json: &str) -> Result<JsValue, JsValue> {
    let settings: Settings =
        serde_json::from_str(settings_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let result = minify_javascript(source, settings);
    to_value(&result).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Run only the scanner/preprocessor over `source` and return the resulting
/// text with conditional-compilation directives evaluated away.
#[wasm_bindgen]
pub fn preprocess(source: String) -> Result<JsValue, JsValue> {
    let (text, diagnostics) = preprocess_only(source, Settings::default());
    to_value(&(text, diagnostics)).map_err(|e| JsValue::from_str(&e.to_string()))
}
