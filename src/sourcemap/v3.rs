//! V3 JSON source maps with VLQ-encoded mappings.
//!
//! No `serde_json` dependency is available outside the `wasm32` target (see
//! `Cargo.toml` / `DESIGN.md`), and the mapping payload here is simple enough
//! that hand-writing the JSON is less code than wiring a conditional-compile
//! serializer; this follows the same "string-built JSON" approach as
//! `crate::output::string_format` for JS string literals.

use super::{SourceMapEmitter, SymbolHandle};
use crate::span::Span;
use std::fmt;

struct PendingSymbol {
    gen_line: u32,
    gen_col: u32,
    span: Span,
    name: Option<String>,
}

/// A V3 JSON source map builder.
pub struct V3SourceMap {
    source_name: String,
    output_path: String,
    names: Vec<String>,
    pending: Vec<PendingSymbol>,
    finished: Vec<PendingSymbol>,
}

impl V3SourceMap {
    /// Start a new, empty map attributing every mapping to `source_name`.
    pub fn new(source_name: &str) -> Self {
        V3SourceMap {
            source_name: source_name.to_string(),
            output_path: String::new(),
            names: Vec::new(),
            pending: Vec::new(),
            finished: Vec::new(),
        }
    }

    fn name_index(&mut self, name: &str) -> usize {
        if let Some(index) = self.names.iter().position(|n| n == name) {
            return index;
        }
        self.names.push(name.to_string());
        self.names.len() - 1
    }
}

impl SourceMapEmitter for V3SourceMap {
    fn start_package(&mut self, output_path: &str, _map_path: &str) {
        self.output_path = output_path.to_string();
    }

    fn end_package(&mut self) {
        self.finished.append(&mut self.pending);
    }

    fn start_symbol(&mut self, span: Span, gen_line: u32, gen_col: u32) -> SymbolHandle {
        self.pending.push(PendingSymbol { gen_line, gen_col, span, name: None });
        SymbolHandle(self.pending.len() - 1)
    }

    fn end_symbol(&mut self, handle: SymbolHandle, _gen_line: u32, _gen_col: u32, parent_function: Option<&str>) {
        if let Some(entry) = self.pending.get_mut(handle_index(handle)) {
            entry.name = parent_function.map(str::to_string);
        }
    }

    fn end_file(&mut self, _generated_text: &str, writer: &mut dyn fmt::Write, _line_terminator: &str) -> fmt::Result {
        self.finished.append(&mut self.pending);
        self.finished.sort_by_key(|s| (s.gen_line, s.gen_col));

        // Resolve name indices up front so `encode_mappings` only ever deals
        // with plain integers.
        let mut resolved_names = Vec::with_capacity(self.finished.len());
        for i in 0..self.finished.len() {
            let index = match self.finished[i].name.clone() {
                Some(name) => Some(self.name_index(&name)),
                None => None,
            };
            resolved_names.push(index);
        }

        let mappings = encode_mappings(&self.finished, &resolved_names);

        write!(writer, "{{")?;
        write!(writer, "\"version\":3,")?;
        write!(writer, "\"file\":{},", json_string(&self.output_path))?;
        write!(writer, "\"sources\":[{}],", json_string(&self.source_name))?;
        write!(writer, "\"names\":[")?;
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                write!(writer, ",")?;
            }
            write!(writer, "{}", json_string(name))?;
        }
        write!(writer, "],")?;
        write!(writer, "\"mappings\":{}", json_string(&mappings))?;
        write!(writer, "}}")
    }
}

fn handle_index(handle: SymbolHandle) -> usize {
    handle.0
}

fn json_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Encode `symbols` (already sorted by generated position) as a V3
/// `mappings` string: `;`-separated generated lines, `,`-separated segments
/// within a line, each segment a VLQ-encoded
/// `[genCol, sourceIndex, srcLine, srcCol, nameIndex?]` delta group, every
/// field relative to the previous segment's value in that category (the V3
/// spec's "all fields are zero-based and relative to the previous value").
fn encode_mappings(symbols: &[PendingSymbol], names: &[Option<usize>]) -> String {
    let mut out = String::new();
    let mut prev_gen_line = 1u32;
    let mut prev_gen_col = 0i64;
    let mut prev_src_line = 0i64;
    let mut prev_src_col = 0i64;
    let mut prev_name = 0i64;
    let mut first_on_line = true;

    for (symbol, name_index) in symbols.iter().zip(names) {
        while prev_gen_line < symbol.gen_line {
            out.push(';');
            prev_gen_line += 1;
            prev_gen_col = 0;
            first_on_line = true;
        }
        if !first_on_line {
            out.push(',');
        }
        first_on_line = false;

        let gen_col = symbol.gen_col as i64;
        let src_line = symbol.span.start_line as i64 - 1;
        let src_col = symbol.span.start_column as i64;

        vlq_encode(gen_col - prev_gen_col, &mut out);
        vlq_encode(0, &mut out); // single-source maps always reference source index 0
        vlq_encode(src_line - prev_src_line, &mut out);
        vlq_encode(src_col - prev_src_col, &mut out);
        if let Some(name_index) = name_index {
            vlq_encode(*name_index as i64 - prev_name, &mut out);
            prev_name = *name_index as i64;
        }

        prev_gen_col = gen_col;
        prev_src_line = src_line;
        prev_src_col = src_col;
    }
    out
}

const BASE64_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Encode a single signed value as Base64-VLQ (the sign in the low bit, 5
/// payload bits per digit, continuation bit in the 6th).
fn vlq_encode(value: i64, out: &mut String) {
    let mut n = if value < 0 { ((-value) << 1) | 1 } else { value << 1 } as u64;
    loop {
        let mut digit = (n & 0b11111) as u8;
        n >>= 5;
        if n > 0 {
            digit |= 0b100000;
        }
        out.push(BASE64_ALPHABET[digit as usize] as char);
        if n == 0 {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vlq_encodes_zero_as_a() {
        let mut out = String::new();
        vlq_encode(0, &mut out);
        assert_eq!(out, "A");
    }

    #[test]
    fn vlq_encodes_negative_values() {
        let mut out = String::new();
        vlq_encode(-1, &mut out);
        assert_eq!(out, "D");
    }

    #[test]
    fn vlq_round_trips_through_decode() {
        for value in [0i64, 1, -1, 15, -15, 16, 12345, -98765] {
            let mut out = String::new();
            vlq_encode(value, &mut out);
            assert_eq!(decode_one(&out), value);
        }
    }

    fn decode_one(s: &str) -> i64 {
        let mut result: i64 = 0;
        let mut shift = 0;
        for c in s.chars() {
            let digit = BASE64_ALPHABET.iter().position(|&b| b as char == c).unwrap() as i64;
            let cont = digit & 0b100000;
            let value = digit & 0b11111;
            result |= value << shift;
            shift += 5;
            if cont == 0 {
                break;
            }
        }
        let negative = result & 1 == 1;
        let magnitude = result >> 1;
        if negative {
            -magnitude
        } else {
            magnitude
        }
    }
}
