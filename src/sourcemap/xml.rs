//! XML source maps: a flat file of mapping entries plus an
//! embedded checksum of the emitted script, for hosts that don't consume the
//! V3 JSON convention.

use super::{SourceMapEmitter, SymbolHandle};
use crate::span::Span;
use std::fmt;

struct Entry {
    gen_line: u32,
    gen_col: u32,
    span: Span,
    function: Option<String>,
}

/// An XML source map builder.
pub struct XmlSourceMap {
    source_name: String,
    output_path: String,
    pending: Vec<Entry>,
    finished: Vec<Entry>,
}

impl XmlSourceMap {
    /// Start a new, empty map attributing every mapping to `source_name`.
    pub fn new(source_name: &str) -> Self {
        XmlSourceMap {
            source_name: source_name.to_string(),
            output_path: String::new(),
            pending: Vec::new(),
            finished: Vec::new(),
        }
    }
}

impl SourceMapEmitter for XmlSourceMap {
    fn start_package(&mut self, output_path: &str, _map_path: &str) {
        self.output_path = output_path.to_string();
    }

    fn end_package(&mut self) {
        self.finished.append(&mut self.pending);
    }

    fn start_symbol(&mut self, span: Span, gen_line: u32, gen_col: u32) -> SymbolHandle {
        self.pending.push(Entry { gen_line, gen_col, span, function: None });
        SymbolHandle(self.pending.len() - 1)
    }

    fn end_symbol(&mut self, handle: SymbolHandle, _gen_line: u32, _gen_col: u32, parent_function: Option<&str>) {
        if let Some(entry) = self.pending.get_mut(handle.0) {
            entry.function = parent_function.map(str::to_string);
        }
    }

    fn end_file(&mut self, generated_text: &str, writer: &mut dyn fmt::Write, line_terminator: &str) -> fmt::Result {
        self.finished.append(&mut self.pending);
        self.finished.sort_by_key(|e| (e.gen_line, e.gen_col));

        let checksum = checksum_of(generated_text);

        write!(writer, "<?xml version=\"1.0\" encoding=\"utf-8\"?>{line_terminator}")?;
        write!(
            writer,
            "<scriptFile major=\"1\" minor=\"0\" generated=\"{}\">{line_terminator}",
            xml_escape(&self.output_path)
        )?;
        write!(writer, "  <source name=\"{}\"/>{line_terminator}", xml_escape(&self.source_name))?;
        write!(writer, "  <checksum value=\"{checksum:08x}\"/>{line_terminator}")?;
        for entry in &self.finished {
            write!(
                writer,
                "  <s gline=\"{}\" gcol=\"{}\" sline=\"{}\" scol=\"{}\"",
                entry.gen_line, entry.gen_col, entry.span.start_line, entry.span.start_column
            )?;
            if let Some(function) = &entry.function {
                write!(writer, " function=\"{}\"", xml_escape(function))?;
            }
            write!(writer, "/>{line_terminator}")?;
        }
        write!(writer, "</scriptFile>{line_terminator}")
    }
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

/// A small FNV-1a checksum over `text`'s bytes. Not cryptographic; just
/// enough to detect a stale map paired with a changed script.
fn checksum_of(text: &str) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for byte in text.as_bytes() {
        hash ^= *byte as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_is_stable_for_same_input() {
        assert_eq!(checksum_of("var a = 1;"), checksum_of("var a = 1;"));
        assert_ne!(checksum_of("var a = 1;"), checksum_of("var a = 2;"));
    }

    #[test]
    fn xml_escape_handles_reserved_characters() {
        assert_eq!(xml_escape("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}
