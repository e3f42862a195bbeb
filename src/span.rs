//! Source spans carried by every token and AST node.

use std::sync::Arc;

/// Identifies which source file a [`Span`] belongs to, as an index into the
/// session's file table rather than an owned string, so spans stay `Copy`.
pub type FileId = u32;

/// A half-open region of source text: file, start/end line (1-based) and
/// start/end column (0-based).
///
/// Spans are immutable once the parser hands them to a node except through
/// [`Span::update_with`], which extends `self` to also cover `other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Which source file this span points into.
    pub file: FileId,
    /// Byte offset of the first character, for diagnostic rendering.
    pub start_offset: u32,
    /// Byte offset one past the last character.
    pub end_offset: u32,
    /// 1-based starting line.
    pub start_line: u32,
    /// 0-based starting column.
    pub start_column: u32,
    /// 1-based ending line.
    pub end_line: u32,
    /// 0-based ending column.
    pub end_column: u32,
}

impl Span {
    /// A zero-width span at a single point, used for synthesized nodes.
    pub fn point(file: FileId, offset: u32, line: u32, column: u32) -> Self {
        Span {
            file,
            start_offset: offset,
            end_offset: offset,
            start_line: line,
            start_column: column,
            end_line: line,
            end_column: column,
        }
    }

    /// Extend `self`'s end to also cover `other`. `self`'s start is untouched.
    pub fn update_with(&mut self, other: Span) {
        debug_assert_eq!(self.file, other.file, "cannot merge spans across files");
        if other.end_offset > self.end_offset {
            self.end_offset = other.end_offset;
            self.end_line = other.end_line;
            self.end_column = other.end_column;
        }
    }

    /// Returns a new span covering both `self` and `other`.
    pub fn merge(mut self, other: Span) -> Self {
        self.update_with(other);
        self
    }

    /// Number of bytes this span covers.
    pub fn len(&self) -> u32 {
        self.end_offset.saturating_sub(self.start_offset)
    }

    /// True for a zero-width span.
    pub fn is_empty(&self) -> bool {
        self.end_offset == self.start_offset
    }
}

/// Immutable, reference-counted file name + content, shared by every `Span`,
/// `Diagnostic`, and AST node that needs to point back at the original text.
///
/// Deliberately holds no byte-decoding step: the library boundary already
/// takes an owned `String` (see `minify_javascript`), so decoding from raw
/// bytes on disk is an external collaborator's concern.
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// File identifier used to index into a session's file table.
    pub id: FileId,
    /// Display name (file path or a synthesized name for in-memory sources).
    pub name: Arc<str>,
    /// The full, immutable source text.
    pub content: Arc<str>,
}

impl SourceContext {
    /// Build a new source context for `content`, named `name`.
    pub fn new(id: FileId, name: impl Into<Arc<str>>, content: impl Into<Arc<str>>) -> Self {
        SourceContext {
            id,
            name: name.into(),
            content: content.into(),
        }
    }

    /// The slice of source text a span covers.
    pub fn text(&self, span: Span) -> &str {
        &self.content[span.start_offset as usize..span.end_offset as usize]
    }
}
