//! Source locations.
//!
//! Nodes carry a [`Span`]: a file id and a byte range. The [`SourceMap`] owns
//! the text of every file in a run and turns spans back into paths and
//! 1-based line/column positions for diagnostics.
//!
//! ```
//! # use shadermorph_ast::foundation::span::*;
//! # use std::path::PathBuf;
//! let mut map = SourceMap::new();
//! let file_id = map.add_file(PathBuf::from("shader.frag"), "int x;\nint y;".to_string());
//! let span = Span::new(file_id, 7, 13);
//!
//! assert_eq!(map.file_path(&span).to_str(), Some("shader.frag"));
//! assert_eq!(map.line_col(&span), (2, 1));
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Byte range `start..end` in one source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub file_id: u16,
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(file_id: u16, start: u32, end: u32) -> Self {
        Self {
            file_id,
            start,
            end,
        }
    }

    /// Empty span at the start of a file, for nodes with no source text.
    pub fn zero(file_id: u16) -> Self {
        Self::new(file_id, 0, 0)
    }
}

/// Every source file of a run, indexed by [`Span::file_id`].
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file and return the id its spans must use.
    pub fn add_file(&mut self, path: PathBuf, source: String) -> u16 {
        let file_id = u16::try_from(self.files.len()).unwrap_or(u16::MAX);
        self.files.push(SourceFile::new(path, source));
        file_id
    }

    /// File a span points into.
    pub fn file(&self, span: &Span) -> &SourceFile {
        &self.files[usize::from(span.file_id)]
    }

    pub fn file_path(&self, span: &Span) -> &Path {
        &self.file(span).path
    }

    /// 1-based (line, column) of a span's start.
    pub fn line_col(&self, span: &Span) -> (u32, u32) {
        self.file(span).line_col(span.start)
    }
}

/// One source file and the byte offset of each of its lines.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub source: String,
    line_offsets: Vec<u32>,
}

impl SourceFile {
    pub fn new(path: PathBuf, source: String) -> Self {
        let line_offsets = std::iter::once(0)
            .chain(
                source
                    .match_indices('\n')
                    .map(|(offset, _)| (offset + 1) as u32),
            )
            .collect();
        Self {
            path,
            source,
            line_offsets,
        }
    }

    /// 1-based (line, column) of a byte offset. The column counts bytes.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let offset = offset.min(self.source.len() as u32);
        // Number of lines starting at or before `offset`; the first always does
        let line = self.line_offsets.partition_point(|start| *start <= offset);
        let line_start = self.line_offsets[line - 1];
        (line as u32, offset - line_start + 1)
    }
}
