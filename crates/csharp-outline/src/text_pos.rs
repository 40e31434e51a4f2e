use rowan::TextRange;
use tower_lsp::lsp_types::{Position, Range};

/// Line-start table for converting between byte offsets and LSP positions.
///
/// LSP columns are counted in UTF-16 code units; byte offsets index the UTF-8
/// source. Built once per document revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(source.match_indices('\n').map(|(idx, _)| idx + 1));
        Self {
            line_starts,
            len: source.len(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset of an LSP position. Columns past the end of a line clamp to
    /// the line end, before any `\r\n` terminator. Lines past the end of the
    /// document yield `None`.
    pub fn offset(
        &self,
        source: &str,
        position: Position,
    ) -> Option<usize> {
        let line_start = *self.line_starts.get(position.line as usize)?;
        let line_end = self
            .line_starts
            .get(position.line as usize + 1)
            .map(|next| next - 1)
            .unwrap_or(self.len);
        let line = source.get(line_start..line_end)?;
        let line = line.strip_suffix('\r').unwrap_or(line);

        let mut utf16_offset = 0u32;
        let mut byte_offset = 0usize;
        for ch in line.chars() {
            if utf16_offset >= position.character {
                break;
            }
            utf16_offset += ch.len_utf16() as u32;
            byte_offset += ch.len_utf8();
        }
        Some(line_start + byte_offset)
    }

    pub fn position(
        &self,
        source: &str,
        offset: usize,
    ) -> Position {
        let offset = offset.min(self.len);
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];
        let column = source
            .get(line_start..offset)
            .map(|prefix| prefix.encode_utf16().count() as u32)
            .unwrap_or(0);
        Position::new(line as u32, column)
    }

    pub fn range(
        &self,
        source: &str,
        range: TextRange,
    ) -> Range {
        Range {
            start: self.position(source, usize::from(range.start())),
            end: self.position(source, usize::from(range.end())),
        }
    }
}
