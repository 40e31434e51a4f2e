use tower_lsp::lsp_types::*;

use crate::text_pos::LineIndex;

/// Snapshot of a single open C# document.
#[derive(Debug, Clone)]
pub struct Document {
    pub uri: Url,
    /// Full source text (always kept up-to-date).
    pub text: String,
    /// Document version as reported by the client.
    pub version: i32,
    line_index: LineIndex,
}

impl Document {
    pub fn new(
        uri: Url,
        text: String,
        version: i32,
    ) -> Self {
        let line_index = LineIndex::new(&text);
        Self {
            uri,
            text,
            version,
            line_index,
        }
    }

    /// Convert an LSP `Position` (UTF-16 columns) to a byte offset.
    fn offset_of(
        &self,
        pos: Position,
    ) -> Option<usize> {
        self.line_index.offset(&self.text, pos)
    }

    /// Apply a list of incremental or full-content changes in order.
    ///
    /// A ranged change whose range does not resolve against the current text
    /// is skipped; later changes still apply.
    pub fn apply_changes(
        &mut self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) {
        for change in changes {
            match change.range {
                Some(range) => {
                    let start = self.offset_of(range.start);
                    let end = self.offset_of(range.end);
                    if let (Some(start), Some(end)) = (start, end)
                        && start <= end
                    {
                        self.text.replace_range(start..end, &change.text);
                    } else {
                        tracing::warn!(uri = %self.uri, ?range, "Skipping change with unresolvable range");
                        continue;
                    }
                },
                None => self.text = change.text,
            }
            self.line_index = LineIndex::new(&self.text);
        }
        self.version = version;
    }
}

#[cfg(test)]
#[path = "../../tests/src/document/text_document_tests.rs"]
mod tests;
