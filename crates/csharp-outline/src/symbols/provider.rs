use std::sync::Arc;

use rowan::TextSize;
use serde::Serialize;
use tower_lsp::lsp_types::{DocumentSymbol, DocumentSymbolResponse, Location, SymbolInformation, SymbolKind, Url};
use tracing::debug;

use crate::syntax::{DocumentTrees, SyntaxTree};

use super::adapter::{DeclarationSource, SyntaxDeclarationSource};
use super::builder::{SymbolForest, build_forest};
use super::cancel::Cancellation;
use super::error::SymbolError;
use super::kind_map::Glyph;
use super::negotiate::ProjectionStrategy;
use super::project::{FlatSymbolEntry, project_flat, project_hierarchical};
use super::types::{DeclarationDepth, DeclarationRecord};

/// A projected outline, in the shape the client negotiated.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolOutline {
    Nested(Vec<DocumentSymbol>),
    Flat(Vec<FlatSymbolEntry>),
}

impl SymbolOutline {
    pub fn len(&self) -> usize {
        match self {
            Self::Nested(symbols) => symbols.len(),
            Self::Flat(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Standard `textDocument/documentSymbol` result. Glyphs are dropped.
    pub fn into_response(
        self,
        uri: &Url,
    ) -> DocumentSymbolResponse {
        match self {
            Self::Nested(symbols) => DocumentSymbolResponse::Nested(symbols),
            Self::Flat(entries) => DocumentSymbolResponse::Flat(
                entries
                    .into_iter()
                    .map(|entry| {
                        #[allow(deprecated)]
                        SymbolInformation {
                            name: entry.name,
                            kind: entry.kind,
                            tags: None,
                            deprecated: None,
                            location: Location::new(uri.clone(), entry.range),
                            container_name: entry.container_name,
                        }
                    })
                    .collect(),
            ),
        }
    }

    /// Result of the `csharpOutline/documentSymbol` extension, which keeps glyphs.
    pub fn into_glyph_response(
        self,
        uri: &Url,
    ) -> GlyphDocumentSymbolResponse {
        match self {
            Self::Nested(symbols) => GlyphDocumentSymbolResponse::Nested(symbols),
            Self::Flat(entries) => GlyphDocumentSymbolResponse::Flat(
                entries
                    .into_iter()
                    .map(|entry| GlyphSymbolInformation {
                        name: entry.name,
                        kind: entry.kind,
                        glyph: entry.glyph,
                        location: Location::new(uri.clone(), entry.range),
                        container_name: entry.container_name,
                    })
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GlyphDocumentSymbolResponse {
    Nested(Vec<DocumentSymbol>),
    Flat(Vec<GlyphSymbolInformation>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlyphSymbolInformation {
    pub name: String,
    pub kind: SymbolKind,
    pub glyph: Glyph,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_name: Option<String>,
}

/// Runs the outline pipeline: declarations, forest, projection.
///
/// Holds no per-document state, so one instance serves concurrent requests.
#[derive(Clone)]
pub struct SymbolProvider {
    source: Arc<dyn DeclarationSource>,
    depth: DeclarationDepth,
}

impl Default for SymbolProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolProvider {
    pub fn new() -> Self {
        Self::with_source(Arc::new(SyntaxDeclarationSource))
    }

    pub fn with_source(source: Arc<dyn DeclarationSource>) -> Self {
        Self {
            source,
            depth: DeclarationDepth::default(),
        }
    }

    pub fn with_depth(
        mut self,
        depth: DeclarationDepth,
    ) -> Self {
        self.depth = depth;
        self
    }

    pub fn depth(&self) -> DeclarationDepth {
        self.depth
    }

    /// Outline of an open document.
    pub fn document_symbols(
        &self,
        trees: &DocumentTrees,
        uri: &Url,
        strategy: ProjectionStrategy,
        cancel: &dyn Cancellation,
    ) -> Result<SymbolOutline, SymbolError> {
        let snapshot = trees
            .get(uri)
            .ok_or_else(|| SymbolError::InvalidDocument(uri.clone()))?;
        self.outline(&snapshot, strategy, cancel)
    }

    /// Outline of one snapshot. Either the complete outline or an error, never a
    /// partial result.
    pub fn outline(
        &self,
        snapshot: &SyntaxTree,
        strategy: ProjectionStrategy,
        cancel: &dyn Cancellation,
    ) -> Result<SymbolOutline, SymbolError> {
        let forest = self.forest(snapshot, cancel)?;
        let outline = match strategy {
            ProjectionStrategy::Hierarchical => SymbolOutline::Nested(project_hierarchical(&forest, snapshot)),
            ProjectionStrategy::Flat => SymbolOutline::Flat(project_flat(&forest, snapshot)),
        };
        cancel.check()?;
        debug!(?strategy, nodes = forest.len(), roots = outline.len(), "Projected document outline");
        Ok(outline)
    }

    /// Collect declarations and nest them.
    pub fn forest(
        &self,
        snapshot: &SyntaxTree,
        cancel: &dyn Cancellation,
    ) -> Result<SymbolForest, SymbolError> {
        cancel.check()?;
        let records = self.source.declarations(snapshot, self.depth)?;
        validate_records(&records, snapshot)?;
        cancel.check()?;
        let forest = build_forest(records);
        cancel.check()?;
        Ok(forest)
    }
}

/// Reject records whose ranges cannot be projected.
fn validate_records(
    records: &[DeclarationRecord],
    snapshot: &SyntaxTree,
) -> Result<(), SymbolError> {
    let len = TextSize::of(snapshot.source());
    for record in records {
        if record.full_range.end() > len {
            return Err(SymbolError::AdapterFailure(format!(
                "range {:?} of '{}' is outside the document (length {len:?})",
                record.full_range, record.name
            )));
        }
        if !record.full_range.contains_range(record.selection_range) {
            return Err(SymbolError::AdapterFailure(format!(
                "selection {:?} of '{}' is not within its range {:?}",
                record.selection_range, record.name, record.full_range
            )));
        }
    }
    Ok(())
}
