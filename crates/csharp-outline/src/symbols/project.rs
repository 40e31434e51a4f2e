use tower_lsp::lsp_types::{DocumentSymbol, Range, SymbolKind, SymbolTag};

use crate::syntax::SyntaxTree;

use super::builder::{SymbolForest, SymbolNode};
use super::kind_map::{Glyph, map_kind};

/// One row of the flat outline, in pre-order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatSymbolEntry {
    pub kind: SymbolKind,
    pub glyph: Glyph,
    /// Display text (`M(int)`), since a flat list has no detail column.
    pub name: String,
    /// The selection range of the declaration.
    pub range: Range,
    /// Name of the enclosing declaration. `None` for roots.
    pub container_name: Option<String>,
}

/// Nested projection for clients that render a hierarchy.
pub fn project_hierarchical(
    forest: &SymbolForest,
    snapshot: &SyntaxTree,
) -> Vec<DocumentSymbol> {
    forest
        .roots()
        .iter()
        .map(|root| to_document_symbol(root, snapshot))
        .collect()
}

#[allow(deprecated)]
fn to_document_symbol(
    node: &SymbolNode,
    snapshot: &SyntaxTree,
) -> DocumentSymbol {
    let (kind, _) = map_kind(node.kind, node.accessibility);
    DocumentSymbol {
        name: node.name.clone(),
        detail: Some(node.detail.clone()),
        kind,
        tags: node.deprecated.then(|| vec![SymbolTag::DEPRECATED]),
        deprecated: Some(node.deprecated),
        range: snapshot.lsp_range(node.full_range),
        selection_range: snapshot.lsp_range(node.selection_range),
        children: Some(
            node.children
                .iter()
                .map(|child| to_document_symbol(child, snapshot))
                .collect(),
        ),
    }
}

/// Flat projection: every node once, parents before children.
pub fn project_flat(
    forest: &SymbolForest,
    snapshot: &SyntaxTree,
) -> Vec<FlatSymbolEntry> {
    forest
        .preorder()
        .map(|(node, parent)| {
            let (kind, glyph) = map_kind(node.kind, node.accessibility);
            FlatSymbolEntry {
                kind,
                glyph,
                name: node.detail.clone(),
                range: snapshot.lsp_range(node.selection_range),
                container_name: parent.map(|parent| parent.name.clone()),
            }
        })
        .collect()
}
