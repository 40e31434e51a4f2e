pub mod ast;
pub mod cst;
pub mod cst_parser;
pub mod helpers;
pub mod kind;
pub mod lexer;

use dashmap::DashMap;
use rowan::TextRange;
use std::sync::Arc;
use tower_lsp::lsp_types::{Range, Url};

use crate::syntax::cst::SyntaxNode;
use crate::syntax::cst_parser::Parser;
use crate::text_pos::LineIndex;

/// Immutable syntax snapshot of one document revision.
///
/// Cloning is cheap: the green tree, source and line table are shared.
#[derive(Clone)]
pub struct SyntaxTree {
    green: rowan::GreenNode,
    source: Arc<str>,
    line_index: Arc<LineIndex>,
}

impl SyntaxTree {
    pub fn parse(source: &str) -> Self {
        let parser = Parser::new(source);
        let green = parser.parse();
        Self {
            green,
            source: Arc::from(source),
            line_index: Arc::new(LineIndex::new(source)),
        }
    }

    pub fn root(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Convert a byte range of this snapshot to an LSP range.
    pub fn lsp_range(
        &self,
        range: TextRange,
    ) -> Range {
        self.line_index.range(&self.source, range)
    }
}

impl std::fmt::Debug for SyntaxTree {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("len", &self.source.len())
            .field("lines", &self.line_index.line_count())
            .finish()
    }
}

/// Thread-safe store of parsed syntax trees for all open documents.
pub struct DocumentTrees {
    snapshots: DashMap<Url, SyntaxTree>,
}

impl DocumentTrees {
    pub fn new() -> Self {
        Self {
            snapshots: DashMap::new(),
        }
    }

    /// Full parse of a document, replacing any existing snapshot.
    pub fn parse_and_store(
        &self,
        uri: &Url,
        source: &str,
    ) {
        self.snapshots.insert(uri.clone(), SyntaxTree::parse(source));
    }

    pub fn insert(
        &self,
        uri: Url,
        tree: SyntaxTree,
    ) {
        self.snapshots.insert(uri, tree);
    }

    /// Get an Arc-cloned snapshot. No lock held after return.
    pub fn get(
        &self,
        uri: &Url,
    ) -> Option<SyntaxTree> {
        self.snapshots.get(uri).map(|entry| entry.clone())
    }

    pub fn remove(
        &self,
        uri: &Url,
    ) {
        self.snapshots.remove(uri);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl Default for DocumentTrees {
    fn default() -> Self {
        Self::new()
    }
}
