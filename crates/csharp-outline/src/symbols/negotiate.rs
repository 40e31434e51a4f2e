use tower_lsp::lsp_types::ClientCapabilities;

/// Which response shape a client receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProjectionStrategy {
    /// Nested `DocumentSymbol` tree.
    Hierarchical,
    /// Pre-order list with container names.
    #[default]
    Flat,
}

impl ProjectionStrategy {
    pub fn for_client(supports_hierarchy: bool) -> Self {
        if supports_hierarchy {
            Self::Hierarchical
        } else {
            Self::Flat
        }
    }

    /// Read `textDocument.documentSymbol.hierarchicalDocumentSymbolSupport`.
    /// Any missing level of the capability tree means no hierarchy support.
    pub fn from_capabilities(capabilities: &ClientCapabilities) -> Self {
        let supports_hierarchy = capabilities
            .text_document
            .as_ref()
            .and_then(|text_document| text_document.document_symbol.as_ref())
            .and_then(|document_symbol| document_symbol.hierarchical_document_symbol_support)
            .unwrap_or(false);
        Self::for_client(supports_hierarchy)
    }
}
