use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tower_lsp::{LanguageServer, jsonrpc::Result, lsp_types::*};
use tracing::{debug, info, warn};

use crate::{
    server::{settings::ServerSettings, state::OutlineLanguageServer},
    symbols::{GlyphDocumentSymbolResponse, ProjectionStrategy, SymbolError, SymbolOutline},
    syntax::SyntaxTree,
};

const CLIENT_NOTIFICATION_PREFIX: &str = "csharp-outline:";

/// Method name of the glyph-carrying outline request.
pub const GLYPH_DOCUMENT_SYMBOL_METHOD: &str = "csharpOutline/documentSymbol";

#[tower_lsp::async_trait]
impl LanguageServer for OutlineLanguageServer {
    async fn initialize(
        &self,
        params: InitializeParams,
    ) -> Result<InitializeResult> {
        info!("Initializing csharp-outline...");

        let initial_settings = ServerSettings::from_lsp_payload(params.initialization_options.as_ref());
        self.apply_settings(initial_settings).await;

        let strategy = ProjectionStrategy::from_capabilities(&params.capabilities);
        info!(?strategy, "Negotiated document symbol shape");
        *self.client_capabilities.write().await = params.capabilities;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::INCREMENTAL)),
                document_symbol_provider: Some(OneOf::Right(DocumentSymbolOptions {
                    label: Some("C#".to_string()),
                    work_done_progress_options: Default::default(),
                })),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "csharp-outline".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(
        &self,
        _: InitializedParams,
    ) {
        info!("csharp-outline initialized");
    }

    async fn did_change_configuration(
        &self,
        params: DidChangeConfigurationParams,
    ) {
        let current = self.settings_snapshot().await;
        let merged = current.merged_with_payload(&params.settings);
        if merged == current {
            return;
        }
        self.apply_settings(merged).await;
        info!("Applied updated csharp-outline settings");
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down csharp-outline");
        Ok(())
    }

    async fn did_open(
        &self,
        params: DidOpenTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        let text = params.text_document.text;
        let version = params.text_document.version;
        let filename = short_name(&uri);

        info!("Opened {filename} (v{version}, {} bytes)", text.len());
        self.log_to_client(format!("Opened {filename}")).await;

        self.document_store.open(uri.clone(), text.clone(), version);
        debug!("{} documents open", self.document_store.len());
        self.document_trees.insert(uri.clone(), SyntaxTree::parse(&text));
        self.bump_generation(&uri);
    }

    async fn did_change(
        &self,
        params: DidChangeTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        let Some(text) = self.document_store.apply_changes(&uri, params.content_changes, version) else {
            warn!("Ignoring change for unopened document {}", short_name(&uri));
            return;
        };

        self.document_trees.insert(uri.clone(), SyntaxTree::parse(&text));
        let generation = self.bump_generation(&uri);
        debug!("Reparsed {} (v{version}, generation {generation})", short_name(&uri));
    }

    async fn did_close(
        &self,
        params: DidCloseTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        self.document_generation.remove(&uri);
        self.document_trees.remove(&uri);
        self.document_store.close(&uri);
        info!("Closed {} ({} documents open)", short_name(&uri), self.document_store.len());
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        let uri = params.text_document.uri;
        let strategy = self.projection_strategy().await;
        let outline = self.checked_outline(&uri, strategy).await?;
        Ok(Some(outline.into_response(&uri)))
    }
}

impl OutlineLanguageServer {
    /// `csharpOutline/documentSymbol`: the negotiated outline with glyphs on
    /// flat entries.
    pub async fn glyph_document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<GlyphDocumentSymbolResponse> {
        let uri = params.text_document.uri;
        let strategy = self.projection_strategy().await;
        let outline = self.checked_outline(&uri, strategy).await?;
        Ok(outline.into_glyph_response(&uri))
    }

    async fn checked_outline(
        &self,
        uri: &Url,
        strategy: ProjectionStrategy,
    ) -> std::result::Result<SymbolOutline, SymbolError> {
        let filename = short_name(uri);
        match self.outline(uri, strategy).await {
            Ok(outline) => {
                debug!("Outline for {filename}: {} top-level entries ({strategy:?})", outline.len());
                Ok(outline)
            },
            Err(error @ SymbolError::Cancelled) => {
                debug!("Outline for {filename} cancelled: document changed");
                Err(error)
            },
            Err(error) => {
                warn!("Outline for {filename} failed: {error}");
                Err(error)
            },
        }
    }

    async fn log_to_client(
        &self,
        message: String,
    ) {
        if !self.log_messages || !self.settings_snapshot().await.logging.level.allows_info() {
            return;
        }
        let result = AssertUnwindSafe(
            self.client
                .log_message(MessageType::INFO, prefixed_client_message(message)),
        )
        .catch_unwind()
        .await;
        if result.is_err() {
            warn!("log_message panicked (client may have disconnected)");
        }
    }
}

fn short_name(uri: &Url) -> String {
    uri.path().rsplit('/').next().unwrap_or(uri.path()).to_owned()
}

fn prefixed_client_message(message: impl AsRef<str>) -> String {
    format!("{CLIENT_NOTIFICATION_PREFIX} {}", message.as_ref())
}
