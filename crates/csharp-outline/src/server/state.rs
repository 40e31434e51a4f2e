use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::RwLock;
use tower_lsp::{
    Client,
    lsp_types::{ClientCapabilities, Url},
};

use crate::{
    document::DocumentStore,
    server::settings::ServerSettings,
    symbols::{Cancellation, ProjectionStrategy, SymbolError, SymbolOutline, SymbolProvider},
    syntax::DocumentTrees,
};

/// The csharp-outline backend that implements the Language Server Protocol.
pub struct OutlineLanguageServer {
    /// The LSP client handle, used for log messages back to the editor.
    pub(crate) client: Client,

    /// Thread-safe store of all open documents.
    pub(crate) document_store: Arc<DocumentStore>,

    /// Rowan-parsed syntax trees for all open documents.
    pub(crate) document_trees: Arc<DocumentTrees>,

    /// Monotonic per-document generation, bumped on every edit and removed on
    /// close. A request that started on an older generation is stale.
    pub(crate) document_generation: Arc<DashMap<Url, u64>>,

    /// Capabilities the client sent in `initialize`.
    pub(crate) client_capabilities: RwLock<ClientCapabilities>,

    /// Runtime server settings updated from LSP configuration.
    pub(crate) settings: Arc<RwLock<ServerSettings>>,

    /// Mirror lifecycle messages to the client's log (`--log-messages`).
    pub(crate) log_messages: bool,
}

impl OutlineLanguageServer {
    /// Create a new `OutlineLanguageServer` wired to the given LSP client.
    pub fn new(
        client: Client,
        log_messages: bool,
    ) -> Self {
        Self {
            client,
            document_store: Arc::new(DocumentStore::new()),
            document_trees: Arc::new(DocumentTrees::new()),
            document_generation: Arc::new(DashMap::new()),
            client_capabilities: RwLock::new(ClientCapabilities::default()),
            settings: Arc::new(RwLock::new(ServerSettings::default())),
            log_messages,
        }
    }

    pub(crate) async fn settings_snapshot(&self) -> ServerSettings {
        self.settings.read().await.clone()
    }

    pub(crate) async fn apply_settings(
        &self,
        settings: ServerSettings,
    ) {
        *self.settings.write().await = settings;
    }

    pub(crate) async fn projection_strategy(&self) -> ProjectionStrategy {
        ProjectionStrategy::from_capabilities(&*self.client_capabilities.read().await)
    }

    /// Mark a new revision of `uri`. Call after its tree has been stored.
    pub(crate) fn bump_generation(
        &self,
        uri: &Url,
    ) -> u64 {
        let mut generation = self.document_generation.entry(uri.clone()).or_insert(0);
        *generation += 1;
        *generation
    }

    /// Run the outline pipeline for an open document with the current
    /// settings, cancelling if the document changes underneath it.
    pub(crate) async fn outline(
        &self,
        uri: &Url,
        strategy: ProjectionStrategy,
    ) -> Result<SymbolOutline, SymbolError> {
        let settings = self.settings_snapshot().await;
        let provider = SymbolProvider::new().with_depth(settings.symbols.depth());
        let guard = GenerationGuard::capture(&self.document_generation, uri)
            .ok_or_else(|| SymbolError::InvalidDocument(uri.clone()))?;
        provider.document_symbols(&self.document_trees, uri, strategy, &guard)
    }
}

/// Cancels a request once its document moves past the generation it started on.
pub(crate) struct GenerationGuard {
    generations: Arc<DashMap<Url, u64>>,
    uri: Url,
    generation: u64,
}

impl GenerationGuard {
    pub(crate) fn capture(
        generations: &Arc<DashMap<Url, u64>>,
        uri: &Url,
    ) -> Option<Self> {
        let generation = *generations.get(uri)?;
        Some(Self {
            generations: Arc::clone(generations),
            uri: uri.clone(),
            generation,
        })
    }
}

impl Cancellation for GenerationGuard {
    fn is_cancelled(&self) -> bool {
        self.generations
            .get(&self.uri)
            .is_none_or(|current| *current != self.generation)
    }
}
