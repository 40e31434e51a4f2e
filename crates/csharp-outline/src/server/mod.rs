pub(crate) mod handler;
pub mod settings;
pub(crate) mod state;

pub use handler::GLYPH_DOCUMENT_SYMBOL_METHOD;
pub use settings::ServerSettings;
pub use state::OutlineLanguageServer;
