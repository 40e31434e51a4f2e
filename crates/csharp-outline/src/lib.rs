pub mod document;
pub mod server;
pub mod symbols;
pub mod syntax;
pub mod text_pos;

pub use document::{Document, DocumentStore};
pub use server::{GLYPH_DOCUMENT_SYMBOL_METHOD, OutlineLanguageServer};
pub use symbols::{
    DeclarationDepth, DeclarationSource, FlatSymbolEntry, Glyph, ProjectionStrategy, SymbolError, SymbolForest,
    SymbolOutline, SymbolProvider,
};
pub use syntax::{DocumentTrees, SyntaxTree};
