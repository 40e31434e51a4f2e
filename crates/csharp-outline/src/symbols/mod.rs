mod adapter;
mod builder;
mod cancel;
mod error;
mod kind_map;
mod negotiate;
mod project;
mod provider;
mod types;

pub use adapter::{DeclarationSource, SyntaxDeclarationSource};
pub use builder::{Preorder, SymbolForest, SymbolNode, build_forest};
pub use cancel::{Cancellation, NeverCancelled};
pub use error::SymbolError;
pub use kind_map::{Glyph, map_kind};
pub use negotiate::ProjectionStrategy;
pub use project::{FlatSymbolEntry, project_flat, project_hierarchical};
pub use provider::{GlyphDocumentSymbolResponse, GlyphSymbolInformation, SymbolOutline, SymbolProvider};
pub use types::{Accessibility, DeclarationDepth, DeclarationId, DeclarationRecord, SemanticKind};
