use rowan::TextRange;
use serde::Deserialize;

/// Stable identity of a declaration within one adapter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclarationId(pub u32);

/// The closed vocabulary of declaration kinds the adapter can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticKind {
    Namespace,
    Class,
    Record,
    Struct,
    Interface,
    Enum,
    EnumMember,
    Delegate,
    Field,
    Constant,
    Property,
    Indexer,
    Event,
    Method,
    Constructor,
    Destructor,
    Operator,
    Local,
    LocalFunction,
    /// A declaration the parser could delimit but not classify.
    Unknown,
}

impl SemanticKind {
    pub fn is_type(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Record | Self::Struct | Self::Interface | Self::Enum | Self::Delegate
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accessibility {
    Public,
    Protected,
    Internal,
    Private,
    ProtectedInternal,
    PrivateProtected,
    /// Namespaces, locals and local functions.
    #[default]
    NotApplicable,
}

/// How deep the adapter walks into member bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeclarationDepth {
    /// Namespaces, types and type members.
    #[default]
    Members,
    /// Members plus local variables and local functions in their bodies.
    Locals,
}

/// One declaration surfaced by a [`DeclarationSource`](super::DeclarationSource).
///
/// Ranges are byte spans into the snapshot the record was produced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationRecord {
    pub id: DeclarationId,
    pub kind: SemanticKind,
    /// Bare identifier (`M`).
    pub name: String,
    /// Display text (`M(int, string)`).
    pub detail: String,
    pub full_range: TextRange,
    pub selection_range: TextRange,
    pub parent: Option<DeclarationId>,
    pub accessibility: Accessibility,
    pub deprecated: bool,
}
