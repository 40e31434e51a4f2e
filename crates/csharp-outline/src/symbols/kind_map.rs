use serde::Serialize;
use tower_lsp::lsp_types::SymbolKind;
use tracing::warn;

use super::types::{Accessibility, SemanticKind};

/// Presentation icon for flat outline entries. Serializes as the variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Glyph {
    Namespace,
    ClassPublic,
    ClassProtected,
    ClassInternal,
    ClassPrivate,
    StructurePublic,
    StructureProtected,
    StructureInternal,
    StructurePrivate,
    InterfacePublic,
    InterfaceProtected,
    InterfaceInternal,
    InterfacePrivate,
    EnumPublic,
    EnumProtected,
    EnumInternal,
    EnumPrivate,
    EnumMemberPublic,
    EnumMemberProtected,
    EnumMemberInternal,
    EnumMemberPrivate,
    DelegatePublic,
    DelegateProtected,
    DelegateInternal,
    DelegatePrivate,
    FieldPublic,
    FieldProtected,
    FieldInternal,
    FieldPrivate,
    ConstantPublic,
    ConstantProtected,
    ConstantInternal,
    ConstantPrivate,
    PropertyPublic,
    PropertyProtected,
    PropertyInternal,
    PropertyPrivate,
    EventPublic,
    EventProtected,
    EventInternal,
    EventPrivate,
    MethodPublic,
    MethodProtected,
    MethodInternal,
    MethodPrivate,
    Operator,
    Local,
    Unknown,
}

/// Pick the glyph variant for an accessibility level.
///
/// The two compound levels share the protected icon; declarations without an
/// accessibility present as public.
fn by_access(
    accessibility: Accessibility,
    public: Glyph,
    protected: Glyph,
    internal: Glyph,
    private: Glyph,
) -> Glyph {
    match accessibility {
        Accessibility::Public | Accessibility::NotApplicable => public,
        Accessibility::Protected | Accessibility::ProtectedInternal | Accessibility::PrivateProtected => protected,
        Accessibility::Internal => internal,
        Accessibility::Private => private,
    }
}

/// Map a declaration kind to its protocol kind and glyph.
///
/// Accessibility only changes the glyph. `Unknown` declarations fall back to
/// `OBJECT` so a single unclassified declaration never fails a request.
pub fn map_kind(
    kind: SemanticKind,
    accessibility: Accessibility,
) -> (SymbolKind, Glyph) {
    use Glyph::*;

    let access = |public, protected, internal, private| by_access(accessibility, public, protected, internal, private);
    match kind {
        SemanticKind::Namespace => (SymbolKind::NAMESPACE, Namespace),
        SemanticKind::Class | SemanticKind::Record => (
            SymbolKind::CLASS,
            access(ClassPublic, ClassProtected, ClassInternal, ClassPrivate),
        ),
        SemanticKind::Struct => (
            SymbolKind::STRUCT,
            access(StructurePublic, StructureProtected, StructureInternal, StructurePrivate),
        ),
        SemanticKind::Interface => (
            SymbolKind::INTERFACE,
            access(InterfacePublic, InterfaceProtected, InterfaceInternal, InterfacePrivate),
        ),
        SemanticKind::Enum => (
            SymbolKind::ENUM,
            access(EnumPublic, EnumProtected, EnumInternal, EnumPrivate),
        ),
        SemanticKind::EnumMember => (
            SymbolKind::ENUM_MEMBER,
            access(EnumMemberPublic, EnumMemberProtected, EnumMemberInternal, EnumMemberPrivate),
        ),
        SemanticKind::Delegate => (
            SymbolKind::FUNCTION,
            access(DelegatePublic, DelegateProtected, DelegateInternal, DelegatePrivate),
        ),
        SemanticKind::Field => (
            SymbolKind::FIELD,
            access(FieldPublic, FieldProtected, FieldInternal, FieldPrivate),
        ),
        SemanticKind::Constant => (
            SymbolKind::CONSTANT,
            access(ConstantPublic, ConstantProtected, ConstantInternal, ConstantPrivate),
        ),
        SemanticKind::Property | SemanticKind::Indexer => (
            SymbolKind::PROPERTY,
            access(PropertyPublic, PropertyProtected, PropertyInternal, PropertyPrivate),
        ),
        SemanticKind::Event => (
            SymbolKind::EVENT,
            access(EventPublic, EventProtected, EventInternal, EventPrivate),
        ),
        SemanticKind::Method | SemanticKind::Destructor => (
            SymbolKind::METHOD,
            access(MethodPublic, MethodProtected, MethodInternal, MethodPrivate),
        ),
        SemanticKind::Constructor => (
            SymbolKind::CONSTRUCTOR,
            access(MethodPublic, MethodProtected, MethodInternal, MethodPrivate),
        ),
        SemanticKind::Operator => (SymbolKind::OPERATOR, Operator),
        SemanticKind::Local => (SymbolKind::VARIABLE, Local),
        SemanticKind::LocalFunction => (SymbolKind::FUNCTION, MethodPrivate),
        SemanticKind::Unknown => {
            warn!(?accessibility, "No symbol kind for unclassified declaration; using Object");
            (SymbolKind::OBJECT, Unknown)
        },
    }
}
