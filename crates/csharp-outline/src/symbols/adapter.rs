use rowan::TextRange;
use tracing::trace;

use crate::syntax::SyntaxTree;
use crate::syntax::ast::{
    AstNode, CallableDecl, DelegateDecl, EnumMemberDecl, IndexerDecl, NamespaceDecl, OperatorDecl, ParamList,
    PropertyDecl, TypeDecl, TypeParamList, UnknownMember, VariableList,
};
use crate::syntax::cst::{SyntaxNode, SyntaxToken};
use crate::syntax::helpers::{compact_text, has_obsolete_attribute, modifier_kinds, trimmed_range};
use crate::syntax::kind::SyntaxKind;

use super::SymbolError;
use super::types::{Accessibility, DeclarationDepth, DeclarationId, DeclarationRecord, SemanticKind};

/// Produces the flat declaration list for one document snapshot.
pub trait DeclarationSource: Send + Sync {
    fn declarations(
        &self,
        snapshot: &SyntaxTree,
        depth: DeclarationDepth,
    ) -> Result<Vec<DeclarationRecord>, SymbolError>;
}

/// Declaration source backed by the C# syntax tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxDeclarationSource;

impl DeclarationSource for SyntaxDeclarationSource {
    fn declarations(
        &self,
        snapshot: &SyntaxTree,
        depth: DeclarationDepth,
    ) -> Result<Vec<DeclarationRecord>, SymbolError> {
        let mut collector = Collector {
            depth,
            records: Vec::new(),
        };
        collector.walk_items(&snapshot.root(), None, Container::Namespace);
        trace!(count = collector.records.len(), ?depth, "Collected declarations");
        Ok(collector.records)
    }
}

/// What encloses the declarations being walked; decides default accessibility.
#[derive(Debug, Clone, Copy)]
enum Container {
    Namespace,
    Type(SemanticKind),
}

impl Container {
    fn default_accessibility(self) -> Accessibility {
        match self {
            Container::Namespace => Accessibility::Internal,
            Container::Type(SemanticKind::Interface | SemanticKind::Enum) => Accessibility::Public,
            Container::Type(_) => Accessibility::Private,
        }
    }
}

struct Collector {
    depth: DeclarationDepth,
    records: Vec<DeclarationRecord>,
}

/// Fields of a record that vary per declaration.
struct Declared {
    kind: SemanticKind,
    name: String,
    detail: String,
    full_range: TextRange,
    selection_range: TextRange,
    accessibility: Accessibility,
    deprecated: bool,
}

impl Collector {
    fn push(
        &mut self,
        parent: Option<DeclarationId>,
        declared: Declared,
    ) -> DeclarationId {
        let id = DeclarationId(self.records.len() as u32);
        self.records.push(DeclarationRecord {
            id,
            kind: declared.kind,
            name: declared.name,
            detail: declared.detail,
            full_range: declared.full_range,
            selection_range: declared.selection_range,
            parent,
            accessibility: declared.accessibility,
            deprecated: declared.deprecated,
        });
        id
    }

    fn walk_items(
        &mut self,
        node: &SyntaxNode,
        parent: Option<DeclarationId>,
        container: Container,
    ) {
        for child in node.children() {
            match child.kind() {
                SyntaxKind::MemberList => self.walk_items(&child, parent, container),
                SyntaxKind::NamespaceDecl => self.namespace(&child, parent),
                SyntaxKind::ClassDecl
                | SyntaxKind::StructDecl
                | SyntaxKind::InterfaceDecl
                | SyntaxKind::RecordDecl
                | SyntaxKind::EnumDecl => self.type_decl(&child, parent, container),
                SyntaxKind::EnumMemberDecl => self.enum_member(&child, parent),
                SyntaxKind::DelegateDecl => self.delegate(&child, parent, container),
                SyntaxKind::FieldDecl | SyntaxKind::EventDecl => self.variables(&child, parent, container),
                SyntaxKind::PropertyDecl => self.property(&child, parent, container),
                SyntaxKind::IndexerDecl => self.indexer(&child, parent, container),
                SyntaxKind::MethodDecl | SyntaxKind::ConstructorDecl | SyntaxKind::DestructorDecl => {
                    self.callable(&child, parent, container);
                },
                SyntaxKind::OperatorDecl | SyntaxKind::ConversionOperatorDecl => {
                    self.operator(&child, parent, container);
                },
                SyntaxKind::UnknownMember => self.unknown(&child, parent, container),
                // Top-level statements.
                SyntaxKind::LocalDecl | SyntaxKind::LocalFunction | SyntaxKind::Block | SyntaxKind::Statement
                    if self.depth == DeclarationDepth::Locals =>
                {
                    self.visit_local(&child, parent);
                },
                _ => {},
            }
        }
    }

    fn namespace(
        &mut self,
        node: &SyntaxNode,
        parent: Option<DeclarationId>,
    ) {
        let qualified = NamespaceDecl::cast(node.clone()).and_then(|ns| ns.name());
        let Some(qualified) = qualified.filter(|name| name.last_segment().is_some()) else {
            // Nameless namespace: its members belong to the enclosing scope.
            self.walk_items(node, parent, Container::Namespace);
            return;
        };
        let name = qualified.text();
        let id = self.push(
            parent,
            Declared {
                kind: SemanticKind::Namespace,
                detail: name.clone(),
                name,
                full_range: trimmed_range(node),
                selection_range: trimmed_range(qualified.syntax()),
                accessibility: Accessibility::NotApplicable,
                deprecated: false,
            },
        );
        self.walk_items(node, Some(id), Container::Namespace);
    }

    fn type_decl(
        &mut self,
        node: &SyntaxNode,
        parent: Option<DeclarationId>,
        container: Container,
    ) {
        let Some(decl) = TypeDecl::cast(node.clone()) else {
            return;
        };
        let kind = match node.kind() {
            SyntaxKind::ClassDecl => SemanticKind::Class,
            SyntaxKind::StructDecl => SemanticKind::Struct,
            SyntaxKind::InterfaceDecl => SemanticKind::Interface,
            SyntaxKind::EnumDecl => SemanticKind::Enum,
            _ if decl.is_record_struct() => SemanticKind::Struct,
            _ => SemanticKind::Record,
        };
        let Some(name) = decl.name_token() else {
            // Unnamed type: keep its members visible under the enclosing scope.
            if let Some(members) = decl.member_list() {
                self.walk_items(&members, parent, Container::Type(kind));
            }
            return;
        };

        let id = self.push(
            parent,
            Declared {
                kind,
                name: name.text().to_string(),
                detail: with_type_params(name.text(), decl.type_params()),
                full_range: trimmed_range(node),
                selection_range: name.text_range(),
                accessibility: accessibility_of(node, container),
                deprecated: has_obsolete_attribute(node),
            },
        );
        if let Some(members) = decl.member_list() {
            self.walk_items(&members, Some(id), Container::Type(kind));
        }
    }

    fn enum_member(
        &mut self,
        node: &SyntaxNode,
        parent: Option<DeclarationId>,
    ) {
        let Some(name) = EnumMemberDecl::cast(node.clone()).and_then(|member| member.name_token()) else {
            return;
        };
        self.push(
            parent,
            Declared {
                kind: SemanticKind::EnumMember,
                name: name.text().to_string(),
                detail: name.text().to_string(),
                full_range: trimmed_range(node),
                selection_range: name.text_range(),
                accessibility: Accessibility::Public,
                deprecated: has_obsolete_attribute(node),
            },
        );
    }

    fn delegate(
        &mut self,
        node: &SyntaxNode,
        parent: Option<DeclarationId>,
        container: Container,
    ) {
        let Some(decl) = DelegateDecl::cast(node.clone()) else {
            return;
        };
        let Some(name) = decl.name_token() else {
            return;
        };
        self.push(
            parent,
            Declared {
                kind: SemanticKind::Delegate,
                name: name.text().to_string(),
                detail: with_type_params(name.text(), decl.type_params()),
                full_range: trimmed_range(node),
                selection_range: name.text_range(),
                accessibility: accessibility_of(node, container),
                deprecated: has_obsolete_attribute(node),
            },
        );
    }

    /// Fields, constants and events. Each declarator of `int a, b;` is its own
    /// declaration spanning just that declarator.
    fn variables(
        &mut self,
        node: &SyntaxNode,
        parent: Option<DeclarationId>,
        container: Container,
    ) {
        let Some(list) = VariableList::cast(node.clone()) else {
            return;
        };
        let kind = match node.kind() {
            SyntaxKind::EventDecl => SemanticKind::Event,
            _ if list.is_const() => SemanticKind::Constant,
            _ => SemanticKind::Field,
        };
        let accessibility = accessibility_of(node, container);
        let deprecated = has_obsolete_attribute(node);

        if let Some(name) = list.accessor_event_name() {
            let id = self.push(
                parent,
                Declared {
                    kind,
                    name: name.text().to_string(),
                    detail: name.text().to_string(),
                    full_range: trimmed_range(node),
                    selection_range: name.text_range(),
                    accessibility,
                    deprecated,
                },
            );
            self.walk_member_body(node, id);
            return;
        }

        let declarators: Vec<_> = list.declarators().collect();
        let single = declarators.len() == 1;
        for declarator in declarators {
            let Some(name) = declarator.name_token() else {
                continue;
            };
            let full_range = if single {
                trimmed_range(node)
            } else {
                trimmed_range(declarator.syntax())
            };
            self.push(
                parent,
                Declared {
                    kind,
                    name: name.text().to_string(),
                    detail: name.text().to_string(),
                    full_range,
                    selection_range: name.text_range(),
                    accessibility,
                    deprecated,
                },
            );
        }
    }

    fn property(
        &mut self,
        node: &SyntaxNode,
        parent: Option<DeclarationId>,
        container: Container,
    ) {
        let Some(name) = PropertyDecl::cast(node.clone()).and_then(|property| property.name_token()) else {
            return;
        };
        let id = self.push(
            parent,
            Declared {
                kind: SemanticKind::Property,
                name: name.text().to_string(),
                detail: name.text().to_string(),
                full_range: trimmed_range(node),
                selection_range: name.text_range(),
                accessibility: accessibility_of(node, container),
                deprecated: has_obsolete_attribute(node),
            },
        );
        self.walk_member_body(node, id);
    }

    fn indexer(
        &mut self,
        node: &SyntaxNode,
        parent: Option<DeclarationId>,
        container: Container,
    ) {
        let Some(decl) = IndexerDecl::cast(node.clone()) else {
            return;
        };
        let Some(this) = decl.this_token() else {
            return;
        };
        let params = parameter_types(decl.param_list());
        let id = self.push(
            parent,
            Declared {
                kind: SemanticKind::Indexer,
                name: "this[]".to_string(),
                detail: format!("this[{}]", params.join(", ")),
                full_range: trimmed_range(node),
                selection_range: this.text_range(),
                accessibility: accessibility_of(node, container),
                deprecated: has_obsolete_attribute(node),
            },
        );
        self.walk_member_body(node, id);
    }

    /// Methods, constructors and destructors.
    fn callable(
        &mut self,
        node: &SyntaxNode,
        parent: Option<DeclarationId>,
        container: Container,
    ) {
        let Some(decl) = CallableDecl::cast(node.clone()) else {
            return;
        };
        let Some(name_token) = decl.name_token() else {
            return;
        };
        let (kind, name) = match node.kind() {
            SyntaxKind::ConstructorDecl => (SemanticKind::Constructor, name_token.text().to_string()),
            SyntaxKind::DestructorDecl => (SemanticKind::Destructor, format!("~{}", name_token.text())),
            _ => (SemanticKind::Method, name_token.text().to_string()),
        };
        let detail = signature(&name, decl.type_params(), decl.param_list());
        let id = self.push(
            parent,
            Declared {
                kind,
                name,
                detail,
                full_range: trimmed_range(node),
                selection_range: name_token.text_range(),
                accessibility: accessibility_of(node, container),
                deprecated: has_obsolete_attribute(node),
            },
        );
        self.walk_member_body(node, id);
    }

    fn operator(
        &mut self,
        node: &SyntaxNode,
        parent: Option<DeclarationId>,
        container: Container,
    ) {
        let Some(decl) = OperatorDecl::cast(node.clone()) else {
            return;
        };
        let tokens = decl.operator_tokens();
        let symbol: String = match node.children().find(|child| child.kind() == SyntaxKind::TypeRef) {
            // Conversion operators are named by their target type.
            Some(target) if node.kind() == SyntaxKind::ConversionOperatorDecl => compact_text(&target),
            _ => tokens.iter().map(|token| token.text()).collect(),
        };
        let name = match decl.conversion_keyword() {
            Some(keyword) => format!("{} operator {symbol}", keyword.text()),
            None => format!("operator {symbol}"),
        };
        let Some(selection_range) = token_span(&tokens).or_else(|| {
            decl.operator_keyword()
                .or_else(|| decl.conversion_keyword())
                .map(|token| token.text_range())
        }) else {
            return;
        };
        let detail = signature(&name, None, decl.param_list());
        let id = self.push(
            parent,
            Declared {
                kind: SemanticKind::Operator,
                name,
                detail,
                full_range: trimmed_range(node),
                selection_range,
                accessibility: accessibility_of(node, container),
                deprecated: has_obsolete_attribute(node),
            },
        );
        self.walk_member_body(node, id);
    }

    fn unknown(
        &mut self,
        node: &SyntaxNode,
        parent: Option<DeclarationId>,
        container: Container,
    ) {
        let Some(name) = UnknownMember::cast(node.clone()).and_then(|member| member.name_token()) else {
            return;
        };
        self.push(
            parent,
            Declared {
                kind: SemanticKind::Unknown,
                name: name.text().to_string(),
                detail: name.text().to_string(),
                full_range: trimmed_range(node),
                selection_range: name.text_range(),
                accessibility: accessibility_of(node, container),
                deprecated: has_obsolete_attribute(node),
            },
        );
    }

    // ── locals ──────────────────────────────────────────────────────────

    fn walk_member_body(
        &mut self,
        member: &SyntaxNode,
        member_id: DeclarationId,
    ) {
        if self.depth == DeclarationDepth::Locals {
            self.walk_locals(member, Some(member_id));
        }
    }

    fn walk_locals(
        &mut self,
        node: &SyntaxNode,
        parent: Option<DeclarationId>,
    ) {
        for child in node.children() {
            self.visit_local(&child, parent);
        }
    }

    fn visit_local(
        &mut self,
        node: &SyntaxNode,
        parent: Option<DeclarationId>,
    ) {
        match node.kind() {
            SyntaxKind::LocalDecl => {
                let Some(list) = VariableList::cast(node.clone()) else {
                    return;
                };
                let declarators: Vec<_> = list.declarators().collect();
                let single = declarators.len() == 1;
                for declarator in declarators {
                    let Some(name) = declarator.name_token() else {
                        continue;
                    };
                    let full_range = if single {
                        trimmed_range(node)
                    } else {
                        trimmed_range(declarator.syntax())
                    };
                    self.push(
                        parent,
                        Declared {
                            kind: SemanticKind::Local,
                            name: name.text().to_string(),
                            detail: name.text().to_string(),
                            full_range,
                            selection_range: name.text_range(),
                            accessibility: Accessibility::NotApplicable,
                            deprecated: false,
                        },
                    );
                }
            },
            SyntaxKind::LocalFunction => {
                let Some(decl) = CallableDecl::cast(node.clone()) else {
                    return;
                };
                let Some(name) = decl.name_token() else {
                    self.walk_locals(node, parent);
                    return;
                };
                let id = self.push(
                    parent,
                    Declared {
                        kind: SemanticKind::LocalFunction,
                        name: name.text().to_string(),
                        detail: signature(name.text(), decl.type_params(), decl.param_list()),
                        full_range: trimmed_range(node),
                        selection_range: name.text_range(),
                        accessibility: Accessibility::NotApplicable,
                        deprecated: has_obsolete_attribute(node),
                    },
                );
                self.walk_locals(node, Some(id));
            },
            SyntaxKind::ParamList | SyntaxKind::AttributeList | SyntaxKind::TypeRef => {},
            _ => self.walk_locals(node, parent),
        }
    }
}

fn accessibility_of(
    node: &SyntaxNode,
    container: Container,
) -> Accessibility {
    let modifiers = modifier_kinds(node);
    let has = |kind: SyntaxKind| modifiers.contains(&kind);
    match (
        has(SyntaxKind::KwPublic),
        has(SyntaxKind::KwProtected),
        has(SyntaxKind::KwInternal),
        has(SyntaxKind::KwPrivate),
    ) {
        (true, ..) => Accessibility::Public,
        (_, true, true, _) => Accessibility::ProtectedInternal,
        (_, true, _, true) => Accessibility::PrivateProtected,
        (_, true, ..) => Accessibility::Protected,
        (_, _, true, _) => Accessibility::Internal,
        (_, _, _, true) => Accessibility::Private,
        _ => container.default_accessibility(),
    }
}

fn with_type_params(
    name: &str,
    type_params: Option<TypeParamList>,
) -> String {
    match type_params.map(|list| list.names()) {
        Some(names) if !names.is_empty() => format!("{name}<{}>", names.join(", ")),
        _ => name.to_string(),
    }
}

/// `Name<T>(ref int, string)`: parameter modifiers and types, no names.
fn signature(
    name: &str,
    type_params: Option<TypeParamList>,
    params: Option<ParamList>,
) -> String {
    format!("{}({})", with_type_params(name, type_params), parameter_types(params).join(", "))
}

fn parameter_types(params: Option<ParamList>) -> Vec<String> {
    let Some(params) = params else {
        return Vec::new();
    };
    params
        .params()
        .map(|param| {
            let mut parts: Vec<String> = param.modifiers().map(|token| token.text().to_string()).collect();
            if let Some(type_ref) = param.type_ref() {
                parts.push(compact_text(type_ref.syntax()));
            }
            parts.join(" ")
        })
        .filter(|text| !text.is_empty())
        .collect()
}

fn token_span(tokens: &[SyntaxToken]) -> Option<TextRange> {
    let first = tokens.first()?;
    let last = tokens.last()?;
    Some(TextRange::new(first.text_range().start(), last.text_range().end()))
}

#[cfg(test)]
#[path = "../../tests/src/symbols/adapter_tests.rs"]
mod tests;
