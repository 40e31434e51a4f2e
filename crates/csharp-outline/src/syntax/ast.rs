use rowan::NodeOrToken;

use crate::syntax::cst::{SyntaxElement, SyntaxNode, SyntaxToken};
use crate::syntax::kind::SyntaxKind;

pub trait AstNode: Sized {
    fn cast(syntax: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, $($kind:ident)|+) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            syntax: SyntaxNode,
        }

        impl AstNode for $name {
            fn cast(syntax: SyntaxNode) -> Option<Self> {
                if matches!(syntax.kind(), $(SyntaxKind::$kind)|+) {
                    Some(Self { syntax })
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.syntax
            }
        }
    };
}

fn last_direct_ident(syntax: &SyntaxNode) -> Option<SyntaxToken> {
    syntax
        .children_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| token.kind() == SyntaxKind::Ident)
        .last()
}

/// Last direct identifier before the first element matching `is_stop`.
fn last_ident_before(
    syntax: &SyntaxNode,
    is_stop: impl Fn(&SyntaxElement) -> bool,
) -> Option<SyntaxToken> {
    let mut last = None;
    for element in syntax.children_with_tokens() {
        if is_stop(&element) {
            break;
        }
        if let Some(token) = element.as_token()
            && token.kind() == SyntaxKind::Ident
        {
            last = Some(token.clone());
        }
    }
    last
}

fn first_direct_ident(syntax: &SyntaxNode) -> Option<SyntaxToken> {
    direct_tokens(syntax).find(|token| token.kind() == SyntaxKind::Ident)
}

fn direct_tokens(syntax: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> {
    syntax
        .children_with_tokens()
        .filter_map(|element| element.into_token())
}

ast_node!(Root, Root);

impl Root {
    pub fn members(&self) -> impl Iterator<Item = SyntaxNode> {
        self.syntax.children()
    }
}

ast_node!(NamespaceDecl, NamespaceDecl);

impl NamespaceDecl {
    pub fn name(&self) -> Option<QualifiedName> {
        self.syntax.children().find_map(QualifiedName::cast)
    }
}

ast_node!(QualifiedName, QualifiedName);

impl QualifiedName {
    /// Dotted name without trivia (`Company.Product`).
    pub fn text(&self) -> String {
        direct_tokens(&self.syntax)
            .filter(|token| !token.kind().is_trivia())
            .map(|token| token.text().to_string())
            .collect()
    }

    pub fn last_segment(&self) -> Option<SyntaxToken> {
        last_direct_ident(&self.syntax)
    }
}

ast_node!(
    /// Class, struct, interface, record or enum declaration.
    TypeDecl,
    ClassDecl | StructDecl | InterfaceDecl | RecordDecl | EnumDecl
);

impl TypeDecl {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        // The name is the first identifier after the type keyword; contextual
        // modifiers (`partial`) and `record` itself are identifiers too.
        let mut seen_keyword = false;
        for token in direct_tokens(&self.syntax) {
            match token.kind() {
                SyntaxKind::KwClass | SyntaxKind::KwStruct | SyntaxKind::KwInterface | SyntaxKind::KwEnum => {
                    seen_keyword = true;
                },
                SyntaxKind::Ident if token.text() == "record" && self.syntax.kind() == SyntaxKind::RecordDecl => {
                    seen_keyword = true;
                },
                SyntaxKind::Ident if seen_keyword => return Some(token),
                _ => {},
            }
        }
        None
    }

    /// `record struct` declarations are value types.
    pub fn is_record_struct(&self) -> bool {
        self.syntax.kind() == SyntaxKind::RecordDecl
            && direct_tokens(&self.syntax).any(|token| token.kind() == SyntaxKind::KwStruct)
    }

    pub fn type_params(&self) -> Option<TypeParamList> {
        self.syntax.children().find_map(TypeParamList::cast)
    }

    pub fn member_list(&self) -> Option<SyntaxNode> {
        self.syntax
            .children()
            .find(|child| child.kind() == SyntaxKind::MemberList)
    }
}

ast_node!(EnumMemberDecl, EnumMemberDecl);

impl EnumMemberDecl {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        last_ident_before(&self.syntax, |element| element.kind() == SyntaxKind::Equal)
    }
}

ast_node!(DelegateDecl, DelegateDecl);

impl DelegateDecl {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        last_ident_before(&self.syntax, |element| {
            matches!(element.kind(), SyntaxKind::TypeParamList | SyntaxKind::ParamList)
        })
    }

    pub fn type_params(&self) -> Option<TypeParamList> {
        self.syntax.children().find_map(TypeParamList::cast)
    }

    pub fn param_list(&self) -> Option<ParamList> {
        self.syntax.children().find_map(ParamList::cast)
    }
}

ast_node!(
    /// Field, event field or local declaration holding one or more declarators.
    VariableList,
    FieldDecl | EventDecl | LocalDecl
);

impl VariableList {
    pub fn declarators(&self) -> impl Iterator<Item = VariableDeclarator> {
        self.syntax.children().filter_map(VariableDeclarator::cast)
    }

    pub fn is_const(&self) -> bool {
        direct_tokens(&self.syntax).any(|token| token.kind() == SyntaxKind::KwConst)
    }

    /// Name of an event declared with accessors (`event EventHandler E { add; remove; }`).
    pub fn accessor_event_name(&self) -> Option<SyntaxToken> {
        if self.syntax.kind() != SyntaxKind::EventDecl {
            return None;
        }
        let accessors = self
            .syntax
            .children()
            .any(|child| child.kind() == SyntaxKind::AccessorList);
        if !accessors {
            return None;
        }
        last_ident_before(&self.syntax, |element| element.kind() == SyntaxKind::AccessorList)
    }
}

ast_node!(VariableDeclarator, VariableDeclarator);

impl VariableDeclarator {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        last_ident_before(&self.syntax, |element| element.kind() == SyntaxKind::Equal)
    }
}

ast_node!(PropertyDecl, PropertyDecl);

impl PropertyDecl {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        last_ident_before(&self.syntax, |element| {
            matches!(
                element.kind(),
                SyntaxKind::AccessorList | SyntaxKind::ExprBody | SyntaxKind::Equal
            )
        })
    }
}

ast_node!(IndexerDecl, IndexerDecl);

impl IndexerDecl {
    pub fn this_token(&self) -> Option<SyntaxToken> {
        direct_tokens(&self.syntax).find(|token| token.kind() == SyntaxKind::KwThis)
    }

    pub fn param_list(&self) -> Option<ParamList> {
        self.syntax.children().find_map(ParamList::cast)
    }
}

ast_node!(
    /// Anything with a name and a parameter list: methods, constructors,
    /// destructors and local functions.
    CallableDecl,
    MethodDecl | ConstructorDecl | DestructorDecl | LocalFunction
);

impl CallableDecl {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        last_ident_before(&self.syntax, |element| {
            matches!(
                element.kind(),
                SyntaxKind::TypeParamList | SyntaxKind::ParamList | SyntaxKind::Block | SyntaxKind::ExprBody
            )
        })
    }

    pub fn type_params(&self) -> Option<TypeParamList> {
        self.syntax.children().find_map(TypeParamList::cast)
    }

    pub fn param_list(&self) -> Option<ParamList> {
        self.syntax.children().find_map(ParamList::cast)
    }

    pub fn body(&self) -> Option<SyntaxNode> {
        self.syntax
            .children()
            .find(|child| matches!(child.kind(), SyntaxKind::Block | SyntaxKind::ExprBody))
    }
}

ast_node!(OperatorDecl, OperatorDecl | ConversionOperatorDecl);

impl OperatorDecl {
    /// Tokens naming the operator: the symbol after `operator`, or the target
    /// type of a conversion operator.
    pub fn operator_tokens(&self) -> Vec<SyntaxToken> {
        if self.syntax.kind() == SyntaxKind::ConversionOperatorDecl {
            return self
                .syntax
                .children()
                .find(|child| child.kind() == SyntaxKind::TypeRef)
                .map(|type_ref| {
                    type_ref
                        .descendants_with_tokens()
                        .filter_map(|element| element.into_token())
                        .filter(|token| !token.kind().is_trivia())
                        .collect()
                })
                .unwrap_or_default();
        }

        let mut tokens = Vec::new();
        let mut after_keyword = false;
        for element in self.syntax.children_with_tokens() {
            match element {
                NodeOrToken::Token(token) if after_keyword => {
                    if !token.kind().is_trivia() {
                        tokens.push(token);
                    }
                },
                NodeOrToken::Token(token) => after_keyword = token.kind() == SyntaxKind::KwOperator,
                // The parameter list ends the operator symbol.
                NodeOrToken::Node(_) if after_keyword => break,
                NodeOrToken::Node(_) => {},
            }
        }
        tokens
    }

    pub fn operator_keyword(&self) -> Option<SyntaxToken> {
        direct_tokens(&self.syntax).find(|token| token.kind() == SyntaxKind::KwOperator)
    }

    pub fn conversion_keyword(&self) -> Option<SyntaxToken> {
        direct_tokens(&self.syntax)
            .find(|token| matches!(token.kind(), SyntaxKind::KwImplicit | SyntaxKind::KwExplicit))
    }

    pub fn param_list(&self) -> Option<ParamList> {
        self.syntax.children().find_map(ParamList::cast)
    }
}

ast_node!(UnknownMember, UnknownMember);

impl UnknownMember {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        first_direct_ident(&self.syntax)
    }
}

ast_node!(TypeParamList, TypeParamList);

impl TypeParamList {
    /// Declared type parameter names, skipping variance keywords.
    pub fn names(&self) -> Vec<String> {
        direct_tokens(&self.syntax)
            .filter(|token| token.kind() == SyntaxKind::Ident)
            .map(|token| token.text().to_string())
            .collect()
    }
}

ast_node!(ParamList, ParamList);

impl ParamList {
    pub fn params(&self) -> impl Iterator<Item = Param> {
        self.syntax.children().filter_map(Param::cast)
    }
}

ast_node!(Param, Param);

impl Param {
    pub fn modifiers(&self) -> impl Iterator<Item = SyntaxToken> {
        direct_tokens(&self.syntax).take_while(|token| token.kind() != SyntaxKind::Ident).filter(|token| {
            matches!(
                token.kind(),
                SyntaxKind::KwRef
                    | SyntaxKind::KwOut
                    | SyntaxKind::KwIn
                    | SyntaxKind::KwParams
                    | SyntaxKind::KwThis
                    | SyntaxKind::KwReadonly
            )
        })
    }

    pub fn type_ref(&self) -> Option<TypeRef> {
        self.syntax.children().find_map(TypeRef::cast)
    }
}

ast_node!(TypeRef, TypeRef);

ast_node!(AttributeList, AttributeList);

impl AttributeList {
    /// Attribute names at the top level of the list, last segment only
    /// (`[System.Obsolete("x"), Serializable]` yields `Obsolete`, `Serializable`).
    pub fn names(&self) -> Vec<String> {
        let tokens: Vec<_> = direct_tokens(&self.syntax)
            .filter(|token| !token.kind().is_trivia())
            .collect();
        let mut names = Vec::new();
        let mut depth = 0usize;
        for (idx, token) in tokens.iter().enumerate() {
            match token.kind() {
                SyntaxKind::LParen | SyntaxKind::LBracket | SyntaxKind::LBrace => depth += 1,
                SyntaxKind::RParen | SyntaxKind::RBracket | SyntaxKind::RBrace => depth = depth.saturating_sub(1),
                SyntaxKind::Ident if depth == 1 => {
                    let next = tokens.get(idx + 1).map(|next| next.kind());
                    let is_target = next == Some(SyntaxKind::Colon);
                    let is_qualifier = matches!(next, Some(SyntaxKind::Dot | SyntaxKind::DoubleColon));
                    if !is_target && !is_qualifier {
                        names.push(token.text().to_string());
                    }
                },
                _ => {},
            }
        }
        names
    }
}
