use rowan::{Checkpoint, GreenNode, GreenNodeBuilder};

use crate::syntax::{kind::SyntaxKind, lexer::Lexer};

/// Contextual keywords that act as modifiers when followed by another word.
const CONTEXTUAL_MODIFIERS: &[&str] = &["partial", "async", "required", "file"];

/// Identifiers that start expressions, never declarations.
const EXPRESSION_KEYWORDS: &[&str] = &["await", "yield", "nameof"];

/// Where an item is being parsed. Type bodies carry the type name so
/// constructors can be told apart from methods.
#[derive(Clone, Copy)]
enum Scope<'a> {
    Namespace,
    Type(&'a str),
}

pub struct Parser<'a> {
    tokens: Vec<(SyntaxKind, &'a str)>,
    pos: usize,
    builder: GreenNodeBuilder<'static>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        let tokens: Vec<_> = Lexer::new(input).collect();
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
        }
    }

    pub fn parse(mut self) -> GreenNode {
        self.start_node(SyntaxKind::Root);
        self.parse_items(Scope::Namespace, false);
        while !self.is_eof() {
            self.bump();
        }
        self.finish_node();
        self.builder.finish()
    }

    fn start_node(
        &mut self,
        kind: SyntaxKind,
    ) {
        self.builder.start_node(kind.into());
    }

    fn start_node_at(
        &mut self,
        checkpoint: Checkpoint,
        kind: SyntaxKind,
    ) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // ── items ───────────────────────────────────────────────────────────

    fn parse_items(
        &mut self,
        scope: Scope<'a>,
        in_braces: bool,
    ) {
        loop {
            self.skip_trivia();
            if self.is_eof() {
                break;
            }
            if self.at(SyntaxKind::RBrace) {
                if in_braces {
                    break;
                }
                // Stray closer at file level.
                self.bump();
                continue;
            }
            let start = self.pos;
            self.parse_item(scope);
            if self.pos == start {
                // Consume unexpected token to make progress
                self.bump();
            }
        }
    }

    fn parse_item(
        &mut self,
        scope: Scope<'a>,
    ) {
        if matches!(scope, Scope::Namespace) && self.at_using_directive() {
            self.parse_using_directive();
            return;
        }

        let checkpoint = self.builder.checkpoint();
        self.parse_attributes();
        self.parse_modifiers();
        self.skip_trivia();

        match self.current() {
            Some(SyntaxKind::KwNamespace) => self.parse_namespace(checkpoint),
            Some(SyntaxKind::KwClass) => self.parse_type_decl(checkpoint, SyntaxKind::ClassDecl),
            Some(SyntaxKind::KwStruct) => self.parse_type_decl(checkpoint, SyntaxKind::StructDecl),
            Some(SyntaxKind::KwInterface) => self.parse_type_decl(checkpoint, SyntaxKind::InterfaceDecl),
            Some(SyntaxKind::KwEnum) => self.parse_enum(checkpoint),
            Some(SyntaxKind::KwDelegate) => self.parse_delegate(checkpoint),
            Some(SyntaxKind::Ident) if self.at_record_keyword() => {
                self.parse_type_decl(checkpoint, SyntaxKind::RecordDecl);
            },
            _ => match scope {
                Scope::Type(type_name) => self.parse_member(checkpoint, type_name),
                Scope::Namespace => self.parse_statement(),
            },
        }
    }

    fn at_using_directive(&self) -> bool {
        if self.at(SyntaxKind::KwUsing) {
            // `using (...)` and `using var` are statements, not directives.
            return !matches!(self.nth(1), Some(SyntaxKind::LParen)) && !self.looks_like_local_decl(self.pos + 1);
        }
        self.at_ident_text("global") && self.nth(1) == Some(SyntaxKind::KwUsing)
    }

    fn parse_using_directive(&mut self) {
        self.start_node(SyntaxKind::UsingDirective);
        while let Some(kind) = self.current() {
            if matches!(kind, SyntaxKind::LBrace | SyntaxKind::RBrace) {
                break;
            }
            self.bump();
            if kind == SyntaxKind::Semicolon {
                break;
            }
        }
        self.finish_node();
    }

    fn parse_namespace(
        &mut self,
        checkpoint: Checkpoint,
    ) {
        self.start_node_at(checkpoint, SyntaxKind::NamespaceDecl);
        self.bump(); // namespace keyword
        self.skip_trivia();
        self.parse_qualified_name();

        if self.advance_to(SyntaxKind::Semicolon) {
            // File-scoped namespace: the rest of the file belongs to it.
            self.bump();
            self.parse_items(Scope::Namespace, false);
        } else if self.advance_to(SyntaxKind::LBrace) {
            self.parse_member_list(Scope::Namespace);
        }
        self.finish_node();
    }

    fn parse_qualified_name(&mut self) {
        self.start_node(SyntaxKind::QualifiedName);
        if self.at(SyntaxKind::Ident) {
            self.bump();
            while self.nth(0) == Some(SyntaxKind::Dot) && self.nth(1) == Some(SyntaxKind::Ident) {
                self.skip_trivia();
                self.bump();
                self.skip_trivia();
                self.bump();
            }
        }
        self.finish_node();
    }

    fn parse_member_list(
        &mut self,
        scope: Scope<'a>,
    ) {
        self.start_node(SyntaxKind::MemberList);
        self.bump(); // {
        self.parse_items(scope, true);
        if self.at(SyntaxKind::RBrace) {
            self.bump();
        }
        self.finish_node();
    }

    fn parse_type_decl(
        &mut self,
        checkpoint: Checkpoint,
        kind: SyntaxKind,
    ) {
        self.start_node_at(checkpoint, kind);
        self.bump(); // class / struct / interface / record
        if kind == SyntaxKind::RecordDecl
            && matches!(self.nth(0), Some(SyntaxKind::KwClass | SyntaxKind::KwStruct))
        {
            self.skip_trivia();
            self.bump();
        }

        let mut name = "";
        if self.advance_to(SyntaxKind::Ident) {
            name = self.current_text();
            self.bump();
        }
        if self.advance_to(SyntaxKind::Less) {
            self.parse_type_params();
        }
        if self.advance_to(SyntaxKind::LParen) {
            // Primary constructor parameters.
            self.parse_param_list();
        }
        if self.advance_to(SyntaxKind::Colon) {
            self.parse_base_list();
        }
        self.skip_constraints();

        if self.advance_to(SyntaxKind::LBrace) {
            self.parse_member_list(Scope::Type(name));
            if self.advance_to(SyntaxKind::Semicolon) {
                self.bump();
            }
        } else if self.advance_to(SyntaxKind::Semicolon) {
            self.bump();
        }
        self.finish_node();
    }

    fn parse_enum(
        &mut self,
        checkpoint: Checkpoint,
    ) {
        self.start_node_at(checkpoint, SyntaxKind::EnumDecl);
        self.bump(); // enum keyword
        if self.advance_to(SyntaxKind::Ident) {
            self.bump();
        }
        if self.advance_to(SyntaxKind::Colon) {
            self.parse_base_list();
        }

        if self.advance_to(SyntaxKind::LBrace) {
            self.start_node(SyntaxKind::MemberList);
            self.bump();
            loop {
                self.skip_trivia();
                match self.current() {
                    None => break,
                    Some(SyntaxKind::RBrace) => {
                        self.bump();
                        break;
                    },
                    _ => {},
                }
                let start = self.pos;
                let member = self.builder.checkpoint();
                self.parse_attributes();
                if self.advance_to(SyntaxKind::Ident) {
                    self.start_node_at(member, SyntaxKind::EnumMemberDecl);
                    self.bump();
                    if self.advance_to(SyntaxKind::Equal) {
                        self.bump();
                        self.consume_expression(&[SyntaxKind::Comma]);
                    }
                    self.finish_node();
                }
                if self.advance_to(SyntaxKind::Comma) {
                    self.bump();
                }
                if self.pos == start {
                    self.bump();
                }
            }
            self.finish_node();
            if self.advance_to(SyntaxKind::Semicolon) {
                self.bump();
            }
        }
        self.finish_node();
    }

    fn parse_delegate(
        &mut self,
        checkpoint: Checkpoint,
    ) {
        self.start_node_at(checkpoint, SyntaxKind::DelegateDecl);
        self.bump(); // delegate keyword
        self.skip_trivia();
        self.parse_type();
        if self.advance_to(SyntaxKind::Ident) {
            self.bump();
        }
        if self.advance_to(SyntaxKind::Less) {
            self.parse_type_params();
        }
        if self.advance_to(SyntaxKind::LParen) {
            self.parse_param_list();
        }
        self.skip_constraints();
        if self.advance_to(SyntaxKind::Semicolon) {
            self.bump();
        }
        self.finish_node();
    }

    // ── members ─────────────────────────────────────────────────────────

    fn parse_member(
        &mut self,
        checkpoint: Checkpoint,
        type_name: &str,
    ) {
        if self.at(SyntaxKind::Ident)
            && !type_name.is_empty()
            && self.current_text() == type_name
            && self.nth(1) == Some(SyntaxKind::LParen)
        {
            self.parse_constructor(checkpoint);
            return;
        }

        match self.current() {
            Some(SyntaxKind::Tilde) => {
                self.start_node_at(checkpoint, SyntaxKind::DestructorDecl);
                self.bump();
                if self.advance_to(SyntaxKind::Ident) {
                    self.bump();
                }
                if self.advance_to(SyntaxKind::LParen) {
                    self.parse_param_list();
                }
                self.parse_body();
                self.finish_node();
                return;
            },
            Some(SyntaxKind::KwImplicit | SyntaxKind::KwExplicit) => {
                self.start_node_at(checkpoint, SyntaxKind::ConversionOperatorDecl);
                self.bump();
                if self.advance_to(SyntaxKind::KwOperator) {
                    self.bump();
                }
                self.skip_trivia();
                self.parse_type();
                if self.advance_to(SyntaxKind::LParen) {
                    self.parse_param_list();
                }
                self.parse_body();
                self.finish_node();
                return;
            },
            Some(SyntaxKind::KwEvent) => {
                self.parse_event(checkpoint);
                return;
            },
            _ => {},
        }

        if !self.parse_type() {
            self.parse_unknown_member(checkpoint);
            return;
        }

        match self.nth(0) {
            Some(SyntaxKind::KwOperator) => {
                self.start_node_at(checkpoint, SyntaxKind::OperatorDecl);
                self.skip_trivia();
                self.bump(); // operator
                self.skip_trivia();
                // The overloaded operator itself (`+`, `==`, `true`, `>` `>` ...).
                while let Some(kind) = self.current() {
                    if matches!(
                        kind,
                        SyntaxKind::LParen | SyntaxKind::LBrace | SyntaxKind::RBrace | SyntaxKind::Semicolon
                    ) {
                        break;
                    }
                    self.bump();
                }
                if self.at(SyntaxKind::LParen) {
                    self.parse_param_list();
                }
                self.parse_body();
                self.finish_node();
            },
            Some(SyntaxKind::KwThis) => {
                self.start_node_at(checkpoint, SyntaxKind::IndexerDecl);
                self.skip_trivia();
                self.bump(); // this
                if self.advance_to(SyntaxKind::LBracket) {
                    self.parse_param_list();
                }
                self.parse_property_body();
                self.finish_node();
            },
            Some(SyntaxKind::Ident) => {
                self.skip_trivia();
                let name = self.builder.checkpoint();
                self.parse_member_name();
                match self.nth(0) {
                    Some(SyntaxKind::Less | SyntaxKind::LParen) => {
                        self.start_node_at(checkpoint, SyntaxKind::MethodDecl);
                        if self.advance_to(SyntaxKind::Less) {
                            self.parse_type_params();
                        }
                        if self.advance_to(SyntaxKind::LParen) {
                            self.parse_param_list();
                        }
                        self.skip_constraints();
                        self.parse_body();
                        self.finish_node();
                    },
                    Some(SyntaxKind::LBrace | SyntaxKind::FatArrow) => {
                        self.start_node_at(checkpoint, SyntaxKind::PropertyDecl);
                        self.parse_property_body();
                        self.finish_node();
                    },
                    Some(SyntaxKind::Equal | SyntaxKind::Semicolon | SyntaxKind::Comma) => {
                        self.start_node_at(checkpoint, SyntaxKind::FieldDecl);
                        self.start_node_at(name, SyntaxKind::VariableDeclarator);
                        self.parse_declarator_initializer();
                        self.finish_node();
                        self.parse_more_declarators();
                        if self.advance_to(SyntaxKind::Semicolon) {
                            self.bump();
                        }
                        self.finish_node();
                    },
                    _ => {
                        self.start_node_at(checkpoint, SyntaxKind::UnknownMember);
                        self.consume_member_rest();
                        self.finish_node();
                    },
                }
            },
            _ => self.parse_unknown_member(checkpoint),
        }
    }

    /// Member name, including explicit interface qualification (`IFoo.Bar`,
    /// `IFoo<T>.Bar`). The last identifier is the declared name.
    fn parse_member_name(&mut self) {
        self.bump();
        loop {
            if self.nth(0) == Some(SyntaxKind::Less)
                && let Some(less) = self.next_index(self.pos)
                && let Some(end) = self.scan_generic_args(less)
                && self.next_index(end).and_then(|idx| self.kind_at(idx)) == Some(SyntaxKind::Dot)
            {
                while self.pos < end {
                    self.bump();
                }
            }
            if self.nth(0) == Some(SyntaxKind::Dot) && self.nth(1) == Some(SyntaxKind::Ident) {
                self.skip_trivia();
                self.bump();
                self.skip_trivia();
                self.bump();
                continue;
            }
            break;
        }
    }

    fn parse_constructor(
        &mut self,
        checkpoint: Checkpoint,
    ) {
        self.start_node_at(checkpoint, SyntaxKind::ConstructorDecl);
        self.bump(); // name
        if self.advance_to(SyntaxKind::LParen) {
            self.parse_param_list();
        }
        if self.advance_to(SyntaxKind::Colon) {
            // `: base(...)` / `: this(...)` initializer.
            while let Some(kind) = self.current() {
                match kind {
                    SyntaxKind::LBrace | SyntaxKind::RBrace | SyntaxKind::FatArrow | SyntaxKind::Semicolon => break,
                    SyntaxKind::LParen => self.bump_balanced(),
                    _ => self.bump(),
                }
            }
        }
        self.parse_body();
        self.finish_node();
    }

    fn parse_event(
        &mut self,
        checkpoint: Checkpoint,
    ) {
        self.start_node_at(checkpoint, SyntaxKind::EventDecl);
        self.bump(); // event keyword
        self.skip_trivia();
        self.parse_type();
        if self.advance_to(SyntaxKind::Ident) {
            let name = self.builder.checkpoint();
            self.parse_member_name();
            if self.advance_to(SyntaxKind::LBrace) {
                self.parse_accessor_list();
            } else {
                self.start_node_at(name, SyntaxKind::VariableDeclarator);
                self.parse_declarator_initializer();
                self.finish_node();
                self.parse_more_declarators();
                if self.advance_to(SyntaxKind::Semicolon) {
                    self.bump();
                }
            }
        }
        self.finish_node();
    }

    fn parse_unknown_member(
        &mut self,
        checkpoint: Checkpoint,
    ) {
        self.start_node_at(checkpoint, SyntaxKind::UnknownMember);
        self.consume_member_rest();
        self.finish_node();
    }

    fn parse_property_body(&mut self) {
        if self.advance_to(SyntaxKind::LBrace) {
            self.parse_accessor_list();
            if self.advance_to(SyntaxKind::Equal) {
                self.bump();
                self.consume_expression(&[]);
                if self.at(SyntaxKind::Semicolon) {
                    self.bump();
                }
            }
        } else {
            self.parse_body();
        }
    }

    fn parse_accessor_list(&mut self) {
        self.start_node(SyntaxKind::AccessorList);
        self.bump(); // {
        loop {
            self.skip_trivia();
            match self.current() {
                None => break,
                Some(SyntaxKind::RBrace) => {
                    self.bump();
                    break;
                },
                _ => {},
            }
            let start = self.pos;
            let accessor = self.builder.checkpoint();
            self.parse_attributes();
            self.parse_modifiers();
            if self.advance_to(SyntaxKind::Ident) {
                self.start_node_at(accessor, SyntaxKind::Accessor);
                self.bump(); // get / set / init / add / remove
                self.parse_body();
                self.finish_node();
            }
            if self.pos == start {
                self.bump();
            }
        }
        self.finish_node();
    }

    fn parse_declarator_initializer(&mut self) {
        if self.advance_to(SyntaxKind::Equal) {
            self.bump();
            self.consume_expression(&[SyntaxKind::Comma]);
        }
    }

    fn parse_more_declarators(&mut self) {
        while self.nth(0) == Some(SyntaxKind::Comma) && self.nth(1) == Some(SyntaxKind::Ident) {
            self.skip_trivia();
            self.bump(); // ,
            self.skip_trivia();
            self.start_node(SyntaxKind::VariableDeclarator);
            self.bump();
            self.parse_declarator_initializer();
            self.finish_node();
        }
    }

    fn parse_body(&mut self) {
        match self.nth(0) {
            Some(SyntaxKind::LBrace) => {
                self.skip_trivia();
                self.parse_block();
            },
            Some(SyntaxKind::FatArrow) => {
                self.skip_trivia();
                self.start_node(SyntaxKind::ExprBody);
                self.bump();
                self.consume_expression(&[]);
                if self.at(SyntaxKind::Semicolon) {
                    self.bump();
                }
                self.finish_node();
            },
            Some(SyntaxKind::Semicolon) => {
                self.skip_trivia();
                self.bump();
            },
            _ => {},
        }
    }

    // ── declaration pieces ──────────────────────────────────────────────

    fn parse_attributes(&mut self) {
        while self.advance_to(SyntaxKind::LBracket) {
            self.start_node(SyntaxKind::AttributeList);
            self.bump_balanced();
            self.finish_node();
        }
    }

    fn parse_modifiers(&mut self) {
        loop {
            match self.nth(0) {
                Some(kind) if kind.is_modifier_keyword() => {
                    self.skip_trivia();
                    self.bump();
                },
                Some(SyntaxKind::Ident) if self.at_contextual_modifier() => {
                    self.skip_trivia();
                    self.bump();
                },
                _ => break,
            }
        }
    }

    fn at_contextual_modifier(&self) -> bool {
        let Some(idx) = self.next_index(self.pos) else {
            return false;
        };
        if !CONTEXTUAL_MODIFIERS.contains(&self.text_at(idx)) {
            return false;
        }
        matches!(
            self.next_index(idx + 1).and_then(|next| self.kind_at(next)),
            Some(kind) if kind == SyntaxKind::Ident || kind.is_keyword()
        )
    }

    fn at_record_keyword(&self) -> bool {
        self.at_ident_text("record")
            && matches!(
                self.nth(1),
                Some(SyntaxKind::Ident | SyntaxKind::KwClass | SyntaxKind::KwStruct)
            )
    }

    fn parse_type_params(&mut self) {
        self.start_node(SyntaxKind::TypeParamList);
        self.bump_angle_balanced();
        self.finish_node();
    }

    fn parse_base_list(&mut self) {
        self.start_node(SyntaxKind::BaseList);
        self.bump(); // :
        while let Some(kind) = self.current() {
            match kind {
                SyntaxKind::LBrace | SyntaxKind::RBrace | SyntaxKind::Semicolon => break,
                SyntaxKind::Ident if self.current_text() == "where" => break,
                SyntaxKind::Less => self.bump_angle_balanced(),
                SyntaxKind::LParen => self.bump_balanced(),
                _ => self.bump(),
            }
        }
        self.finish_node();
    }

    /// Generic constraint clauses (`where T : class, new()`).
    fn skip_constraints(&mut self) {
        while self.nth(0) == Some(SyntaxKind::Ident)
            && self.next_index(self.pos).is_some_and(|idx| self.text_at(idx) == "where")
        {
            self.skip_trivia();
            self.bump();
            while let Some(kind) = self.current() {
                if matches!(
                    kind,
                    SyntaxKind::LBrace | SyntaxKind::RBrace | SyntaxKind::FatArrow | SyntaxKind::Semicolon
                ) {
                    break;
                }
                if kind == SyntaxKind::Ident && self.current_text() == "where" {
                    break;
                }
                self.bump();
            }
        }
    }

    /// Parse `(...)` or `[...]` parameters into a `ParamList`.
    fn parse_param_list(&mut self) {
        let close = if self.at(SyntaxKind::LBracket) {
            SyntaxKind::RBracket
        } else {
            SyntaxKind::RParen
        };
        self.start_node(SyntaxKind::ParamList);
        self.bump(); // open
        loop {
            self.skip_trivia();
            match self.current() {
                None => break,
                Some(kind) if kind == close => {
                    self.bump();
                    break;
                },
                Some(SyntaxKind::LBrace | SyntaxKind::RBrace | SyntaxKind::Semicolon) => break,
                _ => {},
            }
            let start = self.pos;
            self.parse_param(close);
            if self.advance_to(SyntaxKind::Comma) {
                self.bump();
            }
            if self.pos == start {
                self.bump();
            }
        }
        self.finish_node();
    }

    fn parse_param(
        &mut self,
        close: SyntaxKind,
    ) {
        self.start_node(SyntaxKind::Param);
        self.parse_attributes();
        loop {
            match self.nth(0) {
                Some(
                    SyntaxKind::KwRef
                    | SyntaxKind::KwOut
                    | SyntaxKind::KwIn
                    | SyntaxKind::KwParams
                    | SyntaxKind::KwThis
                    | SyntaxKind::KwReadonly,
                ) => {
                    self.skip_trivia();
                    self.bump();
                },
                Some(SyntaxKind::Ident)
                    if self.next_index(self.pos).is_some_and(|idx| self.text_at(idx) == "scoped")
                        && self.nth(1) == Some(SyntaxKind::Ident) =>
                {
                    self.skip_trivia();
                    self.bump();
                },
                _ => break,
            }
        }
        self.skip_trivia();
        self.parse_type();
        if self.advance_to(SyntaxKind::Ident) {
            self.bump();
        }
        if self.advance_to(SyntaxKind::Equal) {
            self.bump();
            self.consume_expression(&[SyntaxKind::Comma, close]);
        }
        self.finish_node();
    }

    /// Wrap a type reference in a `TypeRef` node. Returns `false` (consuming
    /// nothing) when no type starts here.
    fn parse_type(&mut self) -> bool {
        let Some(end) = self.scan_type(self.pos) else {
            return false;
        };
        self.skip_trivia();
        self.start_node(SyntaxKind::TypeRef);
        while self.pos < end {
            self.bump();
        }
        self.finish_node();
        true
    }

    // ── statements ──────────────────────────────────────────────────────

    fn parse_block(&mut self) {
        self.start_node(SyntaxKind::Block);
        self.bump(); // {
        loop {
            self.skip_trivia();
            match self.current() {
                None => break,
                Some(SyntaxKind::RBrace) => {
                    self.bump();
                    break;
                },
                _ => {},
            }
            let start = self.pos;
            self.parse_statement();
            if self.pos == start {
                self.bump();
            }
        }
        self.finish_node();
    }

    fn parse_statement(&mut self) {
        let Some(kind) = self.current() else {
            return;
        };
        match kind {
            SyntaxKind::LBrace => self.parse_block(),
            SyntaxKind::Semicolon => self.bump(),
            SyntaxKind::KwFor | SyntaxKind::KwForeach | SyntaxKind::KwUsing | SyntaxKind::KwFixed
                if self.nth(1) == Some(SyntaxKind::LParen) =>
            {
                self.parse_declaring_head();
            },
            SyntaxKind::KwUsing | SyntaxKind::KwConst => {
                let checkpoint = self.builder.checkpoint();
                self.bump();
                if self.looks_like_local_decl(self.pos) {
                    self.parse_local_decl(checkpoint);
                } else {
                    self.parse_expression_statement();
                }
            },
            SyntaxKind::KwIf | SyntaxKind::KwWhile | SyntaxKind::KwLock | SyntaxKind::KwSwitch => {
                self.bump();
                if self.advance_to(SyntaxKind::LParen) {
                    self.bump_balanced();
                }
            },
            SyntaxKind::KwChecked | SyntaxKind::KwUnchecked if self.nth(1) == Some(SyntaxKind::LParen) => {
                self.parse_expression_statement();
            },
            SyntaxKind::KwElse
            | SyntaxKind::KwDo
            | SyntaxKind::KwTry
            | SyntaxKind::KwFinally
            | SyntaxKind::KwChecked
            | SyntaxKind::KwUnchecked
            | SyntaxKind::KwUnsafe => self.bump(),
            SyntaxKind::KwCatch => {
                self.bump();
                if self.advance_to(SyntaxKind::LParen) {
                    self.bump_balanced();
                }
                if self.nth(0) == Some(SyntaxKind::Ident)
                    && self.next_index(self.pos).is_some_and(|idx| self.text_at(idx) == "when")
                {
                    self.skip_trivia();
                    self.bump();
                    if self.advance_to(SyntaxKind::LParen) {
                        self.bump_balanced();
                    }
                }
            },
            SyntaxKind::KwCase => {
                self.consume_expression(&[SyntaxKind::Colon]);
                if self.at(SyntaxKind::Colon) {
                    self.bump();
                }
            },
            SyntaxKind::KwDefault if self.nth(1) == Some(SyntaxKind::Colon) => {
                self.bump();
                self.skip_trivia();
                self.bump();
            },
            SyntaxKind::Ident
                if self.current_text() == "await"
                    && matches!(self.nth(1), Some(SyntaxKind::KwForeach | SyntaxKind::KwUsing)) =>
            {
                self.bump();
                self.skip_trivia();
                self.parse_statement();
            },
            _ => {
                let checkpoint = self.builder.checkpoint();
                self.parse_attributes();
                self.skip_trivia();
                if self.looks_like_local_function(self.pos) {
                    self.parse_local_function(checkpoint);
                } else if self.looks_like_local_decl(self.pos) {
                    self.parse_local_decl(checkpoint);
                } else {
                    self.parse_expression_statement();
                }
            },
        }
    }

    /// `for (...)`, `foreach (...)`, `using (...)`, `fixed (...)`: the head may
    /// declare locals; the embedded statement is parsed by the caller's loop.
    fn parse_declaring_head(&mut self) {
        self.bump(); // keyword
        self.skip_trivia();
        self.bump(); // (
        self.skip_trivia();
        let checkpoint = self.builder.checkpoint();
        if self.looks_like_local_decl(self.pos) {
            self.parse_local_decl(checkpoint);
        }
        let mut depth = 1usize;
        while let Some(kind) = self.current() {
            match kind {
                SyntaxKind::LParen | SyntaxKind::LBracket | SyntaxKind::LBrace => depth += 1,
                SyntaxKind::RParen | SyntaxKind::RBracket | SyntaxKind::RBrace => depth = depth.saturating_sub(1),
                _ => {},
            }
            self.bump();
            if depth == 0 {
                break;
            }
        }
    }

    fn parse_local_decl(
        &mut self,
        checkpoint: Checkpoint,
    ) {
        self.start_node_at(checkpoint, SyntaxKind::LocalDecl);
        loop {
            match self.nth(0) {
                Some(SyntaxKind::KwRef | SyntaxKind::KwReadonly) => {
                    self.skip_trivia();
                    self.bump();
                },
                Some(SyntaxKind::Ident)
                    if self.next_index(self.pos).is_some_and(|idx| self.text_at(idx) == "scoped")
                        && self.nth(1) == Some(SyntaxKind::Ident) =>
                {
                    self.skip_trivia();
                    self.bump();
                },
                _ => break,
            }
        }
        self.skip_trivia();
        self.parse_type();
        if self.advance_to(SyntaxKind::Ident) {
            self.start_node(SyntaxKind::VariableDeclarator);
            self.bump();
            self.parse_declarator_initializer();
            self.finish_node();
        }
        self.parse_more_declarators();
        if self.advance_to(SyntaxKind::Semicolon) {
            self.bump();
        }
        self.finish_node();
    }

    fn parse_local_function(
        &mut self,
        checkpoint: Checkpoint,
    ) {
        self.start_node_at(checkpoint, SyntaxKind::LocalFunction);
        loop {
            match self.nth(0) {
                Some(SyntaxKind::KwStatic | SyntaxKind::KwUnsafe | SyntaxKind::KwExtern) => {
                    self.skip_trivia();
                    self.bump();
                },
                Some(SyntaxKind::Ident) if self.at_contextual_modifier() => {
                    self.skip_trivia();
                    self.bump();
                },
                _ => break,
            }
        }
        self.skip_trivia();
        self.parse_type();
        if self.advance_to(SyntaxKind::Ident) {
            self.bump();
        }
        if self.advance_to(SyntaxKind::Less) {
            self.parse_type_params();
        }
        if self.advance_to(SyntaxKind::LParen) {
            self.parse_param_list();
        }
        self.skip_constraints();
        self.parse_body();
        self.finish_node();
    }

    fn parse_expression_statement(&mut self) {
        self.start_node(SyntaxKind::Statement);
        self.consume_expression(&[]);
        if self.at(SyntaxKind::Semicolon) {
            self.bump();
        }
        self.finish_node();
    }

    fn looks_like_local_decl(
        &self,
        from: usize,
    ) -> bool {
        let Some(mut idx) = self.next_index(from) else {
            return false;
        };
        loop {
            match self.kind_at(idx) {
                Some(SyntaxKind::KwRef | SyntaxKind::KwReadonly) => {},
                Some(SyntaxKind::Ident)
                    if self.text_at(idx) == "scoped"
                        && self.next_index(idx + 1).and_then(|next| self.kind_at(next)) == Some(SyntaxKind::Ident) => {},
                _ => break,
            }
            let Some(next) = self.next_index(idx + 1) else {
                return false;
            };
            idx = next;
        }
        if self.kind_at(idx) == Some(SyntaxKind::Ident) && EXPRESSION_KEYWORDS.contains(&self.text_at(idx)) {
            return false;
        }
        let Some(end) = self.scan_type(idx) else {
            return false;
        };
        let Some(name) = self.next_index(end) else {
            return false;
        };
        if self.kind_at(name) != Some(SyntaxKind::Ident) {
            return false;
        }
        matches!(
            self.next_index(name + 1).and_then(|after| self.kind_at(after)),
            Some(SyntaxKind::Equal | SyntaxKind::Semicolon | SyntaxKind::Comma | SyntaxKind::KwIn)
        )
    }

    fn looks_like_local_function(
        &self,
        from: usize,
    ) -> bool {
        let Some(mut idx) = self.next_index(from) else {
            return false;
        };
        loop {
            let is_modifier = match self.kind_at(idx) {
                Some(SyntaxKind::KwStatic | SyntaxKind::KwUnsafe | SyntaxKind::KwExtern) => true,
                Some(SyntaxKind::Ident) => {
                    CONTEXTUAL_MODIFIERS.contains(&self.text_at(idx))
                        && matches!(
                            self.next_index(idx + 1).and_then(|next| self.kind_at(next)),
                            Some(kind) if kind == SyntaxKind::Ident || kind.is_keyword()
                        )
                },
                _ => false,
            };
            if !is_modifier {
                break;
            }
            let Some(next) = self.next_index(idx + 1) else {
                return false;
            };
            idx = next;
        }
        if self.kind_at(idx) == Some(SyntaxKind::Ident) && EXPRESSION_KEYWORDS.contains(&self.text_at(idx)) {
            return false;
        }
        let Some(end) = self.scan_type(idx) else {
            return false;
        };
        let Some(name) = self.next_index(end) else {
            return false;
        };
        if self.kind_at(name) != Some(SyntaxKind::Ident) {
            return false;
        }
        let Some(mut open) = self.next_index(name + 1) else {
            return false;
        };
        if self.kind_at(open) == Some(SyntaxKind::Less) {
            let Some(after_args) = self.scan_generic_args(open).and_then(|end| self.next_index(end)) else {
                return false;
            };
            open = after_args;
        }
        if self.kind_at(open) != Some(SyntaxKind::LParen) {
            return false;
        }
        let Some(close) = self.matching_close(open) else {
            return false;
        };
        match self.next_index(close + 1) {
            Some(after) => match self.kind_at(after) {
                Some(SyntaxKind::LBrace | SyntaxKind::FatArrow) => true,
                Some(SyntaxKind::Ident) => self.text_at(after) == "where",
                _ => false,
            },
            None => false,
        }
    }

    // ── token-level consumption ─────────────────────────────────────────

    /// Consume an expression up to (not including) one of `stops`, a `;`, or an
    /// unbalanced closer, all at nesting depth zero.
    fn consume_expression(
        &mut self,
        stops: &[SyntaxKind],
    ) {
        let mut depth = 0usize;
        let mut previous = None;
        while let Some(kind) = self.current() {
            if depth == 0
                && (stops.contains(&kind)
                    || matches!(
                        kind,
                        SyntaxKind::Semicolon | SyntaxKind::RParen | SyntaxKind::RBracket | SyntaxKind::RBrace
                    ))
            {
                break;
            }
            match kind {
                SyntaxKind::LParen | SyntaxKind::LBracket | SyntaxKind::LBrace => depth += 1,
                SyntaxKind::RParen | SyntaxKind::RBracket | SyntaxKind::RBrace => depth -= 1,
                SyntaxKind::Less if previous == Some(SyntaxKind::Ident) => {
                    // Generic argument list in an expression: `new List<int, string>()`.
                    if let Some(end) = self.scan_generic_args(self.pos) {
                        while self.pos < end {
                            self.bump();
                        }
                        previous = Some(SyntaxKind::Greater);
                        continue;
                    }
                },
                _ => {},
            }
            if !kind.is_trivia() {
                previous = Some(kind);
            }
            self.bump();
        }
    }

    /// Consume the rest of a member the parser cannot classify: up to and
    /// including a `;` or a balanced `{ ... }` block at depth zero.
    fn consume_member_rest(&mut self) {
        let mut depth = 0usize;
        while let Some(kind) = self.current() {
            match kind {
                SyntaxKind::RBrace if depth == 0 => break,
                SyntaxKind::RBrace => {
                    depth -= 1;
                    self.bump();
                    if depth == 0 {
                        break;
                    }
                    continue;
                },
                SyntaxKind::LParen | SyntaxKind::LBracket | SyntaxKind::LBrace => depth += 1,
                SyntaxKind::RParen | SyntaxKind::RBracket => depth = depth.saturating_sub(1),
                SyntaxKind::Semicolon if depth == 0 => {
                    self.bump();
                    break;
                },
                _ => {},
            }
            self.bump();
        }
    }

    /// Bump an opening bracket and everything up to its matching closer.
    fn bump_balanced(&mut self) {
        let mut depth = 0usize;
        while let Some(kind) = self.current() {
            match kind {
                SyntaxKind::LParen | SyntaxKind::LBracket | SyntaxKind::LBrace => depth += 1,
                SyntaxKind::RParen | SyntaxKind::RBracket | SyntaxKind::RBrace => depth = depth.saturating_sub(1),
                _ => {},
            }
            self.bump();
            if depth == 0 {
                break;
            }
        }
    }

    fn bump_angle_balanced(&mut self) {
        let mut depth = 0usize;
        while let Some(kind) = self.current() {
            match kind {
                SyntaxKind::LBrace | SyntaxKind::RBrace | SyntaxKind::Semicolon => break,
                SyntaxKind::Less => depth += 1,
                SyntaxKind::Greater => depth = depth.saturating_sub(1),
                _ => {},
            }
            self.bump();
            if depth == 0 {
                break;
            }
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.current() {
                Some(kind) if kind.is_trivia() => self.bump(),
                Some(SyntaxKind::Hash) if self.at_line_start() => self.parse_directive(),
                _ => break,
            }
        }
    }

    /// Preprocessor directives (`#region`, `#if DEBUG`, ...) run to the end of
    /// the line and are kept as opaque nodes.
    fn parse_directive(&mut self) {
        self.start_node(SyntaxKind::PreprocDirective);
        self.bump(); // #
        while let Some(kind) = self.current() {
            if kind == SyntaxKind::Whitespace && self.current_text().contains('\n') {
                break;
            }
            self.bump();
        }
        self.finish_node();
    }

    fn at_line_start(&self) -> bool {
        let mut idx = self.pos;
        while idx > 0 {
            let (kind, text) = self.tokens[idx - 1];
            match kind {
                SyntaxKind::Whitespace if text.contains('\n') => return true,
                SyntaxKind::Whitespace => idx -= 1,
                _ => return false,
            }
        }
        true
    }

    /// If the next non-trivia token is `kind`, consume the trivia before it
    /// and return `true`. Otherwise consume nothing.
    fn advance_to(
        &mut self,
        kind: SyntaxKind,
    ) -> bool {
        if self.nth(0) == Some(kind) {
            self.skip_trivia();
            self.at(kind)
        } else {
            false
        }
    }

    // ── lookahead ───────────────────────────────────────────────────────

    /// Index just past a type reference starting at the first non-trivia token
    /// at or after `from`.
    fn scan_type(
        &self,
        from: usize,
    ) -> Option<usize> {
        let start = self.next_index(from)?;
        let mut end = match self.kind_at(start)? {
            SyntaxKind::LParen => self.matching_close(start)? + 1,
            kind if kind.is_predefined_type() => start + 1,
            SyntaxKind::Ident => {
                let mut end = start + 1;
                loop {
                    if let Some(less) = self.next_index(end)
                        && self.kind_at(less) == Some(SyntaxKind::Less)
                        && let Some(args_end) = self.scan_generic_args(less)
                    {
                        end = args_end;
                    }
                    match self.next_index(end) {
                        Some(sep)
                            if matches!(self.kind_at(sep), Some(SyntaxKind::Dot | SyntaxKind::DoubleColon))
                                && self.next_index(sep + 1).and_then(|n| self.kind_at(n))
                                    == Some(SyntaxKind::Ident) =>
                        {
                            end = self.next_index(sep + 1)? + 1;
                        },
                        _ => break,
                    }
                }
                end
            },
            _ => return None,
        };

        // Nullable, pointer and array rank suffixes.
        while let Some(idx) = self.next_index(end) {
            match self.kind_at(idx) {
                Some(SyntaxKind::Question | SyntaxKind::Star) => end = idx + 1,
                Some(SyntaxKind::LBracket) => {
                    let mut probe = self.next_index(idx + 1)?;
                    while self.kind_at(probe) == Some(SyntaxKind::Comma) {
                        probe = self.next_index(probe + 1)?;
                    }
                    if self.kind_at(probe) != Some(SyntaxKind::RBracket) {
                        break;
                    }
                    end = probe + 1;
                },
                _ => break,
            }
        }
        Some(end)
    }

    /// Index just past a generic argument list starting at `less`, or `None`
    /// when the `<` is not a type argument list.
    fn scan_generic_args(
        &self,
        less: usize,
    ) -> Option<usize> {
        let mut depth = 0usize;
        let mut idx = less;
        while let Some(kind) = self.kind_at(idx) {
            match kind {
                SyntaxKind::Less => depth += 1,
                SyntaxKind::Greater => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(idx + 1);
                    }
                },
                SyntaxKind::Ident
                | SyntaxKind::Comma
                | SyntaxKind::Dot
                | SyntaxKind::DoubleColon
                | SyntaxKind::Question
                | SyntaxKind::Star
                | SyntaxKind::LBracket
                | SyntaxKind::RBracket
                | SyntaxKind::LParen
                | SyntaxKind::RParen
                | SyntaxKind::KwIn
                | SyntaxKind::KwOut
                | SyntaxKind::Whitespace
                | SyntaxKind::Comment => {},
                other if other.is_predefined_type() => {},
                _ => return None,
            }
            idx += 1;
        }
        None
    }

    fn matching_close(
        &self,
        open: usize,
    ) -> Option<usize> {
        let mut depth = 0usize;
        let mut idx = open;
        while let Some(kind) = self.kind_at(idx) {
            match kind {
                SyntaxKind::LParen | SyntaxKind::LBracket | SyntaxKind::LBrace => depth += 1,
                SyntaxKind::RParen | SyntaxKind::RBracket | SyntaxKind::RBrace => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(idx);
                    }
                },
                _ => {},
            }
            idx += 1;
        }
        None
    }

    fn next_index(
        &self,
        from: usize,
    ) -> Option<usize> {
        (from..self.tokens.len()).find(|&idx| !self.tokens[idx].0.is_trivia())
    }

    /// Kind of the `n`-th non-trivia token from the current position.
    fn nth(
        &self,
        n: usize,
    ) -> Option<SyntaxKind> {
        let mut idx = self.next_index(self.pos)?;
        for _ in 0..n {
            idx = self.next_index(idx + 1)?;
        }
        self.kind_at(idx)
    }

    fn kind_at(
        &self,
        idx: usize,
    ) -> Option<SyntaxKind> {
        self.tokens.get(idx).map(|(kind, _)| *kind)
    }

    fn text_at(
        &self,
        idx: usize,
    ) -> &'a str {
        self.tokens.get(idx).map(|(_, text)| *text).unwrap_or_default()
    }

    fn current(&self) -> Option<SyntaxKind> {
        self.kind_at(self.pos)
    }

    fn current_text(&self) -> &'a str {
        self.text_at(self.pos)
    }

    fn at(
        &self,
        kind: SyntaxKind,
    ) -> bool {
        self.current() == Some(kind)
    }

    fn at_ident_text(
        &self,
        text: &str,
    ) -> bool {
        self.at(SyntaxKind::Ident) && self.current_text() == text
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn bump(&mut self) {
        if let Some(&(kind, text)) = self.tokens.get(self.pos) {
            self.builder.token(kind.into(), text);
            self.pos += 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src/syntax/cst_parser_tests.rs"]
mod tests;
