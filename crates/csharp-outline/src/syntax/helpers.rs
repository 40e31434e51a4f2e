//! Node utilities shared by the declaration adapter.
use rowan::TextRange;

use crate::syntax::ast::{AstNode, AttributeList};
use crate::syntax::cst::{SyntaxNode, SyntaxToken};
use crate::syntax::kind::SyntaxKind;

/// Range of a node from its first to its last non-trivia token.
///
/// Leading and trailing whitespace, comments and directives that the parser
/// attached to the node are excluded. Nodes without any significant token
/// keep their raw range.
pub fn trimmed_range(node: &SyntaxNode) -> TextRange {
    let mut tokens = significant_tokens(node);
    let Some(first) = tokens.next() else {
        return node.text_range();
    };
    let end = tokens.last().unwrap_or_else(|| first.clone()).text_range().end();
    TextRange::new(first.text_range().start(), end)
}

fn significant_tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> {
    node.descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| !token.kind().is_trivia() && !is_in_directive(token))
}

fn is_in_directive(token: &SyntaxToken) -> bool {
    token
        .parent_ancestors()
        .any(|ancestor| ancestor.kind() == SyntaxKind::PreprocDirective)
}

/// Source text of a node with trivia dropped and spacing normalized:
/// `Dictionary< string ,int >` renders as `Dictionary<string, int>`.
pub fn compact_text(node: &SyntaxNode) -> String {
    let mut text = String::new();
    let mut previous: Option<SyntaxKind> = None;
    for token in significant_tokens(node) {
        let kind = token.kind();
        if let Some(prev) = previous {
            if prev == SyntaxKind::Comma || (is_word(prev) && is_word(kind)) {
                text.push(' ');
            }
        }
        text.push_str(token.text());
        previous = Some(kind);
    }
    text
}

fn is_word(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::Ident
        || kind.is_keyword()
        || matches!(
            kind,
            SyntaxKind::Integer | SyntaxKind::Float | SyntaxKind::String | SyntaxKind::Char
        )
}

/// Modifier tokens that belong to a declaration itself (not to its
/// attributes, parameters or accessors).
pub fn modifier_kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .map(|token| token.kind())
        .filter(|kind| kind.is_modifier_keyword())
        .collect()
}

/// Whether any attribute list directly on `node` names `Obsolete`.
pub fn has_obsolete_attribute(node: &SyntaxNode) -> bool {
    node.children()
        .filter_map(AttributeList::cast)
        .flat_map(|list| list.names())
        .any(|name| name == "Obsolete" || name == "ObsoleteAttribute")
}

#[cfg(test)]
#[path = "../../tests/src/syntax/helpers_tests.rs"]
mod tests;
