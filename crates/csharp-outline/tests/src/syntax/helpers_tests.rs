use super::*;
use crate::syntax::SyntaxTree;

fn first_node(
    source: &str,
    kind: SyntaxKind,
) -> SyntaxNode {
    SyntaxTree::parse(source)
        .root()
        .descendants()
        .find(|node| node.kind() == kind)
        .unwrap_or_else(|| panic!("no {kind:?} node in {source:?}"))
}

#[test]
fn trimmed_range_skips_surrounding_trivia() {
    let source = "class A\n{\n    // leading\n    int x;   \n}\n";
    let field = first_node(source, SyntaxKind::FieldDecl);
    let range = trimmed_range(&field);
    assert_eq!(&source[range], "int x;");
}

#[test]
fn trimmed_range_keeps_attributes_and_modifiers() {
    let source = "class A { [Obsolete] public void M() { } }";
    let method = first_node(source, SyntaxKind::MethodDecl);
    assert_eq!(&source[trimmed_range(&method)], "[Obsolete] public void M() { }");
}

#[test]
fn compact_text_normalizes_spacing() {
    let source = "class A { Dictionary< string ,List<int> > map; }";
    let type_ref = first_node(source, SyntaxKind::TypeRef);
    assert_eq!(compact_text(&type_ref), "Dictionary<string, List<int>>");
}

#[test]
fn compact_text_separates_words() {
    let source = "class A { (int count, string name) pair; }";
    let type_ref = first_node(source, SyntaxKind::TypeRef);
    assert_eq!(compact_text(&type_ref), "(int count, string name)");
}

#[test]
fn modifiers_exclude_accessor_modifiers() {
    let source = "class A { public int P { get; private set; } }";
    let property = first_node(source, SyntaxKind::PropertyDecl);
    assert_eq!(modifier_kinds(&property), vec![SyntaxKind::KwPublic]);
}

#[test]
fn obsolete_attribute_detection() {
    let qualified = first_node("class A { [System.Obsolete(\"no\")] void M() { } }", SyntaxKind::MethodDecl);
    assert!(has_obsolete_attribute(&qualified));

    let suffixed = first_node("[ObsoleteAttribute] class B { }", SyntaxKind::ClassDecl);
    assert!(has_obsolete_attribute(&suffixed));

    let other = first_node("[Serializable, Foo(Obsolete)] class C { }", SyntaxKind::ClassDecl);
    assert!(!has_obsolete_attribute(&other));
}
