use super::*;
use crate::syntax::cst::SyntaxNode;

fn parse(input: &str) -> SyntaxNode {
    SyntaxNode::new_root(Parser::new(input).parse())
}

fn check(
    input: &str,
    expected_tree: &str,
) {
    let node = parse(input);
    let actual_tree = format!("{:#?}", node);
    assert_eq!(actual_tree.trim(), expected_tree.trim());
}

/// Declaration node kinds in preorder, skipping bodies' plumbing nodes.
fn decl_kinds(input: &str) -> Vec<SyntaxKind> {
    parse(input)
        .descendants()
        .map(|node| node.kind())
        .filter(|kind| {
            matches!(
                kind,
                SyntaxKind::NamespaceDecl
                    | SyntaxKind::ClassDecl
                    | SyntaxKind::StructDecl
                    | SyntaxKind::InterfaceDecl
                    | SyntaxKind::RecordDecl
                    | SyntaxKind::EnumDecl
                    | SyntaxKind::EnumMemberDecl
                    | SyntaxKind::DelegateDecl
                    | SyntaxKind::FieldDecl
                    | SyntaxKind::EventDecl
                    | SyntaxKind::VariableDeclarator
                    | SyntaxKind::PropertyDecl
                    | SyntaxKind::IndexerDecl
                    | SyntaxKind::MethodDecl
                    | SyntaxKind::ConstructorDecl
                    | SyntaxKind::DestructorDecl
                    | SyntaxKind::OperatorDecl
                    | SyntaxKind::ConversionOperatorDecl
                    | SyntaxKind::UnknownMember
                    | SyntaxKind::LocalDecl
                    | SyntaxKind::LocalFunction
            )
        })
        .collect()
}

#[test]
fn test_empty() {
    check("", "Root@0..0");
}

#[test]
fn test_class_tree() {
    check(
        "class A { }",
        r#"
Root@0..11
  ClassDecl@0..11
    KwClass@0..5 "class"
    Whitespace@5..6 " "
    Ident@6..7 "A"
    Whitespace@7..8 " "
    MemberList@8..11
      LBrace@8..9 "{"
      Whitespace@9..10 " "
      RBrace@10..11 "}"
"#,
    );
}

#[test]
fn test_field_tree() {
    check(
        "int x;",
        r#"
Root@0..6
  LocalDecl@0..6
    TypeRef@0..3
      KwInt@0..3 "int"
    Whitespace@3..4 " "
    VariableDeclarator@4..5
      Ident@4..5 "x"
    Semicolon@5..6 ";"
"#,
    );
}

#[test]
fn test_member_kinds() {
    let input = r#"
namespace N
{
    public class A<T> : Base, IFoo where T : class
    {
        private int _a, _b = 2;
        public A(int a) : base(a) { }
        ~A() { }
        public string Name { get; set; } = "";
        public int this[int i] => i;
        public event EventHandler Changed;
        public static A operator +(A l, A r) => l;
        public static implicit operator int(A a) => 0;
        void IFoo.Run<TArg>(TArg arg) where TArg : new() { }
        public enum Color { Red, Green = 2 }
    }
}
"#;
    assert_eq!(
        decl_kinds(input),
        vec![
            SyntaxKind::NamespaceDecl,
            SyntaxKind::ClassDecl,
            SyntaxKind::FieldDecl,
            SyntaxKind::VariableDeclarator,
            SyntaxKind::VariableDeclarator,
            SyntaxKind::ConstructorDecl,
            SyntaxKind::DestructorDecl,
            SyntaxKind::PropertyDecl,
            SyntaxKind::IndexerDecl,
            SyntaxKind::EventDecl,
            SyntaxKind::VariableDeclarator,
            SyntaxKind::OperatorDecl,
            SyntaxKind::ConversionOperatorDecl,
            SyntaxKind::MethodDecl,
            SyntaxKind::EnumDecl,
            SyntaxKind::EnumMemberDecl,
            SyntaxKind::EnumMemberDecl,
        ]
    );
}

#[test]
fn test_type_kinds() {
    let input = r#"
namespace Outer.Inner;
public partial record Person(string Name);
public record struct Point(int X, int Y);
internal interface IShape { double Area(); }
readonly struct S { }
public delegate void Handler<T>(T value);
"#;
    assert_eq!(
        decl_kinds(input),
        vec![
            SyntaxKind::NamespaceDecl,
            SyntaxKind::RecordDecl,
            SyntaxKind::RecordDecl,
            SyntaxKind::InterfaceDecl,
            SyntaxKind::MethodDecl,
            SyntaxKind::StructDecl,
            SyntaxKind::DelegateDecl,
        ]
    );
}

#[test]
fn test_locals_in_bodies() {
    let input = r#"
class A
{
    void M()
    {
        var x = new List<int> { 1, 2 };
        int a = 1, b;
        for (int i = 0; i < 10; i++) { }
        foreach (var item in items) { Use(item); }
        using var stream = Open();
        const int Limit = 3;
        int Local(int y) => y * 2;
        x.Add(a < b ? 1 : 2);
        await Task.Delay(1);
    }
}
"#;
    assert_eq!(
        decl_kinds(input),
        vec![
            SyntaxKind::ClassDecl,
            SyntaxKind::MethodDecl,
            SyntaxKind::LocalDecl,
            SyntaxKind::VariableDeclarator,
            SyntaxKind::LocalDecl,
            SyntaxKind::VariableDeclarator,
            SyntaxKind::VariableDeclarator,
            SyntaxKind::LocalDecl,
            SyntaxKind::VariableDeclarator,
            SyntaxKind::LocalDecl,
            SyntaxKind::VariableDeclarator,
            SyntaxKind::LocalDecl,
            SyntaxKind::VariableDeclarator,
            SyntaxKind::LocalDecl,
            SyntaxKind::VariableDeclarator,
            SyntaxKind::LocalFunction,
        ]
    );
}

#[test]
fn test_unknown_member_recovers() {
    let input = "unsafe struct B { fixed byte buffer[16]; int after; }";
    assert_eq!(
        decl_kinds(input),
        vec![
            SyntaxKind::StructDecl,
            SyntaxKind::UnknownMember,
            SyntaxKind::FieldDecl,
            SyntaxKind::VariableDeclarator,
        ]
    );
}

#[test]
fn test_preprocessor_directives_are_opaque() {
    let input = "class A\n{\n#region Fields\n    int x;\n#endregion\n}\n";
    let root = parse(input);
    let directives = root
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::PreprocDirective)
        .count();
    assert_eq!(directives, 2);
    assert_eq!(
        decl_kinds(input),
        vec![SyntaxKind::ClassDecl, SyntaxKind::FieldDecl, SyntaxKind::VariableDeclarator]
    );
}

#[test]
fn test_lossless_on_malformed_input() {
    let inputs = [
        "class A { void M( { int x = ; } ",
        "namespace { } } ) ] class",
        "class A<T where T : { public int }",
        "@\"unterminated",
        "enum E { A = , , B }",
        "class C { public int P { get => ; set } }",
    ];
    for input in inputs {
        let root = parse(input);
        assert_eq!(root.text().to_string(), input, "tree must cover all input");
    }
}
