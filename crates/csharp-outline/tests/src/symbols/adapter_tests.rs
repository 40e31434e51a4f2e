use super::*;

fn records(
    source: &str,
    depth: DeclarationDepth,
) -> Vec<DeclarationRecord> {
    SyntaxDeclarationSource
        .declarations(&SyntaxTree::parse(source), depth)
        .expect("syntax declarations never fail")
}

/// `(kind, name, parent name)` per record, in emission order.
fn summary(
    source: &str,
    depth: DeclarationDepth,
) -> Vec<(SemanticKind, String, Option<String>)> {
    let records = records(source, depth);
    records
        .iter()
        .map(|record| {
            let parent = record.parent.and_then(|parent| {
                records
                    .iter()
                    .find(|candidate| candidate.id == parent)
                    .map(|candidate| candidate.name.clone())
            });
            (record.kind, record.name.clone(), parent)
        })
        .collect()
}

fn find<'a>(
    records: &'a [DeclarationRecord],
    name: &str,
) -> &'a DeclarationRecord {
    records
        .iter()
        .find(|record| record.name == name)
        .unwrap_or_else(|| panic!("no declaration named {name}"))
}

#[test]
fn empty_document_has_no_declarations() {
    assert!(records("", DeclarationDepth::Members).is_empty());
    assert!(records("  \n// just a comment\n", DeclarationDepth::Locals).is_empty());
}

#[test]
fn class_with_method() {
    let source = "class A { void M() {} }";
    let records = records(source, DeclarationDepth::Members);
    assert_eq!(records.len(), 2);

    let class = &records[0];
    assert_eq!(class.kind, SemanticKind::Class);
    assert_eq!(class.name, "A");
    assert_eq!(class.detail, "A");
    assert_eq!(class.parent, None);
    assert_eq!(class.accessibility, Accessibility::Internal);
    assert_eq!(&source[class.full_range], source);
    assert_eq!(&source[class.selection_range], "A");

    let method = &records[1];
    assert_eq!(method.kind, SemanticKind::Method);
    assert_eq!(method.name, "M");
    assert_eq!(method.detail, "M()");
    assert_eq!(method.parent, Some(class.id));
    assert_eq!(method.accessibility, Accessibility::Private);
    assert_eq!(&source[method.full_range], "void M() {}");
    assert_eq!(&source[method.selection_range], "M");
}

#[test]
fn namespaces_are_containers() {
    let source = "namespace Company.Product\n{\n    class A { }\n}\n";
    let records = records(source, DeclarationDepth::Members);
    let namespace = find(&records, "Company.Product");
    assert_eq!(namespace.kind, SemanticKind::Namespace);
    assert_eq!(&source[namespace.selection_range], "Company.Product");
    assert_eq!(find(&records, "A").parent, Some(namespace.id));
}

#[test]
fn file_scoped_namespace_owns_rest_of_file() {
    let source = "using System;\nnamespace App;\n\nclass A { }\nstruct B { }\n";
    assert_eq!(
        summary(source, DeclarationDepth::Members),
        vec![
            (SemanticKind::Namespace, "App".to_string(), None),
            (SemanticKind::Class, "A".to_string(), Some("App".to_string())),
            (SemanticKind::Struct, "B".to_string(), Some("App".to_string())),
        ]
    );
}

#[test]
fn nested_types_and_members() {
    let source = "class Outer { class Inner { int f; } void M() { } }";
    assert_eq!(
        summary(source, DeclarationDepth::Members),
        vec![
            (SemanticKind::Class, "Outer".to_string(), None),
            (SemanticKind::Class, "Inner".to_string(), Some("Outer".to_string())),
            (SemanticKind::Field, "f".to_string(), Some("Inner".to_string())),
            (SemanticKind::Method, "M".to_string(), Some("Outer".to_string())),
        ]
    );
    let records = records(source, DeclarationDepth::Members);
    assert_eq!(find(&records, "Inner").accessibility, Accessibility::Private);
}

#[test]
fn type_kinds() {
    let source = r#"
interface IShape { double Area(); }
struct Point { }
record Person(string Name);
record struct Pair(int A, int B);
enum Color { Red, Green = 2, Blue }
delegate void Handler(object sender);
"#;
    let kinds: Vec<_> = summary(source, DeclarationDepth::Members)
        .into_iter()
        .map(|(kind, name, _)| (kind, name))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (SemanticKind::Interface, "IShape".to_string()),
            (SemanticKind::Method, "Area".to_string()),
            (SemanticKind::Struct, "Point".to_string()),
            (SemanticKind::Record, "Person".to_string()),
            (SemanticKind::Struct, "Pair".to_string()),
            (SemanticKind::Enum, "Color".to_string()),
            (SemanticKind::EnumMember, "Red".to_string()),
            (SemanticKind::EnumMember, "Green".to_string()),
            (SemanticKind::EnumMember, "Blue".to_string()),
            (SemanticKind::Delegate, "Handler".to_string()),
        ]
    );
}

#[test]
fn default_accessibility_follows_container() {
    let source = "interface I { void M(); } enum E { A } class C { void N() { } }";
    let records = records(source, DeclarationDepth::Members);
    assert_eq!(find(&records, "I").accessibility, Accessibility::Internal);
    assert_eq!(find(&records, "M").accessibility, Accessibility::Public);
    assert_eq!(find(&records, "A").accessibility, Accessibility::Public);
    assert_eq!(find(&records, "N").accessibility, Accessibility::Private);
}

#[test]
fn explicit_accessibility() {
    let source = r#"
public class C
{
    protected internal int a;
    private protected int b;
    internal void M() { }
    protected int P { get; set; }
    private static readonly int s = 1;
}
"#;
    let records = records(source, DeclarationDepth::Members);
    assert_eq!(find(&records, "C").accessibility, Accessibility::Public);
    assert_eq!(find(&records, "a").accessibility, Accessibility::ProtectedInternal);
    assert_eq!(find(&records, "b").accessibility, Accessibility::PrivateProtected);
    assert_eq!(find(&records, "M").accessibility, Accessibility::Internal);
    assert_eq!(find(&records, "P").accessibility, Accessibility::Protected);
    assert_eq!(find(&records, "s").accessibility, Accessibility::Private);
}

#[test]
fn each_field_declarator_is_a_declaration() {
    let source = "class A { int a, b = 2; const int C = 1; }";
    let records = records(source, DeclarationDepth::Members);

    let a = find(&records, "a");
    let b = find(&records, "b");
    assert_eq!(a.kind, SemanticKind::Field);
    assert_eq!(b.kind, SemanticKind::Field);
    assert_eq!(&source[a.full_range], "a");
    assert_eq!(&source[b.full_range], "b = 2");

    let constant = find(&records, "C");
    assert_eq!(constant.kind, SemanticKind::Constant);
    assert_eq!(&source[constant.full_range], "const int C = 1;");
    assert_eq!(&source[constant.selection_range], "C");
}

#[test]
fn signatures_show_parameter_types() {
    let source = r#"
class Box<T, U>
{
    public Box(int size) { }
    ~Box() { }
    void Put<V>(ref int slot, List<string> names, params object[] rest) { }
    public int this[int index] { get => 0; }
}
"#;
    let records = records(source, DeclarationDepth::Members);
    assert_eq!(find(&records, "Box").detail, "Box<T, U>");

    let ctor = records
        .iter()
        .find(|record| record.kind == SemanticKind::Constructor)
        .expect("constructor");
    assert_eq!(ctor.name, "Box");
    assert_eq!(ctor.detail, "Box(int)");

    let dtor = find(&records, "~Box");
    assert_eq!(dtor.kind, SemanticKind::Destructor);
    assert_eq!(dtor.detail, "~Box()");
    assert_eq!(&source[dtor.selection_range], "Box");

    assert_eq!(
        find(&records, "Put").detail,
        "Put<V>(ref int, List<string>, params object[])"
    );

    let indexer = find(&records, "this[]");
    assert_eq!(indexer.kind, SemanticKind::Indexer);
    assert_eq!(indexer.detail, "this[int]");
    assert_eq!(&source[indexer.selection_range], "this");
}

#[test]
fn operators_are_named_by_symbol() {
    let source = r#"
struct Money
{
    public static Money operator +(Money a, Money b) => a;
    public static implicit operator decimal(Money m) => 0;
}
"#;
    let records = records(source, DeclarationDepth::Members);

    let plus = find(&records, "operator +");
    assert_eq!(plus.kind, SemanticKind::Operator);
    assert_eq!(plus.detail, "operator +(Money, Money)");
    assert_eq!(&source[plus.selection_range], "+");

    let conversion = find(&records, "implicit operator decimal");
    assert_eq!(conversion.kind, SemanticKind::Operator);
    assert_eq!(conversion.detail, "implicit operator decimal(Money)");
    assert_eq!(&source[conversion.selection_range], "decimal");
}

#[test]
fn events_and_properties() {
    let source = r#"
class Button
{
    public event EventHandler Clicked;
    event EventHandler Hovered { add { } remove { } }
    public string Text { get; set; } = "";
    public int Length => Text.Length;
}
"#;
    let records = records(source, DeclarationDepth::Members);
    assert_eq!(find(&records, "Clicked").kind, SemanticKind::Event);
    assert_eq!(find(&records, "Hovered").kind, SemanticKind::Event);
    assert_eq!(find(&records, "Text").kind, SemanticKind::Property);
    assert_eq!(find(&records, "Length").kind, SemanticKind::Property);
    assert_eq!(records.len(), 5);
}

#[test]
fn obsolete_attribute_marks_deprecated() {
    let source = r#"
class A
{
    [Obsolete] void Old() { }
    [System.Obsolete("use New")] void Older() { }
    [Serializable] void New() { }
}
"#;
    let records = records(source, DeclarationDepth::Members);
    assert!(find(&records, "Old").deprecated);
    assert!(find(&records, "Older").deprecated);
    assert!(!find(&records, "New").deprecated);
    assert!(!find(&records, "A").deprecated);
}

#[test]
fn locals_only_at_locals_depth() {
    let source = r#"
class A
{
    void M()
    {
        int x = 1;
        var y = 2;
        for (int i = 0; i < 3; i++) { }
        int Local(int a) { int z = a; return z; }
    }
}
"#;
    assert_eq!(
        summary(source, DeclarationDepth::Members),
        vec![
            (SemanticKind::Class, "A".to_string(), None),
            (SemanticKind::Method, "M".to_string(), Some("A".to_string())),
        ]
    );
    assert_eq!(
        summary(source, DeclarationDepth::Locals),
        vec![
            (SemanticKind::Class, "A".to_string(), None),
            (SemanticKind::Method, "M".to_string(), Some("A".to_string())),
            (SemanticKind::Local, "x".to_string(), Some("M".to_string())),
            (SemanticKind::Local, "y".to_string(), Some("M".to_string())),
            (SemanticKind::Local, "i".to_string(), Some("M".to_string())),
            (SemanticKind::LocalFunction, "Local".to_string(), Some("M".to_string())),
            (SemanticKind::Local, "z".to_string(), Some("Local".to_string())),
        ]
    );

    let records = records(source, DeclarationDepth::Locals);
    let local = find(&records, "Local");
    assert_eq!(local.detail, "Local(int)");
    assert_eq!(local.accessibility, Accessibility::NotApplicable);
}

#[test]
fn top_level_statement_locals() {
    let source = "var greeting = \"hi\";\nclass A { }\n";
    assert_eq!(
        summary(source, DeclarationDepth::Members),
        vec![(SemanticKind::Class, "A".to_string(), None)]
    );
    assert_eq!(
        summary(source, DeclarationDepth::Locals),
        vec![
            (SemanticKind::Local, "greeting".to_string(), None),
            (SemanticKind::Class, "A".to_string(), None),
        ]
    );
}

#[test]
fn unclassified_member_is_unknown() {
    let source = "unsafe struct S { fixed byte buffer[16]; int n; }";
    let records = records(source, DeclarationDepth::Members);
    let unknown = find(&records, "buffer");
    assert_eq!(unknown.kind, SemanticKind::Unknown);
    assert_eq!(find(&records, "n").kind, SemanticKind::Field);
}

#[test]
fn partial_source_keeps_identified_declarations() {
    let source = "class A { void M(";
    assert_eq!(
        summary(source, DeclarationDepth::Members),
        vec![
            (SemanticKind::Class, "A".to_string(), None),
            (SemanticKind::Method, "M".to_string(), Some("A".to_string())),
        ]
    );
}

#[test]
fn selection_within_full_range() {
    let source = r#"
namespace N
{
    [Obsolete]
    public sealed class C<T> : Base where T : class
    {
        private int a, b;
        public T this[int i] => default;
        public static C<T> operator -(C<T> x) => x;
        void M() { int local = 0; }
    }
}
"#;
    for record in records(source, DeclarationDepth::Locals) {
        assert!(
            record.full_range.contains_range(record.selection_range),
            "{}: {:?} not within {:?}",
            record.name,
            record.selection_range,
            record.full_range
        );
    }
}
