use super::*;

fn test_doc(text: &str) -> Document {
    Document::new(Url::parse("file:///Test.cs").unwrap(), text.to_string(), 1)
}

fn change(
    start: (u32, u32),
    end: (u32, u32),
    text: &str,
) -> TextDocumentContentChangeEvent {
    TextDocumentContentChangeEvent {
        range: Some(Range::new(Position::new(start.0, start.1), Position::new(end.0, end.1))),
        range_length: None,
        text: text.to_string(),
    }
}

#[test]
fn offset_of_counts_lines() {
    let doc = test_doc("int a;\nstring b;\n");
    assert_eq!(doc.offset_of(Position::new(0, 0)), Some(0));
    assert_eq!(doc.offset_of(Position::new(1, 0)), Some(7));
    assert_eq!(doc.offset_of(Position::new(3, 0)), None);
}

#[test]
fn offset_of_clamps_before_crlf() {
    let doc = test_doc("class A\r\n{\r\n}\r\n");
    assert_eq!(doc.offset_of(Position::new(0, 99)), Some(7));
    assert_eq!(doc.offset_of(Position::new(1, 5)), Some(10));
}

#[test]
fn incremental_change() {
    let mut doc = test_doc("class Old { }");
    doc.apply_changes(vec![change((0, 6), (0, 9), "Renamed")], 2);
    assert_eq!(doc.text, "class Renamed { }");
    assert_eq!(doc.version, 2);
}

#[test]
fn incremental_changes_apply_in_order() {
    let mut doc = test_doc("class A\n{\n}\n");
    doc.apply_changes(
        vec![
            change((1, 1), (1, 1), "\n    void M() { }"),
            // Positions refer to the text after the first change.
            change((2, 9), (2, 10), "Run"),
        ],
        3,
    );
    assert_eq!(doc.text, "class A\n{\n    void Run() { }\n}\n");
}

#[test]
fn multibyte_columns_are_utf16() {
    let mut doc = test_doc("// é😀\nclass A { }");
    // "// é" is 4 UTF-16 units, the emoji is 2 more.
    doc.apply_changes(vec![change((0, 4), (0, 6), "!")], 2);
    assert_eq!(doc.text, "// é!\nclass A { }");
}

#[test]
fn full_replacement_change() {
    let mut doc = test_doc("class A { }");
    doc.apply_changes(
        vec![TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: "struct B { }".to_string(),
        }],
        5,
    );
    assert_eq!(doc.text, "struct B { }");
    assert_eq!(doc.version, 5);
}

#[test]
fn unresolvable_range_is_skipped() {
    let mut doc = test_doc("class A { }");
    doc.apply_changes(vec![change((9, 0), (9, 1), "x"), change((0, 6), (0, 7), "B")], 2);
    assert_eq!(doc.text, "class B { }");
    assert_eq!(doc.version, 2);
}

#[test]
fn insert_past_line_end_keeps_crlf() {
    let mut doc = test_doc("class A\r\n{\r\n}\r\n");
    doc.apply_changes(vec![change((0, 99), (0, 99), " : B")], 2);
    assert_eq!(doc.text, "class A : B\r\n{\r\n}\r\n");
}

#[test]
fn replace_whole_crlf_line_content() {
    let mut doc = test_doc("class A\r\n{\r\n    int x;\r\n}\r\n");
    doc.apply_changes(vec![change((2, 0), (2, 99), "    int y;")], 2);
    assert_eq!(doc.text, "class A\r\n{\r\n    int y;\r\n}\r\n");

    doc.apply_changes(vec![change((1, 1), (1, 1), " // body")], 3);
    assert_eq!(doc.text, "class A\r\n{ // body\r\n    int y;\r\n}\r\n");
}
