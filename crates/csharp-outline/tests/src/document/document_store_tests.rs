use super::*;
use tower_lsp::lsp_types::{Position, Range};

fn uri(name: &str) -> Url {
    Url::parse(&format!("file:///src/{name}")).unwrap()
}

fn insert_at(
    line: u32,
    character: u32,
    text: &str,
) -> TextDocumentContentChangeEvent {
    TextDocumentContentChangeEvent {
        range: Some(Range::new(Position::new(line, character), Position::new(line, character))),
        range_length: None,
        text: text.to_string(),
    }
}

#[test]
fn store_open_and_close() {
    let store = DocumentStore::new();
    let uri = uri("Program.cs");
    store.open(uri.clone(), "class Program { }".to_string(), 1);
    assert_eq!(store.len(), 1);

    store.close(&uri);
    assert!(store.is_empty());
    assert!(store.apply_changes(&uri, Vec::new(), 2).is_none());
}

#[test]
fn store_apply_changes_returns_new_text() {
    let store = DocumentStore::new();
    let uri = uri("A.cs");
    store.open(uri.clone(), "class A { }".to_string(), 1);
    let text = store.apply_changes(&uri, vec![insert_at(0, 10, "int x; ")], 2);
    assert_eq!(text.as_deref(), Some("class A { int x; }"));

    let text = store.apply_changes(&uri, vec![insert_at(0, 17, "int y; ")], 3);
    assert_eq!(text.as_deref(), Some("class A { int x; int y; }"));
}

#[test]
fn store_apply_changes_unknown_document_is_dropped() {
    let store = DocumentStore::new();
    let uri = uri("Missing.cs");
    let text = store.apply_changes(
        &uri,
        vec![TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: "class M { }".to_string(),
        }],
        1,
    );
    assert!(text.is_none());
    assert!(store.is_empty());
}

#[test]
fn store_reopen_replaces_content() {
    let store = DocumentStore::new();
    let uri = uri("B.cs");
    store.open(uri.clone(), "v1".to_string(), 1);
    store.open(uri.clone(), "v2".to_string(), 7);
    assert_eq!(store.apply_changes(&uri, Vec::new(), 8).as_deref(), Some("v2"));
    assert_eq!(store.len(), 1);
}

#[test]
fn store_keeps_crlf_terminators_on_edit() {
    let store = DocumentStore::new();
    let uri = uri("Crlf.cs");
    store.open(uri.clone(), "class A\r\n{\r\n}\r\n".to_string(), 1);
    let text = store.apply_changes(&uri, vec![insert_at(0, 99, " : B")], 2);
    assert_eq!(text.as_deref(), Some("class A : B\r\n{\r\n}\r\n"));
}
