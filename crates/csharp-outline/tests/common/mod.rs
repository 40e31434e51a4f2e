#![allow(dead_code)]

use std::path::PathBuf;

use csharp_outline::FlatSymbolEntry;
use tower_lsp::lsp_types::{DocumentSymbol, Range, SymbolKind, Url};

pub fn fixture_path(relative_path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(relative_path)
}

pub fn fixture_uri(relative_path: &str) -> Url {
    Url::from_file_path(fixture_path(relative_path)).expect("fixture path is valid file:// URI")
}

pub fn read_fixture(relative_path: &str) -> String {
    std::fs::read_to_string(fixture_path(relative_path)).expect("fixture must exist")
}

pub fn kind_label(kind: SymbolKind) -> &'static str {
    let labels = [
        (SymbolKind::NAMESPACE, "Namespace"),
        (SymbolKind::CLASS, "Class"),
        (SymbolKind::STRUCT, "Struct"),
        (SymbolKind::INTERFACE, "Interface"),
        (SymbolKind::ENUM, "Enum"),
        (SymbolKind::ENUM_MEMBER, "EnumMember"),
        (SymbolKind::FUNCTION, "Function"),
        (SymbolKind::FIELD, "Field"),
        (SymbolKind::CONSTANT, "Constant"),
        (SymbolKind::PROPERTY, "Property"),
        (SymbolKind::EVENT, "Event"),
        (SymbolKind::METHOD, "Method"),
        (SymbolKind::CONSTRUCTOR, "Constructor"),
        (SymbolKind::OPERATOR, "Operator"),
        (SymbolKind::VARIABLE, "Variable"),
        (SymbolKind::OBJECT, "Object"),
    ];
    labels
        .iter()
        .find(|(candidate, _)| *candidate == kind)
        .map(|(_, label)| *label)
        .unwrap_or("Other")
}

pub fn format_range(range: Range) -> String {
    format!(
        "{}:{}-{}:{}",
        range.start.line, range.start.character, range.end.line, range.end.character
    )
}

/// One line per symbol: `Kind name [detail] range @ selection`, children indented.
pub fn dump_nested(symbols: &[DocumentSymbol]) -> String {
    #[allow(deprecated)]
    fn walk(
        symbol: &DocumentSymbol,
        depth: usize,
        out: &mut String,
    ) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&format!(
            "{} {} [{}] {} @ {}",
            kind_label(symbol.kind),
            symbol.name,
            symbol.detail.as_deref().unwrap_or_default(),
            format_range(symbol.range),
            format_range(symbol.selection_range),
        ));
        if symbol.deprecated == Some(true) {
            out.push_str(" deprecated");
        }
        out.push('\n');
        for child in symbol.children.iter().flatten() {
            walk(child, depth + 1, out);
        }
    }

    let mut out = String::new();
    for symbol in symbols {
        walk(symbol, 0, &mut out);
    }
    out
}

/// One line per entry: `Glyph name range in container`.
pub fn dump_flat(entries: &[FlatSymbolEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!("{:?} {} {}", entry.glyph, entry.name, format_range(entry.range)));
        if let Some(container) = &entry.container_name {
            out.push_str(&format!(" in {container}"));
        }
        out.push('\n');
    }
    out
}

/// Total number of symbols in a nested response, children included.
pub fn count_nested(symbols: &[DocumentSymbol]) -> usize {
    symbols
        .iter()
        .map(|symbol| 1 + count_nested(symbol.children.as_deref().unwrap_or_default()))
        .sum()
}
