use super::*;

fn record(
    id: u32,
    name: &str,
    start: u32,
    end: u32,
    parent: Option<u32>,
) -> DeclarationRecord {
    DeclarationRecord {
        id: DeclarationId(id),
        kind: SemanticKind::Class,
        name: name.to_string(),
        detail: name.to_string(),
        full_range: TextRange::new(start.into(), end.into()),
        selection_range: TextRange::new(start.into(), start.into()),
        parent: parent.map(DeclarationId),
        accessibility: Accessibility::Internal,
        deprecated: false,
    }
}

/// Indented `name` per node, one per line.
fn outline(forest: &SymbolForest) -> String {
    fn walk(
        node: &SymbolNode,
        depth: usize,
        out: &mut String,
    ) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&node.name);
        out.push('\n');
        for child in &node.children {
            walk(child, depth + 1, out);
        }
    }

    let mut out = String::new();
    for root in forest.roots() {
        walk(root, 0, &mut out);
    }
    out
}

#[test]
fn empty_input_builds_empty_forest() {
    let forest = build_forest(Vec::new());
    assert!(forest.is_empty());
    assert_eq!(forest.len(), 0);
    assert_eq!(forest.preorder().count(), 0);
}

#[test]
fn nests_by_parent_id() {
    let forest = build_forest(vec![
        record(0, "A", 0, 50, None),
        record(1, "M", 10, 20, Some(0)),
        record(2, "N", 25, 40, Some(0)),
        record(3, "x", 30, 35, Some(2)),
    ]);
    assert_eq!(outline(&forest), "A\n  M\n  N\n    x\n");
    assert_eq!(forest.len(), 4);
}

#[test]
fn orders_unordered_input_by_position() {
    let forest = build_forest(vec![
        record(2, "N", 25, 40, Some(0)),
        record(5, "B", 60, 70, None),
        record(1, "M", 10, 20, Some(0)),
        record(0, "A", 0, 50, None),
    ]);
    assert_eq!(outline(&forest), "A\n  M\n  N\nB\n");
}

#[test]
fn equal_starts_keep_input_order() {
    let forest = build_forest(vec![
        record(0, "first", 5, 10, None),
        record(1, "second", 5, 10, None),
        record(2, "third", 5, 10, None),
    ]);
    assert_eq!(outline(&forest), "first\nsecond\nthird\n");
}

#[test]
fn unknown_and_self_parents_become_roots() {
    let forest = build_forest(vec![
        record(0, "orphan", 0, 5, Some(42)),
        record(1, "selfish", 10, 15, Some(1)),
    ]);
    assert_eq!(outline(&forest), "orphan\nselfish\n");
}

#[test]
fn cycles_are_broken() {
    let forest = build_forest(vec![
        record(0, "a", 0, 10, Some(2)),
        record(1, "b", 20, 30, Some(0)),
        record(2, "c", 40, 50, Some(1)),
    ]);
    assert_eq!(forest.len(), 3);
    assert_eq!(forest.roots().len(), 1);
}

#[test]
fn duplicate_ids_keep_every_record() {
    let forest = build_forest(vec![
        record(0, "A", 0, 50, None),
        record(0, "A2", 60, 80, None),
        record(1, "M", 10, 20, Some(0)),
    ]);
    assert_eq!(outline(&forest), "A\n  M\nA2\n");
}

#[test]
fn preorder_pairs_nodes_with_parents() {
    let forest = build_forest(vec![
        record(0, "A", 0, 50, None),
        record(1, "M", 10, 20, Some(0)),
        record(2, "B", 60, 70, None),
    ]);
    let pairs: Vec<_> = forest
        .preorder()
        .map(|(node, parent)| (node.name.as_str(), parent.map(|parent| parent.name.as_str())))
        .collect();
    assert_eq!(pairs, vec![("A", None), ("M", Some("A")), ("B", None)]);
}
