use std::collections::HashMap;

use rowan::TextRange;

use super::types::{Accessibility, DeclarationId, DeclarationRecord, SemanticKind};

/// A declaration placed in the outline tree. Owns its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolNode {
    pub kind: SemanticKind,
    pub name: String,
    pub detail: String,
    pub full_range: TextRange,
    pub selection_range: TextRange,
    pub accessibility: Accessibility,
    pub deprecated: bool,
    pub children: Vec<SymbolNode>,
}

impl SymbolNode {
    fn from_record(record: DeclarationRecord) -> Self {
        Self {
            kind: record.kind,
            name: record.name,
            detail: record.detail,
            full_range: record.full_range,
            selection_range: record.selection_range,
            accessibility: record.accessibility,
            deprecated: record.deprecated,
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(SymbolNode::subtree_len).sum::<usize>()
    }
}

/// Ordered roots of a document outline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolForest {
    roots: Vec<SymbolNode>,
}

impl SymbolForest {
    pub fn roots(&self) -> &[SymbolNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes across all roots.
    pub fn len(&self) -> usize {
        self.roots.iter().map(SymbolNode::subtree_len).sum()
    }

    /// Depth-first pre-order walk yielding each node with its parent.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            stack: self.roots.iter().rev().map(|root| (root, None)).collect(),
        }
    }
}

pub struct Preorder<'a> {
    stack: Vec<(&'a SymbolNode, Option<&'a SymbolNode>)>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (&'a SymbolNode, Option<&'a SymbolNode>);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, parent) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (child, Some(node))));
        Some((node, parent))
    }
}

/// Nest flat declaration records into an outline forest.
///
/// Every record becomes exactly one node. A record whose parent id is
/// unknown, refers to itself, or closes a cycle becomes a root. Siblings are
/// ordered by start offset, ties broken by input order.
pub fn build_forest(records: Vec<DeclarationRecord>) -> SymbolForest {
    let count = records.len();

    let mut slot_of: HashMap<DeclarationId, usize> = HashMap::with_capacity(count);
    for (slot, record) in records.iter().enumerate() {
        slot_of.entry(record.id).or_insert(slot);
    }

    let mut parent_slot: Vec<Option<usize>> = records
        .iter()
        .enumerate()
        .map(|(slot, record)| {
            record
                .parent
                .and_then(|parent| slot_of.get(&parent).copied())
                .filter(|&parent| parent != slot)
        })
        .collect();
    break_cycles(&mut parent_slot);

    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); count];
    for (slot, parent) in parent_slot.iter().enumerate() {
        match parent {
            Some(parent) => children[*parent].push(slot),
            None => roots.push(slot),
        }
    }

    let starts: Vec<_> = records.iter().map(|record| record.full_range.start()).collect();
    let by_position = |slot: &usize| (starts[*slot], *slot);
    roots.sort_by_key(by_position);
    for siblings in &mut children {
        siblings.sort_by_key(by_position);
    }

    let mut records: Vec<Option<DeclarationRecord>> = records.into_iter().map(Some).collect();
    let roots = roots
        .into_iter()
        .filter_map(|slot| materialize(slot, &mut records, &children))
        .collect();
    SymbolForest { roots }
}

/// Cut the parent link that closes each cycle so every chain ends at a root.
fn break_cycles(parent_slot: &mut [Option<usize>]) {
    let mut visited_by = vec![usize::MAX; parent_slot.len()];
    for start in 0..parent_slot.len() {
        visited_by[start] = start;
        let mut current = start;
        while let Some(parent) = parent_slot[current] {
            if visited_by[parent] == start {
                parent_slot[current] = None;
                break;
            }
            visited_by[parent] = start;
            current = parent;
        }
    }
}

fn materialize(
    slot: usize,
    records: &mut [Option<DeclarationRecord>],
    children: &[Vec<usize>],
) -> Option<SymbolNode> {
    let mut node = SymbolNode::from_record(records[slot].take()?);
    node.children = children[slot]
        .iter()
        .filter_map(|&child| materialize(child, records, children))
        .collect();
    Some(node)
}

#[cfg(test)]
#[path = "../../tests/src/symbols/builder_tests.rs"]
mod tests;
