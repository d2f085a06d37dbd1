//! Tree Utilities
//!
//! Container hierarchy stored as a flat id-indexed table, plus the
//! expand/collapse state and the flattening used for rendering.

use std::collections::{BTreeMap, HashSet};

use crate::models::Container;

/// All containers of a page, keyed by id
pub type ContainerTable = BTreeMap<u32, Container>;

/// One rendered line of the tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TreeRow {
    Node { id: u32, depth: usize, expanded: bool },
    /// "Create new entry here" under an expanded node
    Create { parent: u32, depth: usize },
}

/// Which containers are currently expanded
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreeState {
    expanded: HashSet<u32>,
}

impl TreeState {
    /// Root expanded, plus every node on the path from each initially
    /// opened node up to the root.
    pub fn new(table: &ContainerTable, root: u32, initially_opened: &[u32]) -> Self {
        let mut expanded = HashSet::from([root]);
        for &start in initially_opened {
            let mut current = start;
            // Bounded walk so a corrupt parent chain cannot loop forever
            for _ in 0..=table.len() {
                if current == root {
                    break;
                }
                expanded.insert(current);
                match table.get(&current).and_then(|ct| ct.parent) {
                    Some(parent) if parent != current => current = parent,
                    _ => break,
                }
            }
        }
        Self { expanded }
    }

    pub fn is_expanded(&self, id: u32) -> bool {
        self.expanded.contains(&id)
    }

    pub fn toggle(&mut self, id: u32) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn expand(&mut self, id: u32) {
        self.expanded.insert(id);
    }

    pub fn expanded(&self) -> &HashSet<u32> {
        &self.expanded
    }
}

/// Flatten the visible part of the tree in display order.
///
/// Children are listed only under expanded nodes; when `with_create` is set
/// every expanded node gets a create row before its children.
pub fn visible_rows(table: &ContainerTable, root: u32, state: &TreeState, with_create: bool) -> Vec<TreeRow> {
    fn collect(
        id: u32,
        depth: usize,
        table: &ContainerTable,
        state: &TreeState,
        with_create: bool,
        visited: &mut HashSet<u32>,
        result: &mut Vec<TreeRow>,
    ) {
        if !visited.insert(id) {
            return;
        }
        let Some(container) = table.get(&id) else {
            return;
        };
        let expanded = state.is_expanded(id);
        result.push(TreeRow::Node { id, depth, expanded });
        if !expanded {
            return;
        }
        if with_create {
            result.push(TreeRow::Create { parent: id, depth: depth + 1 });
        }
        for &child in &container.children {
            collect(child, depth + 1, table, state, with_create, visited, result);
        }
    }

    let mut result = Vec::new();
    let mut visited = HashSet::new();
    collect(root, 0, table, state, with_create, &mut visited, &mut result);
    result
}
