use generational_arena::{Arena, Index};
use serde_json::{json, Map, Value};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::line::{BemName, LineData};

/// Internal field holding the source indentation width.
pub const DEPTH_FIELD: &str = "_depth";
/// Internal field holding the multiplicity count.
pub const NUMBER_FIELD: &str = "_number";
/// Internal field holding the raw source line.
pub const LINE_FIELD: &str = "_line";

/// Tree node in the arena-based shorthand tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Parsed line payload
    pub data: LineData,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in document order; may repeat an index
    pub children: Vec<Index>,
}

/// Arena-based tree produced from one shorthand document.
///
/// Parent links are only used to walk ancestry; document order comes from
/// `children`. Expansion in alias mode can list the same child index several
/// times, so document traversal may visit one arena node more than once.
#[derive(Debug)]
pub struct NodeArena {
    arena: Arena<TreeNode>,
    root: Option<Index>,
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    #[instrument(level = "trace", skip(self, data), fields(name = %data.name))]
    pub fn insert_node(&mut self, data: LineData, parent: Option<Index>) -> Index {
        let node = TreeNode {
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    /// Number of distinct nodes stored.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Number of nodes in document order, counting aliased entries each time.
    pub fn document_len(&self) -> usize {
        self.iter().count()
    }

    /// Pre-order document traversal.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Height of the tree, 0 for an empty arena.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(Index, usize)> = self.root.into_iter().map(|r| (r, 1)).collect();
        while let Some((idx, level)) = stack.pop() {
            height = height.max(level);
            if let Some(node) = self.get_node(idx) {
                stack.extend(node.children.iter().map(|&c| (c, level + 1)));
            }
        }
        height
    }

    /// How often `idx` appears in document order; above one only for aliases.
    pub fn occurrences(&self, idx: Index) -> usize {
        self.iter().filter(|(current, _)| *current == idx).count()
    }

    /// Number of document nodes in the subtree rooted at `idx`.
    pub fn subtree_len(&self, idx: Index) -> usize {
        let mut count = 0;
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.get_node(current) {
                count += 1;
                stack.extend(node.children.iter().copied());
            }
        }
        count
    }

    /// Deep-copy the subtree rooted at `idx`; the copy points at `parent` but is
    /// not registered in the parent's children.
    #[instrument(level = "trace", skip(self))]
    pub fn clone_subtree(&mut self, idx: Index, parent: Option<Index>) -> Option<Index> {
        let data = self.get_node(idx)?.data.clone();
        let copy_root = self.arena.insert(TreeNode {
            data,
            parent,
            children: Vec::new(),
        });

        let mut stack = vec![(idx, copy_root)];
        while let Some((source, copy)) = stack.pop() {
            let children = self
                .get_node(source)
                .map(|n| n.children.clone())
                .unwrap_or_default();
            for child in children {
                let Some(child_data) = self.get_node(child).map(|n| n.data.clone()) else {
                    continue;
                };
                let child_copy = self.arena.insert(TreeNode {
                    data: child_data,
                    parent: Some(copy),
                    children: Vec::new(),
                });
                if let Some(copy_node) = self.arena.get_mut(copy) {
                    copy_node.children.push(child_copy);
                }
                stack.push((child, child_copy));
            }
        }
        Some(copy_root)
    }

    /// Serialize the tree as raw BEMJSON, internal `_` fields included.
    ///
    /// Nesting deeper than `max_depth` fails with `NestingTooDeep`.
    #[instrument(level = "debug", skip(self))]
    pub fn to_raw_value(&self, max_depth: usize) -> DomainResult<Value> {
        match self.root {
            Some(root) => self.node_to_value(root, 0, max_depth),
            None => Ok(Value::Null),
        }
    }

    fn node_to_value(&self, idx: Index, level: usize, max_depth: usize) -> DomainResult<Value> {
        if level > max_depth {
            return Err(DomainError::NestingTooDeep { limit: max_depth });
        }
        let Some(node) = self.get_node(idx) else {
            return Ok(Value::Null);
        };
        let data = &node.data;

        let mut obj = Map::new();
        obj.insert(LINE_FIELD.into(), json!(data.line));
        obj.insert(DEPTH_FIELD.into(), json!(data.depth));
        obj.insert(NUMBER_FIELD.into(), json!(data.multiplicity));
        obj.insert("tag".into(), json!(data.tag));

        let (name_key, mods_key) = match &data.name {
            BemName::Block(_) => ("block", "mods"),
            BemName::Elem(_) => ("elem", "elemMods"),
        };
        obj.insert(name_key.into(), json!(data.name.as_str()));
        if !data.modifiers.is_empty() {
            obj.insert(mods_key.into(), json!(data.modifiers));
        }

        let content = if node.children.is_empty() {
            match &data.text {
                Some(text) => Value::String(text.clone()),
                None => Value::Array(Vec::new()),
            }
        } else {
            // children replace any trailing text
            let mut items = Vec::with_capacity(node.children.len());
            for &child in &node.children {
                items.push(self.node_to_value(child, level + 1, max_depth)?);
            }
            Value::Array(items)
        };
        obj.insert("content".into(), content);

        Ok(Value::Object(obj))
    }
}

pub struct TreeIterator<'a> {
    arena: &'a NodeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a NodeArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn data(name: BemName, depth: usize) -> LineData {
        LineData {
            line: name.as_str().to_string(),
            depth,
            tag: "div".into(),
            name,
            modifiers: BTreeMap::new(),
            multiplicity: 1,
            text: None,
        }
    }

    #[test]
    fn given_nested_nodes_when_iterating_then_visits_in_document_order() {
        let mut arena = NodeArena::new();
        let root = arena.insert_node(data(BemName::Block("a".into()), 0), None);
        let b = arena.insert_node(data(BemName::Elem("b".into()), 2), Some(root));
        arena.insert_node(data(BemName::Elem("c".into()), 4), Some(b));
        arena.insert_node(data(BemName::Elem("d".into()), 2), Some(root));

        let names: Vec<_> = arena.iter().map(|(_, n)| n.data.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
        assert_eq!(arena.height(), 3);
        assert_eq!(arena.subtree_len(b), 2);
    }

    #[test]
    fn given_subtree_when_cloning_then_copy_has_fresh_indices() {
        let mut arena = NodeArena::new();
        let root = arena.insert_node(data(BemName::Block("a".into()), 0), None);
        let b = arena.insert_node(data(BemName::Elem("b".into()), 2), Some(root));
        let c = arena.insert_node(data(BemName::Elem("c".into()), 4), Some(b));

        let copy = arena.clone_subtree(b, Some(root)).unwrap();

        assert_ne!(copy, b);
        let copied_children = &arena.get_node(copy).unwrap().children;
        assert_eq!(copied_children.len(), 1);
        assert_ne!(copied_children[0], c);
        assert_eq!(arena.get_node(copied_children[0]).unwrap().parent, Some(copy));
        assert_eq!(arena.len(), 5);
    }

    #[test]
    fn given_text_and_children_when_serializing_then_children_replace_text() {
        let mut arena = NodeArena::new();
        let mut root_data = data(BemName::Block("a".into()), 0);
        root_data.text = Some("Title".into());
        let root = arena.insert_node(root_data, None);
        arena.insert_node(data(BemName::Elem("b".into()), 2), Some(root));

        let value = arena.to_raw_value(16).unwrap();

        let content = value["content"].as_array().unwrap();
        assert_eq!(content.len(), 1);
        assert_eq!(content[0]["elem"], json!("b"));
        assert_eq!(content[0][DEPTH_FIELD], json!(2));
    }

    #[test]
    fn given_text_without_children_when_serializing_then_text_is_content() {
        let mut arena = NodeArena::new();
        let mut root_data = data(BemName::Block("a".into()), 0);
        root_data.text = Some("Title".into());
        arena.insert_node(root_data, None);

        let value = arena.to_raw_value(16).unwrap();

        assert_eq!(value["content"], json!("Title"));
    }

    #[test]
    fn given_depth_limit_when_serializing_deeper_tree_then_errors() {
        let mut arena = NodeArena::new();
        let root = arena.insert_node(data(BemName::Block("a".into()), 0), None);
        let b = arena.insert_node(data(BemName::Elem("b".into()), 1), Some(root));
        arena.insert_node(data(BemName::Elem("c".into()), 2), Some(b));

        let result = arena.to_raw_value(1);

        assert_eq!(result, Err(DomainError::NestingTooDeep { limit: 1 }));
    }
}
