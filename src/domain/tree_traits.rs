//! Terminal tree rendering for parsed shorthand.

use generational_arena::Index;
use termtree::Tree;

use crate::domain::arena::{NodeArena, TreeNode};
use crate::domain::line::BemName;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for NodeArena {
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(arena: &NodeArena, node_idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(node) = arena.get_node(node_idx) {
                for &child_idx in &node.children {
                    if let Some(child) = arena.get_node(child_idx) {
                        let mut child_tree = Tree::new(node_label(child));
                        build_tree(arena, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }
        }

        match self.root().and_then(|idx| self.get_node(idx).map(|n| (idx, n))) {
            Some((root_idx, root)) => {
                let mut tree = Tree::new(node_label(root));
                build_tree(self, root_idx, &mut tree);
                tree
            }
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

/// `tag.name--mod*count "text"`, elements marked with `__`.
pub fn node_label(node: &TreeNode) -> String {
    let data = &node.data;
    let mut label = match &data.name {
        BemName::Block(name) => format!("{}.{}", data.tag, name),
        BemName::Elem(name) => format!("{}.__{}", data.tag, name),
    };
    for modifier in data.modifiers.keys() {
        label.push_str("--");
        label.push_str(modifier);
    }
    if data.multiplicity > 1 {
        label.push_str(&format!("*{}", data.multiplicity));
    }
    if let Some(text) = &data.text {
        label.push_str(&format!(" {:?}", text));
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::TreeBuilder;

    #[test]
    fn given_tree_when_rendering_then_lists_nested_labels() {
        let arena = TreeBuilder::default()
            .build("ul.menu--main\n  li.item*2 Home")
            .unwrap();

        let rendered = arena.to_tree_string().to_string();

        assert!(rendered.starts_with("ul.menu--main"));
        assert!(rendered.contains("li.__item*2 \"Home\""));
    }

    #[test]
    fn given_empty_arena_when_rendering_then_says_empty() {
        let rendered = NodeArena::new().to_tree_string().to_string();
        assert!(rendered.starts_with("Empty tree"));
    }
}
