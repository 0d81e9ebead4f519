//! Tree builder turning indented shorthand into a node arena.

use std::cmp::Ordering;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::NodeArena;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::line::{LineParser, DEFAULT_TAG};

/// Default ceiling for ancestry walks.
pub const DEFAULT_RESOLVE_LIMIT: usize = 256;

/// Result type for tree operations.
pub type TreeResult<T> = DomainResult<T>;

/// Constructs a single-rooted tree from shorthand text.
pub struct TreeBuilder {
    line_parser: LineParser,
    resolve_limit: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_TAG, DEFAULT_RESOLVE_LIMIT)
    }
}

impl TreeBuilder {
    pub fn new(default_tag: &str, resolve_limit: usize) -> Self {
        Self {
            line_parser: LineParser::new(default_tag),
            resolve_limit,
        }
    }

    /// Build the tree for a shorthand document.
    ///
    /// The first non-blank line is the root. Each following line is attached
    /// relative to the previously attached node (the cursor): deeper lines
    /// become its children, equally indented lines its siblings, and shallower
    /// lines children of the closest ancestor that is less indented, or of the
    /// root when no ancestor is. Only a sibling of the root is rejected.
    ///
    /// Any failure discards the partial tree.
    #[instrument(level = "debug", skip(self, text))]
    pub fn build(&self, text: &str) -> TreeResult<NodeArena> {
        let lines: Vec<&str> = text
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .collect();
        if lines.iter().all(|l| l.trim().is_empty()) {
            return Err(DomainError::EmptyInput);
        }

        let mut arena = NodeArena::new();
        let mut cursor: Option<Index> = None;

        for (i, line) in lines.iter().enumerate() {
            let line_number = i + 1;
            if line.trim().is_empty() {
                continue;
            }

            let Some(data) = self.line_parser.parse(line, line_number, cursor.is_some())? else {
                debug!("line {}: no name, skipped", line_number);
                continue;
            };

            let Some(current) = cursor else {
                cursor = Some(arena.insert_node(data, None));
                continue;
            };

            let second_root = || DomainError::MultipleRoots {
                line_number,
                line: line.to_string(),
            };
            let (current_depth, current_parent) = arena
                .get_node(current)
                .map_or((0, None), |n| (n.data.depth, n.parent));

            let parent = match data.depth.cmp(&current_depth) {
                Ordering::Greater => current,
                Ordering::Equal => current_parent.ok_or_else(second_root)?,
                Ordering::Less => closest_parent(&arena, current, data.depth, self.resolve_limit)?,
            };

            debug!(
                "line {}: depth {} attached below depth {}",
                line_number,
                data.depth,
                arena.get_node(parent).map_or(0, |n| n.data.depth)
            );
            cursor = Some(arena.insert_node(data, Some(parent)));
        }

        if arena.root().is_none() {
            return Err(DomainError::EmptyInput);
        }
        Ok(arena)
    }
}

/// Find the ancestor a line of `target_depth` attaches to, starting from `node`.
///
/// Returns `node` itself when it is the root, otherwise the first parent on
/// the way up whose depth is below `target_depth`.
#[instrument(level = "trace", skip(arena))]
pub fn closest_parent(
    arena: &NodeArena,
    node: Index,
    target_depth: usize,
    limit: usize,
) -> TreeResult<Index> {
    let mut current = node;
    for _ in 0..=limit {
        let Some(parent) = arena.get_node(current).and_then(|n| n.parent) else {
            return Ok(current);
        };
        let parent_depth = arena.get_node(parent).map_or(0, |p| p.data.depth);
        if parent_depth < target_depth {
            return Ok(parent);
        }
        current = parent;
    }
    Err(DomainError::NestingTooDeep { limit })
}
