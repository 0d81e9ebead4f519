//! Multiplicity expansion: `row*3` becomes three sibling `row` nodes.

use generational_arena::Index;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::domain::arena::NodeArena;

/// Default ceiling for expansion steps.
pub const DEFAULT_LOOP_LIMIT: usize = 2000;

/// How repeated siblings relate to the node they were expanded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpansionMode {
    /// Every repetition is an independent deep copy of the subtree.
    #[default]
    Copy,
    /// Every repetition is the same arena node listed again.
    Alias,
}

/// Reason an expansion stopped before every count was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overrun {
    /// Step ceiling reached
    StepLimit(usize),
    /// Next step would push the document past the opt-in node ceiling
    NodeLimit(usize),
}

/// Outcome of one expansion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionReport {
    /// Expansion steps performed
    pub steps: usize,
    /// Document nodes added by the steps
    pub nodes_added: usize,
    /// Set when the run stopped early; the tree is then partially expanded
    pub overrun: Option<Overrun>,
}

impl ExpansionReport {
    pub fn is_complete(&self) -> bool {
        self.overrun.is_none()
    }
}

/// Node carrying a count > 1 and the slot it occupies in its parent.
struct Multiple {
    node: Index,
    slot: Option<(Index, usize)>,
}

pub struct NumberExpander {
    mode: ExpansionMode,
    loop_limit: usize,
    max_nodes: Option<usize>,
}

impl Default for NumberExpander {
    fn default() -> Self {
        Self::new(ExpansionMode::default(), DEFAULT_LOOP_LIMIT, None)
    }
}

impl NumberExpander {
    /// Without `max_nodes` only the step ceiling can stop an expansion.
    pub fn new(mode: ExpansionMode, loop_limit: usize, max_nodes: Option<usize>) -> Self {
        Self {
            mode,
            loop_limit,
            max_nodes,
        }
    }

    /// Expand every node whose multiplicity exceeds one, in document order.
    ///
    /// Each step resets the found node to multiplicity 1 and, unless it is the
    /// root, replaces its slot in the parent with `k` entries. Stopping early is
    /// not an error: the report says why and the partial tree stays usable.
    #[instrument(level = "debug", skip(self, arena), fields(mode = ?self.mode))]
    pub fn expand(&self, arena: &mut NodeArena) -> ExpansionReport {
        let mut report = ExpansionReport::default();
        let mut document_len = arena.document_len();

        while let Some(found) = find_multiple(arena) {
            if report.steps >= self.loop_limit {
                warn!("expansion stopped after {} steps", report.steps);
                report.overrun = Some(Overrun::StepLimit(self.loop_limit));
                break;
            }

            let count = arena
                .get_node(found.node)
                .map_or(1, |n| n.data.multiplicity as usize);

            let Some((parent, position)) = found.slot else {
                debug!("root count {} reset without repetition", count);
                reset_multiplicity(arena, found.node);
                report.steps += 1;
                continue;
            };

            // an aliased parent shows every splice once per occurrence
            let added = (count - 1)
                * arena.subtree_len(found.node)
                * arena.occurrences(parent);
            if let Some(max_nodes) = self.max_nodes {
                if document_len.saturating_add(added) > max_nodes {
                    warn!(
                        "expansion stopped: {} more nodes would exceed {}",
                        added, max_nodes
                    );
                    report.overrun = Some(Overrun::NodeLimit(max_nodes));
                    break;
                }
            }

            reset_multiplicity(arena, found.node);
            let replacement = match self.mode {
                ExpansionMode::Alias => vec![found.node; count],
                ExpansionMode::Copy => {
                    let mut entries = Vec::with_capacity(count);
                    entries.push(found.node);
                    for _ in 1..count {
                        if let Some(copy) = arena.clone_subtree(found.node, Some(parent)) {
                            entries.push(copy);
                        }
                    }
                    entries
                }
            };
            if let Some(parent_node) = arena.get_node_mut(parent) {
                parent_node
                    .children
                    .splice(position..=position, replacement);
            }

            debug!("expanded node at position {} into {} entries", position, count);
            document_len += added;
            report.nodes_added += added;
            report.steps += 1;
        }

        report
    }
}

fn reset_multiplicity(arena: &mut NodeArena, idx: Index) {
    if let Some(node) = arena.get_node_mut(idx) {
        node.data.multiplicity = 1;
    }
}

/// First node in document order with a multiplicity above one.
fn find_multiple(arena: &NodeArena) -> Option<Multiple> {
    let mut stack = vec![(arena.root()?, None)];
    while let Some((idx, slot)) = stack.pop() {
        let Some(node) = arena.get_node(idx) else {
            continue;
        };
        if node.data.multiplicity > 1 {
            return Some(Multiple { node: idx, slot });
        }
        for (position, &child) in node.children.iter().enumerate().rev() {
            stack.push((child, Some((idx, position))));
        }
    }
    None
}
