//! Exhaustive simple-path enumeration, used as an oracle.
//!
//! Depth-first over an explicit stack. A node already on the current path
//! is never entered again, so only simple paths are produced. A prefix that
//! exceeds the budget is cut: with non-negative resources no extension of
//! it can come back under. Every feasible prefix becomes a label and is
//! offered to its endpoint's store under the usual dominance rule, but the
//! search continues through it whether or not the store keeps it.
//!
//! One step advances the search across one edge (or backtracks once).
//! The cost is exponential in general; keep it to small graphs.

use hashbrown::HashSet;

use crate::graph::ResourceGraph;
use crate::model::*;
use crate::Result;
use super::Step;
use super::state::RunState;

#[derive(Debug, Clone, Copy)]
struct Frame {
    label: LabelId,
    node: NodeId,
    next_edge: usize,
}

#[derive(Debug)]
pub(crate) struct Exhaustive {
    stack: Vec<Frame>,
    on_path: HashSet<NodeId>,
}

impl Exhaustive {
    pub(crate) fn new(source: NodeId, root: LabelId) -> Self {
        Self {
            stack: vec![Frame { label: root, node: source, next_edge: 0 }],
            on_path: HashSet::from_iter([source]),
        }
    }

    pub(crate) fn step<G: ResourceGraph + ?Sized>(&mut self, state: &mut RunState<'_, G>) -> Result<Step> {
        let Some(frame) = self.stack.last_mut() else {
            return Ok(Step::Done);
        };

        let graph = state.graph;
        let Some(edge) = graph.outgoing_edges(frame.node)?.get(frame.next_edge).copied() else {
            let node = frame.node;
            self.stack.pop();
            self.on_path.remove(&node);
            return Ok(Step::Continue);
        };
        frame.next_edge += 1;
        let from = frame.label;

        if self.on_path.contains(&edge.to) {
            return Ok(Step::Continue);
        }
        let Some(resources) = state.extend(from, &edge)? else {
            return Ok(Step::Continue);
        };

        let label = state.record(from, edge, resources);
        self.on_path.insert(edge.to);
        self.stack.push(Frame { label, node: edge.to, next_edge: 0 });
        Ok(Step::Continue)
    }
}
