//! Label-correcting propagation.
//!
//! A FIFO worklist of dirty nodes, seeded with the source. Popping a node
//! schedules its untreated labels; each step extends one of them across
//! every outgoing edge. A node whose store accepted a new label is queued
//! again unless it is already waiting. Nodes may be visited many times;
//! the run ends when the worklist drains.

use std::collections::VecDeque;

use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::graph::ResourceGraph;
use crate::model::*;
use crate::Result;
use super::Step;
use super::state::RunState;

#[derive(Debug)]
pub(crate) struct Correcting {
    worklist: VecDeque<NodeId>,
    queued: HashSet<NodeId>,
    /// Untreated labels of the last popped node, last element first.
    pending: SmallVec<[LabelId; 4]>,
}

impl Correcting {
    pub(crate) fn new(source: NodeId) -> Self {
        Self {
            worklist: VecDeque::from([source]),
            queued: HashSet::from_iter([source]),
            pending: SmallVec::new(),
        }
    }

    pub(crate) fn step<G: ResourceGraph + ?Sized>(&mut self, state: &mut RunState<'_, G>) -> Result<Step> {
        loop {
            while let Some(id) = self.pending.pop() {
                // Evicted (or already extended) since the node was popped.
                if state.treated(id) != Some(false) {
                    continue;
                }
                for new in state.expand(id)? {
                    let target = state.arena[new].node;
                    if self.queued.insert(target) {
                        self.worklist.push_back(target);
                    }
                }
                return Ok(Step::Continue);
            }

            let Some(node) = self.worklist.pop_front() else {
                return Ok(Step::Done);
            };
            self.queued.remove(&node);
            if let Some(store) = state.stores.get(&node) {
                self.pending = store.untreated_labels();
                self.pending.reverse();
            }
        }
    }
}
