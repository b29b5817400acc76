//! Label-setting propagation.
//!
//! One global min-queue of untreated labels across all nodes, ordered by
//! (weight, cost) and then label id so runs are reproducible. Each step
//! extracts the smallest live label and extends it. Because extensions
//! never decrease either resource, nothing extracted later can dominate a
//! label that is already treated: every label is extended at most once.
//!
//! Evicted labels are not removed from the queue; they are skipped when
//! they surface.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::graph::ResourceGraph;
use crate::model::*;
use crate::Result;
use super::Step;
use super::state::RunState;

type QueueKey = Reverse<(Resource, Resource, LabelId)>;

fn key(resources: ResourceVector, id: LabelId) -> QueueKey {
    Reverse((resources.weight, resources.cost, id))
}

#[derive(Debug)]
pub(crate) struct Setting {
    queue: BinaryHeap<QueueKey>,
}

impl Setting {
    pub(crate) fn new(root: LabelId) -> Self {
        Self { queue: BinaryHeap::from([key(ResourceVector::ZERO, root)]) }
    }

    pub(crate) fn step<G: ResourceGraph + ?Sized>(&mut self, state: &mut RunState<'_, G>) -> Result<Step> {
        while let Some(Reverse((_, _, id))) = self.queue.pop() {
            if state.treated(id) != Some(false) {
                continue;
            }
            for new in state.expand(id)? {
                self.queue.push(key(state.arena[new].resources, new));
            }
            return Ok(Step::Continue);
        }
        Ok(Step::Done)
    }
}
