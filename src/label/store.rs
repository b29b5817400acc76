//! Per-node label store.
//!
//! Holds the labels currently efficient at one node. The content is an
//! antichain under the product order at all times: a candidate is refused
//! if a retained label dominates or equals it, and accepting a candidate
//! evicts every retained label it dominates.

use smallvec::SmallVec;

use crate::model::{LabelId, Resource, ResourceVector};

/// Eviction list returned by an accepted insertion.
pub type Evicted = SmallVec<[LabelId; 4]>;

#[derive(Debug, Clone, Copy)]
struct Slot {
    id: LabelId,
    resources: ResourceVector,
    treated: bool,
}

/// Outcome of [`LabelStore::try_insert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion {
    /// Candidate retained; `evicted` lists the labels it displaced.
    Accepted { evicted: Evicted },
    /// A retained label dominates or equals the candidate.
    Dominated,
    /// Candidate weight exceeds the store's budget.
    OverBudget,
}

impl Insertion {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Insertion::Accepted { .. })
    }

    /// Labels displaced by the insertion (empty unless accepted).
    pub fn evicted(&self) -> &[LabelId] {
        match self {
            Insertion::Accepted { evicted } => evicted,
            _ => &[],
        }
    }
}

/// Non-dominated set of labels at a single node.
#[derive(Debug, Clone)]
pub struct LabelStore {
    budget: Resource,
    slots: SmallVec<[Slot; 4]>,
}

impl LabelStore {
    /// An empty store enforcing `budget` on label weight.
    pub fn new(budget: Resource) -> Self {
        Self { budget, slots: SmallVec::new() }
    }

    pub fn budget(&self) -> Resource {
        self.budget
    }

    /// Insert `id` with accumulated `resources` under the dominance rule.
    pub fn try_insert(&mut self, id: LabelId, resources: ResourceVector) -> Insertion {
        if resources.weight > self.budget {
            return Insertion::OverBudget;
        }
        if self.slots.iter().any(|s| s.resources.covers(&resources)) {
            return Insertion::Dominated;
        }

        let mut evicted = Evicted::new();
        self.slots.retain(|s| {
            if resources.dominates(&s.resources) {
                evicted.push(s.id);
                false
            } else {
                true
            }
        });
        self.slots.push(Slot { id, resources, treated: false });

        Insertion::Accepted { evicted }
    }

    /// The retained labels and their resources, in insertion order.
    pub fn efficient_frontier(&self) -> impl Iterator<Item = (LabelId, ResourceVector)> + '_ {
        self.slots.iter().map(|s| (s.id, s.resources))
    }

    /// Retained labels not yet extended.
    pub fn untreated_labels(&self) -> SmallVec<[LabelId; 4]> {
        self.slots.iter().filter(|s| !s.treated).map(|s| s.id).collect()
    }

    /// Flag `id` as extended. Returns false if it is not retained here.
    pub fn mark_treated(&mut self, id: LabelId) -> bool {
        match self.slots.iter_mut().find(|s| s.id == id) {
            Some(slot) => {
                slot.treated = true;
                true
            }
            None => false,
        }
    }

    /// `Some(treated)` for a retained label, `None` otherwise.
    pub fn is_treated(&self, id: LabelId) -> Option<bool> {
        self.slots.iter().find(|s| s.id == id).map(|s| s.treated)
    }

    pub fn contains(&self, id: LabelId) -> bool {
        self.slots.iter().any(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
