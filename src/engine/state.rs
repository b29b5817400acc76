//! Mutable state of one run, shared by all three strategies.
//!
//! `RunState` owns the label arena and one [`LabelStore`] per node of the
//! universe. It is created fresh for every run and either frozen into
//! [`Frontiers`] on completion or dropped wholesale on failure.

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::graph::ResourceGraph;
use crate::label::{Insertion, LabelStore};
use crate::model::*;
use crate::{Error, Result};
use super::config::Strategy;
use super::frontiers::{Frontiers, RunStats};

/// Labels accepted by one expansion.
pub(crate) type Accepted = SmallVec<[LabelId; 8]>;

pub(crate) struct RunState<'g, G: ResourceGraph + ?Sized> {
    pub(crate) graph: &'g G,
    pub(crate) source: NodeId,
    pub(crate) budget: Resource,
    pub(crate) arena: LabelArena,
    pub(crate) stores: HashMap<NodeId, LabelStore>,
    pub(crate) stats: RunStats,
}

impl<'g, G: ResourceGraph + ?Sized> RunState<'g, G> {
    /// Every store empty except the source's, which holds the zero label.
    pub(crate) fn new(graph: &'g G, source: NodeId, budget: Resource) -> Result<Self> {
        if budget < 0 {
            return Err(Error::InvalidBudget(budget));
        }
        if !graph.contains(source) {
            return Err(Error::UnknownNode(source));
        }

        let nodes = graph.nodes();
        let mut stores = HashMap::with_capacity(nodes.len());
        for node in nodes {
            stores.insert(node, LabelStore::new(budget));
        }

        let mut arena = LabelArena::new();
        let root = arena.push(Label::root(source));
        stores
            .get_mut(&source)
            .ok_or_else(|| {
                Error::GraphInconsistency(format!("source {source} missing from the node list"))
            })?
            .try_insert(root, ResourceVector::ZERO);

        Ok(Self {
            graph,
            source,
            budget,
            arena,
            stores,
            stats: RunStats::default(),
        })
    }

    /// The source's zero label.
    pub(crate) fn root(&self) -> LabelId {
        LabelId(0)
    }

    /// `Some(treated)` if `id` is still retained at its node.
    pub(crate) fn treated(&self, id: LabelId) -> Option<bool> {
        let node = self.arena[id].node;
        self.stores.get(&node).and_then(|s| s.is_treated(id))
    }

    /// Resources of `from` extended along `edge`, or `None` when the
    /// extension exceeds the budget. Structural problems with the edge
    /// fail the run.
    pub(crate) fn extend(&mut self, from: LabelId, edge: &Edge) -> Result<Option<ResourceVector>> {
        self.stats.extensions += 1;

        if !self.stores.contains_key(&edge.to) {
            return Err(Error::GraphInconsistency(format!(
                "edge {} -> {} leads outside the node universe",
                edge.from, edge.to,
            )));
        }
        if !edge.resources.is_non_negative() {
            return Err(Error::NegativeResource {
                from: edge.from,
                to: edge.to,
                resources: edge.resources,
            });
        }

        let base = self.arena[from].resources;
        let resources = base
            .checked_add(edge.resources)
            .ok_or(Error::ResourceOverflow { node: edge.to })?;
        if resources.weight > self.budget {
            return Ok(None);
        }
        Ok(Some(resources))
    }

    /// Offer an extension to the target store. The label is only allocated
    /// in the arena when the store accepts it.
    pub(crate) fn offer(&mut self, from: LabelId, edge: Edge, resources: ResourceVector) -> Option<LabelId> {
        let id = self.arena.next_id();
        let store = self.stores.get_mut(&edge.to)?;
        match store.try_insert(id, resources) {
            Insertion::Accepted { evicted } => {
                if !evicted.is_empty() {
                    tracing::trace!(node = %edge.to, new = %resources, evicted = evicted.len(), "evicted dominated labels");
                    self.stats.labels_evicted += evicted.len() as u64;
                }
                Some(self.push_label(from, edge, resources))
            }
            Insertion::Dominated | Insertion::OverBudget => None,
        }
    }

    /// Allocate a label unconditionally and offer it to the target store.
    /// The exhaustive search needs the whole chain even when a prefix is
    /// not efficient at its own node.
    pub(crate) fn record(&mut self, from: LabelId, edge: Edge, resources: ResourceVector) -> LabelId {
        let id = self.push_label(from, edge, resources);
        if let Some(store) = self.stores.get_mut(&edge.to) {
            let outcome = store.try_insert(id, resources);
            self.stats.labels_evicted += outcome.evicted().len() as u64;
        }
        id
    }

    /// Mark `id` treated and extend it across every outgoing edge of its
    /// node. Returns the labels the target stores accepted.
    pub(crate) fn expand(&mut self, id: LabelId) -> Result<Accepted> {
        let node = self.arena[id].node;
        if let Some(store) = self.stores.get_mut(&node) {
            store.mark_treated(id);
        }

        let graph = self.graph;
        let mut accepted = Accepted::new();
        for edge in graph.outgoing_edges(node)? {
            let Some(resources) = self.extend(id, edge)? else {
                continue;
            };
            if let Some(new) = self.offer(id, *edge, resources) {
                accepted.push(new);
            }
        }
        Ok(accepted)
    }

    fn push_label(&mut self, from: LabelId, edge: Edge, resources: ResourceVector) -> LabelId {
        self.stats.labels_created += 1;
        self.arena.push(Label {
            node: edge.to,
            resources,
            predecessor: Some(from),
            via: Some(edge),
        })
    }

    /// Freeze the stores into queryable frontiers.
    pub(crate) fn into_frontiers(self, strategy: Strategy) -> Frontiers {
        Frontiers::freeze(self.source, self.budget, strategy, self.arena, self.stores, self.stats)
    }
}
