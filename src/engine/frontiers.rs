//! Frozen result of a completed run.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::label::LabelStore;
use crate::model::*;
use crate::{Error, Result};
use super::config::Strategy;
use super::path::PathReconstructor;

/// Counters collected while a run propagates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Steps taken by the strategy's step machine.
    pub steps: u64,
    /// Edge extensions attempted, feasible or not.
    pub extensions: u64,
    /// Labels allocated besides the source's zero label.
    pub labels_created: u64,
    /// Labels displaced from a store by a dominating newcomer.
    pub labels_evicted: u64,
}

/// Per-node efficient frontiers of one run, frozen for querying.
///
/// Every node of the graph's universe has an entry; unreached nodes have an
/// empty frontier. Frontier entries are sorted by ascending weight (and so
/// by descending cost, since they form an antichain).
#[derive(Debug, Clone)]
pub struct Frontiers {
    source: NodeId,
    budget: Resource,
    strategy: Strategy,
    arena: LabelArena,
    frontiers: BTreeMap<NodeId, Vec<LabelId>>,
    stats: RunStats,
}

impl Frontiers {
    pub(crate) fn freeze(
        source: NodeId,
        budget: Resource,
        strategy: Strategy,
        arena: LabelArena,
        stores: HashMap<NodeId, LabelStore>,
        stats: RunStats,
    ) -> Self {
        let frontiers = stores
            .into_iter()
            .map(|(node, store)| {
                let mut entries: Vec<(LabelId, ResourceVector)> = store.efficient_frontier().collect();
                entries.sort_by_key(|(_, r)| r.lex_key());
                (node, entries.into_iter().map(|(id, _)| id).collect())
            })
            .collect();
        Self { source, budget, strategy, arena, frontiers, stats }
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn budget(&self) -> Resource {
        self.budget
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// The efficient (weight, cost) outcomes at `node`.
    pub fn frontier(&self, node: NodeId) -> Result<Vec<ResourceVector>> {
        Ok(self.entries(node)?.iter().map(|id| self.arena[*id].resources).collect())
    }

    /// The efficient labels at `node`.
    pub fn labels(&self, node: NodeId) -> Result<Vec<&Label>> {
        Ok(self.entries(node)?.iter().map(|id| &self.arena[*id]).collect())
    }

    /// Witness path for the frontier entry `entry` at `node`.
    pub fn path_for(&self, node: NodeId, entry: ResourceVector) -> Result<Path> {
        let id = self
            .entries(node)?
            .iter()
            .copied()
            .find(|id| self.arena[*id].resources == entry)
            .ok_or(Error::NotOnFrontier { node, entry })?;
        Ok(PathReconstructor::new(&self.arena).rebuild(id))
    }

    /// Every frontier entry at `node` paired with its witness path.
    pub fn efficient_paths(&self, node: NodeId) -> Result<Vec<(ResourceVector, Path)>> {
        let reconstructor = PathReconstructor::new(&self.arena);
        Ok(self
            .entries(node)?
            .iter()
            .map(|id| (self.arena[*id].resources, reconstructor.rebuild(*id)))
            .collect())
    }

    /// `(node, frontier)` for every node of the universe, ascending.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Vec<ResourceVector>)> + '_ {
        self.frontiers
            .iter()
            .map(|(node, ids)| (*node, ids.iter().map(|id| self.arena[*id].resources).collect()))
    }

    /// Nodes with a non-empty frontier, ascending.
    pub fn reached(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.frontiers
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(node, _)| *node)
    }

    /// Total number of frontier entries over all nodes.
    pub fn label_count(&self) -> usize {
        self.frontiers.values().map(Vec::len).sum()
    }

    fn entries(&self, node: NodeId) -> Result<&[LabelId]> {
        self.frontiers
            .get(&node)
            .map(Vec::as_slice)
            .ok_or(Error::UnknownNode(node))
    }
}
