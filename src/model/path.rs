//! Paths: a witness route from the source to a frontier label's node.

use serde::{Deserialize, Serialize};
use super::{Edge, NodeId, ResourceVector};

/// A path in the graph: node -[edge]-> node -[edge]-> node ...
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    /// Nodes along the path. Always has one more element than `edges`.
    pub nodes: Vec<NodeId>,
    /// Edges connecting consecutive nodes.
    pub edges: Vec<Edge>,
    /// Sum of the edge vectors.
    pub resources: ResourceVector,
}

impl Path {
    pub fn single(node: NodeId) -> Self {
        Self { nodes: vec![node], edges: Vec::new(), resources: ResourceVector::ZERO }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn start(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn end(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// True if no node appears twice.
    pub fn is_simple(&self) -> bool {
        let mut seen = hashbrown::HashSet::with_capacity(self.nodes.len());
        self.nodes.iter().all(|n| seen.insert(*n))
    }
}
