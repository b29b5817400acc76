//! Directed edges, each carrying one resource vector.

use serde::{Deserialize, Serialize};
use super::{NodeId, ResourceVector};

/// A directed edge `from -> to` with its (weight, cost).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub resources: ResourceVector,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId, resources: ResourceVector) -> Self {
        Self { from, to, resources }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} {}", self.from, self.to, self.resources)
    }
}
