//! # Resource Graph Trait
//!
//! This is THE contract between the label engine and any graph
//! representation. The engine only ever asks adjacency questions; it never
//! sees how a graph stores its edges.
//!
//! ## Implementations
//!
//! | Graph | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryGraph` | `memory` | Adjacency lists built from an edge list |
//!
//! Persistence of a `MemoryGraph` lives in [`json`].

pub mod memory;
pub mod json;

use hashbrown::HashSet;

use crate::model::*;
use crate::{Error, Result};

pub use memory::MemoryGraph;

// ============================================================================
// ResourceGraph Trait
// ============================================================================

/// Read-only adjacency access to a directed graph with (weight, cost) edges.
///
/// A graph is never mutated while a run reads it, so implementations need
/// no interior locking; `Send + Sync` lets independent runs share one graph
/// across threads.
pub trait ResourceGraph: Send + Sync {
    // ========================================================================
    // Universe
    // ========================================================================

    /// Every node of the graph, in ascending order.
    fn nodes(&self) -> Vec<NodeId>;

    /// True if `node` belongs to the universe.
    fn contains(&self, node: NodeId) -> bool;

    /// Size of the universe.
    fn node_count(&self) -> usize {
        self.nodes().len()
    }

    // ========================================================================
    // Adjacency
    // ========================================================================

    /// Edges leaving `node`. Fails with `UnknownNode` outside the universe.
    fn outgoing_edges(&self, node: NodeId) -> Result<&[Edge]>;

    /// Edges entering `node`. Fails with `UnknownNode` outside the universe.
    fn incoming_edges(&self, node: NodeId) -> Result<&[Edge]>;

    /// Resources of the edge `from -> to`, if it exists.
    ///
    /// Default: scan the outgoing edges of `from`.
    fn edge(&self, from: NodeId, to: NodeId) -> Option<ResourceVector> {
        self.outgoing_edges(from)
            .ok()?
            .iter()
            .find(|e| e.to == to)
            .map(|e| e.resources)
    }
}

// ============================================================================
// Simple path enumeration
// ============================================================================

/// All simple paths from `source` to `destination`, as node sequences.
///
/// Exponential in general; intended for small graphs and for checking
/// engine output. A path from a node to itself is the single-node path.
pub fn simple_paths<G: ResourceGraph + ?Sized>(
    graph: &G,
    source: NodeId,
    destination: NodeId,
) -> Result<Vec<Vec<NodeId>>> {
    for node in [source, destination] {
        if !graph.contains(node) {
            return Err(Error::UnknownNode(node));
        }
    }
    if source == destination {
        return Ok(vec![vec![source]]);
    }

    let mut paths = Vec::new();
    let mut on_path: HashSet<NodeId> = HashSet::from_iter([source]);
    // Current path as (node, index of the next outgoing edge to try).
    let mut stack: Vec<(NodeId, usize)> = vec![(source, 0)];

    while let Some((tip, cursor)) = stack.last_mut() {
        let tip = *tip;
        let edges = graph.outgoing_edges(tip)?;
        let Some(edge) = edges.get(*cursor) else {
            on_path.remove(&tip);
            stack.pop();
            continue;
        };
        *cursor += 1;

        if edge.to == destination {
            paths.push(stack.iter().map(|(n, _)| *n).chain([destination]).collect());
        } else if on_path.insert(edge.to) {
            stack.push((edge.to, 0));
        }
    }

    Ok(paths)
}
