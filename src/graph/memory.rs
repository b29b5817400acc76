//! In-memory resource graph.
//!
//! This is the reference implementation of `ResourceGraph`.
//! It keeps outgoing and incoming adjacency lists per node in HashMaps.
//!
//! ## Construction rules
//!
//! - Every edge vector must be non-negative (`NegativeResource` otherwise).
//! - At most one edge per ordered pair (`DuplicateEdge` otherwise).
//! - [`MemoryGraph::from_edges`] derives the universe from the endpoints;
//!   [`MemoryGraph::with_nodes`] declares it up front and refuses edges that
//!   leave it (`GraphInconsistency`).
//!
//! Once built, the graph is only read. Share it by reference (or `Arc`)
//! between concurrent runs.

use hashbrown::HashMap;

use crate::model::*;
use crate::{Error, Result};
use super::ResourceGraph;

// ============================================================================
// MemoryGraph
// ============================================================================

/// Adjacency-list graph with (weight, cost) edges.
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    /// node → edges leaving it (insertion order)
    outgoing: HashMap<NodeId, Vec<Edge>>,
    /// node → edges entering it (insertion order)
    incoming: HashMap<NodeId, Vec<Edge>>,
    edge_count: usize,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `((from, to), (weight, cost))` pairs; the universe is the
    /// set of distinct endpoints.
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = ((u64, u64), (Resource, Resource))>,
    {
        let mut graph = Self::new();
        for ((from, to), (weight, cost)) in edges {
            let (from, to) = (NodeId(from), NodeId(to));
            graph.add_node(from);
            graph.add_node(to);
            graph.add_edge(Edge::new(from, to, ResourceVector::new(weight, cost)))?;
        }
        Ok(graph)
    }

    /// Build with an explicit universe. Nodes may be isolated; an edge whose
    /// endpoint is not declared is a `GraphInconsistency`.
    pub fn with_nodes<N, E>(nodes: N, edges: E) -> Result<Self>
    where
        N: IntoIterator<Item = NodeId>,
        E: IntoIterator<Item = Edge>,
    {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node);
        }
        for edge in edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }

    /// Add a node to the universe. Returns false if it was already present.
    pub fn add_node(&mut self, node: NodeId) -> bool {
        if self.outgoing.contains_key(&node) {
            return false;
        }
        self.outgoing.insert(node, Vec::new());
        self.incoming.insert(node, Vec::new());
        true
    }

    /// Add an edge between two nodes already in the universe.
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        if !edge.resources.is_non_negative() {
            return Err(Error::NegativeResource {
                from: edge.from,
                to: edge.to,
                resources: edge.resources,
            });
        }
        for end in [edge.from, edge.to] {
            if !self.outgoing.contains_key(&end) {
                return Err(Error::GraphInconsistency(format!(
                    "edge {} -> {} references node {end} outside the universe",
                    edge.from, edge.to,
                )));
            }
        }

        let out = self.outgoing.entry(edge.from).or_default();
        if out.iter().any(|e| e.to == edge.to) {
            return Err(Error::DuplicateEdge { from: edge.from, to: edge.to });
        }
        out.push(edge);
        self.incoming.entry(edge.to).or_default().push(edge);
        self.edge_count += 1;
        Ok(())
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Every edge, grouped by source node in ascending node order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        let mut sources: Vec<&NodeId> = self.outgoing.keys().collect();
        sources.sort();
        sources.into_iter().flat_map(move |n| self.outgoing[n].iter())
    }

    /// Successors of `node`.
    pub fn outgoing_nodes(&self, node: NodeId) -> Result<Vec<NodeId>> {
        Ok(self.outgoing_edges(node)?.iter().map(|e| e.to).collect())
    }

    /// Predecessors of `node`.
    pub fn incoming_nodes(&self, node: NodeId) -> Result<Vec<NodeId>> {
        Ok(self.incoming_edges(node)?.iter().map(|e| e.from).collect())
    }
}

// ============================================================================
// ResourceGraph impl
// ============================================================================

impl ResourceGraph for MemoryGraph {
    fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.outgoing.keys().copied().collect();
        nodes.sort();
        nodes
    }

    fn contains(&self, node: NodeId) -> bool {
        self.outgoing.contains_key(&node)
    }

    fn node_count(&self) -> usize {
        self.outgoing.len()
    }

    fn outgoing_edges(&self, node: NodeId) -> Result<&[Edge]> {
        self.outgoing
            .get(&node)
            .map(Vec::as_slice)
            .ok_or(Error::UnknownNode(node))
    }

    fn incoming_edges(&self, node: NodeId) -> Result<&[Edge]> {
        self.incoming
            .get(&node)
            .map(Vec::as_slice)
            .ok_or(Error::UnknownNode(node))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryGraph {
        MemoryGraph::from_edges([
            ((0, 1), (1, 1)),
            ((1, 2), (2, 5)),
            ((0, 3), (1, 1)),
            ((1, 3), (2, 2)),
            ((0, 2), (0, 1)),
            ((2, 3), (1, 1)),
        ])
        .unwrap()
    }

    #[test]
    fn test_universe_from_endpoints() {
        let graph = sample();
        assert_eq!(graph.nodes(), vec![NodeId(0), NodeId(1), NodeId(2), NodeId(3)]);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 6);
        assert!(graph.contains(NodeId(3)));
        assert!(!graph.contains(NodeId(4)));
    }

    #[test]
    fn test_adjacency() {
        let graph = sample();
        assert_eq!(
            graph.outgoing_nodes(NodeId(0)).unwrap(),
            vec![NodeId(1), NodeId(3), NodeId(2)]
        );
        assert_eq!(
            graph.incoming_nodes(NodeId(3)).unwrap(),
            vec![NodeId(0), NodeId(1), NodeId(2)]
        );
        assert!(graph.outgoing_edges(NodeId(3)).unwrap().is_empty());
        assert!(matches!(graph.incoming_edges(NodeId(9)), Err(Error::UnknownNode(NodeId(9)))));
    }

    #[test]
    fn test_rejects_negative_resources() {
        let result = MemoryGraph::from_edges([((0, 1), (1, -1))]);
        assert!(matches!(result, Err(Error::NegativeResource { .. })));
    }

    #[test]
    fn test_rejects_duplicate_edge() {
        let result = MemoryGraph::from_edges([((0, 1), (1, 1)), ((0, 1), (2, 2))]);
        assert!(matches!(
            result,
            Err(Error::DuplicateEdge { from: NodeId(0), to: NodeId(1) })
        ));
    }

    #[test]
    fn test_declared_universe() {
        let graph = MemoryGraph::with_nodes(
            [NodeId(0), NodeId(1), NodeId(5)],
            [Edge::new(NodeId(0), NodeId(1), ResourceVector::new(1, 1))],
        )
        .unwrap();
        assert_eq!(graph.node_count(), 3);
        assert!(graph.outgoing_edges(NodeId(5)).unwrap().is_empty());

        let result = MemoryGraph::with_nodes(
            [NodeId(0)],
            [Edge::new(NodeId(0), NodeId(1), ResourceVector::new(1, 1))],
        );
        assert!(matches!(result, Err(Error::GraphInconsistency(_))));
    }

    #[test]
    fn test_edges_iteration_order() {
        let graph = sample();
        let sources: Vec<NodeId> = graph.edges().map(|e| e.from).collect();
        assert_eq!(
            sources,
            vec![NodeId(0), NodeId(0), NodeId(0), NodeId(1), NodeId(1), NodeId(2)]
        );
    }
}
