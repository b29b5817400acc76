//! # rcsp: Resource-Constrained Pareto Paths
//!
//! Computes, for every node reachable from a source within a weight budget,
//! the efficient frontier of (weight, cost) outcomes over a directed graph
//! whose edges carry two non-negative resources, plus one witness path per
//! frontier entry.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `ResourceGraph` is the contract between the engine and graph storage
//! 2. **Plain data**: `NodeId`, `Edge`, `ResourceVector`, `Path` cross all boundaries
//! 3. **One label model**: every strategy shares the same dominance-pruned stores
//! 4. **Fresh state per run**: stores live and die with one run; graphs are read-only
//!
//! ## Quick Start
//!
//! ```rust
//! use rcsp::{MemoryGraph, NodeId, Planner, ResourceVector, Strategy};
//!
//! # fn example() -> rcsp::Result<()> {
//! let graph = MemoryGraph::from_edges([
//!     ((0, 1), (1, 5)),
//!     ((1, 2), (1, 5)),
//!     ((0, 2), (6, 1)),
//! ])?;
//!
//! let planner = Planner::new(graph);
//! let result = planner.run(NodeId(0), 10, Strategy::Setting)?;
//!
//! assert_eq!(
//!     result.frontier(NodeId(2))?,
//!     vec![ResourceVector::new(2, 10), ResourceVector::new(6, 1)],
//! );
//! let path = result.path_for(NodeId(2), ResourceVector::new(2, 10))?;
//! assert_eq!(path.nodes, vec![NodeId(0), NodeId(1), NodeId(2)]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Strategies
//!
//! | Strategy | Order | Notes |
//! |----------|-------|-------|
//! | `Correcting` | FIFO worklist of nodes | Simple baseline, may revisit nodes |
//! | `Setting` | Global (weight, cost) min-queue | Each label extended at most once |
//! | `Exhaustive` | DFS over simple paths | Exponential oracle for small graphs |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod graph;
pub mod label;
pub mod engine;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    NodeId, Edge, Resource, ResourceVector,
    Label, LabelArena, LabelId, Path,
};

// ============================================================================
// Re-exports: Graph
// ============================================================================

pub use graph::{ResourceGraph, MemoryGraph, simple_paths};

// ============================================================================
// Re-exports: Engine
// ============================================================================

pub use label::{Insertion, LabelStore};
pub use engine::{
    run, run_with, run_batch,
    CancelToken, Frontiers, PathReconstructor, Query, RunConfig, RunStats, Strategy,
};
#[cfg(feature = "async")]
pub use engine::run_cooperative;

// ============================================================================
// Top-level Planner handle
// ============================================================================

/// The primary entry point. A `Planner` owns a graph and runs queries
/// against it.
pub struct Planner<G: ResourceGraph> {
    graph: G,
}

impl<G: ResourceGraph> Planner<G> {
    pub fn new(graph: G) -> Self {
        Self { graph }
    }

    /// Compute efficient frontiers from `source` within `weight_budget`.
    pub fn run(&self, source: NodeId, weight_budget: Resource, strategy: Strategy) -> Result<Frontiers> {
        engine::run(&self.graph, source, weight_budget, strategy)
    }

    /// Run with a full configuration and an optional cancellation token.
    pub fn run_with(
        &self,
        source: NodeId,
        config: &RunConfig,
        cancel: Option<&CancelToken>,
    ) -> Result<Frontiers> {
        engine::run_with(&self.graph, source, config, cancel)
    }

    /// Run independent queries in parallel; results in query order.
    pub fn run_batch(&self, queries: &[Query]) -> Vec<Result<Frontiers>> {
        engine::run_batch(&self.graph, queries)
    }

    /// Cooperative async run that yields between steps.
    #[cfg(feature = "async")]
    pub async fn run_cooperative(
        &self,
        source: NodeId,
        config: &RunConfig,
        cancel: Option<&CancelToken>,
    ) -> Result<Frontiers> {
        engine::run_cooperative(&self.graph, source, config, cancel).await
    }

    /// Access the underlying graph.
    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn into_graph(self) -> G {
        self.graph
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid budget: {0} (weight budget must be non-negative)")]
    InvalidBudget(Resource),

    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Graph inconsistency: {0}")]
    GraphInconsistency(String),

    #[error("Negative resource on edge {from} -> {to}: {resources}")]
    NegativeResource { from: NodeId, to: NodeId, resources: ResourceVector },

    #[error("Duplicate edge: {from} -> {to}")]
    DuplicateEdge { from: NodeId, to: NodeId },

    #[error("Resource overflow while extending a label to node {node}")]
    ResourceOverflow { node: NodeId },

    #[error("Not on frontier: node {node} has no efficient label {entry}")]
    NotOnFrontier { node: NodeId, entry: ResourceVector },

    #[error("Run cancelled after {steps} steps")]
    Cancelled { steps: u64 },

    #[error("Step limit exceeded: run needs more than {limit} steps")]
    StepLimitExceeded { limit: u64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
