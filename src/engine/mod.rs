//! # Label propagation engine
//!
//! Computes, for every node reachable from a source within a weight
//! budget, the efficient frontier of (weight, cost) outcomes and one
//! witness path per frontier entry.
//!
//! ```text
//! run(graph, source, budget, strategy)
//!   → RunState::new        stores empty except source = {(0,0)}
//!   → Propagator::step*    correcting | setting | exhaustive
//!   → Frontiers            frozen per-node frontiers + label arena
//! ```
//!
//! All three strategies share the label/dominance primitives of
//! [`RunState`](state::RunState) and produce the same frontiers (as sets of
//! resource vectors) on any graph with non-negative resources.
//!
//! Each strategy is a step machine. One step is a bounded unit of work,
//! which is where cancellation tokens and step budgets are checked and
//! where the cooperative runner yields. A run that stops early returns an
//! error and drops its stores; no partial frontier is ever observable.

pub mod config;
pub mod frontiers;
pub mod path;
mod state;
mod correcting;
mod setting;
mod exhaustive;
#[cfg(feature = "async")]
mod cooperative;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::graph::ResourceGraph;
use crate::model::*;
use crate::{Error, Result};

pub use config::{RunConfig, Strategy, DEFAULT_YIELD_EVERY};
pub use frontiers::{Frontiers, RunStats};
pub use path::PathReconstructor;
#[cfg(feature = "async")]
pub use cooperative::run_cooperative;

use correcting::Correcting;
use exhaustive::Exhaustive;
use setting::Setting;
use state::RunState;

// ============================================================================
// Cancellation
// ============================================================================

/// Shared flag a caller can raise to stop a run between two steps.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

// ============================================================================
// Step machine
// ============================================================================

/// Outcome of one propagation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Continue,
    Done,
}

/// The selected strategy, resolved once at run entry.
enum Propagator {
    Correcting(Correcting),
    Setting(Setting),
    Exhaustive(Exhaustive),
}

impl Propagator {
    fn new<G: ResourceGraph + ?Sized>(strategy: Strategy, state: &RunState<'_, G>) -> Self {
        match strategy {
            Strategy::Correcting => Propagator::Correcting(Correcting::new(state.source)),
            Strategy::Setting => Propagator::Setting(Setting::new(state.root())),
            Strategy::Exhaustive => Propagator::Exhaustive(Exhaustive::new(state.source, state.root())),
        }
    }

    fn step<G: ResourceGraph + ?Sized>(&mut self, state: &mut RunState<'_, G>) -> Result<Step> {
        match self {
            Propagator::Correcting(p) => p.step(state),
            Propagator::Setting(p) => p.step(state),
            Propagator::Exhaustive(p) => p.step(state),
        }
    }
}

/// One run in progress: state, strategy and limits.
pub(crate) struct Run<'g, G: ResourceGraph + ?Sized> {
    state: RunState<'g, G>,
    propagator: Propagator,
    strategy: Strategy,
    max_steps: Option<u64>,
}

impl<'g, G: ResourceGraph + ?Sized> Run<'g, G> {
    pub(crate) fn start(graph: &'g G, source: NodeId, config: &RunConfig) -> Result<Self> {
        config.validate()?;
        let state = RunState::new(graph, source, config.weight_budget)?;
        let propagator = Propagator::new(config.strategy, &state);
        Ok(Self {
            state,
            propagator,
            strategy: config.strategy,
            max_steps: config.max_steps,
        })
    }

    pub(crate) fn steps(&self) -> u64 {
        self.state.stats.steps
    }

    /// Take one step, honoring the cancellation token and step budget.
    pub(crate) fn advance(&mut self, cancel: Option<&CancelToken>) -> Result<Step> {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            tracing::warn!(steps = self.steps(), "run cancelled");
            return Err(Error::Cancelled { steps: self.steps() });
        }

        let step = self.propagator.step(&mut self.state)?;
        if step == Step::Continue {
            self.state.stats.steps += 1;
            if let Some(limit) = self.max_steps {
                if self.state.stats.steps > limit {
                    tracing::warn!(limit, "step budget exhausted");
                    return Err(Error::StepLimitExceeded { limit });
                }
            }
        }
        Ok(step)
    }

    pub(crate) fn finish(self) -> Frontiers {
        let stats = self.state.stats;
        tracing::debug!(
            steps = stats.steps,
            extensions = stats.extensions,
            labels_created = stats.labels_created,
            labels_evicted = stats.labels_evicted,
            "propagation finished"
        );
        self.state.into_frontiers(self.strategy)
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Compute the efficient frontiers reachable from `source` within
/// `weight_budget`, using `strategy`.
pub fn run<G: ResourceGraph + ?Sized>(
    graph: &G,
    source: NodeId,
    weight_budget: Resource,
    strategy: Strategy,
) -> Result<Frontiers> {
    run_with(graph, source, &RunConfig::new(weight_budget, strategy), None)
}

/// Like [`run`], with a full configuration and an optional cancellation
/// token checked between steps.
pub fn run_with<G: ResourceGraph + ?Sized>(
    graph: &G,
    source: NodeId,
    config: &RunConfig,
    cancel: Option<&CancelToken>,
) -> Result<Frontiers> {
    let span = tracing::info_span!(
        "rcsp_run",
        %source,
        budget = config.weight_budget,
        strategy = %config.strategy,
    );
    let _enter = span.enter();

    let mut run = Run::start(graph, source, config)?;
    while run.advance(cancel)? == Step::Continue {}
    Ok(run.finish())
}

// ============================================================================
// Batch
// ============================================================================

/// One independent query of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub source: NodeId,
    pub config: RunConfig,
}

impl Query {
    pub fn new(source: NodeId, weight_budget: Resource, strategy: Strategy) -> Self {
        Self { source, config: RunConfig::new(weight_budget, strategy) }
    }
}

/// Run independent queries over one graph in parallel.
///
/// Each query owns its stores; the graph is only read. Results come back
/// in query order, one per query, so a failing query does not affect the
/// others.
pub fn run_batch<G: ResourceGraph + ?Sized>(graph: &G, queries: &[Query]) -> Vec<Result<Frontiers>> {
    queries
        .par_iter()
        .map(|q| run_with(graph, q.source, &q.config, None))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MemoryGraph;
    use pretty_assertions::assert_eq;

    fn rv(w: Resource, c: Resource) -> ResourceVector {
        ResourceVector::new(w, c)
    }

    /// Two routes 0→3 that trade weight for cost, plus a dominated one.
    fn diamond() -> MemoryGraph {
        MemoryGraph::from_edges([
            ((0, 1), (1, 5)),
            ((1, 3), (1, 5)),
            ((0, 2), (4, 1)),
            ((2, 3), (4, 1)),
            ((0, 3), (9, 9)),
        ])
        .unwrap()
    }

    #[test]
    fn test_frontier_per_strategy() {
        let graph = diamond();
        for strategy in Strategy::ALL {
            let result = run(&graph, NodeId(0), 10, strategy).unwrap();
            assert_eq!(result.frontier(NodeId(3)).unwrap(), vec![rv(2, 10), rv(8, 2)], "{strategy}");
            assert_eq!(result.frontier(NodeId(0)).unwrap(), vec![rv(0, 0)], "{strategy}");
        }
    }

    #[test]
    fn test_source_store_holds_zero_label_only() {
        let graph = diamond();
        let state = RunState::new(&graph, NodeId(0), 10).unwrap();
        for (node, store) in &state.stores {
            if *node == NodeId(0) {
                let entries: Vec<_> = store.efficient_frontier().collect();
                assert_eq!(entries, vec![(state.root(), ResourceVector::ZERO)]);
                assert!(state.arena[state.root()].is_root());
            } else {
                assert!(store.is_empty());
            }
        }
    }

    #[test]
    fn test_setting_extends_each_label_once() {
        let graph = diamond();
        let result = run(&graph, NodeId(0), 10, Strategy::Setting).unwrap();
        // Every created label (plus the root) is extracted at most once, and
        // only labels that survive to extraction are extended.
        assert!(result.stats().steps <= result.stats().labels_created + 1);
    }

    #[test]
    fn test_budget_prunes_expensive_routes() {
        let graph = diamond();
        let result = run(&graph, NodeId(0), 7, Strategy::Correcting).unwrap();
        assert_eq!(result.frontier(NodeId(3)).unwrap(), vec![rv(2, 10)]);
        assert_eq!(result.frontier(NodeId(2)).unwrap(), vec![rv(4, 1)]);
    }

    #[test]
    fn test_invalid_inputs() {
        let graph = diamond();
        assert!(matches!(
            run(&graph, NodeId(0), -1, Strategy::Setting),
            Err(Error::InvalidBudget(-1))
        ));
        assert!(matches!(
            run(&graph, NodeId(42), 5, Strategy::Setting),
            Err(Error::UnknownNode(NodeId(42)))
        ));
    }

    #[test]
    fn test_step_budget() {
        let graph = diamond();
        let config = RunConfig::new(10, Strategy::Exhaustive).with_max_steps(2);
        assert!(matches!(
            run_with(&graph, NodeId(0), &config, None),
            Err(Error::StepLimitExceeded { limit: 2 })
        ));

        let unlimited = run(&graph, NodeId(0), 10, Strategy::Exhaustive).unwrap();
        let exact = RunConfig::new(10, Strategy::Exhaustive).with_max_steps(unlimited.stats().steps);
        assert!(run_with(&graph, NodeId(0), &exact, None).is_ok());
    }

    #[test]
    fn test_cancelled_before_first_step() {
        let graph = diamond();
        let token = CancelToken::new();
        token.cancel();
        let config = RunConfig::new(10, Strategy::Correcting);
        assert!(matches!(
            run_with(&graph, NodeId(0), &config, Some(&token)),
            Err(Error::Cancelled { steps: 0 })
        ));
    }

    #[test]
    fn test_cancelled_between_steps() {
        let graph = diamond();
        for strategy in Strategy::ALL {
            let token = CancelToken::new();
            let config = RunConfig::new(10, strategy);
            let mut run = Run::start(&graph, NodeId(0), &config).unwrap();
            assert_eq!(run.advance(Some(&token)).unwrap(), Step::Continue);
            assert_eq!(run.advance(Some(&token)).unwrap(), Step::Continue);

            token.cancel();
            assert!(
                matches!(run.advance(Some(&token)), Err(Error::Cancelled { steps: 2 })),
                "{strategy}"
            );
        }
    }

    #[test]
    fn test_batch_preserves_order() {
        let graph = diamond();
        let queries = vec![
            Query::new(NodeId(0), 10, Strategy::Setting),
            Query::new(NodeId(99), 10, Strategy::Setting),
            Query::new(NodeId(1), 10, Strategy::Correcting),
        ];
        let results = run_batch(&graph, &queries);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().source(), NodeId(0));
        assert!(matches!(results[1], Err(Error::UnknownNode(NodeId(99)))));
        assert_eq!(results[2].as_ref().unwrap().frontier(NodeId(3)).unwrap(), vec![rv(1, 5)]);
    }
}
