//! Cooperative runner for async callers.
//!
//! Drives the same step machine as [`run_with`](super::run_with) but hands
//! control back to the tokio scheduler every `yield_every` steps, so a long
//! run shares its worker thread fairly. Yielding happens only between steps;
//! nothing of the run is observable until it completes.

use tracing::Instrument;

use crate::graph::ResourceGraph;
use crate::model::NodeId;
use crate::Result;
use super::{CancelToken, Frontiers, Run, RunConfig, Step};

/// Async counterpart of [`run_with`](super::run_with).
pub async fn run_cooperative<G: ResourceGraph + ?Sized>(
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
        cooperative = true,
    );

    async move {
        let mut run = Run::start(graph, source, config)?;
        while run.advance(cancel)? == Step::Continue {
            if run.steps() % config.yield_every == 0 {
                tokio::task::yield_now().await;
            }
        }
        Ok(run.finish())
    }
    .instrument(span)
    .await
}
