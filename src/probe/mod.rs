//! Concurrent dispatch-and-aggregation engine.
//!
//! A [`Dispatcher`](dispatcher::Dispatcher) feeds a shared job queue in
//! barrier-separated phases, a fixed pool of workers executes the jobs, and a
//! single [`Aggregator`] consumes every outcome and decides what to report.
mod aggregator;
mod barrier;
mod diff;
mod dispatcher;
mod executor;
mod model;
mod pool;


use std::collections::BTreeSet;
use std::io::Write;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::args::{HttpMethod, MinDiff, PositiveUsize};
use crate::error::AppResult;
use crate::shutdown::ShutdownSender;

pub use aggregator::{Aggregator, AggregatorSettings, ProbeReport};
pub use barrier::PhaseBarrier;
pub use diff::{LengthDiff, Verdict, format_size, judge};
pub use executor::RequestExecutor;
pub use model::{Event, Job, ProbeResult, RequestFailure, RequestJob, ResponseSummary, Target};

use dispatcher::Dispatcher;
use pool::spawn_workers;

#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub workers: PositiveUsize,
    pub min_diff: MinDiff,
    pub acceptable_status: BTreeSet<u16>,
    /// Failures tolerated before the run aborts; 0 ignores failures.
    pub max_errors: u64,
}

/// Everything one run needs: what to request and how to judge it.
#[derive(Debug, Clone)]
pub struct ProbePlan {
    pub methods: Vec<HttpMethod>,
    pub targets: Vec<Target>,
    pub paths: Vec<Arc<str>>,
    pub settings: ProbeSettings,
}

impl ProbePlan {
    /// Request jobs the dispatcher will enqueue: a baseline plus one test per
    /// path, for every target and method.
    #[must_use]
    pub fn total_requests(&self) -> u64 {
        let per_target = u64::try_from(self.paths.len())
            .unwrap_or(u64::MAX)
            .saturating_add(1);
        u64::try_from(self.targets.len())
            .unwrap_or(u64::MAX)
            .saturating_mul(u64::try_from(self.methods.len()).unwrap_or(u64::MAX))
            .saturating_mul(per_target)
    }
}

/// Runs the plan to completion and returns the aggregator's report.
///
/// The aggregator runs on the calling task and writes hits to `out`. On any
/// aggregator error the shutdown signal is raised so the dispatcher and the
/// workers stop, abandoning in-flight requests.
///
/// # Errors
///
/// Returns an error when the error budget is exhausted, the run is
/// interrupted, writing a hit fails, or a spawned task panics.
pub async fn run_probe<E, W>(
    plan: Arc<ProbePlan>,
    executor: Arc<E>,
    out: W,
    shutdown_tx: &ShutdownSender,
) -> AppResult<ProbeReport>
where
    E: RequestExecutor,
    W: Write,
{
    let pool_size = plan.settings.workers.get();
    let (jobs_tx, jobs_rx) = mpsc::channel::<Job>(pool_size);
    let (events_tx, events_rx) = mpsc::channel::<Event>(pool_size);
    let barrier = Arc::new(PhaseBarrier::new());
    let aggregator_shutdown = shutdown_tx.subscribe();

    let workers = spawn_workers(
        pool_size,
        &executor,
        jobs_rx,
        &events_tx,
        &barrier,
        shutdown_tx,
    );
    drop(events_tx);

    let dispatcher = Dispatcher::new(
        Arc::clone(&plan),
        jobs_tx,
        Arc::clone(&barrier),
        shutdown_tx.subscribe(),
    )
    .spawn();

    let aggregator = Aggregator::new(AggregatorSettings::from(&plan.settings), out);
    match aggregator.run(events_rx, aggregator_shutdown).await {
        Ok(report) => {
            dispatcher.await??;
            join_workers(workers).await?;
            Ok(report)
        }
        Err(err) => {
            drop(shutdown_tx.send(()));
            drop(dispatcher.await);
            drop(join_workers(workers).await);
            Err(err)
        }
    }
}

async fn join_workers(workers: Vec<JoinHandle<()>>) -> AppResult<()> {
    for worker in workers {
        worker.await?;
    }
    Ok(())
}
