use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::args::HttpMethod;
use crate::error::{AppError, AppResult, ProbeError};
use crate::shutdown::ShutdownReceiver;

use super::ProbePlan;
use super::barrier::PhaseBarrier;
use super::model::{Job, RequestJob};

/// Feeds the job queue method by method: every target's baseline first, then
/// every (path, target) pair, each phase closed by the barrier. Ends with one
/// poison job per worker and closes the queue.
pub(crate) struct Dispatcher {
    plan: Arc<ProbePlan>,
    jobs: mpsc::Sender<Job>,
    barrier: Arc<PhaseBarrier>,
    shutdown_rx: ShutdownReceiver,
}

impl Dispatcher {
    pub(crate) const fn new(
        plan: Arc<ProbePlan>,
        jobs: mpsc::Sender<Job>,
        barrier: Arc<PhaseBarrier>,
        shutdown_rx: ShutdownReceiver,
    ) -> Self {
        Self {
            plan,
            jobs,
            barrier,
            shutdown_rx,
        }
    }

    pub(crate) fn spawn(self) -> JoinHandle<AppResult<()>> {
        tokio::spawn(self.run())
    }

    async fn run(mut self) -> AppResult<()> {
        let plan = Arc::clone(&self.plan);

        for &method in &plan.methods {
            self.run_baseline_phase(method).await?;
            info!("Finished {} reference requests", method);

            self.run_test_phase(method).await?;
            info!("Finished {} path requests", method);
        }

        for _ in 0..plan.settings.workers.get() {
            self.enqueue(Job::Poison).await?;
        }
        Ok(())
    }

    async fn run_baseline_phase(&mut self, method: HttpMethod) -> AppResult<()> {
        let plan = Arc::clone(&self.plan);
        self.barrier.add(plan.targets.len());
        for target in &plan.targets {
            self.enqueue(Job::Request(RequestJob::baseline(method, target.clone())))
                .await?;
        }
        self.wait_phase().await
    }

    async fn run_test_phase(&mut self, method: HttpMethod) -> AppResult<()> {
        let plan = Arc::clone(&self.plan);
        self.barrier
            .add(plan.paths.len().saturating_mul(plan.targets.len()));
        for path in &plan.paths {
            for target in &plan.targets {
                let job = RequestJob::test(method, target.clone(), Arc::clone(path));
                self.enqueue(Job::Request(job)).await?;
            }
        }
        self.wait_phase().await
    }

    async fn enqueue(&mut self, job: Job) -> AppResult<()> {
        match until_shutdown(&mut self.shutdown_rx, self.jobs.send(job)).await {
            Some(Ok(())) => Ok(()),
            Some(Err(_closed)) => Err(AppError::probe(ProbeError::JobQueueClosed)),
            None => Err(AppError::probe(ProbeError::Interrupted)),
        }
    }

    async fn wait_phase(&mut self) -> AppResult<()> {
        until_shutdown(&mut self.shutdown_rx, self.barrier.wait())
            .await
            .ok_or_else(|| AppError::probe(ProbeError::Interrupted))
    }
}

async fn until_shutdown<F>(shutdown_rx: &mut ShutdownReceiver, future: F) -> Option<F::Output>
where
    F: Future,
{
    tokio::select! {
        _ = shutdown_rx.recv() => None,
        output = future => Some(output),
    }
}
