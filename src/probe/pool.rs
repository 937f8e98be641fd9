use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::shutdown::{ShutdownReceiver, ShutdownSender};

use super::barrier::PhaseBarrier;
use super::executor::{RequestExecutor, execute_job};
use super::model::{Event, Job};

type SharedJobs = Arc<Mutex<mpsc::Receiver<Job>>>;

struct Worker<E> {
    id: usize,
    executor: Arc<E>,
    jobs: SharedJobs,
    events: mpsc::Sender<Event>,
    barrier: Arc<PhaseBarrier>,
}

/// Spawns `size` workers that share one job queue.
///
/// Each worker forwards exactly one event per request job, and a
/// [`Event::WorkerDone`] once it has taken a poison job.
pub(crate) fn spawn_workers<E>(
    size: usize,
    executor: &Arc<E>,
    jobs: mpsc::Receiver<Job>,
    events: &mpsc::Sender<Event>,
    barrier: &Arc<PhaseBarrier>,
    shutdown_tx: &ShutdownSender,
) -> Vec<JoinHandle<()>>
where
    E: RequestExecutor,
{
    let jobs: SharedJobs = Arc::new(Mutex::new(jobs));
    (0..size)
        .map(|id| {
            let worker = Worker {
                id,
                executor: Arc::clone(executor),
                jobs: Arc::clone(&jobs),
                events: events.clone(),
                barrier: Arc::clone(barrier),
            };
            let shutdown_rx = shutdown_tx.subscribe();
            tokio::spawn(worker.run(shutdown_rx))
        })
        .collect()
}

impl<E> Worker<E>
where
    E: RequestExecutor,
{
    async fn run(self, mut shutdown_rx: ShutdownReceiver) {
        loop {
            let job = tokio::select! {
                _ = shutdown_rx.recv() => return,
                job = next_job(&self.jobs) => job,
            };

            let request = match job {
                Some(Job::Request(request)) => request,
                Some(Job::Poison) => {
                    debug!(worker = self.id, "Worker received poison job");
                    drop(self.events.send(Event::WorkerDone { worker: self.id }).await);
                    return;
                }
                None => return,
            };

            let event = tokio::select! {
                _ = shutdown_rx.recv() => return,
                event = execute_job(self.executor.as_ref(), request, &self.barrier) => event,
            };

            if self.events.send(event).await.is_err() {
                return;
            }
        }
    }
}

async fn next_job(jobs: &SharedJobs) -> Option<Job> {
    jobs.lock().await.recv().await
}
