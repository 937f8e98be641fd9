use std::fmt;

use async_trait::async_trait;

use super::barrier::PhaseBarrier;
use super::model::{Event, ProbeResult, RequestFailure, RequestJob, ResponseSummary};

/// Performs the request for one job, split at the point where the round trip
/// has finished and only the body remains to be read.
#[async_trait]
pub trait RequestExecutor: Send + Sync + 'static {
    type Response: Send;
    type Error: fmt::Display + Send;

    /// Sends the request and waits for the response head.
    async fn send(&self, job: &RequestJob) -> Result<Self::Response, Self::Error>;

    /// Reads the whole body, counting its bytes, and releases the connection.
    async fn drain(&self, response: Self::Response) -> Result<ResponseSummary, Self::Error>;
}

/// Runs one job to completion, completing the barrier once the round trip is
/// over and before the body is drained.
pub(crate) async fn execute_job<E>(executor: &E, job: RequestJob, barrier: &PhaseBarrier) -> Event
where
    E: RequestExecutor + ?Sized,
{
    let sent = executor.send(&job).await;
    barrier.complete();

    let drained = match sent {
        Ok(response) => executor.drain(response).await,
        Err(err) => Err(err),
    };

    match drained {
        Ok(ResponseSummary { status, length }) => Event::Result(ProbeResult {
            job,
            status,
            length,
        }),
        Err(err) => Event::Failure(RequestFailure {
            job,
            error: err.to_string(),
        }),
    }
}
