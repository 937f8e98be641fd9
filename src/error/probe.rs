use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Reached max number of errors ({max}).")]
    ErrorBudgetExhausted { max: u64 },
    #[error("Run interrupted.")]
    Interrupted,
    #[error("Event stream closed after {done} of {expected} workers finished.")]
    PoolClosedEarly { done: usize, expected: usize },
    #[error("Job queue closed before dispatch finished.")]
    JobQueueClosed,
}
