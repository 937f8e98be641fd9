use std::fmt;
use std::sync::Arc;

use crate::args::HttpMethod;

/// Absolute base URL with no trailing `/`. Identity is the normalized string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Target(Arc<str>);

impl Target {
    /// Wraps an already normalized base URL, dropping one trailing `/` if
    /// present.
    #[must_use]
    pub fn new(url: &str) -> Self {
        Target(Arc::from(url.strip_suffix('/').unwrap_or(url)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One request to issue. A job without a path is the target's baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestJob {
    pub method: HttpMethod,
    pub target: Target,
    pub path: Option<Arc<str>>,
}

impl RequestJob {
    #[must_use]
    pub const fn baseline(method: HttpMethod, target: Target) -> Self {
        Self {
            method,
            target,
            path: None,
        }
    }

    #[must_use]
    pub const fn test(method: HttpMethod, target: Target, path: Arc<str>) -> Self {
        Self {
            method,
            target,
            path: Some(path),
        }
    }

    #[must_use]
    pub const fn is_baseline(&self) -> bool {
        self.path.is_none()
    }

    /// Target URL with the candidate path appended.
    #[must_use]
    pub fn url(&self) -> String {
        match self.path.as_deref() {
            Some(path) => format!("{}{}", self.target, path),
            None => self.target.as_str().to_owned(),
        }
    }
}

/// Work item on the job queue. `Poison` tells the receiving worker to stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    Request(RequestJob),
    Poison,
}

/// Status and drained body size of one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseSummary {
    pub status: u16,
    pub length: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub job: RequestJob,
    pub status: u16,
    pub length: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    pub job: RequestJob,
    pub error: String,
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.job.method, self.job.url(), self.error)
    }
}

/// Everything the aggregator consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Result(ProbeResult),
    Failure(RequestFailure),
    WorkerDone { worker: usize },
}
