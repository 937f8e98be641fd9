use std::collections::{BTreeSet, HashMap};
use std::io::Write;
use std::ops::ControlFlow;

use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::args::{HttpMethod, MinDiff};
use crate::error::{AppError, AppResult, ProbeError};
use crate::shutdown::ShutdownReceiver;

use super::ProbeSettings;
use super::diff::{format_size, judge};
use super::model::{Event, ProbeResult, RequestFailure, Target};

/// Settings the aggregator needs from the run configuration.
#[derive(Debug, Clone)]
pub struct AggregatorSettings {
    pub pool_size: usize,
    pub min_diff: MinDiff,
    pub acceptable_status: BTreeSet<u16>,
    pub max_errors: u64,
}

impl From<&ProbeSettings> for AggregatorSettings {
    fn from(settings: &ProbeSettings) -> Self {
        Self {
            pool_size: settings.workers.get(),
            min_diff: settings.min_diff,
            acceptable_status: settings.acceptable_status.clone(),
            max_errors: settings.max_errors,
        }
    }
}

/// Counters describing a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeReport {
    pub events: u64,
    pub results: u64,
    pub failures: u64,
    pub hits: u64,
    pub workers_done: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct BaselineKey {
    method: HttpMethod,
    target: Target,
}

impl BaselineKey {
    fn of(method: HttpMethod, target: &Target) -> Self {
        Self {
            method,
            target: target.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Baseline {
    Recorded(u64),
    Failed,
}

impl Baseline {
    /// A failed baseline compares like an empty one.
    const fn length(self) -> u64 {
        match self {
            Baseline::Recorded(length) => length,
            Baseline::Failed => 0,
        }
    }
}

/// Baseline length per target, one slot per method pass. A newer baseline
/// overwrites the slot.
#[derive(Debug, Default)]
struct BaselineState {
    baselines: HashMap<BaselineKey, Baseline>,
}

impl BaselineState {
    fn record(&mut self, key: BaselineKey, baseline: Baseline) {
        self.baselines.insert(key, baseline);
    }

    fn get(&self, key: &BaselineKey) -> Option<Baseline> {
        self.baselines.get(key).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BudgetCharge {
    Ignored,
    Counted,
    Exhausted { max: u64 },
}

/// Failure counter with an optional ceiling; a maximum of 0 ignores failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ErrorBudget {
    max: u64,
    seen: u64,
}

impl ErrorBudget {
    const fn new(max: u64) -> Self {
        Self { max, seen: 0 }
    }

    fn charge(&mut self) -> BudgetCharge {
        if self.max == 0 {
            return BudgetCharge::Ignored;
        }
        self.seen = self.seen.saturating_add(1);
        if self.seen >= self.max {
            BudgetCharge::Exhausted { max: self.max }
        } else {
            BudgetCharge::Counted
        }
    }
}

/// Single consumer of worker events. Owns the baseline state and the error
/// budget, decides which test responses are hits, and writes them to `out`.
pub struct Aggregator<W> {
    settings: AggregatorSettings,
    out: W,
    baselines: BaselineState,
    // Test results that arrived before their baseline outcome.
    deferred: HashMap<BaselineKey, Vec<ProbeResult>>,
    budget: ErrorBudget,
    report: ProbeReport,
}

impl<W> Aggregator<W>
where
    W: Write,
{
    #[must_use]
    pub fn new(settings: AggregatorSettings, out: W) -> Self {
        let budget = ErrorBudget::new(settings.max_errors);
        Self {
            settings,
            out,
            baselines: BaselineState::default(),
            deferred: HashMap::new(),
            budget,
            report: ProbeReport::default(),
        }
    }

    /// Drains `events` until every worker has reported done.
    ///
    /// # Errors
    ///
    /// Returns an error when the error budget is exhausted, the shutdown
    /// signal fires, the event stream closes early, or a hit cannot be
    /// written.
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<Event>,
        mut shutdown_rx: ShutdownReceiver,
    ) -> AppResult<ProbeReport> {
        loop {
            let event = tokio::select! {
                biased;
                _ = shutdown_rx.recv() => {
                    return Err(AppError::probe(ProbeError::Interrupted));
                }
                event = events.recv() => event,
            };
            let Some(event) = event else {
                return Err(AppError::probe(ProbeError::PoolClosedEarly {
                    done: self.report.workers_done,
                    expected: self.settings.pool_size,
                }));
            };
            if self.handle(event)?.is_break() {
                return Ok(self.report);
            }
        }
    }

    /// Applies one event. Breaks once the whole pool has shut down.
    ///
    /// # Errors
    ///
    /// Returns an error when the error budget is exhausted or a hit cannot be
    /// written.
    pub fn handle(&mut self, event: Event) -> AppResult<ControlFlow<()>> {
        self.report.events = self.report.events.saturating_add(1);
        match event {
            Event::WorkerDone { worker } => {
                self.report.workers_done = self.report.workers_done.saturating_add(1);
                debug!(
                    worker,
                    done = self.report.workers_done,
                    "Worker finished"
                );
                if self.report.workers_done >= self.settings.pool_size {
                    return Ok(ControlFlow::Break(()));
                }
            }
            Event::Failure(failure) => self.handle_failure(failure)?,
            Event::Result(result) => self.handle_result(result)?,
        }
        Ok(ControlFlow::Continue(()))
    }

    #[must_use]
    pub const fn report(&self) -> ProbeReport {
        self.report
    }

    fn handle_failure(&mut self, failure: RequestFailure) -> AppResult<()> {
        self.report.failures = self.report.failures.saturating_add(1);
        match self.budget.charge() {
            BudgetCharge::Ignored => debug!("Ignoring failure: {}", failure),
            BudgetCharge::Counted => error!("{}", failure),
            BudgetCharge::Exhausted { max } => {
                error!("{}", failure);
                error!("Reached max number of errors");
                error!("Exiting");
                return Err(AppError::probe(ProbeError::ErrorBudgetExhausted { max }));
            }
        }

        if failure.job.is_baseline() {
            let key = BaselineKey::of(failure.job.method, &failure.job.target);
            self.baselines.record(key.clone(), Baseline::Failed);
            self.release_deferred(&key)?;
        }
        Ok(())
    }

    fn handle_result(&mut self, result: ProbeResult) -> AppResult<()> {
        self.report.results = self.report.results.saturating_add(1);
        let key = BaselineKey::of(result.job.method, &result.job.target);

        if result.job.is_baseline() {
            debug!(
                method = %result.job.method,
                target = %result.job.target,
                status = result.status,
                length = result.length,
                "Recorded baseline"
            );
            self.baselines.record(key.clone(), Baseline::Recorded(result.length));
            return self.release_deferred(&key);
        }

        match self.baselines.get(&key) {
            Some(baseline) => self.evaluate(&result, baseline.length()),
            None => {
                self.deferred.entry(key).or_default().push(result);
                Ok(())
            }
        }
    }

    fn release_deferred(&mut self, key: &BaselineKey) -> AppResult<()> {
        let Some(pending) = self.deferred.remove(key) else {
            return Ok(());
        };
        let baseline = self.baselines.get(key).map_or(0, Baseline::length);
        for result in &pending {
            self.evaluate(result, baseline)?;
        }
        Ok(())
    }

    fn evaluate(&mut self, result: &ProbeResult, baseline: u64) -> AppResult<()> {
        let verdict = judge(
            result.status,
            result.length,
            baseline,
            &self.settings.acceptable_status,
            self.settings.min_diff,
        );
        if !verdict.is_hit() {
            debug!(
                url = %result.job.url(),
                status = result.status,
                length = result.length,
                baseline,
                ?verdict,
                "Discarded"
            );
            return Ok(());
        }

        writeln!(
            self.out,
            "{} - {} {} ({})",
            result.status,
            result.job.method,
            result.job.url(),
            format_size(result.length)
        )?;
        self.out.flush()?;
        self.report.hits = self.report.hits.saturating_add(1);
        Ok(())
    }
}

#[cfg(test)]
impl Baseline {
    pub(super) const fn recorded(self) -> Option<u64> {
        match self {
            Baseline::Recorded(length) => Some(length),
            Baseline::Failed => None,
        }
    }
}

#[cfg(test)]
impl<W> Aggregator<W> {
    pub(super) fn baseline_for(&self, method: HttpMethod, target: &Target) -> Option<u64> {
        self.baselines
            .get(&BaselineKey::of(method, target))
            .and_then(Baseline::recorded)
    }

    pub(super) fn deferred_count(&self) -> usize {
        self.deferred.values().map(Vec::len).sum()
    }

    pub(super) fn into_output(self) -> W {
        self.out
    }
}
