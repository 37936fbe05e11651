use std::time::{Duration, Instant};

use crate::collab::{BearerToken, GeneratedImage, GenerationBackend, GenerationRequest, JobStatus};
use crate::foundation::core::JobId;
use crate::foundation::error::EaselResult;

/// Default pause between status fetches for one job.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Terminal outcome of a tracked job, delivered exactly once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobEvent {
    /// The backend finished the job; one event carries all results.
    Completed {
        /// The finished job.
        job: JobId,
        /// Generated images in backend order.
        results: Vec<GeneratedImage>,
    },
    /// The backend reported failure, or a status fetch failed in transit.
    Failed {
        /// The failed job.
        job: JobId,
        /// Reason for display; never retried automatically.
        reason: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TrackedState {
    Submitted,
    Polling,
}

#[derive(Debug)]
struct TrackedJob {
    id: JobId,
    state: TrackedState,
    last_activity: Instant,
}

/// Tracks outstanding generation jobs from submission to terminal outcome.
///
/// The tracker is tick-driven: the owning event loop calls [`JobTracker::poll`]
/// with the current instant and the tracker performs at most one status fetch
/// per due job per call, gated on the poll interval. A job whose terminal
/// state (or fetch error) is observed is dropped on the same call, so no
/// fetch can happen after delivery or after [`JobTracker::cancel`]. Fetches
/// are synchronous within the tick, so two fetches for one handle can never
/// be in flight at once. There is no free-running timer to leak: dropping the
/// tracker or calling [`JobTracker::cancel_all`] is a complete teardown.
#[derive(Debug)]
pub struct JobTracker {
    jobs: Vec<TrackedJob>,
    interval: Duration,
}

impl JobTracker {
    /// Tracker with the default 1000 ms poll interval.
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_POLL_INTERVAL)
    }

    /// Tracker with a custom poll interval.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            jobs: Vec::new(),
            interval,
        }
    }

    /// Number of jobs still awaiting a terminal state.
    pub fn active(&self) -> usize {
        self.jobs.len()
    }

    /// Return `true` while `id` is tracked.
    pub fn is_tracking(&self, id: JobId) -> bool {
        self.jobs.iter().any(|j| j.id == id)
    }

    /// Submit a request to the backend and start tracking the returned job.
    ///
    /// A transport failure surfaces as the error of this call; nothing enters
    /// the polling set in that case. The first status fetch becomes due one
    /// interval after `now`.
    pub fn submit(
        &mut self,
        backend: &mut dyn GenerationBackend,
        auth: &BearerToken,
        request: &GenerationRequest,
        now: Instant,
    ) -> EaselResult<JobId> {
        let id = backend.submit(auth, request)?;
        tracing::debug!(job = id.0, "generation job submitted");
        self.jobs.push(TrackedJob {
            id,
            state: TrackedState::Submitted,
            last_activity: now,
        });
        Ok(id)
    }

    /// Perform one poll tick at `now` and return any terminal events.
    ///
    /// Each due job gets exactly one status fetch. `Processing` keeps the job
    /// in the polling set; `Completed`, `Failed` and fetch errors remove it
    /// before this call returns, which guarantees exactly-once delivery and
    /// that no later tick touches the job again.
    pub fn poll(
        &mut self,
        backend: &mut dyn GenerationBackend,
        auth: &BearerToken,
        now: Instant,
    ) -> Vec<JobEvent> {
        let mut events = Vec::new();
        let mut finished = Vec::new();

        for job in &mut self.jobs {
            if now.saturating_duration_since(job.last_activity) < self.interval {
                continue;
            }
            job.last_activity = now;

            match backend.job_status(auth, job.id) {
                Ok(JobStatus::Processing) => {
                    job.state = TrackedState::Polling;
                    tracing::debug!(job = job.id.0, "generation job still processing");
                }
                Ok(JobStatus::Completed(results)) => {
                    finished.push(job.id);
                    events.push(JobEvent::Completed {
                        job: job.id,
                        results,
                    });
                }
                Ok(JobStatus::Failed(reason)) => {
                    finished.push(job.id);
                    events.push(JobEvent::Failed {
                        job: job.id,
                        reason,
                    });
                }
                Err(err) => {
                    finished.push(job.id);
                    events.push(JobEvent::Failed {
                        job: job.id,
                        reason: format!("transport: {err}"),
                    });
                }
            }
        }

        self.jobs.retain(|j| !finished.contains(&j.id));
        events
    }

    /// Stop tracking `id` with no further callbacks. Idempotent: cancelling
    /// twice, or a job already delivered, is a no-op.
    pub fn cancel(&mut self, id: JobId) {
        let before = self.jobs.len();
        self.jobs.retain(|j| j.id != id);
        if self.jobs.len() != before {
            tracing::debug!(job = id.0, "generation job cancelled");
        }
    }

    /// Cancel every tracked job. Called when the owning view is torn down.
    pub fn cancel_all(&mut self) {
        if !self.jobs.is_empty() {
            tracing::debug!(count = self.jobs.len(), "cancelling all generation jobs");
        }
        self.jobs.clear();
    }
}

impl Default for JobTracker {
    fn default() -> Self {
        Self::new()
    }
}
