//! Log poller
//!
//! Polls the pipeline service for the log output of one job iteration on a
//! fixed period, appends it to the view state, and fetches the report index
//! once the run signals completion.
//!
//! Each tick first checks the cancellation flag and that the view still
//! tracks this job and iteration in the `Running` state. Fetch failures are
//! logged and the next tick simply tries again.

use qcflow_core::domain::job::JobStatus;
use qcflow_core::domain::log::LogChunk;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::repository::PipelineApi;
use crate::workflow::ViewState;

/// Job iteration a poller is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollTarget {
    pub job_id: String,
    pub iteration: u32,
    /// Sample name used to look up the reports
    pub sample: String,
}

impl PollTarget {
    fn is_tracked_by(&self, state: &ViewState) -> bool {
        state.iteration == self.iteration && state.job_id.as_deref() == Some(self.job_id.as_str())
    }
}

/// Handle to a running poll task
///
/// Cancelling (or dropping) the handle revokes the task's token and aborts it.
pub struct LogPoller {
    target: PollTarget,
    cancelled: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl LogPoller {
    /// Spawns the poll task; the first fetch happens one period from now
    pub fn spawn<A: PipelineApi + 'static>(
        api: Arc<A>,
        state: Arc<watch::Sender<ViewState>>,
        target: PollTarget,
        period: Duration,
    ) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let handle = tokio::spawn(Self::run(
            api,
            state,
            target.clone(),
            period,
            Arc::clone(&cancelled),
        ));

        Self {
            target,
            cancelled,
            handle,
        }
    }

    pub fn target(&self) -> &PollTarget {
        &self.target
    }

    pub fn is_active(&self) -> bool {
        !self.cancelled.load(Ordering::SeqCst) && !self.handle.is_finished()
    }

    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            debug!(
                "Cancelling log poller for job {} iteration {}",
                self.target.job_id, self.target.iteration
            );
        }
        self.handle.abort();
    }

    async fn run<A: PipelineApi>(
        api: Arc<A>,
        state: Arc<watch::Sender<ViewState>>,
        target: PollTarget,
        period: Duration,
        cancelled: Arc<AtomicBool>,
    ) {
        info!(
            "Polling logs for job {} iteration {} (interval: {:?})",
            target.job_id, target.iteration, period
        );

        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            if cancelled.load(Ordering::SeqCst) {
                debug!("Log poller for job {} cancelled", target.job_id);
                break;
            }
            {
                let current = state.borrow();
                if current.status != JobStatus::Running || !target.is_tracked_by(&current) {
                    debug!("Job {} no longer running, stopping poller", target.job_id);
                    break;
                }
            }

            let chunk = match api.get_logs(&target.job_id, target.iteration).await {
                Ok(chunk) => chunk,
                Err(e) => {
                    warn!(
                        "Failed to fetch logs for job {} iteration {}: {:#}",
                        target.job_id, target.iteration, e
                    );
                    continue;
                }
            };

            if cancelled.load(Ordering::SeqCst) {
                break;
            }

            if apply_chunk(&state, &target, &chunk) {
                let chunks = state.borrow().logs.chunk_count();
                info!(
                    "Job {} iteration {} completed after {} log chunk(s), fetching reports",
                    target.job_id, target.iteration, chunks
                );
                fetch_reports(api.as_ref(), &state, &target).await;
                break;
            }
        }
    }
}

impl Drop for LogPoller {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Appends a chunk to the tracked run's log
///
/// # Returns
/// Whether the chunk moved the run to `Completed`
fn apply_chunk(state: &watch::Sender<ViewState>, target: &PollTarget, chunk: &LogChunk) -> bool {
    let mut completed = false;

    state.send_if_modified(|s| {
        if s.status != JobStatus::Running || !target.is_tracked_by(s) {
            return false;
        }

        let appended = s.logs.append(&chunk.logs);
        if chunk.done {
            s.status = JobStatus::Completed;
            s.reports_pending = true;
            completed = true;
        }
        appended || completed
    });

    completed
}

/// Single report-index request; a failure leaves the view completed without reports
async fn fetch_reports<A: PipelineApi + ?Sized>(
    api: &A,
    state: &watch::Sender<ViewState>,
    target: &PollTarget,
) {
    let reports = match api
        .get_reports(&target.job_id, target.iteration, &target.sample)
        .await
    {
        Ok(reports) => {
            debug!(
                "Fetched {} report(s) for job {} iteration {}",
                reports.len(),
                target.job_id,
                target.iteration
            );
            Some(reports)
        }
        Err(e) => {
            error!(
                "Failed to fetch reports for job {} iteration {}: {:#}",
                target.job_id, target.iteration, e
            );
            None
        }
    };

    state.send_if_modified(|s| {
        if s.status != JobStatus::Completed || !target.is_tracked_by(s) {
            return false;
        }
        s.reports = reports;
        s.reports_pending = false;
        true
    });
}
