//! Asynchronous job polling.
//!
//! Commands such as device-group moves enqueue a job on the device and
//! return its id; the job is then observable only by polling. The poll loop
//! is the single suspension point in this client: one sleep per iteration,
//! bounded by an explicit deadline.

use std::time::Duration;

use panos_core::{Job, JobQuery, JobState, OpCommand, PanosError, Result};
use tracing::debug;

use crate::client::Panorama;
use crate::session::Session;

/// Default pause between job status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Default bound on total wait time for one job.
pub const DEFAULT_JOB_TIMEOUT: Duration = Duration::from_secs(600);

/// Polling settings for [`Panorama::wait_for_job`].
///
/// A zero interval or timeout falls back to the corresponding default.
#[derive(Debug, Clone, Copy)]
pub struct JobWait {
    /// Pause between polls.
    pub interval: Duration,
    /// Deadline for the job to reach a terminal state.
    pub timeout: Duration,
}

impl Default for JobWait {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_JOB_TIMEOUT,
        }
    }
}

impl<S: Session> Panorama<S> {
    /// Block until the job reaches a terminal state.
    ///
    /// Returns `Ok(())` on `Completed`, a [`PanosError::JobFailed`] carrying
    /// the device-reported reason on `Failed`, and
    /// [`PanosError::JobTimeout`] if the deadline passes first.
    pub async fn wait_for_job(&self, id: &str, wait: JobWait) -> Result<()> {
        self.wait_for_job_with(id, wait, |_job: &Job| {}).await
    }

    /// [`Self::wait_for_job`] with a per-poll progress callback.
    ///
    /// The callback observes each job snapshot as it is polled; it cannot
    /// alter control flow.
    pub async fn wait_for_job_with<F>(&self, id: &str, wait: JobWait, mut progress: F) -> Result<()>
    where
        F: FnMut(&Job) + Send,
    {
        let interval = if wait.interval.is_zero() {
            DEFAULT_POLL_INTERVAL
        } else {
            wait.interval
        };
        let timeout = if wait.timeout.is_zero() {
            DEFAULT_JOB_TIMEOUT
        } else {
            wait.timeout
        };
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let job = self.job_status(id).await?;
            debug!(target: "panos_client::op", id, status = %job.status, progress = %job.progress, "polled job");
            progress(&job);

            match job.state() {
                JobState::Completed => return Ok(()),
                JobState::Failed => {
                    return Err(PanosError::JobFailed {
                        id: id.to_string(),
                        reason: job.failure_reason(),
                    })
                }
                JobState::Pending | JobState::Active => {}
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(PanosError::JobTimeout {
                    id: id.to_string(),
                    timeout,
                });
            }
            tokio::time::sleep(interval).await;
        }
    }

    /// Fetch one status snapshot for the job.
    pub async fn job_status(&self, id: &str) -> Result<Job> {
        let cmd = OpCommand::new("show").arg("jobs>id", id);
        let (body, query) = self
            .op::<JobQuery>(&format!("checking job {id}"), &cmd, None)
            .await?;
        query.job.ok_or_else(|| {
            PanosError::Protocol(format!("no job in status response for {id}: {body}"))
        })
    }
}
