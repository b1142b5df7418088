//! Sequential fail-fast sync driver.
//!
//! Feeds every task to the selected adapter in schedule order, one
//! awaited submission at a time. The first failure ends the run; tasks
//! after it are never attempted. There is no checkpointing: re-running
//! a failed sync starts from the first task again and will duplicate
//! issues already created by the earlier attempt.

use tracing::{error, info};

use crate::adapters::IssueAdapter;
use crate::error::AdapterError;
use crate::task::Task;

/// Terminal outcome of one sync run.
#[derive(Debug)]
pub enum SyncOutcome {
    /// Every submission succeeded.
    Success {
        /// Number of issues created.
        created: usize,
    },
    /// A submission failed; the run stopped there.
    Failure {
        /// Id of the task whose submission failed.
        task_id: String,
        /// Submissions attempted, including the failed one.
        attempted: usize,
        /// The failure as reported by the adapter.
        error: AdapterError,
    },
}

impl SyncOutcome {
    /// True for a fully successful run.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Drives one upload run against a single adapter.
pub struct SyncDriver {
    adapter: Box<dyn IssueAdapter>,
}

impl SyncDriver {
    /// Create a driver for the given adapter.
    #[must_use]
    pub fn new(adapter: Box<dyn IssueAdapter>) -> Self {
        Self { adapter }
    }

    /// Submit `tasks` in order, stopping at the first failure.
    pub async fn run(&self, tasks: &[Task]) -> SyncOutcome {
        info!(
            adapter = self.adapter.name(),
            task_count = tasks.len(),
            "Starting backlog sync"
        );

        let mut created = 0;
        for task in tasks {
            match self.adapter.submit(task).await {
                Ok(issue) => {
                    created += 1;
                    info!(
                        task = %task.id,
                        remote_id = issue.id.as_deref().unwrap_or("-"),
                        "Task submitted"
                    );
                }
                Err(e) => {
                    error!(task = %task.id, error = %e, "Submission failed, aborting run");
                    return SyncOutcome::Failure {
                        task_id: task.id.clone(),
                        attempted: created + 1,
                        error: e,
                    };
                }
            }
        }

        info!(created, "Backlog sync finished");
        SyncOutcome::Success { created }
    }
}
