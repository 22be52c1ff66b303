//! Where application code runs.
//!
//! The dispatch layer only needs "run this closure somewhere else". How many
//! threads, how deep the queue, and what happens under load belong to the
//! executor the embedding process supplies.

use std::time::Duration;

use anyhow::Context;
use tokio::runtime::{Handle, Runtime};

use crate::config::WorkerConfig;

/// A unit of work submitted by the dispatch layer.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

pub trait Executor: Send + Sync + 'static {
    /// Schedules `task` and returns without waiting for it.
    ///
    /// An executor that cannot run a task should drop it; dropping is
    /// observable to the submitter.
    fn execute(&self, task: Task);
}

/// Runs tasks on the blocking pool of a tokio runtime.
impl Executor for Handle {
    fn execute(&self, task: Task) {
        self.spawn_blocking(task);
    }
}

/// Default worker pool: a dedicated tokio runtime whose blocking pool is
/// capped at `WorkerConfig::threads`. Tasks beyond that wait in tokio's queue.
pub struct WorkerPool {
    runtime: Option<Runtime>,
}

impl WorkerPool {
    pub fn new(cfg: &WorkerConfig) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(cfg.threads.max(1))
            .thread_name("switchyard-worker")
            .enable_all()
            .build()
            .context("failed to build worker pool")?;

        Ok(Self {
            runtime: Some(runtime),
        })
    }

    /// Waits up to `timeout` for running tasks to finish, then stops the pool.
    pub fn shutdown(mut self, timeout: Duration) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_timeout(timeout);
        }
    }
}

impl Executor for WorkerPool {
    fn execute(&self, task: Task) {
        if let Some(runtime) = &self.runtime {
            runtime.spawn_blocking(task);
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Safe from inside another runtime, unlike a plain drop.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
