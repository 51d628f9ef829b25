use std::sync::Arc;

use spr_core::Task;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::executor::concurrency::ConcurrencyBudget;
use crate::executor::http::Transport;
use crate::executor::queue::TaskQueue;
use crate::executor::result::{DispatchError, DispatchSummary, WorkerStats};
use crate::executor::shutdown::{shutdown_channel, ShutdownToken};
use crate::executor::sink::ResultSink;
use crate::executor::types::DispatchConfig;
use crate::executor::worker::Worker;

/// Runs tasks through a fixed pool of workers.
///
/// A run goes: start the pool, push every task (waiting while the queue is full), wait
/// until every pushed task is done, signal the pool to stop, wait for every worker to
/// exit. A failing request is reported through the sink and never ends the run.
pub struct Dispatcher {
    config: DispatchConfig,
    transport: Arc<dyn Transport>,
    budget: ConcurrencyBudget,
    sink: Arc<dyn ResultSink>,
}

impl Dispatcher {
    pub fn new(
        config: DispatchConfig,
        transport: Arc<dyn Transport>,
        budget: ConcurrencyBudget,
        sink: Arc<dyn ResultSink>,
    ) -> Self {
        Self { config, transport, budget, sink }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn budget(&self) -> &ConcurrencyBudget {
        &self.budget
    }

    pub async fn run<I>(&self, tasks: I) -> Result<DispatchSummary, DispatchError>
    where
        I: IntoIterator<Item = Task>,
    {
        let (_never, cancel) = shutdown_channel();
        self.run_until(tasks, cancel).await
    }

    /// Like [`Dispatcher::run`], but stops early once `cancel` fires: no further tasks are
    /// enqueued, workers finish the task they hold and exit, and whatever is still queued
    /// is reported as abandoned.
    pub async fn run_until<I>(
        &self,
        tasks: I,
        mut cancel: ShutdownToken,
    ) -> Result<DispatchSummary, DispatchError>
    where
        I: IntoIterator<Item = Task>,
    {
        self.config.validate()?;
        if self.budget.cap() == 0 {
            return Err(DispatchError::InvalidConfig(
                "concurrency cap must be at least 1".to_string(),
            ));
        }

        let queue = Arc::new(TaskQueue::new(self.config.queue_capacity));
        let (stop_tx, stop) = shutdown_channel();
        let handles = self.spawn_workers(&queue, &stop);
        info!(
            workers = self.config.workers,
            max_concurrency = self.budget.cap(),
            "dispatch started"
        );

        let mut summary = DispatchSummary::default();
        let mut produce_error = None;
        for task in tasks {
            if cancel.is_shutdown() {
                summary.cancelled = true;
                break;
            }
            tokio::select! {
                biased;
                _ = cancel.wait() => {
                    summary.cancelled = true;
                    break;
                }
                pushed = queue.push(task) => {
                    if let Err(e) = pushed {
                        produce_error = Some(e);
                        break;
                    }
                    summary.enqueued += 1;
                }
            }
        }
        debug!(enqueued = summary.enqueued, "all tasks enqueued");

        if !summary.cancelled && produce_error.is_none() {
            tokio::select! {
                biased;
                _ = queue.join() => debug!("queue drained"),
                _ = cancel.wait() => summary.cancelled = true,
            }
        }

        stop_tx.shutdown();
        let join_error = self.collect_workers(handles, &mut summary).await;

        if let Some(e) = produce_error.or(join_error) {
            return Err(e);
        }

        summary.abandoned = summary.enqueued.saturating_sub(summary.completed);
        if summary.cancelled {
            warn!(
                completed = summary.completed,
                abandoned = summary.abandoned,
                "dispatch cancelled"
            );
        }
        info!(
            completed = summary.completed,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "dispatch finished"
        );
        Ok(summary)
    }

    fn spawn_workers(
        &self,
        queue: &Arc<TaskQueue>,
        stop: &ShutdownToken,
    ) -> Vec<(usize, JoinHandle<WorkerStats>)> {
        (0..self.config.workers)
            .map(|id| {
                let worker = Worker {
                    id,
                    queue: queue.clone(),
                    budget: self.budget.clone(),
                    transport: self.transport.clone(),
                    sink: self.sink.clone(),
                    stop: stop.clone(),
                };
                (id, tokio::spawn(worker.run()))
            })
            .collect()
    }

    /// Waits for every worker, even after one has failed to join, so no worker outlives
    /// the run.
    async fn collect_workers(
        &self,
        handles: Vec<(usize, JoinHandle<WorkerStats>)>,
        summary: &mut DispatchSummary,
    ) -> Option<DispatchError> {
        let mut first_error = None;
        for (id, handle) in handles {
            match handle.await {
                Ok(stats) => summary.absorb(stats),
                Err(e) => {
                    first_error.get_or_insert(DispatchError::WorkerJoin(format!("worker {id}: {e}")));
                }
            }
        }
        first_error
    }
}
