use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures_util::FutureExt;
use spr_core::Task;
use tracing::{debug, error};

use crate::executor::concurrency::ConcurrencyBudget;
use crate::executor::http::Transport;
use crate::executor::queue::TaskQueue;
use crate::executor::result::{DispatchOutcome, DispatchResult, FailureKind, WorkerStats};
use crate::executor::shutdown::ShutdownToken;
use crate::executor::sink::ResultSink;

pub(crate) struct Worker {
    pub id: usize,
    pub queue: Arc<TaskQueue>,
    pub budget: ConcurrencyBudget,
    pub transport: Arc<dyn Transport>,
    pub sink: Arc<dyn ResultSink>,
    pub stop: ShutdownToken,
}

impl Worker {
    pub(crate) async fn run(mut self) -> WorkerStats {
        debug!(worker = self.id, "worker started");
        let mut stats = WorkerStats::default();
        loop {
            let task = tokio::select! {
                biased;
                _ = self.stop.wait() => break,
                next = self.queue.pop() => match next {
                    Some(task) => task,
                    None => break,
                },
            };

            let _done = self.queue.done_guard();
            let result = self.dispatch(task).await;
            stats.record(&result.outcome);
            let url = result.url.clone();
            if let Err(panic) = AssertUnwindSafe(self.sink.record(result)).catch_unwind().await {
                error!(worker = self.id, url = %url, panic_msg = %panic_message(panic), "result sink panicked");
            }
        }
        debug!(worker = self.id, completed = stats.completed, "worker stopped");
        stats
    }

    async fn dispatch(&self, task: Task) -> DispatchResult {
        let started = Instant::now();
        let outcome = match self.budget.acquire().await {
            Ok(_permit) => {
                let sent = AssertUnwindSafe(self.transport.send(&task))
                    .catch_unwind()
                    .await;
                match sent {
                    Ok(Ok(status)) => DispatchOutcome::Status(status),
                    Ok(Err(e)) => DispatchOutcome::failed(e.kind(), e.to_string()),
                    Err(panic) => {
                        let msg = panic_message(panic);
                        error!(worker = self.id, url = %task.url, panic_msg = %msg, "transport panicked");
                        DispatchOutcome::failed(FailureKind::Panic, msg)
                    }
                }
            }
            Err(e) => DispatchOutcome::failed(FailureKind::Other, e.to_string()),
        };

        DispatchResult {
            method: task.method,
            url: task.url,
            outcome,
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        }
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
