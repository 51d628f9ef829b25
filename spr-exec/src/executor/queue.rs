use std::sync::atomic::{AtomicUsize, Ordering};

use spr_core::Task;
use tokio::sync::{mpsc, Mutex, Notify};

use crate::executor::result::DispatchError;

/// Bounded multi-consumer task queue with an unfinished-task counter.
///
/// Every pushed task counts as unfinished until a consumer calls [`TaskQueue::task_done`]
/// (or drops the guard from [`TaskQueue::done_guard`]). [`TaskQueue::join`] waits for the
/// counter to reach zero.
#[derive(Debug)]
pub struct TaskQueue {
    tx: mpsc::Sender<Task>,
    rx: Mutex<mpsc::Receiver<Task>>,
    unfinished: AtomicUsize,
    drained: Notify,
}

impl TaskQueue {
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        Self {
            tx,
            rx: Mutex::new(rx),
            unfinished: AtomicUsize::new(0),
            drained: Notify::new(),
        }
    }

    /// Enqueues a task, waiting while the queue is full. Cancel-safe: if the future is
    /// dropped before it completes, nothing was enqueued.
    pub async fn push(&self, task: Task) -> Result<(), DispatchError> {
        let slot = self
            .tx
            .reserve()
            .await
            .map_err(|_| DispatchError::QueueClosed)?;
        self.unfinished.fetch_add(1, Ordering::AcqRel);
        slot.send(task);
        Ok(())
    }

    /// Takes the next task, waiting while the queue is empty. Cancel-safe.
    pub async fn pop(&self) -> Option<Task> {
        self.rx.lock().await.recv().await
    }

    pub fn task_done(&self) {
        let prev = self.unfinished.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(prev > 0, "task_done called more times than tasks were pushed");
        if prev == 1 {
            self.drained.notify_waiters();
        }
    }

    pub fn done_guard(&self) -> DoneGuard<'_> {
        DoneGuard { queue: self }
    }

    pub fn unfinished(&self) -> usize {
        self.unfinished.load(Ordering::Acquire)
    }

    /// Waits until every pushed task has been marked done.
    pub async fn join(&self) {
        loop {
            let drained = self.drained.notified();
            if self.unfinished() == 0 {
                return;
            }
            drained.await;
        }
    }
}

/// Marks one task done when dropped, including during a panic unwind.
#[derive(Debug)]
pub struct DoneGuard<'a> {
    queue: &'a TaskQueue,
}

impl Drop for DoneGuard<'_> {
    fn drop(&mut self) {
        self.queue.task_done();
    }
}
