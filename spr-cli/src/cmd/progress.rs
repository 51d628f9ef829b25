use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use spr_exec::{DispatchResult, ResultSink};

/// Redraws a single progress line on stderr as results come in.
pub struct ProgressSink {
    total: usize,
    done: AtomicUsize,
    failed: AtomicUsize,
}

impl ProgressSink {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            done: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        }
    }

    fn render(&self, done: usize, failed: usize) {
        let total = self.total;
        let percent = if total > 0 { (done * 100) / total } else { 100 };
        let mut err = std::io::stderr().lock();
        // Progress is cosmetic, a failed write is ignored.
        let _ = write!(
            err,
            "\rProgress: [{done}/{total}] {percent}% ({} responded, {failed} failed)",
            done - failed
        );
        if done >= total {
            let _ = writeln!(err);
        }
    }
}

#[async_trait]
impl ResultSink for ProgressSink {
    async fn record(&self, result: DispatchResult) {
        let failed = if result.outcome.is_failure() {
            self.failed.fetch_add(1, Ordering::Relaxed) + 1
        } else {
            self.failed.load(Ordering::Relaxed)
        };
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        self.render(done, failed);
    }
}
