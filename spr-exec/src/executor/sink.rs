use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::warn;

use crate::executor::result::{DispatchOutcome, DispatchResult};

/// Receives every result as soon as its worker has it.
///
/// Called concurrently from all workers; implementations must not assume ordering.
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn record(&self, result: DispatchResult);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Prints one line per result to stdout.
///
/// Once a write fails (typically a closed pipe) the sink stops printing; the run itself
/// carries on.
pub struct StdoutSink {
    format: ReportFormat,
    closed: AtomicBool,
}

impl StdoutSink {
    pub fn new(format: ReportFormat) -> Self {
        Self {
            format,
            closed: AtomicBool::new(false),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ResultSink for StdoutSink {
    async fn record(&self, result: DispatchResult) {
        if self.is_closed() {
            return;
        }
        let line = match self.format {
            ReportFormat::Text => text_line(&result),
            ReportFormat::Json => match serde_json::to_string(&result) {
                Ok(json) => json,
                Err(e) => {
                    warn!(url = %result.url, error = %e, "failed to serialize result");
                    return;
                }
            },
        };
        if let Err(e) = writeln!(std::io::stdout().lock(), "{line}") {
            if !self.closed.swap(true, Ordering::Relaxed) {
                warn!(error = %e, "stdout closed, no further result lines will be printed");
            }
        }
    }
}

pub fn text_line(result: &DispatchResult) -> String {
    match &result.outcome {
        DispatchOutcome::Status(status) => format!("{} - {}", result.url, status),
        DispatchOutcome::Failed { message, .. } => {
            format!("error accessing {}: {}", result.url, message)
        }
    }
}

pub struct NoOpSink;

#[async_trait]
impl ResultSink for NoOpSink {
    async fn record(&self, _result: DispatchResult) {}
}
