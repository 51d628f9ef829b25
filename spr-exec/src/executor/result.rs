use serde::Serialize;

/// What happened to one dispatched task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// The request reached a server (or the proxy) and produced a status code.
    Status(u16),
    #[serde(rename = "error")]
    Failed { kind: FailureKind, message: String },
}

impl DispatchOutcome {
    pub fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failed {
            kind,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(s) => Some(*s),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Timeout,
    /// Connect, DNS or TLS failure.
    Network,
    InvalidUrl,
    /// The transport panicked while handling the task.
    Panic,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchResult {
    pub method: String,
    pub url: String,
    #[serde(flatten)]
    pub outcome: DispatchOutcome,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchSummary {
    pub enqueued: usize,
    pub completed: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Enqueued but never dispatched because the run was cancelled.
    pub abandoned: usize,
    pub cancelled: bool,
}

impl DispatchSummary {
    pub(crate) fn absorb(&mut self, stats: WorkerStats) {
        self.completed += stats.completed;
        self.succeeded += stats.succeeded;
        self.failed += stats.failed;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct WorkerStats {
    pub completed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl WorkerStats {
    pub fn record(&mut self, outcome: &DispatchOutcome) {
        self.completed += 1;
        if outcome.is_failure() {
            self.failed += 1;
        } else {
            self.succeeded += 1;
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("invalid dispatch configuration: {0}")]
    InvalidConfig(String),
    #[error("task queue closed while tasks were still being produced")]
    QueueClosed,
    #[error("concurrency budget closed")]
    BudgetClosed,
    #[error("worker join error: {0}")]
    WorkerJoin(String),
}
