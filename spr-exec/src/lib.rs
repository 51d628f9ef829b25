#![forbid(unsafe_code)]

//! Dispatch engine for spr: a fixed worker pool pulling synthesized requests from a
//! bounded queue, with in-flight transport calls capped by a shared budget.

pub mod executor;

pub use crate::executor::{
    shutdown_channel, BudgetPermit, ConcurrencyBudget, DispatchConfig, DispatchError,
    DispatchOutcome, DispatchResult, DispatchSummary, Dispatcher, FailureKind, NoOpSink,
    ReportFormat, ReqwestTransport, ResultSink, ShutdownSender, ShutdownToken, StdoutSink,
    TaskQueue, Transport, TransportConfig, TransportError,
};
