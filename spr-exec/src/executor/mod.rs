pub mod concurrency;
mod dispatcher;
pub mod http;
pub mod queue;
mod result;
pub mod shutdown;
pub mod sink;
mod types;
mod worker;

pub use concurrency::{BudgetPermit, ConcurrencyBudget};
pub use dispatcher::Dispatcher;
pub use http::{ReqwestTransport, Transport, TransportConfig, TransportError};
pub use queue::TaskQueue;
pub use result::{DispatchError, DispatchOutcome, DispatchResult, DispatchSummary, FailureKind};
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};
pub use sink::{NoOpSink, ReportFormat, ResultSink, StdoutSink};
pub use types::DispatchConfig;
