use std::path::PathBuf;

use clap::{ArgAction, Args, Parser};

use crate::output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "spr",
    version,
    about = "Send a synthesized GET request to every endpoint of an OpenAPI description"
)]
pub struct Cli {
    /// OpenAPI/Swagger description (JSON or YAML).
    pub description: PathBuf,
    /// Base URL prepended to every path, e.g. https://api.example.com
    pub host: String,
    /// Parameter value to use instead of the canned placeholder (repeatable).
    #[arg(long = "param", value_name = "NAME=VALUE")]
    pub params: Vec<String>,
    /// Send one request per built-in integer value for every GET operation with an
    /// integer path or query parameter.
    #[arg(long)]
    pub int_fuzzing: bool,
    /// Print the synthesized requests without sending them.
    #[arg(long)]
    pub dry_run: bool,
    #[command(flatten)]
    pub transport: TransportArgs,
    #[command(flatten)]
    pub dispatch: DispatchArgs,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Suppress per-request lines.
    #[arg(long, short)]
    pub quiet: bool,
    /// Show a progress counter on stderr instead of per-request lines.
    #[arg(long)]
    pub progress: bool,
    /// Raise log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(long, short, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Args, Clone)]
pub struct TransportArgs {
    #[arg(long, default_value = spr_exec::executor::http::DEFAULT_PROXY, conflicts_with = "no_proxy")]
    pub proxy: String,
    /// Send requests directly instead of through the proxy.
    #[arg(long)]
    pub no_proxy: bool,
    /// Verify TLS certificates (off by default).
    #[arg(long)]
    pub verify_tls: bool,
    /// Per-request timeout in milliseconds.
    #[arg(long, default_value_t = 30000)]
    pub timeout: u64,
    #[arg(long)]
    pub follow_redirects: bool,
    #[arg(long, default_value_t = 5)]
    pub max_redirects: usize,
    /// Extra request header (repeatable).
    #[arg(long = "header", short = 'H', value_name = "NAME: VALUE")]
    pub headers: Vec<String>,
}

#[derive(Debug, Args, Clone)]
pub struct DispatchArgs {
    #[arg(long, default_value_t = 10)]
    pub workers: usize,
    /// Maximum number of requests in flight at once.
    #[arg(long, default_value_t = 10)]
    pub max_concurrency: usize,
    #[arg(long, default_value_t = 64)]
    pub queue_capacity: usize,
}
