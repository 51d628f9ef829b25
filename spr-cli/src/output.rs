use std::io::{self, Write};

use spr_core::Task;
use spr_exec::{DispatchSummary, ReportFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

/// Fails once stdout is gone (e.g. a closed pipe) so callers can stop early.
pub fn print_task(format: OutputFormat, task: &Task) -> io::Result<()> {
    let line = match format {
        OutputFormat::Text => task.to_string(),
        OutputFormat::Json => serde_json::to_string(task)?,
    };
    writeln!(io::stdout().lock(), "{line}")
}

pub fn print_summary(format: OutputFormat, summary: &DispatchSummary) {
    match format {
        OutputFormat::Text => {
            let mut line = format!(
                "done: {} requests, {} responded, {} failed",
                summary.completed, summary.succeeded, summary.failed
            );
            if summary.cancelled {
                line.push_str(&format!(", cancelled with {} abandoned", summary.abandoned));
            }
            eprintln!("{line}");
        }
        OutputFormat::Json => {
            let v = serde_json::json!({ "summary": summary });
            if let Ok(json) = serde_json::to_string(&v) {
                eprintln!("{json}");
            }
        }
    }
}

pub fn print_error(format: OutputFormat, message: &str) {
    match format {
        OutputFormat::Text => eprintln!("error: {message}"),
        OutputFormat::Json => {
            let err = serde_json::json!({"error": message});
            if let Ok(json) = serde_json::to_string(&err) {
                eprintln!("{json}");
            }
        }
    }
}
