use std::sync::Arc;

use spr_core::{enumerate_with, parse_description_str, DocumentFormat, EnumerateOptions, ParseError};
use spr_exec::{
    shutdown_channel, ConcurrencyBudget, Dispatcher, NoOpSink, ReqwestTransport, ResultSink,
    StdoutSink, TransportError,
};
use tracing::{info, warn};

use super::config::{
    build_dispatch_config, build_overrides, build_transport_config, validate_host,
};
use super::progress::ProgressSink;
use crate::exit_codes;
use crate::output::{print_error, print_summary, print_task};
use crate::Cli;

pub async fn run_cmd(cli: Cli) -> i32 {
    let format = cli.output.format;
    let path = &cli.description;

    let content = match std::fs::read_to_string(path) {
        Ok(v) => v,
        Err(e) => {
            print_error(format, &format!("failed to read {}: {e}", path.display()));
            return exit_codes::INVALID_INPUT;
        }
    };

    let parsed = match parse_description_str(&content, DocumentFormat::Auto) {
        Ok(p) => p,
        Err(ParseError::Json(e)) => {
            print_error(format, &format!("JSON parse failed: {e}"));
            return exit_codes::INVALID_INPUT;
        }
        Err(ParseError::Yaml(e)) => {
            print_error(format, &format!("YAML parse failed: {e}"));
            return exit_codes::INVALID_INPUT;
        }
        Err(e) => {
            print_error(format, &format!("{}: {e}", path.display()));
            return exit_codes::INVALID_INPUT;
        }
    };
    info!(
        format = ?parsed.format,
        paths = parsed.description.paths.len(),
        operations = parsed.description.operation_count(),
        "description loaded"
    );

    if let Err(e) = validate_host(&cli.host) {
        print_error(format, &e);
        return exit_codes::INVALID_INPUT;
    }
    let overrides = match build_overrides(&cli.params) {
        Ok(o) => o,
        Err(e) => {
            print_error(format, &e);
            return exit_codes::INVALID_INPUT;
        }
    };

    let options = EnumerateOptions {
        int_fuzzing: cli.int_fuzzing,
    };
    let tasks = enumerate_with(&parsed.description, &cli.host, &overrides, options);

    if cli.dry_run {
        if !cli.output.quiet {
            for task in tasks {
                if let Err(e) = print_task(format, &task) {
                    warn!(error = %e, "stdout closed, stopping dry run");
                    break;
                }
            }
        }
        return exit_codes::SUCCESS;
    }

    let transport_config = match build_transport_config(&cli.transport) {
        Ok(c) => c,
        Err(e) => {
            print_error(format, &e);
            return exit_codes::INVALID_INPUT;
        }
    };
    let dispatch_config = match build_dispatch_config(&cli.dispatch) {
        Ok(c) => c,
        Err(e) => {
            print_error(format, &e);
            return exit_codes::INVALID_INPUT;
        }
    };
    let transport = match ReqwestTransport::new(&transport_config) {
        Ok(t) => t,
        Err(e @ TransportError::Config(_)) => {
            print_error(format, &e.to_string());
            return exit_codes::INVALID_INPUT;
        }
        Err(e) => {
            print_error(format, &format!("failed to build HTTP client: {e}"));
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let sink: Arc<dyn ResultSink> = if cli.output.progress {
        let total = enumerate_with(&parsed.description, &cli.host, &overrides, options).count();
        Arc::new(ProgressSink::new(total))
    } else if cli.output.quiet {
        Arc::new(NoOpSink)
    } else {
        Arc::new(StdoutSink::new(format.into()))
    };
    let dispatcher = Dispatcher::new(
        dispatch_config,
        Arc::new(transport),
        ConcurrencyBudget::new(cli.dispatch.max_concurrency),
        sink,
    );

    let (cancel_tx, cancel) = shutdown_channel();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, stopping after in-flight requests");
            cancel_tx.shutdown();
        }
    });

    let result = dispatcher.run_until(tasks, cancel).await;
    interrupt.abort();

    match result {
        Ok(summary) => {
            print_summary(format, &summary);
            exit_codes::SUCCESS
        }
        Err(e) => {
            print_error(format, &format!("dispatch failed: {e}"));
            exit_codes::RUNTIME_ERROR
        }
    }
}
