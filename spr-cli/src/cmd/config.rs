use std::time::Duration;

use spr_core::ParamOverrides;
use spr_exec::{DispatchConfig, TransportConfig};

use crate::{DispatchArgs, TransportArgs};

/// Parses `NAME=VALUE`. The value may itself contain `=`.
pub fn parse_param(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("invalid --param {s:?}: expected NAME=VALUE")),
    }
}

/// Parses `Name: value`, trimming whitespace around both parts.
pub fn parse_header(s: &str) -> Result<(String, String), String> {
    match s.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("invalid --header {s:?}: expected 'Name: value'")),
    }
}

pub fn build_overrides(params: &[String]) -> Result<ParamOverrides, String> {
    params.iter().map(|s| parse_param(s)).collect::<Result<Vec<_>, _>>().map(ParamOverrides::from_iter)
}

pub fn validate_host(host: &str) -> Result<(), String> {
    let url = url::Url::parse(host).map_err(|e| format!("invalid host {host:?}: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("invalid host {host:?}: unsupported scheme {other:?}")),
    }
}

pub fn build_transport_config(args: &TransportArgs) -> Result<TransportConfig, String> {
    let proxy = if args.no_proxy {
        None
    } else {
        url::Url::parse(&args.proxy).map_err(|e| format!("invalid --proxy {:?}: {e}", args.proxy))?;
        Some(args.proxy.clone())
    };
    let headers = args
        .headers
        .iter()
        .map(|h| parse_header(h))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TransportConfig {
        proxy,
        accept_invalid_certs: !args.verify_tls,
        timeout: Duration::from_millis(args.timeout),
        follow_redirects: args.follow_redirects,
        max_redirects: args.max_redirects,
        headers,
        ..Default::default()
    })
}

pub fn build_dispatch_config(args: &DispatchArgs) -> Result<DispatchConfig, String> {
    let config = DispatchConfig {
        workers: args.workers,
        queue_capacity: args.queue_capacity,
    };
    config.validate().map_err(|e| e.to_string())?;
    if args.max_concurrency == 0 {
        return Err("--max-concurrency must be at least 1".to_string());
    }
    Ok(config)
}
