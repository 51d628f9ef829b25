use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use spr_core::Task;

use crate::executor::result::FailureKind;

pub const DEFAULT_PROXY: &str = "http://127.0.0.1:8080";

#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("timeout")]
    Timeout,
    #[error("connect/dns/tls error: {0}")]
    Network(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid transport configuration: {0}")]
    Config(String),
    #[error("http error: {0}")]
    Other(String),
}

impl TransportError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Timeout => FailureKind::Timeout,
            Self::Network(_) => FailureKind::Network,
            Self::InvalidUrl(_) => FailureKind::InvalidUrl,
            Self::Config(_) | Self::Other(_) => FailureKind::Other,
        }
    }
}

/// Performs one request and reports the response status.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, task: &Task) -> Result<u16, TransportError>;
}

#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Proxy used for both HTTP and HTTPS. `None` sends directly and ignores
    /// proxy environment variables.
    pub proxy: Option<String>,
    /// Skip TLS certificate verification. On by default: the usual peer is an
    /// intercepting proxy presenting its own certificate.
    pub accept_invalid_certs: bool,
    pub timeout: Duration,
    pub follow_redirects: bool,
    pub max_redirects: usize,
    /// Extra headers sent with every request.
    pub headers: Vec<(String, String)>,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            proxy: Some(DEFAULT_PROXY.to_string()),
            accept_invalid_certs: true,
            timeout: Duration::from_secs(30),
            follow_redirects: false,
            max_redirects: 5,
            headers: Vec::new(),
            user_agent: concat!("spr/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let redirect = if config.follow_redirects {
            reqwest::redirect::Policy::limited(config.max_redirects)
        } else {
            reqwest::redirect::Policy::none()
        };

        let mut builder = reqwest::Client::builder()
            .redirect(redirect)
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(header_map(&config.headers)?);

        builder = match &config.proxy {
            Some(proxy) => builder.proxy(
                reqwest::Proxy::all(proxy.as_str())
                    .map_err(|e| TransportError::Config(format!("proxy {proxy}: {e}")))?,
            ),
            None => builder.no_proxy(),
        };

        let client = builder
            .build()
            .map_err(|e| TransportError::Config(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, task: &Task) -> Result<u16, TransportError> {
        let method = reqwest::Method::from_bytes(task.method.as_bytes())
            .map_err(|e| TransportError::Other(e.to_string()))?;
        let url = url::Url::parse(&task.url)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {e}", task.url)))?;

        let resp = self
            .client
            .request(method, url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Ok(resp.status().as_u16())
    }
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::new();
    for (k, v) in headers {
        let name = HeaderName::from_bytes(k.as_bytes())
            .map_err(|e| TransportError::Config(format!("header name {k:?}: {e}")))?;
        let value = HeaderValue::from_str(v)
            .map_err(|e| TransportError::Config(format!("header value for {k}: {e}")))?;
        map.append(name, value);
    }
    Ok(map)
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        return TransportError::Timeout;
    }
    if e.is_connect() || e.is_request() {
        return TransportError::Network(e.to_string());
    }
    if e.is_builder() {
        return TransportError::InvalidUrl(e.to_string());
    }
    TransportError::Other(e.to_string())
}
