//! HTTP transport
//!
//! Provider adapters describe a request as plain data; a `Transport` performs
//! it. `HttpTransport` is the reqwest implementation and builds a fresh client
//! per call so the proxy and timeout of that call apply to it alone.

use std::error::Error as _;
use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::TransportError;

/// A JSON POST request, ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Endpoint URL without query string; safe to log
    pub url: String,

    /// Query parameters, which may carry the credential
    pub query: Vec<(String, String)>,

    /// Extra headers, which may carry the credential
    pub headers: Vec<(String, String)>,

    pub body: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Per-call network settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOptions {
    pub timeout: Duration,
    pub proxy: Option<String>,
}

pub trait Transport {
    /// Send one request and return the status and full body.
    fn post_json(
        &self,
        request: &HttpRequest,
        options: &CallOptions,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// reqwest-backed transport
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpTransport;

impl HttpTransport {
    fn client(options: &CallOptions) -> Result<reqwest::Client, TransportError> {
        let mut builder = reqwest::Client::builder()
            .timeout(options.timeout)
            .user_agent(concat!("shipnote/", env!("CARGO_PKG_VERSION")));

        // Only the proxy given for this call is used; environment proxies are ignored.
        match options.proxy.as_deref() {
            Some(url) => {
                let proxy = reqwest::Proxy::all(url).map_err(|e| TransportError::Proxy {
                    url: url.to_string(),
                    message: describe(&e),
                })?;
                debug!("routing request through proxy {}", proxy_host(url));
                builder = builder.proxy(proxy);
            }
            None => builder = builder.no_proxy(),
        }

        builder
            .build()
            .map_err(|e| TransportError::Client(describe(&e)))
    }
}

impl Transport for HttpTransport {
    async fn post_json(
        &self,
        request: &HttpRequest,
        options: &CallOptions,
    ) -> Result<HttpResponse, TransportError> {
        let http = Self::client(options)?;

        let mut builder = http.post(&request.url).json(&request.body);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(options.timeout)
            } else {
                TransportError::Connect(describe(&e))
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(options.timeout)
            } else {
                TransportError::Body(describe(&e))
            }
        })?;
        trace!(status, body = %body, "provider response");

        Ok(HttpResponse { status, body })
    }
}

/// Host and port of a proxy URL, without any `user:pass@` part.
fn proxy_host(url: &str) -> String {
    let Ok(parsed) = reqwest::Url::parse(url) else {
        return "(unparseable url)".to_string();
    };
    match (parsed.host_str(), parsed.port_or_known_default()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => "(no host)".to_string(),
    }
}

/// reqwest's Display omits the cause chain, which is where the useful part
/// (connection refused, dns error, ...) lives.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
