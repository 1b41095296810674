//! The seam between request assembly and the HTTP client that does the I/O.
//!
//! # Design
//! `Transport` takes a `TransportRequest` and resolves to a raw
//! `TransportResponse`. Status codes are data at this level: a transport only
//! fails when it cannot complete the exchange. `UreqTransport` is the default
//! implementation; tests substitute in-memory transports.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tracing::trace;
use ureq::typestate::{WithBody, WithoutBody};
use ureq::{Agent, RequestBuilder, ResponseExt};

use crate::http::{find_header, HttpMethod, TransportRequest, TransportResponse};

/// An HTTP client capable of executing one request.
pub trait Transport {
    type Error: std::error::Error + Send + Sync + 'static;

    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, Self::Error>> + Send;
}

/// Settings for the default transport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Whole-request timeout in seconds. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
    /// Sent as `User-Agent` unless the request sets one.
    pub user_agent: Option<String>,
}

impl TransportConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// `Transport` backed by a `ureq` agent.
///
/// `ureq` is blocking. Inside a tokio runtime each exchange runs on the
/// blocking pool; under any other executor it runs inline on the polling
/// thread, so the future completes on its first poll.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
    user_agent: Option<String>,
}

impl UreqTransport {
    pub fn new(config: TransportConfig) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout())
            .build()
            .new_agent();
        Self {
            agent,
            user_agent: config.user_agent,
        }
    }

    /// Wrap an agent configured elsewhere. The agent should be built with
    /// `http_status_as_error(false)`, otherwise non-2xx responses surface as
    /// transport failures.
    pub fn from_agent(agent: Agent) -> Self {
        Self {
            agent,
            user_agent: None,
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(TransportConfig::default())
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl Transport for UreqTransport {
    type Error = ureq::Error;

    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, Self::Error>> + Send {
        let agent = self.agent.clone();
        let user_agent = self.user_agent.clone();
        async move {
            let Ok(handle) = tokio::runtime::Handle::try_current() else {
                trace!("no tokio runtime, sending inline");
                return execute(&agent, request, user_agent.as_deref());
            };
            let joined = handle
                .spawn_blocking(move || execute(&agent, request, user_agent.as_deref()))
                .await;
            match joined {
                Ok(result) => result,
                Err(join) if join.is_panic() => std::panic::resume_unwind(join.into_panic()),
                Err(join) => Err(ureq::Error::Io(std::io::Error::other(join))),
            }
        }
    }
}

fn execute(
    agent: &Agent,
    request: TransportRequest,
    user_agent: Option<&str>,
) -> Result<TransportResponse, ureq::Error> {
    let TransportRequest {
        method,
        uri,
        mode: _,
        mut headers,
        body,
        json,
    } = request;

    // json wins over body when both are present
    let payload = match (json, body) {
        (Some(json), _) => {
            if find_header(&headers, "content-type").is_none() {
                headers.push(("Content-Type".to_string(), "application/json".to_string()));
            }
            Some(json.to_string())
        }
        (None, body) => body,
    };
    if let Some(user_agent) = user_agent {
        if find_header(&headers, "user-agent").is_none() {
            headers.push(("User-Agent".to_string(), user_agent.to_string()));
        }
    }

    let mut response = match method {
        HttpMethod::Get => send_without_body(agent.get(&uri), &headers, payload)?,
        HttpMethod::Head => send_without_body(agent.head(&uri), &headers, payload)?,
        HttpMethod::Delete => send_without_body(agent.delete(&uri), &headers, payload)?,
        HttpMethod::Post => send_with_body(agent.post(&uri), &headers, payload)?,
        HttpMethod::Put => send_with_body(agent.put(&uri), &headers, payload)?,
    };

    let status = response.status().as_u16();
    // final URI once redirects have been followed
    let url = response.get_uri().to_string();
    let response_headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    let body = response.body_mut().read_to_string()?;

    Ok(TransportResponse {
        status,
        url,
        headers: response_headers,
        body,
    })
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send_without_body(
    builder: RequestBuilder<WithoutBody>,
    headers: &[(String, String)],
    payload: Option<String>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    let builder = with_headers(builder, headers);
    match payload {
        Some(payload) => builder.force_send_body().send(payload.as_bytes()),
        None => builder.call(),
    }
}

fn send_with_body(
    builder: RequestBuilder<WithBody>,
    headers: &[(String, String)],
    payload: Option<String>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    let builder = with_headers(builder, headers);
    match payload {
        Some(payload) => builder.send(payload.as_bytes()),
        None => builder.send_empty(),
    }
}
