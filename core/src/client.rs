//! JSON request entry points.
//!
//! # Design
//! Every entry point returns in two stages. Assembling the request happens
//! immediately and reports `UsageError`; only a well-formed request yields a
//! future, and that future resolves to the transport's outcome. A call like
//! `client.get_json::<Item>(uri, None)?.await?` therefore separates "called
//! wrong" from "the exchange failed" at the type level.
//!
//! `JsonClient` holds nothing but its transport, so calls never share state.

use std::future::Future;

use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::config::RequestConfig;
use crate::error::{FetchError, UsageError};
use crate::http::{HttpMethod, TransportRequest};
use crate::request::build_request;
use crate::response::Response;
use crate::transport::{Transport, UreqTransport};

/// Issues JSON requests through a `Transport`.
#[derive(Debug, Clone, Default)]
pub struct JsonClient<T = UreqTransport> {
    transport: T,
}

impl<T: Transport> JsonClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Build a request for `method` and, if it is valid, return the future
    /// that sends it.
    pub fn request_json<'a, D>(
        &'a self,
        method: HttpMethod,
        uri: &str,
        config: Option<RequestConfig>,
    ) -> Result<impl Future<Output = Result<Response<D>, FetchError>> + 'a, UsageError>
    where
        D: DeserializeOwned + 'a,
    {
        let request = build_request(method, uri, config)?;
        Ok(self.dispatch(request))
    }

    pub fn get_json<'a, D>(
        &'a self,
        uri: &str,
        config: Option<RequestConfig>,
    ) -> Result<impl Future<Output = Result<Response<D>, FetchError>> + 'a, UsageError>
    where
        D: DeserializeOwned + 'a,
    {
        self.request_json(HttpMethod::Get, uri, config)
    }

    pub fn post_json<'a, D>(
        &'a self,
        uri: &str,
        config: Option<RequestConfig>,
    ) -> Result<impl Future<Output = Result<Response<D>, FetchError>> + 'a, UsageError>
    where
        D: DeserializeOwned + 'a,
    {
        self.request_json(HttpMethod::Post, uri, config)
    }

    pub fn put_json<'a, D>(
        &'a self,
        uri: &str,
        config: Option<RequestConfig>,
    ) -> Result<impl Future<Output = Result<Response<D>, FetchError>> + 'a, UsageError>
    where
        D: DeserializeOwned + 'a,
    {
        self.request_json(HttpMethod::Put, uri, config)
    }

    pub fn delete_json<'a, D>(
        &'a self,
        uri: &str,
        config: Option<RequestConfig>,
    ) -> Result<impl Future<Output = Result<Response<D>, FetchError>> + 'a, UsageError>
    where
        D: DeserializeOwned + 'a,
    {
        self.request_json(HttpMethod::Delete, uri, config)
    }

    /// Send an already assembled request and parse the reply as JSON.
    pub async fn dispatch<D>(&self, request: TransportRequest) -> Result<Response<D>, FetchError>
    where
        D: DeserializeOwned,
    {
        let method = request.method;
        let uri = request.uri.clone();
        debug!(%method, %uri, "sending request");

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                debug!(%method, %uri, error = %err, "transport failed");
                return Err(FetchError::transport(err));
            }
        };
        trace!(%method, %uri, status = response.status, "received response");

        response.json()
    }
}

/// Like `JsonClient::request_json`, using a default `UreqTransport`.
pub fn request_json<D>(
    method: HttpMethod,
    uri: &str,
    config: Option<RequestConfig>,
) -> Result<impl Future<Output = Result<Response<D>, FetchError>>, UsageError>
where
    D: DeserializeOwned,
{
    let request = build_request(method, uri, config)?;
    Ok(async move { JsonClient::<UreqTransport>::default().dispatch(request).await })
}

pub fn get_json<D>(
    uri: &str,
    config: Option<RequestConfig>,
) -> Result<impl Future<Output = Result<Response<D>, FetchError>>, UsageError>
where
    D: DeserializeOwned,
{
    request_json(HttpMethod::Get, uri, config)
}

pub fn post_json<D>(
    uri: &str,
    config: Option<RequestConfig>,
) -> Result<impl Future<Output = Result<Response<D>, FetchError>>, UsageError>
where
    D: DeserializeOwned,
{
    request_json(HttpMethod::Post, uri, config)
}

pub fn put_json<D>(
    uri: &str,
    config: Option<RequestConfig>,
) -> Result<impl Future<Output = Result<Response<D>, FetchError>>, UsageError>
where
    D: DeserializeOwned,
{
    request_json(HttpMethod::Put, uri, config)
}

pub fn delete_json<D>(
    uri: &str,
    config: Option<RequestConfig>,
) -> Result<impl Future<Output = Result<Response<D>, FetchError>>, UsageError>
where
    D: DeserializeOwned,
{
    request_json(HttpMethod::Delete, uri, config)
}
