//! Request and response values exchanged with a transport.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! builder produces a `TransportRequest`, a `Transport` executes it and hands
//! back a `TransportResponse`, and `TransportResponse::json` turns that into a
//! typed `Response`. Nothing in here performs I/O.
//!
//! Headers are kept as ordered `(name, value)` pairs so the wire order matches
//! the order the caller supplied them in.

use std::fmt;

use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::response::{HttpError, Response};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Head,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Head => "HEAD",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cross-origin policy requested from the transport.
///
/// Only browser-backed transports act on this; native transports carry it
/// through untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestMode {
    #[default]
    Cors,
    NoCors,
    SameOrigin,
}

/// A fully assembled request, ready to hand to a `Transport`.
///
/// `body` and `json` are forwarded exactly as the caller supplied them; the
/// transport decides how to serialize them.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub uri: String,
    pub mode: RequestMode,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub json: Option<serde_json::Value>,
}

impl TransportRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A response as returned by a `Transport`, before JSON parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    /// URL the response came from, after any redirects.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Parse the body as JSON into a `Response`.
    ///
    /// A 2xx body is deserialized into `D`; an empty body is read as `null`.
    /// Any other status yields the error branch: the body is read as an
    /// `HttpError`, and a body of some other shape is kept verbatim as the
    /// single error message under the response status.
    pub fn json<D: DeserializeOwned>(self) -> Result<Response<D>, FetchError> {
        let payload = if self.is_success() {
            let text = if self.body.trim().is_empty() {
                "null"
            } else {
                self.body.as_str()
            };
            Ok(serde_json::from_str::<D>(text).map_err(FetchError::Decode)?)
        } else {
            Err(parse_http_error(self.status, &self.body))
        };

        Ok(Response {
            status: self.status,
            url: self.url,
            headers: self.headers,
            payload,
        })
    }
}

fn parse_http_error(status: u16, body: &str) -> HttpError {
    if let Ok(error) = serde_json::from_str::<HttpError>(body) {
        return error;
    }
    let errors = match body.trim() {
        "" => Vec::new(),
        text => vec![text.to_string()],
    };
    HttpError {
        code: i64::from(status),
        errors,
    }
}

pub(crate) fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
