//! Per-request configuration supplied by the caller.
//!
//! # Precedence
//! - `headers` are merged over the default `Accept: application/json`. A
//!   caller header whose name matches case-insensitively replaces the default.
//! - Setting the same header twice keeps the last value, in the position of
//!   the first.
//! - `search` is consumed by the builder and never reaches the transport.
//! - `body` and `json` are forwarded verbatim. When both are set, the
//!   transport decides which one is sent.

use serde::Serialize;

/// Caller-supplied options for one request. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestConfig {
    pub headers: Vec<(String, String)>,
    pub search: Option<Vec<(String, String)>>,
    pub body: Option<String>,
    pub json: Option<serde_json::Value>,
}

impl RequestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header, replacing any existing header with the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(&name))
        {
            Some(existing) => existing.1 = value,
            None => self.headers.push((name, value)),
        }
        self
    }

    /// Add a query parameter. Parameters are encoded in insertion order.
    pub fn search(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.search
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn json(mut self, json: serde_json::Value) -> Self {
        self.json = Some(json);
        self
    }

    /// Serialize `payload` and use it as the JSON body.
    pub fn json_from<T>(self, payload: &T) -> Result<Self, serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        Ok(self.json(serde_json::to_value(payload)?))
    }
}
