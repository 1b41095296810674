//! Typed result of a JSON request.

use serde::{Deserialize, Serialize};

/// Structured error body of a non-success response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpError {
    /// Application error code. Usually the HTTP status, but servers may use
    /// their own numbering.
    pub code: i64,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Outcome of one request: the parsed payload on 2xx, the structured error
/// otherwise. Callers branch on `payload` rather than catching an error for
/// ordinary HTTP failures.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<D> {
    pub status: u16,
    /// URL the response came from, after any redirects.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub payload: Result<D, HttpError>,
}

impl<D> Response<D> {
    pub fn is_ok(&self) -> bool {
        self.payload.is_ok()
    }

    pub fn data(&self) -> Option<&D> {
        self.payload.as_ref().ok()
    }

    pub fn error(&self) -> Option<&HttpError> {
        self.payload.as_ref().err()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        crate::http::find_header(&self.headers, name)
    }

    pub fn into_result(self) -> Result<D, HttpError> {
        self.payload
    }
}
