//! JSON convenience layer over an HTTP transport.
//!
//! # Overview
//! Builds JSON requests (`Accept: application/json`, optional form-encoded
//! query string, raw or JSON body), hands them to a `Transport`, and parses
//! the reply into a `Response` that carries either the payload or the
//! server's structured `HttpError`.
//!
//! # Design
//! - Request assembly is a pure function (`build_request`); misuse is
//!   reported there as `UsageError`, before any I/O.
//! - The returned future resolves to `FetchError` only when the exchange
//!   itself fails. Non-2xx statuses are data, not errors.
//! - `Transport` is the only seam to the network. `UreqTransport` is the
//!   default; anything that can execute a `TransportRequest` can replace it.
//! - No retries, caching or logging subscriber of its own.
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use json_fetch::{JsonClient, RequestConfig};
//!
//! let client: JsonClient = JsonClient::default();
//! let config = RequestConfig::new().search("q", "a b");
//! let response = client
//!     .get_json::<serde_json::Value>("https://api.example.com/items", Some(config))?
//!     .await?;
//! match response.payload {
//!     Ok(items) => println!("{items}"),
//!     Err(error) => eprintln!("{}: {:?}", error.code, error.errors),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod request;
pub mod response;
pub mod transport;

pub use client::{delete_json, get_json, post_json, put_json, request_json, JsonClient};
pub use config::RequestConfig;
pub use error::{FetchError, UsageError};
pub use http::{HttpMethod, RequestMode, TransportRequest, TransportResponse};
pub use request::build_request;
pub use response::{HttpError, Response};
pub use transport::{Transport, TransportConfig, UreqTransport};
