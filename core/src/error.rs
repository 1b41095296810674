//! Error types for JSON requests.
//!
//! # Design
//! Misuse of the API and failures of the exchange travel on separate
//! channels. `UsageError` is returned while the request is being assembled,
//! before any future exists, so it can never be confused with I/O trouble.
//! `FetchError` is what the returned future resolves to when the exchange
//! itself fails. Non-2xx responses are neither: they arrive as data inside
//! `Response`.

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The caller asked for something the builder cannot assemble.
#[derive(Debug, Error)]
pub enum UsageError {
    /// `search` was supplied for a URI that already carries a query string.
    #[error("cannot specify 'search' in request config when URI already contains search params: {uri:?}")]
    SearchWithQuery { uri: String },

    /// The `search` pairs could not be form-encoded.
    #[error("failed to encode search params: {0}")]
    EncodeSearch(#[from] serde_urlencoded::ser::Error),
}

/// The exchange with the transport failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The transport could not complete the exchange. The transport's own
    /// error is kept as-is and can be recovered with `transport_error`.
    #[error(transparent)]
    Transport(BoxError),

    /// A success response body was not valid JSON for the requested type.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl FetchError {
    pub(crate) fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        FetchError::Transport(Box::new(err))
    }

    /// Borrow the underlying transport error as its concrete type.
    pub fn transport_error<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FetchError::Transport(err) => err.downcast_ref::<E>(),
            FetchError::Decode(_) => None,
        }
    }
}
