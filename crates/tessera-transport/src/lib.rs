//! Transport abstraction layer for Tessera.
//!
//! Provides the [`HttpTransport`] trait: the single port through which the
//! session and registration layers talk to the remote authentication
//! service. Everything above this crate only ever sees an [`HttpResponse`]
//! or a [`TransportError`].
//!
//! # Feature Flags
//!
//! - `reqwest` (default): HTTP transport via `reqwest`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "reqwest")]
mod reqwest_transport;

pub use error::TransportError;
#[cfg(feature = "reqwest")]
pub use reqwest_transport::ReqwestTransport;

use std::sync::Arc;

/// A completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Numeric status code (e.g. 200, 401).
    pub status: u16,

    /// Reason phrase for the status (e.g. "Unauthorized"). May be empty.
    pub status_text: String,

    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response with the given status, reason phrase and body.
    pub fn new(
        status: u16,
        status_text: impl Into<String>,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// Returns `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends JSON requests to the remote authentication service.
///
/// `path` is relative to whatever endpoint root the implementation was
/// configured with (e.g. `/auth/login`).
pub trait HttpTransport: Send + Sync + 'static {
    /// POSTs a JSON body and waits for the full response.
    ///
    /// Returns `Err` only when the exchange itself could not complete.
    async fn post_json(
        &self,
        path: &str,
        body: Vec<u8>,
    ) -> Result<HttpResponse, TransportError>;
}

impl<T: HttpTransport> HttpTransport for Arc<T> {
    async fn post_json(
        &self,
        path: &str,
        body: Vec<u8>,
    ) -> Result<HttpResponse, TransportError> {
        (**self).post_json(path, body).await
    }
}
