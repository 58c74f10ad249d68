//! HTTP transport implementation using `reqwest`.

use std::time::Duration;

use crate::{HttpResponse, HttpTransport, TransportError};

/// An [`HttpTransport`] that sends requests with a shared `reqwest::Client`.
///
/// Request URLs are `base_url` + `path`, with exactly one `/` between them.
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    /// Builds a transport rooted at `base_url`.
    ///
    /// With `timeout: None` a hung request waits indefinitely.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Request(error_chain(&e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::debug!(%base_url, ?timeout, "reqwest transport ready");

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Returns the endpoint root requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn map_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            return TransportError::Timeout(self.timeout.unwrap_or_default());
        }
        if e.is_builder() {
            return TransportError::InvalidUrl(error_chain(&e));
        }
        if e.is_connect() {
            return TransportError::Connect(error_chain(&e));
        }
        TransportError::Request(error_chain(&e))
    }
}

impl HttpTransport for ReqwestTransport {
    async fn post_json(
        &self,
        path: &str,
        body: Vec<u8>,
    ) -> Result<HttpResponse, TransportError> {
        let url = self.url_for(path);
        tracing::debug!(%url, "sending request");

        let resp = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = resp.status();
        let status_text = reason_phrase(&resp);
        let body = resp.bytes().await.map_err(|e| self.map_error(e))?;

        tracing::debug!(%url, status = status.as_u16(), "response received");

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text,
            body: body.to_vec(),
        })
    }
}

/// The reason phrase the server actually sent, falling back to the
/// canonical one for the status code.
///
/// hyper only records the phrase as a `ReasonPhrase` extension when it
/// differs from the canonical phrase, so a missing extension means the
/// canonical phrase is the one on the wire (or the server sent none).
fn reason_phrase(resp: &reqwest::Response) -> String {
    resp.extensions()
        .get::<hyper::ext::ReasonPhrase>()
        .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned())
        .or_else(|| resp.status().canonical_reason().map(str::to_string))
        .unwrap_or_default()
}

/// Joins an error with all of its sources, so "error sending request"
/// also says why (connection refused, dns error, ...).
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
