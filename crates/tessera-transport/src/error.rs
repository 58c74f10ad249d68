use std::time::Duration;

/// Errors raised when a remote call could not complete.
///
/// A response with a non-2xx status is NOT a transport error: the call
/// completed and the caller inspects [`HttpResponse::status`](crate::HttpResponse).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The remote host could not be reached (offline, DNS, refused).
    #[error("connection failed: {0}")]
    Connect(String),

    /// The configured request timeout elapsed.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The request was sent but failed before a full response arrived.
    #[error("request failed: {0}")]
    Request(String),

    /// The base URL and path did not form a valid URL.
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),
}
