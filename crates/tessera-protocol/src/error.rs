//! Error types for the protocol layer.

/// Errors that can occur while turning bodies into bytes and back.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// A request body could not be serialized.
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// A response body was not the JSON we expected: malformed, truncated,
    /// or with fields of the wrong type.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
