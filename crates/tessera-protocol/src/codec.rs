//! Codec trait and the JSON implementation used for request/response bodies.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes request bodies and decodes response bodies.
///
/// The session and registration layers are written against this trait
/// rather than `serde_json` directly, so a service speaking another body
/// format only needs a new implementation.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a request body.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if the value cannot be represented.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes a response body.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the bytes are malformed or do
    /// not match `T`.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

/// A [`Codec`] for `application/json` bodies.
///
/// ```rust
/// use tessera_protocol::{Codec, JsonCodec, LoginReply, LoginRequest};
///
/// let codec = JsonCodec;
/// let body = codec
///     .encode(&LoginRequest { email: "t@e.com".into(), password: "pw".into() })
///     .unwrap();
/// assert_eq!(body, br#"{"email":"t@e.com","password":"pw"}"#);
///
/// let reply: LoginReply = codec.decode(br#"{"token":"x"}"#).unwrap();
/// assert_eq!(reply.token.as_deref(), Some("x"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
