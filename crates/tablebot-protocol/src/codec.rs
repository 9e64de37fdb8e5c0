//! Codec trait and implementations for request and response bodies.
//!
//! The transport layer never touches `serde_json` directly: it hands
//! bodies to a [`Codec`]. Today the game service only speaks JSON, so
//! [`JsonCodec`] is the only implementation, but tests and alternative
//! transports can plug in their own.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `Send + Sync + 'static` because the codec lives inside the HTTP client,
/// which the runtime holds for its whole lifetime.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or
    /// don't match the expected shape.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// ## Example
///
/// ```rust
/// use tablebot_protocol::{Codec, JsonCodec, Phase, Snapshot};
///
/// let codec = JsonCodec;
/// let snapshot: Snapshot = codec
///     .decode(br#"{"handId":"h1","phase":"flop","yourChips":950}"#)
///     .unwrap();
/// assert_eq!(snapshot.phase, Phase::Flop);
/// assert_eq!(snapshot.own_stack, 950);
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
