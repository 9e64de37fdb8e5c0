//! Error types for the protocol layer.
//!
//! Each crate in tablebot defines its own error enum. A `ProtocolError`
//! always means the problem is in turning values into bytes or back,
//! never in reaching the server.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a request body into bytes).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning a response body into a typed value).
    ///
    /// Common causes: the server changed a field's type, a required
    /// identifier is missing, or the body is not JSON at all (an HTML
    /// error page from a proxy, for example).
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The message decoded but violates a protocol rule, e.g. a raise
    /// decision without an amount.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
