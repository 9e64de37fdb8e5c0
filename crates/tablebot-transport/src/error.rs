use tablebot_protocol::ProtocolError;

/// Errors that can occur talking to the game service.
///
/// Every remote call ends in exactly one of these. The runtime never
/// matches on messages itself; it asks [`TransportError::class`] what
/// kind of failure this was and picks a recovery from that.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The service could not be reached (DNS, refused, reset, TLS).
    #[error("network error: {0}")]
    Network(String),

    /// The request did not complete within the client timeout.
    #[error("request timed out")]
    TimedOut,

    /// The service answered with a non-success status.
    ///
    /// `message` is the `error` field of the response body when present,
    /// otherwise `HTTP <status>`.
    #[error("{message} (status {status})")]
    Status { status: u16, message: String },

    /// The response arrived but did not have the expected shape.
    #[error(transparent)]
    Decode(#[from] ProtocolError),

    /// The client could not be built (bad credential characters, bad URL).
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse classification of a [`TransportError`], used to pick a recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Unreachable or timed out. Always worth trying again next cycle.
    Network,
    /// Malformed response. Recovered exactly like `Network`.
    Decode,
    /// The server says we are not seated at any table.
    SessionLost,
    /// The server is throttling us.
    RateLimited,
    /// Any other structured rejection (illegal action, bad chat, …).
    Rejected,
}

impl TransportError {
    /// Builds a [`TransportError::Status`].
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// The HTTP status the server reported, if it reported one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Classifies this error for the recovery policy.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Network(_) | Self::TimedOut => ErrorClass::Network,
            Self::Decode(_) => ErrorClass::Decode,
            Self::Status { status: 429, .. } => ErrorClass::RateLimited,
            Self::Status {
                status: 400,
                message,
            } if message.to_lowercase().contains("not at a table") => {
                ErrorClass::SessionLost
            }
            Self::Status { .. } | Self::InvalidConfig(_) => ErrorClass::Rejected,
        }
    }

    /// Returns `true` if the server rejected a join because we are
    /// already seated. Joining is idempotent from the caller's view, so
    /// this counts as success.
    pub fn is_already_seated(&self) -> bool {
        match self {
            Self::Status { message, .. } => {
                message.to_lowercase().contains("already")
            }
            _ => false,
        }
    }
}
