use serde::{Deserialize, Serialize};

/// Unified error type for all Upmind API operations.
///
/// Every facade call resolves to `Result<T, UpmindError>`; no failure mode
/// panics or escapes as anything else. Variants carry enough context
/// (HTTP status, parsed message, raw body) for the UI to show an
/// actionable error.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on
/// retry:
/// - [`Network`](Self::Network): transport-level failure before a status
///   code was observed
/// - [`Timeout`](Self::Timeout): the request timed out
/// - [`Server`](Self::Server): HTTP 5xx from the platform
///
/// The client retries these with linear backoff; see
/// [`RetryPolicy`](crate::RetryPolicy). Client errors (4xx) are never
/// retried.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum UpmindError {
    /// A request payload failed local validation. No network call was made.
    ///
    /// The message lists every offending field, not just the first.
    InvalidRequest {
        /// Description of all missing/invalid fields.
        message: String,
    },

    /// The platform rejected the request (HTTP 4xx). Not retried.
    Api {
        /// HTTP status code.
        status: u16,
        /// Parsed error message (JSON `message`/`error` field, raw body
        /// text, or the canonical status reason).
        message: String,
        /// Raw error body, if one was returned.
        raw_body: Option<String>,
    },

    /// The platform failed to serve the request (HTTP 5xx). Retried.
    Server {
        /// HTTP status code.
        status: u16,
        /// Parsed error message.
        message: String,
    },

    /// A network-level error occurred before any status code was observed
    /// (DNS failure, connection refused, etc.). Retried.
    Network {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out. Retried.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// A response that must be structured JSON could not be parsed.
    ///
    /// Plain passthrough responses degrade to raw text instead of raising
    /// this; it only fires when the caller needs structure.
    Parse {
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    Serialization {
        /// Details about the serialization failure.
        detail: String,
    },
}

impl UpmindError {
    /// Whether this error is transient and worth retrying.
    ///
    /// Retries apply to transport failures and server errors only; 4xx
    /// responses and local validation failures return immediately.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Timeout { .. } | Self::Server { .. }
        )
    }

    /// Whether this is expected behavior (bad user input, remote
    /// rejection) rather than an infrastructure fault, for log levelling.
    ///
    /// `true` should log at `warn`, `false` at `error`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::InvalidRequest { .. } | Self::Api { .. })
    }

    /// HTTP status code associated with this error, if one was observed.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for UpmindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest { message } => write!(f, "Invalid request: {message}"),
            Self::Api {
                status, message, ..
            } => write!(f, "API error ({status}): {message}"),
            Self::Server { status, message } => write!(f, "Server error ({status}): {message}"),
            Self::Network { detail } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "Request timeout: {detail}"),
            Self::Parse { detail } => write!(f, "Parse error: {detail}"),
            Self::Serialization { detail } => write!(f, "Serialization error: {detail}"),
        }
    }
}

impl std::error::Error for UpmindError {}

/// Convenience type alias for `Result<T, UpmindError>`.
pub type ApiResult<T> = std::result::Result<T, UpmindError>;
