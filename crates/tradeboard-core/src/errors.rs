//! Error types for Tradeboard

use thiserror::Error;

/// Core errors that can occur in Tradeboard
#[derive(Debug, Error)]
pub enum Error {
    #[error("Trade API error: {0}")]
    Api(#[from] ApiClientError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors talking to the trade API
#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("Trade API unreachable at {url}")]
    Unreachable { url: String },

    #[error("Trade API request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("Trade API returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Trade API rejected the request: {}", message.as_deref().unwrap_or("no reason given"))]
    Rejected { message: Option<String> },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Response carried no data")]
    MissingData,
}

impl ApiClientError {
    /// Message the server put in a `{success:false, error}` envelope.
    ///
    /// A raw `Http` body (a proxy error page, say) is kept for logs only.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message } => message.as_deref(),
            _ => None,
        }
    }

    /// Whether the call reached the server and got an answer back
    pub fn is_server_reported(&self) -> bool {
        matches!(self, Self::Rejected { .. } | Self::Http { .. })
    }
}

/// Result type alias for Tradeboard operations
pub type Result<T> = std::result::Result<T, Error>;
