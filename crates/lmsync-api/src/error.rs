use thiserror::Error;

/// Top-level error type for the `lmsync-api` crate.
///
/// Covers every failure mode of the gateway: transport, URL
/// construction, response validation, and deserialization.
/// `lmsync-core` maps these into domain-level diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The backend rejected the request or returned an unexpected shape.
    ///
    /// `status` is the envelope status when the body parsed, otherwise
    /// the HTTP status. The raw body is kept so callers can surface it
    /// verbatim; the gateway never retries or reinterprets.
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error carries a "not found" status.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }
}
