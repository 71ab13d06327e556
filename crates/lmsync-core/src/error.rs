// ── Core error types ──
//
// Domain-level errors from the reconciliation engine. Transport and
// response-validation failures from lmsync-api pass through with the
// raw body intact so the CLI can surface the failing operation verbatim.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The registry was queried before `open_all`, or for an account it
    /// never opened. A sequencing bug in the caller, not a remote failure.
    #[error("No open connection for account '{account}'")]
    ConnectionNotFound { account: String },

    /// A referenced collector does not exist. Collectors are never
    /// created by the engine; they must exist before a device names one.
    #[error("Collector not found: '{description}'")]
    CollectorNotFound { description: String },

    /// A declared resource failed static validation before any network
    /// activity.
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Error from the REST gateway (transport, invalid response, parse).
    #[error(transparent)]
    Api(#[from] lmsync_api::Error),
}
