//! CLI error types with miette diagnostics.
//!
//! Maps configuration, manifest, and engine failures into user-facing
//! errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use lmsync_config::ConfigError;
use lmsync_core::CoreError;

/// Exit codes for process termination; zero is success.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const CONNECTION: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("could not load manifest '{path}'")]
    #[diagnostic(
        code(lmsync::manifest),
        help("Check the manifest syntax and resource fields.")
    )]
    Manifest {
        path: String,
        #[source]
        source: ConfigError,
    },

    #[error("could not load configuration")]
    #[diagnostic(
        code(lmsync::config),
        help(
            "Expected at: {path}\n\
             Each [accounts.<name>] needs access_id plus an access key from\n\
             access_key_env, the system keyring, or access_key."
        )
    )]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },

    #[error("could not open account connections")]
    #[diagnostic(
        code(lmsync::connection),
        help("Check the endpoint URL and TLS settings for each account profile.")
    )]
    Connection(#[source] CoreError),

    #[error("{failed} of {total} resources failed")]
    #[diagnostic(
        code(lmsync::partial_failure),
        help("Resources after a failed one still ran; rerun with -v for detail.")
    )]
    ResourcesFailed { failed: usize, total: usize },
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Manifest { .. } => exit_code::USAGE,
            Self::Config { .. } => exit_code::CONFIG,
            Self::Connection(_) => exit_code::CONNECTION,
            Self::ResourcesFailed { .. } => exit_code::GENERAL,
        }
    }
}
