//! Error types for environmental data acquisition.

use thiserror::Error;

/// Result type for environment client operations.
pub type EnvResult<T> = Result<T, EnvError>;

/// Errors that can occur while fetching environmental data.
#[derive(Debug, Error)]
pub enum EnvError {
    /// No API key was configured for a data source.
    #[error("missing API key for {source_name}: set the {var} environment variable")]
    MissingApiKey {
        source_name: &'static str,
        var: &'static str,
    },

    /// The HTTP request failed (connection, timeout, or body decoding).
    #[error("{source_name} request failed: {source}")]
    Http {
        source_name: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status.
    #[error("{source_name} returned HTTP status {status}")]
    BadStatus {
        source_name: &'static str,
        status: u16,
    },

    /// Building the HTTP client failed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}
