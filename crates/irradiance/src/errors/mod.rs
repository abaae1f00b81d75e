//! Error types for irradiance providers.

use thiserror::Error;

/// Errors that can occur while fetching irradiance from a provider.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IrradianceError {
    /// The request did not complete within the configured timeout.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("HTTP {status} from {provider}")]
    HttpStatus {
        /// The provider that returned the status
        provider: String,
        /// The HTTP status code
        status: u16,
    },

    /// The request could not be sent or the body could not be read.
    #[error("Network error: {0}")]
    Network(String),

    /// The body was not the JSON shape the provider documents.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The response parsed but did not contain the requested parameter.
    #[error("Missing parameter in response: {0}")]
    MissingParameter(String),

    /// A date key in the response could not be parsed.
    #[error("Invalid date key: {0}")]
    InvalidDate(String),
}
