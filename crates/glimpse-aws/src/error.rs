//! Error types for glimpse-aws
//!
//! Transport-level failures are kept here and converted into the shared
//! [`glimpse_core::Error`] by the provider crates.

use crate::client::AwsBuilderError;

/// Result type for all operations in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error codes AWS uses for rejected credentials or signatures.
const AUTH_ERROR_CODES: [&str; 6] = [
    "AccessDeniedException",
    "UnrecognizedClientException",
    "InvalidSignatureException",
    "IncompleteSignature",
    "MissingAuthenticationToken",
    "ExpiredTokenException",
];

/// Error codes AWS uses for throttled requests.
const THROTTLING_ERROR_CODES: [&str; 4] = [
    "ThrottlingException",
    "ProvisionedThroughputExceededException",
    "TooManyRequestsException",
    "LimitExceededException",
];

/// Unified error type for signed AWS calls
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP client/connection errors
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors when sending or receiving data
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// AWS answered with a non-success status
    #[error("{code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl Error {
    /// Create an API error
    pub fn api_error(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Returns the HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Converts into the shared error type, tagged with `provider`.
    pub fn into_core(self, provider: &str) -> glimpse_core::Error {
        let message = self.to_string();
        let error = match &self {
            Error::Http(e) if e.is_timeout() => glimpse_core::Error::timeout(),
            Error::Http(e) if e.is_connect() => glimpse_core::Error::network_error(),
            Error::Http(e) if e.is_decode() => glimpse_core::Error::malformed_response(),
            Error::Http(_) => glimpse_core::Error::network_error(),
            Error::Serialization(_) => glimpse_core::Error::malformed_response(),
            Error::UrlParse(_) | Error::InvalidConfig { .. } => {
                glimpse_core::Error::configuration()
            }
            Error::Api { status, code, .. } => classify_api_error(*status, code),
        };

        error
            .with_provider(provider)
            .with_message(message)
            .with_source(self)
    }
}

fn classify_api_error(status: u16, code: &str) -> glimpse_core::Error {
    if status == 401 || status == 403 || AUTH_ERROR_CODES.contains(&code) {
        glimpse_core::Error::authentication()
    } else if status == 429 || THROTTLING_ERROR_CODES.contains(&code) {
        glimpse_core::Error::rate_limited()
    } else if status == 408 {
        glimpse_core::Error::timeout()
    } else if status >= 500 {
        glimpse_core::Error::service_unavailable()
    } else {
        glimpse_core::Error::external_error()
    }
}

impl From<AwsBuilderError> for Error {
    fn from(err: AwsBuilderError) -> Self {
        Self::invalid_config(err.to_string())
    }
}
