//! Common error type definitions.

use std::path::Path;

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur while extracting text from an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Input validation failed.
    InvalidInput,
    /// Network-related error occurred while talking to a provider.
    NetworkError,
    /// The provider rejected the credentials or the request signature.
    Authentication,
    /// The provider throttled the request.
    RateLimited,
    /// The provider is temporarily unavailable.
    ServiceUnavailable,
    /// The provider returned an error response.
    ExternalError,
    /// The provider answered with a body that could not be understood.
    MalformedResponse,
    /// Configuration error.
    Configuration,
    /// Timeout occurred.
    Timeout,
    /// Serialization of results failed.
    Serialization,
    /// A local image file could not be read.
    ImageRead,
    /// Internal error.
    InternalError,
}

impl ErrorKind {
    /// Returns `true` for failures reported by (or on the way to) a detection provider.
    pub fn is_provider_failure(self) -> bool {
        matches!(
            self,
            Self::NetworkError
                | Self::Authentication
                | Self::RateLimited
                | Self::ServiceUnavailable
                | Self::ExternalError
                | Self::MalformedResponse
                | Self::Timeout
        )
    }
}

/// A structured error type for glimpse operations.
///
/// Provider adapters tag their errors with the provider name so a batch
/// record can say which side of the pipeline failed.
#[derive(Debug, Error)]
#[error("{}", render(*kind, provider.as_deref(), message.as_deref()))]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Name of the provider that produced the error, if any.
    pub provider: Option<String>,
    /// Optional error message.
    pub message: Option<String>,
    /// Optional source error.
    #[source]
    pub source: Option<BoxedError>,
}

fn render(kind: ErrorKind, provider: Option<&str>, message: Option<&str>) -> String {
    let kind: &'static str = kind.into();
    match (provider, message) {
        (Some(provider), Some(message)) => format!("{provider} {kind}: {message}"),
        (Some(provider), None) => format!("{provider} {kind}"),
        (None, Some(message)) => format!("{kind}: {message}"),
        (None, None) => kind.to_owned(),
    }
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            provider: None,
            message: None,
            source: None,
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Tags this error with the provider that produced it.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Adds a source error to this error.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Creates a new invalid input error.
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    /// Creates a new network error.
    pub fn network_error() -> Self {
        Self::new(ErrorKind::NetworkError)
    }

    /// Creates a new authentication error.
    pub fn authentication() -> Self {
        Self::new(ErrorKind::Authentication)
    }

    /// Creates a new rate limited error.
    pub fn rate_limited() -> Self {
        Self::new(ErrorKind::RateLimited)
    }

    /// Creates a new service unavailable error.
    pub fn service_unavailable() -> Self {
        Self::new(ErrorKind::ServiceUnavailable)
    }

    /// Creates a new external error.
    pub fn external_error() -> Self {
        Self::new(ErrorKind::ExternalError)
    }

    /// Creates a new malformed response error.
    pub fn malformed_response() -> Self {
        Self::new(ErrorKind::MalformedResponse)
    }

    /// Creates a new configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Creates a new timeout error.
    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout)
    }

    /// Creates a new serialization error.
    pub fn serialization() -> Self {
        Self::new(ErrorKind::Serialization)
    }

    /// Creates a new internal error.
    pub fn internal_error() -> Self {
        Self::new(ErrorKind::InternalError)
    }

    /// Creates an image read error for the given path.
    pub fn image_read(path: &Path, source: std::io::Error) -> Self {
        Self::new(ErrorKind::ImageRead)
            .with_message(format!("failed to read '{}': {source}", path.display()))
            .with_source(source)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind.into()
    }

    /// Returns the provider name, if the error was tagged with one.
    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization()
            .with_message(error.to_string())
            .with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_provider_and_message() {
        let error = Error::network_error()
            .with_provider("Rekognition")
            .with_message("connection refused");
        assert_eq!(
            error.to_string(),
            "Rekognition network_error: connection refused"
        );
    }

    #[test]
    fn test_display_kind_only() {
        assert_eq!(Error::timeout().to_string(), "timeout");
        assert_eq!(
            Error::configuration().with_message("bad threshold").to_string(),
            "configuration: bad threshold"
        );
    }

    #[test]
    fn test_image_read_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = Error::image_read(Path::new("images/a.png"), io);
        assert_eq!(error.kind(), ErrorKind::ImageRead);
        assert!(!error.kind().is_provider_failure());
        assert!(error.to_string().contains("images/a.png"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_provider_failure_classification() {
        assert!(ErrorKind::Authentication.is_provider_failure());
        assert!(ErrorKind::MalformedResponse.is_provider_failure());
        assert!(!ErrorKind::Configuration.is_provider_failure());
        assert_eq!(Error::rate_limited().kind_str(), "rate_limited");
    }
}
