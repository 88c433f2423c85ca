//! Generation provider error types.

/// Error conditions raised by a generation provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ProviderErrorKind {
    /// Provider has no credential or is otherwise not configured
    #[display("Provider unavailable: {}", _0)]
    Unavailable(String),
    /// Provider answered with a non-success status
    #[display("HTTP {} error: {}", status_code, message)]
    Http {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Request could not be sent or the response could not be read
    #[display("Provider request failed: {}", _0)]
    Request(String),
    /// Request did not complete in time
    #[display("Provider request timed out after {} seconds", _0)]
    Timeout(u64),
    /// Response carried no usable content
    #[display("Provider returned no content: {}", _0)]
    EmptyPayload(String),
    /// Response content could not be decoded
    #[display("Failed to decode provider response: {}", _0)]
    Decode(String),
}

impl ProviderErrorKind {
    /// Whether the provider could not be used at all (no network call was attempted).
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ProviderErrorKind::Unavailable(_))
    }

    /// Whether the failure was caused by an exhausted quota.
    pub fn is_quota(&self) -> bool {
        matches!(self, ProviderErrorKind::Http { status_code: 429, .. })
    }
}

/// Provider error with source location tracking.
///
/// # Examples
///
/// ```
/// use storypal_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::Http {
///     status_code: 429,
///     message: "Resource exhausted".to_string(),
/// });
/// assert!(err.kind.is_quota());
/// assert!(format!("{}", err).contains("429"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for provider calls.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;
