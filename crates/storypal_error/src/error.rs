//! Top-level error wrapper types.

use crate::{
    ConfigError, JsonError, ProviderError, RepositoryError, SchemaError, StorageError,
};

/// Every error condition the workspace can surface.
///
/// # Examples
///
/// ```
/// use storypal_error::{StorypalError, ConfigError};
///
/// let config_err = ConfigError::new("Missing data directory");
/// let err: StorypalError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StorypalErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Key-value storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Generation provider error
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Narrative schema validation error
    #[from(SchemaError)]
    Schema(SchemaError),
    /// Story repository integrity error
    #[from(RepositoryError)]
    Repository(RepositoryError),
}

/// Storypal error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storypal_error::{StorypalError, StorypalErrorKind, StorypalResult, SchemaError, SchemaErrorKind};
///
/// fn might_fail() -> StorypalResult<()> {
///     Err(SchemaError::new(SchemaErrorKind::EmptyTopic))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), StorypalErrorKind::Schema(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storypal Error: {}", _0)]
pub struct StorypalError(Box<StorypalErrorKind>);

impl StorypalError {
    /// Create a new error from a kind.
    pub fn new(kind: StorypalErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StorypalErrorKind {
        &self.0
    }

    /// Whether this is a narrative schema failure.
    pub fn is_schema(&self) -> bool {
        matches!(self.kind(), StorypalErrorKind::Schema(_))
    }

    /// Whether this is a repository integrity failure.
    pub fn is_repository(&self) -> bool {
        matches!(self.kind(), StorypalErrorKind::Repository(_))
    }
}

// Generic From implementation for any type that converts to StorypalErrorKind
impl<T> From<T> for StorypalError
where
    T: Into<StorypalErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storypal operations.
pub type StorypalResult<T> = std::result::Result<T, StorypalError>;
