//! Configuration error types.

use std::fmt;

/// Invalid or unreadable configuration.
///
/// Errors raised while validating a `storypal.toml` table carry the table
/// name so the message points at the offending section.
#[derive(Debug, Clone, derive_more::Error)]
pub struct ConfigError {
    /// Table the problem was found in (e.g. `resolver`)
    pub section: Option<String>,
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            section: None,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create a ConfigError attributed to one configuration table.
    ///
    /// # Examples
    ///
    /// ```
    /// use storypal_error::ConfigError;
    ///
    /// let err = ConfigError::in_section("resolver", "fallback_images must not be empty");
    /// assert_eq!(err.section.as_deref(), Some("resolver"));
    /// assert!(err.to_string().contains("[resolver] fallback_images"));
    /// ```
    #[track_caller]
    pub fn in_section(section: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            section: Some(section.into()),
            ..Self::new(message)
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration Error: ")?;
        if let Some(section) = &self.section {
            write!(f, "[{}] ", section)?;
        }
        write!(f, "{} at line {} in {}", self.message, self.line, self.file)
    }
}
