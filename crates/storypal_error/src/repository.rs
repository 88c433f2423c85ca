//! Story repository error types.

/// Repository integrity violations. All are rejected before any mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RepositoryErrorKind {
    /// Built-in stories cannot be changed
    #[display("Story '{}' is built in and cannot be modified", _0)]
    BuiltIn(String),
    /// No user-created story with this id
    #[display("Story '{}' not found", _0)]
    NotFound(String),
    /// Id already used by another story
    #[display("Story id '{}' already exists", _0)]
    DuplicateId(String),
}

/// Repository error with location tracking.
///
/// # Examples
///
/// ```
/// use storypal_error::{RepositoryError, RepositoryErrorKind};
///
/// let err = RepositoryError::new(RepositoryErrorKind::BuiltIn("dentist".to_string()));
/// assert!(format!("{}", err).contains("built in"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Repository Error: {} at line {} in {}", kind, line, file)]
pub struct RepositoryError {
    /// The specific error condition
    pub kind: RepositoryErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl RepositoryError {
    /// Create a new RepositoryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RepositoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
