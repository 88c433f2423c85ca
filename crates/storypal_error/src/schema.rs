//! Narrative schema error types.

/// Ways a generated narrative can fail structural validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SchemaErrorKind {
    /// Response was not valid JSON for the narrative schema
    #[display("Malformed narrative: {}", _0)]
    Malformed(String),
    /// Narrative contained no slides
    #[display("Narrative contains no slides")]
    EmptySlides,
    /// Slide text is empty or whitespace
    #[display("Slide {} has empty text", _0)]
    EmptySlideText(usize),
    /// A choice is missing its text or feedback
    #[display("Slide {} choice {} is incomplete", slide, choice)]
    IncompleteChoice {
        /// Slide index
        slide: usize,
        /// Choice index
        choice: usize,
    },
    /// Topic was blank
    #[display("Story topic cannot be empty")]
    EmptyTopic,
}

/// Schema validation error with location tracking.
///
/// # Examples
///
/// ```
/// use storypal_error::{SchemaError, SchemaErrorKind};
///
/// let err = SchemaError::new(SchemaErrorKind::EmptySlides);
/// assert!(format!("{}", err).contains("no slides"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Schema Error: {} at line {} in {}", kind, line, file)]
pub struct SchemaError {
    /// The specific error condition
    pub kind: SchemaErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl SchemaError {
    /// Create a new SchemaError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SchemaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
