/// Success sentinel shared by every validation path.
pub const NO_ERRORS: &str = "No errors";

/// Returned when the markup is empty after fence stripping.
pub const EMPTY_DIAGRAM: &str = "Empty diagram";

/// Returned when a parser failure carries no usable message.
pub const UNKNOWN_ERROR: &str = "Unknown error.";

/// The single result of one validation call.
///
/// Rendered through `Display`, each variant maps onto the plain-string wire
/// format callers see: the success sentinel, the empty-input sentinel, the
/// library's own syntax-error text, or an infrastructure diagnostic prefixed
/// with `Error parsing diagram:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    NoErrors,
    EmptyDiagram,
    /// The rendering library judged the markup invalid; payload is its
    /// message (direct path) or the DOM-extracted error text (browser path).
    SyntaxError(String),
    /// Something other than the markup failed: browser launch, navigation,
    /// wait timeout, filesystem.
    Failure(String),
}

impl Verdict {
    /// Folds an infrastructure error into a `Failure` verdict, substituting
    /// `Unknown error` when the message is empty.
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            Verdict::Failure("Unknown error".to_string())
        } else {
            Verdict::Failure(message)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::NoErrors)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::NoErrors => f.write_str(NO_ERRORS),
            Verdict::EmptyDiagram => f.write_str(EMPTY_DIAGRAM),
            Verdict::SyntaxError(message) => f.write_str(message),
            Verdict::Failure(message) => write!(f, "Error parsing diagram: {message}"),
        }
    }
}
