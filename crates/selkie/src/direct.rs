//! Direct (non-browser) validation.
//!
//! This path asks a [`DiagramParser`] for a verdict without ever rendering
//! the markup. It is fast but known-unreliable: the headless parse path of
//! the rendering library misses errors that only surface during real
//! rendering, which is why [`crate::browser::BrowserValidator`] supersedes
//! this validator as the authoritative one.

use crate::detect::DetectorRegistry;
use crate::normalize::normalize;
use crate::verdict::{UNKNOWN_ERROR, Verdict};

/// Exact message of a known non-functional defect in the library's headless
/// parse path. It is an integration artifact, not a markup problem, so the
/// direct validator remaps it to the success sentinel.
///
/// Compatibility shim: coupled to the library's wording and revisited when
/// the library is upgraded.
pub const DOMPURIFY_ADDHOOK_DEFECT: &str = "DOMPurify.addHook is not a function";

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub suppress_errors: bool,
}

impl ParseOptions {
    /// Strict parsing (errors are returned).
    pub fn strict() -> Self {
        Self {
            suppress_errors: false,
        }
    }

    /// Lenient parsing: parse failures are swallowed.
    pub fn lenient() -> Self {
        Self {
            suppress_errors: true,
        }
    }
}

/// A parse failure as the external library reports one: a message when it has
/// something to say, `None` otherwise.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}", .message.as_deref().unwrap_or(UNKNOWN_ERROR))]
pub struct ParseError {
    pub message: Option<String>,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

/// The non-browser parse entry point of the diagram library.
pub trait DiagramParser {
    fn parse(&self, text: &str, options: ParseOptions) -> Result<(), ParseError>;
}

/// Built-in shallow syntax check: type detection plus a handful of per-type
/// structural checks. Deliberately not a grammar: anything it cannot judge
/// passes, and the browser path has the final word.
#[derive(Debug, Clone, Default)]
pub struct SyntaxCheck {
    registry: DetectorRegistry,
}

impl SyntaxCheck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: DetectorRegistry) -> Self {
        Self { registry }
    }
}

impl DiagramParser for SyntaxCheck {
    fn parse(&self, text: &str, options: ParseOptions) -> Result<(), ParseError> {
        let result = match self.registry.detect_type(text) {
            Ok(kind) => match kind {
                "flowchart-v2" => check_flowchart(text),
                "sequence" => check_sequence(text),
                "pie" => check_pie(text),
                _ => Ok(()),
            },
            Err(err) => Err(ParseError::new(err.to_string())),
        };

        if options.suppress_errors { Ok(()) } else { result }
    }
}

fn parse_error_on_line(line_no: usize, line: &str, expecting: &str) -> ParseError {
    ParseError::new(format!(
        "Parse error on line {line_no}:\n{line}\nExpecting {expecting}"
    ))
}

/// Rejects flowchart statements that end on a dangling edge (`A-->` with no
/// target node).
fn check_flowchart(text: &str) -> Result<(), ParseError> {
    let header = regex::Regex::new(r"^(graph|flowchart)\b").unwrap();
    let dangling =
        regex::Regex::new(r"(-{2,3}>?|={2,3}>|-\.+->)\s*(\|[^|]*\|\s*)?$").unwrap();
    for (idx, line) in text.lines().enumerate() {
        for stmt in line.split(';') {
            let stmt = stmt.trim();
            // The header may share its line with the first statement.
            if stmt.is_empty() || (idx == 0 && header.is_match(stmt)) {
                continue;
            }
            if dangling.is_match(stmt) {
                return Err(parse_error_on_line(idx + 1, line, "a node after the link"));
            }
        }
    }
    Ok(())
}

/// Rejects sequence-diagram message lines that have an arrow but no `: text`
/// payload.
fn check_sequence(text: &str) -> Result<(), ParseError> {
    let arrow = regex::Regex::new(r"(-{1,2}>>?|-[x)])").unwrap();
    for (idx, line) in text.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() || !arrow.is_match(line) {
            continue;
        }
        if !line.contains(':') {
            return Err(parse_error_on_line(idx + 1, line, "a message after the arrow"));
        }
    }
    Ok(())
}

/// Rejects pie entries (`"label" : value`) whose value part is missing or not
/// numeric.
fn check_pie(text: &str) -> Result<(), ParseError> {
    for (idx, line) in text.lines().enumerate().skip(1) {
        let line = line.trim();
        if !line.starts_with('"') {
            continue;
        }
        let value = line.rsplit(':').next().map(str::trim).unwrap_or("");
        if line.rsplit(':').count() < 2 || value.parse::<f64>().is_err() {
            return Err(parse_error_on_line(idx + 1, line, "a numeric value"));
        }
    }
    Ok(())
}

/// The superseded fast path: parse without a browser and fold the outcome
/// into a [`Verdict`].
#[derive(Debug, Clone, Default)]
pub struct DirectValidator<P = SyntaxCheck> {
    parser: P,
}

impl DirectValidator<SyntaxCheck> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: DiagramParser> DirectValidator<P> {
    pub fn with_parser(parser: P) -> Self {
        Self { parser }
    }

    pub fn validate(&self, text: &str) -> Verdict {
        let code = normalize(text);
        if code.is_empty() {
            return Verdict::EmptyDiagram;
        }

        match self.parser.parse(&code, ParseOptions::strict()) {
            Ok(()) => Verdict::NoErrors,
            Err(ParseError {
                message: Some(message),
            }) => {
                if message.contains(DOMPURIFY_ADDHOOK_DEFECT) {
                    Verdict::NoErrors
                } else {
                    Verdict::SyntaxError(message)
                }
            }
            Err(ParseError { message: None }) => {
                Verdict::SyntaxError(UNKNOWN_ERROR.to_string())
            }
        }
    }
}
