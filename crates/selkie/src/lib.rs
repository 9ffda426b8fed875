#![forbid(unsafe_code)]

//! Mermaid diagram syntax validation.
//!
//! Two paths produce the same plain-string verdict:
//!
//! - a fast direct parse ([`parse_mermaid`]), superseded because the
//!   library's headless parse path has known gaps, and
//! - the authoritative browser-mediated check
//!   ([`parse_mermaid_in_browser`]), which renders the markup in a real
//!   headless browser and reads the library's error surface out of the DOM.
//!
//! Both accept markup with or without ```` ```mermaid ```` fences, and
//! neither ever returns an error: every failure folds into a diagnostic
//! string, with [`NO_ERRORS`] as the success sentinel.
//!
//! ```no_run
//! # async fn demo() {
//! assert_eq!(
//!     selkie::parse_mermaid_in_browser("graph TD; A-->B;").await,
//!     selkie::NO_ERRORS,
//! );
//! # }
//! ```

pub mod browser;
pub mod detect;
pub mod direct;
pub mod error;
pub mod normalize;
pub mod preview;
pub mod validate;
pub mod verdict;

use std::sync::OnceLock;

pub use browser::{BrowserOptions, BrowserValidator, ChromeDriver, DEFAULT_ERROR_MARKER};
pub use detect::DetectorRegistry;
pub use direct::{DOMPURIFY_ADDHOOK_DEFECT, DiagramParser, DirectValidator, ParseOptions, SyntaxCheck};
pub use error::{Error, Result};
pub use normalize::normalize;
pub use preview::preview_page;
pub use validate::{Validator, ValidatorKind};
pub use verdict::{EMPTY_DIAGRAM, NO_ERRORS, Verdict};

fn registry() -> &'static DetectorRegistry {
    static REGISTRY: OnceLock<DetectorRegistry> = OnceLock::new();
    REGISTRY.get_or_init(DetectorRegistry::default_mermaid_11)
}

/// Synchronous core of [`detect_mermaid_diagram_type`].
///
/// "Unrecognized diagram kind" and "detection failed" both collapse to the
/// empty string, matching the established behavior callers rely on.
pub fn detect_mermaid_diagram_type_sync(text: &str) -> String {
    let code = normalize(text);
    match registry().detect_type(&code) {
        Ok(kind) => kind.to_string(),
        Err(_) => String::new(),
    }
}

/// Detects the diagram type of `text` (e.g. `"flowchart-v2"`, `"sequence"`,
/// `"c4"`), accepting fenced or bare markup. Returns `""` when no type is
/// detected.
pub async fn detect_mermaid_diagram_type(text: &str) -> String {
    detect_mermaid_diagram_type_sync(text)
}

/// Synchronous core of [`parse_mermaid`].
pub fn parse_mermaid_sync(text: &str) -> String {
    DirectValidator::new().validate(text).to_string()
}

/// Validates `text` without a browser and returns [`NO_ERRORS`] or an error
/// message.
///
/// Superseded by [`parse_mermaid_in_browser`], which detects parse errors in
/// a real browser session; this path stays as the fast, known-unreliable
/// fallback.
pub async fn parse_mermaid(text: &str) -> String {
    parse_mermaid_sync(text)
}

/// Validates `text` by rendering it in a headless browser and returns
/// [`NO_ERRORS`] or an error message. The authoritative path.
///
/// Requires a Chrome/Chromium executable on the host. Infrastructure
/// failures are reported as `Error parsing diagram: ...` strings, never as
/// panics or `Err` values.
pub async fn parse_mermaid_in_browser(text: &str) -> String {
    BrowserValidator::new().validate(text).await.to_string()
}

#[cfg(test)]
mod tests;
