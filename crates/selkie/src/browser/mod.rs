//! Browser-mediated validation, the authoritative path.
//!
//! The direct parse path misses errors that only surface during real
//! rendering, so this orchestrator loads the markup in an actual browser
//! engine and reads the library's error surface out of the DOM: generate a
//! minimal host page, launch a session, navigate to the page over `file://`,
//! wait (bounded) for the document to load, search for the error marker, and
//! give late asynchronous errors a settle window before concluding success.
//!
//! The session and the temp file are torn down on every exit path; no
//! resource survives a completed call. Errors that render after the settle
//! window are missed; that false negative is a documented limitation of
//! observing a pipeline with no completion signal.

pub mod chrome;
pub mod driver;

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};
use uuid::Uuid;

pub use chrome::{ChromeDriver, ChromeSession};
pub use driver::{Driver, Session};

use crate::error::Result;
use crate::normalize::normalize;
use crate::preview::preview_page;
use crate::verdict::Verdict;

/// Substring the rendering library puts into its DOM error block.
///
/// Compatibility shim: coupled to the library's wording, kept as a named
/// constant (and a [`BrowserOptions`] field) so an upgrade only touches this.
pub const DEFAULT_ERROR_MARKER: &str = "Syntax error";

/// Tuning knobs for one validator. Defaults match the behavior the library's
/// error surface was measured against: 5 s to load, 5 s to settle.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// Bounded wait for the host page's `body` element after navigation.
    pub load_timeout: Duration,
    /// Window granted to asynchronous rendering before concluding success.
    pub settle_delay: Duration,
    /// DOM text substring that identifies the library's error block.
    pub error_marker: String,
    /// Directory for host-page temp files; platform temp dir when `None`.
    pub temp_dir: Option<PathBuf>,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            load_timeout: Duration::from_secs(5),
            settle_delay: Duration::from_secs(5),
            error_marker: DEFAULT_ERROR_MARKER.to_string(),
            temp_dir: None,
        }
    }
}

/// Validates markup by rendering it in a real browser session.
///
/// Each `validate` call owns one session and one uniquely named temp file;
/// concurrent calls share nothing.
#[derive(Debug, Clone)]
pub struct BrowserValidator<D = ChromeDriver> {
    driver: D,
    options: BrowserOptions,
}

impl BrowserValidator<ChromeDriver> {
    pub fn new() -> Self {
        Self::with_driver(ChromeDriver::new(), BrowserOptions::default())
    }
}

impl Default for BrowserValidator<ChromeDriver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Driver> BrowserValidator<D> {
    pub fn with_driver(driver: D, options: BrowserOptions) -> Self {
        Self { driver, options }
    }

    pub fn options(&self) -> &BrowserOptions {
        &self.options
    }

    /// Produces exactly one [`Verdict`] for `text`; never returns an error.
    ///
    /// Empty-after-normalization input short-circuits without touching the
    /// browser. Every infrastructure failure (launch, navigation, wait
    /// timeout, filesystem) folds into [`Verdict::Failure`].
    pub async fn validate(&self, text: &str) -> Verdict {
        let code = normalize(text);
        if code.is_empty() {
            return Verdict::EmptyDiagram;
        }

        match self.validate_rendered(&code).await {
            Ok(verdict) => verdict,
            Err(err) => {
                debug!(error = %err, "browser validation failed");
                Verdict::failure(err.to_string())
            }
        }
    }

    /// Acquires the session and temp file, runs the render check, and tears
    /// both down before the outcome is propagated, so the teardown also runs
    /// when the render check failed.
    async fn validate_rendered(&self, code: &str) -> Result<Verdict> {
        let html = preview_page(code);
        let mut session = self.driver.build().await?;
        let page_path = self.page_path();
        debug!(page = %page_path.display(), "browser session up");

        let outcome = self.drive(&mut session, &page_path, &html).await;

        if let Err(err) = session.quit().await {
            warn!(error = %err, "browser session teardown failed");
        }
        if let Err(err) = tokio::fs::remove_file(&page_path).await {
            // The file never exists when `drive` failed before writing it.
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(page = %page_path.display(), error = %err, "temp page removal failed");
            }
        }

        outcome
    }

    async fn drive(
        &self,
        session: &mut D::Session,
        page_path: &Path,
        html: &str,
    ) -> Result<Verdict> {
        tokio::fs::write(page_path, html).await?;
        session.goto(&format!("file://{}", page_path.display())).await?;
        session
            .wait_for_element("body", self.options.load_timeout)
            .await?;

        if let Some(text) = session
            .find_text_containing(&self.options.error_marker)
            .await?
        {
            return Ok(Verdict::SyntaxError(text.trim().to_string()));
        }

        // Some errors render only after asynchronous work with no completion
        // signal; grant them a bounded window before concluding success.
        tokio::time::sleep(self.options.settle_delay).await;
        Ok(Verdict::NoErrors)
    }

    /// Unique host-page path. Uniqueness is load-bearing: concurrent calls
    /// must not collide on the filesystem.
    fn page_path(&self) -> PathBuf {
        let dir = self
            .options
            .temp_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir);
        dir.join(format!("mermaid-preview-{}.html", Uuid::new_v4().simple()))
    }
}
