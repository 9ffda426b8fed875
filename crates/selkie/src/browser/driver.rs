//! Seam between the validation orchestrator and the browser automation
//! backend. The orchestrator only needs the five operations below; tests
//! substitute a counting mock, production uses [`crate::browser::ChromeDriver`].

use std::time::Duration;

use crate::error::Result;

/// Builds one browser session per validation call.
#[allow(async_fn_in_trait)]
pub trait Driver {
    type Session: Session;

    async fn build(&self) -> Result<Self::Session>;
}

/// One browser process/tab, exclusively owned by a single validation call.
#[allow(async_fn_in_trait)]
pub trait Session {
    /// Navigates the session to `url`.
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Waits until an element matching the CSS selector exists, with a
    /// bounded timeout. Timeout expiry is an `Err`, never a hang.
    async fn wait_for_element(&mut self, css: &str, timeout: Duration) -> Result<()>;

    /// Returns the text of the first element containing `needle` in a direct
    /// text node, or `None` when no such element exists.
    async fn find_text_containing(&mut self, needle: &str) -> Result<Option<String>>;

    /// Tears the session down; the underlying browser process must not
    /// outlive this call.
    async fn quit(&mut self) -> Result<()>;
}
