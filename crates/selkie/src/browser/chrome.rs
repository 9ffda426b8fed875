//! chromiumoxide-backed driver: launches a headless Chrome it owns outright
//! and speaks CDP to it. One [`ChromeSession`] is one Chrome process.

use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::browser::driver::{Driver, Session};
use crate::error::{Error, Result};

const ELEMENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Default)]
pub struct ChromeDriver;

impl ChromeDriver {
    pub fn new() -> Self {
        Self
    }
}

impl Driver for ChromeDriver {
    type Session = ChromeSession;

    async fn build(&self) -> Result<ChromeSession> {
        let config = BrowserConfig::builder()
            .build()
            .map_err(|message| Error::BrowserLaunch { message })?;
        let (browser, mut handler) = Browser::launch(config).await.map_err(|err| {
            Error::BrowserLaunch {
                message: err.to_string(),
            }
        })?;

        // The handler loop must be polled for the CDP connection to make
        // progress; it ends when the connection drops at teardown.
        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(ChromeSession {
            browser,
            events,
            page: None,
        })
    }
}

pub struct ChromeSession {
    browser: Browser,
    events: JoinHandle<()>,
    page: Option<Page>,
}

impl ChromeSession {
    fn page(&self) -> Result<&Page> {
        self.page.as_ref().ok_or_else(|| Error::Navigation {
            message: "no page loaded in this session".to_string(),
        })
    }
}

impl Session for ChromeSession {
    async fn goto(&mut self, url: &str) -> Result<()> {
        let page = self
            .browser
            .new_page(url)
            .await
            .map_err(|err| Error::Navigation {
                message: err.to_string(),
            })?;
        self.page = Some(page);
        Ok(())
    }

    async fn wait_for_element(&mut self, css: &str, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        let page = self.page()?;
        loop {
            if page.find_element(css).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(Error::WaitTimeout {
                    locator: css.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
            tokio::time::sleep(ELEMENT_POLL_INTERVAL).await;
        }
    }

    async fn find_text_containing(&mut self, needle: &str) -> Result<Option<String>> {
        let page = self.page()?;
        // Walk text nodes rather than elements so a match means the needle
        // appears in a direct text child, not merely somewhere in a subtree
        // (otherwise <body> itself would always be the first hit).
        let needle_js = needle.replace('\\', "\\\\").replace('"', "\\\"");
        let script = format!(
            r#"(() => {{
                const needle = "{needle_js}";
                const walker = document.createTreeWalker(document.body, NodeFilter.SHOW_TEXT);
                let node;
                while ((node = walker.nextNode())) {{
                    if (node.textContent.includes(needle) && node.parentElement) {{
                        return node.parentElement.textContent;
                    }}
                }}
                return null;
            }})()"#
        );
        let found: Option<String> = page
            .evaluate(script)
            .await
            .map_err(|err| Error::Evaluate {
                message: err.to_string(),
            })?
            .into_value()
            .map_err(|err| Error::Evaluate {
                message: err.to_string(),
            })?;
        Ok(found)
    }

    async fn quit(&mut self) -> Result<()> {
        self.page = None;
        let closed = self.browser.close().await;
        let reaped = self.browser.wait().await;
        self.events.abort();
        closed.map_err(|err| Error::Teardown {
            message: err.to_string(),
        })?;
        reaped.map_err(|err| Error::Teardown {
            message: err.to_string(),
        })?;
        Ok(())
    }
}
