use crate::detect::DetectTypeError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    DetectType(#[from] DetectTypeError),

    #[error("failed to launch browser: {message}")]
    BrowserLaunch { message: String },

    #[error("browser navigation failed: {message}")]
    Navigation { message: String },

    #[error("timed out after {timeout_ms} ms waiting for `{locator}`")]
    WaitTimeout { locator: String, timeout_ms: u64 },

    #[error("script evaluation failed: {message}")]
    Evaluate { message: String },

    #[error("browser session teardown failed: {message}")]
    Teardown { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
