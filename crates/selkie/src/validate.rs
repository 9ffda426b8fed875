//! One entry point over the two validation paths.
//!
//! The direct path and the browser path implement the same capability with
//! different trust levels; callers pick one by variant and keep a single call
//! site, so retiring the superseded direct path later will not ripple.

use crate::browser::{BrowserValidator, ChromeDriver, Driver};
use crate::direct::DirectValidator;
use crate::verdict::Verdict;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorKind {
    /// Fast, non-browser parse. Superseded: its headless parse path has
    /// known gaps.
    Direct,
    /// Authoritative: observes actual rendering behavior in a browser.
    Browser,
}

#[derive(Debug, Clone)]
pub enum Validator<D = ChromeDriver> {
    Direct(DirectValidator),
    Browser(BrowserValidator<D>),
}

impl Validator<ChromeDriver> {
    pub fn direct() -> Self {
        Validator::Direct(DirectValidator::new())
    }

    pub fn browser() -> Self {
        Validator::Browser(BrowserValidator::new())
    }
}

impl<D: Driver> Validator<D> {
    pub fn kind(&self) -> ValidatorKind {
        match self {
            Validator::Direct(_) => ValidatorKind::Direct,
            Validator::Browser(_) => ValidatorKind::Browser,
        }
    }

    pub async fn validate(&self, text: &str) -> Verdict {
        match self {
            Validator::Direct(validator) => validator.validate(text),
            Validator::Browser(validator) => validator.validate(text).await,
        }
    }
}
