//! Browser seam: locators, the page-query traits, and navigation with an
//! optional bounded retry.
//!
//! The scraping code is generic over [`Browser`] so it runs the same against
//! a live WebDriver session and the in-memory pages used by tests.

#[cfg(test)]
pub mod fake;
pub mod webdriver;

use std::fmt;
use std::time::Duration;

use tracing::warn;

use crate::error::ScrapeError;

const BASE_BACKOFF_MS: u64 = 1000;

/// How a page element is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locator {
    /// XPath expression, e.g. `//p[@id='NetPS-PlantHeight']`.
    XPath(&'static str),
    /// Single CSS class name, without the leading dot.
    Class(&'static str),
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::XPath(path) => write!(f, "xpath {}", path),
            Locator::Class(name) => write!(f, "class {}", name),
        }
    }
}

/// An element found on the current page.
#[allow(async_fn_in_trait)]
pub trait PageElement {
    /// Rendered text of the element.
    async fn text(&self) -> Result<String, ScrapeError>;

    /// Raw attribute value, `None` when the attribute is not set.
    async fn attr(&self, name: &str) -> Result<Option<String>, ScrapeError>;

    /// Link target resolved against the page URL.
    async fn href(&self) -> Result<Option<String>, ScrapeError>;
}

/// A single long-lived browser session.
#[allow(async_fn_in_trait)]
pub trait Browser {
    type Element: PageElement;

    /// Load `url`, returning once the browser reports the page loaded.
    async fn navigate(&mut self, url: &str) -> Result<(), ScrapeError>;

    /// First element matching `locator`, or `None` when there is none.
    async fn find(&self, locator: &Locator) -> Result<Option<Self::Element>, ScrapeError>;

    /// All elements matching `locator`, in document order.
    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self::Element>, ScrapeError>;
}

/// Extra attempts for a failed navigation. Zero means a failure is final.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub retries: u32,
    pub base_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(retries: u32) -> Self {
        Self {
            retries,
            base_backoff: Duration::from_millis(BASE_BACKOFF_MS),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Navigate, retrying with exponential backoff up to `policy.retries` times.
pub async fn navigate<B: Browser>(
    browser: &mut B,
    url: &str,
    policy: &RetryPolicy,
) -> Result<(), ScrapeError> {
    let mut attempt = 0u32;
    loop {
        match browser.navigate(url).await {
            Ok(()) => return Ok(()),
            Err(e) if attempt < policy.retries => {
                let backoff = policy.base_backoff * 2u32.pow(attempt);
                warn!(
                    "Navigation to {} failed (attempt {}/{}): {}, retrying in {:.1}s",
                    url,
                    attempt + 1,
                    policy.retries + 1,
                    e,
                    backoff.as_secs_f64()
                );
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
