//! In-memory pages standing in for a WebDriver session in tests.

use std::collections::{HashMap, HashSet};

use super::{Browser, Locator, PageElement};
use crate::error::ScrapeError;

#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    text: String,
    attrs: HashMap<String, String>,
}

impl FakeElement {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            attrs: HashMap::new(),
        }
    }

    /// Anchor with visible `text` pointing at `href`.
    pub fn link(text: &str, href: &str) -> Self {
        Self::new(text).with_attr("href", href)
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }
}

impl PageElement for FakeElement {
    async fn text(&self) -> Result<String, ScrapeError> {
        Ok(self.text.clone())
    }

    async fn attr(&self, name: &str) -> Result<Option<String>, ScrapeError> {
        Ok(self.attrs.get(name).cloned())
    }

    async fn href(&self) -> Result<Option<String>, ScrapeError> {
        Ok(self.attrs.get("href").cloned())
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakePage {
    elements: HashMap<Locator, Vec<FakeElement>>,
    broken: HashSet<Locator>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `element` to the matches for `locator`, keeping insertion order.
    pub fn with(mut self, locator: Locator, element: FakeElement) -> Self {
        self.elements.entry(locator).or_default().push(element);
        self
    }

    /// Make every lookup of `locator` on this page fail with a command error.
    pub fn failing_find(mut self, locator: Locator) -> Self {
        self.broken.insert(locator);
        self
    }

    fn lookup(&self, locator: &Locator) -> Result<Option<&Vec<FakeElement>>, ScrapeError> {
        if self.broken.contains(locator) {
            return Err(ScrapeError::command(
                &format!("find {}", locator),
                "stale element reference",
            ));
        }
        Ok(self.elements.get(locator))
    }
}

#[derive(Debug, Default)]
pub struct FakeBrowser {
    pages: HashMap<String, FakePage>,
    failures: HashMap<String, u32>,
    current: Option<String>,
    visits: Vec<String>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, page: FakePage) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    /// Make the next `times` navigations to `url` fail.
    pub fn failing(mut self, url: &str, times: u32) -> Self {
        self.failures.insert(url.to_string(), times);
        self
    }

    /// Every URL navigation was attempted for, in order.
    pub fn visits(&self) -> &[String] {
        &self.visits
    }

    fn current_page(&self) -> Result<&FakePage, ScrapeError> {
        self.current
            .as_ref()
            .and_then(|url| self.pages.get(url))
            .ok_or_else(|| ScrapeError::command("find", "no page loaded"))
    }
}

impl Browser for FakeBrowser {
    type Element = FakeElement;

    async fn navigate(&mut self, url: &str) -> Result<(), ScrapeError> {
        self.visits.push(url.to_string());
        if let Some(remaining) = self.failures.get_mut(url) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(ScrapeError::Navigation {
                    url: url.to_string(),
                    reason: "connection reset".into(),
                });
            }
        }
        if !self.pages.contains_key(url) {
            return Err(ScrapeError::Navigation {
                url: url.to_string(),
                reason: "page not found".into(),
            });
        }
        self.current = Some(url.to_string());
        Ok(())
    }

    async fn find(&self, locator: &Locator) -> Result<Option<FakeElement>, ScrapeError> {
        Ok(self
            .current_page()?
            .lookup(locator)?
            .and_then(|found| found.first())
            .cloned())
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<FakeElement>, ScrapeError> {
        Ok(self
            .current_page()?
            .lookup(locator)?
            .cloned()
            .unwrap_or_default())
    }
}
