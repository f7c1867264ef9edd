use tracing::info;

use crate::browser::{self, Browser, PageElement, RetryPolicy};
use crate::error::ScrapeError;
use crate::site;

/// A top-level plant category and its listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub label: String,
    pub url: String,
}

/// Category links on the listing page, in document order. Duplicates are kept.
pub async fn enumerate_categories<B: Browser>(
    browser: &mut B,
    listing_url: &str,
    retry: &RetryPolicy,
) -> Result<Vec<Category>, ScrapeError> {
    info!("Fetching category listing: {}", listing_url);
    browser::navigate(browser, listing_url, retry).await?;

    let anchors = browser.find_all(&site::CATEGORY_LINKS).await?;
    let mut categories = Vec::with_capacity(anchors.len());
    for anchor in &anchors {
        let Some(url) = anchor.href().await? else {
            continue;
        };
        categories.push(Category {
            label: anchor.text().await?,
            url,
        });
    }

    info!("Found {} categories", categories.len());
    Ok(categories)
}

/// Plant detail URLs linked from a category page, in document order.
pub async fn enumerate_items<B: Browser>(
    browser: &mut B,
    category: &Category,
    retry: &RetryPolicy,
) -> Result<Vec<String>, ScrapeError> {
    browser::navigate(browser, &category.url, retry).await?;

    let anchors = browser.find_all(&site::ITEM_LINKS).await?;
    let mut items = Vec::with_capacity(anchors.len());
    for anchor in &anchors {
        if let Some(url) = anchor.href().await? {
            items.push(url);
        }
    }

    info!("{}: {} plants", category.label, items.len());
    Ok(items)
}
