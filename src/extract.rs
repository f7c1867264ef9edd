use tracing::debug;

use crate::browser::{self, Browser, PageElement, RetryPolicy};
use crate::error::ScrapeError;
use crate::record::{ItemRecord, NOT_GIVEN};
use crate::site::{FieldRule, Read, FIELDS};

/// Load a plant detail page and read every field off it.
///
/// Each field is looked up independently; an absent element yields
/// [`NOT_GIVEN`] for that field only. Any other failure, including a
/// labelled field whose text lacks its label, aborts the item.
pub async fn extract_item<B: Browser>(
    browser: &mut B,
    category: &str,
    url: &str,
    retry: &RetryPolicy,
) -> Result<ItemRecord, ScrapeError> {
    browser::navigate(browser, url, retry).await?;

    let mut values: [String; 8] = Default::default();
    for (value, rule) in values.iter_mut().zip(FIELDS.iter()) {
        *value = read_field(&*browser, rule, url).await?;
    }
    Ok(ItemRecord::new(category, values))
}

async fn read_field<B: Browser>(
    browser: &B,
    rule: &FieldRule,
    url: &str,
) -> Result<String, ScrapeError> {
    let Some(element) = browser.find(&rule.locator).await? else {
        debug!("{} not present on {}", rule.name, url);
        return Ok(NOT_GIVEN.to_string());
    };

    let raw = match rule.read {
        Read::Text => element.text().await?,
        Read::Attribute(name) => match element.attr(name).await? {
            Some(value) => value,
            None => {
                debug!("{} has no {} attribute on {}", rule.name, name, url);
                return Ok(NOT_GIVEN.to_string());
            }
        },
    };

    match rule.label {
        None => Ok(raw),
        Some(prefix) => strip_label(&raw, prefix)
            .map(str::to_string)
            .ok_or_else(|| ScrapeError::LabelMissing {
                field: rule.name,
                url: url.to_string(),
                prefix,
            }),
    }
}

/// Text between the first and second occurrence of `label`, trimmed.
/// `None` when `label` does not occur.
pub fn strip_label<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    text.split(label).nth(1).map(str::trim)
}
