//! Markup contract of the catalog site. A change on the remote side should
//! only ever need an edit in this file.

use crate::browser::Locator;

pub const LISTING_URL: &str = "http://www.qscaping.com/20000011/Results/List";

pub const CATEGORY_LINKS: Locator = Locator::XPath("//a[contains(@href, '/Results/List/pere')]");
pub const ITEM_LINKS: Locator = Locator::XPath("//a[contains(@href, '/Plant/')]");

/// What to read off a matched element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Read {
    Text,
    Attribute(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub locator: Locator,
    pub read: Read,
    /// Label the value is prefixed with, e.g. `"Height: "`. The value is
    /// the trimmed text after it.
    pub label: Option<&'static str>,
}

/// Detail-page fields, in output column order after the category.
pub const FIELDS: [FieldRule; 8] = [
    FieldRule {
        name: "common name",
        locator: Locator::XPath("//p[@id='NetPS-PlantCommonName']"),
        read: Read::Text,
        label: None,
    },
    FieldRule {
        name: "botanic name",
        locator: Locator::XPath("//p[@id='NetPS-PlantBotanicName']"),
        read: Read::Text,
        label: None,
    },
    FieldRule {
        name: "height",
        locator: Locator::XPath("//p[@id='NetPS-PlantHeight']"),
        read: Read::Text,
        label: Some("Height: "),
    },
    FieldRule {
        name: "spread",
        locator: Locator::XPath("//p[@id='NetPS-PlantSpread']"),
        read: Read::Text,
        label: Some("Spread: "),
    },
    FieldRule {
        name: "sunlight",
        locator: Locator::Class("NetPS-PlantLightIcon"),
        read: Read::Attribute("title"),
        label: None,
    },
    FieldRule {
        name: "hardiness zone",
        locator: Locator::XPath("//p[@id='NetPS-PlantHardiness']"),
        read: Read::Text,
        label: Some("Hardiness Zone: "),
    },
    FieldRule {
        name: "other names",
        locator: Locator::XPath("//p[@id='NetPS-PlantOtherSpecies']"),
        read: Read::Text,
        label: Some("Other Names: "),
    },
    FieldRule {
        name: "full info",
        locator: Locator::XPath("//div[@id='NetPS-PlantBox']"),
        read: Read::Text,
        label: None,
    },
];
