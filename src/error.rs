//! Error types for browser-driven scraping.

use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop a run. A missing page element is not one of them:
/// lookups report absence as `Ok(None)` and the extractor substitutes the
/// sentinel.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The WebDriver binary could not be started.
    #[error("failed to launch WebDriver binary {path:?}: {source}")]
    DriverLaunch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No session could be opened against the WebDriver server.
    #[error("failed to open WebDriver session at {url}: {reason}")]
    Session { url: String, reason: String },

    /// Loading a page failed.
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// Any other WebDriver command failed.
    #[error("WebDriver command '{action}' failed: {reason}")]
    Command { action: String, reason: String },

    /// A labelled field was present but its text did not carry the label.
    #[error("{field} on {url} does not contain the label {prefix:?}")]
    LabelMissing {
        field: &'static str,
        url: String,
        prefix: &'static str,
    },
}

impl ScrapeError {
    pub fn command(action: &str, reason: impl ToString) -> Self {
        ScrapeError::Command {
            action: action.to_string(),
            reason: reason.to_string(),
        }
    }
}
