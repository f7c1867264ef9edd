use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::browser::{Browser, RetryPolicy};
use crate::catalog;
use crate::extract;
use crate::output::CsvSink;

pub struct RunOptions {
    pub listing_url: String,
    pub retry: RetryPolicy,
    /// Stop after this many items.
    pub limit: Option<usize>,
}

/// Counts returned after a completed run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub categories: usize,
    pub items: usize,
}

/// Walk categories, then the plants under each, writing one row per plant.
///
/// Strictly sequential over a single browser session. The first error ends
/// the run; rows already appended stay in the output file.
pub async fn run<B: Browser>(
    browser: &mut B,
    sink: &CsvSink,
    opts: &RunOptions,
) -> Result<RunStats> {
    let categories = catalog::enumerate_categories(browser, &opts.listing_url, &opts.retry).await?;
    let mut stats = RunStats::default();

    for category in &categories {
        if limit_reached(opts, &stats) {
            info!("Item limit reached, stopping");
            break;
        }
        let items = catalog::enumerate_items(browser, category, &opts.retry).await?;
        stats.categories += 1;

        let pb = progress_bar(items.len());
        for url in &items {
            if limit_reached(opts, &stats) {
                break;
            }

            pb.suspend(|| println!("Getting data for URL: {}", url));
            let record = extract::extract_item(browser, &category.label, url, &opts.retry).await?;
            sink.append(&record)?;
            stats.items += 1;
            pb.inc(1);
        }
        pb.finish_and_clear();
    }

    Ok(stats)
}

fn limit_reached(opts: &RunOptions, stats: &RunStats) -> bool {
    opts.limit.is_some_and(|limit| stats.items >= limit)
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}
