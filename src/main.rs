mod browser;
mod catalog;
mod error;
mod extract;
mod output;
mod pipeline;
mod record;
mod site;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::{info, warn};

use browser::webdriver::{LaunchOptions, WebDriverSession};
use browser::RetryPolicy;
use output::CsvSink;
use pipeline::RunOptions;

#[derive(Parser)]
#[command(name = "plant_scraper", about = "Plant catalog scraper driven through WebDriver")]
struct Cli {
    /// CSV file to write (truncated at start)
    #[arg(short, long, default_value = output::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// WebDriver binary to launch
    #[arg(long, default_value = "./chromedriver")]
    driver_path: PathBuf,

    /// Port the launched WebDriver listens on
    #[arg(long, default_value_t = 9515)]
    port: u16,

    /// Use an already running WebDriver server instead of launching one
    #[arg(long)]
    webdriver_url: Option<String>,

    /// Category listing page to start from
    #[arg(long, default_value = site::LISTING_URL)]
    listing_url: String,

    /// Run the browser without a window
    #[arg(long)]
    headless: bool,

    /// Browser window size as WIDTH,HEIGHT
    #[arg(long, default_value = "1920,1080", value_parser = parse_window_size)]
    window_size: (u32, u32),

    /// Extra attempts for a failed page load (0 = fail immediately)
    #[arg(long, default_value_t = 0)]
    nav_retries: u32,

    /// Stop after this many plants
    #[arg(short = 'n', long)]
    limit: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let launch = LaunchOptions {
        driver_path: cli.driver_path,
        port: cli.port,
        webdriver_url: cli.webdriver_url,
        headless: cli.headless,
        window_size: cli.window_size,
    };
    let mut session = WebDriverSession::launch(&launch).await?;

    let sink = match CsvSink::create(&cli.output) {
        Ok(sink) => sink,
        Err(e) => {
            if let Err(close_err) = session.close().await {
                warn!("Failed to close browser session: {}", close_err);
            }
            return Err(e);
        }
    };

    let opts = RunOptions {
        listing_url: cli.listing_url,
        retry: RetryPolicy::new(cli.nav_retries),
        limit: cli.limit,
    };
    let result = pipeline::run(&mut session, &sink, &opts).await;

    if let Err(e) = session.close().await {
        warn!("Failed to close browser session: {}", e);
    }

    let stats = result?;
    info!(
        "Wrote {} plants from {} categories to {} in {}",
        stats.items,
        stats.categories,
        sink.path().display(),
        format_duration(t0.elapsed())
    );
    Ok(())
}

fn parse_window_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(|c: char| c == ',' || c == 'x')
        .ok_or_else(|| format!("expected WIDTH,HEIGHT, got {:?}", s))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid dimension {:?}: {}", v, e))
    };
    Ok((parse(w)?, parse(h)?))
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
