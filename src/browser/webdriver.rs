use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use fantoccini::elements::Element;
use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use super::{Browser, Locator, PageElement};
use crate::error::ScrapeError;

// A freshly spawned driver needs a moment before it accepts sessions.
const CONNECT_ATTEMPTS: u32 = 40;
const CONNECT_INTERVAL_MS: u64 = 250;

/// How to start the browser.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub driver_path: PathBuf,
    pub port: u16,
    /// Connect to this server instead of spawning `driver_path`.
    pub webdriver_url: Option<String>,
    pub headless: bool,
    pub window_size: (u32, u32),
}

/// Chrome session over WebDriver, plus the driver process when we own it.
pub struct WebDriverSession {
    client: Client,
    driver: Option<Child>,
}

impl WebDriverSession {
    pub async fn launch(opts: &LaunchOptions) -> Result<Self, ScrapeError> {
        let (url, driver, attempts) = match &opts.webdriver_url {
            Some(url) => (url.clone(), None, 1),
            None => {
                let child = spawn_driver(&opts.driver_path, opts.port)?;
                (
                    format!("http://localhost:{}", opts.port),
                    Some(child),
                    CONNECT_ATTEMPTS,
                )
            }
        };

        let client = connect(&url, capabilities(opts), attempts).await?;
        info!("WebDriver session open at {}", url);
        Ok(Self { client, driver })
    }

    /// End the browser session and stop the driver process.
    pub async fn close(self) -> Result<(), ScrapeError> {
        let WebDriverSession { client, driver } = self;
        let closed = client
            .close()
            .await
            .map_err(|e| ScrapeError::command("close session", e));
        if let Some(mut child) = driver {
            debug!("Stopping WebDriver process");
            if let Err(e) = child.kill().await {
                warn!("Failed to stop WebDriver process: {}", e);
            }
        }
        closed
    }
}

impl Browser for WebDriverSession {
    type Element = Element;

    async fn navigate(&mut self, url: &str) -> Result<(), ScrapeError> {
        self.client
            .goto(url)
            .await
            .map_err(|e| ScrapeError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }

    async fn find(&self, locator: &Locator) -> Result<Option<Element>, ScrapeError> {
        let mut css = String::new();
        match self.client.find(webdriver_locator(locator, &mut css)).await {
            Ok(element) => Ok(Some(element)),
            Err(e) if e.is_no_such_element() => Ok(None),
            Err(e) => Err(ScrapeError::command(&format!("find {}", locator), e)),
        }
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<Element>, ScrapeError> {
        let mut css = String::new();
        self.client
            .find_all(webdriver_locator(locator, &mut css))
            .await
            .map_err(|e| ScrapeError::command(&format!("find all {}", locator), e))
    }
}

impl PageElement for Element {
    async fn text(&self) -> Result<String, ScrapeError> {
        Element::text(self)
            .await
            .map_err(|e| ScrapeError::command("read text", e))
    }

    async fn attr(&self, name: &str) -> Result<Option<String>, ScrapeError> {
        Element::attr(self, name)
            .await
            .map_err(|e| ScrapeError::command(&format!("read attribute {}", name), e))
    }

    async fn href(&self) -> Result<Option<String>, ScrapeError> {
        // The DOM property carries the absolute URL; the attribute may be relative.
        Element::prop(self, "href")
            .await
            .map_err(|e| ScrapeError::command("read href", e))
    }
}

fn webdriver_locator<'a>(locator: &'a Locator, css: &'a mut String) -> fantoccini::Locator<'a> {
    match locator {
        Locator::XPath(path) => fantoccini::Locator::XPath(path),
        Locator::Class(name) => {
            *css = format!(".{}", name);
            fantoccini::Locator::Css(css.as_str())
        }
    }
}

fn spawn_driver(path: &Path, port: u16) -> Result<Child, ScrapeError> {
    info!("Starting WebDriver {} on port {}", path.display(), port);
    Command::new(path)
        .arg(format!("--port={}", port))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ScrapeError::DriverLaunch {
            path: path.to_path_buf(),
            source,
        })
}

async fn connect(url: &str, caps: Capabilities, attempts: u32) -> Result<Client, ScrapeError> {
    let mut builder = ClientBuilder::native();
    builder.capabilities(caps);

    let mut last_error = String::new();
    for attempt in 1..=attempts {
        match builder.connect(url).await {
            Ok(client) => return Ok(client),
            Err(e) => {
                debug!("WebDriver not ready (attempt {}/{}): {}", attempt, attempts, e);
                last_error = e.to_string();
            }
        }
        if attempt < attempts {
            tokio::time::sleep(Duration::from_millis(CONNECT_INTERVAL_MS)).await;
        }
    }

    Err(ScrapeError::Session {
        url: url.to_string(),
        reason: last_error,
    })
}

fn capabilities(opts: &LaunchOptions) -> Capabilities {
    let (width, height) = opts.window_size;
    let mut args = vec![
        format!("--window-size={},{}", width, height),
        "--start-maximized".to_string(),
    ];
    if opts.headless {
        args.push("--headless".to_string());
    }

    let mut caps = Capabilities::new();
    caps.insert("browserName".to_string(), json!("chrome"));
    caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
    caps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(headless: bool) -> LaunchOptions {
        LaunchOptions {
            driver_path: PathBuf::from("./chromedriver"),
            port: 9515,
            webdriver_url: None,
            headless,
            window_size: (1920, 1080),
        }
    }

    #[test]
    fn chrome_arguments_carry_window_setup() {
        let caps = capabilities(&options(false));
        assert_eq!(caps["browserName"], "chrome");
        assert_eq!(
            caps["goog:chromeOptions"]["args"],
            json!(["--window-size=1920,1080", "--start-maximized"])
        );
    }

    #[test]
    fn headless_adds_flag() {
        let caps = capabilities(&options(true));
        let args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(args.iter().any(|a| a == "--headless"));
    }

    #[test]
    fn class_locator_becomes_css_selector() {
        let mut css = String::new();
        let locator = Locator::Class("NetPS-PlantLightIcon");
        assert!(matches!(
            webdriver_locator(&locator, &mut css),
            fantoccini::Locator::Css(".NetPS-PlantLightIcon")
        ));
    }

    #[tokio::test]
    async fn missing_driver_binary_is_a_launch_error() {
        let mut opts = options(true);
        opts.driver_path = PathBuf::from("./definitely-not-a-webdriver");
        match WebDriverSession::launch(&opts).await {
            Err(ScrapeError::DriverLaunch { path, .. }) => assert_eq!(path, opts.driver_path),
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("launch should fail"),
        }
    }
}
