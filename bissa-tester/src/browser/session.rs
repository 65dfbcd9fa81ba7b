use std::time::Duration;
use thirtyfour::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BrowserKind {
    Chrome,
    Edge,
    Firefox,
    Safari,
}

impl BrowserKind {
    /// Default local driver endpoint.
    #[must_use]
    pub const fn driver_url(self) -> &'static str {
        match self {
            Self::Chrome => "http://localhost:9515",
            Self::Edge => "http://localhost:17556",
            Self::Firefox => "http://localhost:4444",
            Self::Safari => "http://localhost:4445",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub headless: bool,
    pub implicit_wait_secs: u64,
    pub remote_hub: Option<String>,
    /// UI language passed to Chromium browsers; the pages default to Indonesian.
    pub lang: String,
    pub window_size: (u32, u32),
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            implicit_wait_secs: 3,
            remote_hub: None,
            lang: "id-ID".to_string(),
            window_size: (1280, 900),
        }
    }
}

impl BrowserConfig {
    fn chromium_args(&self) -> Vec<String> {
        let (w, h) = self.window_size;
        vec![format!("--lang={}", self.lang), format!("--window-size={w},{h}")]
    }

    fn endpoint(&self, kind: BrowserKind) -> &str {
        self.remote_hub.as_deref().unwrap_or(kind.driver_url())
    }
}

pub async fn new_session(kind: BrowserKind, cfg: &BrowserConfig) -> WebDriverResult<WebDriver> {
    let url = cfg.endpoint(kind);
    let driver = match kind {
        BrowserKind::Chrome => {
            let mut caps = DesiredCapabilities::chrome();
            if cfg.headless {
                caps.set_headless()?;
            }
            for arg in cfg.chromium_args() {
                caps.add_arg(&arg)?;
            }
            WebDriver::new(url, caps).await?
        }
        BrowserKind::Edge => {
            let mut caps = DesiredCapabilities::edge();
            if cfg.headless {
                caps.set_headless()?;
            }
            for arg in cfg.chromium_args() {
                caps.add_arg(&arg)?;
            }
            WebDriver::new(url, caps).await?
        }
        BrowserKind::Firefox => {
            let mut caps = DesiredCapabilities::firefox();
            if cfg.headless {
                caps.set_headless()?;
            }
            WebDriver::new(url, caps).await?
        }
        BrowserKind::Safari => {
            let caps = DesiredCapabilities::safari();
            WebDriver::new(url, caps).await?
        }
    };

    driver
        .set_implicit_wait_timeout(Duration::from_secs(cfg.implicit_wait_secs))
        .await?;
    if kind == BrowserKind::Firefox || kind == BrowserKind::Safari {
        let (w, h) = cfg.window_size;
        driver.set_window_rect(0, 0, w, h).await?;
    }
    Ok(driver)
}
