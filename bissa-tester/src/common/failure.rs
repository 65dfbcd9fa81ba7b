//! Evidence saved when a browser scenario fails.
//!
//! Alongside a screenshot and the DOM, the report records what the overlay
//! believed (the bridge snapshot) next to what the document shows (the
//! inline style and classes on `<html>`), since most overlay bugs are a
//! mismatch between the two.

use crate::browser::{BridgeState, TestBridge};
use anyhow::{Context, Result};
use bissa_core::constants::READING_GUIDE_ID;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thirtyfour::prelude::*;

const ROOT_PROBE: &str = r"
const root = document.documentElement;
return {
  style: root.getAttribute('style') || '',
  classes: root.className || '',
  lang: root.getAttribute('lang') || '',
  readingGuide: !!document.getElementById(arguments[0]),
  panelOpen: !!document.getElementById('accessibility-panel'),
};";

/// What the live document shows on its root element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RootProbe {
    pub style: String,
    pub classes: String,
    pub lang: String,
    pub reading_guide: bool,
    pub panel_open: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureReport {
    pub scenario: String,
    pub browser: String,
    pub url: Option<String>,
    pub error: String,
    pub root: Option<RootProbe>,
    pub bridge: Option<BridgeState>,
}

impl FailureReport {
    /// One line for the console next to the failure.
    #[must_use]
    pub fn summary(&self) -> String {
        let route = self
            .bridge
            .as_ref()
            .and_then(|b| b.route.as_deref())
            .unwrap_or("?");
        let overlay = match self.bridge.as_ref().and_then(|b| b.overlay.as_ref()) {
            Some(o) if o.flag("enabled") => "on",
            Some(_) => "off",
            None => "unmounted",
        };
        let style = self.root.as_ref().map_or("?", |r| r.style.as_str());
        format!("route {route}, overlay {overlay}, root style '{style}'")
    }
}

pub struct FailureCapture {
    screenshot: Option<Vec<u8>>,
    dom: Option<String>,
    pub report: FailureReport,
}

async fn probe_root(driver: &WebDriver) -> Result<RootProbe> {
    let ret = driver
        .execute(ROOT_PROBE, vec![READING_GUIDE_ID.into()])
        .await?;
    serde_json::from_value(ret.json().clone()).context("parsing root probe")
}

impl FailureCapture {
    /// Gather everything the page can still tell us. Each probe is best
    /// effort; a dead session yields an almost empty report.
    pub async fn collect(
        driver: &WebDriver,
        browser: &str,
        scenario: &str,
        err: &anyhow::Error,
    ) -> Self {
        let report = FailureReport {
            scenario: scenario.to_string(),
            browser: browser.to_string(),
            url: driver.current_url().await.ok().map(|u| u.to_string()),
            error: format!("{err:#}"),
            root: probe_root(driver).await.ok(),
            bridge: TestBridge::new(driver).state().await.ok(),
        };
        Self {
            screenshot: driver.screenshot_as_png().await.ok(),
            dom: driver.source().await.ok(),
            report,
        }
    }

    /// Write under `<base>/<browser>/<scenario>/<timestamp>/` and return that directory.
    pub fn write_under(&self, base: &Path) -> Result<PathBuf> {
        let dir = failure_dir(base, &self.report.browser, &self.report.scenario);
        fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
        if let Some(png) = &self.screenshot {
            fs::write(dir.join("screenshot.png"), png).context("writing screenshot")?;
        }
        if let Some(dom) = &self.dom {
            fs::write(dir.join("dom.html"), dom).context("writing DOM snapshot")?;
        }
        let report = serde_json::to_vec_pretty(&self.report)?;
        fs::write(dir.join("failure.json"), report).context("writing failure report")?;
        Ok(dir)
    }
}

#[must_use]
pub fn failure_dir(base: &Path, browser: &str, scenario: &str) -> PathBuf {
    let ts = Utc::now().format("%Y%m%dT%H%M%S%.3f").to_string();
    base.join(browser).join(scenario).join(ts)
}
