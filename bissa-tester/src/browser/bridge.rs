use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thirtyfour::prelude::*;

/// Overlay section of `window.__bissaTest.state()`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OverlayState {
    #[serde(default)]
    pub settings: Value,
    #[serde(default)]
    pub registrations: Vec<String>,
    pub filter: Option<String>,
    #[serde(default)]
    pub speech_attached: bool,
}

impl OverlayState {
    /// A boolean field of the settings record; absent keys read as `false`.
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        self.settings
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        self.settings.get(key).and_then(Value::as_f64)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BridgeState {
    pub route: Option<String>,
    pub path: Option<String>,
    /// `None` before the overlay mounted.
    pub overlay: Option<OverlayState>,
}

#[derive(Debug, Clone)]
pub struct TestBridge<'a> {
    driver: &'a WebDriver,
}

impl<'a> TestBridge<'a> {
    pub const fn new(driver: &'a WebDriver) -> Self {
        Self { driver }
    }

    pub async fn ensure_available(&self) -> Result<()> {
        let result = self
            .driver
            .execute("return !!window.__bissaTest", vec![])
            .await?;
        let ok = result.json().as_bool().unwrap_or(false);
        if !ok {
            bail!("__bissaTest is not available. Did you open the page with ?test=1?");
        }
        Ok(())
    }

    pub async fn toggle(&self, key: &str) -> Result<()> {
        self.driver
            .execute("window.__bissaTest.toggle(arguments[0])", vec![key.into()])
            .await?;
        Ok(())
    }

    pub async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.driver
            .execute(
                "window.__bissaTest.set(arguments[0], arguments[1])",
                vec![key.into(), value],
            )
            .await?;
        Ok(())
    }

    pub async fn reset(&self) -> Result<()> {
        self.driver
            .execute("window.__bissaTest.reset()", vec![])
            .await?;
        Ok(())
    }

    pub async fn state(&self) -> Result<BridgeState> {
        let result = self
            .driver
            .execute("return window.__bissaTest.state()", vec![])
            .await?;
        let v = result.json().clone();
        serde_json::from_value(v).context("parsing bridge state")
    }

    /// Inline custom property on `<html>`; empty when unset.
    pub async fn root_property(&self, name: &str) -> Result<String> {
        let result = self
            .driver
            .execute(
                "return document.documentElement.style.getPropertyValue(arguments[0])",
                vec![name.into()],
            )
            .await?;
        Ok(result.json().as_str().unwrap_or_default().trim().to_string())
    }

    pub async fn root_filter(&self) -> Result<String> {
        self.root_property("filter").await
    }

    pub async fn root_has_class(&self, class: &str) -> Result<bool> {
        let result = self
            .driver
            .execute(
                "return document.documentElement.classList.contains(arguments[0])",
                vec![class.into()],
            )
            .await?;
        Ok(result.json().as_bool().unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bridge_state_parses_overlay_snapshot() {
        let raw = json!({
            "route": "home",
            "path": "/",
            "overlay": {
                "settings": {"enabled": true, "fontSize": 150},
                "registrations": ["visual", "speech"],
                "filter": "contrast(150%)",
                "speechAttached": true
            }
        });
        let state: BridgeState = serde_json::from_value(raw).expect("parse state");
        let overlay = state.overlay.expect("overlay present");
        assert!(overlay.flag("enabled"));
        assert!(!overlay.flag("grayscale"));
        assert_eq!(overlay.number("fontSize"), Some(150.0));
        assert!(overlay.speech_attached);
        assert_eq!(state.route.as_deref(), Some("home"));
    }

    #[test]
    fn missing_overlay_is_tolerated() {
        let state: BridgeState =
            serde_json::from_value(json!({"route": "cari-kerja", "path": "/cari-kerja"}))
                .expect("parse state");
        assert!(state.overlay.is_none());
    }
}
