use anyhow::Result;
use bissa_core::headless::HeadlessRig;
use thirtyfour::prelude::*;

use crate::browser::TestBridge;
use catalog::find_catalog_scenario;

pub mod catalog;
pub mod panel;
pub mod smoke;

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub base_url: String,
    pub bridge: TestBridge<'a>,
    pub verbose: bool,
}

impl ScenarioCtx<'_> {
    /// Page `path` under the app root in `base_url`, keeping its query.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        let (root, query) = match self.base_url.split_once('?') {
            Some((root, query)) => (root, Some(query)),
            None => (self.base_url.as_str(), None),
        };
        let page = format!(
            "{}/{}",
            root.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        match query {
            Some(q) => format!("{page}?{q}"),
            None => page,
        }
    }
}

/// A check against a freshly wired headless overlay.
pub type LogicCheck = fn(&HeadlessRig) -> Result<()>;

// Logic test scenario
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub check: LogicCheck,
}

impl TestScenario {
    #[must_use]
    pub fn headless(name: impl Into<String>, check: LogicCheck) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

// Browser test scenario
#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()>;
}

// Combined scenario that can run both logic and browser tests
pub trait CombinedScenario: BrowserScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario>;
}

/// Logic-only scenario backed by the headless rig.
#[derive(Clone)]
pub struct OverlayScenario {
    name: &'static str,
    check: LogicCheck,
    browser_message: &'static str,
}

impl OverlayScenario {
    pub const fn new(name: &'static str, check: LogicCheck) -> Self {
        Self {
            name,
            check,
            browser_message: "Browser testing not implemented for this headless scenario",
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

#[async_trait::async_trait]
impl BrowserScenario for OverlayScenario {
    async fn run_browser(&self, _driver: &WebDriver, _ctx: &ScenarioCtx<'_>) -> Result<()> {
        anyhow::bail!(self.browser_message)
    }
}

impl CombinedScenario for OverlayScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::headless(self.name, self.check))
    }
}

fn catalog_entry(name: &str) -> Option<Box<dyn CombinedScenario + Send + Sync>> {
    find_catalog_scenario(name).map(|scenario| Box::new(scenario) as _)
}

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario + Send + Sync>> {
    match name.to_lowercase().as_str() {
        "smoke" => Some(Box::new(smoke::SmokeScenario)),
        "overlay-panel" | "panel" => Some(Box::new(panel::PanelScenario)),
        "settings-persistence" | "persistence" => catalog_entry("Settings Persistence"),
        "visual-effects" | "effects" => catalog_entry("Visual Effects"),
        "listener-lifecycle" | "lifecycle" => catalog_entry("Listener Lifecycle"),
        "speech-narration" | "speech" => catalog_entry("Speech Narration"),
        "speech-keyboard" | "keyboard" => catalog_entry("Speech Keyboard Control"),
        "route-reinit" | "route" => catalog_entry("Route Re-initialization"),
        "reset-and-unmount" | "reset" => catalog_entry("Reset and Unmount"),
        "job-filtering" | "jobs" => catalog_entry("Job Filtering"),
        "listing-errors" | "errors" => catalog_entry("Listing Error Messages"),
        _ => None,
    }
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        ("smoke", "Smoke Test"),
        ("overlay-panel", "Overlay Panel Interaction"),
        ("settings-persistence", "Settings Persistence"),
        ("visual-effects", "Visual Effects"),
        ("listener-lifecycle", "Listener Lifecycle"),
        ("speech-narration", "Speech Narration"),
        ("speech-keyboard", "Speech Keyboard Control"),
        ("route-reinit", "Route Re-initialization"),
        ("reset-and-unmount", "Reset and Unmount"),
        ("job-filtering", "Job Filtering"),
        ("listing-errors", "Listing Error Messages"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_scenario_resolves() {
        for (key, _) in list_scenarios() {
            assert!(get_scenario(key).is_some(), "scenario {key} should resolve");
        }
        assert!(get_scenario("nope").is_none());
    }

    #[test]
    fn every_logic_scenario_passes_on_a_fresh_rig() {
        for (key, _) in list_scenarios() {
            let Some(logic) = get_scenario(key).and_then(|s| s.as_logic_scenario()) else {
                continue;
            };
            let rig = HeadlessRig::new();
            if let Err(err) = (logic.check)(&rig) {
                panic!("{} failed: {err:#}", logic.name);
            }
        }
    }
}
