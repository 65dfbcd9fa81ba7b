use anyhow::{Context, Result};
use std::time::Duration;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario};
use bissa_core::headless::HeadlessRig;
use bissa_core::settings::{SettingChange, Toggle};

/// Opens the overlay dialog, flips switches by clicking, closes with Escape.
pub struct PanelScenario;

async fn pause() {
    tokio::time::sleep(Duration::from_millis(150)).await;
}

#[async_trait::async_trait]
impl BrowserScenario for PanelScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        driver.goto(&ctx.base_url).await?;
        ctx.bridge.ensure_available().await?;
        ctx.bridge.reset().await?;

        let trigger = driver
            .find(By::Css("#accessibility-overlay .overlay-trigger"))
            .await
            .context("overlay trigger missing")?;
        trigger.click().await?;
        pause().await;

        let panel = driver
            .find(By::Css("#accessibility-panel[role='dialog']"))
            .await
            .context("dialog did not open")?;
        if ctx.verbose {
            println!("  🪟 Accessibility dialog opened");
        }

        panel
            .find(By::Css("[data-toggle='enabled']"))
            .await?
            .click()
            .await?;
        pause().await;
        panel
            .find(By::Css("[data-toggle='focusMode']"))
            .await?
            .click()
            .await?;
        pause().await;

        let state = ctx.bridge.state().await?;
        let overlay = state.overlay.context("overlay not mounted")?;
        anyhow::ensure!(overlay.flag("enabled"), "master switch should be on");
        anyhow::ensure!(overlay.flag("focusMode"), "focus mode should be on");
        anyhow::ensure!(
            ctx.bridge.root_has_class("focus-mode").await?,
            "focus-mode class should be on <html>"
        );
        let focus_switch = panel.find(By::Css("[data-toggle='focusMode']")).await?;
        let checked = focus_switch.attr("aria-checked").await?;
        anyhow::ensure!(
            checked.as_deref() == Some("true"),
            "switch should report aria-checked=true, got {checked:?}"
        );

        // Escape bubbles from the focused switch up to the dialog.
        focus_switch.send_keys(Key::Escape).await?;
        pause().await;
        let still_open = driver.find_all(By::Css("#accessibility-panel")).await?;
        anyhow::ensure!(still_open.is_empty(), "Escape should close the dialog");

        ctx.bridge.reset().await?;
        anyhow::ensure!(
            !ctx.bridge.root_has_class("focus-mode").await?,
            "reset should drop the focus-mode class"
        );
        Ok(())
    }
}

impl CombinedScenario for PanelScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::headless("Overlay Panel Interaction", panel_check))
    }
}

/// The same switch sequence the browser run clicks through.
fn panel_check(rig: &HeadlessRig) -> Result<()> {
    let mut overlay = rig.mount();
    for toggle in [Toggle::Enabled, Toggle::FocusMode] {
        overlay.change(SettingChange::Toggle(toggle));
    }
    let snapshot = overlay.snapshot();
    anyhow::ensure!(snapshot.settings.focus_mode, "focus mode should be on");
    anyhow::ensure!(rig.surface.has_class("focus-mode"), "focus-mode class applied");
    overlay.reset();
    anyhow::ensure!(!rig.surface.has_class("focus-mode"), "reset removes the class");
    Ok(())
}
