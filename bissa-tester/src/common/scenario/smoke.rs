use anyhow::{Context, Result};
use serde_json::json;
use std::time::Duration;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario};
use bissa_core::constants::CSS_FONT_SCALE;
use bissa_core::headless::HeadlessRig;
use bissa_core::settings::{SettingChange, Toggle};

pub struct SmokeScenario;

#[async_trait::async_trait]
impl BrowserScenario for SmokeScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        driver.goto(&ctx.base_url).await?;
        driver
            .find(By::Css("main#main"))
            .await
            .context("main landmark missing")?;
        ctx.bridge.ensure_available().await?;

        let state = ctx.bridge.state().await?;
        anyhow::ensure!(
            state.route.as_deref() == Some("home"),
            "expected the landing route, got {:?}",
            state.route
        );
        if ctx.verbose {
            println!("  🌐 Landing page loaded, bridge connected");
        }

        ctx.bridge.toggle("enabled").await?;
        ctx.bridge.set("fontSize", json!(150)).await?;
        ctx.bridge.toggle("grayscale").await?;
        tokio::time::sleep(Duration::from_millis(100)).await;

        let font_size = ctx
            .bridge
            .state()
            .await?
            .overlay
            .and_then(|o| o.number("fontSize"));
        anyhow::ensure!(
            font_size == Some(150.0),
            "bridge should report fontSize 150, got {font_size:?}"
        );
        let scale = ctx.bridge.root_property(CSS_FONT_SCALE).await?;
        anyhow::ensure!(scale == "1.5", "font scale should be 1.5, got '{scale}'");
        let filter = ctx.bridge.root_filter().await?;
        anyhow::ensure!(
            filter.contains("grayscale(1)"),
            "grayscale filter missing, got '{filter}'"
        );
        if ctx.verbose {
            println!("  🎨 Effects applied: scale {scale}, filter {filter}");
        }

        driver.goto(&ctx.url_for("/cari-kerja")).await?;
        driver
            .find(By::Css("#job-search"))
            .await
            .context("search input missing")?;
        tokio::time::sleep(Duration::from_millis(100)).await;
        let scale = ctx.bridge.root_property(CSS_FONT_SCALE).await?;
        anyhow::ensure!(scale == "1.5", "settings should survive a reload, got '{scale}'");

        ctx.bridge.reset().await?;
        tokio::time::sleep(Duration::from_millis(100)).await;
        let scale = ctx.bridge.root_property(CSS_FONT_SCALE).await?;
        let filter = ctx.bridge.root_filter().await?;
        anyhow::ensure!(
            scale.is_empty() && filter.is_empty(),
            "reset should clear effects, got scale '{scale}' filter '{filter}'"
        );
        let state = ctx.bridge.state().await?;
        let enabled = state.overlay.as_ref().is_some_and(|o| o.flag("enabled"));
        anyhow::ensure!(!enabled, "reset should switch the overlay off");
        Ok(())
    }
}

impl CombinedScenario for SmokeScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::headless("Smoke Test", smoke_check))
    }
}

fn smoke_check(rig: &HeadlessRig) -> Result<()> {
    let mut overlay = rig.mount();
    anyhow::ensure!(!overlay.settings().enabled, "overlay starts switched off");
    overlay.change(SettingChange::Toggle(Toggle::Enabled));
    overlay.change(SettingChange::FontSize(150));
    anyhow::ensure!(
        rig.surface.property(CSS_FONT_SCALE).as_deref() == Some("1.5"),
        "font scale should be applied"
    );
    overlay.unmount();
    anyhow::ensure!(rig.is_quiescent(), "unmount should leave nothing behind");
    Ok(())
}
