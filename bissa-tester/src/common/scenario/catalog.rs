use anyhow::{Result, ensure};

use crate::common::scenario::OverlayScenario;
use bissa_core::api::{ApiError, ListingState, Resource};
use bissa_core::constants::{
    CSS_ANIMATION_DURATION, CSS_FONT_SCALE, FOCUS_MODE_CLASS, READING_GUIDE_ID,
    ROUTE_REINIT_DEBOUNCE_MS, SETTINGS_STORAGE_KEY, TTS_ACTIVATION_DELAY_MS,
};
use bissa_core::extract::ElementSnapshot;
use bissa_core::headless::{HeadlessOverlay, HeadlessRig};
use bissa_core::jobs::{Disability, JobFilter, JobVacancy, SortOrder};
use bissa_core::route::MutationSummary;
use bissa_core::settings::{AccessibilitySettings, Contrast, SettingChange, Toggle};

pub fn catalog_scenarios() -> Vec<OverlayScenario> {
    vec![
        OverlayScenario::new("Settings Persistence", settings_persistence),
        OverlayScenario::new("Visual Effects", visual_effects),
        OverlayScenario::new("Listener Lifecycle", listener_lifecycle),
        OverlayScenario::new("Speech Narration", speech_narration),
        OverlayScenario::new("Speech Keyboard Control", speech_keyboard),
        OverlayScenario::new("Route Re-initialization", route_reinit),
        OverlayScenario::new("Reset and Unmount", reset_and_unmount),
        OverlayScenario::new("Job Filtering", job_filtering),
        OverlayScenario::new("Listing Error Messages", listing_errors),
    ]
}

pub fn find_catalog_scenario(name: &str) -> Option<OverlayScenario> {
    catalog_scenarios()
        .into_iter()
        .find(|scenario| scenario.name() == name)
}

/// Mount with the master switch on and narration armed and attached.
fn narrating(rig: &HeadlessRig) -> HeadlessOverlay {
    let mut overlay = rig.mount();
    overlay.change(SettingChange::Toggle(Toggle::Enabled));
    overlay.change(SettingChange::Toggle(Toggle::TextToSpeech));
    rig.scheduler.advance(u64::from(TTS_ACTIVATION_DELAY_MS));
    overlay
}

fn settings_persistence(rig: &HeadlessRig) -> Result<()> {
    rig.persist(&AccessibilitySettings {
        enabled: true,
        font_size: 150,
        contrast: Contrast::High,
        ..AccessibilitySettings::default()
    });
    let mut overlay = rig.mount();
    ensure!(overlay.settings().enabled, "persisted master switch should load");
    ensure!(overlay.settings().font_size == 150, "persisted font size should load");

    overlay.change(SettingChange::Toggle(Toggle::Grayscale));
    let raw = rig.storage.raw(SETTINGS_STORAGE_KEY).unwrap_or_default();
    ensure!(
        raw.contains("\"grayscale\":true"),
        "changes should be written through, got {raw}"
    );
    overlay.unmount();

    rig.storage.insert(SETTINGS_STORAGE_KEY, "{not json");
    let overlay = rig.mount();
    ensure!(
        *overlay.settings() == AccessibilitySettings::default(),
        "an unreadable record should fall back to defaults"
    );
    drop(overlay);

    rig.storage.fail_writes(true);
    let mut overlay = rig.mount();
    let after = overlay.change(SettingChange::Toggle(Toggle::Enabled));
    rig.storage.fail_writes(false);
    ensure!(after.enabled, "a rejected write must not lose the in-memory change");
    Ok(())
}

fn visual_effects(rig: &HeadlessRig) -> Result<()> {
    let mut overlay = rig.mount();
    ensure!(rig.surface.is_pristine(), "a disabled overlay writes nothing");

    overlay.change(SettingChange::FontSize(150));
    ensure!(
        rig.surface.property(CSS_FONT_SCALE).is_none(),
        "effects stay off until the master switch is on"
    );

    overlay.change(SettingChange::Toggle(Toggle::Enabled));
    ensure!(
        rig.surface.property(CSS_FONT_SCALE).as_deref() == Some("1.5"),
        "font scale should be 1.5, got {:?}",
        rig.surface.property(CSS_FONT_SCALE)
    );

    overlay.change(SettingChange::Contrast(Contrast::High));
    overlay.change(SettingChange::Toggle(Toggle::Grayscale));
    ensure!(
        rig.surface.filter().as_deref() == Some("contrast(150%) grayscale(1)"),
        "filter terms keep their fixed order, got {:?}",
        rig.surface.filter()
    );

    overlay.change(SettingChange::Toggle(Toggle::FocusMode));
    overlay.change(SettingChange::Toggle(Toggle::PauseAnimations));
    overlay.change(SettingChange::Toggle(Toggle::ReadingGuide));
    ensure!(rig.surface.class_count(FOCUS_MODE_CLASS) == 1, "focus class is added once");
    ensure!(
        rig.surface.property(CSS_ANIMATION_DURATION).as_deref() == Some("0s"),
        "paused animations zero the duration"
    );
    ensure!(rig.surface.has_element(READING_GUIDE_ID), "reading guide is inserted");

    overlay.change(SettingChange::Toggle(Toggle::Enabled));
    ensure!(rig.surface.is_pristine(), "switching off clears every effect");
    ensure!(rig.host.guide_listeners() == 0, "guide tracker is detached");
    Ok(())
}

fn listener_lifecycle(rig: &HeadlessRig) -> Result<()> {
    let mut overlay = rig.mount();
    overlay.change(SettingChange::Toggle(Toggle::Enabled));
    overlay.change(SettingChange::Toggle(Toggle::TextToSpeech));
    ensure!(
        rig.host.listener_sets() == 0,
        "listeners attach only after the activation delay"
    );
    rig.scheduler.advance(u64::from(TTS_ACTIVATION_DELAY_MS));
    ensure!(rig.host.listener_sets() == 1, "one listener set after activation");

    for size in [110, 120, 130, 140] {
        overlay.change(SettingChange::FontSize(size));
        rig.scheduler.advance(u64::from(TTS_ACTIVATION_DELAY_MS));
    }
    ensure!(
        rig.host.listener_sets() == 1,
        "rapid changes must never stack listener sets, found {}",
        rig.host.listener_sets()
    );
    ensure!(rig.host.navigation_watchers() == 1, "one navigation watcher");

    overlay.change(SettingChange::FontSize(150));
    overlay.change(SettingChange::Toggle(Toggle::TextToSpeech));
    rig.scheduler.advance(u64::from(TTS_ACTIVATION_DELAY_MS));
    ensure!(rig.host.listener_sets() == 0, "turning narration off detaches listeners");
    ensure!(rig.host.navigation_watchers() == 0, "and the navigation watcher");
    ensure!(rig.scheduler.pending() == 0, "no timers survive");
    Ok(())
}

fn speech_narration(rig: &HeadlessRig) -> Result<()> {
    let overlay = narrating(rig);
    let delay = u64::from(overlay.settings().tts_delay_ms);
    let button = ElementSnapshot::new("button").text("Cari Lowongan");

    ensure!(rig.host.hover(&button) == 1, "hover should queue one utterance");
    rig.scheduler.advance(delay);
    let spoken = rig.speech.spoken();
    ensure!(
        spoken.last().map(|u| u.text.as_str()) == Some("Cari Lowongan"),
        "button text should be spoken, got {spoken:?}"
    );

    let before = rig.speech.spoken().len();
    rig.host.focus(&button);
    rig.scheduler.advance(delay);
    ensure!(
        rig.speech.spoken().len() == before,
        "the same element is not repeated"
    );

    let link = ElementSnapshot::new("a").attr("aria-label", "Beranda").text("Home");
    rig.host.hover(&link);
    rig.host.mouse_out();
    rig.scheduler.advance(delay);
    ensure!(
        rig.speech.spoken().len() == before,
        "leaving before the delay drops the utterance"
    );

    let panel_button = ElementSnapshot::new("button").text("Reset").in_overlay();
    ensure!(rig.host.hover(&panel_button) == 0, "the overlay panel is never narrated");

    rig.host.hover(&link);
    rig.scheduler.advance(delay);
    ensure!(
        rig.speech.spoken().last().map(|u| u.text.as_str()) == Some("Beranda"),
        "aria-label wins over text"
    );
    Ok(())
}

fn speech_keyboard(rig: &HeadlessRig) -> Result<()> {
    let overlay = narrating(rig);
    ensure!(!rig.host.key(" "), "space is left alone while nothing is spoken");

    rig.host.hover(&ElementSnapshot::new("h2").text("Lowongan Pilihan"));
    rig.scheduler.advance(u64::from(overlay.settings().tts_delay_ms));
    ensure!(rig.host.key(" "), "space pauses active speech");
    ensure!(rig.host.key(" "), "and resumes it");

    let cancels = rig.speech.cancel_count();
    ensure!(!rig.host.key("Escape"), "escape keeps its default action");
    ensure!(rig.speech.cancel_count() > cancels, "escape stops speech");
    ensure!(!rig.host.key("a"), "other keys are ignored");
    Ok(())
}

fn route_reinit(rig: &HeadlessRig) -> Result<()> {
    let overlay = narrating(rig);
    ensure!(overlay.snapshot().speech_attached, "narration attached");

    rig.host.navigate(&[MutationSummary::child_list(["SCRIPT", "STYLE"])]);
    ensure!(rig.scheduler.pending() == 0, "script and style insertions are not navigation");

    rig.host.navigate(&[MutationSummary::child_list(["DIV"])]);
    rig.host.navigate(&[MutationSummary::child_list(["SECTION"])]);
    rig.host.popstate();
    ensure!(rig.scheduler.pending() == 1, "navigation signals are debounced into one timer");
    rig.scheduler.advance(u64::from(ROUTE_REINIT_DEBOUNCE_MS));
    ensure!(
        rig.host.listener_sets() == 1,
        "re-initialization replaces the listener set, found {}",
        rig.host.listener_sets()
    );
    ensure!(overlay.snapshot().speech_attached, "narration re-attached");
    Ok(())
}

fn reset_and_unmount(rig: &HeadlessRig) -> Result<()> {
    let mut overlay = narrating(rig);
    overlay.change(SettingChange::FontSize(180));
    overlay.change(SettingChange::Toggle(Toggle::ReadingGuide));
    overlay.change(SettingChange::Toggle(Toggle::InvertColors));

    let after = overlay.reset();
    ensure!(after == AccessibilitySettings::default(), "reset restores defaults");
    ensure!(rig.surface.is_pristine(), "reset clears every effect");
    ensure!(
        rig.storage.raw(SETTINGS_STORAGE_KEY).is_none(),
        "reset clears the persisted record"
    );

    overlay.change(SettingChange::Toggle(Toggle::Enabled));
    overlay.change(SettingChange::Toggle(Toggle::TextToSpeech));
    overlay.change(SettingChange::Toggle(Toggle::ReadingGuide));
    overlay.unmount();
    overlay.unmount();
    ensure!(rig.is_quiescent(), "unmount leaves nothing behind");
    Ok(())
}

fn job(id: u64, title: &str, location: &str, deadline: &str, salary: &str) -> JobVacancy {
    JobVacancy {
        id,
        title: title.into(),
        location: location.into(),
        application_deadline: deadline.into(),
        salary_range: salary.into(),
        job_type: "Full-time".into(),
        disabilities: vec![Disability {
            id,
            category: "Ramah untuk tunarungu".into(),
            level: String::new(),
        }],
        ..JobVacancy::default()
    }
}

fn job_filtering(_rig: &HeadlessRig) -> Result<()> {
    let jobs = vec![
        job(1, "UI Designer", "Jakarta", "2025-03-01", "Rp 6.000.000"),
        job(2, "Backend Developer", "Bandung", "2025-01-15", "Rp 9.000.000"),
        job(3, "Data Analyst", "Jakarta Selatan", "2025-02-10", "Rp 7.500.000"),
    ];

    let all: Vec<u64> = JobFilter::default().apply(&jobs).iter().map(|j| j.id).collect();
    ensure!(all == vec![1, 3, 2], "newest deadline first, got {all:?}");

    let jakarta = JobFilter {
        location: "JAKARTA".into(),
        sort: SortOrder::SalaryHigh,
        ..JobFilter::default()
    };
    let ids: Vec<u64> = jakarta.apply(&jobs).iter().map(|j| j.id).collect();
    ensure!(ids == vec![3, 1], "location match is case-insensitive, got {ids:?}");

    let none = JobFilter {
        disability: "tunanetra".into(),
        ..JobFilter::default()
    };
    ensure!(none.apply(&jobs).is_empty(), "disability filter excludes non-matching jobs");
    ensure!(none.has_active_filters(), "a set field is an active filter");
    Ok(())
}

fn listing_errors(_rig: &HeadlessRig) -> Result<()> {
    let failed = ListingState::<JobVacancy>::resolve(Err(ApiError::Status(404)), Resource::Jobs);
    ensure!(
        failed == ListingState::Failed("Data lowongan tidak ditemukan.".into()),
        "404 on jobs names the listing"
    );
    let offline =
        ListingState::<JobVacancy>::resolve(Err(ApiError::Network("offline".into())), Resource::Companies);
    ensure!(
        offline
            == ListingState::Failed(
                "Tidak dapat terhubung ke server. Periksa koneksi internet Anda.".into()
            ),
        "network failures ask the user to check the connection"
    );
    let rejected =
        ListingState::<JobVacancy>::resolve(Err(ApiError::Rejected("kosong".into())), Resource::Jobs);
    ensure!(rejected == ListingState::Empty, "an unsuccessful envelope is an empty listing");
    Ok(())
}
