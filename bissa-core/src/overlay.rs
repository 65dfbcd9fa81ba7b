//! The accessibility overlay: settings store, effect applier, optional
//! features and their teardowns composed into one apply cycle.
//!
//! Every mutation runs the same synchronous pass: tear down everything the
//! previous pass registered, re-apply document effects, then register the
//! optional features the new settings ask for.

use crate::constants::TTS_ACTIVATION_DELAY_MS;
use crate::effects::{EffectApplier, EffectPlan, PresentationSurface};
use crate::lifecycle::{Scheduler, Teardown, TeardownRegistry, TimerSlot};
use crate::route::RouteSignals;
use crate::settings::{AccessibilitySettings, SettingChange};
use crate::speech::VoiceInfo;
use crate::storage::KeyValueStorage;
use crate::store::SettingsStore;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

/// Attaches the listener-backed features to the live document.
///
/// Each `attach_*` returns the teardown that detaches exactly what it attached,
/// or `None` when the platform cannot provide the feature.
pub trait FeatureHost {
    /// Reading guide node plus its `mousemove` tracker.
    fn attach_reading_guide(&self) -> Option<Teardown>;

    /// One hover/focus/keyboard listener set narrating with `settings`.
    fn attach_speech(&self, settings: &AccessibilitySettings) -> Option<Teardown>;

    /// Forward body mutations and `popstate` into `signals`.
    fn watch_navigation<S>(&self, signals: RouteSignals<S>) -> Option<Teardown>
    where
        S: Scheduler + Clone + 'static;

    /// Stop any utterance in flight.
    fn cancel_speech(&self);

    /// Speak `text` immediately (panel narration).
    fn speak(&self, settings: &AccessibilitySettings, text: &str);
}

pub const LABEL_READING_GUIDE: &str = "reading-guide";
pub const LABEL_SPEECH_ACTIVATION: &str = "speech-activation";
pub const LABEL_SPEECH_LISTENERS: &str = "speech-listeners";
pub const LABEL_ROUTE_WATCH: &str = "route-watch";
pub const LABEL_ROUTE_REINIT: &str = "route-reinit";

type SpeechSlot = Rc<RefCell<Option<Teardown>>>;

fn drain_slot(slot: &SpeechSlot) {
    let previous = slot.borrow_mut().take();
    if let Some(teardown) = previous {
        teardown();
    }
}

/// Replace the active narration listener set with a fresh one.
fn activate_speech<H: FeatureHost>(host: &H, slot: &SpeechSlot, settings: &AccessibilitySettings) {
    drain_slot(slot);
    match host.attach_speech(settings) {
        Some(teardown) => *slot.borrow_mut() = Some(teardown),
        None => log::debug!("speech synthesis unavailable; narration stays off"),
    }
}

/// Serializable view of the overlay for the test bridge and the tester.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlaySnapshot {
    pub settings: AccessibilitySettings,
    pub registrations: Vec<String>,
    pub filter: Option<String>,
    pub speech_attached: bool,
}

pub struct AccessibilityOverlay<K, P, H, S>
where
    K: KeyValueStorage,
    P: PresentationSurface,
    H: FeatureHost + 'static,
    S: Scheduler + Clone + 'static,
{
    store: SettingsStore<K>,
    applier: EffectApplier<P>,
    host: Rc<H>,
    scheduler: S,
    registry: TeardownRegistry,
    speech: SpeechSlot,
    mounted: bool,
}

impl<K, P, H, S> AccessibilityOverlay<K, P, H, S>
where
    K: KeyValueStorage,
    P: PresentationSurface,
    H: FeatureHost + 'static,
    S: Scheduler + Clone + 'static,
{
    /// Load persisted settings and run the first apply pass.
    pub fn mount(storage: K, surface: P, host: H, scheduler: S) -> Self {
        let mut overlay = Self {
            store: SettingsStore::open(storage),
            applier: EffectApplier::new(surface),
            host: Rc::new(host),
            scheduler,
            registry: TeardownRegistry::new(),
            speech: Rc::new(RefCell::new(None)),
            mounted: true,
        };
        overlay.refresh();
        overlay
    }

    #[must_use]
    pub const fn settings(&self) -> &AccessibilitySettings {
        self.store.current()
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[must_use]
    pub const fn surface(&self) -> &P {
        self.applier.surface()
    }

    /// Apply one user change, persist it, and rebuild all effects.
    pub fn change(&mut self, change: SettingChange) -> AccessibilitySettings {
        self.store.update(change);
        self.refresh();
        self.settings().clone()
    }

    /// Replace the whole settings record.
    pub fn replace(&mut self, settings: AccessibilitySettings) {
        self.store.save(settings);
        self.refresh();
    }

    /// Back to defaults with every effect removed and storage cleared.
    pub fn reset(&mut self) -> AccessibilitySettings {
        self.registry.teardown_all();
        drain_slot(&self.speech);
        self.applier.clear_all();
        self.store.reset();
        self.refresh();
        self.settings().clone()
    }

    /// Record the auto-selected voice once the engine reports its voices.
    pub fn adopt_voices(&mut self, voices: &[VoiceInfo]) -> bool {
        self.store.adopt_default_voice(voices)
    }

    /// Tear down, then rebuild effects and features from current settings.
    pub fn refresh(&mut self) -> EffectPlan {
        let torn = self.registry.teardown_all();
        log::debug!("overlay refresh: tore down {torn} registrations");
        self.host.cancel_speech();

        let settings = self.store.current().clone();
        let plan = self.applier.apply(&settings);
        if !settings.enabled {
            return plan;
        }

        if settings.reading_guide
            && let Some(teardown) = self.host.attach_reading_guide()
        {
            self.registry.register(LABEL_READING_GUIDE, teardown);
        }

        if settings.speech_active() {
            self.register_speech(&settings);
        }
        plan
    }

    fn register_speech(&self, settings: &AccessibilitySettings) {
        let activation = TimerSlot::new(self.scheduler.clone());
        {
            let host = Rc::clone(&self.host);
            let slot = Rc::clone(&self.speech);
            let snapshot = settings.clone();
            activation.arm(TTS_ACTIVATION_DELAY_MS, move || {
                activate_speech(&*host, &slot, &snapshot);
            });
        }
        self.registry
            .register(LABEL_SPEECH_ACTIVATION, Box::new(move || activation.cancel()));

        let slot = Rc::clone(&self.speech);
        self.registry
            .register(LABEL_SPEECH_LISTENERS, Box::new(move || drain_slot(&slot)));

        let signals = {
            let host = Rc::clone(&self.host);
            let slot = Rc::clone(&self.speech);
            let snapshot = settings.clone();
            RouteSignals::new(
                self.scheduler.clone(),
                Rc::new(move || {
                    log::debug!("navigation settled; re-initializing narration");
                    activate_speech(&*host, &slot, &snapshot);
                }),
            )
        };
        if let Some(teardown) = self.host.watch_navigation(signals.clone()) {
            self.registry.register(LABEL_ROUTE_WATCH, teardown);
        }
        self.registry
            .register(LABEL_ROUTE_REINIT, Box::new(move || signals.cancel()));
    }

    /// Narrate a panel label when narration and sound are both on.
    pub fn speak_label(&self, text: &str) {
        let settings = self.settings();
        if settings.enabled && settings.text_to_speech && settings.sound_enabled {
            self.host.speak(settings, text);
        }
    }

    #[must_use]
    pub fn active_registrations(&self) -> Vec<&'static str> {
        self.registry.labels()
    }

    #[must_use]
    pub fn snapshot(&self) -> OverlaySnapshot {
        let settings = self.settings().clone();
        OverlaySnapshot {
            filter: EffectPlan::from_settings(&settings).filter,
            settings,
            registrations: self
                .registry
                .labels()
                .into_iter()
                .map(str::to_string)
                .collect(),
            speech_attached: self.speech.borrow().is_some(),
        }
    }

    /// Final teardown. Safe to call more than once.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.registry.teardown_all();
        drain_slot(&self.speech);
        self.host.cancel_speech();
        self.applier.clear_all();
    }
}

impl<K, P, H, S> Drop for AccessibilityOverlay<K, P, H, S>
where
    K: KeyValueStorage,
    P: PresentationSurface,
    H: FeatureHost + 'static,
    S: Scheduler + Clone + 'static,
{
    fn drop(&mut self) {
        self.unmount();
    }
}
