//! Owns the live overlay for the lifetime of the app shell.

use crate::a11y::BrowserOverlay;
use bissa_core::lifecycle::Teardown;
use bissa_core::overlay::OverlaySnapshot;
use bissa_core::settings::{AccessibilitySettings, SettingChange};
use bissa_core::speech::{SpeechEngine, VoiceInfo};
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

/// Shared slot holding the mounted overlay; empty until the first effect runs
/// and again after unmount.
#[derive(Clone)]
pub struct OverlayHandle(Rc<RefCell<Option<BrowserOverlay>>>);

impl PartialEq for OverlayHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl OverlayHandle {
    /// Run `f` against the mounted overlay. `None` when nothing is mounted or
    /// the overlay is already borrowed further up the stack.
    pub fn with<R>(&self, f: impl FnOnce(&mut BrowserOverlay) -> R) -> Option<R> {
        let mut slot = self.0.try_borrow_mut().ok()?;
        slot.as_mut().map(f)
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<OverlaySnapshot> {
        self.with(|overlay| overlay.snapshot())
    }
}

#[derive(Clone, PartialEq)]
pub struct OverlayControls {
    pub handle: OverlayHandle,
    pub settings: AccessibilitySettings,
    pub voices: Vec<VoiceInfo>,
    pub on_change: Callback<SettingChange>,
    pub on_reset: Callback<()>,
    pub on_speak: Callback<String>,
}

fn watch_voices(
    handle: &OverlayHandle,
    settings: &UseStateHandle<AccessibilitySettings>,
    voices: &UseStateHandle<Vec<VoiceInfo>>,
) -> Option<Teardown> {
    let engine = handle.with(|overlay| overlay.host().speech().cloned())??;
    voices.set(engine.voices());
    let handle = handle.clone();
    let settings = settings.clone();
    let voices = voices.clone();
    Some(engine.on_voices_changed(move || {
        let refreshed = handle.with(|overlay| {
            let list = overlay
                .host()
                .speech()
                .map(SpeechEngine::voices)
                .unwrap_or_default();
            overlay.adopt_voices(&list);
            (list, overlay.settings().clone())
        });
        if let Some((list, current)) = refreshed {
            log::debug!("speech voices changed: {} available", list.len());
            voices.set(list);
            settings.set(current);
        }
    }))
}

#[hook]
pub fn use_overlay() -> OverlayControls {
    let handle = OverlayHandle(use_mut_ref(|| None::<BrowserOverlay>));
    let settings = use_state(AccessibilitySettings::default);
    let voices = use_state(Vec::<VoiceInfo>::new);

    {
        let handle = handle.clone();
        let settings = settings.clone();
        let voices = voices.clone();
        use_effect_with((), move |_| {
            let overlay = crate::a11y::mount_overlay();
            settings.set(overlay.settings().clone());
            *handle.0.borrow_mut() = Some(overlay);
            let voice_watch = watch_voices(&handle, &settings, &voices);
            move || {
                if let Some(stop) = voice_watch {
                    stop();
                }
                let mounted = handle.0.borrow_mut().take();
                if let Some(mut overlay) = mounted {
                    overlay.unmount();
                }
            }
        });
    }

    let on_change = {
        let handle = handle.clone();
        let settings = settings.clone();
        Callback::from(move |change: SettingChange| {
            if let Some(next) = handle.with(|overlay| overlay.change(change)) {
                settings.set(next);
            }
        })
    };
    let on_reset = {
        let handle = handle.clone();
        let settings = settings.clone();
        Callback::from(move |()| {
            if let Some(next) = handle.with(BrowserOverlay::reset) {
                settings.set(next);
            }
        })
    };
    let on_speak = {
        let handle = handle.clone();
        Callback::from(move |label: String| {
            handle.with(|overlay| overlay.speak_label(&label));
        })
    };

    OverlayControls {
        handle,
        settings: (*settings).clone(),
        voices: (*voices).clone(),
        on_change,
        on_reset,
        on_speak,
    }
}
