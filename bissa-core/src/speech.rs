//! Hover/focus narration on top of a speech-synthesis engine.

use crate::extract::{ElementView, is_excluded, speakable_text};
use crate::lifecycle::{Scheduler, TimerSlot};
use crate::settings::AccessibilitySettings;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A synthesis voice as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceInfo {
    pub name: String,
    pub lang: String,
}

impl VoiceInfo {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }

    fn lang_starts_with(&self, prefix: &str) -> bool {
        self.lang.to_ascii_lowercase().starts_with(prefix)
    }
}

/// Indonesian first, then English, then whatever the engine lists first.
#[must_use]
pub fn preferred_voice(voices: &[VoiceInfo]) -> Option<&VoiceInfo> {
    voices
        .iter()
        .find(|v| v.lang_starts_with("id"))
        .or_else(|| voices.iter().find(|v| v.lang_starts_with("en")))
        .or_else(|| voices.first())
}

/// Exact name match for `requested`, else [`preferred_voice`].
#[must_use]
pub fn resolve_voice<'a>(voices: &'a [VoiceInfo], requested: &str) -> Option<&'a VoiceInfo> {
    if !requested.is_empty()
        && let Some(exact) = voices.iter().find(|v| v.name == requested)
    {
        return Some(exact);
    }
    preferred_voice(voices)
}

/// One request to the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Utterance {
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    /// Voice name; `None` leaves the engine default in place.
    pub voice: Option<String>,
}

impl Utterance {
    #[must_use]
    pub fn from_settings(
        text: impl Into<String>,
        settings: &AccessibilitySettings,
        voices: &[VoiceInfo],
    ) -> Self {
        Self {
            text: text.into(),
            rate: settings.tts_rate,
            pitch: settings.tts_pitch,
            volume: settings.tts_volume,
            voice: resolve_voice(voices, &settings.tts_voice).map(|v| v.name.clone()),
        }
    }
}

/// Browser `speechSynthesis`, or a recording fake.
pub trait SpeechEngine {
    fn voices(&self) -> Vec<VoiceInfo>;
    fn speak(&self, utterance: &Utterance);
    fn cancel(&self);
    fn pause(&self);
    fn resume(&self);
    fn is_speaking(&self) -> bool;
    fn is_paused(&self) -> bool;
}

impl<E: SpeechEngine + ?Sized> SpeechEngine for Rc<E> {
    fn voices(&self) -> Vec<VoiceInfo> {
        (**self).voices()
    }
    fn speak(&self, utterance: &Utterance) {
        (**self).speak(utterance);
    }
    fn cancel(&self) {
        (**self).cancel();
    }
    fn pause(&self) {
        (**self).pause();
    }
    fn resume(&self) {
        (**self).resume();
    }
    fn is_speaking(&self) -> bool {
        (**self).is_speaking()
    }
    fn is_paused(&self) -> bool {
        (**self).is_paused()
    }
}

/// Cancel whatever is playing and speak `text` with the user's voice settings.
///
/// Does nothing when sound is disabled.
pub fn speak_now<E: SpeechEngine>(engine: &E, settings: &AccessibilitySettings, text: &str) {
    if !settings.sound_enabled {
        return;
    }
    engine.cancel();
    engine.speak(&Utterance::from_settings(text, settings, &engine.voices()));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Hover,
    Focus,
}

/// What the caller should do with the keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    PreventDefault,
    Handled,
    Ignored,
}

struct ControllerInner<E, S: Scheduler, V> {
    engine: E,
    settings: AccessibilitySettings,
    timer: TimerSlot<S>,
    last_spoken: RefCell<Option<V>>,
}

impl<E: SpeechEngine, S: Scheduler, V: ElementView> ControllerInner<E, S, V> {
    fn speak_target(&self, target: &V, text: &str) {
        let repeat = self
            .last_spoken
            .borrow()
            .as_ref()
            .is_some_and(|last| last.same_node(target));
        if repeat {
            return;
        }
        self.last_spoken.replace(Some(target.clone()));
        speak_now(&self.engine, &self.settings, text);
    }
}

/// One listening session: created when narration activates, dropped (after
/// [`SpeechController::shutdown`]) when it is torn down.
///
/// The controller captures a settings snapshot. Any settings change rebuilds
/// the whole session, so the snapshot never goes stale.
pub struct SpeechController<E, S, V>
where
    E: SpeechEngine,
    S: Scheduler,
    V: ElementView,
{
    inner: Rc<ControllerInner<E, S, V>>,
}

impl<E, S, V> Clone for SpeechController<E, S, V>
where
    E: SpeechEngine,
    S: Scheduler,
    V: ElementView,
{
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E, S, V> SpeechController<E, S, V>
where
    E: SpeechEngine + 'static,
    S: Scheduler + 'static,
    V: ElementView + 'static,
{
    pub fn new(engine: E, scheduler: S, settings: AccessibilitySettings) -> Self {
        Self {
            inner: Rc::new(ControllerInner {
                engine,
                settings,
                timer: TimerSlot::new(scheduler),
                last_spoken: RefCell::new(None),
            }),
        }
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.inner.engine
    }

    /// React to `mouseover` / `focusin` on `target`.
    ///
    /// Returns true when an utterance was queued.
    pub fn handle(&self, trigger: Trigger, target: &V) -> bool {
        let settings = &self.inner.settings;
        let wanted = match trigger {
            Trigger::Hover => settings.tts_on_hover,
            Trigger::Focus => settings.tts_on_focus,
        };
        if !wanted || is_excluded(target) {
            return false;
        }
        let Some(text) = speakable_text(target) else {
            return false;
        };

        let weak: Weak<ControllerInner<E, S, V>> = Rc::downgrade(&self.inner);
        let target = target.clone();
        self.inner.timer.arm(settings.tts_delay_ms, move || {
            if let Some(inner) = weak.upgrade() {
                inner.speak_target(&target, &text);
            }
        });
        true
    }

    /// `mouseout`: drop the pending utterance. Speech already playing continues.
    pub fn on_mouse_out(&self) {
        self.inner.timer.cancel();
    }

    /// Space pauses or resumes active speech; Escape stops it.
    pub fn on_key(&self, key: &str) -> KeyOutcome {
        let engine = &self.inner.engine;
        match key {
            " " | "Spacebar" => {
                if !engine.is_speaking() {
                    return KeyOutcome::Ignored;
                }
                if engine.is_paused() {
                    engine.resume();
                } else {
                    engine.pause();
                }
                KeyOutcome::PreventDefault
            }
            "Escape" | "Esc" => {
                engine.cancel();
                KeyOutcome::Handled
            }
            _ => KeyOutcome::Ignored,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.timer.is_pending()
    }

    /// Cancel the pending timer and any playing utterance, forget the last target.
    pub fn shutdown(&self) {
        self.inner.timer.cancel();
        self.inner.engine.cancel();
        self.inner.last_spoken.replace(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ElementSnapshot;
    use crate::headless::{ManualScheduler, RecordingSpeech};

    fn narrating() -> AccessibilitySettings {
        AccessibilitySettings {
            enabled: true,
            text_to_speech: true,
            ..AccessibilitySettings::default()
        }
    }

    fn controller(
        settings: AccessibilitySettings,
    ) -> (
        SpeechController<RecordingSpeech, ManualScheduler, ElementSnapshot>,
        RecordingSpeech,
        ManualScheduler,
    ) {
        let engine = RecordingSpeech::with_voices(vec![
            VoiceInfo::new("Alex", "en-US"),
            VoiceInfo::new("Damayanti", "id-ID"),
        ]);
        let scheduler = ManualScheduler::default();
        let ctl = SpeechController::new(engine.clone(), scheduler.clone(), settings);
        (ctl, engine, scheduler)
    }

    #[test]
    fn voice_priority_is_exact_then_indonesian_then_english_then_first() {
        let voices = vec![
            VoiceInfo::new("Fiona", "en-GB"),
            VoiceInfo::new("Ayu", "ID-id"),
            VoiceInfo::new("Kyoko", "ja-JP"),
        ];
        assert_eq!(resolve_voice(&voices, "Kyoko").map(|v| v.name.as_str()), Some("Kyoko"));
        assert_eq!(resolve_voice(&voices, "Missing").map(|v| v.name.as_str()), Some("Ayu"));
        assert_eq!(resolve_voice(&voices[..1], "").map(|v| v.name.as_str()), Some("Fiona"));
        assert_eq!(resolve_voice(&voices[2..], "").map(|v| v.name.as_str()), Some("Kyoko"));
        assert!(resolve_voice(&[], "").is_none());
    }

    #[test]
    fn two_hovers_within_delay_speak_only_the_second() {
        let (ctl, engine, scheduler) = controller(narrating());
        let first = ElementSnapshot::new("P").text("Lowongan pertama");
        let second = ElementSnapshot::new("P").text("Lowongan kedua");
        assert!(ctl.handle(Trigger::Hover, &first));
        scheduler.advance(60);
        assert!(ctl.handle(Trigger::Hover, &second));
        scheduler.advance(200);

        let spoken = engine.spoken();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].text, "Lowongan kedua");
        assert_eq!(spoken[0].voice.as_deref(), Some("Damayanti"));
        assert!((spoken[0].rate - 0.95).abs() < f32::EPSILON);
    }

    #[test]
    fn same_target_is_not_repeated() {
        let (ctl, engine, scheduler) = controller(narrating());
        let heading = ElementSnapshot::new("H2").text("Layanan Kami");
        ctl.handle(Trigger::Hover, &heading);
        scheduler.advance(200);
        ctl.handle(Trigger::Focus, &heading);
        scheduler.advance(200);
        assert_eq!(engine.spoken().len(), 1);
    }

    #[test]
    fn mouse_out_cancels_pending_but_not_playing_speech() {
        let (ctl, engine, scheduler) = controller(narrating());
        ctl.handle(Trigger::Hover, &ElementSnapshot::new("SPAN").text("Jakarta"));
        ctl.on_mouse_out();
        scheduler.advance(500);
        assert!(engine.spoken().is_empty());

        ctl.handle(Trigger::Hover, &ElementSnapshot::new("SPAN").text("Bandung"));
        scheduler.advance(500);
        let cancels = engine.cancel_count();
        ctl.on_mouse_out();
        assert_eq!(engine.cancel_count(), cancels);
        assert!(engine.is_speaking());
    }

    #[test]
    fn trigger_flags_gate_events() {
        let settings = AccessibilitySettings {
            tts_on_hover: false,
            ..narrating()
        };
        let (ctl, _engine, _scheduler) = controller(settings);
        let link = ElementSnapshot::new("A").text("Masuk");
        assert!(!ctl.handle(Trigger::Hover, &link));
        assert!(ctl.handle(Trigger::Focus, &link));
    }

    #[test]
    fn overlay_and_document_elements_are_skipped() {
        let (ctl, _engine, _scheduler) = controller(narrating());
        assert!(!ctl.handle(Trigger::Hover, &ElementSnapshot::new("BODY").text("x")));
        assert!(!ctl.handle(
            Trigger::Hover,
            &ElementSnapshot::new("BUTTON").text("Reset").in_overlay()
        ));
        assert!(!ctl.handle(Trigger::Hover, &ElementSnapshot::new("DIV")));
    }

    #[test]
    fn muted_sound_builds_no_utterance() {
        let settings = AccessibilitySettings {
            sound_enabled: false,
            ..narrating()
        };
        let (ctl, engine, scheduler) = controller(settings);
        ctl.handle(Trigger::Hover, &ElementSnapshot::new("P").text("Halo"));
        scheduler.advance(500);
        assert!(engine.spoken().is_empty());
        assert_eq!(engine.cancel_count(), 0);
    }

    #[test]
    fn space_toggles_pause_and_escape_cancels() {
        let (ctl, engine, scheduler) = controller(narrating());
        assert_eq!(ctl.on_key(" "), KeyOutcome::Ignored);

        ctl.handle(Trigger::Hover, &ElementSnapshot::new("P").text("Halo"));
        scheduler.advance(500);
        assert_eq!(ctl.on_key(" "), KeyOutcome::PreventDefault);
        assert!(engine.is_paused());
        assert_eq!(ctl.on_key(" "), KeyOutcome::PreventDefault);
        assert!(!engine.is_paused());
        assert_eq!(ctl.on_key("Escape"), KeyOutcome::Handled);
        assert!(!engine.is_speaking());
        assert_eq!(ctl.on_key("a"), KeyOutcome::Ignored);
    }

    #[test]
    fn shutdown_cancels_timer_and_forgets_target() {
        let (ctl, engine, scheduler) = controller(narrating());
        let p = ElementSnapshot::new("P").text("Halo");
        ctl.handle(Trigger::Hover, &p);
        scheduler.advance(500);
        ctl.handle(Trigger::Hover, &ElementSnapshot::new("P").text("Lagi"));
        ctl.shutdown();
        assert!(!ctl.is_pending());
        scheduler.advance(500);
        assert_eq!(engine.spoken().len(), 1);

        ctl.handle(Trigger::Hover, &p);
        scheduler.advance(500);
        assert_eq!(engine.spoken().len(), 2);
    }
}
