use crate::dom;
use bissa_core::lifecycle::Teardown;
use bissa_core::speech::{SpeechEngine, Utterance, VoiceInfo};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance, SpeechSynthesisVoice};

/// `window.speechSynthesis`.
#[derive(Clone)]
pub struct BrowserSpeech {
    synth: SpeechSynthesis,
}

impl BrowserSpeech {
    /// `None` when the browser has no speech synthesis.
    #[must_use]
    pub fn detect() -> Option<Self> {
        dom::window()
            .and_then(|win| win.speech_synthesis().ok())
            .map(|synth| Self { synth })
    }

    fn browser_voices(&self) -> Vec<SpeechSynthesisVoice> {
        self.synth
            .get_voices()
            .iter()
            .filter_map(|voice| voice.dyn_into::<SpeechSynthesisVoice>().ok())
            .collect()
    }

    /// Call `on_change` whenever the engine finishes (re)loading its voice list.
    pub fn on_voices_changed(&self, on_change: impl FnMut() + 'static) -> Teardown {
        let closure = Closure::wrap(Box::new(on_change) as Box<dyn FnMut()>);
        self.synth
            .set_onvoiceschanged(Some(closure.as_ref().unchecked_ref()));
        let synth = self.synth.clone();
        Box::new(move || {
            synth.set_onvoiceschanged(None);
            drop(closure);
        })
    }
}

impl SpeechEngine for BrowserSpeech {
    fn voices(&self) -> Vec<VoiceInfo> {
        self.browser_voices()
            .iter()
            .map(|voice| VoiceInfo::new(voice.name(), voice.lang()))
            .collect()
    }

    fn speak(&self, utterance: &Utterance) {
        let native = match SpeechSynthesisUtterance::new_with_text(&utterance.text) {
            Ok(native) => native,
            Err(err) => {
                log::warn!("could not build utterance: {}", dom::js_error_message(&err));
                return;
            }
        };
        native.set_rate(utterance.rate);
        native.set_pitch(utterance.pitch);
        native.set_volume(utterance.volume);
        if let Some(name) = utterance.voice.as_deref()
            && let Some(voice) = self.browser_voices().into_iter().find(|v| v.name() == name)
        {
            native.set_voice(Some(&voice));
        }
        self.synth.speak(&native);
    }

    fn cancel(&self) {
        self.synth.cancel();
    }

    fn pause(&self) {
        self.synth.pause();
    }

    fn resume(&self) {
        self.synth.resume();
    }

    fn is_speaking(&self) -> bool {
        self.synth.speaking()
    }

    fn is_paused(&self) -> bool {
        self.synth.paused()
    }
}
