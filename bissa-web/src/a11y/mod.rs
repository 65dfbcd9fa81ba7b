//! Browser implementations of the overlay seams.
//!
//! `bissa-core` owns the behaviour; everything here only translates between
//! its traits and `web_sys`.

mod element;
mod events;
mod host;
mod scheduler;
mod speech;
mod storage;
mod surface;

pub use element::DomElement;
pub use host::BrowserFeatureHost;
pub use scheduler::TimeoutScheduler;
pub use speech::BrowserSpeech;
pub use storage::BrowserStorage;
pub use surface::DocumentSurface;

use bissa_core::AccessibilityOverlay;

/// Inline style of the reading guide bar; the host only moves it afterwards.
pub const READING_GUIDE_STYLE: &str = "position:fixed;top:0;left:0;width:100%;height:3px;\
background:#3b82f6;z-index:9999;pointer-events:none;transform:translateY(-100%);\
transition:transform 0.2s ease;";

/// Page-level rules that give the overlay's root properties and classes
/// their visual effect. Injected once by the app shell.
#[must_use]
pub const fn overlay_css() -> &'static str {
    include_str!("../../styles/overlay.css")
}

/// Transform that parks the guide under the pointer.
#[must_use]
pub fn reading_guide_offset(client_y: i32) -> String {
    format!("translateY({}px)", client_y - 1)
}

pub type BrowserOverlay =
    AccessibilityOverlay<BrowserStorage, DocumentSurface, BrowserFeatureHost, TimeoutScheduler>;

/// Mount the overlay against the live document and record the default voice.
#[must_use]
pub fn mount_overlay() -> BrowserOverlay {
    let scheduler = TimeoutScheduler::default();
    let speech = BrowserSpeech::detect();
    let voices = speech
        .as_ref()
        .map(bissa_core::speech::SpeechEngine::voices)
        .unwrap_or_default();
    let host = BrowserFeatureHost::new(speech, scheduler.clone());
    let mut overlay =
        AccessibilityOverlay::mount(BrowserStorage, DocumentSurface, host, scheduler);
    if overlay.adopt_voices(&voices) {
        log::debug!("default narration voice recorded");
    }
    overlay
}

#[cfg(test)]
mod tests {
    use super::*;
    use bissa_core::constants::{
        CSS_ANIMATION_DURATION, CSS_CURSOR_SCALE, CSS_FONT_SCALE, CSS_TRANSITION_DURATION,
        FOCUS_MODE_CLASS,
    };

    #[test]
    fn stylesheet_consumes_every_root_effect() {
        let css = overlay_css();
        for property in [
            CSS_FONT_SCALE,
            CSS_CURSOR_SCALE,
            CSS_ANIMATION_DURATION,
            CSS_TRANSITION_DURATION,
        ] {
            assert!(css.contains(property), "{property} has no consumer");
        }
        assert!(css.contains(&format!("html.{FOCUS_MODE_CLASS}")));
    }

    #[test]
    fn reading_guide_style_is_fixed_and_click_through() {
        for rule in ["position:fixed", "height:3px", "pointer-events:none", "z-index:9999"] {
            assert!(READING_GUIDE_STYLE.contains(rule), "missing {rule}");
        }
        assert_eq!(reading_guide_offset(240), "translateY(239px)");
    }
}
