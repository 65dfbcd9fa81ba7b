use crate::constants::{
    BRIGHTNESS_MAX, BRIGHTNESS_MIN, BRIGHTNESS_NEUTRAL, FONT_SIZE_MAX, FONT_SIZE_MIN,
    FONT_SIZE_NEUTRAL, SATURATION_MAX, SATURATION_MIN, SATURATION_NEUTRAL, TTS_DELAY_DEFAULT_MS,
    TTS_DELAY_MAX_MS, TTS_DELAY_MIN_MS, TTS_PITCH_DEFAULT, TTS_PITCH_MAX, TTS_PITCH_MIN,
    TTS_RATE_DEFAULT, TTS_RATE_MAX, TTS_RATE_MIN, TTS_VOLUME_DEFAULT, TTS_VOLUME_MAX,
    TTS_VOLUME_MIN,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Contrast boost applied through the root color filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Contrast {
    #[default]
    Normal,
    High,
    Higher,
}

impl Contrast {
    pub const ALL: [Self; 3] = [Self::Normal, Self::High, Self::Higher];

    #[must_use]
    pub const fn filter_term(self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::High => Some("contrast(150%)"),
            Self::Higher => Some("contrast(200%)"),
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::High => "high",
            Self::Higher => "higher",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

/// Pointer enlargement exposed to the stylesheet as `--cursor-scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CursorSize {
    #[default]
    Normal,
    Large,
    Extra,
}

impl CursorSize {
    pub const ALL: [Self; 3] = [Self::Normal, Self::Large, Self::Extra];

    #[must_use]
    pub const fn scale(self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Large => Some("2"),
            Self::Extra => Some("3"),
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Large => "large",
            Self::Extra => "extra",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

// Unknown variants from an older or newer build fall back to the default
// instead of discarding the whole record.
impl<'de> Deserialize<'de> for Contrast {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_key(&raw).unwrap_or_default())
    }
}

impl<'de> Deserialize<'de> for CursorSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_key(&raw).unwrap_or_default())
    }
}

/// The single persisted accessibility record.
///
/// Field names serialize in camelCase so the stored blob keeps the shape
/// users already have in their browsers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)]
pub struct AccessibilitySettings {
    pub enabled: bool,

    pub font_size: u16,
    pub contrast: Contrast,
    pub brightness: u16,
    pub saturation: u16,
    pub invert_colors: bool,
    pub grayscale: bool,

    pub cursor_size: CursorSize,
    pub click_animation: bool,
    pub pause_animations: bool,

    pub reading_guide: bool,
    pub focus_mode: bool,
    pub simplify_content: bool,

    pub sound_enabled: bool,
    pub text_to_speech: bool,
    pub tts_on_hover: bool,
    pub tts_on_focus: bool,
    pub tts_delay_ms: u32,
    pub tts_rate: f32,
    pub tts_pitch: f32,
    pub tts_volume: f32,
    pub tts_voice: String,

    pub keyboard_navigation: bool,
    pub skip_links: bool,
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            font_size: FONT_SIZE_NEUTRAL,
            contrast: Contrast::Normal,
            brightness: BRIGHTNESS_NEUTRAL,
            saturation: SATURATION_NEUTRAL,
            invert_colors: false,
            grayscale: false,
            cursor_size: CursorSize::Normal,
            click_animation: false,
            pause_animations: false,
            reading_guide: false,
            focus_mode: false,
            simplify_content: false,
            sound_enabled: true,
            text_to_speech: false,
            tts_on_hover: true,
            tts_on_focus: true,
            tts_delay_ms: TTS_DELAY_DEFAULT_MS,
            tts_rate: TTS_RATE_DEFAULT,
            tts_pitch: TTS_PITCH_DEFAULT,
            tts_volume: TTS_VOLUME_DEFAULT,
            tts_voice: String::new(),
            keyboard_navigation: true,
            skip_links: true,
        }
    }
}

/// Boolean accommodations that the panel flips with a single button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    Enabled,
    InvertColors,
    Grayscale,
    ClickAnimation,
    PauseAnimations,
    ReadingGuide,
    FocusMode,
    SimplifyContent,
    SoundEnabled,
    TextToSpeech,
    TtsOnHover,
    TtsOnFocus,
    KeyboardNavigation,
    SkipLinks,
}

impl Toggle {
    pub const ALL: [Self; 14] = [
        Self::Enabled,
        Self::InvertColors,
        Self::Grayscale,
        Self::ClickAnimation,
        Self::PauseAnimations,
        Self::ReadingGuide,
        Self::FocusMode,
        Self::SimplifyContent,
        Self::SoundEnabled,
        Self::TextToSpeech,
        Self::TtsOnHover,
        Self::TtsOnFocus,
        Self::KeyboardNavigation,
        Self::SkipLinks,
    ];

    /// The persisted field name this toggle flips.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::InvertColors => "invertColors",
            Self::Grayscale => "grayscale",
            Self::ClickAnimation => "clickAnimation",
            Self::PauseAnimations => "pauseAnimations",
            Self::ReadingGuide => "readingGuide",
            Self::FocusMode => "focusMode",
            Self::SimplifyContent => "simplifyContent",
            Self::SoundEnabled => "soundEnabled",
            Self::TextToSpeech => "textToSpeech",
            Self::TtsOnHover => "ttsOnHover",
            Self::TtsOnFocus => "ttsOnFocus",
            Self::KeyboardNavigation => "keyboardNavigation",
            Self::SkipLinks => "skipLinks",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }
}

/// One user-driven mutation of the settings record.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingChange {
    Toggle(Toggle),
    FontSize(u16),
    Brightness(u16),
    Saturation(u16),
    Contrast(Contrast),
    CursorSize(CursorSize),
    TtsDelayMs(u32),
    TtsRate(f32),
    TtsPitch(f32),
    TtsVolume(f32),
    TtsVoice(String),
}

fn clamp_unit(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

/// Bounds of the integer sliders, keyed by persisted field name.
fn integer_range(key: &str) -> Option<(u32, u32)> {
    match key {
        "fontSize" => Some((FONT_SIZE_MIN.into(), FONT_SIZE_MAX.into())),
        "brightness" => Some((BRIGHTNESS_MIN.into(), BRIGHTNESS_MAX.into())),
        "saturation" => Some((SATURATION_MIN.into(), SATURATION_MAX.into())),
        "ttsDelayMs" => Some((TTS_DELAY_MIN_MS, TTS_DELAY_MAX_MS)),
        _ => None,
    }
}

/// Negative or fractional numbers in an integer slider are rounded and
/// clamped instead of rejected.
fn coerce_integer(key: &str, value: Value) -> Value {
    let Some((min, max)) = integer_range(key) else {
        return value;
    };
    match value.as_f64() {
        Some(n) if n.is_finite() => {
            let clamped = n.round().clamp(f64::from(min), f64::from(max));
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let whole = clamped as u32;
            Value::from(whole)
        }
        _ => value,
    }
}

impl AccessibilitySettings {
    /// Parse a persisted blob: merge every known, well-typed key over the
    /// defaults, then clamp the result into range.
    ///
    /// Keys with the wrong type are dropped one by one, so a single corrupted
    /// field does not reset the user's other choices.
    #[must_use]
    pub fn from_persisted(raw: &str) -> Option<Self> {
        let Value::Object(persisted) = serde_json::from_str::<Value>(raw).ok()? else {
            return None;
        };
        let Ok(Value::Object(mut merged)) = serde_json::to_value(Self::default()) else {
            return None;
        };

        for (key, value) in persisted {
            if !merged.contains_key(&key) {
                continue;
            }
            let value = coerce_integer(&key, value);
            let previous = merged.insert(key.clone(), value);
            let accepted = serde_json::from_value::<Self>(Value::Object(merged.clone())).is_ok();
            if !accepted {
                log::warn!("ignoring persisted accessibility field `{key}` with unexpected type");
                if let Some(prev) = previous {
                    merged.insert(key, prev);
                }
            }
        }

        serde_json::from_value::<Self>(Value::Object(merged))
            .ok()
            .map(Self::sanitized)
    }

    /// Clamp every ranged field into its documented bounds.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.font_size = self.font_size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX);
        self.brightness = self.brightness.clamp(BRIGHTNESS_MIN, BRIGHTNESS_MAX);
        self.saturation = self.saturation.clamp(SATURATION_MIN, SATURATION_MAX);
        self.tts_delay_ms = self.tts_delay_ms.clamp(TTS_DELAY_MIN_MS, TTS_DELAY_MAX_MS);
        self.tts_rate = clamp_unit(self.tts_rate, TTS_RATE_MIN, TTS_RATE_MAX, TTS_RATE_DEFAULT);
        self.tts_pitch = clamp_unit(
            self.tts_pitch,
            TTS_PITCH_MIN,
            TTS_PITCH_MAX,
            TTS_PITCH_DEFAULT,
        );
        self.tts_volume = clamp_unit(
            self.tts_volume,
            TTS_VOLUME_MIN,
            TTS_VOLUME_MAX,
            TTS_VOLUME_DEFAULT,
        );
        self.tts_voice = self.tts_voice.trim().to_string();
        self
    }

    #[must_use]
    pub const fn toggle_value(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::Enabled => self.enabled,
            Toggle::InvertColors => self.invert_colors,
            Toggle::Grayscale => self.grayscale,
            Toggle::ClickAnimation => self.click_animation,
            Toggle::PauseAnimations => self.pause_animations,
            Toggle::ReadingGuide => self.reading_guide,
            Toggle::FocusMode => self.focus_mode,
            Toggle::SimplifyContent => self.simplify_content,
            Toggle::SoundEnabled => self.sound_enabled,
            Toggle::TextToSpeech => self.text_to_speech,
            Toggle::TtsOnHover => self.tts_on_hover,
            Toggle::TtsOnFocus => self.tts_on_focus,
            Toggle::KeyboardNavigation => self.keyboard_navigation,
            Toggle::SkipLinks => self.skip_links,
        }
    }

    const fn toggle_slot(&mut self, toggle: Toggle) -> &mut bool {
        match toggle {
            Toggle::Enabled => &mut self.enabled,
            Toggle::InvertColors => &mut self.invert_colors,
            Toggle::Grayscale => &mut self.grayscale,
            Toggle::ClickAnimation => &mut self.click_animation,
            Toggle::PauseAnimations => &mut self.pause_animations,
            Toggle::ReadingGuide => &mut self.reading_guide,
            Toggle::FocusMode => &mut self.focus_mode,
            Toggle::SimplifyContent => &mut self.simplify_content,
            Toggle::SoundEnabled => &mut self.sound_enabled,
            Toggle::TextToSpeech => &mut self.text_to_speech,
            Toggle::TtsOnHover => &mut self.tts_on_hover,
            Toggle::TtsOnFocus => &mut self.tts_on_focus,
            Toggle::KeyboardNavigation => &mut self.keyboard_navigation,
            Toggle::SkipLinks => &mut self.skip_links,
        }
    }

    /// Apply a single change and re-clamp.
    pub fn apply_change(&mut self, change: SettingChange) {
        match change {
            SettingChange::Toggle(toggle) => {
                let slot = self.toggle_slot(toggle);
                *slot = !*slot;
            }
            SettingChange::FontSize(v) => self.font_size = v,
            SettingChange::Brightness(v) => self.brightness = v,
            SettingChange::Saturation(v) => self.saturation = v,
            SettingChange::Contrast(v) => self.contrast = v,
            SettingChange::CursorSize(v) => self.cursor_size = v,
            SettingChange::TtsDelayMs(v) => self.tts_delay_ms = v,
            SettingChange::TtsRate(v) => self.tts_rate = v,
            SettingChange::TtsPitch(v) => self.tts_pitch = v,
            SettingChange::TtsVolume(v) => self.tts_volume = v,
            SettingChange::TtsVoice(v) => self.tts_voice = v,
        }
        *self = std::mem::take(self).sanitized();
    }

    /// True when the hover/focus narration feature should be listening.
    #[must_use]
    pub const fn speech_active(&self) -> bool {
        self.enabled && self.text_to_speech
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_neutral_state() {
        let s = AccessibilitySettings::default();
        assert!(!s.enabled);
        assert_eq!(s.font_size, 100);
        assert_eq!(s.contrast, Contrast::Normal);
        assert_eq!(s.tts_delay_ms, 120);
        assert!(s.sound_enabled);
        assert!(s.tts_on_hover && s.tts_on_focus);
        assert!(s.tts_voice.is_empty());
    }

    #[test]
    fn persisted_blob_uses_camel_case_keys() {
        let json = serde_json::to_string(&AccessibilitySettings::default()).unwrap();
        assert!(json.contains("\"fontSize\":100"));
        assert!(json.contains("\"ttsDelayMs\":120"));
        assert!(json.contains("\"contrast\":\"normal\""));
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let s = AccessibilitySettings::from_persisted(r#"{"enabled":true,"fontSize":150}"#)
            .expect("object parses");
        assert!(s.enabled);
        assert_eq!(s.font_size, 150);
        assert_eq!(s.brightness, 100);
        assert!(s.skip_links);
    }

    #[test]
    fn unknown_keys_and_bad_types_are_ignored_per_field() {
        let s = AccessibilitySettings::from_persisted(
            r#"{"enabled":true,"legacyTheme":"dark","fontSize":"huge","grayscale":true}"#,
        )
        .expect("object parses");
        assert!(s.enabled);
        assert!(s.grayscale);
        assert_eq!(s.font_size, 100);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let s = AccessibilitySettings::from_persisted(
            r#"{"fontSize":400,"brightness":10,"saturation":900,"ttsDelayMs":5000,"ttsRate":9.0,"ttsVolume":-1.0}"#,
        )
        .expect("object parses");
        assert_eq!(s.font_size, 200);
        assert_eq!(s.brightness, 50);
        assert_eq!(s.saturation, 200);
        assert_eq!(s.tts_delay_ms, 600);
        assert!((s.tts_rate - 1.5).abs() < f32::EPSILON);
        assert!(s.tts_volume.abs() < f32::EPSILON);
    }

    #[test]
    fn negative_and_fractional_sliders_are_clamped_not_dropped() {
        let s = AccessibilitySettings::from_persisted(
            r#"{"fontSize":-20,"brightness":170.5,"saturation":87.6,"ttsDelayMs":-3}"#,
        )
        .expect("object parses");
        assert_eq!(s.font_size, 50);
        assert_eq!(s.brightness, 150);
        assert_eq!(s.saturation, 88);
        assert_eq!(s.tts_delay_ms, 0);
    }

    #[test]
    fn unknown_enum_variants_use_default_variant() {
        let s = AccessibilitySettings::from_persisted(
            r#"{"contrast":"extreme","cursorSize":"extra"}"#,
        )
        .expect("object parses");
        assert_eq!(s.contrast, Contrast::Normal);
        assert_eq!(s.cursor_size, CursorSize::Extra);
    }

    #[test]
    fn non_object_blobs_are_rejected() {
        assert!(AccessibilitySettings::from_persisted("[1,2,3]").is_none());
        assert!(AccessibilitySettings::from_persisted("{not json").is_none());
    }

    #[test]
    fn toggles_flip_only_their_field() {
        let mut s = AccessibilitySettings::default();
        s.apply_change(SettingChange::Toggle(Toggle::ReadingGuide));
        assert!(s.reading_guide);
        assert!(s.toggle_value(Toggle::ReadingGuide));
        assert!(!s.focus_mode);
        s.apply_change(SettingChange::Toggle(Toggle::ReadingGuide));
        assert!(!s.reading_guide);
    }

    #[test]
    fn slider_changes_are_clamped() {
        let mut s = AccessibilitySettings::default();
        s.apply_change(SettingChange::FontSize(20));
        assert_eq!(s.font_size, 50);
        s.apply_change(SettingChange::TtsPitch(f32::NAN));
        assert!((s.tts_pitch - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn toggle_keys_match_persisted_field_names() {
        let Ok(serde_json::Value::Object(fields)) =
            serde_json::to_value(AccessibilitySettings::default())
        else {
            panic!("settings should serialize to an object");
        };
        for toggle in Toggle::ALL {
            assert!(fields.contains_key(toggle.key()), "{}", toggle.key());
            assert_eq!(Toggle::from_key(toggle.key()), Some(toggle));
        }
        assert_eq!(Toggle::from_key("fontSize"), None);
    }
}
