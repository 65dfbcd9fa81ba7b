//! Bridge argument decoding, kept free of `web_sys` so it runs natively.

use bissa_core::settings::{Contrast, CursorSize, SettingChange, Toggle};
use serde_json::Value;

fn as_u16(value: &Value) -> Option<u16> {
    value.as_u64().and_then(|v| u16::try_from(v).ok())
}

#[allow(clippy::cast_possible_truncation)]
fn as_f32(value: &Value) -> Option<f32> {
    value.as_f64().map(|v| v as f32)
}

/// `__bissaTest.set(key, value)`: keys are the persisted camelCase names.
pub(super) fn setting_change(key: &str, value: &Value) -> Option<SettingChange> {
    let change = match key {
        "fontSize" => SettingChange::FontSize(as_u16(value)?),
        "brightness" => SettingChange::Brightness(as_u16(value)?),
        "saturation" => SettingChange::Saturation(as_u16(value)?),
        "contrast" => SettingChange::Contrast(Contrast::from_key(value.as_str()?)?),
        "cursorSize" => SettingChange::CursorSize(CursorSize::from_key(value.as_str()?)?),
        "ttsDelayMs" => SettingChange::TtsDelayMs(u32::try_from(value.as_u64()?).ok()?),
        "ttsRate" => SettingChange::TtsRate(as_f32(value)?),
        "ttsPitch" => SettingChange::TtsPitch(as_f32(value)?),
        "ttsVolume" => SettingChange::TtsVolume(as_f32(value)?),
        "ttsVoice" => SettingChange::TtsVoice(value.as_str()?.to_string()),
        other => SettingChange::Toggle(Toggle::from_key(other)?),
    };
    Some(change)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_and_enum_keys_decode() {
        assert_eq!(
            setting_change("fontSize", &json!(150)),
            Some(SettingChange::FontSize(150))
        );
        assert_eq!(
            setting_change("contrast", &json!("higher")),
            Some(SettingChange::Contrast(Contrast::Higher))
        );
        assert_eq!(
            setting_change("cursorSize", &json!("extra")),
            Some(SettingChange::CursorSize(CursorSize::Extra))
        );
        assert_eq!(
            setting_change("ttsVoice", &json!("Damayanti")),
            Some(SettingChange::TtsVoice("Damayanti".into()))
        );
    }

    #[test]
    fn toggle_keys_fall_through() {
        assert_eq!(
            setting_change("readingGuide", &Value::Null),
            Some(SettingChange::Toggle(Toggle::ReadingGuide))
        );
        assert_eq!(setting_change("unknownKey", &json!(true)), None);
        assert_eq!(setting_change("fontSize", &json!("big")), None);
        assert_eq!(setting_change("brightness", &json!(-5)), None);
    }
}
