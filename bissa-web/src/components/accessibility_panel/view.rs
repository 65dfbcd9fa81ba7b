use super::controls::{ChoiceRow, SliderRow, ToggleRow, narrate, select_value};
use super::focus::{keydown_handler, use_focus_management};
use crate::i18n::t;
use bissa_core::constants::{
    BRIGHTNESS_MAX, BRIGHTNESS_MIN, FONT_SIZE_MAX, FONT_SIZE_MIN, OVERLAY_PANEL_ID,
    PERCENT_SLIDER_STEP, SATURATION_MAX, SATURATION_MIN, TTS_DELAY_MAX_MS, TTS_DELAY_MIN_MS,
    TTS_PITCH_MAX, TTS_PITCH_MIN, TTS_RATE_MAX, TTS_RATE_MIN, TTS_VOLUME_MAX, TTS_VOLUME_MIN,
};
use bissa_core::settings::{AccessibilitySettings, Contrast, CursorSize, SettingChange, Toggle};
use bissa_core::speech::VoiceInfo;
use yew::prelude::*;

const TTS_DELAY_STEP_MS: f64 = 20.0;
const TTS_UNIT_STEP: f64 = 0.05;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub open: bool,
    pub settings: AccessibilitySettings,
    #[prop_or_default]
    pub voices: Vec<VoiceInfo>,
    pub on_open_change: Callback<bool>,
    pub on_change: Callback<SettingChange>,
    pub on_reset: Callback<()>,
    /// Panel self-narration; the owner decides whether anything is spoken.
    #[prop_or_default]
    pub on_speak: Callback<String>,
}

fn section(title_key: &str, body: Html) -> Html {
    html! {
        <section class="overlay-section">
            <h3>{ t(title_key) }</h3>
            { body }
        </section>
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u16(value: f64) -> u16 {
    value.round().clamp(0.0, f64::from(u16::MAX)) as u16
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u32(value: f64) -> u32 {
    value.round().clamp(0.0, f64::from(u32::MAX)) as u32
}

#[allow(clippy::cast_possible_truncation)]
const fn to_f32(value: f64) -> f32 {
    value as f32
}

#[function_component(AccessibilityPanel)]
pub fn accessibility_panel(p: &Props) -> Html {
    let panel_ref = use_node_ref();
    use_focus_management(p.open, panel_ref.clone());

    let open_toggle = {
        let cb = p.on_open_change.clone();
        let open = p.open;
        Callback::from(move |_| cb.emit(!open))
    };
    let trigger_label = t("overlay.open");
    let trigger = html! {
        <button
            type="button"
            class="overlay-trigger"
            aria-label={trigger_label.clone()}
            aria-expanded={p.open.to_string()}
            aria-controls="accessibility-panel"
            onclick={open_toggle}
        >
            <span aria-hidden="true">{ "♿" }</span>
        </button>
    };

    if !p.open {
        return html! { <div id={OVERLAY_PANEL_ID} class="overlay-root">{ trigger }</div> };
    }

    let close = {
        let cb = p.on_open_change.clone();
        Callback::from(move |()| cb.emit(false))
    };
    let on_keydown = keydown_handler(&panel_ref, close.clone());
    let s = &p.settings;
    let speak = &p.on_speak;

    let on_toggle = {
        let cb = p.on_change.clone();
        Callback::from(move |toggle: Toggle| cb.emit(SettingChange::Toggle(toggle)))
    };
    let toggle_row = |toggle: Toggle| {
        html! {
            <ToggleRow
                toggle={toggle}
                on={s.toggle_value(toggle)}
                on_toggle={on_toggle.clone()}
                on_speak={speak.clone()}
            />
        }
    };
    let change = |build: fn(f64) -> SettingChange| {
        let cb = p.on_change.clone();
        Callback::from(move |value: f64| cb.emit(build(value)))
    };

    let contrast_options = Contrast::ALL
        .iter()
        .map(|c| (c.key(), t(&format!("overlay.contrast.{}", c.key()))))
        .collect::<Vec<_>>();
    let on_contrast = {
        let cb = p.on_change.clone();
        Callback::from(move |key: &'static str| {
            if let Some(contrast) = Contrast::from_key(key) {
                cb.emit(SettingChange::Contrast(contrast));
            }
        })
    };
    let cursor_options = CursorSize::ALL
        .iter()
        .map(|c| (c.key(), t(&format!("overlay.cursor.{}", c.key()))))
        .collect::<Vec<_>>();
    let on_cursor = {
        let cb = p.on_change.clone();
        Callback::from(move |key: &'static str| {
            if let Some(size) = CursorSize::from_key(key) {
                cb.emit(SettingChange::CursorSize(size));
            }
        })
    };
    let on_voice = {
        let cb = p.on_change.clone();
        Callback::from(move |e: Event| {
            if let Some(name) = select_value(&e) {
                cb.emit(SettingChange::TtsVoice(name));
            }
        })
    };
    let reset = {
        let cb = p.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let close_click = Callback::from(move |_| close.emit(()));

    let visual = html! {
        <>
            <SliderRow id="overlay-font-size" label={t("overlay.font_size")}
                value={f64::from(s.font_size)} min={f64::from(FONT_SIZE_MIN)} max={f64::from(FONT_SIZE_MAX)}
                step={f64::from(PERCENT_SLIDER_STEP)} unit="%"
                on_input={change(|v| SettingChange::FontSize(to_u16(v)))} on_speak={speak.clone()} />
            <ChoiceRow label={t("overlay.contrast.label")} options={contrast_options}
                selected={s.contrast.key()} on_select={on_contrast} on_speak={speak.clone()} />
            <SliderRow id="overlay-brightness" label={t("overlay.brightness")}
                value={f64::from(s.brightness)} min={f64::from(BRIGHTNESS_MIN)} max={f64::from(BRIGHTNESS_MAX)}
                step={f64::from(PERCENT_SLIDER_STEP)} unit="%"
                on_input={change(|v| SettingChange::Brightness(to_u16(v)))} on_speak={speak.clone()} />
            <SliderRow id="overlay-saturation" label={t("overlay.saturation")}
                value={f64::from(s.saturation)} min={f64::from(SATURATION_MIN)} max={f64::from(SATURATION_MAX)}
                step={f64::from(PERCENT_SLIDER_STEP)} unit="%"
                on_input={change(|v| SettingChange::Saturation(to_u16(v)))} on_speak={speak.clone()} />
            { toggle_row(Toggle::InvertColors) }
            { toggle_row(Toggle::Grayscale) }
        </>
    };

    let motor = html! {
        <>
            <ChoiceRow label={t("overlay.cursor.label")} options={cursor_options}
                selected={s.cursor_size.key()} on_select={on_cursor} on_speak={speak.clone()} />
            { toggle_row(Toggle::ClickAnimation) }
            { toggle_row(Toggle::PauseAnimations) }
        </>
    };

    let cognitive = html! {
        <>
            { toggle_row(Toggle::ReadingGuide) }
            { toggle_row(Toggle::FocusMode) }
            { toggle_row(Toggle::SimplifyContent) }
        </>
    };

    let voice_label = t("overlay.tts_voice");
    let audio = html! {
        <>
            { toggle_row(Toggle::SoundEnabled) }
            { toggle_row(Toggle::TextToSpeech) }
            { toggle_row(Toggle::TtsOnHover) }
            { toggle_row(Toggle::TtsOnFocus) }
            <SliderRow id="overlay-tts-delay" label={t("overlay.tts_delay")}
                value={f64::from(s.tts_delay_ms)} min={f64::from(TTS_DELAY_MIN_MS)} max={f64::from(TTS_DELAY_MAX_MS)}
                step={TTS_DELAY_STEP_MS} unit="ms"
                on_input={change(|v| SettingChange::TtsDelayMs(to_u32(v)))} on_speak={speak.clone()} />
            <SliderRow id="overlay-tts-rate" label={t("overlay.tts_rate")}
                value={f64::from(s.tts_rate)} min={f64::from(TTS_RATE_MIN)} max={f64::from(TTS_RATE_MAX)}
                step={TTS_UNIT_STEP}
                on_input={change(|v| SettingChange::TtsRate(to_f32(v)))} on_speak={speak.clone()} />
            <SliderRow id="overlay-tts-pitch" label={t("overlay.tts_pitch")}
                value={f64::from(s.tts_pitch)} min={f64::from(TTS_PITCH_MIN)} max={f64::from(TTS_PITCH_MAX)}
                step={TTS_UNIT_STEP}
                on_input={change(|v| SettingChange::TtsPitch(to_f32(v)))} on_speak={speak.clone()} />
            <SliderRow id="overlay-tts-volume" label={t("overlay.tts_volume")}
                value={f64::from(s.tts_volume)} min={f64::from(TTS_VOLUME_MIN)} max={f64::from(TTS_VOLUME_MAX)}
                step={TTS_UNIT_STEP}
                on_input={change(|v| SettingChange::TtsVolume(to_f32(v)))} on_speak={speak.clone()} />
            <div class="overlay-row" onmouseenter={narrate(speak, &voice_label)}>
                <label for="overlay-tts-voice" class="overlay-label">{ voice_label.clone() }</label>
                <select id="overlay-tts-voice" onchange={on_voice}>
                    <option value="" selected={s.tts_voice.is_empty()}>{ t("overlay.voice_auto") }</option>
                    { for p.voices.iter().map(|voice| html! {
                        <option value={voice.name.clone()} selected={voice.name == s.tts_voice}>
                            { format!("{} ({})", voice.name, voice.lang) }
                        </option>
                    }) }
                </select>
            </div>
        </>
    };

    let navigation = html! {
        <>
            { toggle_row(Toggle::KeyboardNavigation) }
            { toggle_row(Toggle::SkipLinks) }
        </>
    };

    let reset_label = t("overlay.reset");
    let close_label = t("overlay.close");
    html! {
        <div id={OVERLAY_PANEL_ID} class="overlay-root">
            { trigger }
            <div
                id="accessibility-panel"
                class="overlay-panel"
                role="dialog"
                aria-modal="true"
                aria-labelledby="overlay-title"
                ref={panel_ref}
                onkeydown={on_keydown}
            >
                <header class="overlay-header">
                    <h2 id="overlay-title">{ t("overlay.title") }</h2>
                    <button type="button" class="overlay-close" aria-label={close_label.clone()}
                        onclick={close_click} onmouseenter={narrate(speak, &close_label)}>
                        <span aria-hidden="true">{ "×" }</span>
                    </button>
                </header>
                <div class="overlay-master">{ toggle_row(Toggle::Enabled) }</div>
                { section("overlay.section.visual", visual) }
                { section("overlay.section.motor", motor) }
                { section("overlay.section.cognitive", cognitive) }
                { section("overlay.section.audio", audio) }
                { section("overlay.section.navigation", navigation) }
                <footer class="overlay-footer">
                    <button type="button" class="overlay-reset" onclick={reset}
                        onmouseenter={narrate(speak, &reset_label)}>{ reset_label.clone() }</button>
                </footer>
            </div>
        </div>
    }
}
