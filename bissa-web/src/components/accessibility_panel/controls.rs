use crate::i18n::t;
use bissa_core::settings::Toggle;
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

pub fn input_value(e: &InputEvent) -> Option<f64> {
    e.target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        .and_then(|input| input.value().parse::<f64>().ok())
}

pub fn select_value(e: &Event) -> Option<String> {
    e.target()
        .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
        .map(|select| select.value())
}

/// Narrate `label` when the pointer enters a control.
pub fn narrate(on_speak: &Callback<String>, label: &str) -> Callback<MouseEvent> {
    let on_speak = on_speak.clone();
    let label = label.to_string();
    Callback::from(move |_| on_speak.emit(label.clone()))
}

#[derive(Properties, PartialEq, Clone)]
pub struct ToggleProps {
    pub toggle: Toggle,
    pub on: bool,
    pub on_toggle: Callback<Toggle>,
    pub on_speak: Callback<String>,
}

#[function_component(ToggleRow)]
pub fn toggle_row(p: &ToggleProps) -> Html {
    let label = t(&format!("overlay.toggle.{}", p.toggle.key()));
    let onclick = {
        let cb = p.on_toggle.clone();
        let toggle = p.toggle;
        Callback::from(move |_| cb.emit(toggle))
    };
    html! {
        <div class="overlay-row">
            <span class="overlay-label">{ label.clone() }</span>
            <button
                type="button"
                role="switch"
                class={classes!("switch", p.on.then_some("switch-on"))}
                data-toggle={p.toggle.key()}
                aria-checked={p.on.to_string()}
                aria-label={label.clone()}
                onclick={onclick}
                onmouseenter={narrate(&p.on_speak, &label)}
            >
                <span class="switch-thumb" aria-hidden="true"></span>
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct SliderProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Rendered after the value, e.g. `%` or `ms`.
    #[prop_or_default]
    pub unit: AttrValue,
    pub on_input: Callback<f64>,
    pub on_speak: Callback<String>,
}

#[function_component(SliderRow)]
pub fn slider_row(p: &SliderProps) -> Html {
    let oninput = {
        let cb = p.on_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(value) = input_value(&e) {
                cb.emit(value);
            }
        })
    };
    let shown = if p.step < 1.0 {
        format!("{:.2}{}", p.value, p.unit)
    } else {
        format!("{}{}", p.value.round(), p.unit)
    };
    html! {
        <div class="overlay-row overlay-slider" onmouseenter={narrate(&p.on_speak, &p.label)}>
            <label for={p.id.clone()} class="overlay-label">{ p.label.clone() }</label>
            <input
                id={p.id.clone()}
                type="range"
                min={p.min.to_string()}
                max={p.max.to_string()}
                step={p.step.to_string()}
                value={p.value.to_string()}
                aria-valuetext={shown.clone()}
                oninput={oninput}
            />
            <output for={p.id.clone()} class="overlay-value">{ shown }</output>
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct ChoiceProps {
    pub label: AttrValue,
    /// `(key, label)` pairs in display order.
    pub options: Vec<(&'static str, String)>,
    pub selected: &'static str,
    pub on_select: Callback<&'static str>,
    pub on_speak: Callback<String>,
}

#[function_component(ChoiceRow)]
pub fn choice_row(p: &ChoiceProps) -> Html {
    html! {
        <div class="overlay-row overlay-choice" role="radiogroup" aria-label={p.label.clone()}>
            <span class="overlay-label">{ p.label.clone() }</span>
            <div class="choice-buttons">
                { for p.options.iter().map(|(key, label)| {
                    let checked = *key == p.selected;
                    let onclick = {
                        let cb = p.on_select.clone();
                        let key = *key;
                        Callback::from(move |_| cb.emit(key))
                    };
                    html! {
                        <button
                            type="button"
                            role="radio"
                            class={classes!("choice", checked.then_some("choice-active"))}
                            aria-checked={checked.to_string()}
                            data-choice={*key}
                            onclick={onclick}
                            onmouseenter={narrate(&p.on_speak, label)}
                        >{ label.clone() }</button>
                    }
                }) }
            </div>
        </div>
    }
}
