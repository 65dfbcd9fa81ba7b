use super::shared::setting_change;
use crate::app::overlay::OverlayControls;
use crate::dom;
use crate::router::Route;
use bissa_core::overlay::OverlaySnapshot;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use yew::prelude::*;
use yew_router::Routable;

#[derive(Serialize)]
struct BridgeState {
    route: &'static str,
    path: String,
    overlay: Option<OverlaySnapshot>,
}

struct BridgeBindings {
    _state: Closure<dyn FnMut() -> JsValue>,
    _toggle: Closure<dyn FnMut(JsValue) -> JsValue>,
    _set: Closure<dyn FnMut(JsValue, JsValue) -> JsValue>,
    _reset: Closure<dyn FnMut()>,
}

impl BridgeBindings {
    fn keep(&self) {
        let _ = (&self._state, &self._toggle, &self._set, &self._reset);
    }
}

fn current_path() -> String {
    dom::window()
        .and_then(|win| win.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn build_bridge(controls: &OverlayControls) -> BridgeBindings {
    let handle = controls.handle.clone();
    let state = Closure::wrap(Box::new(move || {
        let path = current_path();
        let route = Route::recognize(&path).unwrap_or(Route::NotFound);
        serde_wasm_bindgen::to_value(&BridgeState {
            route: route.label(),
            path,
            overlay: handle.snapshot(),
        })
        .unwrap_or(JsValue::NULL)
    }) as Box<dyn FnMut() -> JsValue>);

    let on_change = controls.on_change.clone();
    let toggle = Closure::wrap(Box::new(move |key: JsValue| {
        let change = key
            .as_string()
            .and_then(|k| setting_change(&k, &serde_json::Value::Null));
        let applied = change.is_some();
        if let Some(change) = change {
            on_change.emit(change);
        }
        JsValue::from_bool(applied)
    }) as Box<dyn FnMut(JsValue) -> JsValue>);

    let on_change = controls.on_change.clone();
    let set = Closure::wrap(Box::new(move |key: JsValue, value: JsValue| {
        let value: serde_json::Value =
            serde_wasm_bindgen::from_value(value).unwrap_or(serde_json::Value::Null);
        let change = key.as_string().and_then(|k| setting_change(&k, &value));
        let applied = change.is_some();
        if let Some(change) = change {
            on_change.emit(change);
        }
        JsValue::from_bool(applied)
    }) as Box<dyn FnMut(JsValue, JsValue) -> JsValue>);

    let on_reset = controls.on_reset.clone();
    let reset = Closure::wrap(Box::new(move || on_reset.emit(())) as Box<dyn FnMut()>);

    BridgeBindings {
        _state: state,
        _toggle: toggle,
        _set: set,
        _reset: reset,
    }
}

fn attach_bridge(bindings: &BridgeBindings) {
    let Some(window) = dom::window() else {
        return;
    };
    let bridge = js_sys::Object::new();
    let entries: [(&str, &JsValue); 4] = [
        ("state", bindings._state.as_ref()),
        ("toggle", bindings._toggle.as_ref()),
        ("set", bindings._set.as_ref()),
        ("reset", bindings._reset.as_ref()),
    ];
    for (name, function) in entries {
        let _ = js_sys::Reflect::set(&bridge, &JsValue::from_str(name), function);
    }
    let _ = js_sys::Reflect::set(&window, &JsValue::from_str("__bissaTest"), &bridge);
    log::info!("test bridge installed at window.__bissaTest");
}

#[hook]
pub fn use_test_bridge(controls: &OverlayControls) {
    let bridge_handle = use_mut_ref(|| None::<BridgeBindings>);
    let controls = controls.clone();

    use_effect_with((), move |()| {
        if dom::test_mode_enabled() {
            let bindings = build_bridge(&controls);
            attach_bridge(&bindings);
            bindings.keep();
            *bridge_handle.borrow_mut() = Some(bindings);
        }
        || {}
    });
}
