use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent};
use yew::hook;
use yew::prelude::*;

const FOCUSABLE_QUERY: &str =
    "button:not([disabled]), [href], input:not([disabled]), select, [tabindex]:not([tabindex='-1'])";

fn focusable_at(container: &Element, index: u32) -> Option<HtmlElement> {
    container
        .query_selector_all(FOCUSABLE_QUERY)
        .ok()
        .and_then(|list| list.get(index))
        .and_then(|node| node.dyn_into::<HtmlElement>().ok())
}

/// Move focus into the panel when it opens and give it back when it closes.
#[hook]
pub fn use_focus_management(open: bool, container_ref: NodeRef) {
    use_effect_with((open, container_ref), move |(open, container_ref)| {
        let mut previous: Option<HtmlElement> = None;
        if cfg!(target_arch = "wasm32") && *open {
            previous = crate::dom::document()
                .and_then(|doc| doc.active_element())
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            if let Some(first) = container_ref
                .cast::<Element>()
                .and_then(|el| focusable_at(&el, 0))
            {
                let _ = first.focus();
            }
        }
        move || {
            if let Some(el) = previous {
                let _ = el.focus();
            }
        }
    });
}

/// Escape closes the panel; Tab and Shift+Tab wrap inside it.
pub fn keydown_handler(container_ref: &NodeRef, on_close: Callback<()>) -> Callback<KeyboardEvent> {
    let container_ref = container_ref.clone();
    Callback::from(move |e: KeyboardEvent| {
        if !cfg!(target_arch = "wasm32") {
            return;
        }
        match e.key().as_str() {
            "Escape" => {
                on_close.emit(());
                return;
            }
            "Tab" => {}
            _ => return,
        }
        let Some(container) = container_ref.cast::<Element>() else {
            return;
        };
        let Ok(nodes) = container.query_selector_all(FOCUSABLE_QUERY) else {
            return;
        };
        let len = nodes.length();
        if len == 0 {
            return;
        }
        let first = focusable_at(&container, 0);
        let last = focusable_at(&container, len - 1);
        let active = crate::dom::document().and_then(|doc| doc.active_element());
        let (Some(first), Some(last), Some(active)) = (first, last, active) else {
            return;
        };
        let wrap_to = if !container.contains(Some(&active)) {
            Some(&first)
        } else if e.shift_key() && active == *first.unchecked_ref::<Element>() {
            Some(&last)
        } else if !e.shift_key() && active == *last.unchecked_ref::<Element>() {
            Some(&first)
        } else {
            None
        };
        if let Some(target) = wrap_to {
            e.prevent_default();
            let _ = target.focus();
        }
    })
}
