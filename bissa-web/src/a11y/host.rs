use super::element::DomElement;
use super::events::EventBinding;
use super::scheduler::TimeoutScheduler;
use super::speech::BrowserSpeech;
use super::{READING_GUIDE_STYLE, reading_guide_offset};
use crate::dom;
use bissa_core::constants::READING_GUIDE_ID;
use bissa_core::lifecycle::{Scheduler, Teardown};
use bissa_core::overlay::FeatureHost;
use bissa_core::route::{MutationSummary, RouteSignals};
use bissa_core::settings::AccessibilitySettings;
use bissa_core::speech::{KeyOutcome, SpeechController, SpeechEngine, Trigger, speak_now};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, EventTarget, HtmlElement, KeyboardEvent, MouseEvent, MutationObserver,
    MutationObserverInit, MutationRecord, Node,
};

type BrowserController = SpeechController<BrowserSpeech, TimeoutScheduler, DomElement>;

/// Wires overlay features into the live document.
#[derive(Clone)]
pub struct BrowserFeatureHost {
    speech: Option<BrowserSpeech>,
    scheduler: TimeoutScheduler,
}

impl BrowserFeatureHost {
    #[must_use]
    pub const fn new(speech: Option<BrowserSpeech>, scheduler: TimeoutScheduler) -> Self {
        Self { speech, scheduler }
    }

    #[must_use]
    pub const fn speech(&self) -> Option<&BrowserSpeech> {
        self.speech.as_ref()
    }
}

fn detach_all(bindings: Vec<EventBinding>) {
    for binding in bindings {
        binding.detach();
    }
}

fn summarize(records: &js_sys::Array) -> Vec<MutationSummary> {
    records
        .iter()
        .filter_map(|record| record.dyn_into::<MutationRecord>().ok())
        .map(|record| {
            let added = record.added_nodes();
            let tags = (0..added.length())
                .filter_map(|i| added.item(i))
                .filter(|node| node.node_type() == Node::ELEMENT_NODE)
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .map(|el| el.tag_name().to_ascii_uppercase());
            MutationSummary {
                child_list: record.type_() == "childList",
                added_elements: tags.collect(),
            }
        })
        .collect()
}

fn speech_bindings(document: &EventTarget, controller: &BrowserController) -> Vec<EventBinding> {
    let hover = controller.clone();
    let out = controller.clone();
    let focus = controller.clone();
    let keys = controller.clone();
    [
        EventBinding::attach(document, "mouseover", move |event| {
            if let Some(target) = DomElement::from_event(&event) {
                hover.handle(Trigger::Hover, &target);
            }
        }),
        EventBinding::attach(document, "mouseout", move |_event| out.on_mouse_out()),
        EventBinding::attach(document, "focusin", move |event| {
            if let Some(target) = DomElement::from_event(&event) {
                focus.handle(Trigger::Focus, &target);
            }
        }),
        EventBinding::attach(document, "keydown", move |event| {
            let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if keys.on_key(&key_event.key()) == KeyOutcome::PreventDefault {
                key_event.prevent_default();
            }
        }),
    ]
    .into_iter()
    .flatten()
    .collect()
}

impl FeatureHost for BrowserFeatureHost {
    fn attach_reading_guide(&self) -> Option<Teardown> {
        let document = dom::document()?;
        let body = document.body()?;
        let guide: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
        guide.set_id(READING_GUIDE_ID);
        guide.set_class_name("reading-guide");
        let _ = guide.set_attribute("aria-hidden", "true");
        guide.style().set_css_text(READING_GUIDE_STYLE);
        body.append_child(&guide).ok()?;

        let follower = guide.clone();
        let Some(tracker) = EventBinding::attach(&document, "mousemove", move |event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                let _ = follower
                    .style()
                    .set_property("transform", &reading_guide_offset(mouse.client_y()));
            }
        }) else {
            guide.remove();
            return None;
        };

        Some(Box::new(move || {
            tracker.detach();
            guide.remove();
        }))
    }

    fn attach_speech(&self, settings: &AccessibilitySettings) -> Option<Teardown> {
        let engine = self.speech.clone()?;
        let document: EventTarget = dom::document()?.into();
        let controller: BrowserController =
            SpeechController::new(engine, self.scheduler.clone(), settings.clone());
        let bindings = speech_bindings(&document, &controller);
        log::debug!("narration listeners attached ({})", bindings.len());

        Some(Box::new(move || {
            detach_all(bindings);
            controller.shutdown();
        }))
    }

    fn watch_navigation<S>(&self, signals: RouteSignals<S>) -> Option<Teardown>
    where
        S: Scheduler + Clone + 'static,
    {
        let document = dom::document()?;
        let body = document.body()?;

        let on_mutation = signals.clone();
        let callback = Closure::wrap(Box::new(move |records: js_sys::Array, _: MutationObserver| {
            on_mutation.mutations(&summarize(&records));
        }) as Box<dyn FnMut(js_sys::Array, MutationObserver)>);
        let observer = MutationObserver::new(callback.as_ref().unchecked_ref()).ok()?;
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        if let Err(err) = observer.observe_with_options(&body, &init) {
            log::warn!("navigation observer failed: {}", dom::js_error_message(&err));
            return None;
        }

        let window: EventTarget = dom::window()?.into();
        let history = EventBinding::attach(&window, "popstate", move |_event| signals.popstate());

        Some(Box::new(move || {
            observer.disconnect();
            drop(callback);
            if let Some(binding) = history {
                binding.detach();
            }
        }))
    }

    fn cancel_speech(&self) {
        if let Some(engine) = &self.speech {
            engine.cancel();
        }
    }

    fn speak(&self, settings: &AccessibilitySettings, text: &str) {
        if let Some(engine) = &self.speech {
            speak_now(engine, settings, text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_without_speech_declines_narration() {
        let host = BrowserFeatureHost::new(None, TimeoutScheduler::default());
        assert!(host.speech().is_none());
        assert!(host.attach_speech(&AccessibilitySettings::default()).is_none());
        host.cancel_speech();
    }
}
