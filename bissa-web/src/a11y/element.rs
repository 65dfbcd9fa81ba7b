use crate::dom;
use bissa_core::constants::OVERLAY_PANEL_ID;
use bissa_core::extract::ElementView;
use wasm_bindgen::JsCast;
use web_sys::{Element, Node};

/// A live DOM element seen through [`ElementView`].
#[derive(Clone, Debug)]
pub struct DomElement(pub Element);

impl DomElement {
    /// The element an event was dispatched to, if it is an element.
    #[must_use]
    pub fn from_event(event: &web_sys::Event) -> Option<Self> {
        event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .map(Self)
    }
}

impl ElementView for DomElement {
    fn tag_name(&self) -> String {
        self.0.tag_name().to_ascii_uppercase()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn text_content(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn direct_text(&self) -> Vec<String> {
        let children = self.0.child_nodes();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .filter(|node| node.node_type() == Node::TEXT_NODE)
            .filter_map(|node| node.text_content())
            .collect()
    }

    fn descendant_texts(&self, selector: &str) -> Vec<String> {
        let Ok(found) = self.0.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..found.length())
            .filter_map(|i| found.item(i))
            .filter_map(|node| node.text_content())
            .collect()
    }

    fn label_text(&self) -> Option<String> {
        let id = self.0.id();
        if id.is_empty() {
            return None;
        }
        dom::document()?
            .query_selector(&format!("label[for=\"{id}\"]"))
            .ok()
            .flatten()
            .and_then(|label| label.text_content())
    }

    fn selected_option_text(&self) -> Option<String> {
        self.0
            .query_selector("option:checked")
            .ok()
            .flatten()
            .and_then(|option| option.text_content())
    }

    fn inside_overlay(&self) -> bool {
        self.0
            .closest(&format!("#{OVERLAY_PANEL_ID}"))
            .ok()
            .flatten()
            .is_some()
    }

    fn same_node(&self, other: &Self) -> bool {
        self.0.is_same_node(Some(&other.0))
    }
}
