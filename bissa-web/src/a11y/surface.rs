use crate::dom;
use bissa_core::effects::PresentationSurface;

/// The `<html>` element of the current document.
///
/// Looked up on every call so a missing document degrades to no-ops.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentSurface;

impl PresentationSurface for DocumentSurface {
    fn set_style_property(&self, name: &str, value: &str) {
        if let Some(root) = dom::root_element()
            && let Err(err) = root.style().set_property(name, value)
        {
            log::warn!("could not set {name}: {}", dom::js_error_message(&err));
        }
    }

    fn remove_style_property(&self, name: &str) {
        if let Some(root) = dom::root_element() {
            let _ = root.style().remove_property(name);
        }
    }

    fn set_filter(&self, filter: &str) {
        self.set_style_property("filter", filter);
    }

    fn clear_filter(&self) {
        self.remove_style_property("filter");
    }

    fn add_root_class(&self, class: &str) {
        if let Some(root) = dom::root_element() {
            let _ = root.class_list().add_1(class);
        }
    }

    fn remove_root_class(&self, class: &str) {
        if let Some(root) = dom::root_element() {
            let _ = root.class_list().remove_1(class);
        }
    }

    fn remove_element(&self, id: &str) {
        if let Some(node) = dom::document().and_then(|doc| doc.get_element_by_id(id)) {
            node.remove();
        }
    }
}
