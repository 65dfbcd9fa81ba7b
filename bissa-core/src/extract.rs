//! Speakable text for an arbitrary page element.

use crate::constants::{
    DESCENDANT_TEXT_COUNT, DESCENDANT_TEXT_LIMIT, FALLBACK_BUTTON, FALLBACK_IMAGE, FALLBACK_LINK,
    INPUT_PREFIX, SELECT_NONE, SELECT_PREFIX, SPEECH_TEXT_LIMIT,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Elements searched, in document order, when a container has no text of its own.
pub const TEXT_CONTAINER_SELECTOR: &str = "h1, h2, h3, h4, h5, h6, p, span, div, td, th, li";

/// Read-only view of a DOM element.
pub trait ElementView: Clone {
    /// Upper-case tag name (`"IMG"`, `"BUTTON"`).
    fn tag_name(&self) -> String;
    fn attribute(&self, name: &str) -> Option<String>;
    /// Full `textContent`.
    fn text_content(&self) -> String;
    /// Text node children, in order.
    fn direct_text(&self) -> Vec<String>;
    /// `textContent` of descendants matching `selector`, in document order.
    fn descendant_texts(&self, selector: &str) -> Vec<String>;
    /// Text of the `<label for=…>` pointing at this element.
    fn label_text(&self) -> Option<String>;
    /// Text of the selected `<option>` of a `<select>`.
    fn selected_option_text(&self) -> Option<String>;
    /// True for the overlay panel and everything inside it.
    fn inside_overlay(&self) -> bool;
    fn same_node(&self, other: &Self) -> bool;
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `<body>`, `<html>` and the overlay panel are never narrated.
pub fn is_excluded<V: ElementView>(element: &V) -> bool {
    let tag = element.tag_name();
    tag.eq_ignore_ascii_case("BODY") || tag.eq_ignore_ascii_case("HTML") || element.inside_overlay()
}

/// Text to narrate for `element`, or `None` when there is nothing to say.
///
/// `aria-label` wins; then per-element rules for images, inputs, buttons,
/// links and selects; then the element's own text, falling back to its
/// first few short text descendants. The result is capped at 200 characters.
pub fn speakable_text<V: ElementView>(element: &V) -> Option<String> {
    let text = non_empty(element.attribute("aria-label")).or_else(|| by_element(element))?;
    let capped: String = text.trim().chars().take(SPEECH_TEXT_LIMIT).collect();
    let capped = capped.trim_end().to_string();
    (!capped.is_empty()).then_some(capped)
}

fn by_element<V: ElementView>(element: &V) -> Option<String> {
    let tag = element.tag_name().to_ascii_uppercase();
    let text = || non_empty(Some(element.text_content()));
    let attr = |name: &str| non_empty(element.attribute(name));

    match tag.as_str() {
        "IMG" => Some(
            attr("alt")
                .or_else(|| attr("title"))
                .unwrap_or_else(|| FALLBACK_IMAGE.to_string()),
        ),
        "INPUT" => Some(
            non_empty(element.label_text())
                .or_else(|| attr("placeholder"))
                .unwrap_or_else(|| {
                    let kind = attr("type").unwrap_or_else(|| "text".to_string());
                    format!("{INPUT_PREFIX} {kind}")
                }),
        ),
        "BUTTON" => Some(
            text()
                .or_else(|| attr("title"))
                .unwrap_or_else(|| FALLBACK_BUTTON.to_string()),
        ),
        "A" => Some(
            text()
                .or_else(|| attr("title"))
                .unwrap_or_else(|| FALLBACK_LINK.to_string()),
        ),
        "SELECT" => {
            let choice = non_empty(element.selected_option_text())
                .unwrap_or_else(|| SELECT_NONE.to_string());
            Some(format!("{SELECT_PREFIX}: {choice}"))
        }
        _ => generic_text(element),
    }
}

fn generic_text<V: ElementView>(element: &V) -> Option<String> {
    let own: Vec<String> = element
        .direct_text()
        .into_iter()
        .filter_map(|t| non_empty(Some(t)))
        .collect();
    if !own.is_empty() {
        return Some(own.join(" "));
    }

    let nested: Vec<String> = element
        .descendant_texts(TEXT_CONTAINER_SELECTOR)
        .into_iter()
        .take(DESCENDANT_TEXT_COUNT)
        .filter_map(|t| non_empty(Some(t)))
        .filter(|t| t.chars().count() < DESCENDANT_TEXT_LIMIT)
        .map(|t| format!("{t}."))
        .collect();
    non_empty(Some(nested.join(" ")))
}

static NEXT_SNAPSHOT_ID: AtomicU64 = AtomicU64::new(1);

/// Detached element tree used by headless hosts and tests.
///
/// Clones share identity: `same_node` compares the id assigned at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSnapshot {
    id: u64,
    tag: String,
    attributes: BTreeMap<String, String>,
    direct_text: Vec<String>,
    children: Vec<ElementSnapshot>,
    label: Option<String>,
    selected: Option<String>,
    in_overlay: bool,
}

impl ElementSnapshot {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            id: NEXT_SNAPSHOT_ID.fetch_add(1, Ordering::Relaxed),
            tag: tag.into().to_ascii_uppercase(),
            attributes: BTreeMap::new(),
            direct_text: Vec::new(),
            children: Vec::new(),
            label: None,
            selected: None,
            in_overlay: false,
        }
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Append a text node child.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.direct_text.push(text.into());
        self
    }

    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn selected(mut self, option: impl Into<String>) -> Self {
        self.selected = Some(option.into());
        self
    }

    /// Mark this element (and its children) as part of the overlay panel.
    #[must_use]
    pub fn in_overlay(mut self) -> Self {
        self.mark_overlay();
        self
    }

    fn mark_overlay(&mut self) {
        self.in_overlay = true;
        for child in &mut self.children {
            child.mark_overlay();
        }
    }

    fn collect_matching(&self, tags: &[String], out: &mut Vec<String>) {
        for child in &self.children {
            if tags.iter().any(|t| t == &child.tag) {
                out.push(child.text_content());
            }
            child.collect_matching(tags, out);
        }
    }
}

impl ElementView for ElementSnapshot {
    fn tag_name(&self) -> String {
        self.tag.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }

    fn text_content(&self) -> String {
        let mut text = self.direct_text.concat();
        for child in &self.children {
            text.push_str(&child.text_content());
        }
        text
    }

    fn direct_text(&self) -> Vec<String> {
        self.direct_text.clone()
    }

    fn descendant_texts(&self, selector: &str) -> Vec<String> {
        let tags: Vec<String> = selector
            .split(',')
            .map(|t| t.trim().to_ascii_uppercase())
            .filter(|t| !t.is_empty())
            .collect();
        let mut out = Vec::new();
        self.collect_matching(&tags, &mut out);
        out
    }

    fn label_text(&self) -> Option<String> {
        self.label.clone()
    }

    fn selected_option_text(&self) -> Option<String> {
        self.selected.clone()
    }

    fn inside_overlay(&self) -> bool {
        self.in_overlay
    }

    fn same_node(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speak(el: &ElementSnapshot) -> Option<String> {
        speakable_text(el)
    }

    #[test]
    fn images_use_alt_then_title_then_fallback() {
        assert_eq!(speak(&ElementSnapshot::new("img").attr("alt", "Logo")).as_deref(), Some("Logo"));
        assert_eq!(
            speak(&ElementSnapshot::new("img").attr("title", "Foto tim")).as_deref(),
            Some("Foto tim")
        );
        assert_eq!(speak(&ElementSnapshot::new("img")).as_deref(), Some("Gambar"));
    }

    #[test]
    fn aria_label_beats_element_rules() {
        let button = ElementSnapshot::new("button").attr("aria-label", "Tutup");
        assert_eq!(speak(&button).as_deref(), Some("Tutup"));
        let labelled = ElementSnapshot::new("a").attr("aria-label", "Beranda").text("Home");
        assert_eq!(speak(&labelled).as_deref(), Some("Beranda"));
    }

    #[test]
    fn buttons_and_links_fall_back() {
        assert_eq!(speak(&ElementSnapshot::new("button")).as_deref(), Some("Tombol"));
        assert_eq!(
            speak(&ElementSnapshot::new("button").attr("title", "Kirim")).as_deref(),
            Some("Kirim")
        );
        assert_eq!(speak(&ElementSnapshot::new("a")).as_deref(), Some("Link"));
        let nested = ElementSnapshot::new("a").child(ElementSnapshot::new("span").text(" Daftar "));
        assert_eq!(speak(&nested).as_deref(), Some("Daftar"));
    }

    #[test]
    fn inputs_prefer_label_then_placeholder_then_type() {
        let labelled = ElementSnapshot::new("input").label("Email").attr("placeholder", "x");
        assert_eq!(speak(&labelled).as_deref(), Some("Email"));
        let placeholder = ElementSnapshot::new("input").attr("placeholder", "Cari pekerjaan");
        assert_eq!(speak(&placeholder).as_deref(), Some("Cari pekerjaan"));
        let bare = ElementSnapshot::new("input").attr("type", "search");
        assert_eq!(speak(&bare).as_deref(), Some("Input search"));
        assert_eq!(speak(&ElementSnapshot::new("input")).as_deref(), Some("Input text"));
    }

    #[test]
    fn selects_announce_the_choice() {
        let chosen = ElementSnapshot::new("select").selected("Jakarta");
        assert_eq!(speak(&chosen).as_deref(), Some("Pilihan: Jakarta"));
        assert_eq!(
            speak(&ElementSnapshot::new("select")).as_deref(),
            Some("Pilihan: Tidak ada pilihan")
        );
    }

    #[test]
    fn generic_elements_prefer_direct_text() {
        let div = ElementSnapshot::new("div")
            .text(" Lowongan ")
            .child(ElementSnapshot::new("span").text("ignored"))
            .text("Terbaru");
        assert_eq!(speak(&div).as_deref(), Some("Lowongan Terbaru"));
    }

    #[test]
    fn containers_read_first_three_short_descendants() {
        let long = "x".repeat(120);
        let card = ElementSnapshot::new("article")
            .child(ElementSnapshot::new("h3").text("Frontend Developer"))
            .child(ElementSnapshot::new("p").text(long))
            .child(ElementSnapshot::new("span").text("Jakarta"))
            .child(ElementSnapshot::new("li").text("never reached"));
        assert_eq!(speak(&card).as_deref(), Some("Frontend Developer. Jakarta."));
    }

    #[test]
    fn empty_containers_say_nothing() {
        assert_eq!(speak(&ElementSnapshot::new("section")), None);
        let blank = ElementSnapshot::new("div").text("   ").child(ElementSnapshot::new("p"));
        assert_eq!(speak(&blank), None);
    }

    #[test]
    fn output_is_capped_at_two_hundred_characters() {
        let paragraph = ElementSnapshot::new("p").text("kata ".repeat(80));
        let text = speak(&paragraph).unwrap_or_default();
        assert!(text.chars().count() <= 200);
        assert!(text.starts_with("kata kata"));
    }

    #[test]
    fn exclusion_covers_document_and_overlay() {
        assert!(is_excluded(&ElementSnapshot::new("html")));
        assert!(is_excluded(&ElementSnapshot::new("body")));
        let panel = ElementSnapshot::new("div").child(ElementSnapshot::new("button")).in_overlay();
        assert!(is_excluded(&panel));
        assert!(!is_excluded(&ElementSnapshot::new("main")));
    }

    #[test]
    fn clones_are_the_same_node() {
        let a = ElementSnapshot::new("p");
        let b = ElementSnapshot::new("p");
        assert!(a.same_node(&a.clone()));
        assert!(!a.same_node(&b));
    }
}
