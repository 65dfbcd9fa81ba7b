#![cfg(target_arch = "wasm32")]

use bissa_core::FeatureHost;
use bissa_web::a11y::{BrowserFeatureHost, TimeoutScheduler};
use bissa_web::app::App;
use bissa_web::dom;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlElement, HtmlSelectElement};
use yew::Renderer;

wasm_bindgen_test_configure!(run_in_browser);

fn ensure_app_root() -> web_sys::Element {
    let doc = dom::document().expect("document");
    if let Some(root) = doc.get_element_by_id("app") {
        root.set_inner_html("");
        return root;
    }
    let root = doc.create_element("div").expect("create app root");
    root.set_id("app");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append app root");
    root
}

fn render_app() {
    bissa_web::i18n::set_lang("id");
    Renderer::<App>::with_root(ensure_app_root()).render();
}

async fn settle() {
    yew::platform::time::sleep(std::time::Duration::from_millis(20)).await;
}

#[wasm_bindgen_test]
async fn skip_link_points_to_main_landmark() {
    render_app();
    settle().await;
    let doc = dom::document().expect("document");
    let skip = doc
        .query_selector("a[href='#main']")
        .expect("query skip link")
        .expect("skip link exists");
    let main = doc.get_element_by_id("main").expect("main landmark exists");
    assert_eq!(main.tag_name(), "MAIN");
    assert_eq!(skip.get_attribute("href").unwrap_or_default(), "#main");
}

#[wasm_bindgen_test]
async fn language_select_updates_html_lang() {
    render_app();
    settle().await;
    let doc = dom::document().expect("document");
    let select: HtmlSelectElement = doc
        .get_element_by_id("lang-select")
        .expect("lang select")
        .dyn_into()
        .expect("cast to select");
    select.set_value("en");
    select
        .dispatch_event(&Event::new("change").expect("change event"))
        .expect("dispatch change");
    let html = doc.document_element().expect("document element");
    assert_eq!(html.get_attribute("lang"), Some("en".into()));

    select.set_value("id");
    select
        .dispatch_event(&Event::new("change").expect("change event"))
        .expect("dispatch change");
    assert_eq!(html.get_attribute("lang"), Some("id".into()));
}

#[wasm_bindgen_test]
async fn overlay_trigger_opens_the_dialog() {
    render_app();
    settle().await;
    let doc = dom::document().expect("document");
    let trigger: HtmlElement = doc
        .query_selector("#accessibility-overlay button[aria-controls='accessibility-panel']")
        .expect("query trigger")
        .expect("trigger exists")
        .dyn_into()
        .expect("cast to element");
    trigger.click();
    settle().await;
    let panel = doc
        .get_element_by_id("accessibility-panel")
        .expect("panel rendered");
    assert_eq!(panel.get_attribute("role").as_deref(), Some("dialog"));
}

#[wasm_bindgen_test]
async fn shell_injects_overlay_stylesheet() {
    render_app();
    settle().await;
    let doc = dom::document().expect("document");
    let styles = doc.query_selector_all("style").expect("query styles");
    let found = (0..styles.length())
        .filter_map(|i| styles.item(i))
        .filter_map(|node| node.text_content())
        .any(|css| css.contains("--accessibility-font-scale") && css.contains(".focus-mode"));
    assert!(found, "overlay rules should be in the document");
}

#[wasm_bindgen_test]
fn reading_guide_is_a_fixed_visible_bar() {
    let host = BrowserFeatureHost::new(None, TimeoutScheduler::default());
    let teardown = host.attach_reading_guide().expect("guide attaches");
    let doc = dom::document().expect("document");
    let guide: HtmlElement = doc
        .get_element_by_id("reading-guide")
        .expect("guide in body")
        .dyn_into()
        .expect("cast to element");
    let style = guide.style();
    assert_eq!(style.get_property_value("position").ok().as_deref(), Some("fixed"));
    assert_eq!(style.get_property_value("height").ok().as_deref(), Some("3px"));
    assert_eq!(style.get_property_value("pointer-events").ok().as_deref(), Some("none"));
    assert_eq!(style.get_property_value("z-index").ok().as_deref(), Some("9999"));

    teardown();
    assert!(doc.get_element_by_id("reading-guide").is_none());
}
