#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod a11y;
pub mod api;
pub mod app;
pub mod components;
pub mod dom;
pub mod i18n;
pub mod logger;
pub mod pages;
pub mod paths;
pub mod router;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let search = crate::dom::window()
        .and_then(|win| win.location().search().ok())
        .unwrap_or_default();
    crate::logger::init(crate::logger::level_for_search(&search));
    // <html lang> follows the saved locale before the first render
    crate::i18n::set_lang(&crate::i18n::current_lang());
    yew::Renderer::<app::App>::new().render();
}
