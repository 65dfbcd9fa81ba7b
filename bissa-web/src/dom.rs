use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlElement, Response, Storage, Window};

/// The global `window`, absent outside a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// `<html>`, where the overlay writes its custom properties and filter.
#[must_use]
pub fn root_element() -> Option<HtmlElement> {
    document()
        .and_then(|doc| doc.document_element())
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Browser `localStorage`, absent in private modes that block it.
#[must_use]
pub fn local_storage() -> Option<Storage> {
    window().and_then(|win| win.local_storage().ok().flatten())
}

/// True when the page was opened with `?test=1`.
#[must_use]
pub fn test_mode_enabled() -> bool {
    window()
        .and_then(|win| win.location().search().ok())
        .is_some_and(|search| search.contains("test=1"))
}

/// `GET url` and return the status code with the body text.
///
/// # Errors
/// Returns the JavaScript error when the request cannot be sent or the body
/// cannot be read (offline, CORS, aborted).
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn fetch_text(url: &str) -> Result<(u16, String), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let resp_value = JsFuture::from(win.fetch_with_str(url)).await?;
    let response: Response = resp_value.dyn_into()?;
    let status = response.status();
    let body = JsFuture::from(response.text()?).await?;
    Ok((status, body.as_string().unwrap_or_default()))
}
