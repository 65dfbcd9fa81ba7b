use crate::components::nav_link::NavLink;
use crate::i18n::{locales, set_lang, t};
use crate::router::Route;
use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub current: Route,
    pub current_lang: String,
    pub on_lang_change: Callback<String>,
    /// Hidden when the visitor switched skip links off in the overlay.
    #[prop_or(true)]
    pub skip_link: bool,
}

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let on_change = {
        let cb = p.on_lang_change.clone();
        Callback::from(move |e: web_sys::Event| {
            if let Some(sel) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
            {
                set_lang(&sel.value());
                cb.emit(sel.value());
            }
        })
    };
    let nav_item = |route: Route, key: &str| {
        let current = p.current == route;
        html! {
            <li>
                <NavLink to={route} current={current} class={classes!("nav-link", current.then_some("active"))}>
                    { t(key) }
                </NavLink>
            </li>
        }
    };
    html! {
        <header role="banner" class="site-header">
            if p.skip_link {
                <a href="#main" class="sr-only skip-link">{ t("nav.skip") }</a>
            }
            <div class="header-content">
                <NavLink to={Route::Home} class="brand">
                    <span class="brand-name">{ t("app.name") }</span>
                </NavLink>
                <nav aria-label={t("nav.main")} class="header-nav">
                    <ul>
                        { nav_item(Route::Home, "nav.home") }
                        { nav_item(Route::CariKerja, "nav.search") }
                    </ul>
                </nav>
                <div class="header-right">
                    <label for="lang-select" class="sr-only">{ t("nav.language") }</label>
                    <select id="lang-select" onchange={on_change} aria-label={t("nav.language")}>
                        { for locales().iter().map(|meta| html! {
                            <option value={meta.code} selected={meta.code == p.current_lang}>{ meta.name }</option>
                        }) }
                    </select>
                </div>
            </div>
        </header>
    }
}
