use crate::i18n::{t, tr};
use bissa_core::api::Pagination;
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub pagination: Pagination,
    pub on_page: Callback<u32>,
}

#[function_component(PaginationBar)]
pub fn pagination_bar(p: &Props) -> Html {
    let page = p.pagination;
    if page.last_page <= 1 {
        return html! {};
    }
    let go = |target: Option<u32>| {
        let cb = p.on_page.clone();
        Callback::from(move |_| {
            if let Some(n) = target {
                cb.emit(n);
            }
        })
    };
    let current = page.current_page.to_string();
    let last = page.last_page.to_string();
    let mut args = BTreeMap::new();
    args.insert("current", current.as_str());
    args.insert("last", last.as_str());
    html! {
        <nav class="pagination" aria-label={t("pagination.label")}>
            <button type="button" disabled={!page.has_prev()} onclick={go(page.prev_page())}>
                { t("pagination.prev") }
            </button>
            <span aria-live="polite">{ tr("pagination.page", Some(&args)) }</span>
            <button type="button" disabled={!page.has_next()} onclick={go(page.next_page())}>
                { t("pagination.next") }
            </button>
        </nav>
    }
}
