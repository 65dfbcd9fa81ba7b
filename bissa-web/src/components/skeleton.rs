use crate::i18n::t;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or(3)]
    pub count: usize,
}

/// Placeholder cards shown while a listing loads.
#[function_component(SkeletonGrid)]
pub fn skeleton_grid(p: &Props) -> Html {
    html! {
        <div class="card-grid skeleton-grid" role="status" aria-busy="true">
            <span class="sr-only">{ t("state.loading") }</span>
            { for (0..p.count).map(|i| html! {
                <div key={i} class="card skeleton-card" aria-hidden="true">
                    <div class="skeleton-line skeleton-title"></div>
                    <div class="skeleton-line"></div>
                    <div class="skeleton-line skeleton-short"></div>
                </div>
            }) }
        </div>
    }
}
