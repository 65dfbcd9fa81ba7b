pub mod cari_kerja;
pub mod landing;
pub mod not_found;

use crate::components::empty_state::EmptyState;
use crate::components::skeleton::SkeletonGrid;
use crate::i18n::t;
use bissa_core::api::ListingState;
use yew::prelude::*;

/// Skeletons, rows, empty state or error banner for one listing section.
pub(crate) fn listing_view<T>(
    state: &ListingState<T>,
    on_retry: &Callback<()>,
    rows: impl FnOnce(&[T]) -> Html,
) -> Html {
    match state {
        ListingState::Loading => html! { <SkeletonGrid count={3} /> },
        ListingState::Ready(items) => rows(items),
        ListingState::Empty => html! {
            <EmptyState
                title={t("state.empty_title")}
                message={t("state.empty_body")}
                on_retry={on_retry.clone()}
            />
        },
        ListingState::Failed(message) => html! {
            <EmptyState
                title={t("state.error_title")}
                message={message.clone()}
                error=true
                on_retry={on_retry.clone()}
            />
        },
    }
}
