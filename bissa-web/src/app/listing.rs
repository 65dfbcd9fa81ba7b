use bissa_core::api::{ListingState, Pagination, Resource};
use serde::de::DeserializeOwned;
use std::cell::Cell;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct Listing<T> {
    pub state: ListingState<T>,
    pub pagination: Option<Pagination>,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            state: ListingState::Loading,
            pagination: None,
        }
    }
}

/// Fetch `resource` whenever `page` changes; the callback refetches.
///
/// A response that arrives after the inputs changed again is dropped.
#[hook]
pub fn use_listing<T>(resource: Resource, page: Option<u32>) -> (Listing<T>, Callback<()>)
where
    T: DeserializeOwned + Clone + PartialEq + 'static,
{
    let listing = use_state(Listing::<T>::default);
    let attempt = use_state(|| 0_u32);

    {
        let listing = listing.clone();
        use_effect_with((page, *attempt), move |&(page, _)| {
            let live = Rc::new(Cell::new(true));
            listing.set(Listing {
                state: ListingState::Loading,
                pagination: listing.pagination,
            });
            #[cfg(target_arch = "wasm32")]
            {
                let live = Rc::clone(&live);
                wasm_bindgen_futures::spawn_local(async move {
                    let outcome = crate::api::fetch_listing::<T>(resource, page).await;
                    if !live.get() {
                        return;
                    }
                    let pagination = outcome.as_ref().ok().and_then(|(_, paging)| *paging);
                    listing.set(Listing {
                        state: ListingState::resolve(outcome.map(|(rows, _)| rows), resource),
                        pagination,
                    });
                });
            }
            #[cfg(not(target_arch = "wasm32"))]
            let _ = (page, resource);
            move || live.set(false)
        });
    }

    let retry = {
        let attempt = attempt.clone();
        Callback::from(move |()| attempt.set(attempt.wrapping_add(1)))
    };
    ((*listing).clone(), retry)
}
