//! `/cari-kerja`: the full vacancy list with client-side filtering.

use crate::components::job_card::JobCard;
use crate::i18n::{t, tr};
use crate::pages::listing_view;
use bissa_core::api::ListingState;
use bissa_core::jobs::{
    DISABILITY_OPTIONS, JobCardView, JobFilter, JobVacancy, SortOrder, matching_locations,
    unique_job_types, unique_locations,
};
use std::collections::BTreeMap;
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SearchPageProps {
    pub jobs: ListingState<JobVacancy>,
    pub asset_base: AttrValue,
    pub on_retry: Callback<()>,
    /// Starting filter; the page owns it afterwards.
    #[prop_or_default]
    pub initial_filter: JobFilter,
}

fn event_text(e: &Event) -> Option<String> {
    let target = e.target()?;
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    target.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value)
}

/// Callback that rewrites one filter field from an input or select event.
fn edit<E>(filter: &UseStateHandle<JobFilter>, apply: fn(&mut JobFilter, String)) -> Callback<E>
where
    E: AsRef<Event> + 'static,
{
    let filter = filter.clone();
    Callback::from(move |e: E| {
        if let Some(value) = event_text(e.as_ref()) {
            let mut next = (*filter).clone();
            apply(&mut next, value);
            filter.set(next);
        }
    })
}

fn select_options(all_key: &str, selected: &str, values: &[String]) -> Html {
    html! {
        <>
            <option value="" selected={selected.is_empty()}>{ t(all_key) }</option>
            { for values.iter().map(|value| html! {
                <option value={value.clone()} selected={value == selected}>{ value.clone() }</option>
            }) }
        </>
    }
}

#[function_component(SearchPage)]
pub fn search_page(p: &SearchPageProps) -> Html {
    let filter = {
        let initial = p.initial_filter.clone();
        use_state(move || initial)
    };
    let jobs = p.jobs.items();
    let locations = unique_locations(jobs);
    let job_types = unique_job_types(jobs);
    let suggestions = matching_locations(&locations, &filter.location);
    let disabilities: Vec<String> = DISABILITY_OPTIONS.iter().map(ToString::to_string).collect();

    let on_search = edit::<InputEvent>(&filter, |f, v| f.search = v);
    let on_location = edit::<InputEvent>(&filter, |f, v| f.location = v);
    let on_disability = edit::<Event>(&filter, |f, v| f.disability = v);
    let on_job_type = edit::<Event>(&filter, |f, v| f.job_type = v);
    let on_sort = edit::<Event>(&filter, |f, v| f.sort = SortOrder::from_key(&v));
    let on_clear = {
        let filter = filter.clone();
        Callback::from(move |_| filter.set(JobFilter::default()))
    };
    let on_submit = Callback::from(|e: SubmitEvent| e.prevent_default());

    let results = listing_view(&p.jobs, &p.on_retry, |items| {
        let matches = filter.apply(items);
        let count = matches.len().to_string();
        let mut args = BTreeMap::new();
        args.insert("count", count.as_str());
        let summary = html! {
            <p class="result-count" role="status" aria-live="polite">{ tr("search.results", Some(&args)) }</p>
        };
        if matches.is_empty() {
            return html! {
                <>
                    { summary }
                    <div class="empty-state" role="status">
                        <h3>{ t("state.no_match_title") }</h3>
                        <p>{ t("state.no_match_body") }</p>
                        <button type="button" class="btn btn-outline" onclick={on_clear.clone()}>{ t("filter.clear") }</button>
                    </div>
                </>
            };
        }
        html! {
            <>
                { summary }
                <div class="card-grid">
                    { for matches.into_iter().map(|job| {
                        let card = JobCardView::from_job(job, &p.asset_base);
                        html! { <JobCard key={card.id.clone()} job={card.clone()} /> }
                    }) }
                </div>
            </>
        }
    });

    html! {
        <section class="search-page" aria-labelledby="search-title">
            <header class="page-header">
                <h1 id="search-title">{ t("search.title") }</h1>
                <p>{ t("search.subtitle") }</p>
            </header>
            <form class="filter-bar" role="search" aria-label={t("filter.label")} onsubmit={on_submit}>
                <div class="field field-wide">
                    <label for="job-search" class="sr-only">{ t("search.title") }</label>
                    <input id="job-search" type="search" placeholder={t("search.placeholder")}
                        value={filter.search.clone()} oninput={on_search} />
                </div>
                <div class="field">
                    <label for="job-location">{ t("filter.location") }</label>
                    <input id="job-location" type="text" list="job-location-options" autocomplete="off"
                        placeholder={t("filter.location_placeholder")}
                        value={filter.location.clone()} oninput={on_location} />
                    <datalist id="job-location-options">
                        { for suggestions.iter().map(|loc| html! { <option value={loc.clone()} /> }) }
                    </datalist>
                </div>
                <div class="field">
                    <label for="job-disability">{ t("filter.disability") }</label>
                    <select id="job-disability" onchange={on_disability}>
                        { select_options("filter.all_disabilities", &filter.disability, &disabilities) }
                    </select>
                </div>
                <div class="field">
                    <label for="job-type">{ t("filter.job_type") }</label>
                    <select id="job-type" onchange={on_job_type}>
                        { select_options("filter.all_types", &filter.job_type, &job_types) }
                    </select>
                </div>
                <div class="field">
                    <label for="job-sort">{ t("filter.sort") }</label>
                    <select id="job-sort" onchange={on_sort}>
                        { for SortOrder::ALL.iter().map(|order| html! {
                            <option value={order.key()} selected={*order == filter.sort}>
                                { t(&format!("sort.{}", order.key())) }
                            </option>
                        }) }
                    </select>
                </div>
                if filter.has_active_filters() {
                    <button type="button" class="btn btn-outline" onclick={on_clear.clone()}>{ t("filter.clear") }</button>
                }
            </form>
            <div class="search-results">{ results }</div>
        </section>
    }
}
