use crate::components::accessibility_panel::AccessibilityPanel;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::i18n::{current_lang, t};
use crate::pages::cari_kerja::SearchPage;
use crate::pages::landing::LandingPage;
use crate::pages::not_found::NotFound;
use crate::router::Route;
use bissa_core::api::Resource;
use bissa_core::companies::{Company, CompanyProfile};
use bissa_core::jobs::{JobFilter, JobVacancy};
use yew::prelude::*;
use yew_router::prelude::*;

pub mod listing;
pub mod overlay;
pub mod test_bridge;

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::paths::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <AppInner />
        </BrowserRouter>
    }
}

#[cfg(target_arch = "wasm32")]
#[function_component(AppInner)]
pub fn app_inner() -> Html {
    let route = use_route::<Route>().unwrap_or(Route::NotFound);
    html! { <Shell route={route} /> }
}

#[derive(Properties, PartialEq, Clone)]
pub struct ShellProps {
    pub route: Route,
}

/// Header, routed page, footer and the accessibility overlay.
#[function_component(Shell)]
pub fn shell(p: &ShellProps) -> Html {
    let controls = overlay::use_overlay();
    test_bridge::use_test_bridge(&controls);

    let lang = use_state(current_lang);
    let panel_open = use_state(|| false);

    {
        let route = p.route.clone();
        use_effect_with((route, (*lang).clone()), |(route, _)| {
            if let Some(doc) = crate::dom::document() {
                let page = t(route.title_key());
                let brand = t("app.name");
                if page == brand {
                    doc.set_title(&brand);
                } else {
                    doc.set_title(&format!("{page} | {brand}"));
                }
            }
        });
    }

    let on_lang_change = {
        let lang = lang.clone();
        Callback::from(move |code: String| lang.set(code))
    };
    let on_open_change = {
        let panel_open = panel_open.clone();
        Callback::from(move |open: bool| panel_open.set(open))
    };

    let settings = &controls.settings;
    let skip_link = !(settings.enabled && !settings.skip_links);
    let main_class = classes!(
        "site-main",
        (settings.enabled && settings.simplify_content).then_some("simplified"),
        (settings.enabled && settings.keyboard_navigation).then_some("keyboard-nav"),
    );
    let reduce_motion = settings.enabled && settings.pause_animations;

    let content = match p.route {
        Route::Home => html! { <HomeRoute reduce_motion={reduce_motion} /> },
        Route::CariKerja => html! { <SearchRoute /> },
        Route::NotFound => html! { <NotFoundRoute /> },
    };

    html! {
        <>
            <style>{ crate::a11y::overlay_css() }</style>
            <Header
                current={p.route.clone()}
                current_lang={(*lang).clone()}
                on_lang_change={on_lang_change}
                skip_link={skip_link}
            />
            <main id="main" role="main" tabindex="-1" class={main_class}>
                { content }
            </main>
            <Footer />
            <AccessibilityPanel
                open={*panel_open}
                settings={controls.settings.clone()}
                voices={controls.voices.clone()}
                on_open_change={on_open_change}
                on_change={controls.on_change.clone()}
                on_reset={controls.on_reset.clone()}
                on_speak={controls.on_speak.clone()}
            />
        </>
    }
}

#[derive(Properties, PartialEq, Clone)]
struct HomeRouteProps {
    reduce_motion: bool,
}

#[function_component(HomeRoute)]
fn home_route(p: &HomeRouteProps) -> Html {
    let company_page = use_state(|| 1_u32);
    let (jobs, retry_jobs) = listing::use_listing::<JobVacancy>(Resource::Jobs, None);
    let (profiles, retry_companies) =
        listing::use_listing::<CompanyProfile>(Resource::Companies, Some(*company_page));
    let asset_base = use_memo((), |_| AttrValue::from(crate::paths::asset_base()));

    let on_company_page = {
        let company_page = company_page.clone();
        Callback::from(move |page: u32| company_page.set(page.max(1)))
    };
    let companies = profiles.state.map(|profile| Company::from_profile(&profile));

    html! {
        <LandingPage
            jobs={jobs.state}
            companies={companies}
            company_pagination={profiles.pagination}
            asset_base={(*asset_base).clone()}
            on_company_page={on_company_page}
            on_retry_jobs={retry_jobs}
            on_retry_companies={retry_companies}
            reduce_motion={p.reduce_motion}
        />
    }
}

#[function_component(SearchRoute)]
fn search_route() -> Html {
    let (jobs, retry) = listing::use_listing::<JobVacancy>(Resource::Jobs, None);
    let asset_base = use_memo((), |_| AttrValue::from(crate::paths::asset_base()));
    html! {
        <SearchPage
            jobs={jobs.state}
            asset_base={(*asset_base).clone()}
            on_retry={retry}
            initial_filter={JobFilter::default()}
        />
    }
}

#[function_component(NotFoundRoute)]
fn not_found_route() -> Html {
    let navigator = use_navigator();
    let on_go_home = Callback::from(move |()| {
        if let Some(nav) = navigator.as_ref() {
            nav.push(&Route::Home);
        }
    });
    html! { <NotFound on_go_home={on_go_home} /> }
}
