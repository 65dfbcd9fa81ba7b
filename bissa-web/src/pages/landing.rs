use crate::a11y::TimeoutScheduler;
use crate::components::company_card::CompanyCard;
use crate::components::job_card::JobCard;
use crate::components::nav_link::NavLink;
use crate::components::pagination::PaginationBar;
use crate::i18n::{t, tr};
use crate::pages::listing_view;
use crate::router::Route;
use bissa_core::api::{ListingState, Pagination};
use bissa_core::companies::Company;
use bissa_core::jobs::{JobCardView, JobVacancy};
use bissa_core::landing::{
    HERO_STATS, METHODOLOGY, SERVICES, TESTIMONIAL_ROTATE_MS, Testimonial, TestimonialCarousel,
    curated_jobs, testimonials,
};
use bissa_core::lifecycle::Scheduler;
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LandingPageProps {
    pub jobs: ListingState<JobVacancy>,
    pub companies: ListingState<Company>,
    #[prop_or_default]
    pub company_pagination: Option<Pagination>,
    pub asset_base: AttrValue,
    pub on_company_page: Callback<u32>,
    pub on_retry_jobs: Callback<()>,
    pub on_retry_companies: Callback<()>,
    /// Stops the testimonial auto-advance.
    #[prop_or_default]
    pub reduce_motion: bool,
}

fn hero() -> Html {
    html! {
        <section class="hero" aria-labelledby="hero-title">
            <h1 id="hero-title">{ t("hero.title") }</h1>
            <p class="hero-subtitle">{ t("hero.subtitle") }</p>
            <NavLink to={Route::CariKerja} class="btn btn-primary btn-lg">{ t("hero.cta") }</NavLink>
            <ul class="hero-stats" aria-label={t("hero.stats")}>
                { for HERO_STATS.iter().map(|(value, caption)| html! {
                    <li><strong>{ *value }</strong><span>{ *caption }</span></li>
                }) }
            </ul>
            <img class="hero-illustration" src={crate::paths::asset_path("img/hero.webp")} alt="" aria-hidden="true" />
        </section>
    }
}

fn methodology() -> Html {
    html! {
        <section class="methodology" aria-labelledby="methodology-title">
            <h2 id="methodology-title">{ t("landing.methodology_title") }</h2>
            <ol class="steps">
                { for METHODOLOGY.iter().map(|step| html! {
                    <li class="step">
                        <span class="step-number" aria-hidden="true">{ step.step }</span>
                        <h3>{ step.title }</h3>
                        <p>{ step.description }</p>
                    </li>
                }) }
            </ol>
        </section>
    }
}

fn services() -> Html {
    html! {
        <section class="services" aria-labelledby="services-title">
            <h2 id="services-title">{ t("landing.services_title") }</h2>
            <div class="card-grid">
                { for SERVICES.iter().map(|service| html! {
                    <article class="card service-card">
                        <span class="badge">{ service.category }</span>
                        <h3>{ service.title }</h3>
                        <p>{ service.description }</p>
                    </article>
                }) }
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct CarouselProps {
    pub items: Vec<Testimonial>,
    #[prop_or_default]
    pub paused: bool,
}

#[function_component(TestimonialSlider)]
pub fn testimonial_slider(p: &CarouselProps) -> Html {
    let carousel = use_state(|| TestimonialCarousel::new(p.items.len()));

    {
        let carousel = carousel.clone();
        use_effect_with((carousel.index(), p.paused), move |(_, paused)| {
            let pending = (cfg!(target_arch = "wasm32") && !*paused).then(|| {
                let scheduler = TimeoutScheduler::default();
                let advance = carousel.clone();
                let id = scheduler.schedule(
                    TESTIMONIAL_ROTATE_MS,
                    Box::new(move || advance.set(advance.next())),
                );
                (scheduler, id)
            });
            move || {
                if let Some((scheduler, id)) = pending {
                    scheduler.cancel(id);
                }
            }
        });
    }

    let Some(current) = carousel.current(&p.items) else {
        return html! {};
    };
    let step = |forward: bool| {
        let carousel = carousel.clone();
        Callback::from(move |_| {
            carousel.set(if forward { carousel.next() } else { carousel.prev() });
        })
    };
    let position = (carousel.index() + 1).to_string();
    let total = p.items.len().to_string();
    let mut args = BTreeMap::new();
    args.insert("current", position.as_str());
    args.insert("total", total.as_str());

    html! {
        <div class="carousel" aria-roledescription="carousel">
            <figure class="testimonial" aria-live={if p.paused { "polite" } else { "off" }}>
                <blockquote>{ current.content.clone() }</blockquote>
                <figcaption>
                    <span class="avatar" aria-hidden="true">{ current.avatar.clone() }</span>
                    <strong>{ current.name.clone() }</strong>
                    <span>{ format!("{}, {}", current.role, current.company) }</span>
                </figcaption>
            </figure>
            <div class="carousel-controls">
                <button type="button" aria-label={t("carousel.prev")} onclick={step(false)}>{ "‹" }</button>
                <span class="sr-only">{ tr("landing.testimonial_position", Some(&args)) }</span>
                <button type="button" aria-label={t("carousel.next")} onclick={step(true)}>{ "›" }</button>
            </div>
        </div>
    }
}

#[function_component(LandingPage)]
pub fn landing_page(p: &LandingPageProps) -> Html {
    let stories = use_memo((), |_| testimonials());

    let jobs = listing_view(&p.jobs, &p.on_retry_jobs, |items| {
        html! {
            <div class="card-grid">
                { for curated_jobs(items).iter().map(|job| {
                    let card = JobCardView::from_job(job, &p.asset_base);
                    html! { <JobCard key={card.id.clone()} job={card.clone()} /> }
                }) }
            </div>
        }
    });

    let companies = listing_view(&p.companies, &p.on_retry_companies, |items| {
        html! {
            <div class="card-grid">
                { for items.iter().map(|company| html! {
                    <CompanyCard key={company.id.to_string()} company={company.clone()} asset_base={p.asset_base.clone()} />
                }) }
            </div>
        }
    });
    let pager = p
        .company_pagination
        .filter(|_| !p.companies.is_loading())
        .map(|pagination| html! { <PaginationBar pagination={pagination} on_page={p.on_company_page.clone()} /> });

    html! {
        <>
            { hero() }
            { methodology() }
            { services() }
            <section class="curated-jobs" aria-labelledby="jobs-title">
                <h2 id="jobs-title">{ t("landing.jobs_title") }</h2>
                { jobs }
                <NavLink to={Route::CariKerja} class="btn btn-outline">{ t("landing.jobs_all") }</NavLink>
            </section>
            <section class="partners" aria-labelledby="partners-title">
                <h2 id="partners-title">{ t("landing.partners_title") }</h2>
                { companies }
                { pager.unwrap_or_default() }
            </section>
            <section class="testimonials" aria-labelledby="testimonials-title">
                <h2 id="testimonials-title">{ t("landing.testimonials_title") }</h2>
                <TestimonialSlider items={(*stories).clone()} paused={p.reduce_motion} />
            </section>
        </>
    }
}
