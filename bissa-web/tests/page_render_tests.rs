use bissa_core::api::{ListingState, Pagination};
use bissa_core::companies::{Company, CompanyProfile};
use bissa_core::jobs::{Disability, JobFilter, JobVacancy, SortOrder};
use bissa_web::pages::{
    cari_kerja::{SearchPage, SearchPageProps},
    landing::{LandingPage, LandingPageProps},
    not_found::{NotFound, Props as NotFoundProps},
};
use futures::executor::block_on;
use yew::{AttrValue, BaseComponent, Callback, LocalServerRenderer};

fn job(id: u64, title: &str, location: &str, category: &str) -> JobVacancy {
    JobVacancy {
        id,
        title: title.into(),
        location: location.into(),
        job_type: "Full-time".into(),
        salary_range: "Rp 5.000.000 - Rp 7.000.000".into(),
        application_deadline: format!("2025-0{id}-10"),
        disabilities: vec![Disability {
            id,
            category: category.into(),
            level: "ringan".into(),
        }],
        ..JobVacancy::default()
    }
}

fn jobs() -> Vec<JobVacancy> {
    vec![
        job(1, "UI Designer", "Jakarta", "Ramah untuk tunarungu"),
        job(2, "Backend Developer", "Bandung", "Ramah untuk tunadaksa"),
        job(3, "Data Analyst", "Jakarta Selatan", "Ramah untuk tunanetra"),
    ]
}

fn render<C: BaseComponent>(props: C::Properties) -> String {
    block_on(LocalServerRenderer::<C>::with_props(props).render())
}

fn landing_props(
    jobs: ListingState<JobVacancy>,
    companies: ListingState<Company>,
    company_pagination: Option<Pagination>,
) -> LandingPageProps {
    LandingPageProps {
        jobs,
        companies,
        company_pagination,
        asset_base: AttrValue::from("http://localhost:8000"),
        on_company_page: Callback::noop(),
        on_retry_jobs: Callback::noop(),
        on_retry_companies: Callback::noop(),
        reduce_motion: false,
    }
}

fn search_props(jobs: ListingState<JobVacancy>, filter: JobFilter) -> SearchPageProps {
    SearchPageProps {
        jobs,
        asset_base: AttrValue::from("http://localhost:8000"),
        on_retry: Callback::noop(),
        initial_filter: filter,
    }
}

#[test]
fn landing_page_renders_static_sections_and_listings() {
    bissa_web::i18n::set_lang("id");
    let company = Company::from_profile(&CompanyProfile {
        id: 4,
        name: "Tech Innovate".into(),
        verification_status: "terverifikasi".into(),
        ..CompanyProfile::default()
    });
    let props = landing_props(
        ListingState::Ready(jobs()),
        ListingState::Ready(vec![company]),
        Some(Pagination {
            current_page: 1,
            last_page: 3,
            per_page: 6,
            total: 14,
        }),
    );
    let html = render::<LandingPage>(props);
    assert!(html.contains("Registrasi &amp; Orientasi") || html.contains("Registrasi & Orientasi"));
    assert!(html.contains("Penyandang Disabilitas"));
    assert!(html.contains("UI Designer"));
    assert!(html.contains("Backend Developer"));
    assert!(html.contains("Tech Innovate"));
    assert!(html.contains("Halaman 1 dari 3"));
    assert!(html.contains("Rina Kartika"));
}

#[test]
fn landing_page_shows_skeletons_and_errors_per_section() {
    bissa_web::i18n::set_lang("id");
    let props = landing_props(
        ListingState::Loading,
        ListingState::Failed("Server sedang mengalami gangguan. Silakan coba lagi nanti.".into()),
        Some(Pagination::default()),
    );
    let html = render::<LandingPage>(props);
    assert!(html.contains("skeleton"));
    assert!(html.contains("Server sedang mengalami gangguan."));
    assert!(html.contains("Muat Ulang"));
    assert!(!html.contains("class=\"pagination\""));
}

#[test]
fn search_page_lists_every_job_without_filters() {
    bissa_web::i18n::set_lang("id");
    let html = render::<SearchPage>(search_props(
        ListingState::Ready(jobs()),
        JobFilter::default(),
    ));
    assert!(html.contains("3 lowongan ditemukan"));
    assert!(html.contains("Data Analyst"));
    assert!(html.contains("job-location-options"));
}

#[test]
fn search_page_applies_the_initial_filter() {
    bissa_web::i18n::set_lang("id");
    let filter = JobFilter {
        location: "jakarta".into(),
        sort: SortOrder::Oldest,
        ..JobFilter::default()
    };
    let html = render::<SearchPage>(search_props(
        ListingState::Ready(jobs()),
        filter,
    ));
    assert!(html.contains("2 lowongan ditemukan"));
    assert!(!html.contains("Backend Developer"));
    let first = html.find("UI Designer");
    let second = html.find("Data Analyst");
    assert!(first.is_some() && second.is_some());
    assert!(first < second);
}

#[test]
fn search_page_reports_no_match() {
    bissa_web::i18n::set_lang("id");
    let filter = JobFilter {
        search: "astronaut".into(),
        ..JobFilter::default()
    };
    let html = render::<SearchPage>(search_props(
        ListingState::Ready(jobs()),
        filter,
    ));
    assert!(html.contains("0 lowongan ditemukan"));
    assert!(html.contains("Tidak ada lowongan yang cocok"));
}

#[test]
fn search_page_empty_listing_uses_empty_state() {
    bissa_web::i18n::set_lang("id");
    let html = render::<SearchPage>(search_props(
        ListingState::Empty,
        JobFilter::default(),
    ));
    assert!(html.contains("Belum ada data"));
}

#[test]
fn not_found_page_offers_a_way_home() {
    bissa_web::i18n::set_lang("en");
    let html = render::<NotFound>(NotFoundProps {
        on_go_home: Callback::noop(),
    });
    assert!(html.contains("not-found"));
    assert!(html.contains("<button"));
    bissa_web::i18n::set_lang("id");
}
