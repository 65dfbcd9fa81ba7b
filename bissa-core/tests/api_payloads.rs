use bissa_core::api::{ApiError, ListingState, Resource, decode_envelope};
use bissa_core::companies::{Company, CompanyProfile, CompanyStatus};
use bissa_core::jobs::{JobCardView, JobFilter, JobVacancy, SALARY_FALLBACK, UNKNOWN_COMPANY};

const JOBS_BODY: &str = r#"{
    "success": true,
    "message": "Data lowongan berhasil diambil",
    "data": [
        {
            "id": 7,
            "job_title": "Customer Service Representative",
            "job_type": "Full-time",
            "description": "Melayani pelanggan melalui chat.",
            "requirements": "Komunikatif\nMampu mengetik cepat",
            "salary_range": null,
            "location": "Surabaya",
            "application_deadline": "2025-06-30",
            "skills": ["Komunikasi", "Excel"],
            "perusahaan_profile": {
                "id": 3,
                "nama_perusahaan": "PT Sinar Inklusi",
                "logo": "logos/sinar.png",
                "status_verifikasi": "terverifikasi"
            },
            "disabilitas": [
                {"id": 1, "kategori_disabilitas": "Ramah untuk tunadaksa", "tingkat_disabilitas": null}
            ]
        },
        {
            "id": 8,
            "job_title": "Penulis Konten",
            "job_type": "Part-time",
            "location": "Remote",
            "application_deadline": "2025-07-15 09:00:00",
            "salary_range": "Rp 3.000.000 - Rp 4.000.000",
            "perusahaan_profile": null,
            "disabilitas": null
        }
    ]
}"#;

const COMPANIES_BODY: &str = r#"{
    "success": true,
    "message": "ok",
    "data": [
        {
            "id": 11,
            "nama_perusahaan": "  ",
            "no_telp": null,
            "status_verifikasi": "ditolak",
            "created_at": "2024-02-05T08:30:00.000000Z",
            "logo_url": "https://cdn.example.com/logo.png",
            "user": {"email": "hr@example.com"}
        }
    ],
    "pagination": {"current_page": 2, "last_page": 4, "per_page": 6, "total": 20}
}"#;

#[test]
fn job_envelope_decodes_nulls_as_empty() {
    let envelope = decode_envelope::<JobVacancy>(JOBS_BODY).expect("jobs envelope");
    let (jobs, pagination) = envelope.into_result().expect("successful envelope");
    assert!(pagination.is_none());
    assert_eq!(jobs.len(), 2);

    let first = &jobs[0];
    assert_eq!(first.title, "Customer Service Representative");
    assert_eq!(first.salary_range, "");
    assert_eq!(first.company_name(), "PT Sinar Inklusi");
    assert_eq!(first.disabilities[0].level, "");

    let second = &jobs[1];
    assert_eq!(second.company_name(), UNKNOWN_COMPANY);
    assert!(second.disabilities.is_empty());
    assert!(second.deadline().is_some());
}

#[test]
fn job_cards_fill_in_fallbacks() {
    let (jobs, _) = decode_envelope::<JobVacancy>(JOBS_BODY)
        .and_then(|e| e.into_result())
        .expect("jobs");

    let card = JobCardView::from_job(&jobs[0], "http://localhost:8000/");
    assert_eq!(card.salary, SALARY_FALLBACK);
    assert_eq!(card.logo, "http://localhost:8000/storage/logos/sinar.png");
    assert_eq!(card.requirements, vec!["Komunikatif", "Mampu mengetik cepat"]);
    assert_eq!(card.accessibility.as_deref(), Some("Ramah untuk tunadaksa"));
    assert_eq!(card.detail_url, "/cari-kerja/detail/7");

    let card = JobCardView::from_job(&jobs[1], "http://localhost:8000");
    assert!(card.logo.starts_with("https://ui-avatars.com/api/?name="));
    assert!(card.accessibility.is_none());
}

#[test]
fn decoded_jobs_feed_the_search_filter() {
    let (jobs, _) = decode_envelope::<JobVacancy>(JOBS_BODY)
        .and_then(|e| e.into_result())
        .expect("jobs");
    let by_company = JobFilter {
        search: "sinar".into(),
        ..JobFilter::default()
    };
    let hits = by_company.apply(&jobs);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 7);

    let newest: Vec<u64> = JobFilter::default().apply(&jobs).iter().map(|j| j.id).collect();
    assert_eq!(newest, vec![8, 7]);
}

#[test]
fn company_envelope_maps_to_partner_cards() {
    let envelope = decode_envelope::<CompanyProfile>(COMPANIES_BODY).expect("companies");
    let (profiles, pagination) = envelope.into_result().expect("successful envelope");
    let pagination = pagination.expect("companies are paginated");
    assert_eq!(pagination.prev_page(), Some(1));
    assert_eq!(pagination.next_page(), Some(3));

    let company = Company::from_profile(&profiles[0]);
    assert_eq!(company.name, "Tidak Diketahui");
    assert_eq!(company.phone, "Tidak tersedia");
    assert_eq!(company.email, "hr@example.com");
    assert_eq!(company.status, CompanyStatus::Inactive);
    assert_eq!(company.created_at.as_deref(), Some("05/02/2024"));
    assert_eq!(company.logo_src("http://localhost:8000"), "https://cdn.example.com/logo.png");
}

#[test]
fn unsuccessful_and_malformed_bodies() {
    let rejected = decode_envelope::<JobVacancy>(r#"{"success": false, "message": "Tidak ada data"}"#)
        .expect("valid envelope")
        .into_result();
    assert_eq!(rejected, Err(ApiError::Rejected("Tidak ada data".into())));
    let state = ListingState::resolve(rejected.map(|(rows, _)| rows), Resource::Jobs);
    assert_eq!(state, ListingState::Empty);

    let broken = decode_envelope::<JobVacancy>("<html>502</html>");
    assert!(matches!(broken, Err(ApiError::Decode(_))));
    let state: ListingState<JobVacancy> =
        ListingState::resolve(Err(ApiError::Status(500)), Resource::Companies);
    assert_eq!(
        state,
        ListingState::Failed("Server sedang mengalami gangguan. Silakan coba lagi nanti.".into())
    );
}
