//! Job vacancies: wire model, search filters, sorting, and the card projection.

use crate::api::nullable;
use crate::companies::{CompanyProfile, logo_url};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Fixed options of the disability filter.
pub const DISABILITY_OPTIONS: [&str; 6] = [
    "Ramah untuk tunanetra",
    "Ramah untuk tunarungu",
    "Ramah untuk tunadaksa",
    "Ramah untuk disabilitas intelektual",
    "Ramah untuk disabilitas mental",
    "Ramah untuk semua disabilitas",
];

pub const UNKNOWN_COMPANY: &str = "Unknown Company";
pub const SALARY_FALLBACK: &str = "Kompetitif";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Disability {
    pub id: u64,
    #[serde(rename = "kategori_disabilitas", deserialize_with = "nullable")]
    pub category: String,
    #[serde(rename = "tingkat_disabilitas", deserialize_with = "nullable")]
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobVacancy {
    pub id: u64,
    #[serde(rename = "job_title", deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub job_type: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub responsibilities: String,
    #[serde(deserialize_with = "nullable")]
    pub requirements: String,
    #[serde(deserialize_with = "nullable")]
    pub education: String,
    #[serde(deserialize_with = "nullable")]
    pub experience: String,
    #[serde(deserialize_with = "nullable")]
    pub salary_range: String,
    #[serde(deserialize_with = "nullable")]
    pub benefits: String,
    #[serde(deserialize_with = "nullable")]
    pub location: String,
    #[serde(deserialize_with = "nullable")]
    pub application_deadline: String,
    #[serde(deserialize_with = "nullable")]
    pub accessibility_features: String,
    #[serde(deserialize_with = "nullable")]
    pub work_accommodations: String,
    #[serde(deserialize_with = "nullable")]
    pub skills: Vec<String>,
    #[serde(rename = "perusahaan_profile")]
    pub company: Option<CompanyProfile>,
    #[serde(rename = "disabilitas", deserialize_with = "nullable")]
    pub disabilities: Vec<Disability>,
}

impl JobVacancy {
    #[must_use]
    pub fn company_name(&self) -> &str {
        self.company
            .as_ref()
            .map(|c| c.name.as_str())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(UNKNOWN_COMPANY)
    }

    #[must_use]
    pub fn deadline(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.application_deadline)
    }

    #[must_use]
    pub fn salary_value(&self) -> u128 {
        salary_value(&self.salary_range)
    }
}

static NON_DIGITS: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\D+").ok());

/// Numeric sort key of a free-text salary: every digit, concatenated.
///
/// `"8-12 Juta"` becomes `812`. Input without digits yields 0; digit runs too
/// long for `u128` saturate so they still sort highest.
#[must_use]
pub fn salary_value(raw: &str) -> u128 {
    let digits = NON_DIGITS.as_ref().map_or_else(
        || raw.chars().filter(char::is_ascii_digit).collect::<String>(),
        |re| re.replace_all(raw, "").into_owned(),
    );
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u128::MAX)
}

/// Parse `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, or RFC 3339.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(ts);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Latest deadline first.
    #[default]
    Newest,
    Oldest,
    SalaryHigh,
    SalaryLow,
}

impl SortOrder {
    pub const ALL: [Self; 4] = [Self::Newest, Self::Oldest, Self::SalaryHigh, Self::SalaryLow];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::SalaryHigh => "salary-high",
            Self::SalaryLow => "salary-low",
        }
    }

    /// Unknown keys sort like the default.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.key() == key)
            .unwrap_or_default()
    }
}

/// The search page's filter bar.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JobFilter {
    pub search: String,
    pub location: String,
    pub disability: String,
    pub job_type: String,
    pub sort: SortOrder,
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

impl JobFilter {
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty()
            || !self.location.is_empty()
            || !self.disability.is_empty()
            || !self.job_type.is_empty()
            || self.sort != SortOrder::Newest
    }

    #[must_use]
    pub fn matches(&self, job: &JobVacancy) -> bool {
        let search = self.search.to_lowercase();
        let matches_search = search.is_empty()
            || contains_ci(&job.title, &search)
            || contains_ci(&job.description, &search)
            || contains_ci(&job.requirements, &search)
            || job
                .company
                .as_ref()
                .is_some_and(|c| contains_ci(&c.name, &search));

        let location = self.location.to_lowercase();
        let matches_location = location.is_empty() || contains_ci(&job.location, &location);

        let disability = self.disability.to_lowercase();
        let matches_disability = disability.is_empty()
            || job
                .disabilities
                .iter()
                .any(|d| contains_ci(&d.category, &disability));

        let matches_type = self.job_type.is_empty() || job.job_type == self.job_type;

        matches_search && matches_location && matches_disability && matches_type
    }

    /// Matching jobs in the selected order. The sort is stable.
    #[must_use]
    pub fn apply<'a>(&self, jobs: &'a [JobVacancy]) -> Vec<&'a JobVacancy> {
        let mut hits: Vec<&JobVacancy> = jobs.iter().filter(|job| self.matches(job)).collect();
        match self.sort {
            SortOrder::Newest => hits.sort_by_key(|job| Reverse(job.deadline())),
            SortOrder::Oldest => hits.sort_by_key(|job| job.deadline()),
            SortOrder::SalaryHigh => hits.sort_by_key(|job| Reverse(job.salary_value())),
            SortOrder::SalaryLow => hits.sort_by_key(|job| job.salary_value()),
        }
        hits
    }
}

/// Distinct values in first-seen order.
fn unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !seen.iter().any(|v| v == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

#[must_use]
pub fn unique_locations(jobs: &[JobVacancy]) -> Vec<String> {
    unique(jobs.iter().map(|j| j.location.as_str()))
}

#[must_use]
pub fn unique_job_types(jobs: &[JobVacancy]) -> Vec<String> {
    unique(jobs.iter().map(|j| j.job_type.as_str()))
}

/// Typeahead suggestions for the location box.
#[must_use]
pub fn matching_locations(locations: &[String], typed: &str) -> Vec<String> {
    let typed = typed.to_lowercase();
    locations
        .iter()
        .filter(|l| contains_ci(l, &typed))
        .cloned()
        .collect()
}

/// Everything a job card renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobCardView {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub job_type: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub logo: String,
    pub skills: Vec<String>,
    pub accessibility: Option<String>,
    pub deadline: String,
    pub detail_url: String,
}

impl JobCardView {
    #[must_use]
    pub fn from_job(job: &JobVacancy, asset_base: &str) -> Self {
        let company = job.company_name().to_string();
        let logo_path = job.company.as_ref().and_then(|c| c.logo.as_deref());
        let salary = if job.salary_range.trim().is_empty() {
            SALARY_FALLBACK.to_string()
        } else {
            job.salary_range.clone()
        };
        let accessibility = (!job.disabilities.is_empty()).then(|| {
            job.disabilities
                .iter()
                .map(|d| d.category.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        });
        Self {
            id: job.id.to_string(),
            title: job.title.clone(),
            logo: logo_url(logo_path, &company, asset_base),
            company,
            location: job.location.clone(),
            salary,
            job_type: job.job_type.clone(),
            description: job.description.clone(),
            requirements: job.requirements.split('\n').map(str::to_string).collect(),
            skills: job.skills.clone(),
            accessibility,
            deadline: job.application_deadline.clone(),
            detail_url: format!("/cari-kerja/detail/{}", job.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: u64, title: &str, salary: &str, deadline: &str) -> JobVacancy {
        JobVacancy {
            id,
            title: title.into(),
            salary_range: salary.into(),
            application_deadline: deadline.into(),
            job_type: "Full Time".into(),
            location: "Jakarta, Indonesia".into(),
            ..JobVacancy::default()
        }
    }

    fn sample() -> Vec<JobVacancy> {
        vec![
            job(1, "Frontend Developer", "8-12 Juta", "2025-12-31"),
            job(2, "Backend Developer", "7-10 Juta", "2025-11-30"),
            job(3, "Data Entry", "Negotiable", "not a date"),
        ]
    }

    fn ids(hits: &[&JobVacancy]) -> Vec<u64> {
        hits.iter().map(|j| j.id).collect()
    }

    #[test]
    fn salary_strips_everything_but_digits() {
        assert_eq!(salary_value("8-12 Juta"), 812);
        assert_eq!(salary_value("Rp 5.000.000"), 5_000_000);
        assert_eq!(salary_value("Kompetitif"), 0);
        assert_eq!(salary_value(""), 0);
        assert_eq!(salary_value(&"9".repeat(40)), u128::MAX);
    }

    #[test]
    fn long_rupiah_ranges_outrank_short_ones() {
        let jobs = vec![
            job(1, "Manager", "Rp 100.000.000,00 - Rp 150.000.000,00", "2025-01-01"),
            job(2, "Staff", "3-5 Juta", "2025-01-01"),
            job(3, "Direktur", &"9".repeat(45), "2025-01-01"),
        ];
        let by = |sort| ids(&JobFilter { sort, ..JobFilter::default() }.apply(&jobs));
        assert_eq!(by(SortOrder::SalaryHigh), vec![3, 1, 2]);
        assert_eq!(by(SortOrder::SalaryLow), vec![2, 1, 3]);
    }

    #[test]
    fn search_is_case_insensitive_over_title() {
        let jobs = sample();
        let filter = JobFilter {
            search: "backend".into(),
            ..JobFilter::default()
        };
        assert_eq!(ids(&filter.apply(&jobs)), vec![2]);
    }

    #[test]
    fn search_covers_company_name() {
        let mut jobs = sample();
        jobs[2].company = Some(CompanyProfile {
            name: "Tech Innovate".into(),
            ..CompanyProfile::default()
        });
        let filter = JobFilter {
            search: "INNOVATE".into(),
            ..JobFilter::default()
        };
        assert_eq!(ids(&filter.apply(&jobs)), vec![3]);
    }

    #[test]
    fn sort_orders() {
        let jobs = sample();
        let by = |sort| ids(&JobFilter { sort, ..JobFilter::default() }.apply(&jobs));
        assert_eq!(by(SortOrder::Newest), vec![1, 2, 3]);
        assert_eq!(by(SortOrder::Oldest), vec![3, 2, 1]);
        assert_eq!(by(SortOrder::SalaryHigh), vec![1, 2, 3]);
        assert_eq!(by(SortOrder::SalaryLow), vec![3, 2, 1]);
    }

    #[test]
    fn location_disability_and_type_filters() {
        let mut jobs = sample();
        jobs[1].location = "Bandung, Indonesia".into();
        jobs[1].disabilities = vec![Disability {
            id: 1,
            category: "Ramah untuk tunarungu".into(),
            level: "Ringan".into(),
        }];
        jobs[2].job_type = "Part Time".into();

        let location = JobFilter {
            location: "bandung".into(),
            ..JobFilter::default()
        };
        assert_eq!(ids(&location.apply(&jobs)), vec![2]);

        let disability = JobFilter {
            disability: "tunarungu".into(),
            ..JobFilter::default()
        };
        assert_eq!(ids(&disability.apply(&jobs)), vec![2]);

        let kind = JobFilter {
            job_type: "Part Time".into(),
            ..JobFilter::default()
        };
        assert_eq!(ids(&kind.apply(&jobs)), vec![3]);
    }

    #[test]
    fn active_filter_detection() {
        assert!(!JobFilter::default().has_active_filters());
        assert!(JobFilter {
            sort: SortOrder::SalaryLow,
            ..JobFilter::default()
        }
        .has_active_filters());
        assert_eq!(SortOrder::from_key("salary-high"), SortOrder::SalaryHigh);
        assert_eq!(SortOrder::from_key("bogus"), SortOrder::Newest);
    }

    #[test]
    fn unique_values_keep_first_seen_order() {
        let mut jobs = sample();
        jobs[1].location = "Bandung, Indonesia".into();
        assert_eq!(
            unique_locations(&jobs),
            vec!["Jakarta, Indonesia".to_string(), "Bandung, Indonesia".to_string()]
        );
        assert_eq!(unique_job_types(&jobs), vec!["Full Time".to_string()]);
        assert_eq!(
            matching_locations(&unique_locations(&jobs), "band"),
            vec!["Bandung, Indonesia".to_string()]
        );
    }

    #[test]
    fn timestamps_in_several_shapes() {
        assert!(parse_timestamp("2025-12-31").is_some());
        assert!(parse_timestamp("2024-08-01 10:15:00").is_some());
        assert!(parse_timestamp("2024-08-01T10:15:00.000000Z").is_some());
        assert!(parse_timestamp("31/12/2025").is_none());
    }

    #[test]
    fn card_projection_uses_fallbacks() {
        let mut vacancy = job(42, "Admin", "", "2025-01-01");
        vacancy.requirements = "Teliti\nJujur".into();
        let card = JobCardView::from_job(&vacancy, "http://localhost:8000");
        assert_eq!(card.company, "Unknown Company");
        assert_eq!(card.salary, "Kompetitif");
        assert_eq!(card.requirements, vec!["Teliti".to_string(), "Jujur".to_string()]);
        assert_eq!(card.accessibility, None);
        assert_eq!(card.detail_url, "/cari-kerja/detail/42");
        assert!(card.logo.starts_with("https://ui-avatars.com/api/?name=Unknown%20Company"));
    }

    #[test]
    fn vacancy_decodes_from_wire_json() {
        let raw = r#"{
            "id": 5, "job_title": "QA Engineer", "job_type": "Kontrak",
            "salary_range": null, "skills": ["Selenium"], "location": "Surabaya",
            "perusahaan_profile": {"id": 9, "nama_perusahaan": "Nusantara", "logo": "logos/n.png"},
            "disabilitas": [{"id": 2, "kategori_disabilitas": "Tuna Daksa", "tingkat_disabilitas": "Ringan"}]
        }"#;
        let parsed: JobVacancy =
            serde_json::from_str(raw).unwrap_or_else(|err| panic!("decode failed: {err}"));
        let card = JobCardView::from_job(&parsed, "http://localhost:8000");
        assert_eq!(card.company, "Nusantara");
        assert_eq!(card.logo, "http://localhost:8000/storage/logos/n.png");
        assert_eq!(card.accessibility.as_deref(), Some("Tuna Daksa"));
        assert_eq!(card.salary, "Kompetitif");
    }
}
