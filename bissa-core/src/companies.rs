use crate::api::nullable;
use crate::constants::AVATAR_SERVICE_URL;
use crate::jobs::parse_timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompanyUser {
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
}

/// `perusahaan_profile` as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    pub id: u64,
    pub logo: Option<String>,
    pub logo_url: Option<String>,
    #[serde(rename = "nama_perusahaan", deserialize_with = "nullable")]
    pub name: String,
    #[serde(rename = "industri", deserialize_with = "nullable")]
    pub industry: String,
    #[serde(rename = "tahun_berdiri", deserialize_with = "nullable")]
    pub founded_year: String,
    #[serde(rename = "jumlah_karyawan", deserialize_with = "nullable")]
    pub employee_count: String,
    #[serde(rename = "deskripsi", deserialize_with = "nullable")]
    pub description: String,
    #[serde(rename = "no_telp", deserialize_with = "nullable")]
    pub phone: String,
    #[serde(rename = "link_website", deserialize_with = "nullable")]
    pub website: String,
    #[serde(rename = "alamat_lengkap", deserialize_with = "nullable")]
    pub address: String,
    #[serde(rename = "status_verifikasi", deserialize_with = "nullable")]
    pub verification_status: String,
    #[serde(deserialize_with = "nullable")]
    pub created_at: String,
    pub user: Option<CompanyUser>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyStatus {
    Active,
    Inactive,
    Pending,
}

impl CompanyStatus {
    #[must_use]
    pub fn from_verification(raw: &str) -> Self {
        match raw.trim() {
            "terverifikasi" => Self::Active,
            "ditolak" => Self::Inactive,
            _ => Self::Pending,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Terverifikasi",
            Self::Inactive => "Ditolak",
            Self::Pending => "Belum Verifikasi",
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
        }
    }
}

/// Partner card shown on the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Company {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub description: String,
    pub status: CompanyStatus,
    /// `dd/mm/yyyy`, when the backend sent a parseable timestamp.
    pub created_at: Option<String>,
    pub employee_count: String,
    pub logo: Option<String>,
    pub industry: String,
    pub founded_year: String,
    pub website: String,
}

fn or_unavailable(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

impl Company {
    #[must_use]
    pub fn from_profile(profile: &CompanyProfile) -> Self {
        let email = profile
            .user
            .as_ref()
            .map(|u| u.email.as_str())
            .unwrap_or_default();
        Self {
            id: profile.id,
            name: or_unavailable(&profile.name, "Tidak Diketahui"),
            email: or_unavailable(email, "tidak tersedia"),
            phone: or_unavailable(&profile.phone, "Tidak tersedia"),
            address: or_unavailable(&profile.address, "Tidak tersedia"),
            description: profile.description.clone(),
            status: CompanyStatus::from_verification(&profile.verification_status),
            created_at: parse_timestamp(&profile.created_at)
                .map(|ts| ts.format("%d/%m/%Y").to_string()),
            employee_count: profile.employee_count.clone(),
            logo: profile
                .logo_url
                .clone()
                .or_else(|| profile.logo.clone())
                .filter(|l| !l.trim().is_empty()),
            industry: profile.industry.clone(),
            founded_year: profile.founded_year.clone(),
            website: profile.website.clone(),
        }
    }

    #[must_use]
    pub fn logo_src(&self, asset_base: &str) -> String {
        logo_url(self.logo.as_deref(), &self.name, asset_base)
    }
}

/// Resolve a company logo.
///
/// Absolute `http…` URLs pass through, relative paths live under
/// `{asset_base}/storage/`, and a missing logo becomes a generated initials
/// avatar.
#[must_use]
pub fn logo_url(logo: Option<&str>, company_name: &str, asset_base: &str) -> String {
    match logo.map(str::trim).filter(|l| !l.is_empty()) {
        Some(absolute) if absolute.starts_with("http") => absolute.to_string(),
        Some(relative) => format!(
            "{}/storage/{}",
            asset_base.trim_end_matches('/'),
            relative.trim_start_matches('/')
        ),
        None => format!(
            "{AVATAR_SERVICE_URL}?name={}&length=2",
            urlencoding::encode(company_name)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(status: &str) -> CompanyProfile {
        CompanyProfile {
            id: 7,
            name: "Tech Innovate".into(),
            verification_status: status.into(),
            created_at: "2024-03-05T08:00:00.000000Z".into(),
            ..CompanyProfile::default()
        }
    }

    #[test]
    fn verification_status_maps_to_card_status() {
        assert_eq!(Company::from_profile(&profile("terverifikasi")).status, CompanyStatus::Active);
        assert_eq!(Company::from_profile(&profile("ditolak")).status, CompanyStatus::Inactive);
        assert_eq!(Company::from_profile(&profile("pending")).status, CompanyStatus::Pending);
        assert_eq!(Company::from_profile(&profile("verified")).status, CompanyStatus::Pending);
        assert_eq!(CompanyStatus::Active.label(), "Terverifikasi");
        assert_eq!(CompanyStatus::Inactive.label(), "Ditolak");
        assert_eq!(CompanyStatus::Pending.label(), "Belum Verifikasi");
    }

    #[test]
    fn missing_fields_use_indonesian_fallbacks() {
        let company = Company::from_profile(&CompanyProfile::default());
        assert_eq!(company.name, "Tidak Diketahui");
        assert_eq!(company.phone, "Tidak tersedia");
        assert_eq!(company.address, "Tidak tersedia");
        assert_eq!(company.email, "tidak tersedia");
        assert_eq!(company.created_at, None);
    }

    #[test]
    fn created_date_is_day_month_year() {
        let company = Company::from_profile(&profile("pending"));
        assert_eq!(company.created_at.as_deref(), Some("05/03/2024"));
    }

    #[test]
    fn logo_resolution() {
        assert_eq!(
            logo_url(Some("https://cdn.example.com/a.png"), "X", "http://localhost:8000"),
            "https://cdn.example.com/a.png"
        );
        assert_eq!(
            logo_url(Some("logos/a.png"), "X", "http://localhost:8000/"),
            "http://localhost:8000/storage/logos/a.png"
        );
        assert_eq!(
            logo_url(Some("  "), "Tech Innovate", "http://localhost:8000"),
            "https://ui-avatars.com/api/?name=Tech%20Innovate&length=2"
        );
    }

    #[test]
    fn profile_decodes_with_nulls() {
        let raw = r#"{"id":3,"logo":null,"nama_perusahaan":"Digital Solutions","no_telp":null,
            "status_verifikasi":"terverifikasi","user":{"email":"hr@ds.id"},"unknown":1}"#;
        let parsed: CompanyProfile =
            serde_json::from_str(raw).unwrap_or_else(|err| panic!("decode failed: {err}"));
        let company = Company::from_profile(&parsed);
        assert_eq!(company.name, "Digital Solutions");
        assert_eq!(company.phone, "Tidak tersedia");
        assert_eq!(company.email, "hr@ds.id");
        assert_eq!(company.status, CompanyStatus::Active);
    }
}
