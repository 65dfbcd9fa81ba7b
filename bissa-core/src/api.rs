//! Listing API envelope and the user-facing error taxonomy.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

const fn first_page() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default = "first_page")]
    pub last_page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            last_page: 1,
            per_page: 0,
            total: 0,
        }
    }
}

impl Pagination {
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub const fn next_page(&self) -> Option<u32> {
        if self.has_next() {
            Some(self.current_page + 1)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn prev_page(&self) -> Option<u32> {
        if self.has_prev() {
            Some(self.current_page - 1)
        } else {
            None
        }
    }
}

/// `{success, message, data: T[], pagination?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub message: String,
    #[serde(default = "Vec::new", deserialize_with = "nullable")]
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    /// Split a successful envelope into rows and paging.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the server answered `success: false`.
    pub fn into_result(self) -> Result<(Vec<T>, Option<Pagination>), ApiError> {
        if self.success {
            Ok((self.data, self.pagination))
        } else {
            Err(ApiError::Rejected(self.message))
        }
    }
}

/// Parse a response body into an envelope.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the body is not a valid envelope.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<ApiResponse<T>, ApiError> {
    serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))
}

/// Which listing a request was for; only changes the 404 wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Jobs,
    Companies,
}

impl Resource {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Jobs => "/jobs",
            Self::Companies => "/companies",
        }
    }

    /// Path with a `page` query for paginated listings.
    #[must_use]
    pub fn page_path(self, page: u32) -> String {
        format!("{}?page={page}", self.path())
    }

    const fn not_found(self) -> &'static str {
        match self {
            Self::Jobs => "Data lowongan tidak ditemukan.",
            Self::Companies => "Data perusahaan tidak ditemukan.",
        }
    }
}

/// Join the API base and a path without doubling slashes.
#[must_use]
pub fn endpoint_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("request rejected: {0}")]
    Rejected(String),
}

impl ApiError {
    /// Classify a finished HTTP exchange; `None` for 2xx.
    #[must_use]
    pub const fn from_status(status: u16) -> Option<Self> {
        if status >= 200 && status < 300 {
            None
        } else {
            Some(Self::Status(status))
        }
    }

    /// Message shown to the user in the page's error state.
    #[must_use]
    pub fn user_message(&self, resource: Resource) -> String {
        match self {
            Self::Status(404) => resource.not_found().to_string(),
            Self::Status(500) => "Server sedang mengalami gangguan. Silakan coba lagi nanti.".into(),
            Self::Status(401) => "Sesi Anda telah berakhir. Silakan login kembali.".into(),
            Self::Status(403) => "Anda tidak memiliki akses untuk melihat data ini.".into(),
            Self::Status(status) => {
                format!("Terjadi kesalahan (Error {status}). Silakan coba lagi.")
            }
            Self::Network(_) => {
                "Tidak dapat terhubung ke server. Periksa koneksi internet Anda.".into()
            }
            Self::Decode(_) | Self::Rejected(_) => {
                "Terjadi kesalahan yang tidak diketahui. Silakan refresh halaman.".into()
            }
        }
    }
}

/// What a listing section renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListingState<T> {
    #[default]
    Loading,
    Ready(Vec<T>),
    Empty,
    Failed(String),
}

impl<T> ListingState<T> {
    /// Fold a fetch outcome into a renderable state.
    ///
    /// `success: false` is not an error for the user: the section shows its
    /// empty state and the server message only goes to the log.
    pub fn resolve(outcome: Result<Vec<T>, ApiError>, resource: Resource) -> Self {
        match outcome {
            Ok(rows) if rows.is_empty() => Self::Empty,
            Ok(rows) => Self::Ready(rows),
            Err(ApiError::Rejected(message)) => {
                log::info!("{} listing unsuccessful: {message}", resource.path());
                Self::Empty
            }
            Err(err) => {
                log::warn!("{} listing failed: {err}", resource.path());
                Self::Failed(err.user_message(resource))
            }
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Ready(rows) => rows,
            _ => &[],
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListingState<U> {
        match self {
            Self::Loading => ListingState::Loading,
            Self::Ready(rows) => ListingState::Ready(rows.into_iter().map(f).collect()),
            Self::Empty => ListingState::Empty,
            Self::Failed(message) => ListingState::Failed(message),
        }
    }
}
