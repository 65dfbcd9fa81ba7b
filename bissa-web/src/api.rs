//! Listing requests against the Bissa Kerja backend.

use crate::{dom, paths};
use bissa_core::api::{ApiError, Pagination, Resource, decode_envelope, endpoint_url};
use serde::de::DeserializeOwned;

/// Fetch one listing page; `page` is ignored for unpaginated resources.
///
/// # Errors
///
/// Transport failures map to [`ApiError::Network`], non-2xx answers to
/// [`ApiError::Status`], unreadable bodies to [`ApiError::Decode`] and a
/// `success: false` envelope to [`ApiError::Rejected`].
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn fetch_listing<T: DeserializeOwned>(
    resource: Resource,
    page: Option<u32>,
) -> Result<(Vec<T>, Option<Pagination>), ApiError> {
    let path = page.map_or_else(|| resource.path().to_string(), |n| resource.page_path(n));
    let url = endpoint_url(&paths::api_base(), &path);
    log::debug!("GET {url}");

    let (status, body) = dom::fetch_text(&url)
        .await
        .map_err(|err| ApiError::Network(dom::js_error_message(&err)))?;
    if let Some(err) = ApiError::from_status(status) {
        return Err(err);
    }
    decode_envelope::<T>(&body)?.into_result()
}
