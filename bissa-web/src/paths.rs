//! Deployment-dependent URLs.
//!
//! Everything here is fixed at compile time with `option_env!`:
//! `PUBLIC_URL` (router base path), `BISSA_API_URL` (REST API base) and
//! `BISSA_BASE_URL` (backend origin that serves uploaded logos).

const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Prefix a static asset path with the deployment base path.
#[must_use]
pub fn asset_path(relative: &str) -> String {
    asset_path_with_base(relative, option_env!("PUBLIC_URL").unwrap_or(""))
}

/// Base path for the router (e.g., `/portal` when hosted under a subdirectory).
///
/// Returns `None` when no base path is configured so the router falls back to root.
#[must_use]
pub fn router_base() -> Option<String> {
    router_base_with_base(option_env!("PUBLIC_URL").unwrap_or(""))
}

#[must_use]
pub fn api_base() -> String {
    configured_or(option_env!("BISSA_API_URL"), DEFAULT_API_URL)
}

/// Origin used to resolve relative logo paths.
#[must_use]
pub fn asset_base() -> String {
    configured_or(option_env!("BISSA_BASE_URL"), DEFAULT_BASE_URL)
}

fn configured_or(value: Option<&str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .trim_end_matches('/')
        .to_string()
}

fn asset_path_with_base(relative: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    let rel = relative.trim_start_matches('/');

    if base.is_empty() {
        format!("/{rel}")
    } else {
        format!("{base}/{rel}")
    }
}

fn router_base_with_base(base: &str) -> Option<String> {
    let base = base.trim_end_matches('/').trim();
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_paths_respect_the_public_base() {
        assert_eq!(asset_path_with_base("img/hero.webp", ""), "/img/hero.webp");
        assert_eq!(
            asset_path_with_base("/img/hero.webp", "/portal/"),
            "/portal/img/hero.webp"
        );
    }

    #[test]
    fn router_base_is_trimmed_or_absent() {
        assert_eq!(router_base_with_base(""), None);
        assert_eq!(router_base_with_base("/portal/"), Some(String::from("/portal")));
    }

    #[test]
    fn unset_urls_use_local_backend() {
        assert_eq!(configured_or(None, DEFAULT_API_URL), "http://localhost:8000/api");
        assert_eq!(configured_or(Some("  "), DEFAULT_BASE_URL), "http://localhost:8000");
        assert_eq!(
            configured_or(Some("https://api.bissa.id/"), DEFAULT_API_URL),
            "https://api.bissa.id"
        );
    }
}
