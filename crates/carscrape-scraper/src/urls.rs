//! Index-page URL construction and detail-link canonicalization.

use reqwest::Url;

use crate::error::ScraperError;

/// Builds the URL of index page `page`: `{base_url}{index_path}?page={page}`.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if `base_url` + `index_path` does not
/// parse as an absolute URL.
pub fn index_page_url(base_url: &str, index_path: &str, page: u32) -> Result<String, ScraperError> {
    let raw = format!("{}{index_path}", base_url.trim_end_matches('/'));
    let mut url = Url::parse(&raw).map_err(|e| ScraperError::InvalidUrl {
        url: raw.clone(),
        reason: e.to_string(),
    })?;
    url.query_pairs_mut()
        .append_pair("page", &page.to_string());
    Ok(url.to_string())
}

/// Resolves `raw` (absolute or relative) against `base` and canonicalizes it.
#[must_use]
pub fn resolve_and_canonicalize(raw: &str, base: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.starts_with("http://") || raw.starts_with("https://") {
        canonicalize_url(raw)
    } else {
        let base_url = Url::parse(base).ok()?;
        let joined = base_url.join(raw).ok()?;
        canonicalize_url(joined.as_str())
    }
}

/// Canonical form of a detail URL: query string, fragment, and a trailing
/// slash are dropped, so decorated links to the same listing compare equal.
#[must_use]
pub fn canonicalize_url(raw: &str) -> Option<String> {
    let mut url = Url::parse(raw).ok()?;

    url.set_fragment(None);
    url.set_query(None);

    let path = url.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        url.set_path(path.trim_end_matches('/'));
    }

    Some(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_page_url_appends_page_param() {
        let url = index_page_url("https://www.avtovitrin.com", "/new-ads.php", 3).unwrap();
        assert_eq!(url, "https://www.avtovitrin.com/new-ads.php?page=3");
    }

    #[test]
    fn index_page_url_tolerates_trailing_slash() {
        let url = index_page_url("https://www.avtovitrin.com/", "/new-ads.php", 1).unwrap();
        assert_eq!(url, "https://www.avtovitrin.com/new-ads.php?page=1");
    }

    #[test]
    fn index_page_url_rejects_invalid_base() {
        let err = index_page_url("not-a-url", "/new-ads.php", 1).unwrap_err();
        assert!(
            matches!(err, ScraperError::InvalidUrl { .. }),
            "expected InvalidUrl, got: {err:?}"
        );
    }

    #[test]
    fn resolves_relative_href() {
        assert_eq!(
            resolve_and_canonicalize("/cars/123-toyota.html", "https://www.avtovitrin.com")
                .as_deref(),
            Some("https://www.avtovitrin.com/cars/123-toyota.html")
        );
    }

    #[test]
    fn resolves_path_relative_href() {
        assert_eq!(
            resolve_and_canonicalize("cars/55", "https://www.avtovitrin.com").as_deref(),
            Some("https://www.avtovitrin.com/cars/55")
        );
    }

    #[test]
    fn keeps_absolute_href() {
        assert_eq!(
            resolve_and_canonicalize("https://m.avtovitrin.com/cars/9", "https://www.avtovitrin.com")
                .as_deref(),
            Some("https://m.avtovitrin.com/cars/9")
        );
    }

    #[test]
    fn query_and_fragment_decoration_normalizes_identically() {
        let a = resolve_and_canonicalize("/cars/77?from=page1#gallery", "https://x.az");
        let b = resolve_and_canonicalize("/cars/77/?utm_source=list", "https://x.az");
        assert_eq!(a, b);
        assert_eq!(a.as_deref(), Some("https://x.az/cars/77"));
    }

    #[test]
    fn canonicalize_rejects_garbage() {
        assert!(canonicalize_url("::::").is_none());
    }
}
