use crate::UrlError;
use url::Url;

/// Normalizes a user-supplied scan target into an absolute HTTP(S) URL
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace; reject if empty
/// 2. Prepend `https://` when no scheme is given
/// 3. Parse the URL; reject if malformed
/// 4. Reject anything other than `http` and `https`
/// 5. Reject URLs without a host
///
/// Unlike crawl-frontier normalization, the path, query and fragment are left
/// untouched: the page is scanned exactly as addressed.
///
/// # Examples
///
/// ```
/// use seo_scan::url::normalize_target_url;
///
/// let url = normalize_target_url("example.com/pricing").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/pricing");
///
/// let url = normalize_target_url("http://example.com").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/");
/// ```
pub fn normalize_target_url(input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let candidate = if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&candidate).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Returns true when `input` starts with `scheme://`
///
/// A `://` further along (say, inside a query string) does not count.
fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Resolves an anchor `href` against the page URL
///
/// Returns None if the link should be excluded:
/// - fragment-only links (`#section`)
/// - `javascript:` links
/// - hrefs the URL parser cannot join
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    if href.starts_with('#') || href.starts_with("javascript:") {
        return None;
    }

    base_url.join(href).ok()
}

/// Joins a root-relative well-known path (e.g. `/robots.txt`) onto the site
pub fn site_root_join(base_url: &Url, path: &str) -> Option<Url> {
    base_url.join(path).ok()
}
