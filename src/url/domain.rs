use url::Url;

/// Extracts the authority (`host` or `host:port`) from a URL
///
/// The port is only included when it is not the scheme's default, so
/// `https://example.com:443/` and `https://example.com/` share an authority.
/// Hosts are compared exactly as the URL parser yields them; no `www.`
/// stripping happens here.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use seo_scan::url::authority;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(authority(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(authority(&url), Some("127.0.0.1:8080".to_string()));
///
/// let url = Url::parse("mailto:someone@example.com").unwrap();
/// assert_eq!(authority(&url), None);
/// ```
pub fn authority(url: &Url) -> Option<String> {
    let host = url.host_str().filter(|h| !h.is_empty())?;
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host.to_string()),
    }
}

/// Returns true when `link` belongs to the same site as `base`
///
/// Links without an authority (`mailto:`, `tel:`, `data:` and friends) have
/// nowhere else to point and count as internal.
pub fn is_same_site(link: &Url, base_authority: Option<&str>) -> bool {
    match authority(link) {
        None => true,
        Some(link_authority) => Some(link_authority.as_str()) == base_authority,
    }
}
