//! Sitemap and robots.txt probes
//!
//! Both probes send HEAD requests to well-known paths at the site root.
//! Redirects are not followed: only a direct 200 counts. Any network error
//! counts as "not found".

use crate::config::UserAgentConfig;
use crate::url::site_root_join;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Sitemap locations, in the order they are tried
pub const SITEMAP_PATHS: &[&str] = &["/sitemap.xml", "/sitemap_index.xml"];

const ROBOTS_PATH: &str = "/robots.txt";

/// Builds the HTTP client used by the probes
///
/// # Arguments
///
/// * `user_agent` - User agent configuration
/// * `timeout` - Per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Looks for a sitemap at the site root
///
/// Returns the URL of the first candidate answering 200 with an XML
/// Content-Type.
pub async fn find_sitemap(client: &Client, base_url: &Url) -> Option<String> {
    for path in SITEMAP_PATHS {
        let Some(candidate) = site_root_join(base_url, path) else {
            continue;
        };

        match client.head(candidate.as_str()).send().await {
            Ok(response) => {
                let is_xml = response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(|v| v.to_ascii_lowercase().contains("xml"))
                    .unwrap_or(false);

                if response.status() == StatusCode::OK && is_xml {
                    return Some(candidate.to_string());
                }
            }
            Err(e) => debug!("Sitemap probe for {} failed: {}", candidate, e),
        }
    }

    None
}

/// Looks for robots.txt at the site root
pub async fn find_robots_txt(client: &Client, base_url: &Url) -> Option<String> {
    let candidate = site_root_join(base_url, ROBOTS_PATH)?;

    match client.head(candidate.as_str()).send().await {
        Ok(response) if response.status() == StatusCode::OK => Some(candidate.to_string()),
        Ok(_) => None,
        Err(e) => {
            debug!("robots.txt probe for {} failed: {}", candidate, e);
            None
        }
    }
}
