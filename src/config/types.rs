use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for SEO Scan
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
}

/// Timeouts and sampling bounds for a single scan
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Maximum time to wait for the main page to reach network idle (milliseconds)
    #[serde(rename = "page-timeout-ms")]
    pub page_timeout_ms: u64,

    /// Quiet window with no new network activity that counts as idle (milliseconds)
    #[serde(rename = "network-idle-ms")]
    pub network_idle_ms: u64,

    /// Timeout for each sampled internal link check (milliseconds)
    #[serde(rename = "link-check-timeout-ms")]
    pub link_check_timeout_ms: u64,

    /// Timeout for the sitemap and robots.txt HEAD probes (milliseconds)
    #[serde(rename = "probe-timeout-ms")]
    pub probe_timeout_ms: u64,

    /// Number of internal links sampled for liveness
    #[serde(rename = "max-link-checks")]
    pub max_link_checks: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            page_timeout_ms: 30_000,
            network_idle_ms: 500,
            link_check_timeout_ms: 10_000,
            probe_timeout_ms: 5_000,
            max_link_checks: 10,
        }
    }
}

impl ScannerConfig {
    pub fn page_timeout(&self) -> Duration {
        Duration::from_millis(self.page_timeout_ms)
    }

    pub fn network_idle(&self) -> Duration {
        Duration::from_millis(self.network_idle_ms)
    }

    pub fn link_check_timeout(&self) -> Duration {
        Duration::from_millis(self.link_check_timeout_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the scanner
    pub name: String,

    /// Version of the scanner
    pub version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: "SeoScan".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

/// Headless browser launch options
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run without a visible window
    pub headless: bool,

    /// Path to a Chrome/Chromium binary; auto-detected when absent
    pub executable: Option<String>,

    /// Keep the Chrome sandbox enabled (disable inside some containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            executable: None,
            sandbox: true,
        }
    }
}
