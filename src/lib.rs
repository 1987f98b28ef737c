//! SEO Scan: single-page SEO auditor
//!
//! This crate fetches a page through a headless browser, extracts SEO signals
//! (metadata, headings, images, links, keywords, mobile-friendliness), samples
//! internal links for liveness, probes for sitemap/robots files and folds all
//! of it into a single 0-100 score.

pub mod browser;
pub mod config;
pub mod extract;
pub mod output;
pub mod result;
pub mod scanner;
pub mod scoring;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for scan operations
///
/// The `FetchTimeout`, `HttpError` and `EmptyContent` variants are fatal for a
/// scan. Their display text is what ends up in `ScanResult::errors`.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] UrlError),

    #[error("Invalid scan request: {0}")]
    InvalidRequest(String),

    #[error("Timeout loading {url} after {timeout_ms}ms")]
    FetchTimeout { url: String, timeout_ms: u64 },

    #[error("HTTP {status} for {url}")]
    HttpError { url: String, status: u16 },

    #[error("Failed to fetch page content for {url}")]
    EmptyContent { url: String },

    #[error("Browser error: {0}")]
    Browser(#[from] browser::BrowserError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid stage transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::ScanStage,
        to: state::ScanStage,
    },
}

impl ScanError {
    /// Returns true for the failures that abort a scan
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::FetchTimeout { .. } | Self::HttpError { .. } | Self::EmptyContent { .. }
        )
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,

    #[error("Empty URL")]
    Empty,
}

/// Result type alias for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use result::ScanResult;
pub use scanner::{ScanOutcome, ScanRequest, Scanner};
pub use state::ScanStage;
