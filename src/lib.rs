//! Sumi-Gleaner: a polite breadth-first site gleaner
//!
//! This crate crawls a single website breadth-first, extracts structured content
//! from every page (text, headings, Q&A pairs, tables, JSON-LD), classifies each
//! page, scores it for use as AI training or retrieval data, and exports the
//! results in several formats.

pub mod analysis;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Gleaner operations
#[derive(Debug, Error)]
pub enum GleanerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid start URL '{url}': {source}")]
    InvalidStartUrl { url: String, source: UrlError },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlState,
        to: state::CrawlState,
    },

    #[error("No crawl in progress")]
    NotRunning,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Unknown page type: {0}")]
    UnknownPageType(String),

    #[error("Unknown extractor: {0}")]
    UnknownExtractor(String),

    #[error("Unknown export format: {0}")]
    UnknownFormat(String),
}

/// URL-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("Empty URL")]
    Empty,
}

/// Errors produced while fetching a single page
///
/// None of these end a crawl; the page is skipped and the failure is logged.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Expected HTML from {url}, got {content_type}")]
    NotHtml { url: String, content_type: String },

    #[error("Rejected response from {url}: {reason}")]
    InvalidResponse { url: String, reason: String },

    #[error("All {attempts} fetch strategies failed for {url} (last: {last_error})")]
    AllStrategiesFailed {
        url: String,
        attempts: usize,
        last_error: Box<FetchError>,
    },
}

impl FetchError {
    /// Returns true when retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::Timeout { .. } | Self::Network { .. } => true,
            _ => false,
        }
    }
}

/// Result type alias for Sumi-Gleaner operations
pub type Result<T> = std::result::Result<T, GleanerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use analysis::{PageType, QualityScorer};
pub use config::Config;
pub use crawler::{CrawlOptions, CrawlResult, Coordinator};
pub use output::{export_data, ExportFormat};
pub use state::{CrawlSession, CrawlState, PageRecord};
pub use crate::url::{base_domain, normalize_url};
