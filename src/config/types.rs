use crate::analysis::PageType;
use crate::crawler::{
    CrawlOptions, FetchOptions, DEFAULT_DELAY_MS, DEFAULT_MAX_DEPTH, DEFAULT_MAX_PAGES,
    DEFAULT_MIN_QUALITY_SCORE,
};
use crate::extract::{all_capabilities, Capabilities, Capability};
use crate::output::ExportFormat;
use crate::ConfigError;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::time::Duration;

/// Main configuration structure for Sumi-Gleaner
///
/// Every section and key is optional; missing values take the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub fetcher: FetcherConfig,
    pub scope: ScopeConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of frontier entries to attempt
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Maximum link distance from the start URL
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Pause after every page attempt (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,

    /// Pages scoring below this are not retained
    #[serde(rename = "min-quality-score")]
    pub min_quality_score: u8,

    /// Only retain pages of these types; empty keeps every type
    #[serde(rename = "page-types")]
    pub page_types: Vec<String>,

    /// Extractor capabilities to run; empty runs all of them
    pub extractors: Vec<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            max_depth: DEFAULT_MAX_DEPTH,
            delay_ms: DEFAULT_DELAY_MS,
            min_quality_score: DEFAULT_MIN_QUALITY_SCORE,
            page_types: Vec::new(),
            extractors: Vec::new(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler; omitted from the header when empty
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SumiGleaner".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: String::new(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        if self.contact_url.is_empty() {
            format!("{}/{}", self.crawler_name, self.crawler_version)
        } else {
            format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, self.contact_url
            )
        }
    }
}

/// HTTP fetching configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Per-request timeout (milliseconds)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Retries after a transient failure (5xx, 429, timeout, network)
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Base pause before a retry; multiplied by the attempt number
    #[serde(rename = "retry-backoff-ms")]
    pub retry_backoff_ms: u64,

    /// Relay services tried, in order, after a direct fetch fails
    pub proxies: Vec<ProxyConfig>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            max_retries: 2,
            retry_backoff_ms: 1_000,
            proxies: Vec::new(),
        }
    }
}

/// A relay service that fetches pages on our behalf
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    /// Name used in logs
    pub name: String,

    /// URL template; `{url}` is replaced with the percent-encoded target
    pub template: String,
}

/// Additional scope rules on top of the built-in skip lists
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    #[serde(rename = "extra-skip-extensions")]
    pub extra_skip_extensions: Vec<String>,

    #[serde(rename = "extra-skip-paths")]
    pub extra_skip_paths: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Export format name (rag, json, markdown, csv, xml, vectordb)
    pub format: String,

    /// File to write the export to; standard output when unset
    pub path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::default().to_string(),
            path: None,
        }
    }
}

impl Config {
    /// Builds the crawl options described by the `[crawler]` and `[scope]` sections
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownPageType` or `ConfigError::UnknownExtractor`
    /// for names that do not parse.
    pub fn crawl_options(&self) -> Result<CrawlOptions, ConfigError> {
        Ok(CrawlOptions {
            max_pages: self.crawler.max_pages,
            max_depth: self.crawler.max_depth,
            delay_ms: self.crawler.delay_ms,
            min_quality_score: self.crawler.min_quality_score,
            page_types: parse_page_types(&self.crawler.page_types)?,
            capabilities: parse_capabilities(&self.crawler.extractors)?,
            extra_skip_extensions: self.scope.extra_skip_extensions.clone(),
            extra_skip_paths: self.scope.extra_skip_paths.clone(),
        })
    }

    /// Per-request fetch options
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_millis(self.fetcher.timeout_ms),
            user_agent: self.user_agent.header_value(),
        }
    }

    /// The configured export format
    pub fn export_format(&self) -> Result<ExportFormat, ConfigError> {
        self.output.format.parse()
    }
}

/// Parses page-type names; an empty list means no filter
pub fn parse_page_types(names: &[String]) -> Result<Option<BTreeSet<PageType>>, ConfigError> {
    if names.is_empty() {
        return Ok(None);
    }
    names
        .iter()
        .map(|name| name.parse::<PageType>().map_err(ConfigError::UnknownPageType))
        .collect::<Result<BTreeSet<_>, _>>()
        .map(Some)
}

/// Parses extractor names; an empty list enables every capability
pub fn parse_capabilities(names: &[String]) -> Result<Capabilities, ConfigError> {
    if names.is_empty() {
        return Ok(all_capabilities());
    }
    names
        .iter()
        .map(|name| name.parse::<Capability>().map_err(ConfigError::UnknownExtractor))
        .collect()
}
