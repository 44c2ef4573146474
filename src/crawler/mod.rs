//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic and relay fallback
//! - The breadth-first frontier
//! - Progress reporting
//! - Overall crawl coordination

mod coordinator;
mod fallback;
mod fetcher;
mod frontier;
mod progress;

pub use coordinator::{Coordinator, StepOutcome};
pub use fallback::{FallbackFetcher, ProxyFetcher};
pub use fetcher::{
    build_http_client, is_html_content_type, looks_like_html, FetchOptions, Fetcher, HttpFetcher,
};
pub use frontier::{Frontier, FrontierEntry};
pub use progress::{
    progress_percent, ChannelProgress, LogProgress, NoOpProgress, ProgressEvent, ProgressReporter,
};

use crate::analysis::PageType;
use crate::extract::{all_capabilities, Capabilities};
use crate::output::Statistics;
use crate::state::{CrawlState, PageRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

pub const DEFAULT_MAX_PAGES: usize = 50;
pub const DEFAULT_MAX_DEPTH: u32 = 3;
pub const DEFAULT_DELAY_MS: u64 = 500;
pub const DEFAULT_MIN_QUALITY_SCORE: u8 = 30;

/// Limits and filters for one crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Frontier entries to attempt, failed fetches included
    pub max_pages: usize,

    /// Link distance from the start URL (start URL is depth 0)
    pub max_depth: u32,

    /// Pause after every fetch attempt
    pub delay_ms: u64,

    /// Pages scoring below this are crawled but not retained
    pub min_quality_score: u8,

    /// Retain only these page types; `None` keeps every type
    pub page_types: Option<BTreeSet<PageType>>,

    /// Extractors to run on each page
    pub capabilities: Capabilities,

    pub extra_skip_extensions: Vec<String>,
    pub extra_skip_paths: Vec<String>,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            max_depth: DEFAULT_MAX_DEPTH,
            delay_ms: DEFAULT_DELAY_MS,
            min_quality_score: DEFAULT_MIN_QUALITY_SCORE,
            page_types: None,
            capabilities: all_capabilities(),
            extra_skip_extensions: Vec::new(),
            extra_skip_paths: Vec::new(),
        }
    }
}

/// Everything a finished (or stopped) crawl produced
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    /// Base domain of the start URL
    pub domain: String,
    pub start_url: String,
    pub status: CrawlState,
    pub pages_scanned: usize,
    pub statistics: Statistics,
    /// Retained pages in visit order
    pub pages: Vec<PageRecord>,
    /// Parent URL to the children fetched from it, in discovery order
    pub site_structure: BTreeMap<String, Vec<String>>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: u64,
}
