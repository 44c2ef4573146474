//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Building a fresh session per crawl
//! - Working off the frontier breadth-first
//! - Coordinating fetching, extraction, classification and scoring
//! - Handling cancellation
//! - Assembling the final result

use super::fallback::FallbackFetcher;
use super::fetcher::{FetchOptions, Fetcher};
use super::progress::{NoOpProgress, ProgressEvent, ProgressReporter};
use super::{CrawlOptions, CrawlResult, FrontierEntry};
use crate::analysis::{ClassificationInput, Classifier, QualityScorer, ScoreInput};
use crate::config::Config;
use crate::extract::extract_page;
use crate::output::compute_statistics;
use crate::state::{CrawlSession, CrawlState, PageRecord};
use crate::GleanerError;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// What a single [`Coordinator::step`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Page fetched and analyzed; `retained` tells whether it was stored
    Processed { url: String, retained: bool },

    /// Fetch failed; the page counts against the budget but has no record
    FetchFailed { url: String },

    /// Entry dropped without fetching (already visited or too deep)
    Skipped { url: String },

    /// The crawl is over; no frontier entry was consumed
    Finished(CrawlState),
}

impl StepOutcome {
    /// Returns true if a fetch was attempted
    pub fn was_attempt(&self) -> bool {
        matches!(self, Self::Processed { .. } | Self::FetchFailed { .. })
    }
}

/// A crawl in progress
struct ActiveCrawl {
    session: CrawlSession,
    classifier: Classifier,
    started_at: DateTime<Utc>,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    fetcher: Arc<dyn Fetcher>,
    fetch_options: FetchOptions,
    progress: Arc<dyn ProgressReporter>,
    cancel: Arc<AtomicBool>,
    scorer: QualityScorer,
    active: Option<ActiveCrawl>,
    /// State reported when no session exists (before start, or after a failed start)
    idle_state: CrawlState,
}

impl Coordinator {
    /// Creates a coordinator that fetches through `fetcher`
    pub fn new(fetcher: Arc<dyn Fetcher>, fetch_options: FetchOptions) -> Self {
        Self {
            fetcher,
            fetch_options,
            progress: Arc::new(NoOpProgress),
            cancel: Arc::new(AtomicBool::new(false)),
            scorer: QualityScorer::new(),
            active: None,
            idle_state: CrawlState::Idle,
        }
    }

    /// Creates a coordinator with the direct fetcher plus configured relays
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let fetcher = FallbackFetcher::from_config(&config.user_agent, &config.fetcher)?;
        tracing::debug!("Fetch chain has {} strategies", fetcher.len());
        Ok(Self::new(Arc::new(fetcher), config.fetch_options()))
    }

    /// Sends progress events to `progress`
    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Uses an externally owned cancellation flag
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    /// The flag that stops the crawl when set
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Requests cancellation; the crawl stops before the next frontier entry
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Current lifecycle state
    pub fn state(&self) -> CrawlState {
        self.active
            .as_ref()
            .map(|active| active.session.state())
            .unwrap_or(self.idle_state)
    }

    /// The session of the current crawl, if one was started
    pub fn session(&self) -> Option<&CrawlSession> {
        self.active.as_ref().map(|active| &active.session)
    }

    /// URLs waiting in the frontier, oldest first
    pub fn frontier_urls(&self) -> Vec<String> {
        self.session()
            .map(|session| session.frontier().urls())
            .unwrap_or_default()
    }

    /// Runs a complete crawl and returns its result
    ///
    /// Every call builds a fresh session. Cancellation is not an error: the
    /// result then has status [`CrawlState::Stopped`] and the pages gathered so far.
    ///
    /// # Errors
    ///
    /// Returns `GleanerError::InvalidStartUrl` if `start_url` cannot be normalized.
    pub async fn crawl(
        &mut self,
        start_url: &str,
        options: CrawlOptions,
    ) -> crate::Result<CrawlResult> {
        self.start(start_url, options)?;
        self.run().await?;
        self.finish()
    }

    /// Starts a new crawl without fetching anything
    pub fn start(&mut self, start_url: &str, options: CrawlOptions) -> crate::Result<()> {
        let mut session = match CrawlSession::new(start_url, options) {
            Ok(session) => session,
            Err(source) => {
                let mut state = CrawlState::Idle;
                state.transition(CrawlState::Failed)?;
                self.idle_state = state;
                self.active = None;
                tracing::error!("Invalid start URL '{}': {}", start_url, source);
                return Err(GleanerError::InvalidStartUrl {
                    url: start_url.to_string(),
                    source,
                });
            }
        };

        session.transition(CrawlState::Running)?;
        tracing::info!(
            "Starting crawl of {} (max {} pages, depth {})",
            session.start_url(),
            session.options().max_pages,
            session.options().max_depth
        );

        let classifier = Classifier::new(session.start_url());
        self.active = Some(ActiveCrawl {
            session,
            classifier,
            started_at: Utc::now(),
        });
        Ok(())
    }

    /// Steps until the crawl reaches a terminal state
    ///
    /// Pauses `delay_ms` after every fetch attempt, failed ones included.
    pub async fn run(&mut self) -> crate::Result<CrawlState> {
        loop {
            let outcome = self.step().await?;
            if let StepOutcome::Finished(state) = outcome {
                return Ok(state);
            }

            if outcome.was_attempt() {
                let delay_ms = self
                    .session()
                    .map(|session| session.options().delay_ms)
                    .unwrap_or_default();
                if delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }

    /// Advances the crawl by exactly one frontier entry
    ///
    /// # Errors
    ///
    /// Returns `GleanerError::NotRunning` if no crawl was started.
    pub async fn step(&mut self) -> crate::Result<StepOutcome> {
        let active = self.active.as_mut().ok_or(GleanerError::NotRunning)?;
        let session = &mut active.session;

        if !session.state().is_running() {
            return Ok(StepOutcome::Finished(session.state()));
        }

        if self.cancel.load(Ordering::Relaxed) {
            tracing::info!("Crawl cancelled after {} pages", session.pages_scanned());
            session.transition(CrawlState::Stopped)?;
            return Ok(StepOutcome::Finished(CrawlState::Stopped));
        }

        if session.budget_exhausted() {
            tracing::info!("Page budget of {} reached", session.options().max_pages);
            session.transition(CrawlState::Completed)?;
            return Ok(StepOutcome::Finished(CrawlState::Completed));
        }

        let Some(entry) = session.next_entry() else {
            tracing::info!("Frontier is empty, crawl complete");
            session.transition(CrawlState::Completed)?;
            return Ok(StepOutcome::Finished(CrawlState::Completed));
        };

        if session.is_visited(&entry.url) || entry.depth > session.options().max_depth {
            tracing::trace!("Dropping {} at depth {}", entry.url, entry.depth);
            return Ok(StepOutcome::Skipped { url: entry.url });
        }

        session.begin_visit(&entry.url);
        tracing::debug!("Fetching {} (depth {})", entry.url, entry.depth);

        let (outcome, message) = match self.fetcher.fetch(&entry.url, &self.fetch_options).await {
            Ok(html) => {
                let (retained, message) = process_page(active, &self.scorer, &entry, &html);
                (
                    StepOutcome::Processed {
                        url: entry.url.clone(),
                        retained,
                    },
                    message,
                )
            }
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", entry.url, e);
                (
                    StepOutcome::FetchFailed {
                        url: entry.url.clone(),
                    },
                    format!("Fetch failed: {}", e),
                )
            }
        };

        let session = &active.session;
        self.progress.report(ProgressEvent::new(
            session.pages_scanned(),
            session.options().max_pages,
            entry.url,
            message,
        ));

        Ok(outcome)
    }

    /// Ends the crawl and assembles its result
    ///
    /// A crawl that is still running is marked stopped.
    pub fn finish(&mut self) -> crate::Result<CrawlResult> {
        let mut active = self.active.take().ok_or(GleanerError::NotRunning)?;
        if active.session.state().is_running() {
            active.session.transition(CrawlState::Stopped)?;
        }

        let finished_at = Utc::now();
        let session = active.session;
        let domain = session.base_domain().to_string();
        let start_url = session.start_url().to_string();
        let status = session.state();
        let pages_scanned = session.pages_scanned();
        let (pages, site_structure) = session.into_parts();
        let statistics = compute_statistics(&pages);
        let duration_ms = (finished_at - active.started_at)
            .num_milliseconds()
            .max(0) as u64;

        self.idle_state = status;

        tracing::info!(
            "Crawl {}: {} pages scanned, {} retained in {}ms",
            status,
            pages_scanned,
            pages.len(),
            duration_ms
        );

        Ok(CrawlResult {
            domain,
            start_url,
            status,
            pages_scanned,
            statistics,
            pages,
            site_structure,
            started_at: active.started_at,
            finished_at,
            duration_ms,
        })
    }
}

/// Extracts, classifies and scores a fetched page, stores it if it passes the
/// filters, and queues its children
///
/// Returns whether the page was retained plus a progress message.
fn process_page(
    active: &mut ActiveCrawl,
    scorer: &QualityScorer,
    entry: &FrontierEntry,
    html: &str,
) -> (bool, String) {
    let session = &mut active.session;

    let url = match Url::parse(&entry.url) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Cannot parse queued URL {}: {}", entry.url, e);
            return (false, format!("Unparsable URL: {}", e));
        }
    };

    let extraction = extract_page(html, &url, &session.options().capabilities);

    let page_type = active.classifier.classify(&ClassificationInput {
        url: &entry.url,
        title: &extraction.metadata.title,
        body_text: &extraction.content.text,
        og_type: extraction.metadata.og_type.as_deref(),
        has_faq_schema: extraction.has_faq_schema,
    });

    let quality_score = scorer.score(&ScoreInput {
        content: &extraction.content,
        headings: &extraction.headings,
        qa_items: &extraction.qa_items,
        page_type,
    });

    session.record_edge(entry);

    let options = session.options();
    let meets_score = quality_score >= options.min_quality_score;
    let meets_type = options
        .page_types
        .as_ref()
        .map_or(true, |types| types.contains(&page_type));

    let links = extraction.links.clone();
    let retained = meets_score && meets_type;

    let message = if retained {
        session.add_page(PageRecord::new(
            entry.url.clone(),
            entry.depth,
            entry.parent.clone(),
            extraction,
            page_type,
            quality_score,
        ));
        format!("Scanned {} page (score {})", page_type, quality_score)
    } else {
        tracing::debug!(
            "Not retaining {} ({}, score {})",
            entry.url,
            page_type,
            quality_score
        );
        format!("Skipped {} page (score {})", page_type, quality_score)
    };

    let queued = session.enqueue_children(entry, &links);
    tracing::trace!("Queued {} of {} links from {}", queued, links.len(), entry.url);

    (retained, message)
}
