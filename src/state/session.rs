//! Per-crawl mutable state
//!
//! A [`CrawlSession`] is created when a crawl starts, mutated only by the
//! coordinator that owns it, and consumed when the crawl result is built.
//! Nothing in it is shared between crawls.

use super::{CrawlState, PageRecord};
use crate::crawler::{CrawlOptions, Frontier, FrontierEntry};
use crate::url::{base_domain, normalize_url, ScopeDecision, ScopeRules};
use crate::UrlError;
use std::collections::{BTreeMap, HashSet};

/// Everything one crawl knows about its progress
#[derive(Debug)]
pub struct CrawlSession {
    start_url: String,
    base_domain: String,
    options: CrawlOptions,
    scope: ScopeRules,
    visited: HashSet<String>,
    frontier: Frontier,
    pages: Vec<PageRecord>,
    parent_to_children: BTreeMap<String, Vec<String>>,
    pages_scanned: usize,
    state: CrawlState,
}

impl CrawlSession {
    /// Creates a session for `start_url` with the start URL already queued
    ///
    /// # Errors
    ///
    /// Returns a `UrlError` if the start URL cannot be normalized.
    pub fn new(start_url: &str, options: CrawlOptions) -> Result<Self, UrlError> {
        let start_url = normalize_url(start_url)?;
        let base_domain = base_domain(&start_url);
        if base_domain.is_empty() {
            return Err(UrlError::MissingDomain);
        }

        let scope = ScopeRules::new(base_domain.clone())
            .with_extra(&options.extra_skip_extensions, &options.extra_skip_paths);

        let mut frontier = Frontier::new();
        frontier.push(FrontierEntry::root(start_url.clone()));

        Ok(Self {
            start_url,
            base_domain,
            options,
            scope,
            visited: HashSet::new(),
            frontier,
            pages: Vec::new(),
            parent_to_children: BTreeMap::new(),
            pages_scanned: 0,
            state: CrawlState::Idle,
        })
    }

    pub fn start_url(&self) -> &str {
        &self.start_url
    }

    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    pub fn options(&self) -> &CrawlOptions {
        &self.options
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Moves the session to `next`, rejecting invalid transitions
    pub fn transition(&mut self, next: CrawlState) -> crate::Result<()> {
        self.state.transition(next)
    }

    /// Number of frontier entries that were attempted (fetched or failed)
    pub fn pages_scanned(&self) -> usize {
        self.pages_scanned
    }

    /// Retained page records, in the order they were crawled
    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }

    /// Parent URL to the child URLs that were fetched below it
    pub fn parent_to_children(&self) -> &BTreeMap<String, Vec<String>> {
        &self.parent_to_children
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Returns true once `max_pages` frontier entries have been attempted
    pub fn budget_exhausted(&self) -> bool {
        self.pages_scanned >= self.options.max_pages
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Checks a normalized URL against the scope rules and the visited set
    pub fn evaluate_scope(&self, url: &str) -> ScopeDecision {
        match self.scope.evaluate(url) {
            ScopeDecision::Allowed if self.visited.contains(url) => ScopeDecision::AlreadyVisited,
            decision => decision,
        }
    }

    /// Returns true if `url` is in scope and not yet visited
    pub fn should_crawl(&self, url: &str) -> bool {
        self.evaluate_scope(url).is_allowed()
    }

    /// Takes the next frontier entry
    pub fn next_entry(&mut self) -> Option<FrontierEntry> {
        self.frontier.pop()
    }

    /// Marks a URL visited and counts it against the page budget
    ///
    /// Returns false if the URL had already been visited, in which case nothing
    /// is counted.
    pub fn begin_visit(&mut self, url: &str) -> bool {
        if !self.visited.insert(url.to_string()) {
            return false;
        }
        self.pages_scanned += 1;
        true
    }

    /// Records that `entry` was fetched below its parent
    pub fn record_edge(&mut self, entry: &FrontierEntry) {
        if let Some(parent) = &entry.parent {
            let children = self.parent_to_children.entry(parent.clone()).or_default();
            if !children.contains(&entry.url) {
                children.push(entry.url.clone());
            }
        }
    }

    /// Stores a retained page
    pub fn add_page(&mut self, record: PageRecord) {
        self.pages.push(record);
    }

    /// Queues the admissible links of `parent`
    ///
    /// Children deeper than `max_depth`, out-of-scope or visited URLs, and URLs
    /// that are already waiting are dropped. Returns the number queued.
    pub fn enqueue_children(&mut self, parent: &FrontierEntry, links: &[String]) -> usize {
        if parent.depth + 1 > self.options.max_depth {
            tracing::trace!(
                "Not following {} links from {}: depth limit {}",
                links.len(),
                parent.url,
                self.options.max_depth
            );
            return 0;
        }

        let mut queued = 0;
        for link in links {
            let decision = self.evaluate_scope(link);
            if !decision.is_allowed() {
                tracing::debug!("Skipping {}: {:?}", link, decision);
                continue;
            }
            if self.frontier.push(parent.child(link.clone())) {
                queued += 1;
            }
        }
        queued
    }

    /// Consumes the session, returning its pages and site structure
    pub fn into_parts(self) -> (Vec<PageRecord>, BTreeMap<String, Vec<String>>) {
        (self.pages, self.parent_to_children)
    }
}
