//! FIFO frontier of URLs waiting to be fetched
//!
//! Entries are served strictly in insertion order, which together with
//! `depth = parent depth + 1` gives breadth-first traversal. A URL that is
//! already waiting is not queued a second time, so the first page that links
//! to a URL becomes its parent.

use std::collections::{HashSet, VecDeque};

/// A URL waiting in the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Canonical URL
    pub url: String,

    /// BFS distance from the start URL
    pub depth: u32,

    /// Canonical URL of the page that first linked here
    pub parent: Option<String>,
}

impl FrontierEntry {
    /// The entry for the crawl's start URL
    pub fn root(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            depth: 0,
            parent: None,
        }
    }

    /// An entry one level below `self`
    pub fn child(&self, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            depth: self.depth + 1,
            parent: Some(self.url.clone()),
        }
    }
}

/// Pending-work queue with membership tracking
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    queued: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry unless its URL is already waiting
    ///
    /// Returns true if the entry was added.
    pub fn push(&mut self, entry: FrontierEntry) -> bool {
        if !self.queued.insert(entry.url.clone()) {
            tracing::trace!("Already queued: {}", entry.url);
            return false;
        }
        tracing::trace!("Queued {} at depth {}", entry.url, entry.depth);
        self.queue.push_back(entry);
        true
    }

    /// Removes and returns the oldest entry
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        let entry = self.queue.pop_front()?;
        self.queued.remove(&entry.url);
        Some(entry)
    }

    /// Returns true if `url` is waiting in the frontier
    pub fn contains(&self, url: &str) -> bool {
        self.queued.contains(url)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// The waiting URLs, oldest first
    pub fn urls(&self) -> Vec<String> {
        self.queue.iter().map(|entry| entry.url.clone()).collect()
    }
}
