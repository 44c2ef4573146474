//! Progress reporting abstraction for crawl operations
//!
//! The coordinator emits one [`ProgressEvent`] after every page attempt.
//! Where the events go is up to the [`ProgressReporter`] implementation.

use serde::Serialize;
use tokio::sync::mpsc;

/// Snapshot of crawl progress after one page attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    /// 0 through 100, relative to the page budget
    pub progress: u8,
    pub pages_scanned: usize,
    pub current_url: String,
    pub message: String,
}

impl ProgressEvent {
    /// Builds an event, deriving `progress` from the page budget
    pub fn new(
        pages_scanned: usize,
        max_pages: usize,
        current_url: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            progress: progress_percent(pages_scanned, max_pages),
            pages_scanned,
            current_url: current_url.into(),
            message: message.into(),
        }
    }
}

/// `min(100, scanned * 100 / max_pages)`; 100 when there is no budget
pub fn progress_percent(pages_scanned: usize, max_pages: usize) -> u8 {
    if max_pages == 0 {
        return 100;
    }
    (pages_scanned.saturating_mul(100) / max_pages).min(100) as u8
}

/// Receives crawl progress events
///
/// Implementations can send updates to channels, log them, update a UI, etc.
pub trait ProgressReporter: Send + Sync {
    /// Report the outcome of one page attempt
    fn report(&self, event: ProgressEvent);
}

/// Progress reporter that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    #[inline(always)]
    fn report(&self, _event: ProgressEvent) {}
}

/// Logs every event through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn report(&self, event: ProgressEvent) {
        tracing::info!(
            "[{:>3}%] {} pages scanned | {} | {}",
            event.progress,
            event.pages_scanned,
            event.current_url,
            event.message
        );
    }
}

/// Forwards events into a tokio channel
///
/// Events are dropped silently once the receiver is gone, so a consumer that
/// stops listening never stalls the crawl.
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    sender: mpsc::UnboundedSender<ProgressEvent>,
}

impl ChannelProgress {
    pub fn new(sender: mpsc::UnboundedSender<ProgressEvent>) -> Self {
        Self { sender }
    }

    /// Creates a reporter together with the receiving end
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ProgressEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl ProgressReporter for ChannelProgress {
    fn report(&self, event: ProgressEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!("Progress receiver dropped");
        }
    }
}
