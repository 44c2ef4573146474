/// Lifecycle states of a crawl
///
/// A crawl moves `Idle -> Running` when it starts, then ends in exactly one of
/// the terminal states.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the current state of a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlState {
    // ===== Initial State =====
    /// Session created, nothing fetched yet
    #[default]
    Idle,

    // ===== Active State =====
    /// Frontier is being worked off
    Running,

    // ===== Terminal States =====
    /// Frontier drained or page budget reached
    Completed,

    /// Crawl could not start or hit an internal fault
    Failed,

    /// Cancellation was requested
    Stopped,
}

impl CrawlState {
    /// Returns true if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Stopped)
    }

    /// Returns true while the crawl is working
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Returns true if moving from `self` to `next` is allowed
    ///
    /// `Idle` may also go straight to `Failed` when the start URL is rejected.
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running)
                | (Self::Idle, Self::Failed)
                | (Self::Running, Self::Completed)
                | (Self::Running, Self::Failed)
                | (Self::Running, Self::Stopped)
        )
    }

    /// Moves to `next`, or reports the invalid transition
    pub fn transition(&mut self, next: CrawlState) -> crate::Result<()> {
        if !self.can_transition_to(next) {
            return Err(crate::GleanerError::InvalidTransition {
                from: *self,
                to: next,
            });
        }
        tracing::debug!("Crawl state {} -> {}", self, next);
        *self = next;
        Ok(())
    }

    /// Stable lowercase name used in exports and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
