//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: lifecycle of a crawl (idle, running, completed, failed, stopped)
//! - `CrawlSession`: frontier, visited set, retained pages and site structure of one crawl
//! - `PageRecord`: the stored result for one page

mod crawl_state;
mod page_record;
mod session;

// Re-export main types
pub use crawl_state::CrawlState;
pub use page_record::PageRecord;
pub use session::CrawlSession;
