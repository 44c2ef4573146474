//! Page analysis: classification and quality scoring
//!
//! Both stages are pure functions of the extracted page data; neither touches
//! the network or the crawl session.

mod classifier;
mod page_type;
mod scorer;

pub use classifier::{ClassificationInput, Classifier};
pub use page_type::PageType;
pub use scorer::{QualityScorer, ScoreInput, MAX_SCORE};
