//! Statistics derived from the retained pages
//!
//! Everything here is computed from the page list alone, so the numbers for an
//! export always match the pages in it.

use crate::analysis::PageType;
use crate::state::PageRecord;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Number of retained pages
    pub total_pages: usize,

    /// Q&A pairs across all pages
    pub total_qa: usize,

    pub total_words: usize,

    /// Mean quality score, rounded to the nearest integer
    pub avg_quality_score: u32,

    pub faq_pages: usize,

    /// Documentation and API documentation pages
    pub docs_pages: usize,

    /// Mean word count, rounded to the nearest integer
    pub avg_words_per_page: usize,

    /// Same-site links found across all pages
    pub total_links: usize,

    /// Images across all pages, with or without alt text
    pub total_images: usize,

    /// Count of pages by type
    pub page_types: BTreeMap<PageType, usize>,

    /// Count of pages by crawl depth
    pub depth_breakdown: BTreeMap<u32, usize>,
}

/// Computes statistics over `pages`
pub fn compute_statistics<'a>(pages: impl IntoIterator<Item = &'a PageRecord>) -> Statistics {
    let mut stats = Statistics::default();

    let mut score_sum: usize = 0;
    for page in pages {
        stats.total_pages += 1;
        stats.total_qa += page.qa_count();
        stats.total_words += page.word_count;
        stats.total_links += page.links.len();
        stats.total_images += page.images.count;
        score_sum += usize::from(page.quality_score);

        match page.page_type {
            PageType::Faq => stats.faq_pages += 1,
            PageType::Documentation | PageType::ApiDocumentation => stats.docs_pages += 1,
            _ => {}
        }

        *stats.page_types.entry(page.page_type).or_default() += 1;
        *stats.depth_breakdown.entry(page.depth).or_default() += 1;
    }

    if stats.total_pages > 0 {
        stats.avg_quality_score = rounded_mean(score_sum, stats.total_pages) as u32;
        stats.avg_words_per_page = rounded_mean(stats.total_words, stats.total_pages);
    }

    stats
}

fn rounded_mean(sum: usize, count: usize) -> usize {
    (sum + count / 2) / count
}

/// Prints statistics to stderr
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &Statistics) {
    eprint!("{}", render_statistics(stats));
}

/// Formats statistics as a human-readable report
pub fn render_statistics(stats: &Statistics) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_report(&mut out, stats);
    out
}

fn write_report(out: &mut String, stats: &Statistics) -> std::fmt::Result {
    writeln!(out, "=== Crawl Statistics ===\n")?;

    writeln!(out, "Overview:")?;
    writeln!(out, "  Pages retained: {}", stats.total_pages)?;
    writeln!(out, "  Q&A pairs: {}", stats.total_qa)?;
    writeln!(out, "  Total words: {}", stats.total_words)?;
    writeln!(out, "  Total links: {}", stats.total_links)?;
    writeln!(out, "  Total images: {}", stats.total_images)?;
    writeln!(out, "  Average quality score: {}", stats.avg_quality_score)?;
    writeln!(out, "  Average words per page: {}", stats.avg_words_per_page)?;
    writeln!(out, "  FAQ pages: {}", stats.faq_pages)?;
    writeln!(out, "  Documentation pages: {}", stats.docs_pages)?;
    writeln!(out)?;

    if !stats.page_types.is_empty() {
        writeln!(out, "Pages by Type:")?;
        // Sort types by count (descending)
        let mut type_counts: Vec<_> = stats.page_types.iter().collect();
        type_counts.sort_by(|a, b| b.1.cmp(a.1));

        for (page_type, count) in type_counts {
            let percentage = (*count as f64 / stats.total_pages as f64) * 100.0;
            writeln!(out, "  {}: {} ({:.1}%)", page_type, count, percentage)?;
        }
        writeln!(out)?;
    }

    if !stats.depth_breakdown.is_empty() {
        writeln!(out, "Pages by Depth:")?;
        for (depth, count) in &stats.depth_breakdown {
            writeln!(out, "  {}: {}", depth, count)?;
        }
        writeln!(out)?;
    }

    Ok(())
}
