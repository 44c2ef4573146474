//! CSV export: one summary row per page

use super::{OutputError, OutputResult};
use crate::state::PageRecord;

pub const CSV_COLUMNS: [&str; 6] = [
    "URL",
    "Title",
    "Type",
    "Quality Score",
    "Word Count",
    "Q&A Count",
];

/// Renders pages as RFC 4180 CSV, rows in input order
pub(super) fn export_csv(pages: &[&PageRecord]) -> OutputResult<String> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_COLUMNS)?;

    for page in pages {
        writer.write_record([
            page.url.clone(),
            page.title.clone(),
            page.page_type.label().to_string(),
            page.quality_score.to_string(),
            page.word_count.to_string(),
            page.qa_count().to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| OutputError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
