//! Output module for exporting crawl results
//!
//! This module handles:
//! - Transforming retained pages into the supported export formats
//! - Computing and printing crawl statistics
//!
//! Every exporter is a pure function of the page list and the domain.

mod csv;
mod json;
mod markdown;
pub mod stats;
mod xml;

pub use stats::{compute_statistics, print_statistics, render_statistics, Statistics};

use crate::state::PageRecord;
use crate::ConfigError;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Pages scoring below this are left out of the `rag` and `vectordb` exports
///
/// Independent of the crawl-time `min_quality_score`.
pub const EXPORT_QUALITY_THRESHOLD: u8 = 30;

/// Output-specific errors
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    /// Retrieval documents with metadata and Q&A pairs
    Rag,
    /// Full page records plus statistics
    #[default]
    Json,
    Markdown,
    Csv,
    Xml,
    /// Text chunks ready for embedding
    Vectordb,
}

impl ExportFormat {
    pub fn all() -> [Self; 6] {
        [
            Self::Rag,
            Self::Json,
            Self::Markdown,
            Self::Csv,
            Self::Xml,
            Self::Vectordb,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rag => "rag",
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::Csv => "csv",
            Self::Xml => "xml",
            Self::Vectordb => "vectordb",
        }
    }

    /// File extension for files in this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Rag | Self::Json | Self::Vectordb => "json",
            Self::Markdown => "md",
            Self::Csv => "csv",
            Self::Xml => "xml",
        }
    }

    /// Returns true if low-quality pages are dropped at export time
    pub fn applies_quality_threshold(&self) -> bool {
        matches!(self, Self::Rag | Self::Vectordb)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rag" => Ok(Self::Rag),
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            "csv" => Ok(Self::Csv),
            "xml" => Ok(Self::Xml),
            "vectordb" | "vector-db" | "vector" => Ok(Self::Vectordb),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

/// Exports `pages` in `format`
///
/// # Arguments
///
/// * `pages` - Retained pages, in the order they should appear
/// * `format` - Target format
/// * `domain` - Site the pages belong to, used in headers and document ids
///
/// # Returns
///
/// * `Ok(String)` - The rendered export
/// * `Err(OutputError)` - JSON or CSV serialization failed
pub fn export_data(
    pages: &[PageRecord],
    format: ExportFormat,
    domain: &str,
) -> OutputResult<String> {
    let selected: Vec<&PageRecord> = if format.applies_quality_threshold() {
        pages
            .iter()
            .filter(|page| page.quality_score >= EXPORT_QUALITY_THRESHOLD)
            .collect()
    } else {
        pages.iter().collect()
    };

    tracing::debug!(
        "Exporting {} of {} pages as {}",
        selected.len(),
        pages.len(),
        format
    );

    match format {
        ExportFormat::Rag => json::export_rag(&selected, domain),
        ExportFormat::Json => json::export_json(&selected, domain),
        ExportFormat::Vectordb => json::export_vectordb(&selected, domain),
        ExportFormat::Markdown => Ok(markdown::export_markdown(&selected, domain)),
        ExportFormat::Csv => csv::export_csv(&selected),
        ExportFormat::Xml => Ok(xml::export_xml(&selected, domain)),
    }
}
