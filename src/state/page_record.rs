//! The stored result for one crawled page

use crate::analysis::PageType;
use crate::extract::{
    HeadingSummary, ImageSummary, PageContent, PageExtraction, QaItem, StructuredData,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured result of fetching, extracting, classifying and scoring one URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    /// Canonical URL, unique within a crawl
    pub url: String,
    pub title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub content: PageContent,
    pub word_count: usize,
    pub headings: HeadingSummary,
    pub images: ImageSummary,
    pub structured_data: StructuredData,
    pub schema_data: Vec<Value>,
    pub qa_items: Vec<QaItem>,
    pub page_type: PageType,
    /// 0 through 100
    pub quality_score: u8,
    /// Same-site links found on the page, before scope filtering
    pub links: Vec<String>,
    /// BFS distance from the start URL
    pub depth: u32,
    /// Page that first linked here; `None` for the start URL
    pub parent: Option<String>,
}

impl PageRecord {
    /// Assembles a record from an extraction and the analysis results
    pub fn new(
        url: impl Into<String>,
        depth: u32,
        parent: Option<String>,
        extraction: PageExtraction,
        page_type: PageType,
        quality_score: u8,
    ) -> Self {
        let PageExtraction {
            metadata,
            content,
            headings,
            images,
            structured_data,
            schema_data,
            has_faq_schema: _,
            qa_items,
            links,
        } = extraction;

        Self {
            url: url.into(),
            title: metadata.title,
            meta_description: metadata.description,
            meta_keywords: metadata.keywords,
            word_count: content.word_count(),
            content,
            headings,
            images,
            structured_data,
            schema_data,
            qa_items,
            page_type,
            quality_score,
            links,
            depth,
            parent,
        }
    }

    /// Number of question/answer pairs on the page
    pub fn qa_count(&self) -> usize {
        self.qa_items.len()
    }
}
