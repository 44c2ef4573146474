//! Data structures produced by the content extractor

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Title and meta tags of a page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: String,

    /// Lowercased `og:type` value, used as a classification hint
    pub og_type: Option<String>,
}

/// Main-content text of a page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    /// Whitespace-collapsed text of the primary container, chrome removed
    pub text: String,

    /// Text blocks longer than 20 characters, in document order
    pub paragraphs: Vec<String>,

    /// Serialized HTML of the primary container
    pub raw_section_html: String,
}

impl PageContent {
    /// Number of whitespace-separated words in the text
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Length of the text in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A single heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// 1 through 6
    pub level: u8,
    pub text: String,
}

/// Heading outline of a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingSummary {
    pub items: Vec<Heading>,
    pub h1_count: usize,
    pub h2_count: usize,
    pub h3_count: usize,
}

impl HeadingSummary {
    /// Builds the summary, caching the h1/h2/h3 counts
    pub fn from_items(items: Vec<Heading>) -> Self {
        let count = |level: u8| items.iter().filter(|h| h.level == level).count();
        Self {
            h1_count: count(1),
            h2_count: count(2),
            h3_count: count(3),
            items,
        }
    }

    /// Total number of headings of any level
    pub fn total(&self) -> usize {
        self.items.len()
    }
}

/// An image that carries alternative text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageItem {
    pub src: String,
    pub alt_text: String,
}

/// Image statistics for a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSummary {
    /// Total number of `img` tags
    pub count: usize,
    /// Number of `img` tags with non-empty alt text
    pub with_alt_text: usize,
    pub items: Vec<ImageItem>,
}

/// A table reduced to its text cells
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Ordered or unordered list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    Ul,
    Ol,
}

/// A list reduced to the text of its items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListData {
    #[serde(rename = "type")]
    pub list_type: ListType,
    pub items: Vec<String>,
}

/// Tables and lists found in the main content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredData {
    pub tables: Vec<TableData>,
    pub lists: Vec<ListData>,
}

/// A question and its answer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QaItem {
    pub question: String,
    pub answer: String,
}

/// Everything the extractor learned about one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageExtraction {
    pub metadata: PageMetadata,
    pub content: PageContent,
    pub headings: HeadingSummary,
    pub images: ImageSummary,
    pub structured_data: StructuredData,
    pub schema_data: Vec<Value>,
    /// True when JSON-LD or microdata declares an FAQPage
    pub has_faq_schema: bool,
    pub qa_items: Vec<QaItem>,
    /// Same-site canonical links, de-duplicated, in document order
    pub links: Vec<String>,
}
