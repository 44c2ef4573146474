//! Content extraction module for Sumi-Gleaner
//!
//! This module turns raw HTML into the structured pieces of a page record:
//! - Title and meta tags
//! - Main-content text and paragraphs
//! - Headings, images, tables and lists
//! - JSON-LD blocks and FAQ schema markers
//! - Question/answer pairs
//! - Same-site links to follow
//!
//! Which pieces are extracted is controlled by a set of [`Capability`] values.
//! Links are always extracted because the crawl depends on them.

mod content;
mod document;
mod links;
mod metadata;
mod qa;
mod schema;
mod structure;
mod types;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use url::Url;

pub use content::{extract_content, MIN_PARAGRAPH_CHARS};
pub use document::{clean_text, collapse_whitespace, element_text, HtmlDocument};
pub use links::extract_links;
pub use metadata::extract_metadata;
pub use qa::extract_qa;
pub use schema::{extract_json_ld, has_faq_schema};
pub use structure::{extract_headings, extract_images, extract_structured_data};
pub use types::{
    Heading, HeadingSummary, ImageItem, ImageSummary, ListData, ListType, PageContent,
    PageExtraction, PageMetadata, QaItem, StructuredData, TableData,
};

/// One independently switchable part of the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Main text, paragraphs, raw section HTML
    Content,
    /// Title, description, keywords, `og:type`
    Metadata,
    /// Question/answer pairs
    Qa,
    /// JSON-LD blocks and FAQ schema detection
    Schema,
    /// Headings, images, tables, lists
    Structure,
}

impl Capability {
    /// Returns all capabilities
    pub fn all() -> [Self; 5] {
        [
            Self::Content,
            Self::Metadata,
            Self::Qa,
            Self::Schema,
            Self::Structure,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Metadata => "metadata",
            Self::Qa => "qa",
            Self::Schema => "schema",
            Self::Structure => "structure",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "content" | "text" => Ok(Self::Content),
            "metadata" | "meta" => Ok(Self::Metadata),
            "qa" | "q&a" | "faq" => Ok(Self::Qa),
            "schema" | "json-ld" | "jsonld" => Ok(Self::Schema),
            "structure" | "headings" => Ok(Self::Structure),
            _ => Err(s.to_string()),
        }
    }
}

/// The set of enabled capabilities
pub type Capabilities = BTreeSet<Capability>;

/// Returns a set with every capability enabled
pub fn all_capabilities() -> Capabilities {
    Capability::all().into_iter().collect()
}

/// Runs the enabled extractors over one page
///
/// Disabled capabilities leave their fields at their empty defaults.
pub fn extract_page(html: &str, url: &Url, capabilities: &Capabilities) -> PageExtraction {
    let document = HtmlDocument::parse(html, url);

    let mut extraction = PageExtraction {
        links: extract_links(&document),
        ..Default::default()
    };

    for capability in capabilities {
        match capability {
            Capability::Content => {
                extraction.content = extract_content(&document);
            }
            Capability::Metadata => {
                extraction.metadata = extract_metadata(&document);
            }
            Capability::Qa => {
                extraction.qa_items = extract_qa(&document);
            }
            Capability::Schema => {
                extraction.schema_data = extract_json_ld(&document);
                extraction.has_faq_schema = has_faq_schema(&document, &extraction.schema_data);
            }
            Capability::Structure => {
                extraction.headings = extract_headings(&document);
                extraction.images = extract_images(&document);
                extraction.structured_data = extract_structured_data(&document);
            }
        }
    }

    extraction
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html>
        <head>
            <title>Help Center FAQ</title>
            <meta name="description" content="Common questions">
            <script type="application/ld+json">{"@type": "FAQPage"}</script>
        </head>
        <body>
            <nav><a href="/">Home</a></nav>
            <main>
                <h1>Frequently asked questions</h1>
                <dl>
                    <dt>How do I sign up?</dt><dd>Click the sign up button on the homepage.</dd>
                </dl>
                <a href="/pricing">Pricing</a>
                <img src="/faq.png" alt="FAQ illustration">
            </main>
        </body>
    </html>"#;

    fn url() -> Url {
        Url::parse("https://example.com/faq").unwrap()
    }

    #[test]
    fn test_all_capabilities() {
        let extraction = extract_page(PAGE, &url(), &all_capabilities());

        assert_eq!(extraction.metadata.title, "Help Center FAQ");
        assert_eq!(extraction.metadata.description, "Common questions");
        assert!(extraction.content.text.contains("Click the sign up button"));
        assert!(!extraction.content.text.contains("Home"));
        assert_eq!(extraction.qa_items.len(), 1);
        assert_eq!(extraction.schema_data.len(), 1);
        assert!(extraction.has_faq_schema);
        assert_eq!(extraction.headings.h1_count, 1);
        assert_eq!(extraction.images.with_alt_text, 1);
        assert_eq!(
            extraction.links,
            vec!["https://example.com", "https://example.com/pricing"]
        );
    }

    #[test]
    fn test_disabled_capabilities_leave_defaults() {
        let only_meta: Capabilities = [Capability::Metadata].into_iter().collect();
        let extraction = extract_page(PAGE, &url(), &only_meta);

        assert_eq!(extraction.metadata.title, "Help Center FAQ");
        assert!(extraction.content.text.is_empty());
        assert!(extraction.qa_items.is_empty());
        assert!(extraction.schema_data.is_empty());
        assert!(!extraction.has_faq_schema);
        assert_eq!(extraction.headings.total(), 0);
        // Links are extracted regardless
        assert_eq!(extraction.links.len(), 2);
    }

    #[test]
    fn test_capability_parsing() {
        assert_eq!("content".parse::<Capability>(), Ok(Capability::Content));
        assert_eq!("Q&A".parse::<Capability>(), Ok(Capability::Qa));
        assert_eq!("json-ld".parse::<Capability>(), Ok(Capability::Schema));
        assert!("images".parse::<Capability>().is_err());
    }

    #[test]
    fn test_capability_display_roundtrip() {
        for capability in Capability::all() {
            assert_eq!(capability.to_string().parse::<Capability>(), Ok(capability));
        }
    }
}
