//! Title and meta-tag extraction

use super::document::{css, element_text, Css, HtmlDocument};
use super::types::PageMetadata;
use std::sync::LazyLock;

static H1: LazyLock<Css> = LazyLock::new(|| css("h1"));
static META_DESCRIPTION: LazyLock<Css> = LazyLock::new(|| css("meta[name='description']"));
static META_KEYWORDS: LazyLock<Css> = LazyLock::new(|| css("meta[name='keywords']"));
static OG_TITLE: LazyLock<Css> = LazyLock::new(|| css("meta[property='og:title']"));
static OG_DESCRIPTION: LazyLock<Css> =
    LazyLock::new(|| css("meta[property='og:description']"));
static OG_TYPE: LazyLock<Css> = LazyLock::new(|| css("meta[property='og:type']"));

/// Extracts the title, description, keywords and `og:type` of a page
///
/// The title falls back to `og:title` and then to the first `h1`; the
/// description falls back to `og:description`. Missing values are empty.
pub fn extract_metadata(document: &HtmlDocument) -> PageMetadata {
    let title = document
        .title()
        .or_else(|| document.meta_content(&OG_TITLE))
        .or_else(|| {
            document
                .select_first(&H1)
                .map(element_text)
                .filter(|text| !text.is_empty())
        })
        .unwrap_or_default();

    let description = document
        .meta_content(&META_DESCRIPTION)
        .or_else(|| document.meta_content(&OG_DESCRIPTION))
        .unwrap_or_default();

    let keywords = document.meta_content(&META_KEYWORDS).unwrap_or_default();

    let og_type = document
        .meta_content(&OG_TYPE)
        .map(|value| value.to_lowercase());

    PageMetadata {
        title,
        description,
        keywords,
        og_type,
    }
}
