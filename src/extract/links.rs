//! Link discovery
//!
//! # Link Extraction Rules
//!
//! **Include:**
//! - `<a href="...">` and `<area href="...">`
//! - `<link rel="canonical" href="...">` and `<link rel="alternate" href="...">`
//! - `data-href` and `data-url` attributes on any element
//!
//! **Exclude:**
//! - `<a href="..." download>`
//! - `javascript:`, `mailto:`, `tel:` and `data:` links
//! - fragment-only links
//! - anything that resolves to another site
//!
//! `rel="nofollow"` links are followed.

use super::document::{css, Css, HtmlDocument};
use crate::url::{extract_base_domain, normalize_with_base};
use std::collections::HashSet;
use std::sync::LazyLock;

static ANCHORS: LazyLock<Css> = LazyLock::new(|| css("a[href], area[href]"));
static LINK_TAGS: LazyLock<Css> =
    LazyLock::new(|| css("link[rel='canonical'][href], link[rel='alternate'][href]"));
static DATA_HREF: LazyLock<Css> = LazyLock::new(|| css("[data-href]"));
static DATA_URL: LazyLock<Css> = LazyLock::new(|| css("[data-url]"));

const SKIPPED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Returns the canonical same-site links of a document, de-duplicated, in
/// document order
pub fn extract_links(document: &HtmlDocument) -> Vec<String> {
    let Some(site) = extract_base_domain(document.url()) else {
        return Vec::new();
    };

    let mut hrefs: Vec<&str> = Vec::new();

    for element in document.select(&ANCHORS) {
        if element.value().attr("download").is_some() {
            continue;
        }
        if let Some(href) = element.value().attr("href") {
            hrefs.push(href);
        }
    }

    for element in document.select(&LINK_TAGS) {
        // Alternate feeds and translations in other formats are not pages
        if let Some(kind) = element.value().attr("type") {
            if !kind.eq_ignore_ascii_case("text/html") {
                continue;
            }
        }
        if let Some(href) = element.value().attr("href") {
            hrefs.push(href);
        }
    }

    hrefs.extend(
        document
            .select(&DATA_HREF)
            .filter_map(|element| element.value().attr("data-href")),
    );
    hrefs.extend(
        document
            .select(&DATA_URL)
            .filter_map(|element| element.value().attr("data-url")),
    );

    let mut seen = HashSet::new();
    hrefs
        .into_iter()
        .filter_map(|href| resolve_link(href, document))
        .filter(|link| {
            ::url::Url::parse(link)
                .ok()
                .and_then(|parsed| extract_base_domain(&parsed))
                .is_some_and(|domain| domain == site)
        })
        .filter(|link| seen.insert(link.clone()))
        .collect()
}

/// Resolves an href against the page URL and normalizes it
///
/// Returns None for skipped schemes, fragment-only references and anything
/// the normalizer rejects.
fn resolve_link(href: &str, document: &HtmlDocument) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if SKIPPED_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        return None;
    }

    normalize_with_base(href, document.url()).ok()
}
