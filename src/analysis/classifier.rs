//! Heuristic page classification
//!
//! Signals are consulted in a fixed order and the first match wins:
//! URL path keywords, title keywords, the `og:type` hint, body heuristics,
//! the crawl's start URL, and finally [`PageType::Other`].

use super::PageType;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Path keywords per page type, in precedence order
///
/// A segment matches a keyword when it equals it, equals its plural, or starts
/// with `keyword-` (so `/guides` and `/getting-started-guide` differ: only the
/// former is a guide segment).
const PATH_KEYWORDS: &[(PageType, &[&str])] = &[
    (
        PageType::Faq,
        &["faq", "frequently-asked-questions", "questions"],
    ),
    (
        PageType::ApiDocumentation,
        &["api", "api-reference", "api-docs", "developer"],
    ),
    (PageType::Troubleshooting, &["troubleshooting", "troubleshoot"]),
    (
        PageType::KnowledgeBase,
        &["kb", "knowledge-base", "knowledgebase"],
    ),
    (PageType::Documentation, &["docs", "doc", "documentation", "manual"]),
    (
        PageType::Guide,
        &["guide", "tutorial", "how-to", "howto", "getting-started"],
    ),
    (PageType::Support, &["support", "help", "helpdesk"]),
    (
        PageType::LegalPolicy,
        &["legal", "privacy", "privacy-policy", "terms", "tos", "cookie-policy", "gdpr"],
    ),
    (PageType::Reviews, &["review", "testimonial"]),
    (PageType::BlogArticle, &["blog", "news", "article", "post"]),
    (PageType::Product, &["product", "shop", "store"]),
    (PageType::Service, &["service", "solution"]),
    (PageType::Contact, &["contact", "contact-us"]),
    (PageType::About, &["about", "about-us", "team", "company"]),
];

/// Title keywords per page type, in precedence order
static TITLE_KEYWORDS: LazyLock<Vec<(PageType, Regex)>> = LazyLock::new(|| {
    [
        (PageType::Faq, r"(?i)\b(faqs?|frequently asked questions)\b"),
        (PageType::ApiDocumentation, r"(?i)\bapi\b"),
        (PageType::Troubleshooting, r"(?i)\btroubleshoot(ing)?\b"),
        (PageType::KnowledgeBase, r"(?i)\bknowledge ?base\b"),
        (PageType::Documentation, r"(?i)\b(documentation|docs)\b"),
        (PageType::Guide, r"(?i)\b(guide|tutorial|how to)\b"),
        (PageType::Support, r"(?i)\b(support|help cent(er|re))\b"),
        (
            PageType::LegalPolicy,
            r"(?i)\b(privacy policy|cookie policy|terms of (service|use)|terms (and|&) conditions)\b",
        ),
        (PageType::Reviews, r"(?i)\b(reviews|testimonials)\b"),
        (PageType::BlogArticle, r"(?i)\bblog\b"),
        (PageType::Contact, r"(?i)\bcontact( us)?\b"),
        (PageType::About, r"(?i)\babout( us)?\b"),
    ]
    .into_iter()
    .filter_map(|(page_type, pattern)| match Regex::new(pattern) {
        Ok(regex) => Some((page_type, regex)),
        Err(e) => {
            tracing::error!("Invalid title pattern for {}: {}", page_type, e);
            None
        }
    })
    .collect()
});

const FAQ_PHRASE: &str = "frequently asked questions";

/// Signals the classifier looks at for one page
#[derive(Debug, Clone, Copy)]
pub struct ClassificationInput<'a> {
    /// Canonical page URL
    pub url: &'a str,
    pub title: &'a str,
    pub body_text: &'a str,
    pub og_type: Option<&'a str>,
    pub has_faq_schema: bool,
}

/// Assigns a [`PageType`] to pages of one crawl
#[derive(Debug, Clone)]
pub struct Classifier {
    start_url: String,
}

impl Classifier {
    /// Creates a classifier for a crawl that started at `start_url`
    ///
    /// `start_url` must already be normalized.
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
        }
    }

    /// Classifies a page; the first matching signal wins
    pub fn classify(&self, input: &ClassificationInput<'_>) -> PageType {
        classify_by_path(input.url)
            .or_else(|| classify_by_title(input.title))
            .or_else(|| input.og_type.and_then(classify_by_og_type))
            .or_else(|| classify_by_body(input.body_text, input.has_faq_schema))
            .or_else(|| (input.url == self.start_url).then_some(PageType::Homepage))
            .unwrap_or(PageType::Other)
    }
}

fn classify_by_path(url: &str) -> Option<PageType> {
    let parsed = Url::parse(url).ok()?;
    let segments: Vec<String> = parsed
        .path()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_lowercase())
        .collect();

    if segments.is_empty() {
        return None;
    }

    PATH_KEYWORDS.iter().find_map(|(page_type, keywords)| {
        let hit = segments.iter().any(|segment| {
            keywords
                .iter()
                .any(|keyword| segment_matches(segment, keyword))
        });
        hit.then_some(*page_type)
    })
}

fn segment_matches(segment: &str, keyword: &str) -> bool {
    if segment == keyword {
        return true;
    }
    match segment.strip_prefix(keyword) {
        Some("s") => true,
        Some(rest) => rest.starts_with('-'),
        None => false,
    }
}

fn classify_by_title(title: &str) -> Option<PageType> {
    if title.trim().is_empty() {
        return None;
    }
    TITLE_KEYWORDS
        .iter()
        .find(|(_, regex)| regex.is_match(title))
        .map(|(page_type, _)| *page_type)
}

fn classify_by_og_type(og_type: &str) -> Option<PageType> {
    match og_type.trim().to_lowercase().as_str() {
        "article" | "blog" | "blogposting" => Some(PageType::BlogArticle),
        "product" | "product.item" => Some(PageType::Product),
        _ => None,
    }
}

fn classify_by_body(body_text: &str, has_faq_schema: bool) -> Option<PageType> {
    if has_faq_schema || body_text.to_lowercase().contains(FAQ_PHRASE) {
        Some(PageType::Faq)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "https://example.com";

    fn classify(url: &str, title: &str) -> PageType {
        Classifier::new(START).classify(&ClassificationInput {
            url,
            title,
            body_text: "",
            og_type: None,
            has_faq_schema: false,
        })
    }

    #[test]
    fn test_all_title_patterns_compile() {
        assert_eq!(TITLE_KEYWORDS.len(), 12);
    }

    #[test]
    fn test_path_keywords() {
        assert_eq!(classify("https://example.com/faq", ""), PageType::Faq);
        assert_eq!(classify("https://example.com/faqs", ""), PageType::Faq);
        assert_eq!(classify("https://example.com/docs/install", ""), PageType::Documentation);
        assert_eq!(classify("https://example.com/api/v2/users", ""), PageType::ApiDocumentation);
        assert_eq!(classify("https://example.com/guides/setup", ""), PageType::Guide);
        assert_eq!(classify("https://example.com/help", ""), PageType::Support);
        assert_eq!(classify("https://example.com/privacy-policy", ""), PageType::LegalPolicy);
        assert_eq!(classify("https://example.com/blog/launch", ""), PageType::BlogArticle);
        assert_eq!(classify("https://example.com/contact-us", ""), PageType::Contact);
        assert_eq!(classify("https://example.com/about", ""), PageType::About);
    }

    #[test]
    fn test_path_keywords_match_whole_segments() {
        // "apiary" and "helpful" are not keyword segments
        assert_eq!(classify("https://example.com/apiary", ""), PageType::Other);
        assert_eq!(classify("https://example.com/helpful-things", ""), PageType::Other);
    }

    #[test]
    fn test_path_precedence() {
        // FAQ outranks Support when both appear in the path
        assert_eq!(classify("https://example.com/support/faq", ""), PageType::Faq);
        // API documentation outranks generic docs
        assert_eq!(classify("https://example.com/docs/api", ""), PageType::ApiDocumentation);
    }

    #[test]
    fn test_path_beats_title() {
        assert_eq!(
            classify("https://example.com/blog/post-1", "Frequently Asked Questions"),
            PageType::BlogArticle
        );
    }

    #[test]
    fn test_title_keywords() {
        assert_eq!(classify("https://example.com/x", "Product FAQ"), PageType::Faq);
        assert_eq!(classify("https://example.com/x", "Installation Guide"), PageType::Guide);
        assert_eq!(classify("https://example.com/x", "REST API Reference"), PageType::ApiDocumentation);
        assert_eq!(classify("https://example.com/x", "Our Privacy Policy"), PageType::LegalPolicy);
        assert_eq!(classify("https://example.com/x", "Contact Us"), PageType::Contact);
    }

    #[test]
    fn test_title_word_boundaries() {
        assert_eq!(classify("https://example.com/x", "Rapid prototyping"), PageType::Other);
        assert_eq!(classify("https://example.com/x", "Capital markets"), PageType::Other);
    }

    #[test]
    fn test_og_type_hint() {
        let classifier = Classifier::new(START);
        let input = ClassificationInput {
            url: "https://example.com/x",
            title: "Something happened",
            body_text: "",
            og_type: Some("article"),
            has_faq_schema: false,
        };
        assert_eq!(classifier.classify(&input), PageType::BlogArticle);

        let input = ClassificationInput {
            og_type: Some("product"),
            ..input
        };
        assert_eq!(classifier.classify(&input), PageType::Product);
    }

    #[test]
    fn test_body_heuristics() {
        let classifier = Classifier::new(START);
        let input = ClassificationInput {
            url: "https://example.com/x",
            title: "Welcome",
            body_text: "Read our Frequently Asked Questions below",
            og_type: None,
            has_faq_schema: false,
        };
        assert_eq!(classifier.classify(&input), PageType::Faq);

        let input = ClassificationInput {
            body_text: "",
            has_faq_schema: true,
            ..input
        };
        assert_eq!(classifier.classify(&input), PageType::Faq);
    }

    #[test]
    fn test_homepage_is_start_url() {
        assert_eq!(classify(START, "Welcome"), PageType::Homepage);
        assert_eq!(classify("https://example.com/x", "Welcome"), PageType::Other);
    }

    #[test]
    fn test_start_url_keyword_wins_over_homepage() {
        let classifier = Classifier::new("https://example.com/docs");
        let input = ClassificationInput {
            url: "https://example.com/docs",
            title: "",
            body_text: "",
            og_type: None,
            has_faq_schema: false,
        };
        assert_eq!(classifier.classify(&input), PageType::Documentation);
    }
}
