//! Parser-agnostic view of an HTML page
//!
//! All extractors go through [`HtmlDocument`] so the extraction logic only
//! depends on three operations: select by CSS, read attributes, and read text.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

// Hardcoded selectors are parsed once on first use.

static TITLE: LazyLock<Css> = LazyLock::new(|| css("title"));
static BODY: LazyLock<Css> = LazyLock::new(|| css("body"));

/// Primary-content containers, probed in priority order
static CONTAINERS: LazyLock<Vec<Css>> = LazyLock::new(|| {
    [
        "main",
        "article",
        ".content",
        "#content",
        ".main-content",
        "[role='main']",
    ]
    .into_iter()
    .map(css)
    .collect()
});

/// Page chrome removed before text extraction
static CHROME: LazyLock<Css> = LazyLock::new(|| {
    css(
        "script, style, noscript, template, iframe, svg, nav, footer, header, aside, \
         [role='navigation'], [role='banner'], [role='contentinfo'], [role='complementary'], \
         .sidebar, #sidebar, .menu, .navbar, .nav, .breadcrumb, .breadcrumbs, \
         .cookie-banner, .cookie-notice, .advertisement, .ads, .social-share, .skip-link",
    )
});

/// Elements whose boundaries separate words in extracted text
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table",
    "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// A hardcoded CSS selector
///
/// A selector that fails to parse is logged and then matches nothing, so a
/// bad literal degrades one extractor instead of aborting the crawl.
pub struct Css(Option<Selector>);

impl Css {
    /// Elements below `element` matching this selector, in document order
    pub fn select<'a, 'b>(
        &'b self,
        element: ElementRef<'a>,
    ) -> impl Iterator<Item = ElementRef<'a>> + 'b
    where
        'a: 'b,
    {
        self.0.iter().flat_map(move |selector| element.select(selector))
    }

    /// Returns true if `element` matches this selector
    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        self.0
            .as_ref()
            .is_some_and(|selector| selector.matches(element))
    }
}

/// Parses a hardcoded selector
pub(crate) fn css(selector: &str) -> Css {
    match Selector::parse(selector) {
        Ok(parsed) => Css(Some(parsed)),
        Err(e) => {
            tracing::error!("Invalid CSS selector '{}': {:?}", selector, e);
            Css(None)
        }
    }
}

/// A parsed HTML page together with the URL it was fetched from
pub struct HtmlDocument {
    html: Html,
    url: Url,
}

impl HtmlDocument {
    /// Parses raw HTML
    ///
    /// Parsing never fails: malformed markup is repaired the way browsers do.
    pub fn parse(html: &str, url: &Url) -> Self {
        Self {
            html: Html::parse_document(html),
            url: url.clone(),
        }
    }

    /// The URL the document was fetched from
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The `<html>` element
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// All elements matching `selector`, in document order
    pub fn select<'a, 'b>(
        &'a self,
        selector: &'b Css,
    ) -> impl Iterator<Item = ElementRef<'a>> + 'b
    where
        'a: 'b,
    {
        selector
            .0
            .iter()
            .flat_map(move |selector| self.html.select(selector))
    }

    /// The first element matching `selector`
    pub fn select_first(&self, selector: &Css) -> Option<ElementRef<'_>> {
        self.select(selector).next()
    }

    /// Text of the `<title>` element, if non-empty
    pub fn title(&self) -> Option<String> {
        self.select_first(&TITLE)
            .map(element_text)
            .filter(|text| !text.is_empty())
    }

    /// Value of the `content` attribute of the first element matching `selector`
    pub fn meta_content(&self, selector: &Css) -> Option<String> {
        self.select(selector)
            .filter_map(|el| el.value().attr("content"))
            .map(collapse_whitespace)
            .find(|value| !value.is_empty())
    }

    /// The primary content container
    ///
    /// Probes `main`, `article`, `.content`, `#content`, `.main-content` and
    /// `[role=main]` in that order, ignoring candidates that are or sit inside
    /// page chrome. Falls back to `<body>` and finally to the root element.
    pub fn main_container(&self) -> ElementRef<'_> {
        CONTAINERS
            .iter()
            .find_map(|selector| {
                self.select(selector)
                    .find(|el| !is_chrome(el) && !within_chrome(el))
            })
            .or_else(|| self.select_first(&BODY))
            .unwrap_or_else(|| self.root())
    }

    /// Resolves a possibly relative reference against the document URL
    pub fn resolve(&self, reference: &str) -> String {
        self.url
            .join(reference.trim())
            .map(String::from)
            .unwrap_or_else(|_| reference.trim().to_string())
    }
}

/// Whitespace-collapsed text of an element and all its descendants
///
/// Inline markup does not split words: `What is <code>x</code>?` reads
/// `What is x?`.
pub fn element_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(element, &mut raw, false);
    collapse_whitespace(&raw)
}

/// Whitespace-collapsed text of an element, skipping scripts, styles and chrome
pub fn clean_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(element, &mut raw, true);
    collapse_whitespace(&raw)
}

fn collect_text(element: ElementRef<'_>, out: &mut String, skip_chrome: bool) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            if skip_chrome && is_chrome(&child_element) {
                continue;
            }
            let block = BLOCK_TAGS.contains(&child_element.value().name());
            if block {
                out.push(' ');
            }
            collect_text(child_element, out, skip_chrome);
            if block {
                out.push(' ');
            }
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
}

/// Returns true if the element is page chrome (navigation, scripts, ads, ...)
pub fn is_chrome(element: &ElementRef<'_>) -> bool {
    CHROME.matches(element)
}

/// Returns true if the element sits inside page chrome
pub fn within_chrome(element: &ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| is_chrome(&ancestor))
}

/// The next sibling that is an element, skipping text and comments
pub fn next_element_sibling<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// Collapses runs of whitespace into single spaces and trims the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
