//! Main-content text and paragraph extraction

use super::document::{clean_text, css, element_text, within_chrome, Css, HtmlDocument};
use super::types::PageContent;
use std::sync::LazyLock;

static TEXT_BLOCKS: LazyLock<Css> = LazyLock::new(|| css("p, li, dd, td, blockquote"));

/// Paragraphs must be strictly longer than this many characters
pub const MIN_PARAGRAPH_CHARS: usize = 20;

/// Extracts the main text, paragraphs and raw HTML of the primary container
pub fn extract_content(document: &HtmlDocument) -> PageContent {
    let container = document.main_container();

    let paragraphs = TEXT_BLOCKS
        .select(container)
        .filter(|block| !within_chrome(block))
        .map(element_text)
        .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
        .collect();

    PageContent {
        text: clean_text(container),
        paragraphs,
        raw_section_html: container.html(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn content(html: &str) -> PageContent {
        let document = HtmlDocument::parse(html, &Url::parse("https://example.com/").unwrap());
        extract_content(&document)
    }

    #[test]
    fn test_text_from_main_without_chrome() {
        let page = content(
            r#"<html><body>
                <nav>Home | Docs | Blog</nav>
                <main>
                    <h1>Install</h1>
                    <p>Run the installer and follow the prompts.</p>
                    <script>track();</script>
                </main>
                <footer>Copyright 2024</footer>
            </body></html>"#,
        );
        assert_eq!(page.text, "Install Run the installer and follow the prompts.");
        assert!(page.raw_section_html.starts_with("<main>"));
    }

    #[test]
    fn test_content_class_inside_header_is_not_the_container() {
        let page = content(
            r#"<html><body>
                <header><div class="content">Acme Logo</div></header>
                <div id="content">
                    <p>This is the real article body of the page.</p>
                </div>
            </body></html>"#,
        );
        assert!(page.text.contains("real article body"));
        assert!(!page.text.contains("Acme Logo"));
        assert_eq!(page.paragraphs, vec!["This is the real article body of the page."]);
    }

    #[test]
    fn test_paragraph_length_filter() {
        let page = content(
            r#"<main>
                <p>Too short.</p>
                <p>exactly twenty chars</p>
                <p>This paragraph is long enough to keep.</p>
                <ul><li>A list item that is also long enough</li><li>tiny</li></ul>
                <blockquote>Quoted text that easily passes the filter</blockquote>
            </main>"#,
        );
        assert_eq!(
            page.paragraphs,
            vec![
                "This paragraph is long enough to keep.",
                "A list item that is also long enough",
                "Quoted text that easily passes the filter",
            ]
        );
    }

    #[test]
    fn test_paragraphs_skip_chrome_inside_body() {
        let page = content(
            r#"<body>
                <nav><ul><li>Navigation entry that is long</li></ul></nav>
                <p>Body paragraph that should be kept around.</p>
            </body>"#,
        );
        assert_eq!(page.paragraphs, vec!["Body paragraph that should be kept around."]);
    }

    #[test]
    fn test_whitespace_collapsed() {
        let page = content("<main><p>  spread\n\n   over     several lines  </p></main>");
        assert_eq!(page.paragraphs, vec!["spread over several lines"]);
        assert_eq!(page.text, "spread over several lines");
    }
}
