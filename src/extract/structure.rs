//! Headings, images, tables and lists

use super::document::{css, element_text, within_chrome, Css, HtmlDocument};
use super::types::{
    Heading, HeadingSummary, ImageItem, ImageSummary, ListData, ListType, StructuredData,
    TableData,
};
use scraper::ElementRef;
use std::sync::LazyLock;

static HEADINGS: LazyLock<Css> = LazyLock::new(|| css("h1, h2, h3, h4, h5, h6"));
static IMAGES: LazyLock<Css> = LazyLock::new(|| css("img"));
static TABLES: LazyLock<Css> = LazyLock::new(|| css("table"));
static TABLE_HEADERS: LazyLock<Css> = LazyLock::new(|| css("th"));
static TABLE_ROWS: LazyLock<Css> = LazyLock::new(|| css("tr"));
static TABLE_CELLS: LazyLock<Css> = LazyLock::new(|| css("td"));
static LISTS: LazyLock<Css> = LazyLock::new(|| css("ul, ol"));

/// Every `h1`..`h6` of the document, in document order
pub fn extract_headings(document: &HtmlDocument) -> HeadingSummary {
    let items = document
        .select(&HEADINGS)
        .filter_map(|element| {
            let level = heading_level(element.value().name())?;
            let text = element_text(element);
            (!text.is_empty()).then_some(Heading { level, text })
        })
        .collect();

    HeadingSummary::from_items(items)
}

fn heading_level(tag: &str) -> Option<u8> {
    tag.strip_prefix('h')?
        .parse::<u8>()
        .ok()
        .filter(|level| (1..=6).contains(level))
}

/// Image count plus the images that carry alt text
///
/// `src` falls back to `data-src` for lazy-loaded images and is resolved to an
/// absolute URL.
pub fn extract_images(document: &HtmlDocument) -> ImageSummary {
    let mut count = 0;
    let mut items = Vec::new();

    for image in document.select(&IMAGES) {
        count += 1;

        let alt_text = image
            .value()
            .attr("alt")
            .map(str::trim)
            .unwrap_or_default();
        if alt_text.is_empty() {
            continue;
        }

        let src = image
            .value()
            .attr("src")
            .or_else(|| image.value().attr("data-src"))
            .map(|src| document.resolve(src))
            .unwrap_or_default();

        items.push(ImageItem {
            src,
            alt_text: alt_text.to_string(),
        });
    }

    ImageSummary {
        count,
        with_alt_text: items.len(),
        items,
    }
}

/// Tables and lists inside the primary container
pub fn extract_structured_data(document: &HtmlDocument) -> StructuredData {
    let container = document.main_container();

    let tables = TABLES
        .select(container)
        .filter(|table| !within_chrome(table))
        .map(extract_table)
        .filter(|table| !table.headers.is_empty() || !table.rows.is_empty())
        .collect();

    let lists = LISTS
        .select(container)
        .filter(|list| !within_chrome(list))
        .filter_map(extract_list)
        .collect();

    StructuredData { tables, lists }
}

fn extract_table(table: ElementRef<'_>) -> TableData {
    let headers = TABLE_HEADERS.select(table).map(element_text).collect();

    let rows = TABLE_ROWS
        .select(table)
        .map(|row| TABLE_CELLS.select(row).map(element_text).collect::<Vec<_>>())
        .filter(|cells| !cells.is_empty())
        .collect();

    TableData { headers, rows }
}

fn extract_list(list: ElementRef<'_>) -> Option<ListData> {
    let list_type = match list.value().name() {
        "ol" => ListType::Ol,
        _ => ListType::Ul,
    };

    let items: Vec<String> = list
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "li")
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect();

    (!items.is_empty()).then_some(ListData { list_type, items })
}
