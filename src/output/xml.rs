//! XML export

use crate::state::PageRecord;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Renders pages as an XML document rooted at `<website>`
pub(super) fn export_xml(pages: &[&PageRecord], domain: &str) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!(
        "<website domain=\"{}\" pages=\"{}\">\n",
        encode_double_quoted_attribute(domain),
        pages.len()
    ));

    for page in pages {
        xml.push_str("  <page>\n");
        element(&mut xml, 4, "url", &page.url);
        element(&mut xml, 4, "title", &page.title);
        element(&mut xml, 4, "type", page.page_type.as_str());
        element(&mut xml, 4, "qualityScore", &page.quality_score.to_string());
        element(&mut xml, 4, "wordCount", &page.word_count.to_string());
        element(&mut xml, 4, "depth", &page.depth.to_string());
        element(&mut xml, 4, "description", &page.meta_description);
        element(&mut xml, 4, "content", &page.content.text);

        if !page.qa_items.is_empty() {
            xml.push_str("    <qaItems>\n");
            for qa in &page.qa_items {
                xml.push_str("      <qa>\n");
                element(&mut xml, 8, "question", &qa.question);
                element(&mut xml, 8, "answer", &qa.answer);
                xml.push_str("      </qa>\n");
            }
            xml.push_str("    </qaItems>\n");
        }

        xml.push_str("  </page>\n");
    }

    xml.push_str("</website>\n");
    xml
}

fn element(xml: &mut String, indent: usize, name: &str, value: &str) {
    xml.push_str(&format!(
        "{:indent$}<{name}>{}</{name}>\n",
        "",
        encode_text(value),
        indent = indent,
        name = name
    ));
}
