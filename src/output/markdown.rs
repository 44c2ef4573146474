//! Markdown export
//!
//! One section per page, with metadata bullets, the extracted paragraphs and
//! any Q&A pairs.

use crate::state::PageRecord;

/// Formats pages as a markdown document
///
/// # Arguments
///
/// * `pages` - The pages to include, in order
/// * `domain` - Site name used in the title
///
/// # Returns
///
/// A formatted markdown string
pub(super) fn export_markdown(pages: &[&PageRecord], domain: &str) -> String {
    let mut md = String::new();

    // Title
    md.push_str(&format!("# Content Export: {}\n\n", domain));
    md.push_str(&format!("- **Pages**: {}\n\n", pages.len()));

    for page in pages {
        md.push_str("---\n\n");
        format_page(&mut md, page);
    }

    md
}

fn format_page(md: &mut String, page: &PageRecord) {
    let heading = if page.title.is_empty() {
        page.url.as_str()
    } else {
        page.title.as_str()
    };
    md.push_str(&format!("## {}\n\n", heading));

    md.push_str(&format!("- **URL**: {}\n", page.url));
    md.push_str(&format!("- **Type**: {}\n", page.page_type));
    md.push_str(&format!("- **Quality Score**: {}/100\n", page.quality_score));
    md.push_str(&format!("- **Word Count**: {}\n", page.word_count));
    md.push('\n');

    if !page.meta_description.is_empty() {
        md.push_str(&format!("> {}\n\n", page.meta_description));
    }

    // Prefer paragraphs; fall back to the flattened text
    if !page.content.paragraphs.is_empty() {
        md.push_str("### Content\n\n");
        for paragraph in &page.content.paragraphs {
            md.push_str(paragraph);
            md.push_str("\n\n");
        }
    } else if !page.content.text.is_empty() {
        md.push_str("### Content\n\n");
        md.push_str(&page.content.text);
        md.push_str("\n\n");
    }

    if !page.qa_items.is_empty() {
        md.push_str("### Questions & Answers\n\n");
        for qa in &page.qa_items {
            md.push_str(&format!("**Q:** {}\n\n", qa.question));
            md.push_str(&format!("**A:** {}\n\n", qa.answer));
        }
    }
}
