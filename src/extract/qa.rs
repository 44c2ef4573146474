//! Question/answer pair detection
//!
//! Three strategies run over the whole document and their results are
//! unioned: schema.org microdata, definition lists, and question-style
//! headings followed by an answer block. A pair found by more than one
//! strategy is kept once.

use super::document::{css, element_text, next_element_sibling, Css, HtmlDocument};
use super::types::QaItem;
use scraper::ElementRef;
use std::collections::HashSet;
use std::sync::LazyLock;

static MICRODATA_QUESTIONS: LazyLock<Css> = LazyLock::new(|| css("[itemtype*='Question']"));
static ITEMPROP_NAME: LazyLock<Css> = LazyLock::new(|| css("[itemprop='name']"));
static ITEMPROP_TEXT: LazyLock<Css> = LazyLock::new(|| css("[itemprop='text']"));
static ITEMPROP_ACCEPTED: LazyLock<Css> =
    LazyLock::new(|| css("[itemprop='acceptedAnswer']"));
static DEFINITION_TERMS: LazyLock<Css> = LazyLock::new(|| css("dt"));
static QUESTION_HEADINGS: LazyLock<Css> = LazyLock::new(|| css("h3, h4, h5"));

/// Extracts all question/answer pairs of a document
pub fn extract_qa(document: &HtmlDocument) -> Vec<QaItem> {
    let mut seen = HashSet::new();

    from_microdata(document)
        .into_iter()
        .chain(from_definition_lists(document))
        .chain(from_question_headings(document))
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

fn pair(question: String, answer: String) -> Option<QaItem> {
    if question.is_empty() || answer.is_empty() {
        None
    } else {
        Some(QaItem { question, answer })
    }
}

fn first_text(element: ElementRef<'_>, selector: &Css) -> Option<String> {
    selector
        .select(element)
        .map(element_text)
        .find(|text| !text.is_empty())
}

fn from_microdata(document: &HtmlDocument) -> Vec<QaItem> {
    document
        .select(&MICRODATA_QUESTIONS)
        .filter_map(|question| {
            let text = first_text(question, &ITEMPROP_NAME)?;
            let answer = first_text(question, &ITEMPROP_TEXT)
                .or_else(|| first_text(question, &ITEMPROP_ACCEPTED))?;
            pair(text, answer)
        })
        .collect()
}

fn from_definition_lists(document: &HtmlDocument) -> Vec<QaItem> {
    document
        .select(&DEFINITION_TERMS)
        .filter_map(|term| {
            let definition = next_element_sibling(&term)?;
            if definition.value().name() != "dd" {
                return None;
            }
            pair(element_text(term), element_text(definition))
        })
        .collect()
}

fn from_question_headings(document: &HtmlDocument) -> Vec<QaItem> {
    document
        .select(&QUESTION_HEADINGS)
        .filter_map(|heading| {
            let question = element_text(heading);
            if !question.contains('?') {
                return None;
            }
            let answer = next_element_sibling(&heading)?;
            if !matches!(answer.value().name(), "p" | "div") {
                return None;
            }
            pair(question, element_text(answer))
        })
        .collect()
}
