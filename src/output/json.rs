//! JSON-based exports: full records, retrieval documents, and embedding chunks

use super::{compute_statistics, OutputResult, Statistics};
use crate::state::PageRecord;
use serde::Serialize;
use serde_json::{json, Value};

/// Target chunk size for the vector export, in characters
pub const CHUNK_CHARS: usize = 1000;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonExport<'a> {
    domain: &'a str,
    statistics: Statistics,
    pages: &'a [&'a PageRecord],
}

pub(super) fn export_json(pages: &[&PageRecord], domain: &str) -> OutputResult<String> {
    let export = JsonExport {
        domain,
        statistics: compute_statistics(pages.iter().copied()),
        pages,
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RagDocument<'a> {
    id: String,
    url: &'a str,
    title: &'a str,
    page_type: &'static str,
    quality_score: u8,
    content: &'a str,
    metadata: RagMetadata<'a>,
    qa_pairs: Vec<Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RagMetadata<'a> {
    domain: &'a str,
    description: &'a str,
    keywords: &'a str,
    headings: Vec<&'a str>,
    word_count: usize,
    depth: u32,
}

pub(super) fn export_rag(pages: &[&PageRecord], domain: &str) -> OutputResult<String> {
    let documents: Vec<RagDocument<'_>> = pages
        .iter()
        .enumerate()
        .map(|(index, page)| RagDocument {
            id: format!("{}-{}", domain, index + 1),
            url: &page.url,
            title: &page.title,
            page_type: page.page_type.as_str(),
            quality_score: page.quality_score,
            content: &page.content.text,
            metadata: RagMetadata {
                domain,
                description: &page.meta_description,
                keywords: &page.meta_keywords,
                headings: page
                    .headings
                    .items
                    .iter()
                    .map(|heading| heading.text.as_str())
                    .collect(),
                word_count: page.word_count,
                depth: page.depth,
            },
            qa_pairs: page
                .qa_items
                .iter()
                .map(|qa| json!({ "question": qa.question, "answer": qa.answer }))
                .collect(),
        })
        .collect();

    let export = json!({
        "domain": domain,
        "documentCount": documents.len(),
        "documents": documents,
    });
    Ok(serde_json::to_string_pretty(&export)?)
}

pub(super) fn export_vectordb(pages: &[&PageRecord], domain: &str) -> OutputResult<String> {
    let mut vectors = Vec::new();

    for (page_index, page) in pages.iter().enumerate() {
        let base = json!({
            "domain": domain,
            "url": page.url,
            "title": page.title,
            "pageType": page.page_type.as_str(),
            "qualityScore": page.quality_score,
        });

        let chunks = chunk_text(&page.content.text, CHUNK_CHARS);
        let total = chunks.len();
        for (chunk_index, chunk) in chunks.into_iter().enumerate() {
            let mut metadata = base.clone();
            metadata["kind"] = json!("content");
            metadata["chunkIndex"] = json!(chunk_index);
            metadata["totalChunks"] = json!(total);
            vectors.push(json!({
                "id": format!("{}-{}-chunk-{}", domain, page_index + 1, chunk_index),
                "text": chunk,
                "metadata": metadata,
            }));
        }

        for (qa_index, qa) in page.qa_items.iter().enumerate() {
            let mut metadata = base.clone();
            metadata["kind"] = json!("qa");
            metadata["question"] = json!(qa.question);
            vectors.push(json!({
                "id": format!("{}-{}-qa-{}", domain, page_index + 1, qa_index),
                "text": format!("Q: {}\nA: {}", qa.question, qa.answer),
                "metadata": metadata,
            }));
        }
    }

    let export = json!({
        "domain": domain,
        "vectorCount": vectors.len(),
        "vectors": vectors,
    });
    Ok(serde_json::to_string_pretty(&export)?)
}

/// Splits `text` on whitespace into chunks of at most `max_chars` characters
///
/// A single word longer than `max_chars` becomes its own chunk.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        if current_chars > 0 && current_chars + 1 + word_chars > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        if current_chars > 0 {
            current.push(' ');
            current_chars += 1;
        }
        current.push_str(word);
        current_chars += word_chars;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
