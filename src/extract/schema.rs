//! JSON-LD and FAQ schema detection

use super::document::{css, Css, HtmlDocument};
use serde_json::Value;
use std::sync::LazyLock;

static JSON_LD: LazyLock<Css> =
    LazyLock::new(|| css("script[type='application/ld+json']"));
static FAQ_MICRODATA: LazyLock<Css> = LazyLock::new(|| css("[itemtype*='FAQPage']"));

/// Parses every JSON-LD block of the document
///
/// Blocks that fail to parse are skipped. Top-level arrays are flattened so
/// each entry of the result is one schema object.
pub fn extract_json_ld(document: &HtmlDocument) -> Vec<Value> {
    let mut values = Vec::new();

    for script in document.select(&JSON_LD) {
        let raw: String = script.text().collect();
        match serde_json::from_str::<Value>(raw.trim()) {
            Ok(Value::Array(items)) => values.extend(items),
            Ok(value) => values.push(value),
            Err(e) => {
                tracing::debug!("Skipping invalid JSON-LD on {}: {}", document.url(), e);
            }
        }
    }

    values
}

/// Returns true if the page declares an FAQPage in JSON-LD or microdata
pub fn has_faq_schema(document: &HtmlDocument, json_ld: &[Value]) -> bool {
    json_ld.iter().any(declares_faq_page) || document.select_first(&FAQ_MICRODATA).is_some()
}

fn declares_faq_page(value: &Value) -> bool {
    let type_matches = match value.get("@type") {
        Some(Value::String(kind)) => kind == "FAQPage",
        Some(Value::Array(kinds)) => kinds.iter().any(|kind| kind == "FAQPage"),
        _ => false,
    };

    type_matches
        || value
            .get("@graph")
            .and_then(Value::as_array)
            .is_some_and(|graph| graph.iter().any(declares_faq_page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use url::Url;

    fn doc(html: &str) -> HtmlDocument {
        HtmlDocument::parse(html, &Url::parse("https://example.com/").unwrap())
    }

    #[test]
    fn test_parses_objects_and_flattens_arrays() {
        let document = doc(
            r#"<head>
                <script type="application/ld+json">{"@type": "Organization", "name": "Acme"}</script>
                <script type="application/ld+json">[{"@type": "WebPage"}, {"@type": "BreadcrumbList"}]</script>
            </head>"#,
        );
        let values = extract_json_ld(&document);
        assert_eq!(values.len(), 3);
        assert_eq!(values[0]["name"], "Acme");
        assert_eq!(values[2]["@type"], "BreadcrumbList");
    }

    #[test]
    fn test_invalid_json_ld_skipped() {
        let document = doc(
            r#"<head>
                <script type="application/ld+json">{ not json </script>
                <script type="application/ld+json">{"@type": "Article"}</script>
            </head>"#,
        );
        let values = extract_json_ld(&document);
        assert_eq!(values, vec![json!({"@type": "Article"})]);
    }

    #[test]
    fn test_faq_schema_from_json_ld() {
        let document = doc("<html></html>");
        assert!(has_faq_schema(&document, &[json!({"@type": "FAQPage"})]));
        assert!(has_faq_schema(&document, &[json!({"@type": ["WebPage", "FAQPage"]})]));
        assert!(has_faq_schema(
            &document,
            &[json!({"@graph": [{"@type": "Organization"}, {"@type": "FAQPage"}]})]
        ));
        assert!(!has_faq_schema(&document, &[json!({"@type": "Article"})]));
    }

    #[test]
    fn test_faq_schema_from_microdata() {
        let document = doc(r#"<div itemscope itemtype="https://schema.org/FAQPage"></div>"#);
        assert!(has_faq_schema(&document, &[]));
    }
}
