//! Additive content-quality heuristic

use super::PageType;
use crate::extract::{HeadingSummary, PageContent, QaItem};

/// Highest possible score
pub const MAX_SCORE: u8 = 100;

/// What the scorer needs to know about a page
#[derive(Debug, Clone, Copy)]
pub struct ScoreInput<'a> {
    pub content: &'a PageContent,
    pub headings: &'a HeadingSummary,
    pub qa_items: &'a [QaItem],
    pub page_type: PageType,
}

/// Rates a page's suitability as training or retrieval content
///
/// | Signal                       | Points |
/// |------------------------------|--------|
/// | text longer than 500 chars   | +20    |
/// | text longer than 1500 chars  | +20    |
/// | text longer than 3000 chars  | +10    |
/// | more than 3 headings         | +15    |
/// | more than 2 h2 headings      | +10    |
/// | any Q&A pair                 | +25    |
/// | more than 5 Q&A pairs        | +15    |
/// | FAQ/Documentation/Guide/Support | +20 |
///
/// The total is clamped to `0..=100`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityScorer;

impl QualityScorer {
    pub fn new() -> Self {
        Self
    }

    /// Computes the score for one page
    pub fn score(&self, input: &ScoreInput<'_>) -> u8 {
        let total = content_points(input.content.char_len())
            + structure_points(input.headings)
            + qa_points(input.qa_items.len())
            + type_points(input.page_type);

        total.min(u32::from(MAX_SCORE)) as u8
    }
}

fn content_points(chars: usize) -> u32 {
    let mut points = 0;
    if chars > 500 {
        points += 20;
    }
    if chars > 1500 {
        points += 20;
    }
    if chars > 3000 {
        points += 10;
    }
    points
}

fn structure_points(headings: &HeadingSummary) -> u32 {
    let mut points = 0;
    if headings.total() > 3 {
        points += 15;
    }
    if headings.h2_count > 2 {
        points += 10;
    }
    points
}

fn qa_points(pairs: usize) -> u32 {
    let mut points = 0;
    if pairs > 0 {
        points += 25;
    }
    if pairs > 5 {
        points += 15;
    }
    points
}

fn type_points(page_type: PageType) -> u32 {
    if page_type.is_high_value() {
        20
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Heading;

    fn content(chars: usize) -> PageContent {
        PageContent {
            text: "a".repeat(chars),
            ..Default::default()
        }
    }

    fn qa(n: usize) -> Vec<QaItem> {
        (0..n)
            .map(|i| QaItem {
                question: format!("Question {i}?"),
                answer: format!("Answer {i}"),
            })
            .collect()
    }

    fn headings(levels: &[u8]) -> HeadingSummary {
        HeadingSummary::from_items(
            levels
                .iter()
                .map(|&level| Heading {
                    level,
                    text: "Heading".into(),
                })
                .collect(),
        )
    }

    fn score(content: &PageContent, headings: &HeadingSummary, qa_items: &[QaItem], page_type: PageType) -> u8 {
        QualityScorer::new().score(&ScoreInput {
            content,
            headings,
            qa_items,
            page_type,
        })
    }

    #[test]
    fn test_empty_page_scores_zero() {
        assert_eq!(score(&content(0), &headings(&[]), &[], PageType::Other), 0);
    }

    #[test]
    fn test_content_length_thresholds() {
        let none = headings(&[]);
        assert_eq!(score(&content(500), &none, &[], PageType::Other), 0);
        assert_eq!(score(&content(501), &none, &[], PageType::Other), 20);
        assert_eq!(score(&content(1501), &none, &[], PageType::Other), 40);
        assert_eq!(score(&content(3001), &none, &[], PageType::Other), 50);
    }

    #[test]
    fn test_structure_points() {
        let empty = content(0);
        assert_eq!(score(&empty, &headings(&[1, 2, 2]), &[], PageType::Other), 0);
        assert_eq!(score(&empty, &headings(&[1, 2, 3, 3]), &[], PageType::Other), 15);
        assert_eq!(score(&empty, &headings(&[1, 2, 2, 2]), &[], PageType::Other), 25);
    }

    #[test]
    fn test_qa_points() {
        let empty = content(0);
        let none = headings(&[]);
        assert_eq!(score(&empty, &none, &qa(1), PageType::Other), 25);
        assert_eq!(score(&empty, &none, &qa(5), PageType::Other), 25);
        assert_eq!(score(&empty, &none, &qa(6), PageType::Other), 40);
    }

    #[test]
    fn test_type_bonus() {
        let empty = content(0);
        let none = headings(&[]);
        assert_eq!(score(&empty, &none, &[], PageType::Faq), 20);
        assert_eq!(score(&empty, &none, &[], PageType::Support), 20);
        assert_eq!(score(&empty, &none, &[], PageType::ApiDocumentation), 0);
    }

    #[test]
    fn test_six_qa_pairs_on_faq_page() {
        let s = score(&content(0), &headings(&[]), &qa(6), PageType::Faq);
        assert!(s >= 45, "score was {s}");
        assert_eq!(s, 60);
    }

    #[test]
    fn test_score_is_clamped() {
        let s = score(
            &content(5000),
            &headings(&[1, 2, 2, 2, 3]),
            &qa(10),
            PageType::Documentation,
        );
        assert_eq!(s, MAX_SCORE);
    }
}
