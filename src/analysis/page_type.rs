//! Page category definitions
//!
//! Every stored page carries exactly one of these categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The category assigned to a page by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    Faq,
    Support,
    Documentation,
    Guide,
    Troubleshooting,
    ApiDocumentation,
    KnowledgeBase,
    LegalPolicy,
    Product,
    Service,
    Contact,
    About,
    BlogArticle,
    Reviews,
    Homepage,
    Other,
}

impl PageType {
    /// Returns true for the categories that earn the quality-score bonus
    pub fn is_high_value(&self) -> bool {
        matches!(
            self,
            Self::Faq | Self::Documentation | Self::Guide | Self::Support
        )
    }

    /// Stable identifier used in config files and exports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Faq => "faq",
            Self::Support => "support",
            Self::Documentation => "documentation",
            Self::Guide => "guide",
            Self::Troubleshooting => "troubleshooting",
            Self::ApiDocumentation => "api_documentation",
            Self::KnowledgeBase => "knowledge_base",
            Self::LegalPolicy => "legal_policy",
            Self::Product => "product",
            Self::Service => "service",
            Self::Contact => "contact",
            Self::About => "about",
            Self::BlogArticle => "blog_article",
            Self::Reviews => "reviews",
            Self::Homepage => "homepage",
            Self::Other => "other",
        }
    }

    /// Human-readable label used in CSV and Markdown output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Faq => "FAQ",
            Self::Support => "Support",
            Self::Documentation => "Documentation",
            Self::Guide => "Guide",
            Self::Troubleshooting => "Troubleshooting",
            Self::ApiDocumentation => "API Documentation",
            Self::KnowledgeBase => "Knowledge Base",
            Self::LegalPolicy => "Legal/Policy",
            Self::Product => "Product",
            Self::Service => "Service",
            Self::Contact => "Contact",
            Self::About => "About",
            Self::BlogArticle => "Blog/Article",
            Self::Reviews => "Reviews",
            Self::Homepage => "Homepage",
            Self::Other => "Other",
        }
    }

    /// Returns all page types
    pub fn all() -> [Self; 16] {
        [
            Self::Faq,
            Self::Support,
            Self::Documentation,
            Self::Guide,
            Self::Troubleshooting,
            Self::ApiDocumentation,
            Self::KnowledgeBase,
            Self::LegalPolicy,
            Self::Product,
            Self::Service,
            Self::Contact,
            Self::About,
            Self::BlogArticle,
            Self::Reviews,
            Self::Homepage,
            Self::Other,
        ]
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for PageType {
    type Err = String;

    /// Accepts the identifier (`api_documentation`), hyphenated or spaced
    /// variants, and the short aliases `docs`, `api`, `kb`, `blog`, `legal`, `help`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' ', '/'], "_");
        let page_type = match key.as_str() {
            "faq" => Self::Faq,
            "support" | "help" => Self::Support,
            "documentation" | "docs" => Self::Documentation,
            "guide" => Self::Guide,
            "troubleshooting" => Self::Troubleshooting,
            "api_documentation" | "api" => Self::ApiDocumentation,
            "knowledge_base" | "kb" => Self::KnowledgeBase,
            "legal_policy" | "legal" => Self::LegalPolicy,
            "product" => Self::Product,
            "service" => Self::Service,
            "contact" => Self::Contact,
            "about" => Self::About,
            "blog_article" | "blog" | "article" => Self::BlogArticle,
            "reviews" => Self::Reviews,
            "homepage" | "home" => Self::Homepage,
            "other" => Self::Other,
            _ => return Err(s.to_string()),
        };
        Ok(page_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_value_types() {
        assert!(PageType::Faq.is_high_value());
        assert!(PageType::Documentation.is_high_value());
        assert!(PageType::Guide.is_high_value());
        assert!(PageType::Support.is_high_value());

        assert!(!PageType::ApiDocumentation.is_high_value());
        assert!(!PageType::BlogArticle.is_high_value());
        assert!(!PageType::Other.is_high_value());
    }

    #[test]
    fn test_roundtrip_identifier() {
        for page_type in PageType::all() {
            assert_eq!(page_type.as_str().parse::<PageType>(), Ok(page_type));
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("docs".parse::<PageType>(), Ok(PageType::Documentation));
        assert_eq!("API".parse::<PageType>(), Ok(PageType::ApiDocumentation));
        assert_eq!("knowledge-base".parse::<PageType>(), Ok(PageType::KnowledgeBase));
        assert_eq!("Legal/Policy".parse::<PageType>(), Ok(PageType::LegalPolicy));
        assert!("recipes".parse::<PageType>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&PageType::ApiDocumentation).unwrap();
        assert_eq!(json, "\"api_documentation\"");
    }

    #[test]
    fn test_display_label() {
        assert_eq!(PageType::Faq.to_string(), "FAQ");
        assert_eq!(PageType::BlogArticle.to_string(), "Blog/Article");
    }
}
