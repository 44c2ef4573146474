//! URL handling module for Sumi-Gleaner
//!
//! This module provides URL normalization, same-site domain keys, skip-list
//! matching, and the scope rules that decide which discovered links may be
//! crawled.

mod domain;
mod matcher;
mod normalize;

use ::url::Url;

// Re-export main functions
pub use domain::{base_domain, extract_base_domain, is_same_site};
pub use matcher::{has_skipped_extension, matches_path_segments};
pub use normalize::{normalize_url, normalize_with_base};

/// File extensions that never lead to crawlable HTML
pub const DEFAULT_SKIP_EXTENSIONS: &[&str] = &[
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".odt", ".rtf", ".txt", ".csv",
    ".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp", ".bmp", ".ico", ".tiff", ".mp3", ".mp4",
    ".avi", ".mov", ".wav", ".webm", ".zip", ".rar", ".tar", ".gz", ".7z", ".exe", ".dmg",
    ".msi", ".css", ".js", ".json", ".xml", ".rss", ".woff", ".woff2", ".ttf", ".eot",
];

/// Paths that lead to account, commerce, or admin flows rather than content
pub const DEFAULT_SKIP_PATHS: &[&str] = &[
    "/login",
    "/logout",
    "/signin",
    "/sign-in",
    "/signup",
    "/sign-up",
    "/register",
    "/cart",
    "/basket",
    "/checkout",
    "/account",
    "/my-account",
    "/admin",
    "/wp-admin",
    "/wp-login.php",
    "/settings",
    "/password-reset",
    "/unsubscribe",
];

/// Outcome of checking a discovered URL against the crawl scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeDecision {
    /// URL may be crawled
    Allowed,
    /// URL could not be parsed
    Unparsable,
    /// URL belongs to another site
    OffSite,
    /// URL was already fetched in this crawl
    AlreadyVisited,
    /// URL points at a non-HTML resource
    SkippedExtension,
    /// URL matches an account/admin/commerce path
    SkippedPath,
}

impl ScopeDecision {
    /// Returns true if the URL should be crawled
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Static scope rules for one crawl: the site key plus the skip lists
#[derive(Debug, Clone)]
pub struct ScopeRules {
    base_domain: String,
    skip_extensions: Vec<String>,
    skip_paths: Vec<String>,
}

impl ScopeRules {
    /// Creates rules for `base_domain` with the default skip lists
    pub fn new(base_domain: impl Into<String>) -> Self {
        Self {
            base_domain: base_domain.into().to_lowercase(),
            skip_extensions: DEFAULT_SKIP_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            skip_paths: DEFAULT_SKIP_PATHS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Adds extra skip extensions and skip paths on top of the defaults
    pub fn with_extra(mut self, extensions: &[String], paths: &[String]) -> Self {
        for ext in extensions {
            let ext = if ext.starts_with('.') {
                ext.to_lowercase()
            } else {
                format!(".{}", ext.to_lowercase())
            };
            if !self.skip_extensions.contains(&ext) {
                self.skip_extensions.push(ext);
            }
        }
        for path in paths {
            if !self.skip_paths.contains(path) {
                self.skip_paths.push(path.clone());
            }
        }
        self
    }

    /// The site key every crawled URL must share
    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    /// Checks a normalized URL against the site and skip lists
    ///
    /// Visited-set membership is not known here; see
    /// [`crate::state::CrawlSession::evaluate_scope`].
    pub fn evaluate(&self, url: &str) -> ScopeDecision {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(_) => return ScopeDecision::Unparsable,
        };

        match extract_base_domain(&parsed) {
            Some(domain) if domain == self.base_domain => {}
            _ => return ScopeDecision::OffSite,
        }

        let path = parsed.path();

        if has_skipped_extension(path, &self.skip_extensions) {
            return ScopeDecision::SkippedExtension;
        }

        if self
            .skip_paths
            .iter()
            .any(|pattern| matches_path_segments(pattern, path))
        {
            return ScopeDecision::SkippedPath;
        }

        ScopeDecision::Allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ScopeRules {
        ScopeRules::new("example.com")
    }

    #[test]
    fn test_allows_same_site() {
        assert_eq!(
            rules().evaluate("https://example.com/about"),
            ScopeDecision::Allowed
        );
        assert_eq!(
            rules().evaluate("https://www.example.com/about"),
            ScopeDecision::Allowed
        );
    }

    #[test]
    fn test_rejects_other_site() {
        assert_eq!(
            rules().evaluate("https://example.org/about"),
            ScopeDecision::OffSite
        );
        assert_eq!(
            rules().evaluate("https://blog.example.com/"),
            ScopeDecision::OffSite
        );
    }

    #[test]
    fn test_rejects_unparsable() {
        assert_eq!(rules().evaluate("::nope"), ScopeDecision::Unparsable);
    }

    #[test]
    fn test_rejects_extensions() {
        assert_eq!(
            rules().evaluate("https://example.com/brochure.PDF"),
            ScopeDecision::SkippedExtension
        );
        assert_eq!(
            rules().evaluate("https://example.com/static/app.js"),
            ScopeDecision::SkippedExtension
        );
    }

    #[test]
    fn test_rejects_skip_paths_on_segments() {
        assert_eq!(
            rules().evaluate("https://example.com/login"),
            ScopeDecision::SkippedPath
        );
        assert_eq!(
            rules().evaluate("https://example.com/admin/users"),
            ScopeDecision::SkippedPath
        );
    }

    #[test]
    fn test_segment_lookalikes_allowed() {
        for url in [
            "https://example.com/administrator-guide",
            "https://example.com/lead-collection",
            "https://example.com/blog/cart-abandonment",
            "https://example.com/accounting",
        ] {
            assert_eq!(rules().evaluate(url), ScopeDecision::Allowed, "{}", url);
        }
    }

    #[test]
    fn test_extra_rules() {
        let rules = ScopeRules::new("example.com").with_extra(
            &["epub".to_string()],
            &["/members".to_string()],
        );
        assert_eq!(
            rules.evaluate("https://example.com/book.epub"),
            ScopeDecision::SkippedExtension
        );
        assert_eq!(
            rules.evaluate("https://example.com/members/area"),
            ScopeDecision::SkippedPath
        );
    }

    #[test]
    fn test_is_allowed() {
        assert!(ScopeDecision::Allowed.is_allowed());
        assert!(!ScopeDecision::OffSite.is_allowed());
        assert!(!ScopeDecision::AlreadyVisited.is_allowed());
    }
}
