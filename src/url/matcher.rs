/// Checks if a skip-path pattern matches a URL path on segment boundaries
///
/// The pattern's segments must appear as a contiguous run of the path's
/// segments. Comparison is case-insensitive, and `/admin` does not match
/// `/administrator`.
///
/// # Examples
///
/// ```
/// use sumi_gleaner::url::matches_path_segments;
///
/// assert!(matches_path_segments("/admin", "/admin"));
/// assert!(matches_path_segments("/admin", "/en/admin/users"));
/// assert!(!matches_path_segments("/admin", "/administrator"));
/// assert!(matches_path_segments("/my-account/orders", "/shop/my-account/orders/7"));
/// ```
pub fn matches_path_segments(pattern: &str, path: &str) -> bool {
    let pattern: Vec<String> = segments(pattern).collect();
    if pattern.is_empty() {
        return false;
    }

    let path: Vec<String> = segments(path).collect();
    if path.len() < pattern.len() {
        return false;
    }

    path.windows(pattern.len()).any(|window| window == pattern.as_slice())
}

/// Checks if the last path segment ends with one of the given extensions
///
/// Extensions are given with their leading dot (`.pdf`). Matching is
/// case-insensitive and only considers the final segment, so `/files.pdf/view`
/// is not a PDF.
pub fn has_skipped_extension<S: AsRef<str>>(path: &str, extensions: &[S]) -> bool {
    let last = match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment.to_lowercase(),
        _ => return false,
    };

    let Some(dot) = last.rfind('.') else {
        return false;
    };
    let extension = &last[dot..];

    extensions
        .iter()
        .any(|candidate| candidate.as_ref().eq_ignore_ascii_case(extension))
}

fn segments(path: &str) -> impl Iterator<Item = String> + '_ {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_segment_match() {
        assert!(matches_path_segments("/login", "/login"));
        assert!(matches_path_segments("/cart", "/cart/"));
    }

    #[test]
    fn test_nested_segment_match() {
        assert!(matches_path_segments("/admin", "/admin/settings"));
        assert!(matches_path_segments("/login", "/en/login"));
    }

    #[test]
    fn test_no_prefix_false_positive() {
        assert!(!matches_path_segments("/admin", "/administrator"));
        assert!(!matches_path_segments("/cart", "/cartography/maps"));
        assert!(!matches_path_segments("/login", "/blog/login-tips"));
    }

    #[test]
    fn test_no_substring_false_positive() {
        assert!(!matches_path_segments("/lead", "/lead-collection"));
        assert!(!matches_path_segments("/settings", "/docs/user-settings"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(matches_path_segments("/Login", "/LOGIN"));
    }

    #[test]
    fn test_multi_segment_pattern() {
        assert!(matches_path_segments("/my-account/orders", "/my-account/orders"));
        assert!(!matches_path_segments("/my-account/orders", "/my-account/profile"));
        assert!(!matches_path_segments("/my-account/orders", "/orders/my-account"));
    }

    #[test]
    fn test_empty_pattern_never_matches() {
        assert!(!matches_path_segments("", "/anything"));
        assert!(!matches_path_segments("/", "/anything"));
    }

    #[test]
    fn test_extension_match() {
        let exts = [".pdf", ".jpg", ".zip"];
        assert!(has_skipped_extension("/files/report.pdf", &exts));
        assert!(has_skipped_extension("/img/PHOTO.JPG", &exts));
        assert!(has_skipped_extension("/archive.zip", &exts));
    }

    #[test]
    fn test_extension_no_match() {
        let exts = [".pdf", ".js"];
        assert!(!has_skipped_extension("/docs/getting-started", &exts));
        assert!(!has_skipped_extension("/files.pdf/view", &exts));
        assert!(!has_skipped_extension("/scripts/app.json", &exts));
        assert!(!has_skipped_extension("/", &exts));
        assert!(!has_skipped_extension("", &exts));
    }

    #[test]
    fn test_html_extension_allowed() {
        assert!(!has_skipped_extension("/page.html", &[".pdf"]));
    }
}
