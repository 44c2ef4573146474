use url::Url;

/// Extracts the same-site key from a URL
///
/// The key is the lowercase hostname with a single leading `www.` removed, so
/// `www.example.com` and `example.com` are treated as one site. Ports are not
/// part of the key.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_gleaner::url::extract_base_domain;
///
/// let url = Url::parse("https://WWW.Example.com/path").unwrap();
/// assert_eq!(extract_base_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("https://blog.example.com/post").unwrap();
/// assert_eq!(extract_base_domain(&url), Some("blog.example.com".to_string()));
/// ```
pub fn extract_base_domain(url: &Url) -> Option<String> {
    url.host_str().map(|host| {
        let host = host.to_lowercase();
        match host.strip_prefix("www.") {
            Some(rest) if !rest.is_empty() => rest.to_string(),
            _ => host,
        }
    })
}

/// Same as [`extract_base_domain`] but for a URL string
///
/// Returns an empty string when the input cannot be parsed, which never
/// compares equal to a real site key.
pub fn base_domain(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| extract_base_domain(&parsed))
        .unwrap_or_default()
}

/// Returns true when both URLs belong to the same site
pub fn is_same_site(a: &str, b: &str) -> bool {
    let left = base_domain(a);
    !left.is_empty() && left == base_domain(b)
}
