use crate::UrlError;
use url::Url;

/// Normalizes an absolute URL string according to Sumi-Gleaner's rules
///
/// # Normalization Steps
///
/// 1. Trim whitespace; a bare host such as `example.com/docs` gets `https://`
/// 2. Parse the URL; reject if malformed or not HTTP(S)
/// 3. Lowercase scheme and host (done by the parser), drop default ports
/// 4. Remove the fragment (everything after #)
/// 5. Drop an empty query string (trailing ?)
/// 6. Remove trailing slashes from the path, including the root slash
///
/// The result is stable: normalizing an already-normalized URL returns it
/// unchanged.
///
/// # Examples
///
/// ```
/// use sumi_gleaner::url::normalize_url;
///
/// let url = normalize_url("HTTPS://Example.COM/docs/#intro").unwrap();
/// assert_eq!(url, "https://example.com/docs");
/// ```
pub fn normalize_url(raw: &str) -> Result<String, UrlError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(UrlError::Empty);
    }

    let candidate = if has_scheme(raw) {
        raw.to_string()
    } else {
        format!("https://{}", raw.trim_start_matches('/'))
    };

    let url = Url::parse(&candidate).map_err(|e| UrlError::Parse(e.to_string()))?;
    canonicalize(url)
}

/// Resolves `raw` against `base` and normalizes the result
///
/// Used for links discovered on a page, which may be relative (`../faq`,
/// `/about`, `?page=2`) or absolute.
pub fn normalize_with_base(raw: &str, base: &Url) -> Result<String, UrlError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(UrlError::Empty);
    }

    let url = base.join(raw).map_err(|e| UrlError::Parse(e.to_string()))?;
    canonicalize(url)
}

/// Applies the canonical form to an already parsed URL
fn canonicalize(mut url: Url) -> Result<String, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    url.set_fragment(None);

    if url.query() == Some("") {
        url.set_query(None);
    }

    let trimmed = url.path().trim_end_matches('/').to_string();
    url.set_path(if trimmed.is_empty() { "/" } else { &trimmed });

    let mut normalized = String::from(url.as_str());
    if url.query().is_none() && normalized.ends_with('/') {
        normalized.pop();
    }

    Ok(normalized)
}

/// Returns true when `raw` starts with an RFC 3986 scheme followed by a colon
fn has_scheme(raw: &str) -> bool {
    match raw.find(':') {
        Some(idx) if idx > 0 => {
            let scheme = &raw[..idx];
            scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
                && !raw[idx + 1..].starts_with(|c: char| c.is_ascii_digit())
        }
        _ => false,
    }
}
