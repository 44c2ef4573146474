use crate::config::types::{
    parse_capabilities, parse_page_types, Config, CrawlerConfig, FetcherConfig, OutputConfig,
    ProxyConfig, ScopeConfig, UserAgentConfig,
};
use crate::output::ExportFormat;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_scope_config(&config.scope)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
pub(crate) fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if config.max_pages < 1 || config.max_pages > 10_000 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be between 1 and 10000, got {}",
            config.max_pages
        )));
    }

    if config.min_quality_score > 100 {
        return Err(ConfigError::Validation(format!(
            "min_quality_score must be between 0 and 100, got {}",
            config.min_quality_score
        )));
    }

    parse_page_types(&config.page_types)?;
    parse_capabilities(&config.extractors)?;

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    if !config.contact_url.is_empty() {
        Url::parse(&config.contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "timeout_ms must be >= 100ms, got {}ms",
            config.timeout_ms
        )));
    }

    if config.max_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be <= 10, got {}",
            config.max_retries
        )));
    }

    for proxy in &config.proxies {
        validate_proxy(proxy)?;
    }

    Ok(())
}

/// Validates a relay template
fn validate_proxy(proxy: &ProxyConfig) -> Result<(), ConfigError> {
    if proxy.name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "proxy name cannot be empty".to_string(),
        ));
    }

    if !proxy.template.contains("{url}") {
        return Err(ConfigError::Validation(format!(
            "proxy '{}' template must contain {{url}}, got '{}'",
            proxy.name, proxy.template
        )));
    }

    let sample = proxy.template.replace("{url}", "https%3A%2F%2Fexample.com");
    let url = Url::parse(&sample).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid template for proxy '{}': {}", proxy.name, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "proxy '{}' must use HTTP or HTTPS",
            proxy.name
        )));
    }

    Ok(())
}

/// Validates the extra skip lists
fn validate_scope_config(config: &ScopeConfig) -> Result<(), ConfigError> {
    for path in &config.extra_skip_paths {
        if !path.starts_with('/') || path.trim_matches('/').is_empty() {
            return Err(ConfigError::Validation(format!(
                "skip path '{}' must start with '/' and name at least one segment",
                path
            )));
        }
    }

    for extension in &config.extra_skip_extensions {
        let bare = extension.trim_start_matches('.');
        if bare.is_empty() || !bare.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::Validation(format!(
                "skip extension '{}' must be alphanumeric",
                extension
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    config.format.parse::<ExportFormat>()?;

    if let Some(path) = &config.path {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output path cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
