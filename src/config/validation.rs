use crate::config::types::{Config, CrawlerConfig, SiteConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Shortest accepted timeout (milliseconds)
const MIN_TIMEOUT_MS: u64 = 100;

/// Longest accepted single-request timeout (milliseconds)
const MAX_TIMEOUT_MS: u64 = 600_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_crawler_config(&config.crawler)?;
    Ok(())
}

/// Validates the target site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' has no host",
            config.base_url
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent name cannot be empty".to_string(),
        ));
    }

    if !config
        .name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "user-agent name must contain only alphanumeric characters, '-' and '_', got '{}'",
            config.name
        )));
    }

    if config.version.is_empty() || config.version.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "user-agent version must be a non-empty token, got '{}'",
            config.version
        )));
    }

    if let Some(contact) = &config.contact_url {
        Url::parse(contact)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;
    }

    Ok(())
}

/// Validates crawl timeouts and deadline
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_timeout("request-timeout", config.request_timeout)?;
    validate_timeout("connect-timeout", config.connect_timeout)?;

    if let Some(deadline) = config.crawl_deadline {
        if deadline < config.request_timeout {
            return Err(ConfigError::Validation(format!(
                "crawl-deadline ({}ms) must be >= request-timeout ({}ms)",
                deadline, config.request_timeout
            )));
        }
    }

    Ok(())
}

fn validate_timeout(name: &str, value: u64) -> Result<(), ConfigError> {
    if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&value) {
        return Err(ConfigError::Validation(format!(
            "{} must be between {}ms and {}ms, got {}ms",
            name, MIN_TIMEOUT_MS, MAX_TIMEOUT_MS, value
        )));
    }
    Ok(())
}
