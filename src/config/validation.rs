use crate::config::types::{Config, ScannerConfig, UserAgentConfig};
use crate::scanner::MAX_LINK_CHECKS;
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scanner_config(&config.scanner)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates scanner timeouts and sampling bounds
fn validate_scanner_config(config: &ScannerConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("page-timeout-ms", config.page_timeout_ms),
        ("network-idle-ms", config.network_idle_ms),
        ("link-check-timeout-ms", config.link_check_timeout_ms),
        ("probe-timeout-ms", config.probe_timeout_ms),
    ] {
        if value == 0 {
            return Err(ConfigError::Validation(format!(
                "{} must be greater than 0",
                name
            )));
        }
    }

    if config.network_idle_ms >= config.page_timeout_ms {
        return Err(ConfigError::Validation(format!(
            "network-idle-ms ({}ms) must be shorter than page-timeout-ms ({}ms)",
            config.network_idle_ms, config.page_timeout_ms
        )));
    }

    if config.max_link_checks < 1 || config.max_link_checks > MAX_LINK_CHECKS {
        return Err(ConfigError::Validation(format!(
            "max-link-checks must be between 1 and {}, got {}",
            MAX_LINK_CHECKS, config.max_link_checks
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
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "user-agent name must contain only alphanumeric characters, hyphens and underscores, got '{}'",
            config.name
        )));
    }

    if config.version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.scanner.probe_timeout_ms = 0;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("probe-timeout-ms"));
    }

    #[test]
    fn test_idle_window_longer_than_timeout_rejected() {
        let mut config = Config::default();
        config.scanner.page_timeout_ms = 1000;
        config.scanner.network_idle_ms = 1000;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_link_check_bound() {
        let mut config = Config::default();
        config.scanner.max_link_checks = 0;
        assert!(validate(&config).is_err());

        config.scanner.max_link_checks = 11;
        assert!(validate(&config).is_err());

        config.scanner.max_link_checks = 3;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_user_agent_name() {
        let mut config = Config::default();
        config.user_agent.name = String::new();
        assert!(validate(&config).is_err());

        config.user_agent.name = "Seo Scan".to_string();
        assert!(validate(&config).is_err());

        config.user_agent.name = "seo-scan_bot".to_string();
        assert!(validate(&config).is_ok());
    }
}
