use crate::config::types::{Config, ExtractorConfig, InputSource, LexicalConfig, OutputConfig};
use crate::{ConfigError, ConfigResult};

const MAX_WORKERS_LIMIT: u32 = 256;
const MAX_TIMEOUT_SECS: u64 = 300;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_extractor_config(&config.extractor)?;
    validate_lexical_config(&config.lexical)?;
    validate_inputs(&config.input)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates worker pool and fetch settings
fn validate_extractor_config(config: &ExtractorConfig) -> ConfigResult<()> {
    if config.max_workers < 1 || config.max_workers > MAX_WORKERS_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_workers must be between 1 and {}, got {}",
            MAX_WORKERS_LIMIT, config.max_workers
        )));
    }

    if config.request_timeout_secs < 1 || config.request_timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.request_timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates keyword and shortener lists
fn validate_lexical_config(config: &LexicalConfig) -> ConfigResult<()> {
    if config.suspicious_words.iter().any(|w| w.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "suspicious_words cannot contain empty entries".to_string(),
        ));
    }

    if config
        .shortening_services
        .iter()
        .any(|s| s.trim().is_empty())
    {
        return Err(ConfigError::Validation(
            "shortening_services cannot contain empty entries".to_string(),
        ));
    }

    Ok(())
}

/// Validates the input URL lists
fn validate_inputs(inputs: &[InputSource]) -> ConfigResult<()> {
    if inputs.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[input]] source is required".to_string(),
        ));
    }

    for source in inputs {
        if source.path.trim().is_empty() {
            return Err(ConfigError::InvalidPath(
                "input path cannot be empty".to_string(),
            ));
        }

        if source.default_label > 1 {
            return Err(ConfigError::Validation(format!(
                "default_label for '{}' must be 0 or 1, got {}",
                source.path, source.default_label
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> ConfigResult<()> {
    if config.features_path.trim().is_empty() {
        return Err(ConfigError::InvalidPath(
            "features_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
