//! Configuration validation logic.

use crate::Config;
use crate::defaults::max_ctr_precision;
use crate::loader::ConfigError;

const VALID_CLOCKS: [&str; 2] = ["local", "utc"];
const VALID_LOG_FORMATS: [&str; 3] = ["pretty", "compact", "json"];
const VALID_LOG_OUTPUTS: [&str; 2] = ["stderr", "stdout"];

pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.context.unknown_country.trim().is_empty() {
        return Err(ConfigError::Validation(
            "context.unknown_country is empty".into(),
        ));
    }
    validate_keywords("context.mobile_keywords", &config.context.mobile_keywords)?;
    validate_keywords("context.bot_keywords", &config.context.bot_keywords)?;
    if !VALID_CLOCKS.contains(&config.context.clock.as_str()) {
        return Err(ConfigError::Validation(format!(
            "context.clock must be one of: {:?}",
            VALID_CLOCKS
        )));
    }
    if config.analytics.ctr_precision > max_ctr_precision() {
        return Err(ConfigError::Validation(format!(
            "analytics.ctr_precision must be 0..={}",
            max_ctr_precision()
        )));
    }
    if let Some(format) = config.logging.format.as_deref()
        && !VALID_LOG_FORMATS.contains(&format)
    {
        return Err(ConfigError::Validation(format!(
            "logging.format must be one of: {:?}",
            VALID_LOG_FORMATS
        )));
    }
    if let Some(output) = config.logging.output.as_deref()
        && !VALID_LOG_OUTPUTS.contains(&output)
    {
        return Err(ConfigError::Validation(format!(
            "logging.output must be one of: {:?}",
            VALID_LOG_OUTPUTS
        )));
    }
    Ok(())
}

fn validate_keywords(field: &str, keywords: &[String]) -> Result<(), ConfigError> {
    if keywords.is_empty() {
        return Err(ConfigError::Validation(format!("{field} is empty")));
    }
    if keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(ConfigError::Validation(format!(
            "{field} contains a blank entry"
        )));
    }
    Ok(())
}
