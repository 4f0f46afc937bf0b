//! Configuration type definitions for visitor context, analytics, and logging.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::defaults::*;

/// How request facts turn into a visitor context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Country assigned when geo resolution failed.
    #[serde(default = "default_unknown_country")]
    pub unknown_country: String,
    /// User-agent substrings that mark a mobile device (ASCII case-insensitive).
    #[serde(default = "default_mobile_keywords")]
    pub mobile_keywords: Vec<String>,
    /// User-agent substrings that mark a crawler.
    #[serde(default = "default_bot_keywords")]
    pub bot_keywords: Vec<String>,
    /// Fallback hour source: "local" or "utc".
    #[serde(default = "default_clock")]
    pub clock: String,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            unknown_country: default_unknown_country(),
            mobile_keywords: default_mobile_keywords(),
            bot_keywords: default_bot_keywords(),
            clock: default_clock(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Decimal places in formatted CTR strings.
    #[serde(default = "default_ctr_precision")]
    pub ctr_precision: u8,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            ctr_precision: default_ctr_precision(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: Option<String>,
    /// Log format: json, pretty, or compact. Default: pretty.
    pub format: Option<String>,
    /// Output target: stdout or stderr. Default: stderr.
    pub output: Option<String>,
    /// Per-module log level filters (e.g., {"linkhub_rules": "debug"}).
    #[serde(default)]
    pub filters: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_config_defaults() {
        let cfg = ContextConfig::default();
        assert_eq!(cfg.unknown_country, "Unknown");
        assert_eq!(cfg.mobile_keywords, ["mobile", "android", "iphone"]);
        assert!(cfg.bot_keywords.iter().any(|k| k == "googlebot"));
        assert_eq!(cfg.clock, "local");
    }

    #[test]
    fn context_config_deserialize_partial() {
        let toml_str = r#"
unknown_country = "ZZ"
clock = "utc"
"#;
        let cfg: ContextConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.unknown_country, "ZZ");
        assert_eq!(cfg.clock, "utc");
        assert_eq!(cfg.mobile_keywords, ContextConfig::default().mobile_keywords);
    }

    #[test]
    fn analytics_config_default() {
        assert_eq!(AnalyticsConfig::default().ctr_precision, 1);
        let cfg: AnalyticsConfig = toml::from_str("ctr_precision = 3").unwrap();
        assert_eq!(cfg.ctr_precision, 3);
    }

    #[test]
    fn logging_config_filters() {
        let toml_str = r#"
level = "warn"
format = "json"

[filters]
linkhub_rules = "trace"
"#;
        let cfg: LoggingConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.level.as_deref(), Some("warn"));
        assert_eq!(cfg.format.as_deref(), Some("json"));
        assert!(cfg.output.is_none());
        assert_eq!(cfg.filters.get("linkhub_rules").map(String::as_str), Some("trace"));
    }
}
