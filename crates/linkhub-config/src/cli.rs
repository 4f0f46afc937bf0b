//! CLI override definitions and application logic.

use clap::Parser;

use crate::Config;

#[derive(Debug, Clone, Parser, Default)]
pub struct CliOverrides {
    /// Override log level (trace/debug/info/warn/error)
    #[arg(long)]
    pub log_level: Option<String>,
    /// Override log format (pretty/compact/json)
    #[arg(long)]
    pub log_format: Option<String>,
    /// Override the country used when geo resolution failed
    #[arg(long)]
    pub unknown_country: Option<String>,
    /// Override mobile user-agent keywords (repeatable or comma-separated)
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub mobile_keyword: Option<Vec<String>>,
    /// Override crawler user-agent keywords (repeatable or comma-separated)
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub bot_keyword: Option<Vec<String>>,
    /// Fallback hour source (local, utc)
    #[arg(long)]
    pub clock: Option<String>,
    /// Decimal places in formatted CTR values
    #[arg(long)]
    pub ctr_precision: Option<u8>,
}

pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) {
    if let Some(v) = &overrides.log_level {
        config.logging.level = Some(v.clone());
    }
    if let Some(v) = &overrides.log_format {
        config.logging.format = Some(v.clone());
    }
    if let Some(v) = &overrides.unknown_country {
        config.context.unknown_country = v.clone();
    }
    if let Some(v) = &overrides.mobile_keyword {
        config.context.mobile_keywords = v.clone();
    }
    if let Some(v) = &overrides.bot_keyword {
        config.context.bot_keywords = v.clone();
    }
    if let Some(v) = &overrides.clock {
        config.context.clock = v.clone();
    }
    if let Some(v) = overrides.ctr_precision {
        config.analytics.ctr_precision = v;
    }
}
