//! Default configuration values.
//!
//! Centralized default constants for use across all crates.

// ============================================================================
// Visitor Context Defaults
// ============================================================================

/// Country code used when geo resolution produced nothing.
pub const DEFAULT_UNKNOWN_COUNTRY: &str = "Unknown";
/// User-agent substrings that classify a visitor as mobile.
pub const DEFAULT_MOBILE_KEYWORDS: &[&str] = &["mobile", "android", "iphone"];
/// User-agent substrings that identify crawlers.
pub const DEFAULT_BOT_KEYWORDS: &[&str] =
    &["bot", "googlebot", "crawler", "spider", "robot", "crawling"];
/// Clock used when the visitor did not supply a local hour.
pub const DEFAULT_CLOCK: &str = "local";

// ============================================================================
// Analytics Defaults
// ============================================================================

/// Decimal places in formatted click-through rates.
pub const DEFAULT_CTR_PRECISION: u8 = 1;
/// Largest accepted CTR precision.
pub const MAX_CTR_PRECISION: u8 = 4;

// ============================================================================
// Logging Defaults
// ============================================================================

/// Default base log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Default log format: "pretty", "compact" or "json".
pub const DEFAULT_LOG_FORMAT: &str = "pretty";
/// Default log output: "stderr" or "stdout".
pub const DEFAULT_LOG_OUTPUT: &str = "stderr";
